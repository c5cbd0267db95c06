//! Expression translator: identifiers, literals, operators, calls, composite
//! literals, selectors, and indexing, plus the raw-emit escape hatch that
//! bypasses translation entirely for a marked call.

use std::collections::HashSet;

use crate::ast::{BinaryOp, CompositeElt, Expr, Literal, Param, Stmt, UnaryOp};
use crate::error::{CoreResult, TranslateError, TranslateErrorKind};
use crate::node::NodeId;
use crate::objects::{Object, ProgramView};
use crate::tags;
use crate::types::{BasicKind, StructField, Type};
use crate::writer::Writer;

use super::{builtin, err, ExprCtx, Translator, RAW_PKG_PATH};

impl<'p, P: ProgramView> Translator<'p, P> {
    pub fn translate_expr(&mut self, w: &mut Writer<'_>, e: &Expr, ctx: ExprCtx) -> CoreResult<()> {
        match e {
            Expr::Ident { id, name } => self.translate_ident(w, *id, name),
            Expr::BasicLit { id, lit } => self.translate_literal(w, *id, lit),
            Expr::Paren(inner) => {
                w.write_byte(b'(')?;
                self.translate_expr(w, inner, ExprCtx::value())?;
                w.write_byte(b')')?;
                Ok(())
            }
            Expr::TypeAssert { x } => self.translate_expr(w, x, ctx),
            Expr::Binary { op, x, y } => self.translate_binary(w, *op, x, y),
            Expr::Unary { op, x } => self.translate_unary(w, *op, x),
            Expr::Call { id, func, args, ellipsis } => {
                self.translate_call(w, *id, func, args, *ellipsis)
            }
            Expr::CompositeLit { id, ty, elts } => self.translate_composite_lit(w, *id, ty, elts),
            Expr::FuncLit { params, variadic, body } => {
                self.translate_func_lit(w, params, *variadic, body)
            }
            Expr::Selector { id, x, sel } => self.translate_selector(w, *id, x, sel, ctx.in_call),
            Expr::Index { x, index } => self.translate_index(w, x, index, ctx.lvalue),
        }
    }

    /// Identifier qualification: a package name emits bare `_<name>`;
    /// anything else that belongs to a
    /// package, is not function-local, and is not a struct field gets the
    /// `_<pkg>.` prefix unless the package is transient.
    fn translate_ident(&mut self, w: &mut Writer<'_>, id: NodeId, name: &str) -> CoreResult<()> {
        let obj = self.view.use_of(id).or_else(|_| self.view.def_of(id));
        if let Ok(obj) = obj {
            if let Object::PackageName { name: pkg_name, .. } = obj {
                return w.write_string(&format!("_{pkg_name}")).map_err(Into::into);
            }
            let qualifies =
                obj.is_package_level() && !obj.is_field() && !self.is_transient_package(obj.pkg());
            if qualifies {
                if let Some(pkg) = obj.pkg() {
                    w.write_string(&format!("_{pkg}."))?;
                }
            }
        }
        w.write_string(name).map_err(Into::into)
    }

    fn translate_literal(&mut self, w: &mut Writer<'_>, id: NodeId, lit: &Literal) -> CoreResult<()> {
        match lit {
            Literal::Int(v) | Literal::Float(v) => w.write_string(v).map_err(Into::into),
            Literal::Char(c) => w.write_string(&quote_string(&c.to_string())).map_err(Into::into),
            Literal::String(s) => w.write_string(&quote_string(s)).map_err(Into::into),
            Literal::RawString(s) => {
                if s.contains("]=]") {
                    return err(id, TranslateErrorKind::RawStringContainsLongBracketClose);
                }
                w.write_string(&format!("[=[{s}]=]")).map_err(Into::into)
            }
        }
    }

    fn translate_binary(&mut self, w: &mut Writer<'_>, op: BinaryOp, x: &Expr, y: &Expr) -> CoreResult<()> {
        let op_str = match op {
            BinaryOp::Add if self.is_string_typed(x) || self.is_string_typed(y) => "..",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Quo => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "~=",
            BinaryOp::Lss => "<",
            BinaryOp::Gtr => ">",
            BinaryOp::Leq => "<=",
            BinaryOp::Geq => ">=",
            BinaryOp::LAnd => "and",
            BinaryOp::LOr => "or",
        };
        self.translate_expr(w, x, ExprCtx::value())?;
        w.write_byte(b' ')?;
        w.write_string(op_str)?;
        w.write_byte(b' ')?;
        self.translate_expr(w, y, ExprCtx::value())
    }

    fn translate_unary(&mut self, w: &mut Writer<'_>, op: UnaryOp, x: &Expr) -> CoreResult<()> {
        match op {
            // Address-of is identity: no value-type semantics in the target.
            UnaryOp::Addr => self.translate_expr(w, x, ExprCtx::value()),
            UnaryOp::Not => {
                w.write_string("(not ")?;
                self.translate_expr(w, x, ExprCtx::value())?;
                w.write_byte(b')').map_err(Into::into)
            }
            // Lua has no unary `+` operator, so unlike `Neg` this only
            // parenthesizes; there is no operator text to emit.
            UnaryOp::Pos => {
                w.write_byte(b'(')?;
                self.translate_expr(w, x, ExprCtx::value())?;
                w.write_byte(b')').map_err(Into::into)
            }
            UnaryOp::Neg => {
                w.write_string("(-")?;
                self.translate_expr(w, x, ExprCtx::value())?;
                w.write_byte(b')').map_err(Into::into)
            }
        }
    }

    fn translate_call(
        &mut self,
        w: &mut Writer<'_>,
        id: NodeId,
        func: &Expr,
        args: &[Expr],
        ellipsis: bool,
    ) -> CoreResult<()> {
        if self.try_translate_raw(w, func, args)? {
            return Ok(());
        }

        if let Some(func_id) = func_node_id(func) {
            if let Ok(info) = self.view.expr_info(func_id) {
                if info.is_builtin() {
                    return builtin::translate_builtin(self, w, id, func, args);
                }
                if info.is_type() {
                    w.write_byte(b'(')?;
                    if let Some(arg) = args.first() {
                        self.translate_expr(w, arg, ExprCtx::value())?;
                    }
                    return w.write_byte(b')').map_err(Into::into);
                }
            }
        }

        if ellipsis && args.is_empty() {
            return err(id, TranslateErrorKind::VariadicCallMissingArgs);
        }

        self.translate_expr(w, func, ExprCtx::call())?;
        w.write_byte(b'(')?;
        let n = args.len();
        for (i, arg) in args.iter().enumerate() {
            let last = i + 1 == n;
            if last && ellipsis {
                w.write_string("unpack(")?;
                self.translate_expr(w, arg, ExprCtx::value())?;
                w.write_byte(b')')?;
            } else {
                self.translate_expr(w, arg, ExprCtx::value())?;
            }
            if !last {
                w.write_string(", ")?;
            }
        }
        w.write_byte(b')').map_err(Into::into)
    }

    /// Raw-emit bypass: `<pkg>.Raw(args...)` where `<pkg>` resolves to
    /// `RAW_PKG_PATH`. String-literal args splice verbatim so callers can
    /// drop target-language snippets the translator has no rule for.
    fn try_translate_raw(&mut self, w: &mut Writer<'_>, func: &Expr, args: &[Expr]) -> CoreResult<bool> {
        let Expr::Selector { x, sel, .. } = func else { return Ok(false) };
        if sel != "Raw" {
            return Ok(false);
        }
        let Expr::Ident { id: pkg_id, .. } = x.as_ref() else { return Ok(false) };
        let Ok(Object::PackageName { path, .. }) = self.view.use_of(*pkg_id) else {
            return Ok(false);
        };
        if path != RAW_PKG_PATH {
            return Ok(false);
        }
        for arg in args {
            match arg {
                Expr::BasicLit { lit: Literal::String(s), .. }
                | Expr::BasicLit { lit: Literal::RawString(s), .. } => {
                    w.write_string(s)?;
                }
                other => self.translate_expr(w, other, ExprCtx::value())?,
            }
        }
        Ok(true)
    }

    fn translate_composite_lit(
        &mut self,
        w: &mut Writer<'_>,
        id: NodeId,
        ty: &Type,
        elts: &[CompositeElt],
    ) -> CoreResult<()> {
        match ty.underlying() {
            Type::Slice(_) | Type::Array(..) => {
                w.write_string("{ ")?;
                self.write_array_elts(w, id, elts)?;
                w.write_string(" }").map_err(Into::into)
            }
            Type::Map(..) => {
                w.write_string("{ ")?;
                let n = elts.len();
                for (i, elt) in elts.iter().enumerate() {
                    let CompositeElt::Keyed(key, value) = elt else {
                        return err(
                            id,
                            TranslateErrorKind::Other("map composite literal element without a key".into()),
                        );
                    };
                    w.write_string(&format!("[{key}] = "))?;
                    self.translate_expr(w, value, ExprCtx::value())?;
                    if i + 1 != n {
                        w.write_string(", ")?;
                    }
                }
                w.write_string(" }").map_err(Into::into)
            }
            Type::Struct(s) => {
                let fields = s.fields.clone();
                self.translate_struct_lit(w, id, ty, &fields, elts)
            }
            other => err(
                id,
                TranslateErrorKind::Other(format!("composite literal of unsupported type {other}")),
            ),
        }
    }

    fn write_array_elts(&mut self, w: &mut Writer<'_>, id: NodeId, elts: &[CompositeElt]) -> CoreResult<()> {
        let n = elts.len();
        for (i, elt) in elts.iter().enumerate() {
            let CompositeElt::Positional(value) = elt else {
                return err(
                    id,
                    TranslateErrorKind::Other("keyed element in array/slice composite literal".into()),
                );
            };
            self.translate_expr(w, value, ExprCtx::value())?;
            if i + 1 != n {
                w.write_string(", ")?;
            }
        }
        Ok(())
    }

    /// Struct-literal construction: emit
    /// explicit fields (positional resolved by index, keyed by name, both
    /// through `luaname` tag translation), then fill every remaining field
    /// with its `luadefault` tag or derived zero, skipping nil zeros. If the
    /// type has any pointer-receiver method, the table body is built into a
    /// scratch buffer first so it can be wrapped in a `setmetatable` call —
    /// the streaming `Writer` can't patch text it already emitted.
    fn translate_struct_lit(
        &mut self,
        w: &mut Writer<'_>,
        id: NodeId,
        ty: &Type,
        fields: &[StructField],
        elts: &[CompositeElt],
    ) -> CoreResult<()> {
        let mut explicit: Vec<(String, &Expr)> = Vec::new();
        for (i, elt) in elts.iter().enumerate() {
            match elt {
                CompositeElt::Positional(value) => {
                    let field = fields.get(i).ok_or_else(|| {
                        TranslateError::new(id, TranslateErrorKind::Other("positional field index out of range".into()))
                    })?;
                    explicit.push((tags::lua_name(&field.tag, &field.name), value));
                }
                CompositeElt::Keyed(key, value) => {
                    let field = fields.iter().find(|f| &f.name == key).ok_or_else(|| {
                        TranslateError::new(id, TranslateErrorKind::Other("unknown struct field in literal".into()))
                    })?;
                    explicit.push((tags::lua_name(&field.tag, &field.name), value));
                }
            }
        }
        let set: HashSet<&str> = explicit.iter().map(|(k, _)| k.as_str()).collect();

        let needs_wrap = ty.has_any_pointer_method();
        let mut scratch = Vec::new();
        {
            let mut body = Writer::new(&mut scratch);
            body.write_string("{ ")?;
            let mut first = true;
            for (name, value) in &explicit {
                if !first {
                    body.write_string(", ")?;
                }
                first = false;
                body.write_string(&format!("[\"{name}\"] = "))?;
                self.translate_expr(&mut body, value, ExprCtx::value())?;
            }
            for field in fields {
                let lname = tags::lua_name(&field.tag, &field.name);
                if set.contains(lname.as_str()) {
                    continue;
                }
                let zero = tags::lua_default(&field.tag).unwrap_or_else(|| field.ty.zero_value_lua());
                if zero == "nil" {
                    continue;
                }
                if !first {
                    body.write_string(", ")?;
                }
                first = false;
                body.write_string(&format!("[\"{lname}\"] = {zero}"))?;
            }
            body.write_string(" }")?;
        }
        let literal = String::from_utf8_lossy(&scratch);

        if needs_wrap {
            let index_expr = self.struct_type_expr(id, ty);
            w.write_string(&format!("setmetatable({literal}, {{ __index = {index_expr} }})"))
                .map_err(Into::into)
        } else {
            w.write_string(&literal).map_err(Into::into)
        }
    }

    /// The `_<pkg>.<Name>` expression naming a struct type, for the
    /// metatable `__index` a pointer-method literal needs.
    fn struct_type_expr(&self, id: NodeId, ty: &Type) -> String {
        match ty {
            Type::Named(n) => {
                let pkg = n.pkg_path.clone().unwrap_or_else(|| self.pkg_prefix(id));
                format!("_{pkg}.{}", n.name)
            }
            _ => self.pkg_prefix(id),
        }
    }

    fn translate_func_lit(
        &mut self,
        w: &mut Writer<'_>,
        params: &[Param],
        variadic: bool,
        body: &[Stmt],
    ) -> CoreResult<()> {
        w.write_string("function(")?;
        let n = params.len();
        for (i, p) in params.iter().enumerate() {
            if variadic && i + 1 == n {
                w.write_string("...")?;
            } else {
                w.write_string(&p.name)?;
            }
            if i + 1 != n {
                w.write_string(", ")?;
            }
        }
        w.write_byte(b')')?;
        w.write_newline()?;
        w.indent();
        if variadic {
            if let Some(last) = params.last() {
                w.write_linef(format_args!("local {} = {{...}}", last.name))?;
            }
        }
        super::stmt::translate_block(self, w, body)?;
        w.dedent();
        w.write_string("end").map_err(Into::into)
    }

    /// Selector translation: resolves the base type through pointer
    /// indirection, checks the method set, and picks one of four forms
    /// depending on `in_call` and method-ness.
    fn translate_selector(
        &mut self,
        w: &mut Writer<'_>,
        _id: NodeId,
        x: &Expr,
        sel: &str,
        in_call: bool,
    ) -> CoreResult<()> {
        if let Expr::Ident { id: xid, .. } = x {
            if let Ok(Object::PackageName { path, .. }) = self.view.use_of(*xid) {
                if self.is_transient_package(Some(path)) {
                    return w.write_string(sel).map_err(Into::into);
                }
            }
        }

        let base_ty = self.view.expr_info(expr_id(x)).ok().map(|i| i.ty.clone());
        let is_method = base_ty.as_ref().and_then(|t| t.method(sel)).is_some();

        match (in_call, is_method) {
            (true, true) => {
                self.translate_expr(w, x, ExprCtx::value())?;
                w.write_string(&format!(":{sel}")).map_err(Into::into)
            }
            (true, false) | (false, false) => {
                self.translate_expr(w, x, ExprCtx::value())?;
                let fname = self.field_name(x, sel);
                w.write_string(&format!(".{fname}")).map_err(Into::into)
            }
            (false, true) => {
                w.write_string("builtins.create_closure(")?;
                self.translate_expr(w, x, ExprCtx::value())?;
                w.write_string(&format!(", \"{sel}\")")).map_err(Into::into)
            }
        }
    }

    fn field_name(&self, x: &Expr, sel: &str) -> String {
        if let Ok(info) = self.view.expr_info(expr_id(x)) {
            if let Some(fields) = info.ty.struct_fields() {
                if let Some(f) = fields.iter().find(|f| f.name == sel) {
                    return tags::lua_name(&f.tag, &f.name);
                }
            }
        }
        sel.to_string()
    }

    /// Index translation: rvalue reads are nil-guarded
    /// (`(expr[idx+1] or zero)`); lvalues are unwrapped.
    fn translate_index(&mut self, w: &mut Writer<'_>, x: &Expr, index: &Expr, lvalue: bool) -> CoreResult<()> {
        let x_ty = self.view.expr_info(expr_id(x)).ok().map(|i| i.ty.clone());
        let is_map = x_ty.as_ref().map(|t| t.is_map()).unwrap_or(false);

        if lvalue {
            self.translate_expr(w, x, ExprCtx::value())?;
            w.write_byte(b'[')?;
            self.translate_expr(w, index, ExprCtx::value())?;
            if !is_map {
                w.write_string(" + 1")?;
            }
            return w.write_byte(b']').map_err(Into::into);
        }

        w.write_byte(b'(')?;
        self.translate_expr(w, x, ExprCtx::value())?;
        w.write_byte(b'[')?;
        self.translate_expr(w, index, ExprCtx::value())?;
        if !is_map {
            w.write_string(" + 1")?;
        }
        w.write_string("] or ")?;
        let zero = x_ty
            .as_ref()
            .and_then(|t| t.elem())
            .map(|e| e.zero_value_lua())
            .unwrap_or_else(|| "nil".to_string());
        w.write_string(&zero)?;
        w.write_byte(b')').map_err(Into::into)
    }

    pub(crate) fn is_string_typed(&self, e: &Expr) -> bool {
        self.view
            .expr_info(expr_id(e))
            .map(|i| matches!(i.ty.underlying(), Type::Basic(BasicKind::String)))
            .unwrap_or(false)
    }
}

/// The node id under which an arbitrary expression's type was recorded —
/// the bridge keys `Types` by the expression's own node, so only the
/// variants carrying one are meaningful lookup keys. Composite forms look
/// through to their head identifier/call/selector, mirroring what a real
/// `go/ast` walk would key on for `info.Types[expr]`.
pub(crate) fn expr_id(e: &Expr) -> NodeId {
    match e {
        Expr::Ident { id, .. } | Expr::Call { id, .. } | Expr::Selector { id, .. } | Expr::CompositeLit { id, .. } => {
            *id
        }
        Expr::BasicLit { id, .. } => *id,
        Expr::Paren(inner) | Expr::TypeAssert { x: inner } | Expr::Unary { x: inner, .. } => expr_id(inner),
        Expr::Binary { x, .. } => expr_id(x),
        Expr::Index { x, .. } => expr_id(x),
        Expr::FuncLit { .. } => NodeId(u32::MAX),
    }
}

fn func_node_id(e: &Expr) -> Option<NodeId> {
    match e {
        Expr::Ident { id, .. } | Expr::Selector { id, .. } => Some(*id),
        _ => None,
    }
}

/// Double-quoted string form, escaping quotes, backslashes, and newlines.
fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
