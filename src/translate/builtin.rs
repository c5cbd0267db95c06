//! Builtin call translator: `make`, `println`/`print`, `append`, `delete`,
//! `panic`, and `len`, each routed to a runtime-prelude helper or a direct
//! Lua equivalent.

use crate::ast::Expr;
use crate::error::{CoreResult, TranslateErrorKind};
use crate::node::NodeId;
use crate::objects::ProgramView;
use crate::types::Type;
use crate::writer::Writer;

use super::expr::expr_id;
use super::{err, ExprCtx, Translator};

pub fn translate_builtin<P: ProgramView>(
    t: &mut Translator<'_, P>,
    w: &mut Writer<'_>,
    id: NodeId,
    func: &Expr,
    args: &[Expr],
) -> CoreResult<()> {
    let Expr::Ident { name, .. } = func else {
        return err(id, TranslateErrorKind::UnhandledBuiltin("<non-identifier>".into()));
    };

    match name.as_str() {
        "make" => translate_make(t, w, id, args),
        "println" => write_call(t, w, "print", args),
        "print" => write_call(t, w, "write", args),
        "append" => write_builtins_call(t, w, "append", args),
        "delete" => write_builtins_call(t, w, "delete", args),
        "panic" => {
            w.write_string("error(")?;
            t.translate_expr(w, &args[0], ExprCtx::value())?;
            w.write_byte(b')').map_err(Into::into)
        }
        "len" => translate_len(t, w, args),
        other => err(id, TranslateErrorKind::UnhandledBuiltin(other.to_string())),
    }
}

/// `make(map…)` emits an empty table; `make(slice, n?)` threads a
/// zero-constructor closure and optional length through `builtins.makeSlice`.
fn translate_make<P: ProgramView>(
    t: &mut Translator<'_, P>,
    w: &mut Writer<'_>,
    id: NodeId,
    args: &[Expr],
) -> CoreResult<()> {
    let Some(first) = args.first() else {
        return err(id, TranslateErrorKind::Other("make requires a type argument".into()));
    };
    let ty = t.view.expr_info(expr_id(first)).ok().map(|i| i.ty.clone());
    match ty.as_ref().map(|t| t.underlying()) {
        Some(Type::Map(..)) => w.write_string("{}").map_err(Into::into),
        _ => {
            let elem_zero = ty
                .as_ref()
                .and_then(|t| t.elem())
                .map(|e| e.zero_value_lua())
                .unwrap_or_else(|| "nil".to_string());
            w.write_string(&format!("builtins.makeSlice(function() return {elem_zero} end"))?;
            if let Some(n) = args.get(1) {
                w.write_string(", ")?;
                t.translate_expr(w, n, ExprCtx::value())?;
            }
            w.write_byte(b')').map_err(Into::into)
        }
    }
}

fn translate_len<P: ProgramView>(t: &mut Translator<'_, P>, w: &mut Writer<'_>, args: &[Expr]) -> CoreResult<()> {
    let arg = &args[0];
    let is_map = t
        .view
        .expr_info(expr_id(arg))
        .map(|i| i.ty.is_map())
        .unwrap_or(false);
    if is_map {
        w.write_string("builtins.mapLength(")?;
        t.translate_expr(w, arg, ExprCtx::value())?;
        w.write_byte(b')').map_err(Into::into)
    } else {
        w.write_string("builtins.length(")?;
        t.translate_expr(w, arg, ExprCtx::value())?;
        w.write_byte(b')').map_err(Into::into)
    }
}

fn write_call<P: ProgramView>(t: &mut Translator<'_, P>, w: &mut Writer<'_>, target: &str, args: &[Expr]) -> CoreResult<()> {
    w.write_string(target)?;
    w.write_byte(b'(')?;
    write_arg_list(t, w, args)?;
    w.write_byte(b')').map_err(Into::into)
}

fn write_builtins_call<P: ProgramView>(
    t: &mut Translator<'_, P>,
    w: &mut Writer<'_>,
    name: &str,
    args: &[Expr],
) -> CoreResult<()> {
    w.write_string(&format!("builtins.{name}("))?;
    write_arg_list(t, w, args)?;
    w.write_byte(b')').map_err(Into::into)
}

fn write_arg_list<P: ProgramView>(t: &mut Translator<'_, P>, w: &mut Writer<'_>, args: &[Expr]) -> CoreResult<()> {
    let n = args.len();
    for (i, arg) in args.iter().enumerate() {
        t.translate_expr(w, arg, ExprCtx::value())?;
        if i + 1 != n {
            w.write_string(", ")?;
        }
    }
    Ok(())
}
