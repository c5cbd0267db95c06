//! Declaration translator: imports, type specs (struct deserialization
//! helpers), value specs, and function/method declarations.

use crate::ast::{Decl, FuncDecl, ImportSpec, TypeSpec, ValueSpec};
use crate::error::CoreResult;
use crate::objects::ProgramView;
use crate::tags;
use crate::types::{StructField, Type};
use crate::writer::Writer;

use super::{comment, ExprCtx, Translator};

pub fn translate_decl<P: ProgramView>(
    t: &mut Translator<'_, P>,
    w: &mut Writer<'_>,
    d: &Decl,
    top_level: bool,
) -> CoreResult<()> {
    match d {
        Decl::Import(spec) => translate_import(t, w, spec),
        Decl::Type(spec) => translate_type(t, w, spec),
        Decl::Value(spec) => translate_value(t, w, spec, top_level),
        Decl::Func(decl) => translate_func(t, w, decl),
    }
}

fn translate_import<P: ProgramView>(t: &mut Translator<'_, P>, w: &mut Writer<'_>, spec: &ImportSpec) -> CoreResult<()> {
    if spec.anonymous || t.is_transient_package(Some(&spec.path)) {
        return Ok(());
    }
    let local = match &spec.alias {
        Some(alias) if alias != "." => alias.as_str(),
        _ => spec.pkg_name.as_str(),
    };
    w.write_linef(format_args!(r#"local _{local} = _G["{}"]"#, spec.path))
        .map_err(Into::into)
}

/// Struct types get their table and deserialization helpers; every other
/// type spec is static-only and emits nothing.
fn translate_type<P: ProgramView>(t: &mut Translator<'_, P>, w: &mut Writer<'_>, spec: &TypeSpec) -> CoreResult<()> {
    let Type::Struct(s) = spec.ty.underlying() else {
        return Ok(());
    };
    let pkg = t.pkg_prefix(spec.node);
    let fields = s.fields.clone();

    w.write_linef(format_args!("_{pkg}.{} = {{}}", spec.name))?;
    write_create_from_table(t, w, &pkg, &spec.name)?;
    write_initialize_from_table(t, w, &pkg, &spec.name, &fields)?;
    Ok(())
}

fn write_create_from_table<P: ProgramView>(
    _t: &mut Translator<'_, P>,
    w: &mut Writer<'_>,
    pkg: &str,
    name: &str,
) -> CoreResult<()> {
    w.write_linef(format_args!("function _{pkg}.{name}._createFromTable(tbl)"))?;
    w.indent();
    w.write_linef(format_args!("local self = setmetatable({{}}, {{ __index = _{pkg}.{name} }})"))?;
    w.write_linef(format_args!("_{pkg}.{name}._initializeFromTable(self, tbl)"))?;
    w.write_line("return self")?;
    w.dedent();
    w.write_line("end").map_err(Into::into)
}

fn write_initialize_from_table<P: ProgramView>(
    _t: &mut Translator<'_, P>,
    w: &mut Writer<'_>,
    pkg: &str,
    name: &str,
    fields: &[StructField],
) -> CoreResult<()> {
    w.write_linef(format_args!("function _{pkg}.{name}._initializeFromTable(self, tbl)"))?;
    w.indent();
    for field in fields {
        let lname = tags::lua_name(&field.tag, &field.name);
        match field.ty.underlying() {
            Type::Interface(_) => {
                // Cannot select a concrete type for an interface field.
            }
            Type::Named(n) if matches!(n.underlying.underlying(), Type::Struct(_)) => {
                let nested_pkg = n.pkg_path.clone().unwrap_or_else(|| pkg.to_string());
                w.write_linef(format_args!(
                    "self[\"{lname}\"] = _{nested_pkg}.{}._createFromTable(tbl[\"{lname}\"])",
                    n.name
                ))?;
            }
            _ => {
                w.write_linef(format_args!(
                    "if type(self[\"{lname}\"]) == type(tbl[\"{lname}\"]) then self[\"{lname}\"] = tbl[\"{lname}\"] end"
                ))?;
            }
        }
    }
    w.dedent();
    w.write_line("end").map_err(Into::into)
}

fn translate_value<P: ProgramView>(
    t: &mut Translator<'_, P>,
    w: &mut Writer<'_>,
    spec: &ValueSpec,
    top_level: bool,
) -> CoreResult<()> {
    for (i, name) in spec.names.iter().enumerate() {
        let init = spec.values.get(i);
        if top_level {
            let pkg = t.pkg_prefix(spec.node);
            w.write_string(&format!("_{pkg}.{name} = "))?;
        } else {
            w.write_string(&format!("local {name} = "))?;
        }
        match init {
            Some(expr) => t.translate_expr(w, expr, ExprCtx::value())?,
            None => {
                let zero = spec.ty.as_ref().map(|ty| ty.zero_value_lua()).unwrap_or_else(|| "nil".to_string());
                w.write_string(&zero)?;
            }
        }
        w.write_newline()?;
    }
    Ok(())
}

fn translate_func<P: ProgramView>(t: &mut Translator<'_, P>, w: &mut Writer<'_>, decl: &FuncDecl) -> CoreResult<()> {
    comment::translate_comment_group(w, decl.node, &decl.doc)?;
    let pkg = t.pkg_prefix(decl.node);

    // init has no addressable name in the source language, so it can't be
    // assigned to a package-table field; it only registers itself.
    let is_init = decl.receiver.is_none() && decl.name == "init";
    if let Some(recv) = &decl.receiver {
        w.write_string(&format!("_{pkg}.{}.{} = function({}", recv.type_name, decl.name, recv.name))?;
    } else if is_init {
        w.write_string("builtins.add_init(function(")?;
    } else {
        w.write_string(&format!("_{pkg}.{} = function(", decl.name))?;
    }

    if decl.receiver.is_some() && !decl.params.is_empty() {
        w.write_string(", ")?;
    }
    let n = decl.params.len();
    for (i, p) in decl.params.iter().enumerate() {
        if decl.variadic && i + 1 == n {
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
    if decl.variadic {
        if let Some(last) = decl.params.last() {
            w.write_linef(format_args!("local {} = {{...}}", last.name))?;
        }
    }
    super::stmt::translate_block(t, w, &decl.body)?;
    w.dedent();
    if is_init {
        w.write_line("end)")
    } else {
        w.write_line("end")
    }
    .map_err(Into::into)
}
