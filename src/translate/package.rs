//! Package driver: per-file banner, package-table install, runtime-library
//! binding, then each declaration in source order. Files within a package
//! translate in the package's own order.

use crate::ast::{File, SourcePackage};
use crate::error::CoreResult;
use crate::objects::ProgramView;
use crate::writer::Writer;

use super::Translator;

pub fn translate_file<P: ProgramView>(t: &mut Translator<'_, P>, w: &mut Writer<'_>, f: &File) -> CoreResult<()> {
    let node = f.decls.first().map(decl_node_id).unwrap_or(crate::node::NodeId(0));
    let pkg = t.pkg_prefix(node);
    let path = t
        .view
        .package_of(node)
        .map(|p| p.path.clone())
        .unwrap_or_else(|| pkg.clone());

    w.write_line("-- Package declaration")?;
    w.write_linef(format_args!(r#"local _{pkg} = _G["{path}"] or {{}}"#))?;
    w.write_linef(format_args!(r#"_G["{path}"] = _{pkg}"#))?;
    w.write_newline()?;
    w.write_line("local builtins = _G.lunar_go_builtins")?;
    w.write_newline()?;

    for decl in &f.decls {
        super::decl::translate_decl(t, w, decl, true)?;
        w.write_newline()?;
    }
    Ok(())
}

pub fn translate_package<P: ProgramView>(t: &mut Translator<'_, P>, w: &mut Writer<'_>, pkg: &SourcePackage) -> CoreResult<()> {
    for file in &pkg.files {
        translate_file(t, w, file)?;
    }
    Ok(())
}

fn decl_node_id(d: &crate::ast::Decl) -> crate::node::NodeId {
    match d {
        crate::ast::Decl::Import(s) => s.node,
        crate::ast::Decl::Type(s) => s.node,
        crate::ast::Decl::Value(s) => s.node,
        crate::ast::Decl::Func(f) => f.node,
    }
}
