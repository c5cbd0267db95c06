//! Statement translator: assignment (including combined-op desugaring),
//! return, if/else-if chains, blocks, and range loops.

use crate::ast::{AssignOp, Expr, Stmt};
use crate::error::{CoreResult, TranslateErrorKind};
use crate::objects::ProgramView;
use crate::types::Type;
use crate::writer::Writer;

use super::expr::expr_id;
use super::{err, ExprCtx, Translator};

pub fn translate_block<P: ProgramView>(t: &mut Translator<'_, P>, w: &mut Writer<'_>, block: &[Stmt]) -> CoreResult<()> {
    for stmt in block {
        translate_stmt(t, w, stmt)?;
    }
    Ok(())
}

pub fn translate_stmt<P: ProgramView>(t: &mut Translator<'_, P>, w: &mut Writer<'_>, s: &Stmt) -> CoreResult<()> {
    match s {
        Stmt::Assign { lhs, rhs, op } => translate_assign(t, w, lhs, rhs, *op),
        Stmt::Decl(d) => super::decl::translate_decl(t, w, d, false),
        Stmt::ExprStmt(e) => {
            t.translate_expr(w, e, ExprCtx::value())?;
            w.write_newline().map_err(Into::into)
        }
        Stmt::Return(results) => translate_return(t, w, results.as_deref()),
        Stmt::If { cond, body, else_ } => translate_if(t, w, cond, body, else_.as_deref()),
        Stmt::Block(b) => translate_block(t, w, b),
        Stmt::Range { key, value, define, expr, body } => {
            translate_range(t, w, key.as_deref(), value.as_deref(), *define, expr, body)
        }
    }
}

fn assert_assignable(e: &Expr) -> CoreResult<()> {
    match e {
        Expr::Ident { .. } | Expr::Index { .. } | Expr::Selector { .. } => Ok(()),
        other => err(expr_id(other), TranslateErrorKind::InvalidAssignLhs),
    }
}

fn translate_assign<P: ProgramView>(
    t: &mut Translator<'_, P>,
    w: &mut Writer<'_>,
    lhs: &[Expr],
    rhs: &[Expr],
    op: AssignOp,
) -> CoreResult<()> {
    for l in lhs {
        assert_assignable(l)?;
    }

    if let Some(bin_op) = op.binary() {
        if lhs.len() != 1 || rhs.len() != 1 {
            return err(
                expr_id(&lhs[0]),
                TranslateErrorKind::InvalidCombinedAssignArity { lhs: lhs.len(), rhs: rhs.len() },
            );
        }
        t.translate_expr(w, &lhs[0], ExprCtx::lvalue())?;
        w.write_string(" = ")?;
        t.translate_expr(w, &lhs[0], ExprCtx::value())?;
        let op_str = if bin_op == crate::ast::BinaryOp::Add && t.is_string_typed(&lhs[0]) {
            ".."
        } else {
            match bin_op {
                crate::ast::BinaryOp::Add => "+",
                crate::ast::BinaryOp::Sub => "-",
                crate::ast::BinaryOp::Mul => "*",
                crate::ast::BinaryOp::Quo => "/",
                crate::ast::BinaryOp::Rem => "%",
                _ => unreachable!("combined-assign only desugars arithmetic ops"),
            }
        };
        w.write_byte(b' ')?;
        w.write_string(op_str)?;
        w.write_byte(b' ')?;
        t.translate_expr(w, &rhs[0], ExprCtx::value())?;
        return w.write_newline().map_err(Into::into);
    }

    if op == AssignOp::Define {
        w.write_string("local ")?;
    }

    let nl = lhs.len();
    for (i, l) in lhs.iter().enumerate() {
        t.translate_expr(w, l, ExprCtx::lvalue())?;
        if i + 1 != nl {
            w.write_string(", ")?;
        }
    }
    w.write_string(" = ")?;
    let nr = rhs.len();
    for (i, r) in rhs.iter().enumerate() {
        t.translate_expr(w, r, ExprCtx::value())?;
        if i + 1 != nr {
            w.write_string(", ")?;
        }
    }
    w.write_newline().map_err(Into::into)
}

fn translate_return<P: ProgramView>(
    t: &mut Translator<'_, P>,
    w: &mut Writer<'_>,
    results: Option<&[Expr]>,
) -> CoreResult<()> {
    let Some(results) = results else {
        return w.write_line("return").map_err(Into::into);
    };
    w.write_string("return ")?;
    let n = results.len();
    for (i, r) in results.iter().enumerate() {
        t.translate_expr(w, r, ExprCtx::value())?;
        if i + 1 != n {
            w.write_string(", ")?;
        }
    }
    w.write_newline().map_err(Into::into)
}

fn translate_if<P: ProgramView>(
    t: &mut Translator<'_, P>,
    w: &mut Writer<'_>,
    cond: &Expr,
    body: &[Stmt],
    else_: Option<&Stmt>,
) -> CoreResult<()> {
    w.write_string("if ")?;
    t.translate_expr(w, cond, ExprCtx::value())?;
    w.write_string(" then")?;
    w.write_newline()?;
    w.indent();
    translate_block(t, w, body)?;
    w.dedent();
    if let Some(else_stmt) = else_ {
        if let Stmt::If { cond: ecnd, body: ebody, else_: eelse } = else_stmt {
            w.write_string("else")?;
            return translate_if(t, w, ecnd, ebody, eelse.as_deref());
        }
        w.write_line("else")?;
        w.indent();
        translate_stmt(t, w, else_stmt)?;
        w.dedent();
    }
    w.write_line("end").map_err(Into::into)
}

/// Range statement: slices/arrays iterate via `ipairs`, maps via `pairs`;
/// only the define and no-variable forms exist in the source language, so
/// there is nothing else to branch on here.
fn translate_range<P: ProgramView>(
    t: &mut Translator<'_, P>,
    w: &mut Writer<'_>,
    key: Option<&str>,
    value: Option<&str>,
    define: bool,
    expr: &Expr,
    body: &[Stmt],
) -> CoreResult<()> {
    if !define && (key.is_some() || value.is_some()) {
        return err(expr_id(expr), TranslateErrorKind::RangeRequiresDefine);
    }

    let ty = t.view.expr_info(expr_id(expr)).ok().map(|i| i.ty.clone());
    let iter_fn = match ty.as_ref().map(|t| t.underlying()) {
        Some(Type::Slice(_)) | Some(Type::Array(..)) => "ipairs",
        Some(Type::Map(..)) => "pairs",
        _ => return err(expr_id(expr), TranslateErrorKind::RangeOverNonRangeable),
    };

    w.write_string("for ")?;
    w.write_string(key.unwrap_or("_"))?;
    if let Some(v) = value {
        w.write_string(", ")?;
        w.write_string(v)?;
    }
    w.write_string(" in ")?;
    w.write_string(iter_fn)?;
    w.write_byte(b'(')?;
    t.translate_expr(w, expr, ExprCtx::value())?;
    w.write_string(" or {}) do")?;
    w.write_newline()?;
    w.indent();
    translate_block(t, w, body)?;
    w.dedent();
    w.write_line("end").map_err(Into::into)
}
