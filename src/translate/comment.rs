//! Comment pass: line comments become `--`, block comments become
//! `--[=[ … ]=]` unless they already contain the long-bracket close
//! sequence.

use crate::ast::{Comment, CommentGroup};
use crate::error::{CoreResult, TranslateErrorKind};
use crate::node::NodeId;
use crate::writer::Writer;

use super::err;

pub fn translate_comment_group(w: &mut Writer<'_>, node: NodeId, doc: &CommentGroup) -> CoreResult<()> {
    for c in &doc.0 {
        match c {
            Comment::Line(text) => w.write_linef(format_args!("--{text}"))?,
            Comment::Block(text) => {
                if text.contains("]=]") {
                    return err(node, TranslateErrorKind::CommentContainsLongBracketClose);
                }
                w.write_linef(format_args!("--[=[{text}]=]"))?;
            }
        }
    }
    Ok(())
}
