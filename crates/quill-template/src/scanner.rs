/*
 * scanner.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Balanced block scanner.
//!
//! Finds the extent of a block given its identifying open marker, skipping
//! over nested blocks of the same family. The match is balanced without a
//! depth counter: every generic open marker seen before the currently assumed
//! close consumes one more close marker.
//!
//! ```text
//! {foreach a}x{foreach b}y{/foreach}z{/foreach}
//! ^ start                 ^ first candidate     ^ true close
//! ```

use std::ops::Range;

/// The kinds of block the scanner understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFamily {
    /// `{condition ...}...{/condition}`
    Condition,
    /// `{foreach ...}...{/foreach}`
    Foreach,
}

impl BlockFamily {
    /// The family keyword as written in markup.
    pub fn keyword(self) -> &'static str {
        match self {
            BlockFamily::Condition => "condition",
            BlockFamily::Foreach => "foreach",
        }
    }

    /// Prefix shared by every open marker of this family.
    pub fn open_prefix(self) -> &'static str {
        match self {
            BlockFamily::Condition => "{condition",
            BlockFamily::Foreach => "{foreach",
        }
    }

    /// The close marker of this family.
    pub fn close_marker(self) -> &'static str {
        match self {
            BlockFamily::Condition => "{/condition}",
            BlockFamily::Foreach => "{/foreach}",
        }
    }
}

/// The extent of a block within a text, markers included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    /// Byte offset of the open marker.
    pub start: usize,
    /// Byte length from the open marker through the close marker.
    pub length: usize,
    /// Text between the open and close markers.
    pub content: &'a str,
}

impl Span<'_> {
    /// Byte offset just past the close marker.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Return `text` with this span replaced by `replacement`.
    pub fn splice(&self, text: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(text.len() - self.length + replacement.len());
        out.push_str(&text[..self.start]);
        out.push_str(replacement);
        out.push_str(&text[self.end()..]);
        out
    }
}

/// Locate the block opened by the first `{marker}` in `text`.
///
/// `marker` is the open marker without its braces, e.g. `foreach items` or
/// `condition name="x" is="true"`. Returns `None` when the marker does not
/// occur or when the block is never closed.
pub fn find_block<'a>(text: &'a str, family: BlockFamily, marker: &str) -> Option<Span<'a>> {
    let open_marker = format!("{{{}}}", marker);
    let start = text.find(&open_marker)?;
    let body_start = start + open_marker.len();

    let open = family.open_prefix();
    let close = family.close_marker();

    let mut close_pos = find_from(text, close, body_start)?;
    let mut open_cursor = body_start;
    while let Some(open_pos) = find_from(text, open, open_cursor) {
        if open_pos > close_pos {
            break;
        }
        close_pos = find_from(text, close, close_pos + close.len())?;
        open_cursor = open_pos + open.len();
    }

    let end = close_pos + close.len();
    Some(Span {
        start,
        length: end - start,
        content: &text[body_start..close_pos],
    })
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .find(needle)
        .map(|offset| offset + from)
}
