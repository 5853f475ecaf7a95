//! Tolerant structural scan of playbook documents.
//!
//! Completion runs against documents that are being edited live: dangling
//! `key:` lines, half-typed tokens, indentation that no conforming YAML
//! parser accepts. Instead of a strict AST this module reads the
//! indentation structure directly — `- ` sequence markers and `key:` shapes
//! per line — and derives the enclosing node path, the typed prefix at the
//! cursor, and the sibling keys already written at the cursor's nesting
//! level. Anything it cannot make sense of degrades to "no context" and the
//! request returns an empty candidate list.

use tower_lsp::lsp_types::Position;
use tracing::trace;

use crate::document::Document;

/// One step of the enclosing-node path, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// A sequence item (`- `).
    Item,
    /// A mapping key introducing a nested block.
    Key(String),
}

/// Whether the cursor sits on a mapping key or inside a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorKind {
    Key,
    Value { key: String },
}

/// Everything the classifier needs to know about a cursor position.
#[derive(Debug, Clone)]
pub struct CursorContext {
    /// Enclosing node path from the document root to the cursor's level.
    /// For a value position the key on the cursor line is carried in
    /// [`CursorKind::Value`], not in the path.
    pub path: Vec<PathStep>,
    pub kind: CursorKind,
    /// Text from the start of the current token to the cursor.
    pub prefix: String,
    /// Keys already present at the cursor's nesting level. The cursor's own
    /// line never counts: re-completing a token mid-edit must not hide it.
    pub siblings: Vec<String>,
    pub line: u32,
    /// Character offset of the cursor from the document start.
    pub offset: usize,
    /// UTF-16 column where the replacement edit starts.
    pub replace_start: u32,
    /// UTF-16 column of the cursor itself (clamped to line content).
    pub cursor: u32,
}

#[derive(Debug, Default)]
struct KeyShape {
    col: usize,
    name: String,
    colon: usize,
    value_col: Option<usize>,
    value: String,
}

#[derive(Debug, Default)]
struct LineShape {
    blank: bool,
    dash: Option<usize>,
    content_col: usize,
    content: String,
    key: Option<KeyShape>,
}

fn parse_line(raw: &str) -> LineShape {
    let chars: Vec<char> = raw.chars().collect();
    let mut i = 0;
    while i < chars.len() && chars[i] == ' ' {
        i += 1;
    }
    if i >= chars.len() || chars[i] == '#' {
        return LineShape {
            blank: true,
            ..LineShape::default()
        };
    }
    let mut dash = None;
    if chars[i] == '-' && (i + 1 >= chars.len() || chars[i + 1] == ' ') {
        dash = Some(i);
        i += 1;
        while i < chars.len() && chars[i] == ' ' {
            i += 1;
        }
    }
    let content_col = i;
    let content: String = chars[i..].iter().collect::<String>().trim_end().to_string();
    if content.is_empty() {
        return LineShape {
            blank: false,
            dash,
            content_col,
            content,
            key: None,
        };
    }
    // A key ends at the first ':' that is followed by a space or ends the line.
    let mut colon = None;
    for (j, c) in chars.iter().enumerate().skip(content_col) {
        if *c == ':' && (j + 1 >= chars.len() || chars[j + 1] == ' ') {
            colon = Some(j);
            break;
        }
    }
    let key = colon.filter(|c| *c > content_col).map(|c| {
        let name: String = chars[content_col..c].iter().collect();
        let mut v = c + 1;
        while v < chars.len() && chars[v] == ' ' {
            v += 1;
        }
        let value: String = chars[v..].iter().collect::<String>().trim_end().to_string();
        KeyShape {
            col: content_col,
            name: name.trim_end().to_string(),
            colon: c,
            value_col: if value.is_empty() { None } else { Some(v) },
            value,
        }
    });
    LineShape {
        blank: false,
        dash,
        content_col,
        content,
        key,
    }
}

fn char_sub(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// Locate the cursor within the document's block structure.
///
/// Returns `None` when the position does not exist in the document; every
/// other shape of input yields a best-effort context.
pub fn locate(document: &Document, position: Position) -> Option<CursorContext> {
    let (line, ccol) = document.char_col(position)?;
    let shapes: Vec<LineShape> = (0..document.len_lines())
        .map(|i| parse_line(&document.line_text(i)))
        .collect();
    let cur = &shapes[line];

    // Resolve the cursor spot on its own line: key or value, typed prefix,
    // and the column that anchors the parent walk.
    let (kind, prefix, token_start, mut anchor) = if cur.blank {
        (CursorKind::Key, String::new(), ccol, ccol)
    } else if let Some(key) = &cur.key {
        if ccol > key.colon {
            let vstart = key.value_col.unwrap_or(key.colon + 2);
            let prefix = if ccol > vstart {
                char_sub(&key.value, 0, ccol - vstart)
            } else {
                String::new()
            };
            (
                CursorKind::Value {
                    key: key.name.clone(),
                },
                prefix,
                vstart.min(ccol),
                key.col,
            )
        } else if ccol >= key.col {
            (
                CursorKind::Key,
                char_sub(&key.name, 0, ccol - key.col),
                key.col,
                key.col,
            )
        } else {
            // Cursor inside the indentation, left of the existing key.
            (CursorKind::Key, String::new(), ccol, ccol)
        }
    } else if !cur.content.is_empty() && ccol >= cur.content_col {
        // A token without a colon yet: a key in the middle of being typed.
        (
            CursorKind::Key,
            char_sub(&cur.content, 0, ccol - cur.content_col),
            cur.content_col,
            cur.content_col,
        )
    } else {
        (CursorKind::Key, String::new(), ccol, ccol)
    };

    // The cursor line's own `- ` marker encloses everything to its right.
    let mut path_rev: Vec<PathStep> = Vec::new();
    if let Some(d) = cur.dash {
        if anchor > d {
            path_rev.push(PathStep::Item);
            anchor = d;
        }
    }

    // Walk upward, always taking the nearest marker strictly left of the
    // anchor. A single line can contribute both its key and its `- `.
    if anchor > 0 {
        for shape in shapes[..line].iter().rev() {
            if shape.blank {
                continue;
            }
            if let Some(key) = &shape.key {
                if key.col < anchor {
                    path_rev.push(PathStep::Key(key.name.clone()));
                    anchor = key.col;
                }
            }
            if let Some(d) = shape.dash {
                if d < anchor {
                    path_rev.push(PathStep::Item);
                    anchor = d;
                }
            }
            if anchor == 0 {
                break;
            }
        }
    }
    path_rev.reverse();

    let siblings = if matches!(kind, CursorKind::Key) {
        collect_siblings(&shapes, line, token_start)
    } else {
        Vec::new()
    };

    let context = CursorContext {
        path: path_rev,
        kind,
        prefix,
        siblings,
        line: line as u32,
        offset: document.char_offset(line, ccol),
        replace_start: document.utf16_col(line, token_start),
        cursor: document.utf16_col(line, ccol),
    };
    trace!(?context.path, ?context.kind, prefix = %context.prefix, "located cursor");
    Some(context)
}

/// Keys written at `level_col` in the same mapping as the cursor line.
fn collect_siblings(shapes: &[LineShape], line: usize, level_col: usize) -> Vec<String> {
    let mut out = Vec::new();
    for shape in shapes[..line].iter().rev() {
        if shape.blank {
            continue;
        }
        if let Some(d) = shape.dash {
            if d < level_col {
                // Parent item boundary; its inline key sits at our level.
                if let Some(key) = &shape.key {
                    if key.col == level_col {
                        out.push(key.name.clone());
                    }
                }
                break;
            }
            if d == level_col {
                break;
            }
            continue;
        }
        match &shape.key {
            Some(key) if key.col < level_col => break,
            Some(key) if key.col == level_col => out.push(key.name.clone()),
            Some(_) => {}
            None if shape.content_col < level_col => break,
            None => {}
        }
    }
    out.reverse();
    for shape in shapes[line + 1..].iter() {
        if shape.blank {
            continue;
        }
        if let Some(d) = shape.dash {
            if d <= level_col {
                break;
            }
            continue;
        }
        match &shape.key {
            Some(key) if key.col < level_col => break,
            Some(key) if key.col == level_col => out.push(key.name.clone()),
            Some(_) => {}
            None if shape.content_col < level_col => break,
            None => {}
        }
    }
    out
}
