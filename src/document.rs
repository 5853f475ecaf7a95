//! Text document wrapper used by the completion engine.
//!
//! Holds the document text as a rope and maps editor-protocol positions
//! (zero-indexed lines, UTF-16 code-unit columns) onto character columns.
//! All conversions clamp instead of panicking: clients routinely send
//! positions past the end of a line while the user is typing.

use ropey::Rope;
use tower_lsp::lsp_types::{Position, Url};

#[derive(Debug, Clone)]
pub struct Document {
    uri: Url,
    text: Rope,
}

impl Document {
    pub fn new(uri: Url, text: &str) -> Self {
        Self {
            uri,
            text: Rope::from_str(text),
        }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn text(&self) -> &Rope {
        &self.text
    }

    pub fn len_lines(&self) -> usize {
        self.text.len_lines()
    }

    /// Line content without the trailing line break.
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.text.len_lines() {
            return String::new();
        }
        let mut out: String = self.text.line(line).chars().collect();
        while out.ends_with('\n') || out.ends_with('\r') {
            out.pop();
        }
        out
    }

    /// Resolve an LSP position to a (line, character-column) pair.
    ///
    /// The UTF-16 column is converted through the rope. A column past the
    /// end of the line is kept as-is: editors report virtual columns on
    /// blank lines and the structural scan reads them as the effective
    /// indentation. Returns `None` only when the line itself does not
    /// exist.
    pub fn char_col(&self, position: Position) -> Option<(usize, usize)> {
        let line = position.line as usize;
        if line >= self.text.len_lines() {
            return None;
        }
        let slice = self.text.line(line);
        let requested = position.character as usize;
        let content_len = self.line_text(line).chars().count();
        if requested <= slice.len_utf16_cu() {
            let col = slice.utf16_cu_to_char(requested);
            Some((line, col.min(content_len)))
        } else {
            Some((line, requested.max(content_len)))
        }
    }

    /// Character offset of a (line, column) pair from the document start,
    /// clamped to the line content.
    pub fn char_offset(&self, line: usize, char_col: usize) -> usize {
        if line >= self.text.len_lines() {
            return self.text.len_chars();
        }
        let content_len = self.line_text(line).chars().count();
        self.text.line_to_char(line) + char_col.min(content_len)
    }

    /// Convert a character column back to UTF-16 code units for the wire.
    pub fn utf16_col(&self, line: usize, char_col: usize) -> u32 {
        if line >= self.text.len_lines() {
            return 0;
        }
        let slice = self.text.line(line);
        slice.char_to_utf16_cu(char_col.min(slice.len_chars())) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::new(Url::parse("file:///test/playbook.yml").unwrap(), text)
    }

    #[test]
    fn char_col_maps_ascii_one_to_one() {
        let d = doc("- name: test\n  hosts: localhost\n");
        assert_eq!(d.char_col(Position::new(1, 5)), Some((1, 5)));
    }

    #[test]
    fn char_col_keeps_virtual_columns_past_line_end() {
        let d = doc("- name: test\n");
        assert_eq!(d.char_col(Position::new(0, 80)), Some((0, 80)));
    }

    #[test]
    fn char_col_on_empty_line_keeps_requested_indent() {
        let d = doc("- name: test\n\n");
        assert_eq!(d.char_col(Position::new(1, 8)), Some((1, 8)));
    }

    #[test]
    fn char_col_handles_utf16_surrogate_pairs() {
        // 𝕏 occupies two UTF-16 code units but one character column.
        let d = doc("- name: 𝕏 test\n");
        assert_eq!(d.char_col(Position::new(0, 11)), Some((0, 10)));
    }

    #[test]
    fn missing_line_is_none() {
        let d = doc("- name: test\n");
        assert_eq!(d.char_col(Position::new(9, 0)), None);
    }

    #[test]
    fn utf16_col_round_trips() {
        let d = doc("- name: 𝕏 test\n");
        let (line, col) = d.char_col(Position::new(0, 11)).unwrap();
        assert_eq!(d.utf16_col(line, col), 11);
    }
}
