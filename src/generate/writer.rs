//! Output writer with indentation tracking
//!
//! Builds scaffold text line by line, including C# brace blocks.

use super::config::GeneratorConfig;

/// Writer that tracks indentation and builds generated source
pub struct ScaffoldWriter {
    /// The output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    indent_width: usize,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

impl ScaffoldWriter {
    /// Create a new writer using the config's indentation width
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_width: config.indent_width,
            at_line_start: true,
        }
    }

    /// Get the generated output
    pub fn finish(self) -> String {
        self.output
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Write indentation if at line start
    fn write_indent(&mut self) {
        if self.at_line_start {
            self.output.push_str(&" ".repeat(self.indent_level * self.indent_width));
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent)
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
    }

    /// Write a string and newline
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    /// Write just a newline
    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Write multiple blank lines (for spacing between members)
    pub fn blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.newline();
        }
    }

    /// `{`, then indent
    pub fn open_block(&mut self) {
        self.writeln("{");
        self.indent();
    }

    /// Dedent, then `}`
    pub fn close_block(&mut self) {
        self.dedent();
        self.writeln("}");
    }

    /// Get current indentation level
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }
}

/// Canonicalise generated text: LF line endings, no trailing whitespace, at most `max_blank_lines` blank lines
/// in a row, no leading blank lines, and exactly one trailing newline.
pub fn normalize(text: &str, max_blank_lines: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_blank = 0usize;
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if !out.is_empty() {
                pending_blank += 1;
            }
            continue;
        }
        for _ in 0..pending_blank.min(max_blank_lines) {
            out.push('\n');
        }
        pending_blank = 0;
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_writer() -> ScaffoldWriter {
        ScaffoldWriter::new(&GeneratorConfig::default())
    }

    // ========================================
    // Write tests
    // ========================================

    #[test]
    fn test_new_writer_empty_output() {
        let writer = default_writer();
        assert_eq!(writer.current_indent(), 0);
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_write_empty_string() {
        let mut writer = default_writer();
        writer.indent();
        writer.write("");
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_writeln_multiple() {
        let mut writer = default_writer();
        writer.writeln("line1");
        writer.writeln("line2");
        assert_eq!(writer.finish(), "line1\nline2\n");
    }

    // ========================================
    // Indent/dedent tests
    // ========================================

    #[test]
    fn test_dedent_at_zero_stays_zero() {
        let mut writer = default_writer();
        writer.dedent();
        assert_eq!(writer.current_indent(), 0);
    }

    #[test]
    fn test_indent_width_2() {
        let config = GeneratorConfig::new().with_indent_width(2);
        let mut writer = ScaffoldWriter::new(&config);
        writer.indent();
        writer.write("text");
        assert_eq!(writer.finish(), "  text");
    }

    #[test]
    fn test_blocks() {
        let mut writer = default_writer();
        writer.writeln("namespace A");
        writer.open_block();
        writer.writeln("public class B");
        writer.open_block();
        writer.close_block();
        writer.close_block();
        assert_eq!(writer.finish(), "namespace A\n{\n    public class B\n    {\n    }\n}\n");
    }

    #[test]
    fn test_blank_lines_between_content() {
        let mut writer = default_writer();
        writer.writeln("line1");
        writer.blank_lines(2);
        writer.writeln("line2");
        assert_eq!(writer.finish(), "line1\n\n\nline2\n");
    }

    // ========================================
    // Normalization tests
    // ========================================

    #[test]
    fn test_normalize_line_endings_and_trailing_space() {
        assert_eq!(normalize("a  \r\nb\t\r\n", 1), "a\nb\n");
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        assert_eq!(normalize("\n\na\n\n\n\nb\n\n", 1), "a\n\nb\n");
        assert_eq!(normalize("a\n\n\n\nb\n", 2), "a\n\n\nb\n");
        assert_eq!(normalize("a\n\nb\n", 0), "a\nb\n");
    }

    #[test]
    fn test_normalize_adds_final_newline() {
        assert_eq!(normalize("a", 1), "a\n");
        assert_eq!(normalize("", 1), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("x \n\n\n  y\r\n", 1);
        assert_eq!(normalize(&once, 1), once);
    }
}
