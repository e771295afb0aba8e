//! Output writer with indentation tracking

use super::config::PrintConfig;

/// Writer that tracks indentation and builds rendered output
pub struct SourceWriter {
    /// The output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Number of spaces per level
    indent_width: usize,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

impl SourceWriter {
    /// Create a new writer with the given config
    pub fn new(config: &PrintConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_width: config.indent_width,
            at_line_start: true,
        }
    }

    /// Get the rendered output
    pub fn finish(self) -> String {
        self.output
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

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

    /// Write blank lines (for spacing between declarations)
    pub fn blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.newline();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_writer() -> SourceWriter {
        SourceWriter::new(&PrintConfig::default())
    }

    #[test]
    fn test_new_writer_empty_output() {
        assert_eq!(default_writer().finish(), "");
    }

    #[test]
    fn test_write_empty_string_adds_no_indent() {
        let mut writer = default_writer();
        writer.indent();
        writer.write("");
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_indent_applies_once_per_line() {
        let mut writer = default_writer();
        writer.indent();
        writer.write("int");
        writer.write(" x;");
        writer.newline();
        writer.dedent();
        writer.writeln("}");
        assert_eq!(writer.finish(), "    int x;\n}\n");
    }

    #[test]
    fn test_custom_indent_width() {
        let mut writer = SourceWriter::new(&PrintConfig::new().with_indent_width(2));
        writer.indent();
        writer.indent();
        writer.writeln("x");
        assert_eq!(writer.finish(), "    x\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut writer = default_writer();
        writer.dedent();
        writer.writeln("x");
        assert_eq!(writer.finish(), "x\n");
    }

    #[test]
    fn test_blank_lines() {
        let mut writer = default_writer();
        writer.writeln("a");
        writer.blank_lines(2);
        writer.writeln("b");
        assert_eq!(writer.finish(), "a\n\n\nb\n");
    }
}
