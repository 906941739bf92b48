//! Go code emitter - builds Go source text
//!
//! Mirrors gofmt layout for the constructs the stub generators print: tab indentation, `{` on the header line,
//! aligned struct fields.

use std::fmt::Write;

/// A buffer for building Go source code with proper indentation
#[derive(Debug)]
pub struct GoEmitter {
    buffer: String,
    indent_level: usize,
    indent_str: &'static str,
}

impl Default for GoEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl GoEmitter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_str: "\t", // gofmt indents with tabs
        }
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write a formatted line with current indentation
    pub fn linef(&mut self, args: std::fmt::Arguments<'_>) {
        self.write_indent();
        let _ = self.buffer.write_fmt(args);
        self.buffer.push('\n');
    }

    /// Write a blank line
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent_str);
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write a block with braces
    pub fn block<F>(&mut self, header: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line(&format!("{} {{", header));
        self.indent();
        f(self);
        self.dedent();
        self.line("}");
    }

    /// Write a function: `func <receiver> name(params) results { ... }`
    pub fn func<F>(&mut self, receiver: Option<&str>, name: &str, params: &str, results: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let recv = receiver.map(|r| format!("({}) ", r)).unwrap_or_default();
        let res = if results.is_empty() {
            String::new()
        } else {
            format!(" {}", results)
        };
        self.block(&format!("func {}{}({}){}", recv, name, params, res), f);
    }

    /// Write a struct type, aligning field types the way gofmt does
    pub fn struct_def(&mut self, name: &str, fields: &[(&str, &str)]) {
        if fields.is_empty() {
            self.line(&format!("type {} struct{{}}", name));
            return;
        }
        self.block(&format!("type {} struct", name), |e| {
            let width = fields.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(0);
            for (field, ty) in fields {
                e.line(&format!("{:<width$} {}", field, ty, width = width));
            }
        });
    }

    /// Write a composite literal spanning several lines, aligning values after the keys
    pub fn keyed_literal(&mut self, prefix: &str, ty: &str, fields: &[(&str, &str)]) {
        self.line(&format!("{}{}{{", prefix, ty));
        self.indent();
        let width = fields.iter().map(|(n, _)| n.chars().count() + 1).max().unwrap_or(0);
        for (key, value) in fields {
            let key = format!("{}:", key);
            self.line(&format!("{:<width$} {},", key, value, width = width));
        }
        self.dedent();
        self.line("}");
    }

    /// Write a `//` comment line
    pub fn comment(&mut self, text: &str) {
        if text.is_empty() {
            self.line("//");
        } else {
            self.line(&format!("// {}", text));
        }
    }

    /// Write a doc comment, one `//` line per input line
    pub fn doc_comment(&mut self, text: &str) {
        for line in text.lines() {
            self.comment(line);
        }
    }
}

/// Quote a string as a Go interpreted string literal
pub fn go_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
