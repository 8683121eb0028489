//! C++ code emitter - builds C++ source code strings
//!
//! This module provides utilities for building well-formatted C++ code.

/// A buffer for building C++ source code with proper indentation
#[derive(Debug)]
pub struct CppEmitter {
    buffer: String,
    indent_level: usize,
    indent_str: &'static str,
}

impl Default for CppEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl CppEmitter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_str: "    ",
        }
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Get current buffer as string slice
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write a blank line
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    /// Write indentation only
    pub fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent_str);
        }
    }

    /// Increase indent level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indent level
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

    /// Write `#include <...>`
    pub fn include_system(&mut self, header: &str) {
        self.line(&format!("#include <{}>", header));
    }

    /// Write `#include "..."`
    pub fn include_local(&mut self, header: &str) {
        self.line(&format!("#include \"{}\"", header));
    }

    /// Write `using namespace ...;`
    pub fn using_namespace(&mut self, namespace: &str) {
        self.line(&format!("using namespace {};", namespace));
    }

    /// Write a comment
    pub fn comment(&mut self, text: &str) {
        self.line(&format!("// {}", text));
    }
}
