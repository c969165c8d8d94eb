//! # Comment Removal
//!
//! Comments are removed before tokenization, with the rule picked from the
//! file name's extension.

use regex::Regex;
use std::borrow::Cow;

/// File name suffixes handled as C source.
pub const C_SUFFIXES: &[&str] = &[".c"];

/// File name suffixes handled as C++ source (including headers).
///
/// `cxx` carries no leading dot; any name ending in `cxx` matches.
pub const CPP_SUFFIXES: &[&str] = &[".cpp", ".cc", "cxx", ".h", ".hh", ".hxx", ".hpp"];

/// File name suffixes handled as Python source.
pub const PY_SUFFIXES: &[&str] = &[".py"];

/// The comment syntax of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `/* ... */` blocks.
    C,

    /// `/* ... */` blocks, then `// ...` line comments.
    Cpp,

    /// `# ...` line comments, then `""" ... """` blocks.
    ///
    /// `''' ... '''` blocks are left in place.
    Python,

    /// Unknown syntax; content is passed through.
    None,
}

impl CommentStyle {
    /// Select the comment style for a file name.
    pub fn for_file_name(name: &str) -> Self {
        if C_SUFFIXES.iter().any(|s| name.ends_with(s)) {
            CommentStyle::C
        } else if CPP_SUFFIXES.iter().any(|s| name.ends_with(s)) {
            CommentStyle::Cpp
        } else if PY_SUFFIXES.iter().any(|s| name.ends_with(s)) {
            CommentStyle::Python
        } else {
            CommentStyle::None
        }
    }
}

/// Compiled comment patterns.
#[derive(Debug, Clone)]
pub struct CommentStripper {
    c_block: Regex,
    cpp_line: Regex,
    py_line: Regex,
    py_docstring: Regex,
}

impl Default for CommentStripper {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentStripper {
    /// Compile the comment patterns.
    pub fn new() -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("regex pattern compilation failed");
        Self {
            c_block: compile(r"(?s)/\*.*?\*/"),
            cpp_line: compile(r"//.*"),
            py_line: compile(r"#.*"),
            py_docstring: compile(r#"(?s)""".*?""""#),
        }
    }

    /// Remove comments from `content` using the given style.
    pub fn strip<'a>(
        &self,
        style: CommentStyle,
        content: &'a str,
    ) -> Cow<'a, str> {
        match style {
            CommentStyle::C => self.c_block.replace_all(content, ""),
            CommentStyle::Cpp => {
                let pass = self.c_block.replace_all(content, "");
                Cow::Owned(self.cpp_line.replace_all(&pass, "").into_owned())
            }
            CommentStyle::Python => {
                let pass = self.py_line.replace_all(content, "");
                Cow::Owned(self.py_docstring.replace_all(&pass, "").into_owned())
            }
            CommentStyle::None => Cow::Borrowed(content),
        }
    }

    /// Remove comments from `content`, with the style picked from `file_name`.
    pub fn strip_for_file<'a>(
        &self,
        file_name: &str,
        content: &'a str,
    ) -> Cow<'a, str> {
        self.strip(CommentStyle::for_file_name(file_name), content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_for_file_name() {
        assert_eq!(CommentStyle::for_file_name("main.c"), CommentStyle::C);
        assert_eq!(CommentStyle::for_file_name("a/b/x.cpp"), CommentStyle::Cpp);
        assert_eq!(CommentStyle::for_file_name("x.cc"), CommentStyle::Cpp);
        assert_eq!(CommentStyle::for_file_name("x.cxx"), CommentStyle::Cpp);
        assert_eq!(CommentStyle::for_file_name("x.h"), CommentStyle::Cpp);
        assert_eq!(CommentStyle::for_file_name("x.hpp"), CommentStyle::Cpp);
        assert_eq!(CommentStyle::for_file_name("setup.py"), CommentStyle::Python);
        assert_eq!(CommentStyle::for_file_name("lib.rs"), CommentStyle::None);
        assert_eq!(CommentStyle::for_file_name("Makefile"), CommentStyle::None);
    }

    #[test]
    fn test_c_blocks_span_lines() {
        let stripper = CommentStripper::new();
        let src = "int a; /* one\n two */ int b; /* three */ int c;";
        assert_eq!(
            stripper.strip(CommentStyle::C, src),
            "int a;  int b;  int c;"
        );

        // Line comments are C++ only.
        assert_eq!(stripper.strip(CommentStyle::C, "a; // b"), "a; // b");
    }

    #[test]
    fn test_cpp_line_comments() {
        let stripper = CommentStripper::new();
        let src = "int x; // comment\n/* block */ y";
        assert_eq!(stripper.strip(CommentStyle::Cpp, src), "int x; \n y");
    }

    #[test]
    fn test_python_comments() {
        let stripper = CommentStripper::new();
        let src = "x = 1  # set x\n\"\"\"doc\nstring\"\"\"\ny = '''kept'''";
        assert_eq!(
            stripper.strip(CommentStyle::Python, src),
            "x = 1  \n\ny = '''kept'''"
        );
    }

    #[test]
    fn test_unknown_passthrough() {
        let stripper = CommentStripper::new();
        let src = "fn main() {} // not stripped";
        let out = stripper.strip_for_file("main.rs", src);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, src);
    }
}
