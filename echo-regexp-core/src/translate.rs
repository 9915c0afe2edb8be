//! Translator from POSIX-flavoured patterns to the host regex dialect
//!
//! Patterns arrive with `(?P<name>...)` groups and POSIX bracket
//! expressions such as `[[:digit:]]` or `[[:alpha:][:digit:]_]`. This module
//! rewrites them in a single left-to-right pass that tracks escapes and
//! character-class nesting, so text that only looks like one of these
//! constructs (an escaped `\[`, a `(?P<` inside a class) is left alone.

use std::fmt;

/// A POSIX character class name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosixClass {
    Alnum,
    Alpha,
    Ascii,
    Blank,
    Cntrl,
    Digit,
    Graph,
    Lower,
    Print,
    Punct,
    Space,
    Upper,
    Word,
    Xdigit,
}

impl PosixClass {
    /// Look up a class by the name found between `[:` and `:]`
    pub fn from_name(name: &str) -> Option<Self> {
        let class = match name {
            "alnum" => PosixClass::Alnum,
            "alpha" => PosixClass::Alpha,
            "ascii" => PosixClass::Ascii,
            "blank" => PosixClass::Blank,
            "cntrl" => PosixClass::Cntrl,
            "digit" => PosixClass::Digit,
            "graph" => PosixClass::Graph,
            "lower" => PosixClass::Lower,
            "print" => PosixClass::Print,
            "punct" => PosixClass::Punct,
            "space" => PosixClass::Space,
            "upper" => PosixClass::Upper,
            "word" => PosixClass::Word,
            "xdigit" => PosixClass::Xdigit,
            _ => return None,
        };
        Some(class)
    }

    /// The class body to splice into the enclosing brackets.
    ///
    /// Spaces are written as `\x20` so the expansion survives the `x` flag,
    /// and `[` is escaped because the host engine nests classes.
    pub fn expansion(self) -> &'static str {
        match self {
            PosixClass::Alnum => "0-9A-Za-z",
            PosixClass::Alpha => "A-Za-z",
            PosixClass::Ascii => r"\x00-\x7F",
            PosixClass::Blank => r"\t\x20",
            PosixClass::Cntrl => r"\x00-\x1F\x7F",
            PosixClass::Digit => "0-9",
            PosixClass::Graph => "!-~",
            PosixClass::Lower => "a-z",
            PosixClass::Print => r"\x20-~",
            PosixClass::Punct => r"!-/:-@\[-`{-~",
            PosixClass::Space => r"\t\n\v\f\r\x20",
            PosixClass::Upper => "A-Z",
            PosixClass::Word => "0-9A-Za-z_",
            PosixClass::Xdigit => "0-9A-Fa-f",
        }
    }

    fn name(self) -> &'static str {
        match self {
            PosixClass::Alnum => "alnum",
            PosixClass::Alpha => "alpha",
            PosixClass::Ascii => "ascii",
            PosixClass::Blank => "blank",
            PosixClass::Cntrl => "cntrl",
            PosixClass::Digit => "digit",
            PosixClass::Graph => "graph",
            PosixClass::Lower => "lower",
            PosixClass::Print => "print",
            PosixClass::Punct => "punct",
            PosixClass::Space => "space",
            PosixClass::Upper => "upper",
            PosixClass::Word => "word",
            PosixClass::Xdigit => "xdigit",
        }
    }
}

impl fmt::Display for PosixClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[:{}:]", self.name())
    }
}

/// Single-pass pattern rewriter
struct Translator {
    input: Vec<char>,
    position: usize,
    output: String,
    /// Number of currently open `[` classes
    depth: usize,
    rewritten: Vec<PosixClass>,
}

impl Translator {
    fn new(input: &str) -> Self {
        Translator {
            input: input.chars().collect(),
            position: 0,
            output: String::with_capacity(input.len()),
            depth: 0,
            rewritten: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        let mut at = self.position;
        for c in prefix.chars() {
            if self.input.get(at) != Some(&c) {
                return false;
            }
            at += 1;
        }
        true
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.output.push(c);
            self.position += 1;
        }
    }

    fn run(mut self) -> (String, Vec<PosixClass>) {
        while let Some(c) = self.peek() {
            if c == '\\' {
                // Escape and its target are copied as one unit
                self.bump();
                self.bump();
            } else if self.depth == 0 {
                if self.starts_with("(?P<") {
                    self.output.push_str("(?<");
                    self.position += 4;
                } else if c == '[' {
                    self.open_class();
                } else {
                    self.bump();
                }
            } else if c == '[' {
                if !self.posix_class() {
                    self.open_class();
                }
            } else {
                if c == ']' {
                    self.depth -= 1;
                }
                self.bump();
            }
        }
        (self.output, self.rewritten)
    }

    /// Copy a `[`, plus a leading `^` and a leading literal `]`
    fn open_class(&mut self) {
        self.bump();
        self.depth += 1;
        if self.peek() == Some('^') {
            self.bump();
        }
        if self.peek() == Some(']') {
            self.bump();
        }
    }

    /// Replace a `[:name:]` token at the cursor, if there is a known one
    fn posix_class(&mut self) -> bool {
        if !self.starts_with("[:") {
            return false;
        }
        let start = self.position + 2;
        let mut end = start;
        while self.input.get(end).is_some_and(|c| c.is_ascii_lowercase()) {
            end += 1;
        }
        if self.input.get(end) != Some(&':') || self.input.get(end + 1) != Some(&']') {
            return false;
        }
        let name: String = self.input[start..end].iter().collect();
        let Some(class) = PosixClass::from_name(&name) else {
            return false;
        };
        self.output.push_str(class.expansion());
        self.rewritten.push(class);
        self.position = end + 2;
        true
    }
}

/// Translate a pattern to the host regex dialect
///
/// # Example
/// ```
/// use echo_regexp_core::translate;
///
/// assert_eq!(translate("[[:digit:]]+"), "[0-9]+");
/// assert_eq!(translate("(?P<year>[[:digit:]]{4})"), "(?<year>[0-9]{4})");
/// ```
pub fn translate(pattern: &str) -> String {
    Translator::new(pattern).run().0
}

/// Translate with a record of what was rewritten
pub fn translate_debug(pattern: &str) -> Translation {
    let (output, classes) = Translator::new(pattern).run();
    Translation {
        input: pattern.to_string(),
        output,
        classes,
    }
}

/// Result of a translation with debug information
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// The pattern as given
    pub input: String,
    /// The translated pattern
    pub output: String,
    /// POSIX classes that were expanded, in pattern order
    pub classes: Vec<PosixClass>,
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` -> `{}`", self.input, self.output)?;
        if !self.classes.is_empty() {
            let names: Vec<String> = self.classes.iter().map(ToString::to_string).collect();
            write!(f, " (expanded {})", names.join(", "))?;
        }
        Ok(())
    }
}
