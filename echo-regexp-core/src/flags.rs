//! Flag string decoding
//!
//! The first command-line argument is a compact flag set such as `gco` or
//! `-fvng`. Characters this filter understands are decoded into [`Options`];
//! everything else is kept, in order, as a native flag for the regex engine.

use std::fmt;

/// Decoded run options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// `f`: exit with status 1 and suppress replaced output when nothing matched
    pub fail: bool,
    /// `c`: report the number of matches
    pub counting: bool,
    /// `o`: emit only the (possibly replaced) matched text
    pub only_matching: bool,
    /// `n`: follow every emitted match with a newline
    pub newlines: bool,
    /// `q`: write no match text; exit 1 when nothing matched
    pub quiet: bool,
    /// `v`: with `c`, write the matches as well as the count
    pub verbose: bool,
    /// `g`: process every match instead of the first
    pub global: bool,
    native: Vec<char>,
}

impl Options {
    /// Decode a flag string. An optional leading `-` is ignored.
    ///
    /// Unknown characters are never rejected here; they are forwarded to
    /// the regex engine, which decides whether it understands them.
    pub fn decode(flags: &str) -> Self {
        let flags = flags.strip_prefix('-').unwrap_or(flags);
        let mut options = Options::default();

        for c in flags.chars() {
            match c {
                'f' => options.fail = true,
                'c' => options.counting = true,
                'o' => options.only_matching = true,
                'n' => options.newlines = true,
                'q' => options.quiet = true,
                'v' => options.verbose = true,
                'g' => options.global = true,
                other => {
                    if !options.native.contains(&other) {
                        options.native.push(other);
                    }
                }
            }
        }

        options
    }

    /// Flags forwarded to the regex engine, in first-seen order
    pub fn native_flags(&self) -> &[char] {
        &self.native
    }

    /// Separator written after each emitted match
    pub fn separator(&self) -> &'static str {
        if self.newlines { "\n" } else { "" }
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known = [
            (self.fail, 'f'),
            (self.counting, 'c'),
            (self.only_matching, 'o'),
            (self.newlines, 'n'),
            (self.quiet, 'q'),
            (self.verbose, 'v'),
            (self.global, 'g'),
        ];
        for (set, c) in known {
            if set {
                write!(f, "{}", c)?;
            }
        }
        for c in &self.native {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
