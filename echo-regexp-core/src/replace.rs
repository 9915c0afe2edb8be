//! Replacement template handling
//!
//! Templates reference capture groups with `${name}` or `${1}`, where the
//! name is made of letters, digits, `_`, `.`, `[` and `]`, the characters
//! the host engine allows in group names. The compiler
//! also understands the short forms:
//! - `$1`, `$2`, ... for numbered groups
//! - `$&` for the entire match
//! - `$$` for a literal dollar sign
//!
//! Any other `$` is kept as literal text.

use std::fmt;

use regex::Captures;

/// A part of a replacement template
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    /// Literal text
    Literal(String),
    /// Group by number (`$1`, `${2}`)
    GroupNumber(usize),
    /// Group by name (`${name}`)
    GroupName(String),
    /// Entire match (`$&`, `${0}`)
    EntireMatch,
}

/// A compiled replacement template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    parts: Vec<TemplatePart>,
}

impl Template {
    /// Parse a replacement template
    pub fn parse(input: &str) -> Self {
        let mut parts = Vec::new();
        let mut chars = input.chars().peekable();
        let mut current_literal = String::new();

        while let Some(c) = chars.next() {
            if c != '$' {
                current_literal.push(c);
                continue;
            }
            let reference = match chars.peek().copied() {
                Some('$') => {
                    chars.next();
                    current_literal.push('$');
                    None
                }
                Some('&') => {
                    chars.next();
                    Some(TemplatePart::EntireMatch)
                }
                Some(d) if d.is_ascii_digit() => {
                    let digits = Self::read_while(&mut chars, |c| c.is_ascii_digit());
                    Some(Self::reference(&digits))
                }
                Some('{') => {
                    // Only a closed, non-empty `${...}` is a reference
                    let mut lookahead = chars.clone();
                    lookahead.next();
                    let name = Self::read_while(&mut lookahead, |c| {
                        c.is_alphanumeric() || matches!(c, '_' | '.' | '[' | ']')
                    });
                    if !name.is_empty() && lookahead.next() == Some('}') {
                        chars = lookahead;
                        Some(Self::reference(&name))
                    } else {
                        current_literal.push('$');
                        None
                    }
                }
                _ => {
                    current_literal.push('$');
                    None
                }
            };

            if let Some(part) = reference {
                if !current_literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut current_literal)));
                }
                parts.push(part);
            }
        }

        // Don't forget the last literal
        if !current_literal.is_empty() {
            parts.push(TemplatePart::Literal(current_literal));
        }

        Template { parts }
    }

    fn reference(name: &str) -> TemplatePart {
        match name.parse::<usize>() {
            Ok(0) => TemplatePart::EntireMatch,
            Ok(n) => TemplatePart::GroupNumber(n),
            Err(_) => TemplatePart::GroupName(name.to_string()),
        }
    }

    /// Consume characters while the predicate holds
    fn read_while(
        chars: &mut std::iter::Peekable<std::str::Chars>,
        predicate: impl Fn(char) -> bool,
    ) -> String {
        let mut result = String::new();
        while let Some(&c) = chars.peek() {
            if !predicate(c) {
                break;
            }
            result.push(c);
            chars.next();
        }
        result
    }

    /// Append the expansion of this template for one match to `dst`
    ///
    /// Groups that do not exist or did not participate expand to nothing.
    pub fn expand(&self, caps: &Captures<'_>, dst: &mut String) {
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => dst.push_str(text),
                TemplatePart::GroupNumber(n) => {
                    if let Some(m) = caps.get(*n) {
                        dst.push_str(m.as_str());
                    }
                }
                TemplatePart::GroupName(name) => {
                    if let Some(m) = caps.name(name) {
                        dst.push_str(m.as_str());
                    }
                }
                TemplatePart::EntireMatch => dst.push_str(&caps[0]),
            }
        }
    }

    /// Get the parts of the template
    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }
}

/// Renders the template in the host engine's `$` syntax
impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => write!(f, "{}", text.replace('$', "$$"))?,
                TemplatePart::GroupNumber(n) => write!(f, "${{{}}}", n)?,
                TemplatePart::GroupName(name) => write!(f, "${{{}}}", name)?,
                TemplatePart::EntireMatch => write!(f, "${{0}}")?,
            }
        }
        Ok(())
    }
}

/// Compile an ordered list of raw templates
pub fn compile_templates<S: AsRef<str>>(raw: &[S]) -> Vec<Template> {
    raw.iter().map(|t| Template::parse(t.as_ref())).collect()
}

/// Template index for the `n`th match (0-based) given `k` templates.
///
/// The first `k` matches take templates `0..k`; every later match reuses the
/// last one. `k` must be non-zero.
pub fn cycle_index(n: usize, k: usize) -> usize {
    n.min(k.saturating_sub(1))
}
