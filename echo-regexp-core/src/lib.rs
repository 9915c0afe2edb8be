//! echo-regexp core library
//!
//! A find/replace filter over a whole text buffer. A compact flag string
//! selects the output mode, the pattern accepts `(?P<name>...)` groups and
//! POSIX bracket classes, and a list of replacement templates is applied to
//! successive matches.

pub mod engine;
pub mod error;
pub mod flags;
pub mod output;
pub mod replace;
pub mod translate;

use std::io::Write;

pub use engine::{Driver, Matcher, Matchers, Regime, Report};
pub use error::{RegexpError, Result};
pub use flags::Options;
pub use output::Output;
pub use replace::{Template, TemplatePart, compile_templates, cycle_index};
pub use translate::{PosixClass, Translation, translate, translate_debug};

/// Run the whole pipeline over `input` and return the exit status
///
/// # Example
/// ```
/// let mut out = Vec::new();
/// let status = echo_regexp_core::run("gn", "a+", &[] as &[&str], "baaab aab", &mut out).unwrap();
/// assert_eq!(status, 0);
/// assert_eq!(out, b"aaa\naa\n");
/// ```
pub fn run<S: AsRef<str>, W: Write>(
    flags: &str,
    pattern: &str,
    replacements: &[S],
    input: &str,
    out: W,
) -> Result<i32> {
    let options = Options::decode(flags);
    let matchers = Matchers::new(pattern, &options)?;
    let templates = compile_templates(replacements);

    let mut output = Output::new(out);
    let report = Driver::new(&matchers, &options, &templates).run(input, &mut output)?;
    Ok(output.finish(&report, &options)?)
}
