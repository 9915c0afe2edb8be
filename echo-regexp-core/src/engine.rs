//! Match and replace driver
//!
//! This module compiles the translated pattern into its singular and global
//! forms and runs one of four regimes over the input:
//! - [`Regime::Count`]: count matches, write no match text
//! - [`Regime::Extract`]: write each match
//! - [`Regime::OnlyMatching`]: write each match after applying a template
//! - [`Regime::Replace`]: replace matches in place, keep the rest of the input

use std::io::Write;

use regex::{Captures, Match, Regex, RegexBuilder};
use tracing::{debug, trace};

use crate::error::{RegexpError, Result};
use crate::flags::Options;
use crate::output::Output;
use crate::replace::{Template, cycle_index};
use crate::translate::translate_debug;

/// A compiled pattern bound to a scan mode
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    global: bool,
}

impl Matcher {
    /// Whether every occurrence is visited, rather than only the first
    pub fn is_global(&self) -> bool {
        self.global
    }

    /// The translated pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    fn limit(&self) -> usize {
        if self.global { usize::MAX } else { 1 }
    }

    /// Non-overlapping matches, at most one unless global
    pub fn find_iter<'h>(&self, haystack: &'h str) -> impl Iterator<Item = Match<'h>> {
        self.regex.find_iter(haystack).take(self.limit())
    }

    /// Captures of non-overlapping matches, at most one unless global
    pub fn captures_iter<'h>(&self, haystack: &'h str) -> impl Iterator<Item = Captures<'h>> {
        self.regex.captures_iter(haystack).take(self.limit())
    }

    /// Count matches without resolving capture groups
    pub fn count(&self, haystack: &str) -> usize {
        if self.global {
            self.regex.find_iter(haystack).count()
        } else {
            usize::from(self.regex.is_match(haystack))
        }
    }
}

/// The two compiled forms of one pattern
#[derive(Debug, Clone)]
pub struct Matchers {
    /// Stops after the first match
    pub singular: Matcher,
    /// Visits every match
    pub global: Matcher,
}

impl Matchers {
    /// Translate and compile a pattern with the native flags of `options`
    pub fn new(pattern: &str, options: &Options) -> Result<Self> {
        let translation = translate_debug(pattern);
        debug!(%translation, "translated pattern");

        let mut builder = RegexBuilder::new(&translation.output);
        for &flag in options.native_flags() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'U' => builder.swap_greed(true),
                'u' => builder.unicode(true),
                other => return Err(RegexpError::UnsupportedFlag(other)),
            };
        }

        let regex = builder.build().map_err(|source| RegexpError::Pattern {
            pattern: translation.output.clone(),
            source,
        })?;

        Ok(Matchers {
            singular: Matcher {
                regex: regex.clone(),
                global: false,
            },
            global: Matcher {
                regex,
                global: true,
            },
        })
    }

    /// Pick the form for the given mode
    pub fn select(&self, global: bool) -> &Matcher {
        if global { &self.global } else { &self.singular }
    }
}

/// Behavioral mode of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// `q`, or `c` without `v`
    Count,
    /// No templates: write the matches themselves
    Extract,
    /// `o` with templates
    OnlyMatching,
    /// Templates without `o`
    Replace,
}

impl Regime {
    /// Select the regime for a flag combination
    pub fn select(options: &Options, has_templates: bool) -> Self {
        if options.quiet || (options.counting && !options.verbose) {
            Regime::Count
        } else if !has_templates {
            Regime::Extract
        } else if options.only_matching {
            Regime::OnlyMatching
        } else {
            Regime::Replace
        }
    }
}

/// Outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Matches visited
    pub count: usize,
    /// The regime that ran
    pub regime: Regime,
}

impl Report {
    /// Process exit status: 1 when `f` or `q` is set and nothing matched
    pub fn exit_status(&self, options: &Options) -> i32 {
        if (options.fail || options.quiet) && self.count == 0 {
            1
        } else {
            0
        }
    }
}

/// Runs a compiled pattern over an input
pub struct Driver<'a> {
    matchers: &'a Matchers,
    options: &'a Options,
    templates: &'a [Template],
}

impl<'a> Driver<'a> {
    /// Create a driver; an empty template list means match-only
    pub fn new(matchers: &'a Matchers, options: &'a Options, templates: &'a [Template]) -> Self {
        Driver {
            matchers,
            options,
            templates,
        }
    }

    /// The regime this driver will run
    pub fn regime(&self) -> Regime {
        Regime::select(self.options, !self.templates.is_empty())
    }

    /// Run over `input`, writing to `output`
    ///
    /// The trailing count line is left to [`Output::finish`].
    pub fn run<W: Write>(&self, input: &str, output: &mut Output<W>) -> Result<Report> {
        let regime = self.regime();
        let matcher = self.matchers.select(self.options.global);
        debug!(?regime, global = matcher.is_global(), options = %self.options, "running");

        let count = match regime {
            Regime::Count => matcher.count(input),
            Regime::Extract => self.extract(matcher, input, output)?,
            Regime::OnlyMatching => self.only_matching(matcher, input, output)?,
            Regime::Replace => self.replace(matcher, input, output)?,
        };

        debug!(count, "finished");
        Ok(Report { count, regime })
    }

    /// Template for the `n`th match
    fn template(&self, n: usize) -> &Template {
        &self.templates[cycle_index(n, self.templates.len())]
    }

    fn extract<W: Write>(
        &self,
        matcher: &Matcher,
        input: &str,
        output: &mut Output<W>,
    ) -> Result<usize> {
        let sep = self.options.separator();
        let mut count = 0;
        for m in matcher.find_iter(input) {
            trace!(index = count, start = m.start(), end = m.end(), "match");
            output.write_str(m.as_str())?;
            output.write_str(sep)?;
            count += 1;
        }
        Ok(count)
    }

    fn only_matching<W: Write>(
        &self,
        matcher: &Matcher,
        input: &str,
        output: &mut Output<W>,
    ) -> Result<usize> {
        let sep = self.options.separator();
        let mut count = 0;
        let mut buffer = String::new();
        for caps in matcher.captures_iter(input) {
            trace!(index = count, template = cycle_index(count, self.templates.len()), "match");
            buffer.clear();
            self.template(count).expand(&caps, &mut buffer);
            buffer.push_str(sep);
            output.write_str(&buffer)?;
            count += 1;
        }
        Ok(count)
    }

    fn replace<W: Write>(
        &self,
        matcher: &Matcher,
        input: &str,
        output: &mut Output<W>,
    ) -> Result<usize> {
        let mut result = String::with_capacity(input.len());
        let mut last = 0;
        let mut count = 0;
        for caps in matcher.captures_iter(input) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            trace!(index = count, start = whole.start(), end = whole.end(), "replace");
            result.push_str(&input[last..whole.start()]);
            self.template(count).expand(&caps, &mut result);
            last = whole.end();
            count += 1;
        }
        result.push_str(&input[last..]);

        if count == 0 && self.options.fail {
            debug!("no matches, output suppressed");
        } else {
            output.write_str(&result)?;
        }
        Ok(count)
    }
}
