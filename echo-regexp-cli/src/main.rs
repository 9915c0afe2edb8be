use std::io::{self, BufWriter, Read};

use clap::Parser;
use colored::Colorize;
use echo_regexp_core::{Driver, Matchers, Options, Output, RegexpError, compile_templates};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Exit status for pattern, flag and I/O errors
const ERROR_STATUS: i32 = 2;

#[derive(Parser)]
#[command(name = "echo-regexp")]
#[command(about = "Find, extract, count or replace regex matches in stdin")]
#[command(
    long_about = "Find, extract, count or replace regex matches in stdin.\n\n\
    FLAGS is a compact set of letters:\n  \
    g  every match instead of the first\n  \
    o  only output the (replaced) matches\n  \
    n  follow each output match with a newline\n  \
    c  output the number of matches\n  \
    v  with c, output the matches as well\n  \
    q  output no match text, exit 1 if nothing matched\n  \
    f  exit 1 (and drop replaced output) if nothing matched\n\
    Any other letter is a regex flag: i, m, s, x, U, u."
)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Flag letters, e.g. `gco`; a leading `-` is ignored
    #[arg(allow_hyphen_values = true)]
    flags: Option<String>,
    /// The pattern; `(?P<name>...)` groups and `[[:class:]]` are accepted
    #[arg(allow_hyphen_values = true)]
    pattern: Option<String>,
    /// Replacement templates applied to successive matches, using `${name}`
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    replacements: Vec<String>,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let status = match run(&cli) {
        Ok(status) => status,
        Err(e) if e.is_broken_pipe() => 0,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ERROR_STATUS
        }
    };

    std::process::exit(status);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ECHO_REGEXP_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();
    // Only fails when a subscriber is already installed
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(cli: &Cli) -> Result<i32, RegexpError> {
    let options = Options::decode(cli.flags.as_deref().unwrap_or_default());
    let matchers = Matchers::new(cli.pattern.as_deref().unwrap_or_default(), &options)?;
    let templates = compile_templates(&cli.replacements);
    debug!(templates = ?templates.iter().map(ToString::to_string).collect::<Vec<_>>(), "compiled templates");

    // Invalid UTF-8 is decoded lossily rather than rejected
    let mut bytes = Vec::new();
    io::stdin().lock().read_to_end(&mut bytes)?;
    let input = String::from_utf8_lossy(&bytes);
    debug!(bytes = bytes.len(), "read input");

    let stdout = io::stdout();
    let mut output = Output::new(BufWriter::new(stdout.lock()));
    let report = Driver::new(&matchers, &options, &templates).run(&input, &mut output)?;
    Ok(output.finish(&report, &options)?)
}
