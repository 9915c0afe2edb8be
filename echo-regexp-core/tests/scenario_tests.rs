//! Integration tests for the find/replace pipeline
//!
//! These tests drive the public API the way the CLI does: decode flags,
//! compile the pattern and templates, run over an in-memory input and
//! collect stdout plus the exit status.

use echo_regexp_core::{
    Driver, Matchers, Options, Output, Regime, RegexpError, compile_templates, run, translate,
};

fn filter(flags: &str, pattern: &str, replacements: &[&str], input: &str) -> (String, i32) {
    let mut out = Vec::new();
    let status = run(flags, pattern, replacements, input, &mut out).unwrap();
    (String::from_utf8(out).unwrap(), status)
}

#[test]
fn test_extract_without_separator() {
    assert_eq!(filter("g", "a+", &[], "baaab aab"), ("aaaaa".to_string(), 0));
}

#[test]
fn test_extract_with_newlines() {
    assert_eq!(
        filter("gn", "a+", &[], "baaab aab"),
        ("aaa\naa\n".to_string(), 0)
    );
}

#[test]
fn test_count_only() {
    assert_eq!(filter("gc", "a+", &[], "baaab aab"), ("2\n".to_string(), 0));
}

#[test]
fn test_named_group_swap() {
    assert_eq!(
        filter("g", "(?P<x>a)(?P<y>b)", &["${y}${x}"], "ab ab"),
        ("ba ba".to_string(), 0)
    );
}

#[test]
fn test_non_global_uses_first_template_only() {
    assert_eq!(
        filter("", "a+", &["X", "Y"], "aa aa"),
        ("X aa".to_string(), 0)
    );
}

#[test]
fn test_fail_without_match() {
    assert_eq!(filter("fg", "z", &[], "abc"), (String::new(), 1));
}

#[test]
fn test_fail_without_match_in_replace_mode() {
    assert_eq!(filter("fg", "z", &["Q"], "abc"), (String::new(), 1));
    assert_eq!(filter("fgcv", "z", &["Q"], "abc"), ("0\n".to_string(), 1));
}

#[test]
fn test_fail_with_match_keeps_output() {
    assert_eq!(filter("f", "b", &["B"], "abc"), ("aBc".to_string(), 0));
}

#[test]
fn test_quiet() {
    assert_eq!(filter("q", "b", &[], "abc"), (String::new(), 0));
    assert_eq!(filter("q", "z", &[], "abc"), (String::new(), 1));
    assert_eq!(filter("qcg", "z", &["Q"], "abc"), ("0\n".to_string(), 1));
    assert_eq!(filter("qcg", "a", &[], "aaa"), ("3\n".to_string(), 0));
}

#[test]
fn test_zero_matches_every_regime() {
    for flags in ["gc", "g", "go", "gcv", "gcvo"] {
        for replacements in [&[][..], &["R"][..]] {
            let options = Options::decode(flags);
            let matchers = Matchers::new("z", &options).unwrap();
            let templates = compile_templates(replacements);
            let mut output = Output::new(Vec::new());
            let report = Driver::new(&matchers, &options, &templates)
                .run("abc", &mut output)
                .unwrap();
            assert_eq!(report.count, 0, "Failed for flags: {}", flags);
        }
    }
}

#[test]
fn test_verbose_count_after_replacement() {
    assert_eq!(
        filter("gcv", "o", &["0"], "foo boo"),
        ("f00 b00\n4\n".to_string(), 0)
    );
}

#[test]
fn test_count_with_only_matching_and_newlines() {
    assert_eq!(
        filter("gcvon", "\\d+", &["<$&>"], "a1 b22"),
        ("<1>\n<22>\n2\n".to_string(), 0)
    );
}

#[test]
fn test_only_matching_cycling() {
    assert_eq!(
        filter("gon", "[[:alpha:]]+", &["first", "second", "rest"], "a b c d e"),
        ("first\nsecond\nrest\nrest\nrest\n".to_string(), 0)
    );
}

#[test]
fn test_replace_cycling() {
    assert_eq!(
        filter("g", "_", &["1", "2", "3"], "_ _ _ _ _"),
        ("1 2 3 3 3".to_string(), 0)
    );
}

#[test]
fn test_replace_positional_references() {
    assert_eq!(
        filter("g", "(\\w+)@(\\w+)", &["$2 at $1 ($$)"], "me@home"),
        ("home at me ($)".to_string(), 0)
    );
}

#[test]
fn test_native_flags() {
    assert_eq!(filter("gi", "hello", &["bye"], "Hello HELLO"), ("bye bye".to_string(), 0));
    assert_eq!(filter("gm", "^x", &["y"], "x\nx"), ("y\ny".to_string(), 0));
    assert_eq!(filter("s", "a.b", &["_"], "a\nb"), ("_".to_string(), 0));
}

#[test]
fn test_leading_dash_in_flags() {
    assert_eq!(filter("-gc", "a", &[], "aaa"), ("3\n".to_string(), 0));
}

#[test]
fn test_unknown_flag_is_construction_error() {
    let mut out = Vec::new();
    let err = run("gy", "a", &[] as &[&str], "a", &mut out).unwrap_err();
    assert!(matches!(err, RegexpError::UnsupportedFlag('y')));
}

#[test]
fn test_bad_pattern_is_construction_error() {
    let mut out = Vec::new();
    let err = run("g", "(?P<x>a", &[] as &[&str], "a", &mut out).unwrap_err();
    assert!(matches!(err, RegexpError::Pattern { .. }));
}

#[test]
fn test_empty_pattern() {
    assert_eq!(filter("gc", "", &[], "abc"), ("4\n".to_string(), 0));
}

#[test]
fn test_posix_compound_class() {
    assert_eq!(
        filter("gn", "[[:digit:][:lower:]]+", &[], "ab12 CD 3e"),
        ("ab12\n3e\n".to_string(), 0)
    );
}

#[test]
fn test_posix_negated_space() {
    assert_eq!(
        filter("gn", "[^[:space:]]+", &[], " one\ttwo\n three "),
        ("one\ntwo\nthree\n".to_string(), 0)
    );
}

#[test]
fn test_translation_is_stable() {
    let pattern = "(?P<d>[[:xdigit:]]{2})";
    assert_eq!(translate(pattern), translate(pattern));
    assert_eq!(translate(pattern), "(?<d>[0-9A-Fa-f]{2})");
}

#[test]
fn test_regime_never_replace_without_templates() {
    for flags in ["", "g", "o", "f", "gfo", "n"] {
        let options = Options::decode(flags);
        assert_ne!(Regime::select(&options, false), Regime::Replace);
    }
}

#[test]
fn test_unicode_input() {
    assert_eq!(
        filter("g", "é+", &["E"], "caféé café"),
        ("cafE cafE".to_string(), 0)
    );
}
