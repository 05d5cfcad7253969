use super::normalization::split_tokens;
use super::{FlagKind, FlagSet};
use clap::error::ErrorKind;

fn deploy_flags() -> FlagSet {
    let mut flags = FlagSet::new("deploy");
    flags
        .string("env", "dev", "target environment")
        .bool("v", false, "verbose output")
        .int("retries", 3, "retry count")
        .uint("replicas", 1, "replica count")
        .float("ratio", 0.5, "canary ratio");
    flags
}

#[test]
fn single_dash_long_flags_parse() {
    let parsed = deploy_flags()
        .parse(&["-env=prod", "-retries", "5", "-v"])
        .unwrap();
    assert_eq!(parsed.get_str("env"), Some("prod"));
    assert_eq!(parsed.get_int("retries"), Some(5));
    assert_eq!(parsed.get_bool("v"), Some(true));
    assert!(parsed.args().is_empty());
}

#[test]
fn double_dash_forms_parse() {
    let parsed = deploy_flags()
        .parse(&["--env", "staging", "--replicas=4", "--ratio", "0.25"])
        .unwrap();
    assert_eq!(parsed.get_str("env"), Some("staging"));
    assert_eq!(parsed.get_uint("replicas"), Some(4));
    assert_eq!(parsed.get_float("ratio"), Some(0.25));
}

#[test]
fn unset_flags_fall_back_to_defaults_and_are_not_set() {
    let parsed = deploy_flags().parse::<&str>(&[]).unwrap();
    assert_eq!(parsed.get_str("env"), Some("dev"));
    assert_eq!(parsed.get_bool("v"), Some(false));
    assert_eq!(parsed.get_int("retries"), Some(3));
    assert!(!parsed.is_set("env"));
    assert!(parsed.set_flags().is_empty());
}

#[test]
fn flag_given_its_default_value_still_counts_as_set() {
    let parsed = deploy_flags().parse(&["-env=dev", "-v=false"]).unwrap();
    assert!(parsed.is_set("env"));
    assert!(parsed.is_set("v"));
    assert_eq!(parsed.get_bool("v"), Some(false));
    assert_eq!(
        parsed.set_flags().iter().cloned().collect::<Vec<_>>(),
        vec!["env".to_string(), "v".to_string()]
    );
}

#[test]
fn bool_flag_does_not_consume_the_next_token() {
    let parsed = deploy_flags().parse(&["-v", "false"]).unwrap();
    assert_eq!(parsed.get_bool("v"), Some(true));
    assert_eq!(parsed.args(), ["false"]);
}

#[test]
fn parsing_stops_at_first_positional() {
    let parsed = deploy_flags()
        .parse(&["-v", "build-42", "-env=prod", "extra"])
        .unwrap();
    assert_eq!(parsed.args(), ["build-42", "-env=prod", "extra"]);
    assert_eq!(parsed.get_str("env"), Some("dev"));
}

#[test]
fn double_dash_terminator_is_dropped() {
    let parsed = deploy_flags().parse(&["-v", "--", "-env=prod"]).unwrap();
    assert_eq!(parsed.args(), ["-env=prod"]);
    assert!(!parsed.is_set("env"));
}

#[test]
fn lone_dash_is_positional() {
    let parsed = deploy_flags().parse(&["-", "rest"]).unwrap();
    assert_eq!(parsed.args(), ["-", "rest"]);
}

#[test]
fn value_flags_accept_hyphenated_values() {
    let parsed = deploy_flags().parse(&["-retries", "-2"]).unwrap();
    assert_eq!(parsed.get_int("retries"), Some(-2));
}

#[test]
fn repeated_flag_keeps_last_value() {
    let parsed = deploy_flags()
        .parse(&["-env=prod", "-env=staging"])
        .unwrap();
    assert_eq!(parsed.get_str("env"), Some("staging"));
}

#[test]
fn unknown_flag_is_reported() {
    let err = deploy_flags().parse(&["-region=eu"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    assert_eq!(err.message(), "flag provided but not defined: -region");
}

#[test]
fn malformed_value_is_reported() {
    let err = deploy_flags().parse(&["-retries", "many"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
    assert!(err.message().contains("many"));
}

#[test]
fn help_flag_is_recognised_in_all_spellings() {
    for token in ["-h", "-help", "--help", "--h"] {
        let parsed = deploy_flags().parse(&[token]).unwrap();
        assert!(parsed.help_requested(), "{} should request help", token);
        assert!(parsed.set_flags().is_empty());
    }
}

#[test]
fn declaring_h_takes_over_the_help_flag() {
    let mut flags = FlagSet::new("hosts");
    flags.string("h", "localhost", "host name");
    assert!(!flags.help_enabled());

    let parsed = flags.parse(&["-h", "example.org"]).unwrap();
    assert!(!parsed.help_requested());
    assert_eq!(parsed.get_str("h"), Some("example.org"));
}

#[test]
fn redeclaring_a_flag_replaces_it() {
    let mut flags = FlagSet::new("x");
    flags.string("mode", "a", "first").int("mode", 7, "second");
    assert_eq!(flags.len(), 1);
    let spec = flags.spec("mode").unwrap();
    assert_eq!(spec.kind(), FlagKind::Int);
    assert_eq!(spec.default_value(), "7");
}

#[test]
fn invalid_names_are_ignored() {
    let mut flags = FlagSet::new("x");
    flags.bool("", false, "").bool("-v", false, "").bool("a=b", false, "");
    assert!(flags.is_empty());
}

#[test]
fn typed_getters_do_not_cross_types() {
    let parsed = deploy_flags().parse(&["-env=prod"]).unwrap();
    assert_eq!(parsed.get_int("env"), None);
    assert_eq!(parsed.get_str("missing"), None);
}

#[test]
fn split_rewrites_flags_and_keeps_values() {
    let flags = deploy_flags();
    let split =
        split_tokens(&["-env", "-odd", "-v", "--retries=2", "pos", "-v"], &flags).unwrap();
    assert_eq!(split.flags, ["--env", "-odd", "--v", "--retries=2"]);
    assert_eq!(split.leftovers, ["pos", "-v"]);
}

#[test]
fn unquote_usage_extracts_value_name() {
    let mut flags = FlagSet::new("x");
    flags.string("config", "", "load settings from `file`");
    let (name, usage) = flags.spec("config").unwrap().unquote_usage();
    assert_eq!(name, "file");
    assert_eq!(usage, "load settings from file");
}

#[test]
fn extra_leading_dashes_are_bad_syntax() {
    for token in ["---env=x", "---v", "-=x", "--=x"] {
        let err = deploy_flags().parse(&[token]).unwrap_err();
        assert_eq!(err.message(), format!("bad flag syntax: {}", token));
    }
}

#[test]
fn help_flag_accepts_an_inline_boolean() {
    let parsed = deploy_flags().parse(&["-h=false", "rest"]).unwrap();
    assert!(!parsed.help_requested());
    assert_eq!(parsed.args(), ["rest"]);

    let parsed = deploy_flags().parse(&["-help=true"]).unwrap();
    assert!(parsed.help_requested());
    assert!(parsed.set_flags().is_empty());
}
