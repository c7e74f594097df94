use gopkg_rewrite::{
    rewrite, GoPackageError, NameTransformer, Placement, RewriteConfig, RewriteOutcome,
    RewriteSettings, SkipReason,
};

const PAYMENTS_PROTO: &str = r#"syntax = "proto3";

package acme.payments.v1;

import "google/protobuf/timestamp.proto";

option csharp_namespace = "Acme.Payments.V1";
option java_multiple_files = "true";
option java_package = "com.acme.payments.v1";

message Payment {
  string id = 1;
  google.protobuf.Timestamp created_at = 2;
}
"#;

fn text(outcome: &RewriteOutcome) -> &str {
    std::str::from_utf8(outcome.content().expect("rewritten content")).unwrap()
}

fn compile(package: &str, go_package: &str) -> RewriteConfig {
    RewriteConfig::compile(&RewriteSettings {
        package: package.to_string(),
        go_package: go_package.to_string(),
        ..RewriteSettings::default()
    })
    .expect("valid settings")
}

#[test]
fn test_default_settings_insert_sorted() {
    let config = RewriteConfig::compile(&RewriteSettings::default()).unwrap();
    let outcome = rewrite(PAYMENTS_PROTO.as_bytes(), &config).unwrap();

    let expected = PAYMENTS_PROTO.replace(
        "option java_multiple_files",
        "option go_package = \"github.com/example/example/acme/payments/v1\";\noption java_multiple_files",
    );
    assert_eq!(text(&outcome), expected);
    assert!(matches!(
        outcome,
        RewriteOutcome::Inserted { placement: Placement::BeforeOption, .. }
    ));
}

#[test]
fn test_capture_groups_drive_template() {
    let config = compile(r"^acme\.(\w+)\.(v\d+)$", "github.com/acme/api/gen/go/{{index . 1}}/{{index . 2}}");
    let outcome = rewrite(PAYMENTS_PROTO.as_bytes(), &config).unwrap();
    assert_eq!(outcome.value(), Some("github.com/acme/api/gen/go/payments/v1"));
}

#[test]
fn test_replace_preserves_surrounding_bytes() {
    let input = PAYMENTS_PROTO.replace(
        "option java_package",
        "  option go_package = \"stale/path;stalepb\";\noption java_package",
    );
    let config = compile("(.*)", "example.com/{{1}}");
    let outcome = rewrite(input.as_bytes(), &config).unwrap();
    let output = text(&outcome);

    let old_value = "stale/path;stalepb";
    let start = input.find(old_value).unwrap();
    let end = start + old_value.len();
    let new_value = "example.com/acme/payments/v1";

    assert_eq!(&output[..start], &input[..start]);
    assert_eq!(&output[start..start + new_value.len()], new_value);
    assert_eq!(&output[start + new_value.len()..], &input[end..]);
    assert!(matches!(outcome, RewriteOutcome::Replaced { .. }));
}

#[test]
fn test_rewrite_is_idempotent() {
    let config = compile("(.*)", "example.com/{{1}}");
    let first = rewrite(PAYMENTS_PROTO.as_bytes(), &config).unwrap();
    let once = text(&first).to_string();
    let second = rewrite(once.as_bytes(), &config).unwrap();

    assert_eq!(text(&second), once);
    assert_eq!(once.matches("option go_package").count(), 1);
}

#[test]
fn test_insert_after_last_option_when_all_sort_earlier() {
    let input = "package a.b;\n\noption cc_enable_arenas = \"true\";\noption csharp_namespace = \"A.B\";\n";
    let outcome = rewrite(input.as_bytes(), &compile("(.*)", "{{1}}")).unwrap();

    assert_eq!(
        text(&outcome),
        "package a.b;\n\noption cc_enable_arenas = \"true\";\noption csharp_namespace = \"A.B\";\n\noption go_package = \"a/b\";\n"
    );
}

#[test]
fn test_latin1_comment_does_not_block_rewrite() {
    let mut input = b"syntax = \"proto3\";\n// Caf\xe9 service\n".to_vec();
    input.extend_from_slice(b"package acme.cafe.v1;\n\noption java_package = \"com.acme\";\n");
    let outcome = rewrite(&input, &compile("(.*)", "example.com/{{1}}")).unwrap();

    let output = outcome.content().unwrap();
    assert!(output.starts_with(b"syntax = \"proto3\";\n// Caf\xe9 service\n"));
    assert!(output.ends_with(
        b"package acme.cafe.v1;\n\noption go_package = \"example.com/acme/cafe/v1\";\noption java_package = \"com.acme\";\n"
    ));
}

#[test]
fn test_filter_mismatch_returns_input_untouched() {
    let outcome = rewrite(b"package foo.bar;\n", &compile(r"^baz\.(.*)", "{{1}}")).unwrap();
    assert_eq!(
        outcome,
        RewriteOutcome::Skipped(SkipReason::PackageMismatch {
            package: "foo.bar".to_string()
        })
    );
}

#[test]
fn test_escaped_quote_value_fully_replaced() {
    let input = "package p;\noption go_package = \"a\\\"b\\\"c\";\noption z = \"1\";\n";
    let outcome = rewrite(input.as_bytes(), &compile("(.*)", "fresh")).unwrap();
    assert_eq!(
        text(&outcome),
        "package p;\noption go_package = \"fresh\";\noption z = \"1\";\n"
    );
}

#[test]
fn test_require_package_flag() {
    let config = RewriteConfig::new(NameTransformer::from_sources("(.*)", "{{1}}").unwrap(), true);
    let err = rewrite(b"message A {}\n", &config).unwrap_err();
    assert!(matches!(err, GoPackageError::MissingPackageDirective));
    assert!(!err.is_configuration());
}

#[test]
fn test_bad_settings_are_configuration_errors() {
    let bad_regex = RewriteConfig::compile(&RewriteSettings {
        package: "(unclosed".to_string(),
        ..RewriteSettings::default()
    })
    .unwrap_err();
    assert!(bad_regex.is_configuration());

    let bad_template = RewriteConfig::compile(&RewriteSettings {
        go_package: "{{.Package}}".to_string(),
        ..RewriteSettings::default()
    })
    .unwrap_err();
    assert!(bad_template.is_configuration());
}
