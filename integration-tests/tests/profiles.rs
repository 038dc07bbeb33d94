use std::io::Write;

use integration_tests::harness::{iis_map, init_test_tracing, normalize};
use pretty_assertions::assert_eq;
use urinorm_core::conf::{ConfigError, load_profile};
use urinorm_core::ClientEvent;

fn write_profile(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create profile file");
    file.write_all(contents.as_bytes()).expect("write profile file");
    file
}

#[test]
fn iis_profile_file_drives_normalization() {
    init_test_tracing();

    let file = write_profile(
        r#"
        profile = "iis"
        long_dir = 300

        [utf_8]
        enabled = true
        "#,
    );

    let conf = load_profile(file.path(), iis_map()).expect("load profile");

    assert!(conf.double_decoding.enabled);
    assert!(conf.utf_8.enabled);
    assert_eq!(conf.long_dir, 300);

    let (out, session) = normalize(&conf, b"/scripts/..%255c../winnt");
    assert_eq!(out, b"/winnt");
    assert!(session.client_events.contains(ClientEvent::DoubleDecode));
}

#[test]
fn overrides_layer_onto_the_base_profile() {
    init_test_tracing();

    let file = write_profile(
        r#"
        profile = "apache"
        non_rfc_chars = [0]

        [ascii]
        enabled = true
        alert = true
        "#,
    );

    let conf = load_profile(file.path(), iis_map()).expect("load profile");

    let (out, session) = normalize(&conf, b"%41%00");
    assert_eq!(out, b"A\0");
    assert_eq!(session.client_events.count(ClientEvent::AsciiEncoding), 2);
    assert_eq!(session.client_events.count(ClientEvent::NonRfcChar), 1);
}

#[test]
fn unknown_base_profile_is_rejected() {
    init_test_tracing();

    let file = write_profile(r#"profile = "nginx""#);

    let err = load_profile(file.path(), iis_map()).unwrap_err();

    match err {
        ConfigError::UnknownProfile { name } => assert_eq!(name, "nginx"),
        other => panic!("unexpected error: {other}"),
    }
}
