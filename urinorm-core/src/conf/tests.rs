use crate::conf::lower::lower_profile;
use crate::conf::parse::parse_profile;
use crate::conf::*;
use crate::events::ClientEvent;

use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::Arc;

fn empty_map() -> Arc<IisUnicodeMap> {
    Arc::new(IisUnicodeMap::empty())
}

#[test]
fn test_unicode_map_lookup() {
    let mut map = IisUnicodeMap::empty();
    assert_eq!(map.lookup(0x2044), None);

    map.set(0x2044, b'/');
    assert_eq!(map.lookup(0x2044), Some(b'/'));
    assert_eq!(map.lookup(0x2045), None);

    let map = IisUnicodeMap::from_pairs([(0x00c0, b'A'), (0x0131, b'i')]);
    assert_eq!(map.lookup(0x00c0), Some(b'A'));
    assert_eq!(map.lookup(0x0131), Some(b'i'));
}

#[test]
fn test_profile_apache_matrix() {
    let conf = NormalizeConf::profile_apache();

    assert!(conf.ascii.enabled && !conf.ascii.alert);
    assert!(conf.utf_8.enabled);
    assert!(conf.multiple_slash.enabled);
    assert!(conf.directory.enabled);

    assert!(!conf.u_encoding.enabled);
    assert!(!conf.double_decoding.enabled);
    assert!(!conf.bare_byte.enabled);
    assert!(!conf.iis_backslash.enabled);
}

#[test]
fn test_profile_iis_matrix() {
    let conf = NormalizeConf::profile_iis(empty_map());

    assert!(conf.ascii.enabled && !conf.ascii.alert);
    assert!(conf.double_decoding.enabled && conf.double_decoding.alert);
    assert!(conf.u_encoding.enabled && conf.u_encoding.alert);
    assert!(conf.bare_byte.enabled && conf.bare_byte.alert);
    assert!(conf.iis_unicode.enabled && conf.iis_unicode.alert);
    assert!(conf.iis_backslash.enabled && !conf.iis_backslash.alert);

    // IIS does not decode plain UTF-8 paths.
    assert!(!conf.utf_8.enabled);
}

#[test]
fn test_should_alert_follows_flags() {
    let mut conf = NormalizeConf::default();
    assert!(!conf.should_alert(ClientEvent::MultiSlash));

    conf.multiple_slash = DecodeOpt::alerting();
    assert!(conf.should_alert(ClientEvent::MultiSlash));

    conf.directory = DecodeOpt::alerting();
    assert!(conf.should_alert(ClientEvent::DirTraversal));
    assert!(conf.should_alert(ClientEvent::SelfDirTraversal));

    // No per-technique switch for these two.
    assert!(conf.should_alert(ClientEvent::NonRfcChar));
    assert!(conf.should_alert(ClientEvent::OversizeDir));
}

#[test]
fn test_lower_overrides_base_profile() {
    let parsed = parse_profile(
        r#"
        profile = "iis"
        long_dir = 300
        non_rfc_chars = [0, 37]

        [u_encoding]
        enabled = true

        [utf_8]
        enabled = true
        alert = true
        "#,
    )
    .unwrap();

    let conf = lower_profile(parsed, empty_map()).unwrap();

    assert_eq!(conf.long_dir, 300);
    assert!(conf.is_non_rfc(0x00));
    assert!(conf.is_non_rfc(b'%'));
    assert!(!conf.is_non_rfc(b'/'));

    // Override dropped the base profile's alert flag.
    assert!(conf.u_encoding.enabled && !conf.u_encoding.alert);
    assert!(conf.utf_8.enabled && conf.utf_8.alert);

    // Untouched base fields survive.
    assert!(conf.double_decoding.enabled && conf.double_decoding.alert);
}

#[test]
fn test_lower_rejects_unknown_profile() {
    let parsed = parse_profile(r#"profile = "nginx""#).unwrap();

    match lower_profile(parsed, empty_map()) {
        Err(ConfigError::UnknownProfile { name }) => assert_eq!(name, "nginx"),
        other => panic!("expected UnknownProfile, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_load_profile_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "profile = \"apache\"\nlong_dir = 500").unwrap();

    let conf = load_profile(file.path(), empty_map()).unwrap();
    assert!(conf.ascii.enabled);
    assert_eq!(conf.long_dir, 500);
}

#[test]
fn test_load_profile_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    assert!(matches!(
        load_profile(&missing, empty_map()),
        Err(ConfigError::ReadFile { .. })
    ));
}
