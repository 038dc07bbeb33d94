use crate::conf::{DecodeOpt, IisUnicodeMap, NormalizeConf};
use crate::norm::normalize_uri;
use crate::session::Session;
use std::sync::Arc;


/// Codepoint table with a couple of known foldings: U+2044 (fraction
/// slash) onto `/` and U+0130 (dotted capital I) onto `i`.
fn test_map() -> Arc<IisUnicodeMap> {
    Arc::new(IisUnicodeMap::from_pairs([(0x2044, b'/'), (0x0130, b'i')]))
}

/// IIS-flavored configuration with every alert switch on, so tests can
/// observe exactly which layers fired.
fn conf_iis() -> NormalizeConf {
    let mut conf = NormalizeConf::with_map(test_map());

    conf.ascii = DecodeOpt::alerting();
    conf.u_encoding = DecodeOpt::alerting();
    conf.bare_byte = DecodeOpt::alerting();
    conf.double_decoding = DecodeOpt::alerting();
    conf.iis_unicode = DecodeOpt::alerting();
    conf.iis_backslash = DecodeOpt::alerting();
    conf.multiple_slash = DecodeOpt::alerting();
    conf.directory = DecodeOpt::alerting();

    conf
}

/// Apache-flavored configuration: percent and raw UTF-8 decoding, no IIS
/// tricks, alerts on.
fn conf_apache() -> NormalizeConf {
    let mut conf = NormalizeConf::default();

    conf.ascii = DecodeOpt::alerting();
    conf.utf_8 = DecodeOpt::alerting();
    conf.multiple_slash = DecodeOpt::alerting();
    conf.directory = DecodeOpt::alerting();

    conf
}

/// Normalize `input` into a buffer of the same size and hand back the
/// written bytes with the session that accumulated the events.
fn run(conf: &NormalizeConf, input: &[u8]) -> (Vec<u8>, Session) {
    let mut session = Session::new();
    let mut out = vec![0u8; input.len()];

    let written = normalize_uri(conf, &mut session, input, &mut out)
        .expect("normalization should succeed");
    out.truncate(written);

    (out, session)
}
