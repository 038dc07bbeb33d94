use crate::conf::types::{DecodeOpt, IisUnicodeMap, NormalizeConf};
use std::sync::Arc;

/// Canned per-server-flavor configurations. Matching the inspection profile
/// to the real server cuts false positives: there is no point decoding `%u`
/// against a server that will never honor it.
impl NormalizeConf {
    /// Apache-style servers: plain percent and UTF-8 decoding, slash and
    /// traversal normalization. No IIS tricks.
    pub fn profile_apache() -> Self {
        let mut conf = Self::default();

        conf.ascii = DecodeOpt::on();
        conf.utf_8 = DecodeOpt::on();
        conf.multiple_slash = DecodeOpt::on();
        conf.directory = DecodeOpt::on();

        conf
    }

    /// IIS-style servers: everything Apache does minus raw UTF-8, plus the
    /// IIS-specific encodings with alerts, since seeing those against IIS
    /// is nearly always hostile.
    pub fn profile_iis(unicode_map: Arc<IisUnicodeMap>) -> Self {
        let mut conf = Self::with_map(unicode_map);

        conf.ascii = DecodeOpt::on();
        conf.multiple_slash = DecodeOpt::on();
        conf.directory = DecodeOpt::on();

        conf.double_decoding = DecodeOpt::alerting();
        conf.u_encoding = DecodeOpt::alerting();
        conf.bare_byte = DecodeOpt::alerting();
        conf.iis_unicode = DecodeOpt::alerting();
        conf.iis_backslash = DecodeOpt::on();

        conf
    }

    /// Server flavor unknown: decode every technique so nothing slips by.
    pub fn profile_all(unicode_map: Arc<IisUnicodeMap>) -> Self {
        Self::profile_iis(unicode_map)
    }
}
