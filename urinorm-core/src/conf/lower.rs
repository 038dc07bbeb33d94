use crate::conf::error::ConfigError;
use crate::conf::parse::{OptEntry, ProfileFile};
use crate::conf::types::{DecodeOpt, IisUnicodeMap, NormalizeConf};
use std::sync::Arc;

fn apply(slot: &mut DecodeOpt, entry: Option<OptEntry>) {
    if let Some(entry) = entry {
        *slot = DecodeOpt {
            enabled: entry.enabled,
            alert: entry.alert,
        };
    }
}

/// Lower a parsed profile file onto its base profile, producing the runtime
/// configuration. Explicit `[technique]` tables override the base wholesale.
pub(crate) fn lower_profile(
    file: ProfileFile,
    unicode_map: Arc<IisUnicodeMap>,
) -> Result<NormalizeConf, ConfigError> {
    let mut conf = match file.profile.as_deref() {
        None => NormalizeConf::with_map(unicode_map),
        Some("apache") => {
            let mut conf = NormalizeConf::profile_apache();
            conf.unicode_map = unicode_map;
            conf
        }
        Some("iis") => NormalizeConf::profile_iis(unicode_map),
        Some("all") => NormalizeConf::profile_all(unicode_map),
        Some(other) => {
            return Err(ConfigError::UnknownProfile {
                name: other.to_string(),
            });
        }
    };

    apply(&mut conf.ascii, file.ascii);
    apply(&mut conf.u_encoding, file.u_encoding);
    apply(&mut conf.bare_byte, file.bare_byte);
    apply(&mut conf.base36, file.base36);
    apply(&mut conf.double_decoding, file.double_decoding);
    apply(&mut conf.utf_8, file.utf_8);
    apply(&mut conf.iis_unicode, file.iis_unicode);
    apply(&mut conf.iis_backslash, file.iis_backslash);
    apply(&mut conf.multiple_slash, file.multiple_slash);
    apply(&mut conf.directory, file.directory);

    if let Some(long_dir) = file.long_dir {
        conf.long_dir = long_dir;
    }

    for byte in file.non_rfc_chars {
        conf.non_rfc_chars[byte as usize] = true;
    }

    Ok(conf)
}
