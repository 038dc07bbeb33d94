use serde::Deserialize;

/// One `[technique]` table in a profile file. Omitted fields default to
/// false so `enabled = true` alone reads naturally.
#[derive(Debug, Deserialize, Clone, Copy)]
pub(crate) struct OptEntry {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub alert: bool,
}

/// The raw shape of a TOML profile file, before lowering onto a base
/// profile. Every field is optional; an empty file is a valid profile.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct ProfileFile {
    /// Base profile to start from: "apache", "iis" or "all".
    pub profile: Option<String>,

    pub long_dir: Option<usize>,

    #[serde(default)]
    pub non_rfc_chars: Vec<u8>,

    pub ascii: Option<OptEntry>,
    pub u_encoding: Option<OptEntry>,
    pub bare_byte: Option<OptEntry>,
    pub base36: Option<OptEntry>,
    pub double_decoding: Option<OptEntry>,
    pub utf_8: Option<OptEntry>,
    pub iis_unicode: Option<OptEntry>,
    pub iis_backslash: Option<OptEntry>,
    pub multiple_slash: Option<OptEntry>,
    pub directory: Option<OptEntry>,
}

pub(crate) fn parse_profile(s: &str) -> Result<ProfileFile, toml::de::Error> {
    toml::from_str(s)
}
