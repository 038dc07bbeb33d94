use crate::conf::error::ConfigError;
use crate::conf::lower::lower_profile;
use crate::conf::parse::parse_profile;
use crate::conf::types::{IisUnicodeMap, NormalizeConf};

use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Load a TOML profile file and lower it to a runtime configuration.
///
/// The unicode map is supplied separately because it is built (or mmapped)
/// once per process, not per profile file.
pub fn load_profile(
    path: &Path,
    unicode_map: Arc<IisUnicodeMap>,
) -> Result<NormalizeConf, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let parsed = parse_profile(&s).map_err(|e| ConfigError::parse(path, e))?;
    lower_profile(parsed, unicode_map)
}
