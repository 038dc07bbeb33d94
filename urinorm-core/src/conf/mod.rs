mod error;
mod loader;
mod lower;
mod parse;
mod profiles;
mod types;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::load_profile;
pub use types::{DecodeOpt, IisUnicodeMap, NormalizeConf};
