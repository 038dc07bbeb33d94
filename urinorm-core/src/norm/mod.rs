mod cursor;
mod decode;
mod lookup;
mod path;
mod uri;

#[cfg(test)]
mod tests;

pub use uri::{NormalizeError, normalize_uri};
