pub mod conf;
pub mod events;
pub mod logging;
pub mod norm;
mod session;

pub use conf::{DecodeOpt, IisUnicodeMap, NormalizeConf};
pub use events::{AnomServerEvent, ClientEvent, EventQueue, Priority};
pub use norm::{NormalizeError, normalize_uri};
pub use session::Session;
