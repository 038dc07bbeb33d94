use crate::events::ClientEvent;
use std::sync::Arc;

/// One decode/detect technique switch: attempt it, and optionally alert
/// when it fires.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct DecodeOpt {
    pub enabled: bool,
    pub alert: bool,
}

impl DecodeOpt {
    pub const fn off() -> Self {
        Self {
            enabled: false,
            alert: false,
        }
    }

    pub const fn on() -> Self {
        Self {
            enabled: true,
            alert: false,
        }
    }

    pub const fn alerting() -> Self {
        Self {
            enabled: true,
            alert: true,
        }
    }
}

const CODEPOINTS: usize = 0x10000;
const NO_ASCII: u16 = u16::MAX;

/// Caller-supplied table folding 16-bit codepoints onto the ASCII bytes an
/// IIS server would serve them as. Construction (codepage files and all) is
/// the caller's problem; the engine only reads it.
#[derive(Debug)]
pub struct IisUnicodeMap {
    entries: Box<[u16]>,
}

impl IisUnicodeMap {
    /// A map with no ASCII equivalents at all.
    pub fn empty() -> Self {
        Self {
            entries: vec![NO_ASCII; CODEPOINTS].into_boxed_slice(),
        }
    }

    pub fn set(&mut self, codepoint: u16, ascii: u8) {
        self.entries[codepoint as usize] = ascii as u16;
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u16, u8)>,
    {
        let mut map = Self::empty();
        for (codepoint, ascii) in pairs {
            map.set(codepoint, ascii);
        }
        map
    }

    pub fn lookup(&self, codepoint: u16) -> Option<u8> {
        match self.entries[codepoint as usize] {
            NO_ASCII => None,
            ascii => Some(ascii as u8),
        }
    }
}

/// Immutable per-inspection configuration: which evasion techniques to
/// decode, which to alert on, the operator's non-RFC byte set, and the
/// oversize-directory threshold.
#[derive(Debug, Clone)]
pub struct NormalizeConf {
    pub ascii: DecodeOpt,
    pub u_encoding: DecodeOpt,
    pub bare_byte: DecodeOpt,
    pub base36: DecodeOpt,
    pub double_decoding: DecodeOpt,
    pub utf_8: DecodeOpt,
    pub iis_unicode: DecodeOpt,

    pub iis_backslash: DecodeOpt,
    pub multiple_slash: DecodeOpt,
    pub directory: DecodeOpt,

    /// Bytes that always raise `NonRfcChar` when they show up in decoded
    /// output.
    pub non_rfc_chars: [bool; 256],

    /// Directory-length alert threshold in output bytes; 0 disables.
    pub long_dir: usize,

    pub unicode_map: Arc<IisUnicodeMap>,
}

impl Default for NormalizeConf {
    fn default() -> Self {
        Self::with_map(Arc::new(IisUnicodeMap::empty()))
    }
}

impl NormalizeConf {
    /// Everything off; decodes nothing, alerts on nothing but non-RFC bytes
    /// (of which there are none until the caller flags some).
    pub fn with_map(unicode_map: Arc<IisUnicodeMap>) -> Self {
        Self {
            ascii: DecodeOpt::off(),
            u_encoding: DecodeOpt::off(),
            bare_byte: DecodeOpt::off(),
            base36: DecodeOpt::off(),
            double_decoding: DecodeOpt::off(),
            utf_8: DecodeOpt::off(),
            iis_unicode: DecodeOpt::off(),
            iis_backslash: DecodeOpt::off(),
            multiple_slash: DecodeOpt::off(),
            directory: DecodeOpt::off(),
            non_rfc_chars: [false; 256],
            long_dir: 0,
            unicode_map,
        }
    }

    pub fn is_non_rfc(&self, byte: u8) -> bool {
        self.non_rfc_chars[byte as usize]
    }

    /// Whether a detected technique should actually be logged.
    ///
    /// Non-RFC bytes and oversize directories have no per-technique alert
    /// switch; flagging the byte set or setting the threshold is the opt-in.
    pub fn should_alert(&self, event: ClientEvent) -> bool {
        match event {
            ClientEvent::AsciiEncoding => self.ascii.alert,
            ClientEvent::DoubleDecode => self.double_decoding.alert,
            ClientEvent::UEncode => self.u_encoding.alert,
            ClientEvent::BareByte => self.bare_byte.alert,
            ClientEvent::Base36 => self.base36.alert,
            ClientEvent::Utf8Encoding => self.utf_8.alert,
            ClientEvent::IisUnicode => self.iis_unicode.alert,
            ClientEvent::MultiSlash => self.multiple_slash.alert,
            ClientEvent::IisBackslash => self.iis_backslash.alert,
            ClientEvent::SelfDirTraversal | ClientEvent::DirTraversal => self.directory.alert,
            ClientEvent::NonRfcChar | ClientEvent::OversizeDir => true,
        }
    }
}
