use crate::conf::NormalizeConf;
use crate::events::{ClientEvent, EventQueue};
use crate::norm::cursor::Cursor;
use crate::norm::lookup::{DigitClass, digit_class, digit_value};

/// Placeholder written for malformed or unmappable encodings. Deliberately
/// outside every special-byte range so it can never read as `/`, `.`, `%`
/// or `\` downstream, and will not match a real signature byte.
pub(crate) const NON_ASCII_BYTE: u8 = 0xff;

/// Result of a raw fetch at the bottom of the stack.
enum Fetch {
    Byte(u8),
    End,
    /// A literal `%` where a digit was expected, with double decoding on:
    /// the caller rewinds and leaves it for the double-decode layer.
    PercentStart,
}

/// Result of the percent layer.
enum PercentOut {
    Byte(u8),
    End,
}

/// Result of a `%u` decode; `PercentStart` can only surface when the
/// digits are being fetched raw.
enum UOut {
    Byte(u8),
    End,
    PercentStart,
}

/// A fully decoded byte, or the end of the input.
pub(crate) enum Decoded {
    Byte(u8),
    End,
}

/// Where a `%u` sequence draws its digits from: raw input bytes (first
/// decode pass) or fully first-stage-decoded bytes (double-decode pass,
/// where each digit may itself be percent-encoded).
enum USource {
    Raw,
    Decoded,
}

/// The layered byte decoder. Owns the input cursor for the duration of one
/// normalization call and appends evasion events as layers fire.
pub(crate) struct UriDecoder<'i, 's> {
    conf: &'s NormalizeConf,
    events: &'s mut EventQueue<ClientEvent>,
    cur: Cursor<'i>,
}

impl<'i, 's> UriDecoder<'i, 's> {
    pub(crate) fn new(
        conf: &'s NormalizeConf,
        events: &'s mut EventQueue<ClientEvent>,
        input: &'i [u8],
    ) -> Self {
        Self {
            conf,
            events,
            cur: Cursor::new(input),
        }
    }

    pub(crate) fn conf(&self) -> &NormalizeConf {
        self.conf
    }

    pub(crate) fn alert(&mut self, event: ClientEvent) {
        if self.conf.should_alert(event) {
            self.events.log(event, None);
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.cur.pos()
    }

    pub(crate) fn seek(&mut self, pos: usize) {
        self.cur.seek(pos);
    }

    /// Raw lookahead for the absolute-URI check: `offset` bytes past the
    /// cursor, undecoded.
    pub(crate) fn raw_ahead(&self, offset: usize) -> Option<u8> {
        if self.cur.in_bounds_at(offset) {
            Some(self.cur.peek(offset))
        } else {
            None
        }
    }

    pub(crate) fn skip_raw(&mut self) {
        self.cur.advance();
    }

    /// Advance and read one raw byte.
    fn fetch(&mut self) -> Fetch {
        self.cur.advance();

        if !self.cur.in_bounds() {
            return Fetch::End;
        }

        let byte = self.cur.current();
        if self.conf.double_decoding.enabled && byte == b'%' {
            return Fetch::PercentStart;
        }

        Fetch::Byte(byte)
    }

    /// Decode `%uXXXX`: exactly four strict-hex digits naming a codepoint.
    ///
    /// IIS maps many codepoints onto ASCII (`%u2044` is `/` there), so
    /// values past 0xff go through the configured codepoint table.
    fn u_decode(&mut self, source: USource) -> UOut {
        let mut norm: u32 = 0;

        for _ in 0..4 {
            let byte = match source {
                USource::Raw => match self.fetch() {
                    Fetch::End => return UOut::End,
                    Fetch::PercentStart => return UOut::PercentStart,
                    Fetch::Byte(b) => b,
                },
                USource::Decoded => match self.next_first_stage() {
                    Decoded::End => return UOut::End,
                    Decoded::Byte(b) => b,
                },
            };

            if digit_class(byte) != DigitClass::Hex {
                return UOut::Byte(NON_ASCII_BYTE);
            }

            norm = (norm << 4) | digit_value(byte);
        }

        let byte = if norm > 0xff {
            if !self.conf.iis_unicode.enabled {
                return UOut::Byte(NON_ASCII_BYTE);
            }

            let mapped = self
                .conf
                .unicode_map
                .lookup(norm as u16)
                .unwrap_or(NON_ASCII_BYTE);
            self.alert(ClientEvent::IisUnicode);
            mapped
        } else {
            norm as u8
        };

        self.alert(ClientEvent::UEncode);
        UOut::Byte(byte)
    }

    /// The percent layer: `%XX` hex (or base36), or `%uXXXX`.
    ///
    /// Entered with the cursor on the `%`. A `%` found where a digit was
    /// expected, with double decoding on, rewinds to the original `%` and
    /// returns it literally; the double-decode layer picks it up from the
    /// top-level wrapper.
    fn percent_decode(&mut self) -> PercentOut {
        let origin = self.cur.pos();

        let first = match self.fetch() {
            Fetch::End => return PercentOut::End,
            Fetch::PercentStart => {
                self.cur.seek(origin);
                return PercentOut::Byte(b'%');
            }
            Fetch::Byte(b) => b,
        };

        if digit_class(first) != DigitClass::Hex {
            if self.conf.u_encoding.enabled && first.eq_ignore_ascii_case(&b'u') {
                return match self.u_decode(USource::Raw) {
                    UOut::End => PercentOut::End,
                    UOut::PercentStart => {
                        self.cur.seek(origin);
                        PercentOut::Byte(b'%')
                    }
                    UOut::Byte(b) => PercentOut::Byte(b),
                };
            }

            if !self.conf.base36.enabled || digit_class(first) != DigitClass::Base36 {
                return PercentOut::Byte(NON_ASCII_BYTE);
            }

            self.alert(ClientEvent::Base36);
        }

        let mut norm = digit_value(first) << 4;

        let second = match self.fetch() {
            Fetch::End => return PercentOut::End,
            Fetch::PercentStart => {
                self.cur.seek(origin);
                return PercentOut::Byte(b'%');
            }
            Fetch::Byte(b) => b,
        };

        if digit_class(second) != DigitClass::Hex {
            if !self.conf.base36.enabled || digit_class(second) != DigitClass::Base36 {
                return PercentOut::Byte(NON_ASCII_BYTE);
            }

            self.alert(ClientEvent::Base36);
        }

        norm = (norm | digit_value(second)) & 0xff;

        self.alert(ClientEvent::AsciiEncoding);
        PercentOut::Byte(norm as u8)
    }

    /// First decode stage for the byte under the cursor: percent layer if
    /// it applies, bare-byte classification otherwise.
    ///
    /// `unicode_ok` marks the byte as eligible for the UTF-8 layer: true
    /// for percent-decoded bytes and for raw high-bit bytes when bare-byte
    /// decoding is on (servers that accept bare bytes feed them straight
    /// into their UTF-8 handling, so the inspector must too).
    fn char_at_cursor(&mut self) -> Option<(u8, bool)> {
        if !self.cur.in_bounds() {
            return None;
        }

        let raw = self.cur.current();

        if raw == b'%' && self.conf.ascii.enabled {
            let byte = match self.percent_decode() {
                // Input ran out mid-decode; the cursor is already past the
                // end, so hand back the placeholder and let the next call
                // report end-of-input.
                PercentOut::End => return Some((NON_ASCII_BYTE, false)),
                PercentOut::Byte(b) => b,
            };

            self.cur.advance();
            return Some((byte, true));
        }

        let unicode_ok = if self.conf.bare_byte.enabled && raw > 0x7f {
            self.alert(ClientEvent::BareByte);
            true
        } else {
            false
        };

        self.cur.advance();
        Some((raw, unicode_ok))
    }

    /// Decode a UTF-8 sequence of up to three bytes starting from an
    /// already-consumed lead byte.
    ///
    /// Continuation bytes are pulled through the first stage again, since
    /// each may itself be percent-encoded. Codepoints past ASCII go through
    /// the IIS table when that is enabled; otherwise they collapse to the
    /// placeholder. Anything malformed collapses to the placeholder too.
    fn utf8_decode(&mut self, first: u8) -> u8 {
        let (continuations, mut norm): (usize, u32) = if first & 0xe0 == 0xc0 {
            (1, (first & 0x1f) as u32)
        } else if first & 0xf0 == 0xe0 {
            (2, (first & 0x0f) as u32)
        } else {
            // Not a lead byte we decode. Longer sequences don't survive
            // real servers, so treat the byte as opaque.
            return first;
        };

        for _ in 0..continuations {
            let (byte, unicode_ok) = match self.char_at_cursor() {
                None => return NON_ASCII_BYTE,
                Some(pair) => pair,
            };

            if !unicode_ok || byte & 0xc0 != 0x80 {
                return NON_ASCII_BYTE;
            }

            norm = (norm << 6) | (byte & 0x3f) as u32;
        }

        if norm > 0x7f {
            if self.conf.iis_unicode.enabled {
                let mapped = self
                    .conf
                    .unicode_map
                    .lookup(norm as u16)
                    .unwrap_or(NON_ASCII_BYTE);
                self.alert(ClientEvent::IisUnicode);
                return mapped;
            }

            norm = NON_ASCII_BYTE as u32;
        }

        self.alert(ClientEvent::Utf8Encoding);
        norm as u8
    }

    fn unicode_decode(&mut self, first: u8) -> u8 {
        if self.conf.iis_unicode.enabled || self.conf.utf_8.enabled {
            return self.utf8_decode(first);
        }

        first
    }

    /// First full decode stage: percent layer plus UTF-8/IIS-unicode for
    /// eligible high-bit results.
    fn next_first_stage(&mut self) -> Decoded {
        let (byte, unicode_ok) = match self.char_at_cursor() {
            None => return Decoded::End,
            Some(pair) => pair,
        };

        if byte & 0x80 != 0 && byte != NON_ASCII_BYTE && unicode_ok {
            return Decoded::Byte(self.unicode_decode(byte));
        }

        Decoded::Byte(byte)
    }

    /// Second decode pass, entered when the first stage produced a literal
    /// `%`. Only strict hex and `%u` apply here; digits are fetched fully
    /// decoded, which is exactly how IIS's second pass sees them.
    fn double_decode(&mut self, in_param: bool) -> u8 {
        let first = match self.next_first_stage() {
            Decoded::End => return NON_ASCII_BYTE,
            Decoded::Byte(b) => b,
        };

        if digit_class(first) != DigitClass::Hex {
            if self.conf.u_encoding.enabled && first.eq_ignore_ascii_case(&b'u') {
                return match self.u_decode(USource::Decoded) {
                    UOut::End => NON_ASCII_BYTE,
                    // Unreachable from the decoded source; fetched digits
                    // are never raw percents here.
                    UOut::PercentStart => NON_ASCII_BYTE,
                    UOut::Byte(b) => b,
                };
            }

            return first;
        }

        let high = digit_value(first) << 4;

        let second = match self.next_first_stage() {
            Decoded::End => return NON_ASCII_BYTE,
            Decoded::Byte(b) => b,
        };

        if digit_class(second) != DigitClass::Hex {
            // The stray first nibble is dropped; the byte passes through.
            return second;
        }

        let byte = ((high | digit_value(second)) & 0xff) as u8;

        // Parameter values double-encode legitimately; only the path part
        // is suspicious.
        if !in_param {
            self.alert(ClientEvent::DoubleDecode);
        }

        byte
    }

    /// Produce the next fully decoded byte: first stage, then the
    /// double-decode pass when it left a literal `%`, then backslash
    /// folding on whatever came out.
    pub(crate) fn next_decoded(&mut self, in_param: bool) -> Decoded {
        let byte = match self.next_first_stage() {
            Decoded::End => return Decoded::End,
            Decoded::Byte(b) => b,
        };

        let mut byte = if self.conf.double_decoding.enabled && byte == b'%' {
            self.double_decode(in_param)
        } else {
            byte
        };

        if self.conf.iis_backslash.enabled && byte == b'\\' {
            self.alert(ClientEvent::IisBackslash);
            byte = b'/';
        }

        Decoded::Byte(byte)
    }
}
