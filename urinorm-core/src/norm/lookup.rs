use once_cell::sync::Lazy;

/// What a raw byte means when it appears where an encoded digit is
/// expected.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum DigitClass {
    /// '0'-'9', 'A'-'F', 'a'-'f'.
    Hex,
    /// 'G'-'Z', 'g'-'z': only a digit when base36 decoding is enabled.
    Base36,
    NotDigit,
}

struct Tables {
    value: [u8; 256],
    class: [DigitClass; 256],
}

static TABLES: Lazy<Tables> = Lazy::new(|| {
    let mut value = [0u8; 256];
    let mut class = [DigitClass::NotDigit; 256];

    for (i, b) in (b'0'..=b'9').enumerate() {
        value[b as usize] = i as u8;
        class[b as usize] = DigitClass::Hex;
    }

    for (i, b) in (b'A'..=b'F').enumerate() {
        value[b as usize] = 10 + i as u8;
        value[b.to_ascii_lowercase() as usize] = 10 + i as u8;
        class[b as usize] = DigitClass::Hex;
        class[b.to_ascii_lowercase() as usize] = DigitClass::Hex;
    }

    // Base36 digit values keep counting up from 16; they share the value
    // table because both nibbles combine the same way.
    for (i, b) in (b'G'..=b'Z').enumerate() {
        value[b as usize] = 16 + i as u8;
        value[b.to_ascii_lowercase() as usize] = 16 + i as u8;
        class[b as usize] = DigitClass::Base36;
        class[b.to_ascii_lowercase() as usize] = DigitClass::Base36;
    }

    Tables { value, class }
});

pub(crate) fn digit_class(byte: u8) -> DigitClass {
    TABLES.class[byte as usize]
}

/// Digit value 0-35. Only meaningful when `digit_class` is not `NotDigit`.
pub(crate) fn digit_value(byte: u8) -> u32 {
    TABLES.value[byte as usize] as u32
}
