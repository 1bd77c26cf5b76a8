/// Band every continuation byte must fall in unless the lead narrows it.
const TAIL: (u8, u8) = (0x80, 0xBF);

/// One UTF-8 encoded code point, assembled a byte at a time.
///
/// The lead byte fixes the total length and the band the second byte must
/// fall in (Table 3-7 of the Unicode core specification). Later bytes are
/// plain continuation bytes. A sequence that reaches its full length is always
/// well formed: overlong forms, surrogates and values past U+10FFFF are
/// rejected by the bands before they can complete.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Utf8Sequence {
    bytes: [u8; 4],
    full_length: u8,
    current_length: u8,
    second: (u8, u8),
}

impl Utf8Sequence {
    #[inline]
    pub(crate) const fn build(byte: u8) -> Option<Self> {
        let (full_length, second) = match byte {
            0x00..=0x7F => (1, TAIL),
            0xC2..=0xDF => (2, TAIL),
            0xE0 => (3, (0xA0, 0xBF)),
            0xE1..=0xEC | 0xEE..=0xEF => (3, TAIL),
            // U+D800..U+DFFF
            0xED => (3, (0x80, 0x9F)),
            0xF0 => (4, (0x90, 0xBF)),
            0xF1..=0xF3 => (4, TAIL),
            // caps at U+10FFFF
            0xF4 => (4, (0x80, 0x8F)),
            _ => return None,
        };
        Some(Self {
            bytes: [byte, 0, 0, 0],
            full_length,
            current_length: 1,
            second,
        })
    }

    /// Appends `point` if it is the byte this position requires.
    #[inline]
    pub(crate) fn add_point(&mut self, point: u8) -> bool {
        if self.is_complete() {
            return false;
        }
        let (low, high) = if self.current_length == 1 {
            self.second
        } else {
            TAIL
        };
        if !(low..=high).contains(&point) {
            return false;
        }
        self.bytes[self.current_len()] = point;
        self.current_length += 1;
        true
    }

    #[inline]
    pub(crate) const fn is_complete(&self) -> bool {
        self.current_length == self.full_length
    }

    pub(crate) const fn current_len(&self) -> usize {
        self.current_length as usize
    }

    pub(crate) const fn full_len(&self) -> usize {
        self.full_length as usize
    }

    /// Scalar value of a complete sequence.
    #[inline]
    pub(crate) fn get_codepoint(&self) -> u32 {
        let mut codepoint = match self.full_length {
            1 => return self.bytes[0] as u32,
            2 => self.bytes[0] ^ 0b1100_0000,
            3 => self.bytes[0] ^ 0b1110_0000,
            _ => self.bytes[0] ^ 0b1111_0000,
        } as u32;
        for &byte in &self.bytes[1..self.full_len()] {
            codepoint = (codepoint << 6) | ((byte ^ 0b10_000000) as u32);
        }
        codepoint
    }

    pub(crate) fn to_char(self) -> Option<char> {
        if !self.is_complete() {
            return None;
        }
        char::from_u32(self.get_codepoint())
    }
}
