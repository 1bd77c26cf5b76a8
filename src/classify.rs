use crate::utf8sequence::Utf8Sequence;

/// Outcome of classifying the bytes at one cursor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// A well-formed code point of this many bytes (1 to 4).
    Valid(usize),
    /// A malformed sequence; this many leading bytes form one illegal run.
    Invalid(usize),
}

impl Classification {
    /// Length of the valid sequence, or 0 for an illegal run.
    pub const fn valid_len(self) -> usize {
        match self {
            Self::Valid(len) => len,
            Self::Invalid(_) => 0,
        }
    }

    /// Length of the illegal run, or 0 for a valid sequence.
    pub const fn illegal_len(self) -> usize {
        match self {
            Self::Valid(_) => 0,
            Self::Invalid(len) => len,
        }
    }

    /// Number of bytes a driver advances past this classification.
    pub const fn width(self) -> usize {
        match self {
            Self::Valid(len) | Self::Invalid(len) => len,
        }
    }

    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Classifies the bytes of `buffer` starting at `cursor`.
///
/// Returns `None` only when `cursor` is at or past the end of `buffer`. At most
/// the four bytes from `cursor` on are inspected to decide validity; a
/// sequence cut short by the end of the buffer is reported as an illegal run.
///
/// An illegal run never swallows a byte that could begin a fresh sequence, so
/// a caller that skips `Invalid(k)` bytes resynchronizes on the next
/// plausible character.
///
/// ```
/// use utf8clen::{classify, Classification};
///
/// assert_eq!(classify(b"\xE2\x82\xAC", 0), Some(Classification::Valid(3)));
/// assert_eq!(classify(b"\xED\xA0\x80", 0), Some(Classification::Invalid(3)));
/// assert_eq!(classify(b"A\xC3", 1), Some(Classification::Invalid(1)));
/// assert_eq!(classify(b"A", 1), None);
/// ```
pub fn classify(buffer: &[u8], cursor: usize) -> Option<Classification> {
    let scanned = scan(buffer.get(cursor..)?)?;
    Some(match scanned {
        Ok(sequence) => Classification::Valid(sequence.full_len()),
        Err(illegal_len) => Classification::Invalid(illegal_len),
    })
}

/// Reads the sequence opening `bytes`, or the length of its illegal run.
pub(crate) fn scan(bytes: &[u8]) -> Option<Result<Utf8Sequence, usize>> {
    let &lead = bytes.first()?;
    let Some(mut sequence) = Utf8Sequence::build(lead) else {
        return Some(Err(illegal_run_len(bytes, usize::MAX)));
    };
    while !sequence.is_complete() {
        match bytes.get(sequence.current_len()) {
            Some(&byte) if sequence.add_point(byte) => {}
            _ => return Some(Err(illegal_run_len(bytes, sequence.full_len()))),
        }
    }
    Some(Ok(sequence))
}

/// ASCII or a lead byte of a well-formed multi-byte sequence.
#[inline]
const fn is_first_byte(byte: u8) -> bool {
    matches!(byte, 0x00..=0x7F | 0xC2..=0xF4)
}

/// Length of the illegal run opening `bytes`, at most `cap` bytes long.
fn illegal_run_len(bytes: &[u8], cap: usize) -> usize {
    1 + bytes
        .iter()
        .skip(1)
        .take(cap - 1)
        .take_while(|&&byte| !is_first_byte(byte))
        .count()
}
