use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::{
    classify::{classify, scan, Classification},
    error::Utf8Error,
    options::DecodeOptions,
};

/// One step of a walk over UTF-8 input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit<'a> {
    /// A well-formed code point.
    Char(char),
    /// Bytes forming one illegal run.
    Illegal(&'a [u8]),
}

impl Unit<'_> {
    /// Number of input bytes this unit covers.
    pub fn len_bytes(&self) -> usize {
        match self {
            Unit::Char(ch) => ch.len_utf8(),
            Unit::Illegal(bytes) => bytes.len(),
        }
    }
}

/// Iterator over the code points and illegal runs of a byte slice.
///
/// Each step advances by exactly the classified length, so the units cover
/// the input once, in order, with no gaps.
///
/// ```
/// use utf8clen::{Unit, Units};
///
/// let units: Vec<_> = Units::new(b"a\xC3\xA9\x80\x80b").collect();
/// assert_eq!(
///     units,
///     [Unit::Char('a'), Unit::Char('é'), Unit::Illegal(b"\x80\x80"), Unit::Char('b')]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Units<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> Units<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_options(bytes, &DecodeOptions::default())
    }

    pub fn with_options(bytes: &'a [u8], options: &DecodeOptions) -> Self {
        Self {
            bytes: options.visible(bytes),
            cursor: 0,
        }
    }

    /// Byte offset of the next unit.
    pub const fn offset(&self) -> usize {
        self.cursor
    }

    /// Bytes not yet walked.
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.cursor..]
    }
}

impl<'a> Iterator for Units<'a> {
    type Item = Unit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (bytes, start) = (self.bytes, self.cursor);
        let scanned = scan(&bytes[start..])?;
        let len = match scanned {
            Ok(sequence) => sequence.full_len(),
            Err(illegal_len) => illegal_len,
        };
        self.cursor += len;
        let span = &bytes[start..self.cursor];
        match scanned.ok().and_then(|sequence| sequence.to_char()) {
            Some(ch) => Some(Unit::Char(ch)),
            None => {
                trace!(offset = start, len, "illegal utf-8 run");
                Some(Unit::Illegal(span))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() - self.cursor;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Units<'_> {}

/// Decodes `bytes`, substituting `options.replacement` for each illegal run.
///
/// A run of any length becomes a single replacement character.
///
/// ```
/// use utf8clen::{replace_illegal, DecodeOptions};
///
/// let text = replace_illegal(b"caf\xC3\xA9 \xED\xA0\x80!", &DecodeOptions::default());
/// assert_eq!(text, "café \u{FFFD}!");
/// ```
pub fn replace_illegal(bytes: &[u8], options: &DecodeOptions) -> String {
    let mut output = String::with_capacity(bytes.len());
    for unit in Units::with_options(bytes, options) {
        match unit {
            Unit::Char(ch) => output.push(ch),
            Unit::Illegal(_) => output.push(options.replacement),
        }
    }
    output
}

/// Accepts `bytes` only if the whole slice is well-formed UTF-8.
pub fn validate(bytes: &[u8]) -> Result<(), Utf8Error> {
    let mut cursor = 0;
    while let Some(classification) = classify(bytes, cursor) {
        if let Classification::Invalid(illegal_len) = classification {
            debug!(valid_up_to = cursor, illegal_len, "rejecting utf-8 input");
            return Err(Utf8Error {
                valid_up_to: cursor,
                illegal_len,
            });
        }
        cursor += classification.width();
    }
    Ok(())
}

/// Counts the code points and illegal runs in `bytes`.
pub fn count_chars(bytes: &[u8]) -> (usize, usize) {
    Units::new(bytes).fold((0, 0), |(chars, illegal), unit| match unit {
        Unit::Char(_) => (chars + 1, illegal),
        Unit::Illegal(_) => (chars, illegal + 1),
    })
}

#[cfg(test)]
mod tests {
    use quickcheck::QuickCheck;
    use rstest::rstest;

    use super::*;

    #[test]
    fn units_walk_mixed_input() {
        let bytes = b"A\xF0\x9F\x98\x82\xC3\xF5\x80\xE2\x82\xAC";
        let mut units = Units::new(bytes);
        assert_eq!(units.next(), Some(Unit::Char('A')));
        assert_eq!(units.offset(), 1);
        assert_eq!(units.next(), Some(Unit::Char('\u{1F602}')));
        assert_eq!(units.offset(), 5);
        assert_eq!(units.next(), Some(Unit::Illegal(b"\xC3\xF5")));
        assert_eq!(units.next(), Some(Unit::Illegal(b"\x80")));
        assert_eq!(units.remaining(), b"\xE2\x82\xAC");
        assert_eq!(units.next(), Some(Unit::Char('\u{20AC}')));
        assert_eq!(units.offset(), bytes.len());
        assert_eq!(units.next(), None);
        assert_eq!(units.next(), None);
    }

    #[test]
    fn units_of_empty_input() {
        assert_eq!(Units::new(b"").next(), None);
    }

    #[test]
    fn embedded_nul_is_data_by_default() {
        let units: Vec<_> = Units::new(b"a\0b").collect();
        assert_eq!(units, [Unit::Char('a'), Unit::Char('\0'), Unit::Char('b')]);
    }

    #[test]
    fn nul_terminated_stops_at_nul() {
        let options = DecodeOptions::default().with_nul_terminated(true);
        let units: Vec<_> = Units::with_options(b"a\xC3\0\xA9b", &options).collect();
        assert_eq!(units, [Unit::Char('a'), Unit::Illegal(b"\xC3")]);
    }

    #[rstest]
    #[case::valid(b"caf\xC3\xA9", "café")]
    #[case::empty(b"", "")]
    #[case::continuation_run(b"\x80\x80\x80", "\u{FFFD}")]
    #[case::surrogate(b"a\xED\xA0\x80b", "a\u{FFFD}b")]
    #[case::truncated_tail(b"ab\xF0\x9F\x98", "ab\u{FFFD}")]
    #[case::adjacent_runs(b"\xC3\xC3\xC3", "\u{FFFD}\u{FFFD}\u{FFFD}")]
    #[case::capped_run(b"\xF4\x90\x80\x80\x80", "\u{FFFD}\u{FFFD}")]
    #[case::resync_on_ascii(b"\xE0\x80Z", "\u{FFFD}Z")]
    fn replaces_each_run_once(#[case] input: &[u8], #[case] expected: &str) {
        assert_eq!(replace_illegal(input, &DecodeOptions::default()), expected);
    }

    #[test]
    fn custom_replacement() {
        let options = DecodeOptions::default().with_replacement('?');
        assert_eq!(replace_illegal(b"x\xFFy\xC1\x81z", &options), "x?y?z");
    }

    #[test]
    fn validate_accepts_well_formed() {
        assert_eq!(validate("hello, \u{4E16}\u{754C} \u{1F602}".as_bytes()), Ok(()));
        assert_eq!(validate(b""), Ok(()));
    }

    #[test]
    fn validate_reports_first_run() {
        let err = validate(b"ok\xC3\xA9\xED\xBF\xBF\xFF").unwrap_err();
        assert_eq!(err.valid_up_to(), 4);
        assert_eq!(err.illegal_len(), 3);
        assert_eq!(
            err.to_string(),
            "invalid utf-8 sequence of 3 bytes from index 4"
        );
    }

    #[test]
    fn counts_chars_and_runs() {
        assert_eq!(count_chars(b""), (0, 0));
        assert_eq!(count_chars("a\u{E9}\u{20AC}".as_bytes()), (3, 0));
        assert_eq!(count_chars(b"a\x80\x80b\xC3"), (2, 2));
    }

    #[test]
    fn units_cover_input_exactly() {
        fn prop(bytes: Vec<u8>) -> bool {
            let mut offset = 0;
            for unit in Units::new(&bytes) {
                let len = unit.len_bytes();
                if let Unit::Illegal(span) = unit {
                    if span != &bytes[offset..offset + len] {
                        return false;
                    }
                }
                offset += len;
            }
            offset == bytes.len()
        }
        QuickCheck::new()
            .tests(2000)
            .quickcheck(prop as fn(Vec<u8>) -> bool);
    }

    #[test]
    fn validate_agrees_with_std() {
        fn prop(bytes: Vec<u8>) -> bool {
            match (validate(&bytes), std::str::from_utf8(&bytes)) {
                (Ok(()), Ok(_)) => true,
                (Err(ours), Err(theirs)) => ours.valid_up_to() == theirs.valid_up_to(),
                _ => false,
            }
        }
        QuickCheck::new()
            .tests(2000)
            .quickcheck(prop as fn(Vec<u8>) -> bool);
    }

    #[test]
    fn well_formed_text_is_unchanged() {
        #[allow(clippy::needless_pass_by_value)]
        fn prop(text: String) -> bool {
            replace_illegal(text.as_bytes(), &DecodeOptions::default()) == text
                && count_chars(text.as_bytes()) == (text.chars().count(), 0)
        }
        QuickCheck::new()
            .tests(1000)
            .quickcheck(prop as fn(String) -> bool);
    }
}
