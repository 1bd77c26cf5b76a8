/// Configuration for the decoding driver.
///
/// # Default
///
/// Illegal runs are replaced with U+FFFD and embedded NUL bytes are data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Character substituted for each illegal run by
    /// [`replace_illegal`](crate::replace_illegal).
    ///
    /// # Default
    ///
    /// `'\u{FFFD}'`
    pub replacement: char,

    /// Whether the first NUL byte ends the input.
    ///
    /// When `true` the driver stops at the first `0x00`, the way a
    /// NUL-terminated C string is read. When `false` NUL is an ordinary ASCII
    /// character.
    ///
    /// # Default
    ///
    /// `false`
    pub nul_terminated: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            replacement: char::REPLACEMENT_CHARACTER,
            nul_terminated: false,
        }
    }
}

impl DecodeOptions {
    #[must_use]
    pub const fn with_replacement(mut self, replacement: char) -> Self {
        self.replacement = replacement;
        self
    }

    #[must_use]
    pub const fn with_nul_terminated(mut self, nul_terminated: bool) -> Self {
        self.nul_terminated = nul_terminated;
        self
    }

    /// The part of `bytes` the driver reads under these options.
    pub(crate) fn visible<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        if !self.nul_terminated {
            return bytes;
        }
        match bytes.iter().position(|&byte| byte == 0) {
            Some(end) => &bytes[..end],
            None => bytes,
        }
    }
}
