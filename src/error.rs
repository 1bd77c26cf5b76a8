use thiserror::Error;

/// Input rejected by [`validate`](crate::validate).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid utf-8 sequence of {illegal_len} bytes from index {valid_up_to}")]
pub struct Utf8Error {
    pub(crate) valid_up_to: usize,
    pub(crate) illegal_len: usize,
}

impl Utf8Error {
    /// Length of the well-formed prefix before the first illegal run.
    pub const fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Length of the first illegal run.
    pub const fn illegal_len(&self) -> usize {
        self.illegal_len
    }
}
