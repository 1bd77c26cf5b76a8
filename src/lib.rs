//! UTF-8 code point length and illegal-run classification.
//!
//! [`classify`] looks at the bytes under a cursor and reports either the
//! length of the well-formed code point found there or the length of the
//! illegal run a caller should skip. Validation follows Table 3-7 of the
//! Unicode core specification, so overlong forms, surrogates and values past
//! U+10FFFF are all rejected.
//!
//! [`Units`], [`replace_illegal`], [`validate`] and [`count_chars`] are
//! drivers built on that single primitive.

mod classify;
mod decode;
mod error;
mod options;
mod utf8sequence;

pub use classify::{classify, Classification};
pub use decode::{count_chars, replace_illegal, validate, Unit, Units};
pub use error::Utf8Error;
pub use options::DecodeOptions;
