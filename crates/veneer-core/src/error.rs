use thiserror::Error;

use crate::skin::HintKey;

#[derive(Debug, Error, PartialEq)]
pub enum SkinError {
    /// A hint was registered under one aspect with a value of another
    /// aspect's type. The typed accessors log this and fall back to the
    /// aspect's default; it never propagates to control code.
    #[error("skin hint {key:?}: expected a {expected} value, found {found}")]
    HintTypeMismatch {
        key: HintKey,
        expected: &'static str,
        found: &'static str,
    },
}
