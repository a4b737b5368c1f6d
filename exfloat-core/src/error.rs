use crate::decompose::NumberKind;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] exfloat_format::Error),
    #[error("malformed decimal literal: {0}")]
    MalformedLiteral(&'static str),
    #[error("hex pattern contains a non-hexadecimal digit")]
    InvalidHex,
    #[error("bit pattern does not fit in {bits} bits")]
    PatternTooWide { bits: u32 },
    #[error("{0} carries no exact value to expand")]
    Unrepresentable(NumberKind),
    #[error("value magnitude is outside the exponent range of the {bits}-bit format")]
    ExponentOutOfRange { bits: u32 },
    #[error("explicit width {requested} does not agree with implied width {implied}")]
    WidthMismatch { requested: u32, implied: u32 },
    #[error("non-hex input requires an explicit width")]
    MissingWidth,
}
