pub use exfloat_core as core;
pub use exfloat_format as format;

pub use exfloat_core::{
    parse_decimal, to_decimal_string, BitPattern, DecimalLiteral, Decomposed, Error, FloatFormat,
    FloatFormatOps, FloatInfo, NumberKind,
};
