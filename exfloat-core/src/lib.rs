pub use exfloat_format::FloatFormat;

pub mod decompose;
pub mod error;
pub mod expand;
pub mod info;
pub mod literal;
pub mod pattern;
pub mod reconstruct;

pub use decompose::{Decomposed, NumberKind};
pub use error::Error;
pub use expand::to_decimal_string;
pub use info::FloatInfo;
pub use literal::{parse_decimal, DecimalLiteral};
pub use pattern::BitPattern;
pub use reconstruct::FloatFormatOps;
