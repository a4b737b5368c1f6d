use exfloat_format::FloatFormat;

use rug::Integer as BigInt;

use crate::decompose::{Decomposed, NumberKind};
use crate::error::Error;
use crate::expand;
use crate::literal::parse_decimal;
use crate::pattern::BitPattern;
use crate::reconstruct::{pack, FloatFormatOps};

/// One-stop analysis of a float given as either a hex-encoded bit pattern
/// or a decimal literal.
///
/// Hex input (`0x` prefix) implies its own width from the digit count; an
/// explicit width, when given, must agree. Decimal input always needs an
/// explicit width and is rounded to the nearest representable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatInfo {
    format: FloatFormat,
    value: Decomposed,
}

impl FloatInfo {
    pub fn new(input: &str, bits: Option<u32>) -> Result<Self, Error> {
        if input.starts_with("0x") || input.starts_with("0X") {
            let pattern = BitPattern::from_hex(input)?;
            if let Some(requested) = bits {
                if requested != pattern.format().size() {
                    return Err(Error::WidthMismatch {
                        requested,
                        implied: pattern.format().size(),
                    });
                }
            }
            Ok(Self::from_pattern(&pattern))
        } else {
            let requested = bits.ok_or(Error::MissingWidth)?;
            let format = FloatFormat::from_bits(requested)?;
            let literal = parse_decimal(input)?;
            let pattern = format.encode(&literal)?;
            Ok(Self::from_pattern(&pattern))
        }
    }

    pub fn from_pattern(pattern: &BitPattern) -> Self {
        Self {
            format: pattern.format().clone(),
            value: pattern.decode(),
        }
    }

    pub fn format(&self) -> &FloatFormat {
        &self.format
    }

    pub fn decomposed(&self) -> &Decomposed {
        &self.value
    }

    pub fn negative(&self) -> bool {
        self.value.negative()
    }

    pub fn kind(&self) -> NumberKind {
        self.value.kind()
    }

    pub fn coefficient(&self) -> &BigInt {
        self.value.coefficient()
    }

    pub fn exponent(&self) -> i32 {
        self.value.exponent()
    }

    /// The exact decimal expansion of the value; fails for the kinds that
    /// carry none.
    pub fn to_decimal_string(&self) -> Result<String, Error> {
        expand::to_decimal_string(&self.value)
    }

    /// Re-assembles the encoding this decomposition came from (or would
    /// come from); only the kinds with an exact value can be packed.
    pub fn to_bit_pattern(&self) -> Result<BitPattern, Error> {
        match self.value.kind() {
            NumberKind::Zero | NumberKind::Denormal => pack(
                &self.format,
                self.value.negative(),
                self.value.exponent(),
                self.value.coefficient().clone(),
            ),
            NumberKind::Normal => {
                let field = self.value.exponent() as i64
                    + self.format.bias() as i64
                    + self.format.mantissa_offset() as i64;
                if field < 1 || field >= self.format.exp_max() as i64 {
                    return Err(Error::ExponentOutOfRange {
                        bits: self.format.size(),
                    });
                }
                let mut frac = self.value.coefficient().clone();
                if self.format.j_bit_implied() {
                    frac.set_bit(self.format.mantissa_offset(), false);
                }
                pack(&self.format, self.value.negative(), field as i32, frac)
            }
            kind => Err(Error::Unrepresentable(kind)),
        }
    }
}
