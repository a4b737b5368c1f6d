use exfloat_format::FloatFormat;

use rug::Integer as BigInt;

use crate::error::Error;

/// A raw encoding of exactly `format.size()` bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub struct BitPattern {
    format: FloatFormat,
    value: BigInt,
}

impl BitPattern {
    pub fn new(format: FloatFormat, value: BigInt) -> Result<Self, Error> {
        if value < 0 || value.significant_bits() > format.size() {
            return Err(Error::PatternTooWide {
                bits: format.size(),
            });
        }
        Ok(Self { format, value })
    }

    /// Parses a hex string; the digit count implies the width (8, 16, or 20
    /// digits for 32, 64, or 80 bits). A `0x`/`0X` prefix is accepted.
    pub fn from_hex(input: &str) -> Result<Self, Error> {
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidHex);
        }

        let format = FloatFormat::from_bits(digits.len() as u32 * 4)?;
        let value = BigInt::from_str_radix(digits, 16).map_err(|_| Error::InvalidHex)?;

        Self::new(format, value)
    }

    /// Lower-case hex, fixed width of `size / 4` digits, most significant
    /// nybble first.
    pub fn to_hex(&self) -> String {
        let width = (self.format.size() / 4) as usize;
        let digits = self.value.to_string_radix(16);
        format!("{:0>width$}", digits, width = width)
    }

    pub fn format(&self) -> &FloatFormat {
        &self.format
    }

    pub fn as_raw(&self) -> &BigInt {
        &self.value
    }

    pub fn bit(&self, index: u32) -> bool {
        self.value.get_bit(index)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_width_implied_by_digit_count() {
        assert_eq!(BitPattern::from_hex("0x00000000").unwrap().format().size(), 32);
        assert_eq!(
            BitPattern::from_hex("0x0000000000000000").unwrap().format().size(),
            64
        );
        assert_eq!(
            BitPattern::from_hex("0x00000000000000000000").unwrap().format().size(),
            80
        );

        // 28, 36, 104, and 128 bits are not encodings we know.
        assert!(BitPattern::from_hex("0x0000000").is_err());
        assert!(BitPattern::from_hex("0x000000000").is_err());
        assert!(BitPattern::from_hex("0x00000000000000000000000000").is_err());
        assert!(BitPattern::from_hex("0x00000000000000000000000000000000").is_err());
    }

    #[test]
    fn test_rejects_junk() {
        assert!(matches!(BitPattern::from_hex("0x"), Err(Error::InvalidHex)));
        assert!(matches!(
            BitPattern::from_hex("0xzzzzzzzz"),
            Err(Error::InvalidHex)
        ));
        assert!(matches!(
            BitPattern::from_hex("-0x0000001"),
            Err(Error::InvalidHex)
        ));
    }

    #[test]
    fn test_value_must_fit() {
        let wide = BigInt::from(1) << 32u32;
        assert!(matches!(
            BitPattern::new(FloatFormat::float4(), wide),
            Err(Error::PatternTooWide { bits: 32 })
        ));

        let max = (BigInt::from(1) << 32u32) - 1;
        assert!(BitPattern::new(FloatFormat::float4(), max).is_ok());
    }

    #[test]
    fn test_hex_round_trip() {
        let p = BitPattern::from_hex("0x7FF8000000000000").unwrap();
        assert_eq!(p.to_hex(), "7ff8000000000000");

        let q = BitPattern::from_hex("0x00000001").unwrap();
        assert_eq!(q.to_hex(), "00000001");
        assert!(q.bit(0));
        assert!(!q.bit(1));
    }
}
