use exfloat_format::FloatFormat;

use std::fmt;

use rug::Integer as BigInt;

use crate::pattern::BitPattern;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Deserialize, serde::Serialize)]
pub enum NumberKind {
    Zero,
    Denormal,
    Normal,
    Infinity,
    SignalingNan,
    QuietNan,
    Indefinite,
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberKind::Zero => write!(f, "zero"),
            NumberKind::Denormal => write!(f, "denormal"),
            NumberKind::Normal => write!(f, "normal"),
            NumberKind::Infinity => write!(f, "infinity"),
            NumberKind::SignalingNan => write!(f, "signaling NaN"),
            NumberKind::QuietNan => write!(f, "quiet NaN"),
            NumberKind::Indefinite => write!(f, "indefinite"),
        }
    }
}

/// An encoding split into its exact mathematical parts. For `Zero`,
/// `Denormal` and `Normal` kinds the value is
/// `±coefficient * 2^exponent`; the remaining kinds carry no exact value
/// and only the classification is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub struct Decomposed {
    negative: bool,
    kind: NumberKind,
    coefficient: BigInt,
    exponent: i32,
}

impl Decomposed {
    pub(crate) fn from_parts(
        negative: bool,
        kind: NumberKind,
        coefficient: BigInt,
        exponent: i32,
    ) -> Self {
        Self {
            negative,
            kind,
            coefficient,
            exponent,
        }
    }

    pub fn negative(&self) -> bool {
        self.negative
    }

    pub fn kind(&self) -> NumberKind {
        self.kind
    }

    pub fn coefficient(&self) -> &BigInt {
        &self.coefficient
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    pub fn is_zero(&self) -> bool {
        matches!(self.kind, NumberKind::Zero)
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self.kind, NumberKind::Infinity)
    }

    pub fn is_nan(&self) -> bool {
        matches!(
            self.kind,
            NumberKind::SignalingNan | NumberKind::QuietNan | NumberKind::Indefinite
        )
    }
}

pub(crate) trait FieldOps {
    fn extract_sign(&self, val: &BigInt) -> bool;
    fn extract_exponent(&self, val: &BigInt) -> i32;
    fn extract_fractional(&self, val: &BigInt) -> BigInt;
}

impl FieldOps for FloatFormat {
    fn extract_sign(&self, val: &BigInt) -> bool {
        val.get_bit(self.sign_pos())
    }

    fn extract_exponent(&self, val: &BigInt) -> i32 {
        let m: BigInt = BigInt::from(val >> self.frac_size()) & 0xffff_ffffu32;
        m.to_u32().unwrap() as i32 & self.exp_max()
    }

    fn extract_fractional(&self, val: &BigInt) -> BigInt {
        let mask = (BigInt::from(1) << self.frac_size()) - 1;
        BigInt::from(val & &mask)
    }
}

// The order of the checks matters: the extended-format rules below only
// apply once the all-ones and all-zeros exponent cases are excluded.
pub(crate) fn classify(format: &FloatFormat, exponent: i32, mantissa: &BigInt) -> NumberKind {
    let frac_size = format.frac_size();

    if exponent == format.exp_max() {
        if *mantissa == 0 {
            return NumberKind::Infinity;
        }

        let top_bit = mantissa.get_bit(frac_size - 1);
        if format.j_bit_implied() {
            return if top_bit {
                NumberKind::QuietNan
            } else {
                NumberKind::SignalingNan
            };
        }

        // Extended format: the stored lead bit refines the split further.
        if !top_bit {
            return NumberKind::SignalingNan;
        }

        let low_bit = mantissa.find_one(0).unwrap_or(0);
        if mantissa.get_bit(frac_size - 2) {
            if low_bit < frac_size - 2 {
                NumberKind::QuietNan
            } else {
                NumberKind::Indefinite
            }
        } else if low_bit < frac_size - 1 {
            NumberKind::SignalingNan
        } else {
            NumberKind::Infinity
        }
    } else if exponent == 0 {
        if *mantissa == 0 {
            NumberKind::Zero
        } else {
            NumberKind::Denormal
        }
    } else if !format.j_bit_implied() && !mantissa.get_bit(frac_size - 1) {
        // Unnormal extended value.
        NumberKind::Denormal
    } else {
        NumberKind::Normal
    }
}

impl BitPattern {
    pub fn decode(&self) -> Decomposed {
        let format = self.format();

        let negative = format.extract_sign(self.as_raw());
        let exponent = format.extract_exponent(self.as_raw());
        let mantissa = format.extract_fractional(self.as_raw());

        let kind = classify(format, exponent, &mantissa);

        let (coefficient, exponent) = match kind {
            NumberKind::Zero | NumberKind::Denormal => (mantissa, exponent),
            NumberKind::Normal => {
                let offset = format.mantissa_offset();
                let mut coefficient = mantissa;
                if format.j_bit_implied() {
                    coefficient.set_bit(offset, true);
                }
                (coefficient, exponent - format.bias() - offset as i32)
            }
            _ => (BigInt::new(), 0),
        };

        Decomposed::from_parts(negative, kind, coefficient, exponent)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn kind_of(hex: &str) -> NumberKind {
        BitPattern::from_hex(hex).unwrap().decode().kind()
    }

    #[test]
    fn test_classify_float4() {
        assert_eq!(kind_of("0x00000000"), NumberKind::Zero);
        assert_eq!(kind_of("0x007fffff"), NumberKind::Denormal);
        assert_eq!(kind_of("0x00400000"), NumberKind::Denormal);
        assert_eq!(kind_of("0x00000001"), NumberKind::Denormal);
        assert_eq!(kind_of("0x7f800000"), NumberKind::Infinity);
        assert_eq!(kind_of("0x7fc00000"), NumberKind::QuietNan);
        assert_eq!(kind_of("0x7fffffff"), NumberKind::QuietNan);
        assert_eq!(kind_of("0x7fbfffff"), NumberKind::SignalingNan);
        assert_eq!(kind_of("0x7f800001"), NumberKind::SignalingNan);
        assert_eq!(kind_of("0x40000000"), NumberKind::Normal);
        assert_eq!(kind_of("0x00800000"), NumberKind::Normal);
        assert_eq!(kind_of("0x3bffffff"), NumberKind::Normal);
        assert_eq!(kind_of("0x7f7fffff"), NumberKind::Normal);
    }

    #[test]
    fn test_classify_float8() {
        assert_eq!(kind_of("0x0000000000000000"), NumberKind::Zero);
        assert_eq!(kind_of("0x000fffffffffffff"), NumberKind::Denormal);
        assert_eq!(kind_of("0x0008000000000000"), NumberKind::Denormal);
        assert_eq!(kind_of("0x0000000000000001"), NumberKind::Denormal);
        assert_eq!(kind_of("0x7ff0000000000000"), NumberKind::Infinity);
        assert_eq!(kind_of("0x7ff8000000000000"), NumberKind::QuietNan);
        assert_eq!(kind_of("0x7fffffffffffffff"), NumberKind::QuietNan);
        assert_eq!(kind_of("0x7ff0000000000001"), NumberKind::SignalingNan);
        assert_eq!(kind_of("0x7ff7ffffffffffff"), NumberKind::SignalingNan);
        assert_eq!(kind_of("0x7770000000000000"), NumberKind::Normal);
        assert_eq!(kind_of("0x001fffffffffffff"), NumberKind::Normal);
        assert_eq!(kind_of("0x4008000000000000"), NumberKind::Normal);
    }

    #[test]
    fn test_classify_float10() {
        assert_eq!(kind_of("0x00000000000000000000"), NumberKind::Zero);
        assert_eq!(kind_of("0x00007fffffffffffffff"), NumberKind::Denormal);
        assert_eq!(kind_of("0x00004aaaaaaaaaaaaaaa"), NumberKind::Denormal);
        assert_eq!(kind_of("0x00008000000000000000"), NumberKind::Denormal);
        assert_eq!(kind_of("0x0000ffffffffffffffff"), NumberKind::Denormal);
        assert_eq!(kind_of("0x7fff0000000000000000"), NumberKind::Infinity);
        assert_eq!(kind_of("0x7fff3fffffffffffffff"), NumberKind::SignalingNan);
        assert_eq!(kind_of("0x7fff4000000000000000"), NumberKind::SignalingNan);
        // Pseudo-infinity: stored lead bit set, nothing below it.
        assert_eq!(kind_of("0x7fff8000000000000000"), NumberKind::Infinity);
        assert_eq!(kind_of("0x7fffbfffffffffffffff"), NumberKind::SignalingNan);
        assert_eq!(kind_of("0x7fff8000000000000001"), NumberKind::SignalingNan);
        assert_eq!(kind_of("0x7fffc000000000000000"), NumberKind::Indefinite);
        assert_eq!(kind_of("0x7fffffffffffffffffff"), NumberKind::QuietNan);
        assert_eq!(kind_of("0x7fffc000000000000001"), NumberKind::QuietNan);
        // Unnormals: non-zero exponent but the stored lead bit is clear.
        assert_eq!(kind_of("0x77770000000000000000"), NumberKind::Denormal);
        assert_eq!(kind_of("0x44447fffffffffffffff"), NumberKind::Denormal);
        assert_eq!(kind_of("0x33338000000000000000"), NumberKind::Normal);
        assert_eq!(kind_of("0x3333ffffffffffffffff"), NumberKind::Normal);
    }

    #[test]
    fn test_sign_extraction() {
        assert!(!BitPattern::from_hex("0x00000000").unwrap().decode().negative());
        assert!(BitPattern::from_hex("0x80000000").unwrap().decode().negative());
        assert!(!BitPattern::from_hex("0x7770000000000000").unwrap().decode().negative());
        assert!(BitPattern::from_hex("0xf770000000000000").unwrap().decode().negative());
        assert!(!BitPattern::from_hex("0x3333ffffffffffffffff").unwrap().decode().negative());
        assert!(BitPattern::from_hex("0xb333ffffffffffffffff").unwrap().decode().negative());
    }

    #[test]
    fn test_exact_value_of_one() {
        let one = BitPattern::from_hex("0x3ff0000000000000").unwrap().decode();
        assert_eq!(one.kind(), NumberKind::Normal);
        assert!(!one.negative());
        assert_eq!(*one.coefficient(), BigInt::from(1u64 << 52));
        assert_eq!(one.exponent(), -52);
    }

    #[test]
    fn test_exact_value_keeps_raw_exponent_for_denormals() {
        let d = BitPattern::from_hex("0x00000001").unwrap().decode();
        assert_eq!(d.kind(), NumberKind::Denormal);
        assert_eq!(*d.coefficient(), 1);
        assert_eq!(d.exponent(), 0);
    }

    #[test]
    fn test_exact_value_extended_keeps_stored_lead_bit() {
        // 10.5 in the extended format.
        let v = BitPattern::from_hex("0x4002a800000000000000").unwrap().decode();
        assert_eq!(v.kind(), NumberKind::Normal);
        assert_eq!(*v.coefficient(), BigInt::from(0xa800000000000000u64));
        assert_eq!(v.exponent(), 16386 - 16383 - 63);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NumberKind::QuietNan.to_string(), "quiet NaN");
        assert_eq!(NumberKind::Indefinite.to_string(), "indefinite");
    }
}
