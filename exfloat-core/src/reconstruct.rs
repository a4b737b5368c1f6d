use exfloat_format::FloatFormat;

use std::cmp::Ordering;

use rug::Integer as BigInt;

use crate::error::Error;
use crate::literal::DecimalLiteral;
use crate::pattern::BitPattern;

pub trait FloatFormatOps {
    /// Finds the normalized `(coefficient, exponent)` pair whose value is
    /// closest to `mantissa * 10^exponent`, with ties broken to the even
    /// coefficient. The coefficient lands in `[2^(digits-1), 2^digits)`.
    fn nearest(&self, mantissa: &BigInt, exponent: i64) -> Result<(BigInt, i32), Error>;

    /// Produces the encoding of the representable value closest to the
    /// literal. Magnitudes past the format's exponent range are an error;
    /// this never falls back to a subnormal or infinite encoding.
    fn encode(&self, literal: &DecimalLiteral) -> Result<BitPattern, Error>;
}

fn coefficient_min(format: &FloatFormat) -> BigInt {
    BigInt::from(1) << (format.digits() - 1)
}

fn coefficient_max(format: &FloatFormat) -> BigInt {
    BigInt::from(1) << format.digits()
}

/// Smallest and largest binary exponents a normalized coefficient can
/// carry in this format.
fn exponent_limits(format: &FloatFormat) -> (i64, i64) {
    let offset = format.bias() as i64 + format.mantissa_offset() as i64;
    (1 - offset, format.exp_max() as i64 - 1 - offset)
}

// Rejects literals whose magnitude certainly cannot fit, before any large
// power of ten is materialized. Uses 3 < log2(10) < 4, so only certain
// failures are caught here; borderline cases run the full loop and are
// checked exactly against the exponent field at encode time.
fn check_magnitude(format: &FloatFormat, mantissa: &BigInt, exponent: i64) -> Result<(), Error> {
    let (lo, hi) = exponent_limits(format);
    let bits = mantissa.significant_bits() as i64;
    let digits = format.digits() as i64;

    let out_of_range = if exponent >= 0 {
        bits.saturating_add(exponent.saturating_mul(3))
            .saturating_sub(1 + digits)
            > hi.saturating_add(4)
    } else {
        bits.saturating_add(exponent.saturating_mul(3))
            .saturating_sub(digits)
            < lo.saturating_sub(4)
    };

    if out_of_range {
        log::debug!(
            "literal with {} mantissa bits and decimal exponent {} cannot fit a {}-bit encoding",
            bits,
            exponent,
            format.size()
        );
        return Err(Error::ExponentOutOfRange {
            bits: format.size(),
        });
    }

    Ok(())
}

fn next_float(format: &FloatFormat, coefficient: BigInt, k: i32) -> (BigInt, i32) {
    if coefficient == coefficient_max(format) - 1u32 {
        // Incrementing would spill out of the coefficient range; the
        // value renormalizes to the lead coefficient of the next exponent.
        (coefficient_min(format), k + 1)
    } else {
        (coefficient + 1u32, k)
    }
}

fn round_ratio(format: &FloatFormat, u: BigInt, v: BigInt, k: i32) -> (BigInt, i32) {
    let (q, r) = u.div_rem(v.clone());
    let rest = v - &r;
    match r.cmp(&rest) {
        Ordering::Less => (q, k),
        Ordering::Greater => next_float(format, q, k),
        Ordering::Equal => {
            if q.is_even() {
                (q, k)
            } else {
                next_float(format, q, k)
            }
        }
    }
}

pub(crate) fn pack(
    format: &FloatFormat,
    negative: bool,
    exponent_field: i32,
    frac: BigInt,
) -> Result<BitPattern, Error> {
    let mut value = frac | (BigInt::from(exponent_field) << format.frac_size());
    if negative {
        value.set_bit(format.sign_pos(), true);
    }
    BitPattern::new(format.clone(), value)
}

impl FloatFormatOps for FloatFormat {
    fn nearest(&self, mantissa: &BigInt, exponent: i64) -> Result<(BigInt, i32), Error> {
        assert!(*mantissa != 0, "zero has no normalized coefficient");

        check_magnitude(self, mantissa, exponent)?;

        let scale = u32::try_from(exponent.unsigned_abs()).map_err(|_| {
            Error::ExponentOutOfRange {
                bits: self.size(),
            }
        })?;

        let (mut u, mut v) = if exponent < 0 {
            (mantissa.clone(), BigInt::from(BigInt::u_pow_u(10, scale)))
        } else {
            (
                BigInt::from(BigInt::u_pow_u(10, scale)) * mantissa,
                BigInt::from(1),
            )
        };

        let coeff_lo = coefficient_min(self);
        let coeff_hi = coefficient_max(self);
        let mut k = 0i32;

        // Scale u against v by powers of two until the quotient lands in
        // the coefficient range, then round on the exact remainder.
        loop {
            let x = BigInt::from(&u / &v);
            if x < coeff_lo {
                u <<= 1;
                k -= 1;
            } else if x >= coeff_hi {
                v <<= 1;
                k += 1;
            } else {
                return Ok(round_ratio(self, u, v, k));
            }
        }
    }

    fn encode(&self, literal: &DecimalLiteral) -> Result<BitPattern, Error> {
        if *literal.mantissa() == 0 {
            return pack(self, literal.negative(), 0, BigInt::new());
        }

        let (mut coefficient, k) = self.nearest(literal.mantissa(), literal.exponent())?;

        let field = k as i64 + self.bias() as i64 + self.mantissa_offset() as i64;
        if field < 1 || field >= self.exp_max() as i64 {
            return Err(Error::ExponentOutOfRange {
                bits: self.size(),
            });
        }

        if self.j_bit_implied() {
            coefficient.set_bit(self.mantissa_offset(), false);
        }

        pack(self, literal.negative(), field as i32, coefficient)
    }
}
