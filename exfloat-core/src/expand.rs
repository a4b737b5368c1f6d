use rug::Integer as BigInt;

use crate::decompose::{Decomposed, NumberKind};
use crate::error::Error;

/// Shift out trailing zero bits while the binary exponent is negative;
/// this keeps the power-of-five blowup below as small as possible.
fn drop_trailing_zeros(mut man: BigInt, mut bin_exp: i32) -> (BigInt, i32) {
    if bin_exp >= 0 {
        return (man, bin_exp);
    }
    let adjust = (man.find_one(0).unwrap_or(0) as i32).min(-bin_exp);
    if adjust > 0 {
        man >>= adjust as u32;
        bin_exp += adjust;
    }
    (man, bin_exp)
}

/// Turn `man * 2^bin_exp` with a negative exponent into an exact decimal
/// fraction: `man * 2^-n = (man * 5^n) * 10^-n`. Binary fractions always
/// terminate in decimal, so no precision is lost.
fn to_decimal_fraction(man: BigInt, bin_exp: i32) -> (BigInt, i32, i32) {
    if bin_exp >= 0 {
        return (man, bin_exp, 0);
    }
    let scaled = man * BigInt::from(BigInt::u_pow_u(5, -bin_exp as u32));
    (scaled, 0, bin_exp)
}

/// Renders the exact decimal expansion of a decomposed value. Only the
/// `Zero`, `Denormal` and `Normal` kinds carry a value to expand.
pub fn to_decimal_string(value: &Decomposed) -> Result<String, Error> {
    match value.kind() {
        NumberKind::Zero | NumberKind::Denormal | NumberKind::Normal => (),
        kind => return Err(Error::Unrepresentable(kind)),
    }

    if *value.coefficient() == 0 {
        return Ok(if value.negative() {
            "-0".to_owned()
        } else {
            "0".to_owned()
        });
    }

    let (man, bin_exp) = drop_trailing_zeros(value.coefficient().clone(), value.exponent());
    let (man, bin_exp, dec_exp) = to_decimal_fraction(man, bin_exp);
    let man = man << bin_exp as u32;

    // Split integer and fractional digits with one exact division; the
    // fraction is left-padded with zeros out to the full 10^-dec_exp scale.
    let mut result = if dec_exp < 0 {
        let factor = BigInt::from(BigInt::u_pow_u(10, -dec_exp as u32));
        let (quotient, remainder) = man.div_rem(factor);
        let mut s = quotient.to_string();
        if remainder != 0 {
            let fraction = remainder.to_string();
            s.push('.');
            for _ in fraction.len()..-dec_exp as usize {
                s.push('0');
            }
            s.push_str(&fraction);
        }
        s
    } else {
        man.to_string()
    };

    if value.negative() {
        result.insert(0, '-');
    }

    Ok(result)
}
