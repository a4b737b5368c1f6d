use rug::Integer as BigInt;

use crate::error::Error;

/// An exact decimal value `±mantissa * 10^exponent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub struct DecimalLiteral {
    negative: bool,
    mantissa: BigInt,
    exponent: i64,
}

impl DecimalLiteral {
    pub fn negative(&self) -> bool {
        self.negative
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    pub fn exponent(&self) -> i64 {
        self.exponent
    }
}

/// Tokenizes a decimal literal: optional sign, digits, optional `.` and
/// fraction digits, optional `e`/`E` exponent with its own optional sign.
/// Thousands separators (`,`) are ignored wherever they appear.
pub fn parse_decimal(input: &str) -> Result<DecimalLiteral, Error> {
    let mut negative = false;
    let mut seen_sign = false;
    let mut seen_point = false;
    let mut seen_digits = false;
    let mut mantissa = BigInt::new();
    let mut places = 0i64;

    let mut in_exponent = false;
    let mut exp_negative = false;
    let mut exp_seen_sign = false;
    let mut exp_seen_digits = false;
    let mut exponent = 0i64;

    for c in input.chars() {
        match c {
            ',' => continue,
            '+' | '-' if !in_exponent => {
                if seen_sign || seen_digits || seen_point {
                    return Err(Error::MalformedLiteral("misplaced sign"));
                }
                seen_sign = true;
                negative = c == '-';
            }
            '+' | '-' => {
                if exp_seen_sign || exp_seen_digits {
                    return Err(Error::MalformedLiteral("misplaced exponent sign"));
                }
                exp_seen_sign = true;
                exp_negative = c == '-';
            }
            '.' => {
                if in_exponent {
                    return Err(Error::MalformedLiteral("decimal point in exponent"));
                }
                if seen_point {
                    return Err(Error::MalformedLiteral("repeated decimal point"));
                }
                seen_point = true;
            }
            '0'..='9' => {
                let digit = c as u32 - '0' as u32;
                if in_exponent {
                    exp_seen_digits = true;
                    // Saturates; nothing this large survives the range check.
                    exponent = exponent.saturating_mul(10).saturating_add(digit as i64);
                } else {
                    seen_digits = true;
                    mantissa *= 10u32;
                    mantissa += digit;
                    if seen_point {
                        places += 1;
                    }
                }
            }
            'e' | 'E' => {
                if in_exponent {
                    return Err(Error::MalformedLiteral("repeated exponent marker"));
                }
                if !seen_digits {
                    return Err(Error::MalformedLiteral("exponent marker without digits"));
                }
                in_exponent = true;
            }
            _ => return Err(Error::MalformedLiteral("unexpected character")),
        }
    }

    if !seen_digits {
        return Err(Error::MalformedLiteral("no digits"));
    }
    if in_exponent && !exp_seen_digits {
        return Err(Error::MalformedLiteral("empty exponent"));
    }

    if exp_negative {
        exponent = -exponent;
    }

    Ok(DecimalLiteral {
        negative,
        mantissa,
        exponent: exponent.saturating_sub(places),
    })
}
