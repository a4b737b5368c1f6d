use crate::error::Error;

/// Encoding constants for one supported binary floating point format.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Deserialize, serde::Serialize)]
pub struct FloatFormat {
    size: u32,
    digits: u32,
    sign_pos: u32,
    frac_size: u32,
    exp_size: u32,
    exp_max: i32,
    bias: i32,
    max_exponent: i32,
    j_bit_implied: bool,
}

impl FloatFormat {
    pub const fn float4() -> Self {
        FloatFormat {
            size: 32,
            digits: 24,
            sign_pos: 31,
            frac_size: 23,
            exp_size: 8,
            exp_max: (1 << 8) - 1,
            bias: 127,
            max_exponent: 128,
            j_bit_implied: true,
        }
    }

    pub const fn float8() -> Self {
        FloatFormat {
            size: 64,
            digits: 53,
            sign_pos: 63,
            frac_size: 52,
            exp_size: 11,
            exp_max: (1 << 11) - 1,
            bias: 1023,
            max_exponent: 1024,
            j_bit_implied: true,
        }
    }

    /// The x87 extended format: the lead significand bit is stored, not implied.
    pub const fn float10() -> Self {
        FloatFormat {
            size: 80,
            digits: 64,
            sign_pos: 79,
            frac_size: 64,
            exp_size: 15,
            exp_max: (1 << 15) - 1,
            bias: 16383,
            max_exponent: 16384,
            j_bit_implied: false,
        }
    }

    pub fn from_bits(bits: u32) -> Result<Self, Error> {
        match bits {
            32 => Ok(Self::float4()),
            64 => Ok(Self::float8()),
            80 => Ok(Self::float10()),
            _ => Err(Error::UnsupportedWidth(bits)),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn sign_pos(&self) -> u32 {
        self.sign_pos
    }

    pub fn frac_size(&self) -> u32 {
        self.frac_size
    }

    pub fn exp_size(&self) -> u32 {
        self.exp_size
    }

    pub fn exp_max(&self) -> i32 {
        self.exp_max
    }

    pub fn bias(&self) -> i32 {
        self.bias
    }

    pub fn max_exponent(&self) -> i32 {
        self.max_exponent
    }

    pub fn j_bit_implied(&self) -> bool {
        self.j_bit_implied
    }

    /// Position of the lead significand bit within the full significand.
    pub fn mantissa_offset(&self) -> u32 {
        self.frac_size - 1 + self.j_bit_implied as u32
    }

    pub fn name(&self) -> &'static str {
        match self.size {
            32 => "Single",
            64 => "Double",
            _ => "Extended",
        }
    }
}
