pub mod error;
pub mod format;

pub use error::Error;
pub use format::FloatFormat;
