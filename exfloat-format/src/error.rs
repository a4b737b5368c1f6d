use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported format width {0}; supported widths are 32, 64, and 80 bits")]
    UnsupportedWidth(u32),
}
