/// Convenience result type used across rastel.
pub type RastelResult<T> = Result<T, RastelError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every precondition failure is reported by the call that introduces it; nothing is
/// retried or silently recovered.
#[derive(thiserror::Error, Debug)]
pub enum RastelError {
    /// Width/height combination that cannot back a buffer.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Two buffers (or a buffer and a pixel list) whose sizes must agree do not.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Coordinate or region outside the buffer.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// Channel value outside its representable range.
    #[error("invalid pixel value: {0}")]
    InvalidPixelValue(String),

    /// Malformed `#rrggbb`-style color string.
    #[error("invalid hex code: {0}")]
    InvalidHexCode(String),

    /// Operation is not defined for the buffer's pixel mode.
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    /// Band merge called with a band count other than 3 or 4.
    #[error("invalid band count: expected 3 or 4 bands, got {0}")]
    InvalidBandCount(usize),

    /// Byte signature not recognized and no format hint given.
    #[error("unknown image format")]
    UnknownFormat,

    /// Malformed data for a recognized format.
    #[error("decode error: {0}")]
    Decode(String),

    /// Content the target format cannot represent.
    #[error("encode error: {0}")]
    Encode(String),

    /// Format name outside the registered set.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// File extension that maps to no known format.
    #[error("invalid extension: {0}")]
    InvalidExtension(String),

    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed font data.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// Shape drawn without a required field.
    #[error("incomplete shape: {0}")]
    IncompleteShape(String),

    /// Invalid user-provided option or argument.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RastelError {
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    pub fn invalid_pixel_value(msg: impl Into<String>) -> Self {
        Self::InvalidPixelValue(msg.into())
    }

    pub fn unsupported_mode(msg: impl Into<String>) -> Self {
        Self::UnsupportedMode(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    pub fn incomplete_shape(msg: impl Into<String>) -> Self {
        Self::IncompleteShape(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
