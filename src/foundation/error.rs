/// Convenience result type used across the core.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error taxonomy, per the error-kind table in the design docs.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    /// A JSON document (animation schema, imported project) failed validation.
    #[error("schema invalid: {0}")]
    SchemaInvalid(String),

    /// `Clip.mediaId` has no matching `MediaItem` in the Media Library.
    #[error("media missing: {0}")]
    MediaMissing(String),

    /// A time value was negative, or an end time did not exceed a start time.
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// A trim/split/slip/slide/roll operation would leave a clip with duration <= 0.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A requested layer kind, preset, or transition is not implemented. Non-fatal.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// The GPU upscaling backend could not be initialized; caller should fall back.
    #[error("gpu unavailable: {0}")]
    GpuUnavailable(String),

    /// A host-supplied asset load (image, SVG raster, audio decode) failed.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Wrapped lower-level error from a host-supplied service.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Build a [`CoreError::SchemaInvalid`] value.
    pub fn schema_invalid(msg: impl Into<String>) -> Self {
        Self::SchemaInvalid(msg.into())
    }

    /// Build a [`CoreError::MediaMissing`] value.
    pub fn media_missing(msg: impl Into<String>) -> Self {
        Self::MediaMissing(msg.into())
    }

    /// Build a [`CoreError::InvalidTime`] value.
    pub fn invalid_time(msg: impl Into<String>) -> Self {
        Self::InvalidTime(msg.into())
    }

    /// Build a [`CoreError::InvalidRange`] value.
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Build a [`CoreError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`CoreError::GpuUnavailable`] value.
    pub fn gpu_unavailable(msg: impl Into<String>) -> Self {
        Self::GpuUnavailable(msg.into())
    }

    /// Build a [`CoreError::DecodeError`] value.
    pub fn decode_error(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }
}

/// A single diagnostic produced by a parser or validator that collects
/// every failure instead of stopping at the first one (§7 policy 2).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Diagnostic {
    /// 1-based source line, when the failure can be pinned to one.
    pub line: Option<usize>,
    /// Human-readable message.
    pub message: String,
    /// Index of the block/record the failure occurred in (e.g. SRT block).
    pub block_index: Option<usize>,
}

impl Diagnostic {
    /// Build a diagnostic with no line/block association.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            line: None,
            message: message.into(),
            block_index: None,
        }
    }

    /// Attach a block index.
    pub fn with_block(mut self, block_index: usize) -> Self {
        self.block_index = Some(block_index);
        self
    }

    /// Attach a line number.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_builder_chains() {
        let d = Diagnostic::new("bad timestamp").with_block(1).with_line(2);
        assert_eq!(d.message, "bad timestamp");
        assert_eq!(d.block_index, Some(1));
        assert_eq!(d.line, Some(2));
    }
}
