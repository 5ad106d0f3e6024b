//! Error types for the mu-law codec.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Precondition violations of the codec contract.
///
/// Both variants are deterministic contract violations, not transient
/// failures, so retrying never applies. Out-of-range input is rejected,
/// never clamped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Quantization channel count below the minimum of 2.
    #[error("quantization channel count must be at least 2, got {0}")]
    InvalidChannelCount(u32),

    /// A code fell outside `[0, quantization_channels - 1]`.
    #[error("code {code} out of range for {channels} quantization channels")]
    CodeOutOfRange {
        /// The offending code value.
        code: i64,
        /// The configured channel count.
        channels: u32,
    },
}
