//! Error types for fetching and artifact construction.

use thiserror::Error;

/// Result type alias using the fetch error type.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors raised while fetching integers from the random service.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request parameters can never succeed (empty count, inverted range, ...).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The service answered with a non-success status.
    #[error("Service returned HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The retry budget ran out before the requested count was reached.
    #[error("Gave up after {attempts} failed attempts ({generated}/{requested} integers fetched)")]
    MaxRetriesExceeded {
        attempts: u32,
        generated: usize,
        requested: usize,
    },

    /// A response line did not parse in the requested base.
    #[error("Could not parse {line:?} as a base-{base} integer")]
    Parse { line: String, base: u32 },

    /// A successful response carried a different number of lines than requested.
    #[error("Batch size mismatch: requested {expected} integers, service returned {got}")]
    BatchSizeMismatch { expected: usize, got: usize },

    /// The service returned a value outside the requested range.
    #[error("Value {value} outside requested range [{min}, {max}]")]
    OutOfRange { value: i64, min: i64, max: i64 },
}

/// Errors raised while turning fetched integers into an image or audio file.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Expected {expected} values for a {width}x{height} image, got {got}")]
    Dimensions {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },

    #[error("A {width}x{height} image needs more values than can be addressed")]
    TooLarge { width: u32, height: u32 },

    #[error("Channel value {value} at index {index} is outside [0, 255]")]
    ChannelOutOfRange { index: usize, value: i64 },

    #[error("Invalid noise configuration: {0}")]
    NoiseConfig(String),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),
}
