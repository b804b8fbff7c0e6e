use core::{error::Error, time::Duration};

use serde::Serialize;

/// Represents an error emitted by a framing while decoding data.
#[derive(Debug)]
pub enum DecompressionError {
    /// Input given to the decompressor was malformed, invalid, or otherwise incorrect for decoding.
    ///
    /// The argument is a string that describes what went wrong.
    InvalidInput(String),
}

impl Error for DecompressionError {}

impl core::fmt::Display for DecompressionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidInput(message) => {
                write!(f, "Input data was malformed, and could not be decoded: {}", message)
            }
        }
    }
}

/// Represents the result of a round-trip test.
///
/// Use accessor methods to retrieve the [`result`][RoundTripTestResult::is_successful],
/// the [`original data`][RoundTripTestResult::get_original],
/// the [`compressed data`][RoundTripTestResult::get_compressed],
/// and the [`decompressed data`][RoundTripTestResult::get_decompressed].
#[derive(Clone, Debug, Hash)]
pub struct RoundTripTestResult<'orig> {
    pub(crate) equal: bool,
    pub(crate) original: &'orig [u8],
    pub(crate) compressed: Vec<u8>,
    pub(crate) decompressed: Vec<u8>,
    pub(crate) encode_time: Duration,
    pub(crate) decode_time: Duration,
}

impl<'orig> RoundTripTestResult<'orig> {
    /// Whether the original and decompressed data were equal.
    pub const fn is_successful(&self) -> bool {
        self.equal
    }

    /// The original data before any action was taken.
    pub const fn get_original(&self) -> &'orig [u8] {
        self.original
    }

    /// The data after it has been encoded by the framing.
    pub fn get_compressed(&self) -> &[u8] {
        self.compressed.as_slice()
    }

    /// The data after it has been decoded again.
    pub fn get_decompressed(&self) -> &[u8] {
        self.decompressed.as_slice()
    }

    /// Compressed size over original size. Empty inputs report `1.0`.
    pub fn ratio(&self) -> f64 {
        if self.get_original().is_empty() {
            return 1.0;
        }
        self.get_compressed().len() as f64 / self.get_original().len() as f64
    }

    /// Summarizes the test for reporting, tagged with the framing that produced it.
    pub fn report(&self, framing: &'static str) -> RoundTripReport {
        RoundTripReport {
            framing,
            passed: self.is_successful(),
            original_len: self.get_original().len(),
            compressed_len: self.get_compressed().len(),
            decompressed_len: self.get_decompressed().len(),
            ratio: self.ratio(),
            elapsed_encode_us: self.encode_time.as_micros() as u64,
            elapsed_decode_us: self.decode_time.as_micros() as u64,
        }
    }
}

/// Serializable summary of a [`RoundTripTestResult`].
#[derive(Clone, Debug, Serialize)]
pub struct RoundTripReport {
    pub framing: &'static str,
    pub passed: bool,
    pub original_len: usize,
    pub compressed_len: usize,
    pub decompressed_len: usize,
    pub ratio: f64,
    pub elapsed_encode_us: u64,
    pub elapsed_decode_us: u64,
}
