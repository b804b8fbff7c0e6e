use std::io::{Cursor, Read, Seek, Write};

pub use anyhow::Result;

use voxell_timer::time_fn;

use crate::compressor::RoundTripTestResult;

/// An input that can be scanned twice: once to count symbols, once to encode them.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// A reversible transformation between a plain byte stream and a framed one.
pub trait Mutator {
    /// Reads all of `input` and writes its framed form to `output`.
    fn drive_mutation(&mut self, input: &mut dyn ReadSeek, output: &mut dyn Write) -> Result<()>;

    /// Reads a framed stream from `input` and writes the original bytes to `output`.
    fn revert_mutation(&mut self, input: &mut dyn Read, output: &mut dyn Write) -> Result<()>;

    /// Frames `data` and decodes it again, entirely in memory.
    ///
    /// Use for sanity checking a framing on a given input.
    fn test_roundtrip<'orig>(&mut self, data: &'orig [u8]) -> Result<RoundTripTestResult<'orig>> {
        let mut compressed = Vec::new();
        let (res, encode_time) = time_fn(|| self.drive_mutation(&mut Cursor::new(data), &mut compressed));
        res?;

        let mut decompressed = Vec::new();
        let (res, decode_time) = time_fn(|| self.revert_mutation(&mut compressed.as_slice(), &mut decompressed));
        res?;

        let equal = data == decompressed.as_slice();
        Ok(RoundTripTestResult {
            equal,
            original: data,
            compressed,
            decompressed,
            encode_time,
            decode_time,
        })
    }
}
