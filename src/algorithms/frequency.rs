//! Per-symbol occurrence counts and their plain-text header encoding.
//!
//! The header is exactly 256 lines, one per symbol value in ascending order, each holding the
//! decimal count followed by `\n`. It is written in front of every non-empty payload, and the
//! decoder rebuilds the tree from it, so both sides must agree on it byte for byte.
use std::io::{self, BufRead, Read, Write};

use thiserror::Error;

if_tracing! {
    use tracing::debug;
}

pub const SYMBOLS: usize = 256;

/// Longest header line a valid count can produce: the 20 digits of `u64::MAX` and the newline.
const MAX_LINE: u64 = 21;

#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("I/O error while reading frequency header: {0}")]
    Io(#[from] io::Error),

    #[error("frequency header ended before the count for symbol {index}")]
    MissingCount { index: usize },

    #[error("frequency header line for symbol {index} is not a count: {line:?}")]
    InvalidCount { index: usize, line: String },

    #[error("frequency counts add up to more than {}", u64::MAX)]
    TotalOverflow,
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FrequencyTable {
    counts: [u64; SYMBOLS],
}

impl core::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter_present()).finish()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[u64; SYMBOLS]> for FrequencyTable {
    fn from(counts: [u64; SYMBOLS]) -> Self {
        Self { counts }
    }
}

impl FrequencyTable {
    pub const fn new() -> Self {
        Self { counts: [0; SYMBOLS] }
    }

    #[cfg(test)]
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &b in data {
            table.counts[b as usize] += 1;
        }
        table
    }

    /// Counts every byte `input` yields until end of stream.
    pub fn from_reader<R: Read>(input: &mut R) -> io::Result<Self> {
        let mut table = Self::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = match input.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            for &b in &chunk[..n] {
                table.counts[b as usize] += 1;
            }
        }
        Ok(table)
    }

    #[cfg(test)]
    pub const fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of symbols in the stream this table describes.
    pub fn total(&self) -> Result<u64, HeaderError> {
        self.counts
            .iter()
            .try_fold(0u64, |acc, &c| acc.checked_add(c))
            .ok_or(HeaderError::TotalOverflow)
    }

    /// Symbols with a nonzero count, in ascending symbol order.
    pub fn iter_present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0)
            .map(|(s, &c)| (s as u8, c))
    }

    pub fn write_header<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for count in &self.counts {
            writeln!(out, "{}", count)?;
        }
        Ok(())
    }

    /// Parses a header written by [`write_header`](Self::write_header).
    ///
    /// Reads exactly 256 lines and nothing past them, so `input` is left positioned at the
    /// first byte of the payload. A line longer than any `u64` count is rejected without being
    /// buffered whole.
    pub fn read_header<R: BufRead + ?Sized>(input: &mut R) -> Result<Self, HeaderError> {
        let mut counts = [0u64; SYMBOLS];
        let mut line = String::new();
        for (index, slot) in counts.iter_mut().enumerate() {
            line.clear();
            let read = (&mut *input).take(MAX_LINE).read_line(&mut line)?;
            if read == 0 {
                return Err(HeaderError::MissingCount { index });
            }
            if !line.ends_with('\n') {
                if read as u64 == MAX_LINE {
                    return Err(HeaderError::InvalidCount { index, line });
                }
                return Err(HeaderError::MissingCount { index });
            }
            let digits = &line[..line.len() - 1];
            *slot = digits.parse().map_err(|_| HeaderError::InvalidCount {
                index,
                line: digits.to_string(),
            })?;
        }

        let table = Self { counts };
        #[allow(unused_variables)]
        let total = table.total()?;
        if_tracing! {
            debug!(target = "frequency", symbols = table.iter_present().count(), total = total, "parsed frequency header");
        }
        Ok(table)
    }
}
