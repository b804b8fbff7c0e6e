//! The two passes shared by every framing.
//!
//! A framed stream is the frequency header followed by the code bits of every input byte.
//! Framings only differ in the [`BitSink`]/[`BitSource`] pair that carries those bits.
use std::io::{BufRead, BufReader, BufWriter, Read, Write};

use anyhow::{Context, anyhow};

use crate::{
    algorithms::{
        bitio::{BitSink, BitSource},
        code_tree::CodeTree,
        frequency::FrequencyTable,
    },
    compressor::DecompressionError,
    mutator::{ReadSeek, Result},
};

if_tracing! {
    use tracing::{debug, warn};
}

const CHUNK: usize = 8192;

/// Scans `input` once to count symbols and writes the header to `output`.
///
/// Returns the tree to encode with and the number of symbols to expect, or `None` for empty
/// input, in which case nothing is written. `input` is rewound before returning.
pub fn write_header(input: &mut dyn ReadSeek, output: &mut dyn Write) -> Result<Option<(CodeTree, u64)>> {
    input.rewind().context("failed to rewind input before counting")?;
    let freqs = FrequencyTable::from_reader(&mut BufReader::new(&mut *input)).context("failed to read input")?;
    input.rewind().context("failed to rewind input after counting")?;

    let total = freqs.total()?;
    if total == 0 {
        if_tracing! {
            debug!(target = "framing", "empty input, writing nothing");
        }
        return Ok(None);
    }

    freqs.write_header(output).context("failed to write frequency header")?;
    let tree = CodeTree::from_frequencies(&freqs);
    if_tracing! {
        debug!(target = "framing", total = total, symbols = tree.leaf_count(), max_code_len = tree.max_depth(), "header written");
    }
    Ok(Some((tree, total)))
}

/// Second pass: encodes every byte of `input` through `tree` into `sink`.
///
/// Fails if the input no longer matches the counts the tree was built from.
pub fn encode_symbols<S: BitSink + ?Sized>(tree: &CodeTree, total: u64, input: &mut dyn ReadSeek, sink: &mut S) -> Result<()> {
    let mut reader = BufReader::with_capacity(CHUNK, input);
    let mut encoded = 0u64;
    loop {
        let chunk = reader.fill_buf().context("failed to read input")?;
        if chunk.is_empty() {
            break;
        }
        for &symbol in chunk {
            tree.encode(symbol, sink)
                .with_context(|| format!("input changed between passes at byte {}", encoded))?;
            encoded += 1;
        }
        let len = chunk.len();
        reader.consume(len);
    }

    if encoded != total {
        return Err(anyhow!(
            "input changed between passes: counted {} bytes, encoded {}",
            total,
            encoded
        ));
    }
    Ok(())
}

/// Parses the header at the start of `input`.
///
/// Returns `None` when `input` is empty, which is how empty files are framed.
pub fn read_header<R: BufRead + ?Sized>(input: &mut R) -> Result<Option<(CodeTree, u64)>> {
    if input.fill_buf().context("failed to read compressed input")?.is_empty() {
        if_tracing! {
            debug!(target = "framing", "empty compressed input, writing nothing");
        }
        return Ok(None);
    }

    let freqs = FrequencyTable::read_header(input).map_err(|e| anyhow!(DecompressionError::InvalidInput(e.to_string())))?;
    let total = freqs.total()?;
    if total == 0 {
        if_tracing! {
            warn!(target = "framing", "frequency header has no symbols");
        }
        return Ok(None);
    }
    Ok(Some((CodeTree::from_frequencies(&freqs), total)))
}

/// Decodes exactly `total` symbols from `source` and writes them to `output`.
///
/// The last symbol of a well-formed payload ends inside its final byte, so a source that had to
/// invent bits to finish a symbol means the header promised more symbols than were encoded.
pub fn decode_symbols<S: BitSource + ?Sized>(tree: &CodeTree, total: u64, source: &mut S, output: &mut dyn Write) -> Result<()> {
    let mut writer = BufWriter::with_capacity(CHUNK, output);
    for index in 0..total {
        let symbol = tree.decode(source).map_err(|e| {
            anyhow!(DecompressionError::InvalidInput(format!(
                "payload ended or broke off at symbol {} of {}: {}",
                index, total, e
            )))
        })?;
        if source.is_exhausted() {
            return Err(anyhow!(DecompressionError::InvalidInput(format!(
                "payload ended at symbol {} of {}, the header counts more symbols than were encoded",
                index, total
            ))));
        }
        writer.write_all(&[symbol]).context("failed to write output")?;
    }
    writer.flush().context("failed to write output")?;
    Ok(())
}

/// Decodes a whole framed stream, using `make_source` to read the payload after the header.
pub fn decode_stream<R, S, F>(input: R, output: &mut dyn Write, make_source: F) -> Result<()>
where
    R: Read,
    S: BitSource,
    F: FnOnce(BufReader<R>) -> Result<S>,
{
    let mut reader = BufReader::with_capacity(CHUNK, input);
    let Some((tree, total)) = read_header(&mut reader)? else {
        return Ok(());
    };
    let mut source = make_source(reader)?;
    decode_symbols(&tree, total, &mut source, output)
}
