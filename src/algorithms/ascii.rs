use std::io::{BufWriter, Read, Write};

use anyhow::Context;

use crate::{
    algorithms::{
        DynMutator,
        bitio::{AsciiBitReader, AsciiBitWriter},
        framing,
    },
    mutator::{ReadSeek, Result},
    registered::RegisteredCompressor,
};

if_tracing! {
    use tracing::{debug, info};
}

/// Same header and tree as [`PackedHuffman`](super::packed::PackedHuffman), but every code bit
/// is written as an ASCII `'0'` or `'1'`. Useful for eyeballing what the tree produces.
pub const AsciiHuffman: RegisteredCompressor = RegisteredCompressor::new(
    DynMutator {
        drive_mutation: ascii_encode,
        revert_mutation: ascii_decode,
    },
    "ascii",
    Some(DESCRIPTION),
);
const DESCRIPTION: &str = "Huffman coding, frequency header followed by code bits spelled out as ASCII '0'/'1'. For debugging.";

fn ascii_encode(input: &mut dyn ReadSeek, output: &mut dyn Write) -> Result<()> {
    if_tracing! {
        debug!(target = "ascii", "ascii encode start");
    }
    let Some((tree, total)) = framing::write_header(input, output)? else {
        return Ok(());
    };

    let mut writer = AsciiBitWriter::new(BufWriter::new(&mut *output));
    framing::encode_symbols(&tree, total, input, &mut writer)?;
    writer.into_inner().flush().context("failed to write bit payload")?;

    if_tracing! {
        info!(target = "ascii", symbols = total, "ascii encode complete");
    }
    Ok(())
}

fn ascii_decode(input: &mut dyn Read, output: &mut dyn Write) -> Result<()> {
    if_tracing! {
        debug!(target = "ascii", "ascii decode start");
    }
    framing::decode_stream(input, output, |payload| Ok(AsciiBitReader::new(payload)))?;
    if_tracing! {
        info!(target = "ascii", "ascii decode complete");
    }
    Ok(())
}
