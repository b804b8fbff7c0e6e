use std::io::{Read, Write};

use anyhow::Context;

use crate::{
    algorithms::{
        DynMutator,
        bitio::{BitReader, BitWriter},
        framing,
    },
    mutator::{ReadSeek, Result},
    registered::RegisteredCompressor,
};

if_tracing! {
    use tracing::{debug, info};
}

pub const PackedHuffman: RegisteredCompressor = RegisteredCompressor::new(
    DynMutator {
        drive_mutation: packed_encode,
        revert_mutation: packed_decode,
    },
    "packed",
    Some(DESCRIPTION),
);
const DESCRIPTION: &str = "Huffman coding, frequency header followed by code bits packed MSB-first into bytes.";

fn packed_encode(input: &mut dyn ReadSeek, output: &mut dyn Write) -> Result<()> {
    if_tracing! {
        debug!(target = "packed", "packed encode start");
    }
    let Some((tree, total)) = framing::write_header(input, output)? else {
        return Ok(());
    };

    let mut writer = BitWriter::new(&mut *output);
    framing::encode_symbols(&tree, total, input, &mut writer)?;
    let output = writer.into_inner().context("failed to write final payload byte")?;
    output.flush().context("failed to flush output")?;

    if_tracing! {
        info!(target = "packed", symbols = total, "packed encode complete");
    }
    Ok(())
}

fn packed_decode(input: &mut dyn Read, output: &mut dyn Write) -> Result<()> {
    if_tracing! {
        debug!(target = "packed", "packed decode start");
    }
    framing::decode_stream(input, output, |payload| {
        BitReader::new(payload).context("failed to read payload")
    })?;
    if_tracing! {
        info!(target = "packed", "packed decode complete");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{algorithms::frequency::FrequencyTable, mutator::Mutator};
    use std::io::Cursor;

    #[test]
    fn roundtrip_tests() {
        crate::tests::roundtrip_test(PackedHuffman);
    }

    #[test]
    fn layout_is_header_then_packed_bits() {
        let mut framing = PackedHuffman;
        let data = b"aab";
        let mut compressed = Vec::new();
        framing.drive_mutation(&mut Cursor::new(&data[..]), &mut compressed).unwrap();

        let mut header = Vec::new();
        FrequencyTable::from_bytes(data).write_header(&mut header).unwrap();
        assert!(compressed.starts_with(&header));
        // 'b' merges first and takes bit 0, so "aab" is 1 1 0 padded to a byte
        assert_eq!(&compressed[header.len()..], &[0b1100_0000]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let mut framing = PackedHuffman;
        let mut compressed = Vec::new();
        framing.drive_mutation(&mut Cursor::new(&b""[..]), &mut compressed).unwrap();
        assert!(compressed.is_empty());

        let mut decompressed = Vec::new();
        framing.revert_mutation(&mut &compressed[..], &mut decompressed).unwrap();
        assert!(decompressed.is_empty());
    }

    #[test]
    fn padding_bits_are_ignored() {
        let mut framing = PackedHuffman;
        let data = b"ab";
        let mut compressed = Vec::new();
        framing.drive_mutation(&mut Cursor::new(&data[..]), &mut compressed).unwrap();
        // two symbols take two bits, the other six of the last byte are padding
        let last = compressed.len() - 1;
        assert_eq!(compressed[last] & 0b0011_1111, 0);

        let mut decompressed = Vec::new();
        framing.revert_mutation(&mut &compressed[..], &mut decompressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn corrupted_header_is_rejected() {
        let mut framing = PackedHuffman;
        let mut compressed = Vec::new();
        framing
            .drive_mutation(&mut Cursor::new(&b"hello"[..]), &mut compressed)
            .unwrap();
        compressed[0] = b'x';

        let mut decompressed = Vec::new();
        let err = framing
            .revert_mutation(&mut &compressed[..], &mut decompressed)
            .unwrap_err();
        assert!(err.to_string().contains("malformed"), "{}", err);
    }

    #[test]
    fn inflated_header_count_is_rejected() {
        let mut framing = PackedHuffman;
        let data = b"ab";
        let mut compressed = Vec::new();
        framing.drive_mutation(&mut Cursor::new(&data[..]), &mut compressed).unwrap();
        let mut header = Vec::new();
        FrequencyTable::from_bytes(data).write_header(&mut header).unwrap();
        let payload = compressed[header.len()..].to_vec();

        // same two-leaf tree shape, but 'a' now claims a million occurrences
        let mut counts = [0u64; 256];
        counts[b'a' as usize] = 1_000_000;
        counts[b'b' as usize] = 1;
        let mut forged = Vec::new();
        FrequencyTable::from(counts).write_header(&mut forged).unwrap();
        forged.extend_from_slice(&payload);

        let mut decompressed = Vec::new();
        let err = framing
            .revert_mutation(&mut &forged[..], &mut decompressed)
            .unwrap_err();
        assert!(err.to_string().contains("malformed"), "{}", err);
        assert!(err.to_string().contains("more symbols than were encoded"), "{}", err);
        assert!(decompressed.len() <= 8, "decoded {} bytes of padding", decompressed.len());
    }
}
