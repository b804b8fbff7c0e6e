use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
};

use crate::{
    cli::{CliError, DecompressArgs, Result, create_output, ensure_distinct, open_input, remove_partial_output},
    mutator::Mutator,
    registered::RegisteredCompressor,
};

pub fn decompress(args: DecompressArgs) -> Result<()> {
    let mut framing = args.framing.resolve()?;
    let input = open_input(&args.input)?;
    ensure_distinct(&args.input, &args.output)?;
    let output = create_output(&args.output)?;

    if_tracing! {
        tracing::debug!(event = "decompress_start", input = %args.input.display(), framing = framing.name);
    }
    let result = write_decompressed(&mut framing, input, output, &args);
    if result.is_err() {
        remove_partial_output(&args.output);
    }
    result
}

fn write_decompressed(framing: &mut RegisteredCompressor, input: File, output: File, args: &DecompressArgs) -> Result<()> {
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    framing.revert_mutation(&mut reader, &mut writer)?;
    writer.flush().map_err(|source| CliError::Io {
        action: "write",
        path: args.output.clone(),
        source,
    })?;

    if_tracing! {
        let written = writer.get_ref().metadata().map(|m| m.len()).unwrap_or_default();
        tracing::info!(event = "decompress_complete", input = %args.input.display(), output = %args.output.display(), decompressed_len = written, "decompress finished");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::{CompressArgs, FramingArgs, compress::compress, tests::scratch_dir},
        registered::DEFAULT_FRAMING,
    };

    #[test]
    fn malformed_input_leaves_no_output_behind() {
        let dir = scratch_dir("decompress_malformed");
        let input = dir.join("broken.huf");
        let output = dir.join("broken.out");
        std::fs::write(&input, b"12\nnot a count\n").unwrap();

        let err = decompress(DecompressArgs {
            input,
            output: output.clone(),
            framing: FramingArgs { framing: DEFAULT_FRAMING.to_string() },
        })
        .unwrap_err();
        assert!(err.to_string().contains("malformed"), "{}", err);
        assert!(!output.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn file_roundtrip_through_both_commands() {
        let dir = scratch_dir("decompress_roundtrip");
        let original = dir.join("data.txt");
        let packed = dir.join("data.huf");
        let restored = dir.join("data.out");
        std::fs::write(&original, b"she sells sea shells by the sea shore").unwrap();

        compress(CompressArgs {
            input: original.clone(),
            output: packed.clone(),
            framing: FramingArgs { framing: DEFAULT_FRAMING.to_string() },
        })
        .unwrap();
        decompress(DecompressArgs {
            input: packed,
            output: restored.clone(),
            framing: FramingArgs { framing: DEFAULT_FRAMING.to_string() },
        })
        .unwrap();
        assert_eq!(std::fs::read(&restored).unwrap(), std::fs::read(&original).unwrap());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
