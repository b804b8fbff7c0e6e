use std::{
    fs::File,
    io::{BufWriter, Write},
};

use crate::{
    cli::{CliError, CompressArgs, Result, create_output, ensure_distinct, open_input, remove_partial_output},
    mutator::Mutator,
    registered::RegisteredCompressor,
};

pub fn compress(args: CompressArgs) -> Result<()> {
    let mut framing = args.framing.resolve()?;
    let mut input = open_input(&args.input)?;
    ensure_distinct(&args.input, &args.output)?;
    let output = create_output(&args.output)?;

    if_tracing! {
        tracing::debug!(event = "compress_start", input = %args.input.display(), framing = framing.name);
    }
    let result = write_compressed(&mut framing, &mut input, output, &args);
    if result.is_err() {
        remove_partial_output(&args.output);
    }
    result
}

fn write_compressed(framing: &mut RegisteredCompressor, input: &mut File, output: File, args: &CompressArgs) -> Result<()> {
    let mut writer = BufWriter::new(output);
    framing.drive_mutation(input, &mut writer)?;
    writer.flush().map_err(|source| CliError::Io {
        action: "write",
        path: args.output.clone(),
        source,
    })?;

    if_tracing! {
        let written = writer.get_ref().metadata().map(|m| m.len()).unwrap_or_default();
        tracing::info!(event = "compress_complete", input = %args.input.display(), output = %args.output.display(), compressed_len = written, "compress finished");
    }
    Ok(())
}
