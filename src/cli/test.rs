use crate::{
    cli::{CliError, Result, TestArgs, read_input},
    mutator::Mutator,
};

pub fn test(args: TestArgs) -> Result<()> {
    let mut framing = args.framing.resolve()?;
    let data = read_input(&args.input)?;
    let result = framing.test_roundtrip(&data)?;
    let report = result.report(framing.name);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let bytes_saved = report.original_len as i64 - report.compressed_len as i64;
        eprintln!(
            "======== {} {} ========\n\tframing: {}\n\t{}us encode\n\t{}us decode\n\toriginal: {} bytes\n\tcompressed: {} bytes\n\tdecompressed: {} bytes\n\tratio: {:.1}% (compressed/original)\n\tsaved: {:+} bytes",
            if report.passed { "PASSED" } else { "FAILED" },
            args.input.display(),
            report.framing,
            report.elapsed_encode_us,
            report.elapsed_decode_us,
            report.original_len,
            report.compressed_len,
            report.decompressed_len,
            report.ratio * 100.0,
            bytes_saved,
        );
    }

    if_tracing! {
        tracing::info!(event = "test_complete", input = %args.input.display(), passed = report.passed, ratio = report.ratio, "roundtrip test finished");
    }

    if !report.passed {
        return Err(CliError::RoundtripMismatch(args.input));
    }
    Ok(())
}
