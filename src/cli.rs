//! cli component of hufpack.
//!
//! `$exename` stands for the executable name. `<description>` denotes a required argument, while
//! `[description]` denotes an optional argument.
//!
//! # Compression
//!
//! > `$exename compress <input file> <output file> [--framing <name>]`
//!
//! the input is read twice: once to count how often each byte occurs, and once more to encode it.
//! the output starts with the 256-line frequency header, followed by the encoded payload.
//! an empty input produces an empty output.
//!
//! # Decompression
//!
//! > `$exename decompress <input file> <output file> [--framing <name>]`
//!
//! the framing has to match the one used for compression, it is not stored in the file.
//!
//! # Testing
//!
//! > `$exename test <input file> [--framing <name>] [--json]`
//!
//! compresses and decompresses the file in memory and compares the result with the original.
//! exits with a non-zero status if the roundtrip does not reproduce the input.
//!
//! # Inspection
//!
//! > `$exename codes <input file> [--json]`
//!
//! prints the count and code assigned to every byte value present in the file.
//!
//! > `$exename list [--detailed]`
//!
//! lists the available framings. `packed` is the default and can also be picked through the
//! `HUFPACK_FRAMING` environment variable.
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::registered::{DEFAULT_FRAMING, RegisteredCompressor, get_framing_from_name};

pub mod codes;
pub mod compress;
pub mod decompress;
pub mod list;
pub mod test;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("unknown framing {0:?}, run `list` to see the available ones")]
    UnknownFraming(String),

    #[error(transparent)]
    Codec(#[from] anyhow::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("roundtrip of {} did not reproduce the input", .0.display())]
    RoundtripMismatch(PathBuf),

    #[error("refusing to overwrite the input {}, pick a different output path", .0.display())]
    SameFile(PathBuf),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// CLI arguments for hufpack
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for hufpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a file
    #[command(alias = "enc")]
    Compress(CompressArgs),

    /// Decompress a file
    #[command(alias = "dec")]
    Decompress(DecompressArgs),

    /// Test the compression/decompression roundtrip on a file
    Test(TestArgs),

    /// Show the code assigned to each byte of a file
    Codes(CodesArgs),

    /// List available framings
    List {
        /// Show a description of each framing
        #[arg(long)]
        detailed: bool,
    },
}

/// Framing selection shared by every command that encodes or decodes
#[derive(Args, Debug)]
pub struct FramingArgs {
    /// How the code bits are laid out after the header
    #[arg(long, env = "HUFPACK_FRAMING", default_value = DEFAULT_FRAMING)]
    pub framing: String,
}

impl FramingArgs {
    pub fn resolve(&self) -> Result<RegisteredCompressor> {
        get_framing_from_name(&self.framing).ok_or_else(|| CliError::UnknownFraming(self.framing.clone()))
    }
}

/// Arguments specific to the compress command
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Path for the compressed output
    pub output: PathBuf,

    #[command(flatten)]
    pub framing: FramingArgs,
}

/// Arguments specific to the decompress command
#[derive(Args, Debug)]
pub struct DecompressArgs {
    /// Path to the compressed file
    pub input: PathBuf,

    /// Path for the decompressed output
    pub output: PathBuf,

    #[command(flatten)]
    pub framing: FramingArgs,
}

/// Arguments specific to the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the file to roundtrip
    pub input: PathBuf,

    #[command(flatten)]
    pub framing: FramingArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments specific to the codes command
#[derive(Args, Debug)]
pub struct CodesArgs {
    /// Path to the file to analyze
    pub input: PathBuf,

    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,
}

pub(crate) fn open_input(path: &Path) -> Result<File> {
    let file = File::open(path).map_err(|source| CliError::Io {
        action: "open",
        path: path.to_path_buf(),
        source,
    })?;
    let metadata = file.metadata().map_err(|source| CliError::Io {
        action: "inspect",
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(CliError::Io {
            action: "read",
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    Ok(file)
}

/// Fails if `output` names the same file as `input`, which [`create_output`] would truncate
/// before it is read.
pub(crate) fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    let input = input.canonicalize().map_err(|source| CliError::Io {
        action: "resolve",
        path: input.to_path_buf(),
        source,
    })?;
    // an output that does not exist yet cannot be the input
    let Ok(output) = output.canonicalize() else {
        return Ok(());
    };
    if input == output {
        return Err(CliError::SameFile(input));
    }
    Ok(())
}

pub(crate) fn create_output(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| CliError::Io {
        action: "create",
        path: path.to_path_buf(),
        source,
    })
}

/// Deletes an output file left half-written by a failed run.
pub(crate) fn remove_partial_output(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {
            if_tracing! {
                tracing::debug!(event = "partial_output_removed", output = %path.display());
            }
        }
        Err(_err) => {
            if_tracing! {
                tracing::warn!(event = "partial_output_kept", output = %path.display(), error = %_err, "could not remove partial output");
            }
        }
    }
}

pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| CliError::Io {
        action: "read",
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A fresh directory under the system temp dir, unique per test name and process.
    pub(crate) fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hufpack-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parses_compress_with_alias_and_framing() {
        let cli = Cli::try_parse_from(["hufpack", "enc", "in.txt", "out.huf", "--framing", "ascii"]).unwrap();
        match cli.command {
            Command::Compress(args) => {
                assert_eq!(args.input, PathBuf::from("in.txt"));
                assert_eq!(args.output, PathBuf::from("out.huf"));
                assert_eq!(args.framing.resolve().unwrap().name, "ascii");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn unknown_framing_is_reported() {
        let cli = Cli::try_parse_from(["hufpack", "dec", "a", "b", "--framing", "gzip"]).unwrap();
        let Command::Decompress(args) = cli.command else {
            panic!("expected decompress");
        };
        assert!(matches!(args.framing.resolve(), Err(CliError::UnknownFraming(name)) if name == "gzip"));
    }

    #[test]
    fn missing_input_names_the_path() {
        let err = open_input(Path::new("definitely/not/here.bin")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("cannot open"), "{}", message);
        assert!(message.contains("here.bin"), "{}", message);
    }

    #[test]
    fn same_input_and_output_is_refused() {
        let dir = scratch_dir("same_file");
        let path = dir.join("data.txt");
        std::fs::write(&path, b"hello world").unwrap();

        // a different spelling of the same path
        let alias = dir.join(".").join("data.txt");
        let err = ensure_distinct(&path, &alias).unwrap_err();
        assert!(matches!(err, CliError::SameFile(_)), "{}", err);

        assert!(ensure_distinct(&path, &dir.join("data.huf")).is_ok());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
