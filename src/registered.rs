use std::io::{Read, Write};

use crate::{
    algorithms::{DynMutator, ascii::AsciiHuffman, packed::PackedHuffman},
    mutator::{Mutator, ReadSeek, Result},
};

#[derive(Debug, Clone)]
pub struct RegisteredCompressor {
    pub mutator: DynMutator,
    pub name: &'static str,
    pub short_description: Option<&'static str>,
}

impl RegisteredCompressor {
    pub const fn new(mutator: DynMutator, name: &'static str, short_description: Option<&'static str>) -> Self {
        RegisteredCompressor {
            mutator,
            name,
            short_description,
        }
    }
}

/// Framings available in the current build, the default first.
pub static ALL_FRAMINGS: &[RegisteredCompressor] = &[PackedHuffman, AsciiHuffman];

pub const DEFAULT_FRAMING: &str = "packed";

pub fn get_framing_from_name(name: &str) -> Option<RegisteredCompressor> {
    ALL_FRAMINGS.iter().find(|f| f.name.eq_ignore_ascii_case(name.trim())).cloned()
}

impl Mutator for RegisteredCompressor {
    fn drive_mutation(&mut self, input: &mut dyn ReadSeek, output: &mut dyn Write) -> Result<()> {
        if_tracing! {
            let span = tracing::span!(tracing::Level::DEBUG, "registered framing", name = self.name);
            let _span = span.enter();
        }
        self.mutator.drive_mutation(input, output)
    }

    fn revert_mutation(&mut self, input: &mut dyn Read, output: &mut dyn Write) -> Result<()> {
        if_tracing! {
            let span = tracing::span!(tracing::Level::DEBUG, "registered framing", name = self.name);
            let _span = span.enter();
        }
        self.mutator.revert_mutation(input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(get_framing_from_name("packed").map(|f| f.name), Some("packed"));
        assert_eq!(get_framing_from_name(" ASCII ").map(|f| f.name), Some("ascii"));
        assert!(get_framing_from_name("lzw").is_none());
        assert_eq!(ALL_FRAMINGS[0].name, DEFAULT_FRAMING);
    }
}
