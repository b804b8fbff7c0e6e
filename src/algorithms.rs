use std::io::{Read, Write};

use voxell_timer::time_fn;

use crate::mutator::{Mutator, ReadSeek, Result};

if_tracing! {
    use tracing::info;
}

pub mod ascii;
pub mod bitio;
pub mod code_tree;
pub mod framing;
pub mod frequency;
pub mod packed;
pub mod priority;

#[derive(Clone, Copy, Debug)]
pub struct DynMutator {
    pub drive_mutation: fn(input: &mut dyn ReadSeek, output: &mut dyn Write) -> Result<()>,
    pub revert_mutation: fn(input: &mut dyn Read, output: &mut dyn Write) -> Result<()>,
}

impl Mutator for DynMutator {
    fn drive_mutation(&mut self, input: &mut dyn ReadSeek, output: &mut dyn Write) -> Result<()> {
        if_tracing! {
            let span = tracing::span!(tracing::Level::INFO, "framing", func = "drive_mutation");
            let _enter = span.enter();
        }
        #[allow(unused_variables)]
        let (res, d) = time_fn(|| (self.drive_mutation)(input, output));
        if_tracing! {
            info!(elapsed_us = %d.as_micros(), ok = res.is_ok(), "compress finished");
        }
        res
    }

    fn revert_mutation(&mut self, input: &mut dyn Read, output: &mut dyn Write) -> Result<()> {
        if_tracing! {
            let span = tracing::span!(tracing::Level::INFO, "framing", func = "revert_mutation");
            let _enter = span.enter();
        }
        #[allow(unused_variables)]
        let (res, d) = time_fn(|| (self.revert_mutation)(input, output));
        if_tracing! {
            info!(elapsed_us = %d.as_micros(), ok = res.is_ok(), "decompress finished");
        }
        res
    }
}
