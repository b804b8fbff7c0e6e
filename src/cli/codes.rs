use std::io::BufReader;

use serde::Serialize;

use crate::{
    algorithms::{code_tree::CodeTree, frequency::FrequencyTable},
    cli::{CliError, CodesArgs, Result, open_input},
};

#[derive(Debug, Serialize)]
struct CodeEntry {
    symbol: u8,
    count: u64,
    code: String,
}

fn code_table(freqs: &FrequencyTable, tree: &CodeTree) -> Vec<CodeEntry> {
    freqs
        .iter_present()
        .filter_map(|(symbol, count)| {
            let code = tree.code(symbol)?;
            Some(CodeEntry {
                symbol,
                count,
                code: code.iter().map(|&bit| if bit { '1' } else { '0' }).collect(),
            })
        })
        .collect()
}

fn printable(symbol: u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        format!("{:#04x}", symbol)
    }
}

pub fn codes(args: CodesArgs) -> Result<()> {
    let mut input = BufReader::new(open_input(&args.input)?);
    let freqs = FrequencyTable::from_reader(&mut input).map_err(|source| CliError::Io {
        action: "read",
        path: args.input.clone(),
        source,
    })?;
    let tree = CodeTree::from_frequencies(&freqs);
    let table = code_table(&freqs, &tree);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    let total: u64 = table.iter().map(|e| e.count).sum();
    let payload_bits: u64 = table.iter().map(|e| e.count * e.code.len() as u64).sum();
    for entry in &table {
        println!("{:>6}\t{:>10}\t{}", printable(entry.symbol), entry.count, entry.code);
    }
    println!(
        "{} symbols, {} distinct, longest code {} bits, payload {} bits ({:.3} bits/symbol)",
        total,
        tree.leaf_count(),
        tree.max_depth(),
        payload_bits,
        if total == 0 { 0.0 } else { payload_bits as f64 / total as f64 }
    );
    Ok(())
}
