//! ### FAT Display Module
//!
//! Renders catalog results for the console.  The line shape follows the
//! P2000T conventions: name, extension, a validity glyph, the declared
//! block count, and the chain itself.  Structured output for pipelines is
//! handled by the JSON renderer.

use colored::Colorize;
use super::types::FileChain;

/// One formatted catalog line.  Invalid chains are never suppressed, the
/// glyph is the diagnostic.
fn file_line(chain: &FileChain) -> String {
    let glyph = match chain.is_valid() {
        true => "\u{2713}".green(),
        false => "\u{2717}".red()
    };
    let note = match chain.is_complete() {
        true => "".normal(),
        false => " (truncated)".dimmed()
    };
    format!("{} | {} | {} | {:02} | {}{}",
        chain.record.filename,
        chain.record.extension,
        glyph,
        chain.record.total_blocks,
        chain,
        note)
}

/// Print the whole catalog with a trailing count.
pub fn print_catalog(chains: &Vec<FileChain>) {
    for chain in chains {
        println!("{}",file_line(chain));
    }
    println!();
    println!("found {} files",chains.len());
}

/// Print the detail of a single walked chain, used by the `walk` subcommand.
pub fn print_chain_detail(chain: &FileChain) {
    println!("filename:     {}",chain.record.filename);
    println!("extension:    {}",chain.record.extension);
    println!("rom address:  ${:04X}",chain.record.rom_address);
    println!("file size:    {}",chain.record.file_size);
    println!("claims (bank,block): ({},{})",chain.record.current_bank,chain.record.current_block);
    println!("declared blocks:     {}",chain.record.total_blocks);
    println!("visited blocks:      {}",chain.blocks.len());
    println!("chain:        {}",chain);
    let status = match (chain.is_valid(),chain.is_complete()) {
        (true,true) => "valid".green(),
        (true,false) => "valid but truncated".yellow(),
        (false,true) => "invalid".red(),
        (false,false) => "invalid and truncated".red()
    };
    println!("status:       {}",status);
}

/// Render the catalog as a JSON string, pretty printed when an indent is
/// given, minified otherwise.
pub fn catalog_json(chains: &Vec<FileChain>,indent: Option<u16>) -> String {
    let mut root = json::JsonValue::new_array();
    for chain in chains {
        let mut file = json::JsonValue::new_object();
        file["filename"] = json::JsonValue::String(chain.record.filename.clone());
        file["extension"] = json::JsonValue::String(chain.record.extension.clone());
        file["rom_address"] = json::JsonValue::from(chain.record.rom_address);
        file["file_size"] = json::JsonValue::from(chain.record.file_size);
        file["total_blocks"] = json::JsonValue::from(chain.record.total_blocks);
        file["valid"] = json::JsonValue::Boolean(chain.is_valid());
        file["complete"] = json::JsonValue::Boolean(chain.is_complete());
        let mut blocks = json::JsonValue::new_array();
        for coord in &chain.blocks {
            let mut pair = json::JsonValue::new_object();
            pair["bank"] = json::JsonValue::from(coord.bank);
            pair["block"] = json::JsonValue::from(coord.block);
            blocks.push(pair).expect("unreachable");
        }
        file["blocks"] = blocks;
        root.push(file).expect("unreachable");
    }
    match indent {
        Some(spaces) => json::stringify_pretty(root,spaces),
        None => json::stringify(root)
    }
}
