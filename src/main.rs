//! # Command Line Interface
//!
//! The subcommand tree is in `cli.rs` where the build script can also
//! reach it for shell completions.  Dispatch is here.

mod cli;

use std::io::Write;
use std::str::FromStr;
use clap::ArgMatches;
use env_logger;
#[cfg(windows)]
use colored;
use log::error;
use p2kit::tape::{Coord,TapeImage};
use p2kit::fat;

const RCH: &str = "unreachable was reached";

#[derive(thiserror::Error,Debug)]
enum CommandError {
    #[error("Command could not be interpreted")]
    InvalidCommand,
    #[error("No file header at the given coordinate")]
    NothingThere
}

/// Get the image from the `--dimg` path, or from stdin if the path was
/// omitted and something is piped in.
fn get_img(cmd: &ArgMatches) -> Result<TapeImage,Box<dyn std::error::Error>> {
    match cmd.get_one::<String>("dimg") {
        Some(path) => p2kit::create_img_from_file(path),
        None => {
            if atty::is(atty::Stream::Stdin) {
                error!("line entry is not supported, provide `--dimg` or pipe the image in");
                return Err(Box::new(CommandError::InvalidCommand));
            }
            p2kit::create_img_from_stdin()
        }
    }
}

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).unwrap();

    let matches = cli::build_cli().get_matches();

    // Catalog

    if let Some(cmd) = matches.subcommand_matches("catalog") {
        let img = get_img(cmd)?;
        let chains = fat::catalog(&img);
        if cmd.get_flag("json") {
            let indent = cmd.get_one::<u16>("indent").copied();
            println!("{}",fat::display::catalog_json(&chains,indent));
        } else {
            fat::display::print_catalog(&chains);
        }
        return Ok(());
    }

    // Scan for start candidates

    if let Some(cmd) = matches.subcommand_matches("scan") {
        let img = get_img(cmd)?;
        for coord in fat::scan_start_candidates(&img) {
            println!("{}",coord);
        }
        return Ok(());
    }

    // Walk a single chain

    if let Some(cmd) = matches.subcommand_matches("walk") {
        let start = Coord::from_str(cmd.get_one::<String>("at").expect(RCH))?;
        let img = get_img(cmd)?;
        return match fat::walk_chain(&img,start)? {
            Some(chain) => {
                fat::display::print_chain_detail(&chain);
                Ok(())
            },
            None => {
                error!("no file header at {}",start);
                Err(Box::new(CommandError::NothingThere))
            }
        };
    }

    // Extract a CAS file

    if let Some(cmd) = matches.subcommand_matches("get") {
        let name = cmd.get_one::<String>("file").expect(RCH);
        let img = get_img(cmd)?;
        let chain = fat::find_file(&img,name)?;
        let cas = fat::export_cas(&img,&chain)?;
        if atty::is(atty::Stream::Stdout) {
            p2kit::display_block(0,&cas);
        } else {
            std::io::stdout().write_all(&cas).expect("could not write output stream");
        }
        return Ok(());
    }

    // Dump a bank's metadata region

    if let Some(cmd) = matches.subcommand_matches("dump") {
        let bank = *cmd.get_one::<u8>("bank").expect(RCH) as usize;
        let img = get_img(cmd)?;
        p2kit::display_block(bank * p2kit::tape::BANK_SIZE,img.meta_region(bank)?);
        return Ok(());
    }

    error!("no subcommand was found, try `p2kit --help`");
    Err(Box::new(CommandError::InvalidCommand))
}
