//! # `p2kit` main library
//!
//! This library recovers files from raw dumps of the P2000T cassette-backed
//! storage medium, as produced by a ROM reader.  It is read-only and
//! diagnostic: the medium is never modified or repaired.
//!
//! ## Architecture
//!
//! Recovery is built around two modules:
//! * `tape` knows the medium geometry and hands out bounds-checked views of
//!   the dump, it does not try to interpret a file system
//! * `fat` imposes the file allocation scheme on those views: it scans for
//!   chain starts, walks the forward links, and judges the results
//!
//! A `TapeImage` owns the dump bytes.  Both `fat` components borrow it
//! read-only, so independent walks may share one image freely.
//!
//! ## Results
//!
//! Every recovered file is reported as a `fat::types::FileChain`: the
//! terminal header, the coordinates visited in order, a validity flag
//! (declared block count vs blocks visited) and a completeness flag
//! (sentinel seen vs chain dangling).  Rendering the chains is left to
//! `fat::display` and the CLI.

pub mod tape;
pub mod fat;

use std::io::Read;
use log::{info,warn};
use tape::TapeImage;

type DYNERR = Box<dyn std::error::Error>;

/// Given a bytestream return a tape image, or Err if the length does not
/// match the 8 bank geometry.
pub fn create_img_from_bytestream(dump: &[u8]) -> Result<TapeImage,DYNERR> {
    match TapeImage::from_bytes(dump) {
        Ok(img) => {
            info!("identified {} byte tape image",dump.len());
            Ok(img)
        },
        Err(e) => {
            warn!("cannot interpret {} bytes as a tape image",dump.len());
            Err(Box::new(e))
        }
    }
}

/// Calls `create_img_from_bytestream` getting the bytes from a file.
pub fn create_img_from_file(img_path: &str) -> Result<TapeImage,DYNERR> {
    match std::fs::read(img_path) {
        Ok(dump) => create_img_from_bytestream(&dump),
        Err(e) => Err(Box::new(e))
    }
}

/// Calls `create_img_from_bytestream` getting the bytes from stdin.
pub fn create_img_from_stdin() -> Result<TapeImage,DYNERR> {
    let mut dump = Vec::new();
    match std::io::stdin().read_to_end(&mut dump) {
        Ok(_n) => create_img_from_bytestream(&dump),
        Err(e) => Err(Box::new(e))
    }
}

/// Display binary to stdout in columns of hex and ascii
pub fn display_block(start_addr: usize,block: &[u8]) {
    let mut slice_start = 0;
    loop {
        let row_label = start_addr + slice_start;
        let mut slice_end = slice_start + 16;
        if slice_end > block.len() {
            slice_end = block.len();
        }
        let slice = &block[slice_start..slice_end];
        let txt: Vec<u8> = slice.iter().map(|c| match *c {
            x if x<32 => '.' as u8,
            x if x<127 => x,
            _ => '.' as u8
        }).collect();
        print!("{:04X} : ",row_label);
        for byte in slice {
            print!("{:02X} ",byte);
        }
        for _blank in slice_end..slice_start+16 {
            print!("   ");
        }
        println!("| {}",String::from_utf8_lossy(&txt));
        slice_start += 16;
        if slice_end==block.len() {
            break;
        }
    }
}
