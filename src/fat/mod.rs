//! # File Allocation Module
//!
//! This recovers the file entries on a P2000T tape image.  The medium has
//! no directory in the usual sense: each bank's metadata slot region marks
//! which header slots are occupied, and every 64-byte header carries a
//! forward link to the next block of the same file.  Recovery is a scan
//! for start candidates followed by one walk per candidate.
//!
//! The reference tooling followed links with no termination bound, so a
//! corrupt tape could loop it forever.  The walker here tracks visited
//! coordinates and reports a cycle instead; since there are only 2048
//! slots on the medium this also bounds the walk.
//!
//! Everything in this module is a pure function over the image.

pub mod types;
pub mod display;

use std::collections::HashSet;
use log::{debug,error,warn};
use types::*;
use crate::tape::{self,Coord,TapeImage,NUM_BANKS,TOTAL_SLOTS};

/// Scan the metadata slot region of every bank for occupied slots.
/// Emits a coordinate for every byte position holding anything other than
/// the 0xFF fill, in bank-major then offset order.  This is a coarse
/// occupancy scan; whether a real header lives there is for the walker to
/// find out.  A fully vacant tape yields an empty list.
pub fn scan_start_candidates(img: &TapeImage) -> Vec<Coord> {
    let mut ans: Vec<Coord> = Vec::new();
    for bank in 0..NUM_BANKS {
        let region = img.meta_region(bank).expect("bank index unexpectedly out of range");
        for (offset,byte) in region.iter().enumerate() {
            if *byte != SLOT_VACANT {
                ans.push(Coord { bank: bank as u8, block: offset as u8 });
            }
        }
    }
    debug!("scan found {} start candidates",ans.len());
    ans
}

/// Decode the file header at the given coordinate.
/// A marker byte other than 0x00 means there is no header in this slot,
/// which callers treat as "stop here", not as damage.
pub fn read_record(img: &TapeImage,coord: Coord) -> Result<FileRecord,Error> {
    let slot = match img.header_slot(coord) {
        Ok(s) => s,
        Err(_) => return Err(Error::OutOfRange)
    };
    if slot[OFF_MARKER] != MARKER_PRESENT {
        return Err(Error::RecordAbsent);
    }
    // the filename is stored in two separated runs
    let fname_bytes = [
        &slot[OFF_FILENAME_1..OFF_FILENAME_1+LEN_FILENAME_1],
        &slot[OFF_FILENAME_2..OFF_FILENAME_2+LEN_FILENAME_2]
    ].concat();
    let filename = match String::from_utf8(fname_bytes) {
        Ok(s) => s,
        Err(_) => return Err(Error::MalformedText)
    };
    let extension = match String::from_utf8(slot[OFF_EXTENSION..OFF_EXTENSION+LEN_EXTENSION].to_vec()) {
        Ok(s) => s,
        Err(_) => return Err(Error::MalformedText)
    };
    Ok(FileRecord {
        filename,
        extension,
        current_bank: slot[OFF_CURRENT_BANK],
        current_block: slot[OFF_CURRENT_BLOCK],
        rom_address: u16::from_le_bytes([slot[OFF_ROM_ADDRESS],slot[OFF_ROM_ADDRESS+1]]),
        file_size: u16::from_le_bytes([slot[OFF_FILE_SIZE],slot[OFF_FILE_SIZE+1]]),
        total_blocks: slot[OFF_TOTAL_BLOCKS],
        next_bank: slot[OFF_NEXT_BANK],
        next_block: slot[OFF_NEXT_BLOCK]
    })
}

/// Walk one chain from the given start coordinate.
/// Returns `None` when there is no header at the start; a scanned slot can
/// legitimately be a stray metadata byte, so this is not an error.
/// A dangling or out-of-range link mid-chain truncates the walk, with the
/// last decodable header standing in as the terminal one.
pub fn walk_chain(img: &TapeImage,start: Coord) -> Result<Option<FileChain>,Error> {
    let mut record = match read_record(img,start) {
        Ok(r) => r,
        Err(Error::RecordAbsent) | Err(Error::OutOfRange) => return Ok(None),
        Err(e) => return Err(e)
    };
    let mut blocks = vec![start];
    let mut visited: HashSet<Coord> = HashSet::with_capacity(TOTAL_SLOTS);
    visited.insert(start);
    let mut end = ChainEnd::Sentinel;
    while !record.is_terminal() {
        let link = record.next();
        if !visited.insert(link) {
            error!("link at {} revisits {}",blocks[blocks.len()-1],link);
            return Err(Error::CycleDetected);
        }
        match read_record(img,link) {
            Ok(r) => {
                blocks.push(link);
                record = r;
            },
            Err(Error::RecordAbsent) | Err(Error::OutOfRange) => {
                warn!("chain from {} dangles at {}",start,link);
                end = ChainEnd::Dangling;
                break;
            },
            Err(e) => return Err(e)
        }
    }
    Ok(Some(FileChain { record, blocks, end }))
}

/// Walk every start candidate and gather the results in scan order.
/// Failures are local to one candidate: they are logged and skipped, the
/// rest of the tape is still recovered.  Invalid chains are kept, flagging
/// them is the display layer's business.
pub fn catalog(img: &TapeImage) -> Vec<FileChain> {
    let mut ans: Vec<FileChain> = Vec::new();
    for start in scan_start_candidates(img) {
        match walk_chain(img,start) {
            Ok(Some(chain)) => ans.push(chain),
            Ok(None) => debug!("no file header at {}",start),
            Err(e) => error!("skipping candidate {}: {}",start,e)
        }
    }
    ans
}

/// Find a file by name.  The name can be given as `NAME.EXT` or bare
/// `NAME`; header fields are space padded so the comparison trims.
pub fn find_file(img: &TapeImage,name: &str) -> Result<FileChain,Error> {
    for chain in catalog(img) {
        if chain.record.full_name()==name.trim() || chain.record.filename.trim_end()==name.trim() {
            return Ok(chain);
        }
    }
    Err(Error::FileNotFound)
}

/// Assemble a CAS file from a walked chain.
/// Every block becomes a 0x100 byte header, holding the 0x20 tape header
/// bytes from the slot at position 0x30, followed by the 1K data block.
/// This is the layout emulators expect of a `.cas` cassette file.
pub fn export_cas(img: &TapeImage,chain: &FileChain) -> Result<Vec<u8>,tape::Error> {
    let mut ans: Vec<u8> = Vec::new();
    for coord in &chain.blocks {
        let slot = img.header_slot(*coord)?;
        let mut header = vec![0;CAS_BLOCK_HEADER_SIZE];
        header[CAS_HEADER_POS..CAS_HEADER_POS+LEN_CAS_HEADER]
            .copy_from_slice(&slot[OFF_CAS_HEADER..OFF_CAS_HEADER+LEN_CAS_HEADER]);
        ans.append(&mut header);
        ans.extend_from_slice(img.data_block(*coord)?);
    }
    Ok(ans)
}
