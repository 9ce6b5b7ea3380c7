//! # Tape Image Module
//!
//! The P2000T stores files on a cassette-backed medium that is dumped as a
//! flat byte sequence of 8 banks, 64K each.  The first 256 bytes of every
//! bank form a metadata slot region, followed by 64-byte file headers and,
//! from offset 0x1000, the 1K data blocks themselves.
//!
//! This module knows the geometry and nothing else.  It hands out read-only
//! slices of the dump; interpreting them is left to the `fat` module.
//! Every accessor is bounds-checked, so a corrupt forward link can never
//! reach outside the image.

use std::fmt;
use std::str::FromStr;

/// number of banks in a full dump
pub const NUM_BANKS: usize = 8;
/// length of one bank in bytes
pub const BANK_SIZE: usize = 0x10000;
/// length of the metadata slot region at the start of each bank
pub const META_REGION_SIZE: usize = 0x100;
/// length of one file header slot
pub const HEADER_SLOT_SIZE: usize = 0x40;
/// offset of the data area within a bank
pub const DATA_OFFSET: usize = 0x1000;
/// length of one data block
pub const DATA_BLOCK_SIZE: usize = 0x400;
/// data blocks that fit between the data offset and the end of a bank
pub const DATA_BLOCKS_PER_BANK: usize = (BANK_SIZE - DATA_OFFSET) / DATA_BLOCK_SIZE;
/// total header slots on the medium, upper bound for any chain
pub const TOTAL_SLOTS: usize = NUM_BANKS * 256;

/// Enumerates tape image errors.  The `Display` trait will print the long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("image size did not match the tape geometry")]
    ImageSizeMismatch,
    #[error("bank or block coordinate out of range")]
    CoordinateOutOfRange,
    #[error("coordinate could not be parsed, expected `bank.block`")]
    BadCoordinate
}

/// Locates a header slot on the tape as a (bank,block) pair.
/// Appears both as a scan result and as a forward link target.
/// Displays as `bb.ss` with two-digit decimal fields, and can be
/// parsed back from the same form.
#[derive(PartialEq,Eq,Clone,Copy,Hash,Debug)]
pub struct Coord {
    pub bank: u8,
    pub block: u8
}

impl fmt::Display for Coord {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,"{:02}.{:02}",self.bank,self.block)
    }
}

impl FromStr for Coord {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self,Self::Err> {
        let mut iter = s.split('.');
        let bank = match iter.next() {
            Some(b) => u8::from_str(b).or(Err(Error::BadCoordinate))?,
            None => return Err(Error::BadCoordinate)
        };
        let block = match iter.next() {
            Some(b) => u8::from_str(b).or(Err(Error::BadCoordinate))?,
            None => return Err(Error::BadCoordinate)
        };
        if iter.next().is_some() {
            return Err(Error::BadCoordinate);
        }
        Ok(Self { bank, block })
    }
}

/// Read-only view of a full tape dump.  The image takes ownership of the
/// bytes; all accessors borrow.  Nothing here writes, the medium is
/// diagnostic input only.
pub struct TapeImage {
    data: Vec<u8>
}

impl TapeImage {
    /// Wrap a raw dump.  The length must be exactly 8 banks.
    pub fn from_bytes(data: &[u8]) -> Result<Self,Error> {
        if data.len() != NUM_BANKS * BANK_SIZE {
            return Err(Error::ImageSizeMismatch);
        }
        Ok(Self { data: data.to_vec() })
    }
    /// The metadata slot region of a bank, one occupancy byte per block.
    pub fn meta_region(&self,bank: usize) -> Result<&[u8],Error> {
        if bank >= NUM_BANKS {
            return Err(Error::CoordinateOutOfRange);
        }
        let beg = bank * BANK_SIZE;
        Ok(&self.data[beg..beg+META_REGION_SIZE])
    }
    /// The 64-byte file header slot at the given coordinate.
    /// Any u8 is a legal block index; the bank is checked.
    pub fn header_slot(&self,coord: Coord) -> Result<&[u8],Error> {
        if coord.bank as usize >= NUM_BANKS {
            return Err(Error::CoordinateOutOfRange);
        }
        let beg = META_REGION_SIZE + coord.block as usize * HEADER_SLOT_SIZE
            + coord.bank as usize * BANK_SIZE;
        Ok(&self.data[beg..beg+HEADER_SLOT_SIZE])
    }
    /// The 1K data block belonging to the given coordinate.
    /// Unlike header slots, only the first 60 block indices map into the
    /// bank's data area, so the block index is checked as well.
    pub fn data_block(&self,coord: Coord) -> Result<&[u8],Error> {
        if coord.bank as usize >= NUM_BANKS || coord.block as usize >= DATA_BLOCKS_PER_BANK {
            return Err(Error::CoordinateOutOfRange);
        }
        let beg = coord.bank as usize * BANK_SIZE + DATA_OFFSET
            + coord.block as usize * DATA_BLOCK_SIZE;
        Ok(&self.data[beg..beg+DATA_BLOCK_SIZE])
    }
}

#[test]
fn coordinate_strings() {
    let coord = Coord::from_str("01.13").expect("parse failed");
    assert_eq!(coord,Coord { bank: 1, block: 13 });
    assert_eq!(coord.to_string(),"01.13");
    assert!(Coord::from_str("1").is_err());
    assert!(Coord::from_str("1.2.3").is_err());
    assert!(Coord::from_str("one.two").is_err());
}
