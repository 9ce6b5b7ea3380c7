use std::fmt;
use crate::tape::Coord;

/// fill byte marking a vacant metadata slot
pub const SLOT_VACANT: u8 = 0xff;
/// marker byte value for a present file header
pub const MARKER_PRESENT: u8 = 0x00;
/// forward link value denoting chain termination; both the bank and the
/// block field must carry it independently
pub const LINK_SENTINEL: u8 = 0xff;

/// header slot offsets, relative to the slot base
pub const OFF_CURRENT_BANK: usize = 0x00;
pub const OFF_ROM_ADDRESS: usize = 0x01;
pub const OFF_NEXT_BANK: usize = 0x03;
pub const OFF_NEXT_BLOCK: usize = 0x04;
pub const OFF_MARKER: usize = 0x08;
pub const OFF_CURRENT_BLOCK: usize = 0x09;
pub const OFF_TOTAL_BLOCKS: usize = 0x0a;
pub const OFF_FILE_SIZE: usize = 0x22;
pub const OFF_FILENAME_1: usize = 0x26;
pub const OFF_EXTENSION: usize = 0x2e;
pub const OFF_FILENAME_2: usize = 0x37;
pub const LEN_FILENAME_1: usize = 8;
pub const LEN_EXTENSION: usize = 3;
pub const LEN_FILENAME_2: usize = 7;
/// offset and length of the tape header bytes copied into a CAS block
pub const OFF_CAS_HEADER: usize = 0x20;
pub const LEN_CAS_HEADER: usize = 0x20;
/// position of the tape header within a 0x100 byte CAS block header
pub const CAS_HEADER_POS: usize = 0x30;
pub const CAS_BLOCK_HEADER_SIZE: usize = 0x100;

/// Enumerates FAT errors.  The `Display` trait will print the long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("no file header at this slot")]
    RecordAbsent,
    #[error("header text fields are not valid text")]
    MalformedText,
    #[error("link runs outside the tape geometry")]
    OutOfRange,
    #[error("chain of links loops back on itself")]
    CycleDetected,
    #[error("file not found")]
    FileNotFound
}

/// One decoded 64-byte file header.  The reference tooling kept this as a
/// loose key-value map; a fixed shape gives us field presence for free.
/// `current_bank` and `current_block` are the header's own claim about
/// where it lives, which real tapes do not always round-trip, so they are
/// never checked against the coordinate used to fetch the header.
#[derive(Clone,PartialEq,Debug)]
pub struct FileRecord {
    pub filename: String,
    pub extension: String,
    pub current_bank: u8,
    pub current_block: u8,
    pub rom_address: u16,
    pub file_size: u16,
    pub total_blocks: u8,
    pub next_bank: u8,
    pub next_block: u8
}

impl FileRecord {
    /// True when the forward link is the termination sentinel.
    /// Both fields must carry 0xFF; a partial sentinel still links.
    pub fn is_terminal(&self) -> bool {
        self.next_bank==LINK_SENTINEL && self.next_block==LINK_SENTINEL
    }
    /// Forward link target, meaningless if `is_terminal`.
    pub fn next(&self) -> Coord {
        Coord { bank: self.next_bank, block: self.next_block }
    }
    /// Filename and extension joined the way the P2000T displays them.
    pub fn full_name(&self) -> String {
        [self.filename.trim_end(),".",self.extension.trim_end()].concat()
    }
}

/// How a chain walk came to an end.
#[derive(PartialEq,Eq,Clone,Copy,Debug)]
pub enum ChainEnd {
    /// the terminal header carried the (0xFF,0xFF) sentinel
    Sentinel,
    /// a forward link led to a vacant slot or outside the tape
    Dangling
}

/// The result of one chain walk: the terminal header, the coordinates
/// visited in order, and the way the walk ended.  A transient diagnostic
/// value, it does not borrow from the image.
#[derive(Clone,Debug)]
pub struct FileChain {
    pub record: FileRecord,
    pub blocks: Vec<Coord>,
    pub end: ChainEnd
}

impl FileChain {
    /// The chain is valid when the terminal header's declared block count
    /// matches the number of blocks actually visited.
    pub fn is_valid(&self) -> bool {
        self.record.total_blocks as usize == self.blocks.len()
    }
    /// True when the walk ended on the sentinel rather than a dangling link.
    pub fn is_complete(&self) -> bool {
        self.end == ChainEnd::Sentinel
    }
}

impl fmt::Display for FileChain {
    /// Renders the block list as `bb.ss->bb.ss->...`
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strings: Vec<String> = self.blocks.iter().map(|c| c.to_string()).collect();
        write!(f,"{}",strings.join("->"))
    }
}
