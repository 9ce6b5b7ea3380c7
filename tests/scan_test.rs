// test of the bank occupancy scanner
use p2kit::tape::{TapeImage,Coord,NUM_BANKS,BANK_SIZE};
use p2kit::fat;

fn blank_dump() -> Vec<u8> {
    vec![0xff;NUM_BANKS*BANK_SIZE]
}

#[test]
fn vacant_tape_scans_empty() {
    let img = TapeImage::from_bytes(&blank_dump()).expect("geometry rejected");
    assert_eq!(fat::scan_start_candidates(&img).len(),0);
}

#[test]
fn mark_position_becomes_candidate() {
    // the byte offset within the region is the block index, the value is not interpreted
    let mut dump = blank_dump();
    dump[2*BANK_SIZE + 5] = 0x07;
    let img = TapeImage::from_bytes(&dump).expect("geometry rejected");
    let candidates = fat::scan_start_candidates(&img);
    assert_eq!(candidates,vec![Coord { bank: 2, block: 5 }]);
}

#[test]
fn zero_byte_is_still_a_mark() {
    let mut dump = blank_dump();
    dump[3] = 0x00;
    let img = TapeImage::from_bytes(&dump).expect("geometry rejected");
    assert_eq!(fat::scan_start_candidates(&img),vec![Coord { bank: 0, block: 3 }]);
}

#[test]
fn candidates_come_in_bank_major_order() {
    let mut dump = blank_dump();
    dump[7*BANK_SIZE + 0] = 0x01;
    dump[0*BANK_SIZE + 255] = 0x01;
    dump[0*BANK_SIZE + 10] = 0x01;
    let img = TapeImage::from_bytes(&dump).expect("geometry rejected");
    let candidates = fat::scan_start_candidates(&img);
    assert_eq!(candidates,vec![
        Coord { bank: 0, block: 10 },
        Coord { bank: 0, block: 255 },
        Coord { bank: 7, block: 0 }
    ]);
}

#[test]
fn wrong_size_is_rejected() {
    assert!(TapeImage::from_bytes(&vec![0xff;1000]).is_err());
    assert!(TapeImage::from_bytes(&vec![0xff;NUM_BANKS*BANK_SIZE+1]).is_err());
}

#[test]
fn bank_bounds_are_guarded() {
    let img = TapeImage::from_bytes(&blank_dump()).expect("geometry rejected");
    assert!(img.meta_region(7).is_ok());
    assert!(img.meta_region(8).is_err());
    assert!(img.header_slot(Coord { bank: 8, block: 0 }).is_err());
    assert!(img.header_slot(Coord { bank: 0xff, block: 5 }).is_err());
}
