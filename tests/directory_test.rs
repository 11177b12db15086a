use d64dir::disk::{DiskDirectory, DiskError, DiskType, FileType, Location};
use d64dir::render::{ListingRenderer, Render};
use rand::{Rng, XorShiftRng};

const D64_SIZE: usize = 174_848;
const D64_40_TRACK_SIZE: usize = 196_608;
const BLOCK_SIZE: usize = 256;

const TRACK_18_OFFSET: usize = 0x16500;
const BAM_FREE_OFFSET: usize = 0x16504;
const DISK_NAME_OFFSET: usize = 0x16600 - 0x70;
const DISK_ID_OFFSET: usize = 0x16600 - 0x5E;
const ENTRY_SIZE: usize = 32;

const PADDING_BYTE: u8 = 0xA0;

/// Sectors per track for the standard 35-track layout.
fn sectors_in_track(track: usize) -> u8 {
    match track {
        1..=17 => 21,
        18..=24 => 19,
        25..=30 => 18,
        _ => 17,
    }
}

/// Build synthetic disk images one field at a time.  Only the directory
/// track matters to the decoder, so everything else stays zeroed.
struct ImageBuilder {
    data: Vec<u8>,
}

impl ImageBuilder {
    /// Start from a formatted-looking 35-track image: full free counts on
    /// every track except the directory track, and a terminator-only first
    /// directory sector.
    fn new() -> ImageBuilder {
        let mut builder = ImageBuilder {
            data: vec![0u8; D64_SIZE],
        };
        for track in 1..=35 {
            let free = if track == 18 {
                sectors_in_track(track) - 2
            } else {
                sectors_in_track(track)
            };
            builder.data[BAM_FREE_OFFSET + (track - 1) * 4] = free;
        }
        builder
    }

    fn disk_name(mut self, name: &str) -> ImageBuilder {
        for (i, slot) in self.data[DISK_NAME_OFFSET..DISK_NAME_OFFSET + 16]
            .iter_mut()
            .enumerate()
        {
            *slot = *name.as_bytes().get(i).unwrap_or(&PADDING_BYTE);
        }
        self
    }

    fn disk_id(mut self, id: &[u8; 5]) -> ImageBuilder {
        self.data[DISK_ID_OFFSET..DISK_ID_OFFSET + 5].copy_from_slice(id);
        self
    }

    /// Byte offset of a directory-track sector.
    fn sector_offset(sector: u8) -> usize {
        TRACK_18_OFFSET + BLOCK_SIZE * sector as usize
    }

    /// Set the next-track/next-sector link of a directory sector.
    fn link(mut self, sector: u8, next_track: u8, next_sector: u8) -> ImageBuilder {
        let offset = Self::sector_offset(sector);
        self.data[offset] = next_track;
        self.data[offset + 1] = next_sector;
        self
    }

    /// Populate one 32-byte entry slot of a directory sector.
    fn entry(
        mut self,
        sector: u8,
        slot: usize,
        type_byte: u8,
        start: (u8, u8),
        name: &str,
        blocks: u16,
    ) -> ImageBuilder {
        assert!(slot < 8);
        let offset = Self::sector_offset(sector) + slot * ENTRY_SIZE;
        self.data[offset + 0x02] = type_byte;
        self.data[offset + 0x03] = start.0;
        self.data[offset + 0x04] = start.1;
        for (i, byte) in self.data[offset + 0x05..offset + 0x15].iter_mut().enumerate() {
            *byte = *name.as_bytes().get(i).unwrap_or(&PADDING_BYTE);
        }
        self.data[offset + 0x1E] = (blocks & 0xFF) as u8;
        self.data[offset + 0x1F] = (blocks >> 8) as u8;
        self
    }

    fn build(self) -> Vec<u8> {
        self.data
    }
}

#[test]
fn round_trip() {
    let image = ImageBuilder::new()
        .disk_name("TEST DISK")
        .disk_id(b"1A 2A")
        .entry(1, 0, 0x82, (17, 0), "HELLO", 12)
        .build();

    let directory = DiskDirectory::read(&image).unwrap();
    assert_eq!(directory.disk_type, DiskType::Tracks35);
    assert_eq!(directory.disk_name.to_string(), "TEST DISK       ");
    assert_eq!(directory.disk_id.to_string(), "1A 2A");
    // Every track is free except the directory track, which never counts.
    assert_eq!(directory.free_blocks, 664);

    assert_eq!(directory.entries.len(), 1);
    let entry = &directory.entries[0];
    assert_eq!(entry.filename.to_string(), "HELLO");
    assert_eq!(entry.file_attributes.file_type, FileType::PRG);
    assert!(!entry.file_attributes.is_open());
    assert_eq!(entry.first_sector, Location(17, 0));
    assert_eq!(entry.file_size, 12);

    let listing = ListingRenderer.render(&directory);
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines[0], "0 \"TEST DISK       \" 1A 2A");
    assert_eq!(lines[1], "12   \"HELLO\"            PRG");
    assert_eq!(lines[2], "664 BLOCKS FREE.");
}

#[test]
fn decoding_is_idempotent() {
    let image = ImageBuilder::new()
        .disk_name("TWICE")
        .disk_id(b"XY 2A")
        .entry(1, 0, 0x81, (19, 11), "FIRST", 3)
        .entry(1, 1, 0x02, (20, 0), "SECOND", 101)
        .build();

    let first = DiskDirectory::read(&image).unwrap();
    let second = DiskDirectory::read(&image).unwrap();
    assert_eq!(first, second);
}

#[test]
fn forty_track_detection() {
    let mut image = vec![0u8; D64_40_TRACK_SIZE];
    image[BAM_FREE_OFFSET] = 21;
    let directory = DiskDirectory::read(&image).unwrap();
    assert_eq!(directory.disk_type, DiskType::Tracks40);
    assert_eq!(directory.free_blocks, 21);
    // The first slot is all zeros, so the listing is empty.
    assert!(directory.entries.is_empty());
}

#[test]
fn invalid_sizes_fail_before_decoding() {
    for size in [0usize, 512, 174_847, 174_849, 175_530, 196_609] {
        let image = vec![0u8; size];
        let error = DiskDirectory::read(&image).unwrap_err();
        assert_eq!(error, DiskError::InvalidLayout);
    }
}

#[test]
fn entries_follow_chain_order() {
    let mut builder = ImageBuilder::new().link(1, 18, 4);
    for slot in 0..8 {
        let name = format!("FILE{:02}", slot + 1);
        builder = builder.entry(1, slot, 0x82, (17, slot as u8), &name, 1);
    }
    builder = builder
        .entry(4, 0, 0x82, (19, 0), "FILE09", 1)
        .entry(4, 1, 0x82, (19, 1), "FILE10", 1);
    let image = builder.build();

    let directory = DiskDirectory::read(&image).unwrap();
    assert_eq!(directory.entries.len(), 10);
    for (i, entry) in directory.entries.iter().enumerate() {
        assert_eq!(entry.filename.to_string(), format!("FILE{:02}", i + 1));
    }
}

#[test]
fn terminator_halts_traversal() {
    // Sector 1 holds three entries, then a terminator slot; the slots after
    // it and the linked sector 4 must never be visited.
    let image = ImageBuilder::new()
        .link(1, 18, 4)
        .entry(1, 0, 0x82, (17, 0), "KEEP1", 1)
        .entry(1, 1, 0x82, (17, 1), "KEEP2", 1)
        .entry(1, 2, 0x82, (17, 2), "KEEP3", 1)
        // Slot 3 stays zeroed: the terminator.
        .entry(1, 4, 0x82, (17, 4), "DROPPED", 1)
        .entry(4, 0, 0x82, (19, 0), "UNREACHED", 1)
        .build();

    let directory = DiskDirectory::read(&image).unwrap();
    let names: Vec<String> = directory
        .entries
        .iter()
        .map(|e| e.filename.to_string())
        .collect();
    assert_eq!(names, ["KEEP1", "KEEP2", "KEEP3"]);
}

#[test]
fn open_and_unknown_file_types() {
    let image = ImageBuilder::new()
        .entry(1, 0, 0x01, (19, 3), "SPLAT", 7)
        .entry(1, 1, 0x87, (19, 4), "ODD", 2)
        .build();

    let directory = DiskDirectory::read(&image).unwrap();
    assert_eq!(directory.entries.len(), 2);
    assert_eq!(directory.entries[0].file_attributes.file_type, FileType::SEQ);
    assert!(directory.entries[0].file_attributes.is_open());
    assert_eq!(
        directory.entries[1].file_attributes.file_type,
        FileType::Unknown(0x07)
    );
    assert!(!directory.entries[1].file_attributes.is_open());

    let listing = ListingRenderer.render(&directory);
    let lines: Vec<&str> = listing.lines().collect();
    assert!(lines[1].ends_with("SEQ*"));
    assert!(lines[2].ends_with("???"));
}

#[test]
fn self_referential_chain_is_bounded() {
    // Sector 1 links to itself, so the chain never reaches a zero link.
    // The walk must stop at the hard ceiling of 18 sectors, yielding the
    // same 8 entries once per iteration.
    let mut builder = ImageBuilder::new().link(1, 18, 1);
    for slot in 0..8 {
        builder = builder.entry(1, slot, 0x82, (17, slot as u8), "LOOP", 1);
    }
    let image = builder.build();

    let directory = DiskDirectory::read(&image).unwrap();
    assert_eq!(directory.entries.len(), 18 * 8);
}

#[test]
fn random_directory_tracks_never_break_decoding() {
    const ITERATIONS: usize = 100;
    const MAX_ENTRIES: usize = 18 * 8;
    const RNG_SEED: [u8; 16] = [
        0x04, 0xC1, 0x1D, 0xB7, 0x1E, 0xDC, 0x6F, 0x41, 0x74, 0x1B, 0x8C, 0xD7, 0x32, 0x58, 0x34,
        0x99,
    ];

    let mut rng: XorShiftRng = rand::SeedableRng::from_seed(RNG_SEED);
    for _ in 0..ITERATIONS {
        let mut image = vec![0u8; D64_SIZE];
        // Fill the whole directory track with noise: free counts, header
        // fields, chain links, and entry slots all become garbage.
        rng.fill(&mut image[TRACK_18_OFFSET..TRACK_18_OFFSET + 19 * BLOCK_SIZE]);
        let directory = DiskDirectory::read(&image).unwrap();
        assert!(directory.entries.len() <= MAX_ENTRIES);
        assert_eq!(directory.disk_name.as_bytes().len(), 16);
        assert_eq!(directory.disk_id.as_bytes().len(), 5);
    }
}
