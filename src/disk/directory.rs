//! The D64 directory decoder.
//!
//! A directory decode is a single read-only pass over the image bytes: the
//! disk name and ID come from fixed offsets in the header region, the free
//! block count is summed from the BAM, and the entries come from walking
//! the directory sector chain on track 18.

use std::fmt;
use std::io;

use crate::disk::{DiskError, DiskType, Location, BLOCK_SIZE, PADDING_BYTE};
use crate::petscii::Petscii;

// The fixed layout of the directory track.  All absolute offsets are
// relative to the start of the image and assume the standard track layout:
// track 18 begins at byte 0x16500, its sector 0 holds the BAM and the disk
// header fields, and its sector 1 (0x16600) is the first directory sector.
const DIRECTORY_OFFSET: usize = 0x16600; // 91648: track 18, sector 1
const FIRST_DIRECTORY_SECTOR: u8 = 1;
const DIRECTORY_TRACK: u8 = 18;
const BAM_FREE_OFFSET: usize = 0x16504; // 91396: first per-track free count
const BAM_FREE_STRIDE: usize = 4;
const BAM_TRACKS: usize = 35;
const DISK_NAME_OFFSET: usize = DIRECTORY_OFFSET - 0x70;
const DISK_NAME_SIZE: usize = 16;
const DISK_ID_OFFSET: usize = DIRECTORY_OFFSET - 0x5E;
const DISK_ID_SIZE: usize = 5;

const ENTRY_SIZE: usize = 32;
const ENTRY_FILE_ATTRIBUTE_OFFSET: usize = 0x02;
const ENTRY_FIRST_SECTOR_OFFSET: usize = 0x03;
const ENTRY_FILENAME_OFFSET: usize = 0x05;
const ENTRY_FILENAME_LENGTH: usize = 16;
const ENTRY_FILE_SIZE_OFFSET: usize = 0x1E;

/// The hard ceiling on the number of directory sectors visited in one
/// decode, matching the total track count of the disk.  This is a
/// corruption guard, not a format-guaranteed bound: disk images in the
/// wild rely on this exact leniency, so it must not be "corrected".
const MAX_DIRECTORY_SECTORS: usize = 18;

const FILE_TYPE_DEL: u8 = 0x00;
const FILE_TYPE_SEQ: u8 = 0x01;
const FILE_TYPE_PRG: u8 = 0x02;
const FILE_TYPE_USR: u8 = 0x03;
const FILE_TYPE_REL: u8 = 0x04;
const FILE_ATTRIB_FILE_TYPE_MASK: u8 = 0x07;
const FILE_ATTRIB_CLOSED_MASK: u8 = 0x80;

/// A directory entry categorizes files as SEQ, PRG, USR, or REL, along with
/// a pseudo-file-type of DEL to indicate deleted files.  The low three bits
/// of the attribute byte select the type; combinations above REL carry no
/// meaning and are preserved as Unknown.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum FileType {
    DEL,
    SEQ,
    PRG,
    USR,
    REL,
    Unknown(u8),
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            FileType::DEL => "DEL",
            FileType::SEQ => "SEQ",
            FileType::PRG => "PRG",
            FileType::USR => "USR",
            FileType::REL => "REL",
            FileType::Unknown(_) => "???",
        })
    }
}

/// The directory entry field which contains the file type along with the
/// closed flag.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FileAttributes {
    /// Bits 0-2 indicate the file type.
    pub file_type: FileType,
    /// Bit 7 is the "closed" flag.  Files are normally closed, so this bit
    /// is normally set.  Unclosed files are indicated in directory listings
    /// with a "*", leading to such files being known as "splat files".
    pub closed_flag: bool,
}

impl FileAttributes {
    /// Parse a byte into a `FileAttributes` struct.
    pub fn from_byte(byte: u8) -> FileAttributes {
        let file_type = match byte & FILE_ATTRIB_FILE_TYPE_MASK {
            FILE_TYPE_DEL => FileType::DEL,
            FILE_TYPE_SEQ => FileType::SEQ,
            FILE_TYPE_PRG => FileType::PRG,
            FILE_TYPE_USR => FileType::USR,
            FILE_TYPE_REL => FileType::REL,
            b => FileType::Unknown(b),
        };
        FileAttributes {
            file_type,
            closed_flag: byte & FILE_ATTRIB_CLOSED_MASK != 0,
        }
    }

    /// Return true if the file was not closed correctly.
    pub fn is_open(&self) -> bool {
        !self.closed_flag
    }
}

impl fmt::Display for FileAttributes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.file_type)?;
        if self.is_open() {
            write!(f, "*")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FileAttributes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        <FileType as fmt::Debug>::fmt(&self.file_type, f)?;
        if self.is_open() {
            f.write_str("*")?;
        }
        Ok(())
    }
}

/// One decoded directory entry.
#[derive(Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub file_attributes: FileAttributes,
    /// The location of the file's first data sector.  Stored as found on
    /// disk; not validated against track bounds.
    pub first_sector: Location,
    /// The filename with padding bytes dropped.
    pub filename: Petscii,
    /// The file size in blocks.
    pub file_size: u16,
}

impl DirectoryEntry {
    /// Parse a 32-byte directory entry slot.
    fn from_bytes(bytes: &[u8]) -> DirectoryEntry {
        assert_eq!(bytes.len(), ENTRY_SIZE);
        DirectoryEntry {
            file_attributes: FileAttributes::from_byte(bytes[ENTRY_FILE_ATTRIBUTE_OFFSET]),
            first_sector: Location::from_bytes(&bytes[ENTRY_FIRST_SECTOR_OFFSET..]),
            filename: Petscii::from_padded_bytes(
                &bytes[ENTRY_FILENAME_OFFSET..ENTRY_FILENAME_OFFSET + ENTRY_FILENAME_LENGTH],
                PADDING_BYTE,
            ),
            file_size: ((bytes[ENTRY_FILE_SIZE_OFFSET + 1] as u16) << 8)
                | (bytes[ENTRY_FILE_SIZE_OFFSET] as u16),
        }
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:<4} {:18}{}",
            self.file_size,
            format!("\"{}\"", self.filename),
            self.file_attributes
        )
    }
}

impl fmt::Debug for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?},{},{:?} @ {}",
            self.filename, self.file_size, self.file_attributes, self.first_sector
        )
    }
}

/// A fully decoded directory.  Constructed once from an immutable byte
/// buffer and never mutated afterward.
#[derive(Clone, PartialEq, Eq)]
pub struct DiskDirectory {
    pub disk_type: DiskType,
    /// The 16-byte disk name, kept verbatim including any embedded padding
    /// bytes.
    pub disk_name: Petscii,
    /// The 5-byte disk ID region (two-character ID, shifted space, and the
    /// two DOS type characters), kept verbatim.
    pub disk_id: Petscii,
    /// The sum of the BAM per-track free sector counts, excluding the
    /// directory track.
    pub free_blocks: usize,
    /// Entries in on-disk sector-chain order.  The order is the listing
    /// order and is semantically meaningful.
    pub entries: Vec<DirectoryEntry>,
}

impl DiskDirectory {
    /// Decode the directory of the provided disk image.  The only error
    /// condition is an image size matching no known layout; within a
    /// valid-size image, structural anomalies (corrupt chain links, bogus
    /// entries) degrade to a partial or empty entry list instead of
    /// failing.
    pub fn read(image: &[u8]) -> io::Result<DiskDirectory> {
        let disk_type = match DiskType::from_image_size(image.len()) {
            Some(disk_type) => disk_type,
            None => return Err(DiskError::InvalidLayout.into()),
        };

        Ok(DiskDirectory {
            disk_type,
            disk_name: Petscii::from_bytes(
                &image[DISK_NAME_OFFSET..DISK_NAME_OFFSET + DISK_NAME_SIZE],
            ),
            disk_id: Petscii::from_bytes(&image[DISK_ID_OFFSET..DISK_ID_OFFSET + DISK_ID_SIZE]),
            free_blocks: free_blocks(image),
            entries: read_entries(image),
        })
    }
}

impl fmt::Debug for DiskDirectory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "disk type: {}", self.disk_type)?;
        writeln!(f, "disk name: {:?}", self.disk_name)?;
        writeln!(f, "disk id: {:?}", self.disk_id)?;
        writeln!(f, "free blocks: {}", self.free_blocks)?;
        for entry in &self.entries {
            writeln!(f, "{:?}", entry)?;
        }
        Ok(())
    }
}

/// Sum the per-track free sector counts from the BAM.  The directory track
/// does not count toward the total; this matches the "blocks free" figure
/// CBM DOS prints at the end of a listing.
fn free_blocks(image: &[u8]) -> usize {
    let mut free = 0;
    for track in 1..=BAM_TRACKS {
        if track != DIRECTORY_TRACK as usize {
            free += image[BAM_FREE_OFFSET + (track - 1) * BAM_FREE_STRIDE] as usize;
        }
    }
    free
}

/// Return true if this slot is the all-zero terminator: start track, start
/// sector, and the low block-count byte are zero and the filename region is
/// sixteen zero bytes.  Empty trailing slots of this shape are a known
/// disk-protection trick, and encountering one halts the entire traversal.
fn is_terminator_slot(slot: &[u8]) -> bool {
    slot[ENTRY_FIRST_SECTOR_OFFSET] == 0
        && slot[ENTRY_FIRST_SECTOR_OFFSET + 1] == 0
        && slot[ENTRY_FILE_SIZE_OFFSET] == 0
        && slot[ENTRY_FILENAME_OFFSET..ENTRY_FILENAME_OFFSET + ENTRY_FILENAME_LENGTH]
            .iter()
            .all(|b| *b == 0)
}

/// Walk the directory sector chain and decode every entry slot.
///
/// The next sector's byte offset is computed from the delta between the
/// linked sector number and the current one, so the walk assumes that all
/// directory sectors live on a single track laid out contiguously in
/// ascending order.  That is a structural property of the standard D64
/// directory track, baked into the format rather than a generic algorithm;
/// do not generalize it to a track/sector offset table.
fn read_entries(image: &[u8]) -> Vec<DirectoryEntry> {
    let mut entries = Vec::new();
    let mut offset = DIRECTORY_OFFSET;
    let mut current_sector = FIRST_DIRECTORY_SECTOR;

    for _ in 0..MAX_DIRECTORY_SECTORS {
        let sector = &image[offset..offset + BLOCK_SIZE];
        let next = Location::from_bytes(sector);

        // Eight 32-byte entry slots per sector.
        for slot in sector.chunks(ENTRY_SIZE) {
            if is_terminator_slot(slot) {
                return entries;
            }
            entries.push(DirectoryEntry::from_bytes(slot));
        }

        // A zero next-track or next-sector link means this sector was the
        // last in the chain.
        if next.track() == 0 || next.sector() == 0 {
            break;
        }

        // Advance by the sector delta.  A link that would land outside the
        // image ends the walk; corrupt chains degrade instead of failing.
        let delta = BLOCK_SIZE as i64 * (next.sector() as i64 - current_sector as i64);
        let advanced = offset as i64 + delta;
        if advanced < 0 || advanced as usize + BLOCK_SIZE > image.len() {
            break;
        }
        offset = advanced as usize;
        current_sector = next.sector();
    }

    entries
}
