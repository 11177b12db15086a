//! Traits, structs, and functions relating to D64 disk images.

mod error;
mod image;

pub mod directory;

use std::fmt;

pub use self::directory::{DirectoryEntry, DiskDirectory, FileAttributes, FileType};
pub use self::error::DiskError;
pub use self::image::Image;

/// Every sector on a 1541 disk holds 256 bytes.
pub const BLOCK_SIZE: usize = 256;

/// For padding filenames, disk names, etc.
pub const PADDING_BYTE: u8 = 0xA0;

/// D64 image sizes.  A 35-track image holds 683 sectors and a 40-track image
/// 768; the error-table variants append one byte per sector.
const SIZE_35_TRACK: usize = 174_848;
const SIZE_35_TRACK_ERROR_TABLE: usize = 175_531;
const SIZE_40_TRACK: usize = 196_608;
const SIZE_40_TRACK_ERROR_TABLE: usize = 197_376;

/// D64 disk image layouts, derived solely from the total image size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiskType {
    /// A standard 35-track image.
    Tracks35,
    /// A 35-track image with an appended error table.
    Tracks35ErrorTable,
    /// A 40-track image.
    Tracks40,
    /// A 40-track image with an appended error table.
    Tracks40ErrorTable,
}

impl DiskType {
    /// Given a disk image size in bytes, return the matching disk type.
    /// There is no tolerance: any size other than the four recognized
    /// layouts yields None, which `DiskDirectory::read` escalates to a
    /// hard failure before touching any fixed offset.
    pub fn from_image_size(size: usize) -> Option<DiskType> {
        match size {
            SIZE_35_TRACK => Some(DiskType::Tracks35),
            SIZE_35_TRACK_ERROR_TABLE => Some(DiskType::Tracks35ErrorTable),
            SIZE_40_TRACK => Some(DiskType::Tracks40),
            SIZE_40_TRACK_ERROR_TABLE => Some(DiskType::Tracks40ErrorTable),
            _ => None,
        }
    }

    /// Return the number of tracks in this layout.
    pub fn tracks(&self) -> u8 {
        match self {
            DiskType::Tracks35 | DiskType::Tracks35ErrorTable => 35,
            DiskType::Tracks40 | DiskType::Tracks40ErrorTable => 40,
        }
    }

    /// Return true if the image carries an appended error table.
    pub fn has_error_table(&self) -> bool {
        match self {
            DiskType::Tracks35 | DiskType::Tracks40 => false,
            DiskType::Tracks35ErrorTable | DiskType::Tracks40ErrorTable => true,
        }
    }
}

impl fmt::Display for DiskType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            DiskType::Tracks35 => "35 tracks",
            DiskType::Tracks35ErrorTable => "35 tracks + error table",
            DiskType::Tracks40 => "40 tracks",
            DiskType::Tracks40ErrorTable => "40 tracks + error table",
        })
    }
}

/// A track and sector pair locating one block on the disk.  CBM DOS tracks
/// start at 1; track 0 in a chain link marks the end of the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location(pub u8, pub u8);

impl Location {
    pub fn new(track: u8, sector: u8) -> Location {
        Location(track, sector)
    }

    pub fn from_bytes(bytes: &[u8]) -> Location {
        Location(bytes[0], bytes[1])
    }

    pub fn track(&self) -> u8 {
        self.0
    }

    pub fn sector(&self) -> u8 {
        self.1
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}
