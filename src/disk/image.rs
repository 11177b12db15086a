use std::fs::File;
use std::io;
use std::path::Path;

use memmap::{Mmap, MmapOptions};

/// Provide backing storage (file or memory) for disk images.  Decoding only
/// ever needs a read-only view, so file access is a read-only memory map.
pub enum Image {
    ReadOnlyMap(Mmap),
    Memory(Box<[u8]>),
}

impl Image {
    /// Wrap an in-memory disk image.
    pub fn from_bytes(bytes: &[u8]) -> Image {
        Image::Memory(bytes.to_vec().into_boxed_slice())
    }

    /// Map an existing disk image file read-only.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> io::Result<Image> {
        let file = File::open(path)?;
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(Image::ReadOnlyMap(mmap))
    }

    pub fn len(&self) -> usize {
        match self {
            Image::ReadOnlyMap(mmap) => mmap.len(),
            Image::Memory(array) => array.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the full image contents as a byte slice.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Image::ReadOnlyMap(mmap) => &mmap[..],
            Image::Memory(array) => array,
        }
    }
}
