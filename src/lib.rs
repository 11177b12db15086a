//! This is a Rust library for decoding the directory of 1541 (D64) disk
//! images, the standard on-disk format of the legendary Commodore 64 home
//! computer.
//!
//! Features:
//!
//! * Detect the disk layout (35 or 40 tracks, with or without an appended
//! error table) from the image size.
//! * Extract the disk name and ID from the header region.
//! * Sum the per-track free sector counts from the Block Availability Map
//! (BAM).
//! * Walk the directory sector chain and decode each entry: filename, file
//! type, start location, block count, and open/closed state.
//! * Render a decoded directory as a classic `LOAD"$",8` style text listing,
//! or as rows of C64 screen codes suitable for driving a character ROM.
//! * A sample `ddir` program for listing D64 disk images from the command
//! line.
//! * Convert Petscii filenames to Unicode.
//!
//! Decoding is strictly read-only and deliberately permissive: images found
//! in the wild (copy-protected and hand-crafted disks in particular) contain
//! corrupt directory chains and bogus entries, and the decoder absorbs these
//! rather than failing.  The only hard error is an image whose size matches
//! no known layout.
//!
//! # Example
//!
//! The following example opens a disk image, decodes the directory, and
//! prints a text listing:
//!
//! ```no_run
//! use std::io;
//! use d64dir::disk::{DiskDirectory, Image};
//! use d64dir::render::{ListingRenderer, Render};
//! # fn list(disk_image_filename: &str) -> io::Result<()> {
//!
//! // Map the disk image read-only
//! let image = Image::open_read_only(disk_image_filename)?;
//!
//! // Decode the directory
//! let directory = DiskDirectory::read(image.bytes())?;
//!
//! // Render and print
//! print!("{}", ListingRenderer.render(&directory));
//! # Ok(())
//! # }
//! ```
//!
//! On a typical disk image, the output looks like this:
//!
//! ```text
//! 0 "TEST DISK       " 1A 2A
//! 12   "HELLO"            PRG
//! 652 BLOCKS FREE.
//! ```
//!
//! # Design of directory decoding
//!
//! The decoder is a single pass over an immutable byte buffer:
//!
//! 1. `DiskType` is derived solely from the total byte length; a length
//!    matching no known layout fails the decode before any offset is read.
//! 2. The disk name, disk ID, and BAM free counts live at fixed absolute
//!    offsets relative to the directory track and are read directly.
//! 3. The directory chain is walked sector by sector, eight 32-byte entry
//!    slots per sector, until a terminator slot, a zero next-sector link,
//!    or the hard iteration ceiling is reached.
//!
//! Because decoding never mutates the buffer and keeps no shared state,
//! independent images may be decoded concurrently without synchronization.
//!
//! # License
//!
//! Distributed under the terms of both the MIT license and the Apache
//! License (Version 2.0).

pub mod disk;
pub mod render;

mod petscii;

pub use crate::petscii::Petscii;
