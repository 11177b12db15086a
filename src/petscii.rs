//! Petscii strings.
//!
//! Filenames, disk names, and disk IDs are stored on disk as Petscii bytes.
//! This type keeps the raw bytes and converts to Unicode only for display,
//! so no information is lost for bytes with no printable equivalent.

use std::fmt;
use std::fmt::Write;

/// A Petscii string, stored as its raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Petscii(Vec<u8>);

impl Petscii {
    /// Wrap the provided bytes verbatim.
    pub fn from_bytes(bytes: &[u8]) -> Petscii {
        Petscii(bytes.to_vec())
    }

    /// Wrap the provided bytes, dropping every occurrence of the padding
    /// byte.  Fixed-width fields such as filenames are padded with 0xA0;
    /// in well-formed entries the pads only trail the name, but CBM DOS
    /// drops them wherever they appear and so do we.
    pub fn from_padded_bytes(bytes: &[u8], padding: u8) -> Petscii {
        Petscii(bytes.iter().cloned().filter(|b| *b != padding).collect())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Map a single Petscii byte to a Unicode character.  The mapping reflects
/// the C64's uppercase/graphics character set: the ASCII-overlapping range
/// passes through, shifted letters fold to their ASCII forms, the shifted
/// space becomes a regular space, and everything else is replaced.
fn petscii_to_char(byte: u8) -> char {
    match byte {
        0x20..=0x7E => byte as char,
        0xA0 => ' ',
        0xC1..=0xDA => (byte - 0x80) as char,
        _ => '\u{FFFD}',
    }
}

impl fmt::Display for Petscii {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in &self.0 {
            f.write_char(petscii_to_char(*byte))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Petscii {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

impl<'a> From<&'a str> for Petscii {
    fn from(string: &str) -> Petscii {
        // Best-effort: ASCII-overlapping characters map directly, anything
        // else becomes a question mark.
        Petscii(
            string
                .chars()
                .map(|c| match c {
                    ' '..='~' => c as u8,
                    _ => b'?',
                })
                .collect(),
        )
    }
}

impl AsRef<[u8]> for Petscii {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
