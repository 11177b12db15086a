use crate::disk::DiskDirectory;
use crate::render::{listing_lines, Render};

/// Render a directory as rows of C64 screen codes, one row per listing
/// line.  Screen codes index the character generator ROM's 8x8 glyph
/// cells, so this output can drive a character atlas directly.  On the
/// header row, everything after the leading `0 ` is rendered from the
/// inverse glyph set (bit 7 set), just as the 1541 directory header
/// appears on a real machine.
pub struct ScreenRenderer;

/// The column at which the header row switches to inverse glyphs.
const HEADER_INVERSE_COLUMN: usize = 2;

impl Render for ScreenRenderer {
    type Output = Vec<Vec<u8>>;

    fn render(&self, directory: &DiskDirectory) -> Vec<Vec<u8>> {
        listing_lines(directory)
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(column, c)| {
                        let code = char_to_screen_code(c);
                        if row == 0 && column >= HEADER_INVERSE_COLUMN {
                            code | 0x80
                        } else {
                            code
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Map a listing character to a screen code.  Listing text is ASCII by
/// construction; anything else falls back to a question mark.
fn char_to_screen_code(c: char) -> u8 {
    if c.is_ascii() {
        petscii_to_screen_code(c as u8)
    } else {
        petscii_to_screen_code(b'?')
    }
}

/// The fixed Petscii to screen code substitution.  This is a byte-to-byte
/// range remapping, not a decoding step; it only matters for display.
fn petscii_to_screen_code(petscii: u8) -> u8 {
    match petscii {
        0x00..=0x1F => petscii + 0x80,
        0x20..=0x3F => petscii,
        0x40..=0x5F => petscii - 0x40,
        0x60..=0x7F => petscii - 0x20,
        0x80..=0x9F => petscii + 0x40,
        0xA0..=0xBF => petscii - 0x40,
        0xC0..=0xFE => petscii - 0x80,
        0xFF => 0x5E,
    }
}
