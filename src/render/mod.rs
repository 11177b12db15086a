//! Renderers for decoded directories.
//!
//! A renderer consumes a `DiskDirectory` and produces some output
//! representation; the directory structures are the only contract between
//! the decoder and a renderer.

mod listing;
mod screen;

use crate::disk::DiskDirectory;

pub use self::listing::ListingRenderer;
pub use self::screen::ScreenRenderer;

/// Render a decoded directory into a renderer-specific output type.
pub trait Render {
    type Output;

    fn render(&self, directory: &DiskDirectory) -> Self::Output;
}

/// Build the textual content of a directory listing, one line per element:
/// the header line, one line per entry, and the blocks-free line.  Both
/// renderers work from this same content.
pub(crate) fn listing_lines(directory: &DiskDirectory) -> Vec<String> {
    let mut lines = Vec::with_capacity(directory.entries.len() + 2);
    lines.push(format!(
        "0 \"{}\" {}",
        directory.disk_name, directory.disk_id
    ));
    for entry in &directory.entries {
        let name_cell = format!("{:<5}\"{}\"", entry.file_size, entry.filename);
        lines.push(format!("{:<24}{}", name_cell, entry.file_attributes));
    }
    lines.push(format!("{} BLOCKS FREE.", directory.free_blocks));
    lines
}
