use crate::disk::DiskDirectory;
use crate::render::{listing_lines, Render};

/// Render a directory as the classic text listing: a header line with the
/// disk name and ID, one line per entry with the block count, quoted
/// filename, and file type (suffixed with `*` for open files), and a
/// final blocks-free line.
pub struct ListingRenderer;

impl Render for ListingRenderer {
    type Output = String;

    fn render(&self, directory: &DiskDirectory) -> String {
        let mut output = String::new();
        for line in listing_lines(directory) {
            output.push_str(&line);
            output.push('\n');
        }
        output
    }
}
