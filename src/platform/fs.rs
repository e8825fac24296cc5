// LootSleuth - platform/fs.rs
//
// Filesystem helpers for the extractor and analyzer.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Outcome of reading a log file as strict UTF-8.
#[derive(Debug)]
pub enum TextRead {
    /// The full file content.
    Text(String),
    /// The file is not valid UTF-8; nothing was returned.
    InvalidEncoding,
}

/// Read a whole file as UTF-8 text.
///
/// Invalid UTF-8 is reported as `TextRead::InvalidEncoding` rather than
/// replaced, so the caller can skip the file before recording anything from
/// it. Other I/O failures are returned as `Err`.
pub fn read_text_strict(path: &Path) -> io::Result<TextRead> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(TextRead::Text(text)),
        Err(e) => {
            tracing::debug!(
                path = %path.display(),
                valid_up_to = e.utf8_error().valid_up_to(),
                "File is not valid UTF-8"
            );
            Ok(TextRead::InvalidEncoding)
        }
    }
}

/// Create (truncating) an output file behind a buffered writer.
pub fn create_output(path: &Path) -> io::Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new)
}

/// Regular files directly inside `dir`, in directory-listing order.
///
/// Subdirectories are not descended into. Entries that cannot be inspected
/// are logged and left out.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Cannot inspect directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect()
}
