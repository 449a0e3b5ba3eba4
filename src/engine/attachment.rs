use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use tracing::debug;

/// File name of the scanner output attached to a record
pub const DEFAULT_ATTACHMENT_NAME: &str = "output.json";

/// Find the attachment called `name` among the files of a record directory.
///
/// Only direct children are considered. Hidden files and files listed in
/// ignore files are still attachments, so no filtering is applied.
pub fn find_attachment(record_dir: &Path, name: &str) -> Result<Option<PathBuf>> {
    if !record_dir.is_dir() {
        anyhow::bail!("{} is not a record directory", record_dir.display());
    }

    let mut builder = WalkBuilder::new(record_dir);
    builder
        .standard_filters(false)
        .max_depth(Some(1))
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    for entry in builder.build() {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }
                if entry.file_name() == name {
                    debug!("Attachment found: {}", entry.path().display());
                    return Ok(Some(entry.into_path()));
                }
            }
            Err(e) => {
                debug!("Walk error: {}", e);
            }
        }
    }

    debug!("No attachment named {} in {}", name, record_dir.display());
    Ok(None)
}

/// Read the base64 payload stored in an attachment
pub fn read_payload(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read attachment {}", path.display()))
}
