//! Output archiving.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::Result;

/// What the packaging pass did: archived names and skipped names.
#[derive(Debug, Default)]
pub struct ArchiveSummary {
    pub added: Vec<String>,
    pub missing: Vec<String>,
}

/// Compress the listed files from `dir` into `dir/<archive_name>`.
///
/// A listed file that does not exist logs one warning and is skipped. Each
/// archived file's loose copy is removed right after it is written into the
/// archive, so a later failure leaves already-archived files deleted and the
/// rest on disk.
pub fn archive_outputs(dir: &Path, files: &[&str], archive_name: &str) -> Result<ArchiveSummary> {
    let archive_path = dir.join(archive_name);
    let mut zip = ZipWriter::new(File::create(&archive_path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut summary = ArchiveSummary::default();
    for name in files {
        let path = dir.join(name);
        if !path.exists() {
            warn!(file = name, "file not found and was not added to the archive");
            summary.missing.push(name.to_string());
            continue;
        }

        zip.start_file(*name, options)?;
        let mut source = File::open(&path)?;
        io::copy(&mut source, &mut zip)?;
        fs::remove_file(&path)?;
        debug!(file = name, "archived, loose copy removed");
        summary.added.push(name.to_string());
    }

    zip.finish()?;
    info!(
        archive = %archive_path.display(),
        added = summary.added.len(),
        missing = summary.missing.len(),
        "outputs archived"
    );
    Ok(summary)
}
