//! Asset extraction from game archives.
//!
//! Copies `.json` and `.png` entries under a path prefix out of a ZIP archive
//! into a directory, keeping their archive-relative layout so the result can
//! be loaded back as a directory pack.

use crate::error::Result;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Prefix used when no filter is given.
pub const DEFAULT_FILTER: &str = "assets/minecraft/";

/// Counts reported after an extraction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub extracted: usize,
    pub skipped: usize,
}

/// Extract asset entries from the archive at `jar` into `out_dir`.
pub fn extract_assets(jar: &Path, out_dir: &Path, filter: &str) -> Result<ExtractSummary> {
    let data = std::fs::read(jar)?;
    extract_assets_from_bytes(&data, out_dir, filter)
}

/// Extract asset entries from in-memory ZIP data.
///
/// Only entries whose name starts with `filter` and ends in `.json` or `.png`
/// are written. Entries whose names would escape `out_dir` are skipped.
pub fn extract_assets_from_bytes(data: &[u8], out_dir: &Path, filter: &str) -> Result<ExtractSummary> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data))?;
    let mut summary = ExtractSummary::default();

    log::info!("archive has {} entries", archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() || !is_asset(file.name(), filter) {
            continue;
        }

        let Some(relative) = file.enclosed_name() else {
            log::warn!("skipping entry with unsafe path: {}", file.name());
            summary.skipped += 1;
            continue;
        };
        let target: PathBuf = out_dir.join(relative);

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        std::fs::write(&target, bytes)?;

        log::debug!("extracted {}", target.display());
        summary.extracted += 1;
    }

    log::info!(
        "extracted {} assets into {} ({} skipped)",
        summary.extracted,
        out_dir.display(),
        summary.skipped
    );
    Ok(summary)
}

fn is_asset(name: &str, filter: &str) -> bool {
    name.starts_with(filter) && (name.ends_with(".json") || name.ends_with(".png"))
}
