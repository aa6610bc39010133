use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::Path,
};

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::tag_page::REVALIDATE_SECS;

pub(crate) const MANIFEST_FILE: &str = "manifest.json";

/// Written next to the generated pages after every build.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl Manifest {
    /// Whether the output built at `generated_at` may still be served at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.generated_at < Duration::seconds(REVALIDATE_SECS)
    }
}

pub(crate) fn load_manifest(out_dir: &Path) -> Option<Manifest> {
    let manifest_path = out_dir.join(MANIFEST_FILE);
    if !manifest_path.exists() {
        info!("Manifest({manifest_path:?}) does not exist. ignoring...");
        return None;
    }
    let fd = match File::open(&manifest_path) {
        Ok(fd) => fd,
        Err(e) => {
            warn!("Cannot open manifest({manifest_path:?}): {e}");
            return None;
        }
    };
    match serde_json::from_reader(BufReader::new(fd)) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            warn!("Invalid manifest({manifest_path:?}): {e}");
            None
        }
    }
}

pub(crate) fn save_manifest(out_dir: &Path, manifest: &Manifest) -> anyhow::Result<()> {
    let fd = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(out_dir.join(MANIFEST_FILE))?;
    let writer = BufWriter::new(fd);
    serde_json::to_writer_pretty(writer, manifest)?;

    Ok(())
}
