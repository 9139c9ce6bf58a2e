// SPDX-License-Identifier: GPL-3.0-only

//! Batch export
//!
//! Writes a reviewed batch to disk, one PNG per still, preserving capture
//! order. Files share one timestamp and are distinguished by their 1-based
//! index, so a batch sorts contiguously in a directory listing.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::EXPORT_FILE_PREFIX;
use crate::errors::BoothResult;
use crate::pipelines::photo::EncodedStill;

/// Export a batch into `output_dir`, returning the written paths in order
pub async fn export_batch(batch: &[EncodedStill], output_dir: &Path) -> BoothResult<Vec<PathBuf>> {
    tokio::fs::create_dir_all(output_dir).await?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let mut paths = Vec::with_capacity(batch.len());

    for (index, still) in batch.iter().enumerate() {
        let filename = format!("{}-{}-{}.png", EXPORT_FILE_PREFIX, timestamp, index + 1);
        let path = output_dir.join(filename);
        tokio::fs::write(&path, &still.data).await?;
        info!(path = %path.display(), "Photo exported");
        paths.push(path);
    }

    Ok(paths)
}
