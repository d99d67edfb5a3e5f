// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Snapshot discovery for batch runs

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn is_json(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

/// Find `.json` snapshots under the given paths, sorted
pub fn discover_snapshots(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut snapshots = Vec::new();

    for path in paths {
        if is_json(path) {
            snapshots.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if is_json(entry.path()) {
                    snapshots.push(entry.path().to_path_buf());
                }
            }
        }
    }

    snapshots.sort();
    snapshots
}
