// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Object snapshots handed to the analyzer

use crate::error::Result;
use crate::geometry::GeometryObject;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Flattened object list received for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub objects: Vec<GeometryObject>,
    /// SHA-256 of the bytes this snapshot was read from
    #[serde(skip)]
    pub fingerprint: String,
}

impl Snapshot {
    pub fn new(objects: Vec<GeometryObject>) -> Self {
        Self {
            objects,
            fingerprint: String::new(),
        }
    }

    /// Parse a JSON snapshot and fingerprint its bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut snapshot: Snapshot = serde_json::from_slice(bytes)?;
        snapshot.fingerprint = fingerprint(bytes);
        Ok(snapshot)
    }

    /// Objects eligible for analysis, see [`displayable`]
    pub fn into_displayable(self) -> Vec<GeometryObject> {
        displayable(self.objects)
    }
}

/// Read a JSON snapshot from disk
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<Snapshot> {
    let bytes = fs::read(path.as_ref())?;
    Snapshot::from_bytes(&bytes)
}

/// Write objects as a JSON snapshot
pub fn write_snapshot(objects: &[GeometryObject], path: impl AsRef<Path>) -> Result<()> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        objects: &'a [GeometryObject],
    }

    let json = serde_json::to_string_pretty(&Borrowed { objects })?;
    fs::write(path, json)?;
    Ok(())
}

/// Hex SHA-256 digest of snapshot bytes
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Keep displayable objects, first occurrence of each id only
pub fn displayable(objects: Vec<GeometryObject>) -> Vec<GeometryObject> {
    let mut seen = AHashSet::new();
    objects
        .into_iter()
        .filter(|object| object.is_displayable())
        .filter(|object| {
            let fresh = seen.insert(object.id.clone());
            if !fresh {
                tracing::warn!(object = %object.id, "Dropping duplicate object id");
            }
            fresh
        })
        .collect()
}
