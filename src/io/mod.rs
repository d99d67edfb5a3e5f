// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - snapshot loading and discovery

mod discovery;
mod snapshot;

pub use discovery::discover_snapshots;
pub use snapshot::{displayable, fingerprint, read_snapshot, write_snapshot, Snapshot};
