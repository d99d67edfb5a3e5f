// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Report output for analysis runs

mod reporter;

pub use reporter::Reporter;
