// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Decoder for the packed polygon face buffer
//!
//! A face buffer is a flat sequence of records `[n, i0, i1, .. i(n-1)]` where
//! `n` is the arity of the polygon and `i*` index into the mesh vertex list.

use crate::error::{DensityError, Result};

/// Smallest arity a decoded face may have
pub const MIN_FACE_ARITY: usize = 3;

/// One polygon of a mesh, borrowed from the face buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face<'a> {
    pub indices: &'a [usize],
}

impl<'a> Face<'a> {
    /// Number of vertices in this polygon
    pub fn arity(&self) -> usize {
        self.indices.len()
    }

    /// Edges of the closed polygon as (from, to) index pairs,
    /// including the closing edge from the last vertex back to the first
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + 'a {
        let indices = self.indices;
        let n = indices.len();
        (0..n).map(move |i| (indices[i], indices[(i + 1) % n]))
    }
}

/// Legacy arity correction.
///
/// Old face buffers used the tokens `0` and `1` to mean triangle and quad.
/// Those tokens must be shifted by three before the record is consumed.
/// Keep this separate from the decoding loop so format changes cannot
/// silently reintroduce the ambiguity.
pub fn corrected_arity(token: usize) -> usize {
    match token {
        0 | 1 => token + 3,
        n => n,
    }
}

/// Lazy, single-pass decoder over a face buffer
///
/// Yields `Err(MalformedGeometry)` once and then stops if a record runs past
/// the end of the buffer or declares fewer than three vertices.
pub struct FaceDecoder<'a> {
    buffer: &'a [usize],
    cursor: usize,
    failed: bool,
}

impl<'a> FaceDecoder<'a> {
    pub fn new(buffer: &'a [usize]) -> Self {
        Self {
            buffer,
            cursor: 0,
            failed: false,
        }
    }

    /// Position of the next record in the buffer
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn fail(&mut self, reason: String) -> Option<Result<Face<'a>>> {
        self.failed = true;
        Some(Err(DensityError::malformed(reason)))
    }
}

impl<'a> Iterator for FaceDecoder<'a> {
    type Item = Result<Face<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.buffer.len() {
            return None;
        }

        let token = self.buffer[self.cursor];
        let arity = corrected_arity(token);

        if arity < MIN_FACE_ARITY {
            return self.fail(format!(
                "face at offset {} declares arity {} (minimum is {})",
                self.cursor, arity, MIN_FACE_ARITY
            ));
        }

        let start = self.cursor + 1;
        let end = match start.checked_add(arity) {
            Some(end) if end <= self.buffer.len() => end,
            _ => {
                return self.fail(format!(
                    "face at offset {} declares {} indices but only {} remain",
                    self.cursor,
                    arity,
                    self.buffer.len() - start
                ));
            }
        };

        self.cursor = end;
        Some(Ok(Face {
            indices: &self.buffer[start..end],
        }))
    }
}

impl std::iter::FusedIterator for FaceDecoder<'_> {}

/// Decode an entire face buffer
pub fn decode_faces(buffer: &[usize]) -> Result<Vec<Face<'_>>> {
    FaceDecoder::new(buffer).collect()
}

/// Count faces in a buffer without materializing them
pub fn count_faces(buffer: &[usize]) -> Result<usize> {
    let mut count = 0;
    for face in FaceDecoder::new(buffer) {
        face?;
        count += 1;
    }
    Ok(count)
}
