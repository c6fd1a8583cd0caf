// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! UTF-16 offset helpers.
//!
//! Block text is stored as a Rust `String`, but every offset and length in
//! the document model counts UTF-16 code units, matching the editing surface
//! and the persisted encoding. Offsets are resolved against a
//! [`Utf16String`] copy of the text.

use widestring::{Utf16Str, Utf16String};

/// Length of `text` in UTF-16 code units.
pub(crate) fn len(text: &str) -> usize {
    Utf16String::from_str(text).len()
}

/// Clamp `offset` to `units` and round it down to a character boundary,
/// so an offset between the halves of a surrogate pair lands before it.
fn floor_boundary(units: &Utf16Str, offset: usize) -> usize {
    let mut offset = offset.min(units.len());
    while !units.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn sub(units: &Utf16Str, start: usize, end: usize) -> String {
    units
        .get(start..end)
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// The UTF-16 range `[start, end)` of `text`.
pub(crate) fn slice(text: &str, start: usize, end: usize) -> String {
    let units = Utf16String::from_str(text);
    let start = floor_boundary(&units, start);
    let end = floor_boundary(&units, end).max(start);
    sub(&units, start, end)
}

/// `text` cut in two at UTF-16 offset `at`.
pub(crate) fn split_at(text: &str, at: usize) -> (String, String) {
    let units = Utf16String::from_str(text);
    let at = floor_boundary(&units, at);
    (sub(&units, 0, at), sub(&units, at, units.len()))
}
