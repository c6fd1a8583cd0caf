// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Interval arithmetic shared by inline style ranges and entity ranges.

/// A half-open `[offset, offset + length)` interval over a block's text.
pub(crate) trait Ranged: Clone {
    fn offset(&self) -> usize;

    fn length(&self) -> usize;

    /// A copy of this range covering `[offset, offset + length)`.
    fn moved(&self, offset: usize, length: usize) -> Self;

    fn end(&self) -> usize {
        self.offset() + self.length()
    }
}

/// Replace `[start, end)` with `inserted` code units of unformatted text.
///
/// Ranges entirely inside the replaced span disappear, ranges crossing
/// either edge are truncated, and everything after the span shifts.
pub(crate) fn splice<R: Ranged>(
    ranges: &[R],
    start: usize,
    end: usize,
    inserted: usize,
) -> Vec<R> {
    let removed = end - start;
    let mut out = Vec::with_capacity(ranges.len() + 1);
    for range in ranges {
        if range.offset() < start {
            let piece_end = range.end().min(start);
            out.push(range.moved(range.offset(), piece_end - range.offset()));
        }
        if range.end() > end {
            let piece_start = range.offset().max(end);
            let length = range.end() - piece_start;
            out.push(range.moved(piece_start - removed + inserted, length));
        }
    }
    out.retain(|r| r.length() > 0);
    out
}

/// The parts of `ranges` inside `[start, end)`, rebased so `start` is 0.
pub(crate) fn clip<R: Ranged>(ranges: &[R], start: usize, end: usize) -> Vec<R> {
    ranges
        .iter()
        .filter_map(|range| {
            let s = range.offset().max(start);
            let e = range.end().min(end);
            (s < e).then(|| range.moved(s - start, e - s))
        })
        .collect()
}

/// The parts of `ranges` outside `[start, end)`.
pub(crate) fn subtract<R: Ranged>(
    ranges: &[R],
    start: usize,
    end: usize,
) -> Vec<R> {
    let mut out = Vec::with_capacity(ranges.len() + 1);
    for range in ranges {
        if range.end() <= start || range.offset() >= end {
            out.push(range.clone());
            continue;
        }
        if range.offset() < start {
            out.push(range.moved(range.offset(), start - range.offset()));
        }
        if range.end() > end {
            out.push(range.moved(end, range.end() - end));
        }
    }
    out
}

/// Every range moved right by `by` code units.
pub(crate) fn shift<R: Ranged>(ranges: &[R], by: usize) -> Vec<R> {
    ranges
        .iter()
        .map(|r| r.moved(r.offset() + by, r.length()))
        .collect()
}

/// Whether the union of `ranges` covers all of `[start, end)`.
///
/// `ranges` must be sorted by offset.
pub(crate) fn covers<'a, R: Ranged + 'a>(
    ranges: impl IntoIterator<Item = &'a R>,
    start: usize,
    end: usize,
) -> bool {
    if start >= end {
        return false;
    }
    let mut cursor = start;
    for range in ranges {
        if range.offset() > cursor {
            break;
        }
        cursor = cursor.max(range.end());
        if cursor >= end {
            return true;
        }
    }
    false
}
