// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The document model: blocks, inline style ranges and entities.
//!
//! A [`Document`] is an ordered list of [`Block`]s plus an entity table.
//! Blocks refer to entities (links, images) by [`EntityKey`] through
//! [`EntityRange`]s; the document owns the entities.
//!
//! All offsets and lengths are UTF-16 code units.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::ranges::{self, Ranged};
use crate::utf16;

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Identifies a block within one document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Identifies an entity in a document's entity table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey(pub u32);

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Enumerations ────────────────────────────────────────────────────────────

/// The kind of a block. The string forms are the persisted type names.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum BlockKind {
    #[strum(serialize = "unstyled")]
    Plain,
    #[strum(serialize = "header-one")]
    HeaderOne,
    #[strum(serialize = "header-two")]
    HeaderTwo,
    #[strum(serialize = "header-three")]
    HeaderThree,
    #[strum(serialize = "unordered-list-item")]
    UnorderedItem,
    #[strum(serialize = "ordered-list-item")]
    OrderedItem,
    #[strum(serialize = "blockquote")]
    Quote,
    /// A non-editable embedded image.
    #[strum(serialize = "atomic")]
    Media,
}

impl BlockKind {
    pub fn is_list_item(&self) -> bool {
        matches!(self, Self::UnorderedItem | Self::OrderedItem)
    }
}

/// Inline character styles.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum InlineStyle {
    Bold,
    Italic,
    Strikethrough,
}

impl InlineStyle {
    /// The HTML element used to render this style.
    pub fn html_tag(&self) -> &'static str {
        match self {
            Self::Bold => "strong",
            Self::Italic => "em",
            Self::Strikethrough => "del",
        }
    }
}

/// Horizontal alignment stored in a block's data.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

// ─── Ranges and entities ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

impl Ranged for StyleRange {
    fn offset(&self) -> usize {
        self.offset
    }

    fn length(&self) -> usize {
        self.length
    }

    fn moved(&self, offset: usize, length: usize) -> Self {
        Self {
            offset,
            length,
            style: self.style,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityRange {
    pub offset: usize,
    pub length: usize,
    pub key: EntityKey,
}

impl Ranged for EntityRange {
    fn offset(&self) -> usize {
        self.offset
    }

    fn length(&self) -> usize {
        self.length
    }

    fn moved(&self, offset: usize, length: usize) -> Self {
        Self {
            offset,
            length,
            key: self.key,
        }
    }
}

/// An out-of-band object attached to text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    Link { url: String },
    Image { src: String, alt: String },
}

/// Block-level attributes that do not affect the text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockData {
    pub alignment: Option<Alignment>,
}

/// Text and ranges cut out of a block, ready to be appended elsewhere.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fragment {
    pub(crate) text: String,
    pub(crate) style_ranges: Vec<StyleRange>,
    pub(crate) entity_ranges: Vec<EntityRange>,
}

// ─── Block ───────────────────────────────────────────────────────────────────

/// One paragraph-equivalent unit of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    key: BlockKey,
    kind: BlockKind,
    text: String,
    style_ranges: Vec<StyleRange>,
    entity_ranges: Vec<EntityRange>,
    data: BlockData,
}

impl Block {
    /// The text a media block carries in place of content.
    pub const MEDIA_PLACEHOLDER: &'static str = " ";

    pub fn new(
        key: impl Into<BlockKey>,
        kind: BlockKind,
        text: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            kind,
            text: text.into(),
            style_ranges: Vec::new(),
            entity_ranges: Vec::new(),
            data: BlockData::default(),
        }
    }

    /// A media block pointing at the image entity `entity`.
    pub fn media(key: impl Into<BlockKey>, entity: EntityKey) -> Self {
        Self::new(key, BlockKind::Media, Self::MEDIA_PLACEHOLDER)
            .with_entity(entity, 0, 1)
    }

    /// Apply `style` over `[offset, offset + length)`, clamped to the text.
    pub fn with_style(
        mut self,
        style: InlineStyle,
        offset: usize,
        length: usize,
    ) -> Self {
        let start = offset.min(self.len());
        let end = offset.saturating_add(length).min(self.len());
        self.add_style(style, start, end);
        self
    }

    /// Point `[offset, offset + length)` at `entity`, clamped to the text.
    pub fn with_entity(
        mut self,
        entity: EntityKey,
        offset: usize,
        length: usize,
    ) -> Self {
        let start = offset.min(self.len());
        let end = offset.saturating_add(length).min(self.len());
        self.set_entity(entity, start, end);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.data.alignment = Some(alignment);
        self
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style_ranges(&self) -> &[StyleRange] {
        &self.style_ranges
    }

    pub fn entity_ranges(&self) -> &[EntityRange] {
        &self.entity_ranges
    }

    pub fn data(&self) -> &BlockData {
        &self.data
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.data.alignment
    }

    /// Text length in UTF-16 code units.
    pub fn len(&self) -> usize {
        utf16::len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_media(&self) -> bool {
        self.kind == BlockKind::Media
    }

    /// The entity a media block embeds.
    pub fn media_entity(&self) -> Option<EntityKey> {
        if !self.is_media() {
            return None;
        }
        self.entity_ranges.first().map(|r| r.key)
    }

    /// Whether any character of the block carries `style`.
    pub fn has_style_anywhere(&self, style: InlineStyle) -> bool {
        self.style_ranges.iter().any(|r| r.style == style)
    }

    /// Styles applying to the character at `offset`.
    pub fn styles_at(&self, offset: usize) -> BTreeSet<InlineStyle> {
        self.style_ranges
            .iter()
            .filter(|r| r.offset <= offset && offset < r.end())
            .map(|r| r.style)
            .collect()
    }

    /// The entity attached to the character at `offset`, if any.
    pub fn entity_at(&self, offset: usize) -> Option<EntityKey> {
        self.entity_ranges
            .iter()
            .find(|r| r.offset <= offset && offset < r.end())
            .map(|r| r.key)
    }

    /// Whether every character of `[start, end)` carries `style`.
    pub(crate) fn covers_style(
        &self,
        style: InlineStyle,
        start: usize,
        end: usize,
    ) -> bool {
        ranges::covers(
            self.style_ranges.iter().filter(|r| r.style == style),
            start,
            end,
        )
    }

    pub(crate) fn add_style(
        &mut self,
        style: InlineStyle,
        start: usize,
        end: usize,
    ) {
        if start >= end {
            return;
        }
        self.style_ranges.push(StyleRange {
            offset: start,
            length: end - start,
            style,
        });
        self.normalize();
    }

    pub(crate) fn remove_style(
        &mut self,
        style: InlineStyle,
        start: usize,
        end: usize,
    ) {
        let (matching, mut rest): (Vec<_>, Vec<_>) = self
            .style_ranges
            .iter()
            .copied()
            .partition(|r| r.style == style);
        rest.extend(ranges::subtract(&matching, start, end));
        self.style_ranges = rest;
        self.normalize();
    }

    /// Point `[start, end)` at `entity`, replacing whatever was there.
    pub(crate) fn set_entity(
        &mut self,
        entity: EntityKey,
        start: usize,
        end: usize,
    ) {
        if start >= end {
            return;
        }
        let mut kept = ranges::subtract(&self.entity_ranges, start, end);
        kept.push(EntityRange {
            offset: start,
            length: end - start,
            key: entity,
        });
        self.entity_ranges = kept;
        self.normalize();
    }

    pub(crate) fn set_kind(&mut self, kind: BlockKind) {
        self.kind = kind;
    }

    pub(crate) fn set_alignment(&mut self, alignment: Alignment) {
        self.data.alignment = Some(alignment);
    }

    /// Replace the UTF-16 range `[start, end)` with unformatted `new_text`.
    pub(crate) fn splice(&mut self, start: usize, end: usize, new_text: &str) {
        let len = self.len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        let inserted = utf16::len(new_text);

        let (head, _) = utf16::split_at(&self.text, start);
        let (_, tail) = utf16::split_at(&self.text, end);
        self.text = format!("{head}{new_text}{tail}");

        self.style_ranges =
            ranges::splice(&self.style_ranges, start, end, inserted);
        self.entity_ranges =
            ranges::splice(&self.entity_ranges, start, end, inserted);
        self.normalize();
    }

    /// Cut everything from `at` onwards out of this block.
    pub(crate) fn split_off(&mut self, at: usize) -> Fragment {
        let len = self.len();
        let at = at.min(len);
        let (head, tail) = utf16::split_at(&self.text, at);
        self.text = head;
        let fragment = Fragment {
            text: tail,
            style_ranges: ranges::clip(&self.style_ranges, at, len),
            entity_ranges: ranges::clip(&self.entity_ranges, at, len),
        };
        self.style_ranges = ranges::clip(&self.style_ranges, 0, at);
        self.entity_ranges = ranges::clip(&self.entity_ranges, 0, at);
        fragment
    }

    pub(crate) fn append(&mut self, fragment: Fragment) {
        let by = self.len();
        self.text.push_str(&fragment.text);
        self.style_ranges
            .extend(ranges::shift(&fragment.style_ranges, by));
        self.entity_ranges
            .extend(ranges::shift(&fragment.entity_ranges, by));
        self.normalize();
    }

    /// Sort ranges and merge overlapping or touching ranges that carry the
    /// same style (or point at the same entity).
    pub(crate) fn normalize(&mut self) {
        let mut styles = std::mem::take(&mut self.style_ranges);
        styles.retain(|r| r.length > 0);
        styles.sort_by_key(|r| (r.style, r.offset, r.length));
        let mut merged: Vec<StyleRange> = Vec::with_capacity(styles.len());
        for range in styles {
            match merged.last_mut() {
                Some(last)
                    if last.style == range.style
                        && range.offset <= last.end() =>
                {
                    let end = last.end().max(range.end());
                    last.length = end - last.offset;
                }
                _ => merged.push(range),
            }
        }
        self.style_ranges = merged;

        let mut entities = std::mem::take(&mut self.entity_ranges);
        entities.retain(|r| r.length > 0);
        entities.sort_by_key(|r| (r.offset, r.length));
        let mut merged: Vec<EntityRange> = Vec::with_capacity(entities.len());
        for range in entities {
            match merged.last_mut() {
                Some(last)
                    if last.key == range.key && range.offset == last.end() =>
                {
                    last.length += range.length;
                }
                _ => merged.push(range),
            }
        }
        self.entity_ranges = merged;
    }

    /// Build a block from already-validated parts.
    pub(crate) fn from_parts(
        key: BlockKey,
        kind: BlockKind,
        text: String,
        style_ranges: Vec<StyleRange>,
        entity_ranges: Vec<EntityRange>,
        data: BlockData,
    ) -> Self {
        let mut block = Self {
            key,
            kind,
            text,
            style_ranges,
            entity_ranges,
            data,
        };
        block.normalize();
        block
    }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// An ordered sequence of blocks plus the entities they reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
    entities: BTreeMap<EntityKey, Entity>,
}

impl Document {
    /// A document with no blocks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            entities: BTreeMap::new(),
        }
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn with_entity(mut self, key: EntityKey, entity: Entity) -> Self {
        self.entities.insert(key, entity);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.key == key)
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| &b.key == key)
    }

    pub fn entities(&self) -> &BTreeMap<EntityKey, Entity> {
        &self.entities
    }

    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(&key)
    }

    /// No blocks, or a single plain block without text.
    pub fn is_empty(&self) -> bool {
        match self.blocks.as_slice() {
            [] => true,
            [only] => only.kind == BlockKind::Plain && only.text.is_empty(),
            _ => false,
        }
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    pub(crate) fn insert_entity(&mut self, entity: Entity) -> EntityKey {
        let key = self.next_entity_key();
        self.entities.insert(key, entity);
        key
    }

    /// The smallest entity key above every key in use, or the smallest free
    /// key once `u32::MAX` is taken.
    pub(crate) fn next_entity_key(&self) -> EntityKey {
        let Some(last) = self.entities.keys().next_back() else {
            return EntityKey(0);
        };
        if let Some(next) = last.0.checked_add(1) {
            return EntityKey(next);
        }
        self.entities
            .keys()
            .zip(0u32..)
            .find(|(key, n)| key.0 != *n)
            .map_or(EntityKey(0), |(_, n)| EntityKey(n))
    }

    /// A block key not used by any block of this document.
    pub(crate) fn next_block_key(&self) -> BlockKey {
        let used: HashSet<&str> =
            self.blocks.iter().map(|b| b.key.as_str()).collect();
        let mut n = self.blocks.len();
        loop {
            let candidate = format!("b{n}");
            if !used.contains(candidate.as_str()) {
                return BlockKey(candidate);
            }
            n += 1;
        }
    }

    /// Check the structural invariants: unique block keys, ranges inside
    /// their block's text and entity references that resolve.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut keys = HashSet::new();
        for block in &self.blocks {
            if !keys.insert(block.key.as_str()) {
                return Err(format!("duplicate block key {}", block.key));
            }
            let len = block.len();
            for range in &block.style_ranges {
                if range.end() > len {
                    return Err(format!(
                        "style range {}+{} exceeds block {} of length {len}",
                        range.offset, range.length, block.key
                    ));
                }
            }
            for range in &block.entity_ranges {
                if range.end() > len {
                    return Err(format!(
                        "entity range {}+{} exceeds block {} of length {len}",
                        range.offset, range.length, block.key
                    ));
                }
                if !self.entities.contains_key(&range.key) {
                    return Err(format!(
                        "block {} references missing entity {}",
                        block.key, range.key
                    ));
                }
            }
        }
        Ok(())
    }

    #[cfg(feature = "assert-invariants")]
    pub(crate) fn assert_invariants(&self) {
        if let Err(message) = self.check_invariants() {
            panic!("document invariant violated: {message}");
        }
    }

    #[cfg(not(feature = "assert-invariants"))]
    pub(crate) fn assert_invariants(&self) {}
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn block(text: &str) -> Block {
        Block::new("a", BlockKind::Plain, text)
    }

    #[test]
    fn kinds_use_persisted_names() {
        assert_eq!(BlockKind::Plain.to_string(), "unstyled");
        assert_eq!(BlockKind::HeaderTwo.to_string(), "header-two");
        assert_eq!(BlockKind::Media.to_string(), "atomic");
        assert_eq!(
            BlockKind::from_str("ordered-list-item").unwrap(),
            BlockKind::OrderedItem
        );
        assert!(BlockKind::from_str("code-block").is_err());
    }

    #[test]
    fn styles_use_persisted_names() {
        assert_eq!(InlineStyle::Bold.to_string(), "BOLD");
        assert_eq!(
            InlineStyle::from_str("STRIKETHROUGH").unwrap(),
            InlineStyle::Strikethrough
        );
    }

    #[test]
    fn overlapping_ranges_of_one_style_merge() {
        let b = block("abcdef")
            .with_style(InlineStyle::Bold, 0, 3)
            .with_style(InlineStyle::Bold, 2, 3);
        assert_eq!(
            b.style_ranges(),
            &[StyleRange {
                offset: 0,
                length: 5,
                style: InlineStyle::Bold
            }]
        );
    }

    #[test]
    fn ranges_of_different_styles_overlap() {
        let b = block("abcdef")
            .with_style(InlineStyle::Bold, 0, 4)
            .with_style(InlineStyle::Italic, 2, 4);
        assert_eq!(b.style_ranges().len(), 2);
        let styles = b.styles_at(3);
        assert!(styles.contains(&InlineStyle::Bold));
        assert!(styles.contains(&InlineStyle::Italic));
    }

    #[test]
    fn next_entity_key_follows_the_largest_key() {
        let doc = Document::new()
            .with_entity(EntityKey(0), Entity::Link { url: "a".into() })
            .with_entity(EntityKey(4), Entity::Link { url: "b".into() });
        assert_eq!(doc.next_entity_key(), EntityKey(5));
        assert_eq!(Document::new().next_entity_key(), EntityKey(0));
    }

    #[test]
    fn next_entity_key_reuses_a_gap_after_the_maximum() {
        let mut doc = Document::new()
            .with_entity(EntityKey(0), Entity::Link { url: "a".into() })
            .with_entity(EntityKey(1), Entity::Link { url: "b".into() })
            .with_entity(
                EntityKey(u32::MAX),
                Entity::Link { url: "c".into() },
            );
        let key = doc.insert_entity(Entity::Link { url: "d".into() });
        assert_eq!(key, EntityKey(2));
        assert_eq!(doc.entities().len(), 4);
        assert_eq!(
            doc.entity(EntityKey(0)),
            Some(&Entity::Link { url: "a".into() })
        );
    }

    #[test]
    fn with_style_clamps_to_the_text() {
        let b = block("abc").with_style(InlineStyle::Bold, 1, 10);
        assert_eq!(b.style_ranges()[0].length, 2);
    }

    #[test]
    fn splice_replaces_text_and_shifts_styles() {
        let mut b = block("hello world").with_style(InlineStyle::Bold, 6, 5);
        b.splice(0, 5, "goodbye");
        assert_eq!(b.text(), "goodbye world");
        assert_eq!(b.style_ranges()[0].offset, 8);
        assert_eq!(b.style_ranges()[0].length, 5);
    }

    #[test]
    fn removing_a_style_from_the_middle_splits_it() {
        let mut b = block("abcdef").with_style(InlineStyle::Italic, 0, 6);
        b.remove_style(InlineStyle::Italic, 2, 4);
        assert!(b.covers_style(InlineStyle::Italic, 0, 2));
        assert!(!b.covers_style(InlineStyle::Italic, 2, 4));
        assert!(b.covers_style(InlineStyle::Italic, 4, 6));
    }

    #[test]
    fn split_off_and_append_round_trip() {
        let mut b = block("abcdef").with_style(InlineStyle::Bold, 2, 2);
        let tail = b.split_off(3);
        assert_eq!(b.text(), "abc");
        assert_eq!(tail.text, "def");
        b.append(tail);
        assert_eq!(b, block("abcdef").with_style(InlineStyle::Bold, 2, 2));
    }

    #[test]
    fn empty_document_variants() {
        assert!(Document::new().is_empty());
        assert!(Document::new().with_block(block("")).is_empty());
        assert!(!Document::new().with_block(block("x")).is_empty());
        let two = Document::new()
            .with_block(block(""))
            .with_block(Block::new("b", BlockKind::Plain, ""));
        assert!(!two.is_empty());
    }

    #[test]
    fn next_block_key_skips_used_keys() {
        let doc = Document::new()
            .with_block(Block::new("b1", BlockKind::Plain, ""))
            .with_block(Block::new("b2", BlockKind::Plain, ""));
        assert_eq!(doc.next_block_key(), BlockKey::new("b3"));
    }

    #[test]
    fn dangling_entity_reference_breaks_invariants() {
        let doc = Document::new().with_block(block("abc").with_entity(
            EntityKey(4),
            0,
            3,
        ));
        assert!(doc.check_invariants().is_err());
        let fixed = doc.with_entity(
            EntityKey(4),
            Entity::Link {
                url: "https://example.com/".into(),
            },
        );
        assert!(fixed.check_invariants().is_ok());
    }
}
