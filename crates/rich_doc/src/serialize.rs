// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The persisted JSON form of a [`Document`].
//!
//! ```json
//! {
//!   "blocks": [{ "key": "b0", "text": "Hi", "type": "unstyled",
//!                "depth": 0, "inlineStyleRanges": [], "entityRanges": [],
//!                "data": {} }],
//!   "entityMap": {}
//! }
//! ```
//!
//! Decoding validates everything the model relies on and rejects input
//! that breaks it.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{
    Alignment, Block, BlockData, BlockKey, BlockKind, Document, Entity,
    EntityKey, EntityRange, InlineStyle, StyleRange,
};
use crate::error::{DocumentError, Result};
use crate::utf16;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    blocks: Vec<RawBlock>,
    #[serde(default)]
    entity_map: BTreeMap<String, RawEntity>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    key: String,
    text: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    depth: u32,
    #[serde(default)]
    inline_style_ranges: Vec<RawStyleRange>,
    #[serde(default)]
    entity_ranges: Vec<RawEntityRange>,
    #[serde(default)]
    data: RawBlockData,
}

#[derive(Serialize, Deserialize)]
struct RawStyleRange {
    offset: usize,
    length: usize,
    style: String,
}

#[derive(Serialize, Deserialize)]
struct RawEntityRange {
    offset: usize,
    length: usize,
    key: u32,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlockData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_align: Option<Alignment>,
}

#[derive(Serialize, Deserialize)]
struct RawEntity {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    mutability: String,
    #[serde(default)]
    data: RawEntityData,
}

#[derive(Default, Serialize, Deserialize)]
struct RawEntityData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alt: Option<String>,
}

impl Document {
    /// Encode as JSON. Every entity is kept, referenced or not.
    ///
    /// # Panics
    ///
    /// Never in practice: the raw form is strings, integers and string-keyed
    /// maps, which `serde_json` always encodes.
    pub fn serialize(&self) -> String {
        let raw = RawDocument {
            blocks: self.blocks().iter().map(encode_block).collect(),
            entity_map: self
                .entities()
                .iter()
                .map(|(key, entity)| (key.to_string(), encode_entity(entity)))
                .collect(),
        };
        serde_json::to_string(&raw)
            .expect("documents only contain JSON-representable values")
    }

    /// Decode and validate JSON produced by [`Document::serialize`] (or by
    /// anything emitting the same format).
    pub fn deserialize(raw: &str) -> Result<Document> {
        let raw: RawDocument = serde_json::from_str(raw)?;

        let mut entities = BTreeMap::new();
        for (key, entity) in raw.entity_map {
            let key = key.parse::<u32>().map(EntityKey).map_err(|_| {
                DocumentError::Malformed(format!("bad entity key {key:?}"))
            })?;
            entities.insert(key, decode_entity(entity)?);
        }

        let blocks = raw
            .blocks
            .into_iter()
            .map(decode_block)
            .collect::<Result<Vec<_>>>()?;

        let mut document = Document::from_blocks(blocks);
        for (key, entity) in entities {
            document = document.with_entity(key, entity);
        }
        document.check_invariants().map_err(DocumentError::Malformed)?;
        Ok(document)
    }
}

fn encode_block(block: &Block) -> RawBlock {
    RawBlock {
        key: block.key().to_string(),
        text: block.text().to_owned(),
        kind: block.kind().to_string(),
        depth: 0,
        inline_style_ranges: block
            .style_ranges()
            .iter()
            .map(|r| RawStyleRange {
                offset: r.offset,
                length: r.length,
                style: r.style.to_string(),
            })
            .collect(),
        entity_ranges: block
            .entity_ranges()
            .iter()
            .map(|r| RawEntityRange {
                offset: r.offset,
                length: r.length,
                key: r.key.0,
            })
            .collect(),
        data: RawBlockData {
            text_align: block.alignment(),
        },
    }
}

fn encode_entity(entity: &Entity) -> RawEntity {
    match entity {
        Entity::Link { url } => RawEntity {
            kind: "LINK".to_owned(),
            mutability: "MUTABLE".to_owned(),
            data: RawEntityData {
                url: Some(url.clone()),
                ..Default::default()
            },
        },
        Entity::Image { src, alt } => RawEntity {
            kind: "IMAGE".to_owned(),
            mutability: "IMMUTABLE".to_owned(),
            data: RawEntityData {
                src: Some(src.clone()),
                alt: Some(alt.clone()),
                ..Default::default()
            },
        },
    }
}

fn decode_block(raw: RawBlock) -> Result<Block> {
    let kind = BlockKind::from_str(&raw.kind).map_err(|_| {
        DocumentError::Malformed(format!("unknown block type {:?}", raw.kind))
    })?;
    let len = utf16::len(&raw.text);
    let bounds = raw
        .inline_style_ranges
        .iter()
        .map(|r| (r.offset, r.length))
        .chain(raw.entity_ranges.iter().map(|r| (r.offset, r.length)));
    for (offset, length) in bounds {
        if offset.checked_add(length).map_or(true, |end| end > len) {
            return Err(DocumentError::Malformed(format!(
                "range {offset}+{length} exceeds block {} of length {len}",
                raw.key
            )));
        }
    }
    let style_ranges = raw
        .inline_style_ranges
        .into_iter()
        .map(|r| {
            let style = InlineStyle::from_str(&r.style).map_err(|_| {
                DocumentError::Malformed(format!("unknown style {:?}", r.style))
            })?;
            Ok(StyleRange {
                offset: r.offset,
                length: r.length,
                style,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let entity_ranges = raw
        .entity_ranges
        .into_iter()
        .map(|r| EntityRange {
            offset: r.offset,
            length: r.length,
            key: EntityKey(r.key),
        })
        .collect();

    let block = Block::from_parts(
        BlockKey::new(raw.key),
        kind,
        raw.text,
        style_ranges,
        entity_ranges,
        BlockData {
            alignment: raw.data.text_align,
        },
    );

    let overlapping = block
        .entity_ranges()
        .windows(2)
        .any(|pair| pair[1].offset < pair[0].offset + pair[0].length);
    if overlapping {
        return Err(DocumentError::Malformed(format!(
            "overlapping entity ranges in block {}",
            block.key()
        )));
    }
    Ok(block)
}

fn decode_entity(raw: RawEntity) -> Result<Entity> {
    let missing = |field: &str| {
        DocumentError::Malformed(format!("{} entity without {field}", raw.kind))
    };
    match raw.kind.as_str() {
        "LINK" => Ok(Entity::Link {
            url: raw.data.url.clone().ok_or_else(|| missing("url"))?,
        }),
        "IMAGE" => Ok(Entity::Image {
            src: raw.data.src.clone().ok_or_else(|| missing("src"))?,
            alt: raw.data.alt.clone().unwrap_or_default(),
        }),
        other => Err(DocumentError::Malformed(format!(
            "unknown entity type {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_malformed(raw: &str) {
        match Document::deserialize(raw) {
            Err(e) => assert!(e.is_decode_failure(), "unexpected {e:?}"),
            Ok(doc) => panic!("expected failure, decoded {doc:?}"),
        }
    }

    #[test]
    fn encodes_persisted_names() {
        let doc = Document::new()
            .with_block(
                Block::new("k", BlockKind::HeaderTwo, "Hi")
                    .with_style(InlineStyle::Bold, 0, 2)
                    .with_alignment(Alignment::Center),
            )
            .with_entity(
                EntityKey(3),
                Entity::Link {
                    url: "https://example.com/".into(),
                },
            );
        let json = doc.serialize();
        assert!(json.contains(r#""type":"header-two""#), "{json}");
        assert!(json.contains(r#""style":"BOLD""#), "{json}");
        assert!(json.contains(r#""textAlign":"center""#), "{json}");
        assert!(json.contains(r#""3":{"type":"LINK","mutability":"MUTABLE""#));
    }

    #[test]
    fn omits_alignment_when_unset() {
        let doc =
            Document::new().with_block(Block::new("k", BlockKind::Plain, ""));
        assert!(doc.serialize().contains(r#""data":{}"#));
    }

    #[test]
    fn missing_optional_fields_default() {
        let doc = Document::deserialize(
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.blocks()[0].text(), "x");
        assert!(doc.entities().is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let doc = Document::deserialize(
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled",
                "depth":2,"data":{"foo":1}}],"entityMap":{}}"#,
        )
        .unwrap();
        assert_eq!(doc.blocks()[0].alignment(), None);
    }

    #[test]
    fn rejects_invalid_input() {
        assert_malformed("");
        assert_malformed("not json");
        assert_malformed(r#"{"entityMap":{}}"#);
        assert_malformed(
            r#"{"blocks":[{"key":"a","text":"x","type":"code-block"}]}"#,
        );
        assert_malformed(
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled",
                "inlineStyleRanges":[{"offset":0,"length":1,"style":"CODE"}]}]}"#,
        );
        assert_malformed(
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled",
                "inlineStyleRanges":[{"offset":0,"length":5,"style":"BOLD"}]}]}"#,
        );
        assert_malformed(
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled",
                "entityRanges":[{"offset":0,"length":1,"key":7}]}]}"#,
        );
        assert_malformed(
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled"},
                          {"key":"a","text":"y","type":"unstyled"}]}"#,
        );
        assert_malformed(
            r#"{"blocks":[],"entityMap":{"0":{"type":"VIDEO","data":{}}}}"#,
        );
        assert_malformed(
            r#"{"blocks":[],"entityMap":{"x":{"type":"LINK","data":{"url":"a"}}}}"#,
        );
    }

    #[test]
    fn rejects_ranges_whose_end_overflows() {
        assert_malformed(
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled",
                "inlineStyleRanges":[{"offset":18446744073709551615,
                    "length":2,"style":"BOLD"}]}]}"#,
        );
        assert_malformed(
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled",
                "entityRanges":[{"offset":1,"length":18446744073709551615,
                    "key":0}]}],
                "entityMap":{"0":{"type":"LINK","data":{"url":"a"}}}}"#,
        );
    }

    #[test]
    fn overflowing_ranges_render_raw() {
        let raw = r#"{"blocks":[{"key":"a","text":"x","type":"unstyled","inlineStyleRanges":[{"offset":18446744073709551615,"length":2,"style":"BOLD"}]}]}"#;
        assert_eq!(crate::render_plain_text(raw), raw);
        assert_eq!(crate::render_html(raw), raw);
    }

    #[test]
    fn decoding_merges_overlapping_style_ranges() {
        let doc = Document::deserialize(
            r#"{"blocks":[{"key":"a","text":"abcdef","type":"unstyled",
                "inlineStyleRanges":[
                    {"offset":0,"length":3,"style":"ITALIC"},
                    {"offset":2,"length":4,"style":"ITALIC"}]}]}"#,
        )
        .unwrap();
        assert_eq!(
            doc.blocks()[0].style_ranges(),
            &[StyleRange {
                offset: 0,
                length: 6,
                style: InlineStyle::Italic
            }]
        );
    }
}
