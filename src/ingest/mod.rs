// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Metadata ingestion boundary.
//!
//! Documents arrive as `(id, mapping-or-none)` pairs; this module decodes
//! the recognized mapping shape into a [`DocumentRecord`] and provides the
//! front-matter helper that turns raw document text into such a mapping.
//! Decoding is tolerant throughout: a missing or mis-shaped field becomes
//! `None`/empty, never an error.

use serde::Deserialize;
use serde_json::Value;

use crate::model::ComponentKind;

/// Parsed structured metadata of one document.
pub type MetadataMap = serde_json::Map<String, Value>;

/// One entry of a document's `inputs` list: a flow from `source` into the
/// declaring component.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct InputDescriptor {
    pub source: Option<String>,
    pub data_format: Option<String>,
    pub schema: Option<String>,
}

/// One entry of a document's `outputs` list: a flow from the declaring
/// component into `target`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct OutputDescriptor {
    pub target: Option<String>,
    pub data_format: Option<String>,
    pub schema: Option<String>,
}

/// Legacy alternate shape: one exchange distributing to many targets with
/// no per-edge metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct FanoutRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub outputs: Vec<String>,
}

/// Everything the assembler consumes from one document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentRecord {
    pub service_name: Option<String>,
    pub component_type: Option<ComponentKind>,
    pub description: Option<String>,
    pub inputs: Vec<InputDescriptor>,
    pub outputs: Vec<OutputDescriptor>,
    pub fanout: Option<FanoutRecord>,
}

impl DocumentRecord {
    /// Decodes the recognized metadata shape field by field. Fields that
    /// are absent, empty, or of the wrong type decode to their empty
    /// state; list entries that fail to decode are dropped individually.
    pub fn from_mapping(mapping: &MetadataMap) -> Self {
        Self {
            service_name: text_field(mapping, "service_name"),
            component_type: text_field(mapping, "component_type")
                .map(|tag| ComponentKind::from_tag(&tag)),
            description: text_field(mapping, "description"),
            inputs: list_field::<InputDescriptor>(mapping, "inputs")
                .into_iter()
                .map(|entry| InputDescriptor {
                    source: non_empty(entry.source),
                    data_format: non_empty(entry.data_format),
                    schema: non_empty(entry.schema),
                })
                .collect(),
            outputs: list_field::<OutputDescriptor>(mapping, "outputs")
                .into_iter()
                .map(|entry| OutputDescriptor {
                    target: non_empty(entry.target),
                    data_format: non_empty(entry.data_format),
                    schema: non_empty(entry.schema),
                })
                .collect(),
            fanout: mapping
                .get("exchange_fanout")
                .and_then(|value| serde_json::from_value::<FanoutRecord>(value.clone()).ok())
                .map(|fanout| FanoutRecord {
                    name: non_empty(fanout.name),
                    description: non_empty(fanout.description),
                    outputs: fanout
                        .outputs
                        .into_iter()
                        .filter(|target| !target.trim().is_empty())
                        .collect(),
                }),
        }
    }
}

fn text_field(mapping: &MetadataMap, key: &str) -> Option<String> {
    mapping
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(ToOwned::to_owned)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn list_field<T: for<'de> Deserialize<'de>>(mapping: &MetadataMap, key: &str) -> Vec<T> {
    let Some(Value::Array(items)) = mapping.get(key) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}

/// Extracts a leading `---` YAML front-matter block as a JSON-object
/// mapping.
///
/// Returns `None` when the block is absent, unterminated, empty, not a
/// mapping, or fails to parse; callers treat all of those as "document has
/// no metadata". A UTF-8 BOM before the opening delimiter is tolerated.
pub fn extract_front_matter(text: &str) -> Option<MetadataMap> {
    let mut lines = text.lines();
    let first = lines.next()?.trim_start_matches('\u{feff}').trim_end();
    if first != "---" {
        return None;
    }

    let mut yaml_lines: Vec<&str> = Vec::new();
    let mut closed = false;
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            closed = true;
            break;
        }
        yaml_lines.push(line);
    }
    if !closed || yaml_lines.is_empty() {
        return None;
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(&yaml_lines.join("\n")).ok()?;
    let json = serde_json::to_value(yaml).ok()?;
    match json {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
