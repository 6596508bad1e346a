// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use super::ident::normalize_key;
use crate::model::{ComponentId, ComponentKind, IdError};

/// One configured component: its canonical id, display label, optional
/// default metadata, and every known spelling variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AliasEntry {
    pub id: String,
    pub label: String,
    #[serde(default, deserialize_with = "deserialize_kind_opt")]
    pub kind: Option<ComponentKind>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

fn deserialize_kind_opt<'de, D>(deserializer: D) -> Result<Option<ComponentKind>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    ComponentKind::deserialize_tag(deserializer).map(Some)
}

impl AliasEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: None,
            description: None,
            icon: None,
            aliases: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RegistryMeta {
    label: String,
    kind: Option<ComponentKind>,
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidComponentId { id: String, reason: IdError },
    DuplicateComponent { id: ComponentId },
    EmptyAlias { id: ComponentId, alias: String },
    ConflictingAlias { alias: String, existing: ComponentId, conflicting: ComponentId },
    Parse { message: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidComponentId { id, reason } => {
                write!(f, "invalid component id {id:?}: {reason}")
            }
            Self::DuplicateComponent { id } => {
                write!(f, "component {id} is configured more than once")
            }
            Self::EmptyAlias { id, alias } => {
                write!(f, "alias {alias:?} for component {id} normalizes to nothing")
            }
            Self::ConflictingAlias {
                alias,
                existing,
                conflicting,
            } => write!(
                f,
                "alias {alias:?} maps to both {existing} and {conflicting}"
            ),
            Self::Parse { message } => write!(f, "invalid alias table: {message}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Exact-match table from known text variants to canonical component ids.
///
/// Immutable after construction; injected into the resolver as a value so
/// tests can run against smaller tables. Besides the configured aliases,
/// each component's own display label and id match implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AliasRegistry {
    lookup: BTreeMap<String, ComponentId>,
    components: BTreeMap<ComponentId, RegistryMeta>,
}

impl AliasRegistry {
    pub fn new(entries: Vec<AliasEntry>) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for entry in entries {
            let id = ComponentId::new(entry.id.clone()).map_err(|reason| {
                RegistryError::InvalidComponentId {
                    id: entry.id.clone(),
                    reason,
                }
            })?;
            if registry.components.contains_key(&id) {
                return Err(RegistryError::DuplicateComponent { id });
            }

            for alias in entry
                .aliases
                .iter()
                .map(String::as_str)
                .chain([entry.label.as_str(), id.as_str()])
            {
                let key = normalize_key(alias);
                if key.is_empty() {
                    return Err(RegistryError::EmptyAlias {
                        id: id.clone(),
                        alias: alias.to_owned(),
                    });
                }
                match registry.lookup.get(&key) {
                    Some(existing) if existing != &id => {
                        return Err(RegistryError::ConflictingAlias {
                            alias: key,
                            existing: existing.clone(),
                            conflicting: id.clone(),
                        });
                    }
                    _ => {
                        registry.lookup.insert(key, id.clone());
                    }
                }
            }

            registry.components.insert(
                id,
                RegistryMeta {
                    label: entry.label,
                    kind: entry.kind,
                    description: entry.description,
                    icon: entry.icon,
                },
            );
        }
        Ok(registry)
    }

    /// Loads a registry from a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let entries: Vec<AliasEntry> =
            serde_json::from_str(json).map_err(|err| RegistryError::Parse {
                message: err.to_string(),
            })?;
        Self::new(entries)
    }

    /// Exact lookup of an already-normalized key. No fuzzy matching.
    pub fn lookup(&self, normalized: &str) -> Option<&ComponentId> {
        self.lookup.get(normalized)
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.components.contains_key(id)
    }

    pub fn display_label(&self, id: &ComponentId) -> Option<&str> {
        self.components.get(id).map(|meta| meta.label.as_str())
    }

    pub fn default_kind(&self, id: &ComponentId) -> Option<ComponentKind> {
        self.components.get(id).and_then(|meta| meta.kind)
    }

    pub fn default_description(&self, id: &ComponentId) -> Option<&str> {
        self.components
            .get(id)
            .and_then(|meta| meta.description.as_deref())
    }

    pub fn icon(&self, id: &ComponentId) -> Option<&str> {
        self.components.get(id).and_then(|meta| meta.icon.as_deref())
    }

    pub fn component_ids(&self) -> impl Iterator<Item = &ComponentId> {
        self.components.keys()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
