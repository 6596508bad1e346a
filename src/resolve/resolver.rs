// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use super::ident::{normalize_key, synthesize_ident};
use super::registry::AliasRegistry;
use crate::model::ComponentId;

/// Outcome of resolving one raw reference.
///
/// `Unresolved` marks a reference the caller must skip; it is never merged
/// with a real component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ComponentId),
    Unresolved,
}

impl Resolution {
    pub fn component_id(&self) -> Option<&ComponentId> {
        match self {
            Self::Resolved(id) => Some(id),
            Self::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Resolves raw text labels to canonical component ids.
///
/// Resolution order: exact alias-registry hit, then the run-local seen
/// table, then a synthesized identifier with a numeric suffix appended
/// while the candidate is taken by a different key. The seen table is the
/// only mutable state in the engine and is scoped to a single run; never
/// share a resolver across runs.
#[derive(Debug, Clone)]
pub struct NameResolver {
    registry: AliasRegistry,
    seen: BTreeMap<String, ComponentId>,
    taken: BTreeSet<ComponentId>,
    raw_texts: BTreeMap<ComponentId, String>,
}

impl NameResolver {
    pub fn new(registry: AliasRegistry) -> Self {
        // Registry ids are reserved up front so a synthesized candidate can
        // never collide with a configured component it does not refer to.
        let taken = registry.component_ids().cloned().collect();
        Self {
            registry,
            seen: BTreeMap::new(),
            taken,
            raw_texts: BTreeMap::new(),
        }
    }

    pub fn registry(&self) -> &AliasRegistry {
        &self.registry
    }

    /// Resolves raw text to its canonical id, assigning a new id if the
    /// text was never seen in this run.
    pub fn resolve(&mut self, raw: &str) -> ComponentId {
        let key = normalize_key(raw);

        if let Some(id) = self.registry.lookup(&key) {
            let id = id.clone();
            self.remember(key, &id, raw);
            return id;
        }
        if let Some(id) = self.seen.get(&key) {
            return id.clone();
        }

        let base = synthesize_ident(raw);
        let mut candidate = base.clone();
        if self.taken.contains(candidate.as_str()) {
            for idx in 2.. {
                candidate = format!("{base}_{idx}");
                if !self.taken.contains(candidate.as_str()) {
                    break;
                }
            }
        }

        let id = ComponentId::new(candidate).expect("sanitized ident is a valid id");
        self.remember(key, &id, raw);
        id
    }

    /// Resolves an optional reference; absent input yields
    /// [`Resolution::Unresolved`] instead of a placeholder id.
    pub fn resolve_ref(&mut self, raw: Option<&str>) -> Resolution {
        match raw {
            Some(text) => Resolution::Resolved(self.resolve(text)),
            None => Resolution::Unresolved,
        }
    }

    /// First raw text that resolved to `id` in this run, if any did.
    pub fn raw_text(&self, id: &ComponentId) -> Option<&str> {
        self.raw_texts.get(id).map(String::as_str)
    }

    fn remember(&mut self, key: String, id: &ComponentId, raw: &str) {
        self.seen.entry(key).or_insert_with(|| id.clone());
        self.taken.insert(id.clone());
        self.raw_texts
            .entry(id.clone())
            .or_insert_with(|| raw.to_owned());
    }
}
