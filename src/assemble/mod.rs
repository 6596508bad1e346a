// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graph assembly.
//!
//! Consumes per-document records, resolves every referenced name, and
//! accumulates the deduplicated node and edge sets. Merge rules are strict
//! contracts: per metadata field the first non-empty value wins, and per
//! (source, target) pair the first registered edge wins. Together with
//! canonical document ordering this makes the sealed topology reproducible.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use crate::ingest::{DocumentRecord, FanoutRecord, MetadataMap};
use crate::model::{
    ComponentId, ComponentKind, ComponentMeta, DocumentId, Topology, TopologyEdge, TopologyNode,
};
use crate::resolve::{sanitize_label, AliasRegistry, NameResolver, Resolution};

/// Label applied to every edge synthesized from a fan-out record.
pub const FANOUT_EDGE_LABEL: &str = "fanout message";

/// Line separator inside composed edge labels.
const EDGE_LABEL_SEPARATOR: &str = "<br>";
const EDGE_TOOLTIP_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssembleError {
    /// Ingestion or sealing was attempted on an already sealed assembler.
    /// This is a programming error; do not catch and retry it.
    Sealed,
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sealed => f.write_str("graph assembler is sealed; no further ingestion allowed"),
        }
    }
}

impl std::error::Error for AssembleError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblerState {
    Accepting,
    Sealed,
}

/// Metadata fields a declaration has claimed so far for one node.
///
/// Fields stay `None` until a declaration provides them; endpoint-only
/// nodes never claim any and take every fallback at seal time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct NodeSlot {
    kind: Option<ComponentKind>,
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EdgePayload {
    label: String,
    tooltip: String,
}

/// Two-state accumulator for one resolution run.
#[derive(Debug, Clone)]
pub struct GraphAssembler {
    state: AssemblerState,
    resolver: NameResolver,
    nodes: BTreeMap<ComponentId, NodeSlot>,
    edges: BTreeMap<(ComponentId, ComponentId), EdgePayload>,
}

impl GraphAssembler {
    pub fn new(registry: AliasRegistry) -> Self {
        Self {
            state: AssemblerState::Accepting,
            resolver: NameResolver::new(registry),
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.state == AssemblerState::Sealed
    }

    /// Decodes a document's metadata mapping and ingests the result.
    /// Documents without metadata are skipped, never an error.
    pub fn ingest_document(
        &mut self,
        document_id: &DocumentId,
        mapping: Option<&MetadataMap>,
    ) -> Result<(), AssembleError> {
        self.ensure_accepting()?;
        let Some(mapping) = mapping else {
            debug!(document = %document_id, "no metadata, document skipped");
            return Ok(());
        };
        let record = DocumentRecord::from_mapping(mapping);
        self.ingest_record(document_id, &record)
    }

    /// Ingests an already-decoded record.
    pub fn ingest_record(
        &mut self,
        document_id: &DocumentId,
        record: &DocumentRecord,
    ) -> Result<(), AssembleError> {
        self.ensure_accepting()?;

        if let Some(fanout) = &record.fanout {
            self.apply_fanout(document_id, fanout);
            return Ok(());
        }

        let Some(name) = record.service_name.as_deref() else {
            // Without a declared component the document's edges have no
            // endpoint to attach to, so the whole document is skipped.
            debug!(document = %document_id, "no declared component, document skipped");
            return Ok(());
        };
        let self_id = self.resolver.resolve(name);
        self.register_node(&self_id, record.component_type, record.description.as_deref());

        for input in &record.inputs {
            match self.resolver.resolve_ref(input.source.as_deref()) {
                Resolution::Resolved(source) => self.register_edge(
                    source,
                    self_id.clone(),
                    compose_edge_label(input.data_format.as_deref(), input.schema.as_deref()),
                    compose_edge_tooltip(input.data_format.as_deref(), input.schema.as_deref()),
                ),
                Resolution::Unresolved => {
                    warn!(document = %document_id, "input entry without source, skipped");
                }
            }
        }

        for output in &record.outputs {
            match self.resolver.resolve_ref(output.target.as_deref()) {
                Resolution::Resolved(target) => self.register_edge(
                    self_id.clone(),
                    target,
                    compose_edge_label(output.data_format.as_deref(), output.schema.as_deref()),
                    compose_edge_tooltip(output.data_format.as_deref(), output.schema.as_deref()),
                ),
                Resolution::Unresolved => {
                    warn!(document = %document_id, "output entry without target, skipped");
                }
            }
        }

        Ok(())
    }

    /// Seals the assembler and returns the immutable topology snapshot.
    pub fn seal(&mut self) -> Result<Topology, AssembleError> {
        self.ensure_accepting()?;
        self.state = AssemblerState::Sealed;

        let registry = self.resolver.registry();
        let nodes = self
            .nodes
            .iter()
            .map(|(id, slot)| {
                let label = registry
                    .display_label(id)
                    .map(ToOwned::to_owned)
                    .or_else(|| {
                        self.resolver
                            .raw_text(id)
                            .map(sanitize_label)
                            .filter(|label| !label.is_empty())
                    })
                    .unwrap_or_else(|| id.as_str().to_owned());
                let kind = slot
                    .kind
                    .or_else(|| registry.default_kind(id))
                    .unwrap_or(ComponentKind::Other);
                let description = slot
                    .description
                    .clone()
                    .or_else(|| registry.default_description(id).map(ToOwned::to_owned))
                    .unwrap_or_default();
                let icon = registry.icon(id).map(ToOwned::to_owned);
                TopologyNode::new(id.clone(), ComponentMeta::new_with(label, kind, description, icon))
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .map(|((source, target), payload)| {
                TopologyEdge::new(
                    source.clone(),
                    target.clone(),
                    payload.label.clone(),
                    payload.tooltip.clone(),
                )
            })
            .collect();

        Ok(Topology::new(nodes, edges))
    }

    fn ensure_accepting(&self) -> Result<(), AssembleError> {
        match self.state {
            AssemblerState::Accepting => Ok(()),
            AssemblerState::Sealed => Err(AssembleError::Sealed),
        }
    }

    fn apply_fanout(&mut self, document_id: &DocumentId, fanout: &FanoutRecord) {
        let Resolution::Resolved(exchange) = self.resolver.resolve_ref(fanout.name.as_deref())
        else {
            warn!(document = %document_id, "fan-out record without exchange name, skipped");
            return;
        };
        self.register_node(
            &exchange,
            Some(ComponentKind::Exchange),
            fanout.description.as_deref(),
        );
        for target_name in &fanout.outputs {
            let target = self.resolver.resolve(target_name);
            self.register_edge(
                exchange.clone(),
                target,
                FANOUT_EDGE_LABEL.to_owned(),
                String::new(),
            );
        }
    }

    /// First non-empty value wins per field; later declarations only fill
    /// fields still unset.
    fn register_node(
        &mut self,
        id: &ComponentId,
        kind: Option<ComponentKind>,
        description: Option<&str>,
    ) {
        let slot = self.nodes.entry(id.clone()).or_default();
        if slot.kind.is_none() {
            slot.kind = kind;
        }
        if slot.description.is_none() {
            slot.description = description.map(ToOwned::to_owned);
        }
    }

    /// First edge registered for a (source, target) pair wins; later
    /// payloads for the same pair are discarded.
    fn register_edge(
        &mut self,
        source: ComponentId,
        target: ComponentId,
        label: String,
        tooltip: String,
    ) {
        self.nodes.entry(source.clone()).or_default();
        self.nodes.entry(target.clone()).or_default();
        self.edges
            .entry((source, target))
            .or_insert(EdgePayload { label, tooltip });
    }
}

fn compose_edge_label(data_format: Option<&str>, schema: Option<&str>) -> String {
    join_parts(data_format, schema, EDGE_LABEL_SEPARATOR)
}

fn compose_edge_tooltip(data_format: Option<&str>, schema: Option<&str>) -> String {
    join_parts(data_format, schema, EDGE_TOOLTIP_SEPARATOR)
}

fn join_parts(first: Option<&str>, second: Option<&str>, separator: &str) -> String {
    match (first, second) {
        (Some(a), Some(b)) => format!("{a}{separator}{b}"),
        (Some(a), None) => a.to_owned(),
        (None, Some(b)) => b.to_owned(),
        (None, None) => String::new(),
    }
}

/// Sorts documents into canonical order, ingests them all, and seals.
///
/// This is the single-call entry point satisfying the determinism
/// contract: the same document set produces the same topology no matter
/// what order the documents were supplied in. Duplicate document ids keep
/// their first payload.
pub fn assemble_topology(
    registry: AliasRegistry,
    mut documents: Vec<(DocumentId, Option<MetadataMap>)>,
) -> Result<Topology, AssembleError> {
    documents.sort_by(|(a, _), (b, _)| a.cmp(b));
    documents.dedup_by(|current, kept| current.0 == kept.0);

    let mut assembler = GraphAssembler::new(registry);
    for (document_id, mapping) in &documents {
        assembler.ingest_document(document_id, mapping.as_ref())?;
    }
    assembler.seal()
}
