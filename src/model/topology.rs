// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use super::ids::ComponentId;
use super::meta::ComponentMeta;

/// One resolved component and its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologyNode {
    id: ComponentId,
    #[serde(flatten)]
    meta: ComponentMeta,
}

impl TopologyNode {
    pub(crate) fn new(id: ComponentId, meta: ComponentMeta) -> Self {
        Self { id, meta }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn meta(&self) -> &ComponentMeta {
        &self.meta
    }
}

/// One deduplicated data flow between two components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologyEdge {
    source: ComponentId,
    target: ComponentId,
    label: String,
    tooltip: String,
}

impl TopologyEdge {
    pub(crate) fn new(
        source: ComponentId,
        target: ComponentId,
        label: impl Into<String>,
        tooltip: impl Into<String>,
    ) -> Self {
        Self {
            source,
            target,
            label: label.into(),
            tooltip: tooltip.into(),
        }
    }

    pub fn source(&self) -> &ComponentId {
        &self.source
    }

    pub fn target(&self) -> &ComponentId {
        &self.target
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }
}

/// The sealed result of one resolution run.
///
/// Nodes are sorted by id and edges by (source, target); both orders are
/// part of the determinism contract. A topology is built once by the
/// assembler and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topology {
    nodes: Vec<TopologyNode>,
    edges: Vec<TopologyEdge>,
}

impl Topology {
    /// Invariant: `nodes` sorted by id, `edges` sorted by (source, target),
    /// no duplicate keys in either list. The assembler is the only
    /// constructor and upholds this by building from ordered maps.
    pub(crate) fn new(nodes: Vec<TopologyNode>, edges: Vec<TopologyEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[TopologyNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[TopologyEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&TopologyNode> {
        self.nodes
            .binary_search_by(|node| node.id().as_str().cmp(id))
            .ok()
            .map(|idx| &self.nodes[idx])
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&TopologyEdge> {
        self.edges
            .binary_search_by(|edge| {
                edge.source()
                    .as_str()
                    .cmp(source)
                    .then_with(|| edge.target().as_str().cmp(target))
            })
            .ok()
            .map(|idx| &self.edges[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::{Topology, TopologyEdge, TopologyNode};
    use crate::model::{ComponentId, ComponentKind, ComponentMeta};

    fn node(id: &str) -> TopologyNode {
        TopologyNode::new(
            ComponentId::new(id).expect("node id"),
            ComponentMeta::new(id, ComponentKind::Service),
        )
    }

    fn edge(source: &str, target: &str, label: &str) -> TopologyEdge {
        TopologyEdge::new(
            ComponentId::new(source).expect("source id"),
            ComponentId::new(target).expect("target id"),
            label,
            "",
        )
    }

    #[test]
    fn node_lookup_uses_sorted_order() {
        let topology = Topology::new(
            vec![node("Alpha"), node("Beta"), node("Gamma")],
            Vec::new(),
        );

        assert_eq!(topology.node("Beta").map(|n| n.id().as_str()), Some("Beta"));
        assert!(topology.node("Delta").is_none());
    }

    #[test]
    fn edge_lookup_matches_source_and_target() {
        let topology = Topology::new(
            vec![node("A"), node("B"), node("C")],
            vec![edge("A", "B", "json"), edge("A", "C", "csv")],
        );

        assert_eq!(topology.edge("A", "C").map(|e| e.label()), Some("csv"));
        assert!(topology.edge("B", "A").is_none());
    }

    #[test]
    fn topology_serializes_nodes_with_flattened_meta() {
        let topology = Topology::new(vec![node("A")], Vec::new());
        let json = serde_json::to_value(&topology).expect("serialize");

        assert_eq!(json["nodes"][0]["id"], "A");
        assert_eq!(json["nodes"][0]["label"], "A");
        assert_eq!(json["nodes"][0]["kind"], "service");
    }
}
