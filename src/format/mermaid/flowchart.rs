// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ident::validate_mermaid_ident;
pub use super::ident::MermaidIdentError;

use crate::model::{ComponentKind, Topology, TopologyEdge, TopologyNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowDirection {
    #[default]
    TopDown,
    LeftRight,
}

impl FlowDirection {
    fn as_keyword(&self) -> &'static str {
        match self {
            Self::TopDown => "TD",
            Self::LeftRight => "LR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub direction: FlowDirection,
    /// Emit one `subgraph` per component kind present, in fixed kind
    /// order. Kinds only affect presentation, never the graph itself.
    pub group_by_kind: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            direction: FlowDirection::TopDown,
            group_by_kind: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MermaidExportError {
    InvalidNodeId {
        node_id: String,
        reason: MermaidIdentError,
    },
    InvalidNodeLabel {
        node_id: String,
        label: String,
    },
    InvalidEdgeLabel {
        source: String,
        target: String,
        label: String,
    },
}

impl fmt::Display for MermaidExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNodeId { node_id, reason } => write!(
                f,
                "cannot export node id as Mermaid identifier: {node_id} ({reason})"
            ),
            Self::InvalidNodeLabel { node_id, label } => write!(
                f,
                "cannot export node label for {node_id}: contains unsupported characters: {label:?}"
            ),
            Self::InvalidEdgeLabel {
                source,
                target,
                label,
            } => write!(
                f,
                "cannot export edge label for {source} -> {target}: contains unsupported characters: {label:?}"
            ),
        }
    }
}

impl std::error::Error for MermaidExportError {}

fn kind_group_title(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Service => "Services",
        ComponentKind::Queue => "Queues",
        ComponentKind::Storage => "Storage",
        ComponentKind::Exchange => "Exchanges",
        ComponentKind::External => "External",
        ComponentKind::Other => "Other",
    }
}

fn shape_delimiters(kind: ComponentKind) -> (&'static str, &'static str) {
    match kind {
        ComponentKind::Service | ComponentKind::Other => ("[\"", "\"]"),
        ComponentKind::Queue => ("([\"", "\"])"),
        ComponentKind::Storage => ("[(\"", "\")]"),
        ComponentKind::Exchange => ("{\"", "\"}"),
        ComponentKind::External => ("(\"", "\")"),
    }
}

fn validate_export_label(label: &str) -> bool {
    !label.contains('"') && !label.contains('\n')
}

fn validate_export_edge_label(label: &str) -> bool {
    !label.contains('|') && !label.contains('\n')
}

/// Renders a sealed topology as Mermaid flowchart text.
///
/// Output is deterministic: nodes appear in id order (within their kind
/// group when grouping is on) and edges in (source, target) order, both
/// inherited from the topology's own ordering.
pub fn export_flowchart(
    topology: &Topology,
    options: &ExportOptions,
) -> Result<String, MermaidExportError> {
    let mut out = String::new();
    out.push_str("flowchart ");
    out.push_str(options.direction.as_keyword());
    out.push('\n');

    if options.group_by_kind {
        for kind in ComponentKind::ALL {
            let mut group = topology
                .nodes()
                .iter()
                .filter(|node| node.meta().kind() == kind)
                .peekable();
            if group.peek().is_none() {
                continue;
            }
            out.push_str("    subgraph ");
            out.push_str(kind_group_title(kind));
            out.push('\n');
            for node in group {
                write_node(&mut out, "        ", node)?;
            }
            out.push_str("    end\n");
        }
    } else {
        for node in topology.nodes() {
            write_node(&mut out, "    ", node)?;
        }
    }

    for edge in topology.edges() {
        write_edge(&mut out, edge)?;
    }

    Ok(out)
}

fn write_node(
    out: &mut String,
    indent: &str,
    node: &TopologyNode,
) -> Result<(), MermaidExportError> {
    validate_mermaid_ident(node.id().as_str()).map_err(|reason| {
        MermaidExportError::InvalidNodeId {
            node_id: node.id().as_str().to_owned(),
            reason,
        }
    })?;

    let label = match node.meta().icon() {
        Some(icon) => format!("{icon} {}", node.meta().label()),
        None => node.meta().label().to_owned(),
    };
    if !validate_export_label(&label) {
        return Err(MermaidExportError::InvalidNodeLabel {
            node_id: node.id().as_str().to_owned(),
            label,
        });
    }

    let (open, close) = shape_delimiters(node.meta().kind());
    out.push_str(indent);
    out.push_str(node.id().as_str());
    out.push_str(open);
    out.push_str(&label);
    out.push_str(close);
    out.push('\n');
    Ok(())
}

fn write_edge(out: &mut String, edge: &TopologyEdge) -> Result<(), MermaidExportError> {
    for endpoint in [edge.source(), edge.target()] {
        validate_mermaid_ident(endpoint.as_str()).map_err(|reason| {
            MermaidExportError::InvalidNodeId {
                node_id: endpoint.as_str().to_owned(),
                reason,
            }
        })?;
    }
    if !validate_export_edge_label(edge.label()) {
        return Err(MermaidExportError::InvalidEdgeLabel {
            source: edge.source().as_str().to_owned(),
            target: edge.target().as_str().to_owned(),
            label: edge.label().to_owned(),
        });
    }

    out.push_str("    ");
    out.push_str(edge.source().as_str());
    out.push_str(" -->");
    if !edge.label().is_empty() {
        out.push('|');
        out.push_str(edge.label());
        out.push('|');
    }
    out.push(' ');
    out.push_str(edge.target().as_str());
    out.push('\n');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{export_flowchart, ExportOptions, FlowDirection, MermaidExportError};
    use crate::model::{
        ComponentId, ComponentKind, ComponentMeta, Topology, TopologyEdge, TopologyNode,
    };

    fn id(value: &str) -> ComponentId {
        ComponentId::new(value).expect("component id")
    }

    fn node(node_id: &str, label: &str, kind: ComponentKind) -> TopologyNode {
        TopologyNode::new(id(node_id), ComponentMeta::new(label, kind))
    }

    fn sample_topology() -> Topology {
        Topology::new(
            vec![
                node("PostgreSQL", "PostgreSQL", ComponentKind::Storage),
                node("Processor_Service", "Processor Service", ComponentKind::Service),
                node("Raw_Queue", "Raw Queue", ComponentKind::Queue),
            ],
            vec![
                TopologyEdge::new(id("Processor_Service"), id("PostgreSQL"), "SQL", "SQL"),
                TopologyEdge::new(id("Raw_Queue"), id("Processor_Service"), "JSON<br>raw-v1", ""),
            ],
        )
    }

    #[test]
    fn grouped_export_emits_one_subgraph_per_present_kind() {
        let out = export_flowchart(&sample_topology(), &ExportOptions::default()).expect("export");

        assert_eq!(
            out,
            "flowchart TD\n\
             \x20   subgraph Services\n\
             \x20       Processor_Service[\"Processor Service\"]\n\
             \x20   end\n\
             \x20   subgraph Queues\n\
             \x20       Raw_Queue([\"Raw Queue\"])\n\
             \x20   end\n\
             \x20   subgraph Storage\n\
             \x20       PostgreSQL[(\"PostgreSQL\")]\n\
             \x20   end\n\
             \x20   Processor_Service -->|SQL| PostgreSQL\n\
             \x20   Raw_Queue -->|JSON<br>raw-v1| Processor_Service\n"
        );
    }

    #[test]
    fn flat_export_lists_nodes_in_id_order() {
        let options = ExportOptions {
            direction: FlowDirection::LeftRight,
            group_by_kind: false,
        };
        let out = export_flowchart(&sample_topology(), &options).expect("export");

        assert!(out.starts_with("flowchart LR\n"));
        assert!(!out.contains("subgraph"));
        let postgres = out.find("PostgreSQL[(").expect("postgres line");
        let processor = out.find("Processor_Service[\"").expect("processor line");
        assert!(postgres < processor);
    }

    #[test]
    fn icons_prefix_the_node_label() {
        let topology = Topology::new(
            vec![TopologyNode::new(
                id("MinIO"),
                ComponentMeta::new_with(
                    "MinIO (Object Storage)",
                    ComponentKind::Storage,
                    "",
                    Some("fa:fa-database".to_owned()),
                ),
            )],
            Vec::new(),
        );
        let out = export_flowchart(&topology, &ExportOptions::default()).expect("export");
        assert!(out.contains("MinIO[(\"fa:fa-database MinIO (Object Storage)\")]"));
    }

    #[test]
    fn unicode_node_ids_are_accepted() {
        let topology = Topology::new(
            vec![node("セッション管理", "セッション管理", ComponentKind::Service)],
            Vec::new(),
        );
        let out = export_flowchart(&topology, &ExportOptions::default()).expect("export");
        assert!(out.contains("セッション管理[\"セッション管理\"]"));
    }

    #[test]
    fn invalid_node_ids_are_rejected() {
        let topology = Topology::new(
            vec![node("raw-queue", "Raw Queue", ComponentKind::Queue)],
            Vec::new(),
        );
        let result = export_flowchart(&topology, &ExportOptions::default());
        assert!(matches!(
            result,
            Err(MermaidExportError::InvalidNodeId { .. })
        ));
    }

    #[test]
    fn edge_labels_with_pipes_are_rejected() {
        let topology = Topology::new(
            vec![
                node("A", "A", ComponentKind::Service),
                node("B", "B", ComponentKind::Service),
            ],
            vec![TopologyEdge::new(id("A"), id("B"), "bad|label", "")],
        );
        let result = export_flowchart(&topology, &ExportOptions::default());
        assert!(matches!(
            result,
            Err(MermaidExportError::InvalidEdgeLabel { .. })
        ));
    }
}
