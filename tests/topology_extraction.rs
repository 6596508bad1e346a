// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};

use galatea::assemble::{assemble_topology, FANOUT_EDGE_LABEL};
use galatea::format::mermaid::{export_flowchart, ExportOptions};
use galatea::ingest::{extract_front_matter, MetadataMap};
use galatea::model::{ComponentKind, DocumentId, Topology};
use galatea::resolve::{AliasEntry, AliasRegistry};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("architecture")
}

fn load_documents() -> Vec<(DocumentId, Option<MetadataMap>)> {
    let dir = fixtures_dir();
    let mut documents = Vec::new();
    for entry in fs::read_dir(&dir).unwrap_or_else(|err| panic!("failed to read {dir:?}: {err}")) {
        let path = entry.expect("dir entry").path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
            continue;
        }
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .expect("fixture file name");
        let text = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"));
        documents.push((
            DocumentId::new(name).expect("document id"),
            extract_front_matter(&text),
        ));
    }
    documents
}

fn registry() -> AliasRegistry {
    AliasRegistry::new(vec![
        AliasEntry::new("SmartphoneApp", "Smartphone App")
            .with_kind(ComponentKind::External)
            .with_aliases(["スマホアプリ"]),
        AliasEntry::new("MinIO", "MinIO<br>(Object Storage)")
            .with_kind(ComponentKind::Storage)
            .with_icon("fa:fa-database")
            .with_aliases(["MinIO（オブジェクトストレージ）"]),
        AliasEntry::new("PostgreSQL", "PostgreSQL")
            .with_kind(ComponentKind::Storage)
            .with_icon("fa:fa-database"),
    ])
    .expect("registry")
}

fn extract() -> Topology {
    assemble_topology(registry(), load_documents()).expect("topology")
}

#[test]
fn corpus_resolves_to_the_expected_graph() {
    let topology = extract();

    let ids: Vec<&str> = topology.nodes().iter().map(|n| n.id().as_str()).collect();
    assert_eq!(
        ids,
        [
            "Analysis_Queue",
            "Collector_Service",
            "MinIO",
            "PostgreSQL",
            "Processing_Queue",
            "Processor_Service",
            "Raw_Data_Exchange",
            "Realtime_Analyzer",
            "SmartphoneApp",
        ]
    );
    assert_eq!(topology.edges().len(), 8);

    // Alias hits keep registry metadata; the Japanese spellings resolved to
    // the same canonical components as the English ones.
    let app = topology.node("SmartphoneApp").expect("app node");
    assert_eq!(app.meta().label(), "Smartphone App");
    assert_eq!(app.meta().kind(), ComponentKind::External);

    // The parenthetical aside did not leak into the analyzer's id, but the
    // label keeps the raw spelling.
    let analyzer = topology.node("Realtime_Analyzer").expect("analyzer node");
    assert_eq!(analyzer.meta().label(), "Realtime Analyzer (v2)");

    // The exchange was first seen as a plain edge endpoint; the fan-out
    // declaration still claimed its kind.
    let exchange = topology.node("Raw_Data_Exchange").expect("exchange node");
    assert_eq!(exchange.meta().kind(), ComponentKind::Exchange);

    let ingest_edge = topology
        .edge("SmartphoneApp", "Collector_Service")
        .expect("ingest edge");
    assert_eq!(ingest_edge.label(), "JSON<br>telemetry-v1");
    assert_eq!(ingest_edge.tooltip(), "JSON, telemetry-v1");

    for target in ["Processing_Queue", "Analysis_Queue"] {
        let edge = topology.edge("Raw_Data_Exchange", target).expect("fanout edge");
        assert_eq!(edge.label(), FANOUT_EDGE_LABEL);
    }
}

#[test]
fn extraction_is_idempotent_and_serializable() {
    let first = extract();
    let second = extract();
    assert_eq!(first, second);

    let json_a = serde_json::to_string(&first).expect("serialize");
    let json_b = serde_json::to_string(&second).expect("serialize");
    assert_eq!(json_a, json_b);
}

#[test]
fn corpus_exports_as_a_grouped_mermaid_flowchart() {
    let out = export_flowchart(&extract(), &ExportOptions::default()).expect("export");

    assert!(out.starts_with("flowchart TD\n"));
    assert!(out.contains("    subgraph External\n"));
    assert!(out.contains("        SmartphoneApp(\"Smartphone App\")\n"));
    assert!(out.contains("        MinIO[(\"fa:fa-database MinIO<br>(Object Storage)\")]\n"));
    assert!(out.contains("    Raw_Data_Exchange -->|fanout message| Processing_Queue\n"));
    assert!(out.contains("    Processing_Queue -->|JSON<br>raw-v1| Processor_Service\n"));

    // Subgraphs group presentation only; every node still appears once.
    assert_eq!(out.matches("SmartphoneApp(").count(), 1);
}
