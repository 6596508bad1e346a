// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galatea — service-topology extraction for documentation corpora.
//!
//! Feed it `(document id, metadata mapping)` pairs and it resolves every
//! component reference — across scripts, spellings, and markup variants —
//! into one canonical, deduplicated flow graph ready for diagram
//! rendering. Document traversal, front-matter location, and image
//! rendering stay with the caller; [`ingest::extract_front_matter`] covers
//! the common Markdown case.
//!
//! ```
//! use galatea::assemble::assemble_topology;
//! use galatea::ingest::extract_front_matter;
//! use galatea::model::DocumentId;
//! use galatea::resolve::AliasRegistry;
//!
//! let text = "---\nservice_name: Processor Service\ninputs:\n  - source: Raw Queue\n    data_format: JSON\n---\n";
//! let documents = vec![(
//!     DocumentId::new("processor.md").unwrap(),
//!     extract_front_matter(text),
//! )];
//! let topology = assemble_topology(AliasRegistry::default(), documents).unwrap();
//! assert_eq!(topology.edges().len(), 1);
//! ```

pub mod assemble;
pub mod format;
pub mod ingest;
pub mod model;
pub mod resolve;
