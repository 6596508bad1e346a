// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid export for resolved topologies.

pub mod flowchart;
mod ident;

pub use flowchart::{
    export_flowchart, ExportOptions, FlowDirection, MermaidExportError, MermaidIdentError,
};
