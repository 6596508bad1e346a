// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Components carry a canonical id plus display metadata; a sealed
//! [`Topology`] is the immutable node/edge result handed to renderers.

pub mod ids;
pub mod meta;
pub mod topology;

pub use ids::{ComponentId, DocumentId, Id, IdError};
pub use meta::{ComponentKind, ComponentMeta};
pub use topology::{Topology, TopologyEdge, TopologyNode};
