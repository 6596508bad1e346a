// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Name resolution.
//!
//! The alias registry canonicalizes known spelling variants, the identifier
//! synthesizer derives ids for everything else, and the resolver composes
//! the two with run-scoped collision handling.

pub mod ident;
pub mod registry;
pub mod resolver;

pub use ident::{normalize_key, sanitize_label, synthesize_ident, PLACEHOLDER_IDENT};
pub use registry::{AliasEntry, AliasRegistry, RegistryError};
pub use resolver::{NameResolver, Resolution};
