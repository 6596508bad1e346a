// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// Presentation category of a component.
///
/// Kinds only group nodes for display; they carry no semantics in the
/// resolution or merge rules. Unrecognized tags fall back to [`Other`].
///
/// [`Other`]: ComponentKind::Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Service,
    Queue,
    Storage,
    Exchange,
    External,
    Other,
}

impl ComponentKind {
    /// Fixed presentation order, used wherever kinds group output.
    pub const ALL: [ComponentKind; 6] = [
        Self::External,
        Self::Service,
        Self::Queue,
        Self::Exchange,
        Self::Storage,
        Self::Other,
    ];

    /// Parses an open-ended kind tag. Unrecognized tags map to `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "service" => Self::Service,
            "queue" => Self::Queue,
            "storage" => Self::Storage,
            "exchange" => Self::Exchange,
            "external" => Self::External,
            _ => Self::Other,
        }
    }

    /// Deserializes from an open-ended tag with the [`from_tag`] fallback,
    /// so unrecognized kinds in configuration or metadata never error.
    ///
    /// [`from_tag`]: ComponentKind::from_tag
    pub fn deserialize_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Queue => "queue",
            Self::Storage => "storage",
            Self::Exchange => "exchange",
            Self::External => "external",
            Self::Other => "other",
        }
    }
}

/// Descriptive attributes attached to a resolved component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentMeta {
    label: String,
    kind: ComponentKind,
    description: String,
    icon: Option<String>,
}

impl ComponentMeta {
    pub fn new(label: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            label: label.into(),
            kind,
            description: String::new(),
            icon: None,
        }
    }

    pub fn new_with(
        label: impl Into<String>,
        kind: ComponentKind,
        description: impl Into<String>,
        icon: Option<String>,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            description: description.into(),
            icon,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::ComponentKind;

    #[test]
    fn kind_parses_known_tags_case_insensitively() {
        assert_eq!(ComponentKind::from_tag("queue"), ComponentKind::Queue);
        assert_eq!(ComponentKind::from_tag(" Storage "), ComponentKind::Storage);
        assert_eq!(ComponentKind::from_tag("EXCHANGE"), ComponentKind::Exchange);
    }

    #[test]
    fn kind_falls_back_to_other_for_unrecognized_tags() {
        assert_eq!(ComponentKind::from_tag("lambda"), ComponentKind::Other);
        assert_eq!(ComponentKind::from_tag(""), ComponentKind::Other);
    }

    #[test]
    fn kind_tag_round_trips() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_tag(kind.as_tag()), kind);
        }
    }
}
