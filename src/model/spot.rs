// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::SpotId;
use super::user::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpotKind {
    Indoor,
    Outdoor,
}

impl SpotKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Indoor => "Indoor",
            Self::Outdoor => "Outdoor",
        }
    }
}

/// A shooting location. Read-mostly: the set is replaced wholesale when the
/// suggestion provider returns a fresh batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    id: SpotId,
    name: String,
    #[serde(rename = "type")]
    kind: SpotKind,
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image_url: String,
    location: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_url: Option<String>,
}

impl Spot {
    pub fn new(
        id: SpotId,
        name: impl Into<String>,
        kind: SpotKind,
        category: impl Into<String>,
        location: GeoPoint,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            category: category.into(),
            description: String::new(),
            image_url: String::new(),
            location,
            source_url: None,
        }
    }

    pub fn id(&self) -> &SpotId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SpotKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.image_url = url.into();
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn set_source_url(&mut self, url: Option<String>) {
        self.source_url = url;
    }

    /// Permissive category match kept from the legacy dual-tagging: a spot
    /// matches when the filter equals its category or its Indoor/Outdoor
    /// kind label.
    pub fn matches_category(&self, filter: &str) -> bool {
        filter == "All" || self.category == filter || self.kind.label() == filter
    }
}
