// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{ReviewId, UserId};

/// What a registered participant does on the platform. A user carries a
/// non-empty set of roles once their profile is complete; the wire labels
/// are the French ones the documents have always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Modèle")]
    Model,
    #[serde(rename = "Photographe")]
    Photographer,
    #[serde(rename = "Vidéaste")]
    Videographer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Model, Role::Photographer, Role::Videographer];

    pub fn label(self) -> &'static str {
        match self {
            Self::Model => "Modèle",
            Self::Photographer => "Photographe",
            Self::Videographer => "Vidéaste",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Discovery role filter: everybody, or only users carrying one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

impl RoleFilter {
    pub fn matches(self, roles: &[Role]) -> bool {
        match self {
            Self::All => true,
            Self::Only(role) => roles.contains(&role),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Fixed fallback coordinate (Paris) used when geolocation is denied or
/// times out.
pub const FALLBACK_LOCATION: GeoPoint = GeoPoint {
    lat: 48.8566,
    lng: 2.3522,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    None,
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub author_id: UserId,
    pub author_name: String,
    pub rating: u8,
    pub comment: String,
    pub timestamp: String,
}

/// A registered participant.
///
/// `rating` is derived from `reviews` and recomputed on every attach; it is
/// kept on the document so list surfaces never need the full review set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    #[serde(rename = "types", default)]
    roles: Vec<Role>,
    #[serde(default)]
    avatar_url: String,
    location: GeoPoint,
    #[serde(default)]
    headline: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    portfolio: Vec<PortfolioItem>,
    #[serde(default)]
    bio: String,
    #[serde(default)]
    rate: f64,
    #[serde(default)]
    is_pro: bool,
    #[serde(default)]
    is_available_now: bool,
    #[serde(default)]
    verification_status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    age: Option<u8>,
    #[serde(default)]
    is_premium: bool,
    #[serde(default)]
    reviews: Vec<Review>,
    #[serde(default)]
    available_days: Vec<String>,
    #[serde(default)]
    completed_shoots_count: u32,
}

impl User {
    /// A fresh profile as registration creates it: no roles, no portfolio,
    /// zero rating, anchored at the fallback coordinate.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            roles: Vec::new(),
            avatar_url: String::new(),
            location: FALLBACK_LOCATION,
            headline: String::new(),
            rating: 0.0,
            portfolio: Vec::new(),
            bio: String::new(),
            rate: 0.0,
            is_pro: false,
            is_available_now: false,
            verification_status: VerificationStatus::None,
            email: None,
            age: None,
            is_premium: false,
            reviews: Vec::new(),
            available_days: Vec::new(),
            completed_shoots_count: 0,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn set_roles(&mut self, roles: Vec<Role>) {
        self.roles = roles;
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    pub fn set_avatar_url(&mut self, url: impl Into<String>) {
        self.avatar_url = url.into();
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn set_location(&mut self, location: GeoPoint) {
        self.location = location;
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn set_headline(&mut self, headline: impl Into<String>) {
        self.headline = headline.into();
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn portfolio(&self) -> &[PortfolioItem] {
        &self.portfolio
    }

    pub fn portfolio_mut(&mut self) -> &mut Vec<PortfolioItem> {
        &mut self.portfolio
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) {
        self.bio = bio.into();
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.max(0.0);
    }

    pub fn is_pro(&self) -> bool {
        self.is_pro
    }

    pub fn set_pro(&mut self, is_pro: bool) {
        self.is_pro = is_pro;
    }

    pub fn is_available_now(&self) -> bool {
        self.is_available_now
    }

    pub fn set_available_now(&mut self, available: bool) {
        self.is_available_now = available;
    }

    pub fn verification_status(&self) -> VerificationStatus {
        self.verification_status
    }

    pub fn set_verification_status(&mut self, status: VerificationStatus) {
        self.verification_status = status;
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn available_days(&self) -> &[String] {
        &self.available_days
    }

    pub fn set_available_days(&mut self, days: Vec<String>) {
        self.available_days = days;
    }

    pub fn completed_shoots_count(&self) -> u32 {
        self.completed_shoots_count
    }

    pub fn record_completed_shoot(&mut self) {
        self.completed_shoots_count = self.completed_shoots_count.saturating_add(1);
    }

    /// Appends a review and recomputes the derived average rating.
    pub fn attach_review(&mut self, review: Review) {
        self.reviews.push(review);
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        self.rating = f64::from(total) / self.reviews.len() as f64;
    }

    /// Case-insensitive substring match over name, headline, and bio.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.headline.to_lowercase().contains(&needle)
            || self.bio.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(value: &str) -> UserId {
        UserId::new(value).expect("user id")
    }

    fn rid(value: &str) -> ReviewId {
        ReviewId::new(value).expect("review id")
    }

    #[test]
    fn new_user_has_no_roles_and_zero_rating() {
        let user = User::new(uid("u:1"), "Anna");
        assert!(user.roles().is_empty());
        assert_eq!(user.rating(), 0.0);
        assert_eq!(user.completed_shoots_count(), 0);
    }

    #[test]
    fn attach_review_recomputes_average() {
        let mut user = User::new(uid("u:1"), "Anna");
        for (id, rating) in [("r:1", 5), ("r:2", 3)] {
            user.attach_review(Review {
                id: rid(id),
                author_id: uid("u:2"),
                author_name: "Ben".to_owned(),
                rating,
                comment: "ok".to_owned(),
                timestamp: "now".to_owned(),
            });
        }
        assert_eq!(user.rating(), 4.0);
    }

    #[test]
    fn search_matches_name_headline_and_bio_case_insensitive() {
        let mut user = User::new(uid("u:1"), "Anna");
        user.set_headline("Portrait & Mode");
        user.set_bio("Disponible sur Paris");

        assert!(user.matches_search("anna"));
        assert!(user.matches_search("MODE"));
        assert!(user.matches_search("paris"));
        assert!(user.matches_search("  "));
        assert!(!user.matches_search("berlin"));
    }

    #[test]
    fn role_filter_all_matches_everyone() {
        assert!(RoleFilter::All.matches(&[]));
        assert!(RoleFilter::Only(Role::Model).matches(&[Role::Model, Role::Photographer]));
        assert!(!RoleFilter::Only(Role::Videographer).matches(&[Role::Model]));
    }

    #[test]
    fn role_round_trips_through_french_wire_labels() {
        let json = serde_json::to_string(&Role::Model).expect("serialize");
        assert_eq!(json, "\"Modèle\"");
        let back: Role = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Role::Model);
    }
}
