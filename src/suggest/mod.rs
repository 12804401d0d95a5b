// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Best-effort content suggestions.
//!
//! Everything behind [`SuggestionProvider`] is advisory: quiz questions,
//! chat icebreakers, contract clauses, spot discovery. A provider that is
//! unconfigured or failing degrades to canned fallbacks; no operation in the
//! rest of the app ever blocks on, or errors because of, this module.

use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{Spot, User, UserId};

/// One multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
}

/// A collaboration pitch for a viewed profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    pub user_id: UserId,
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSuggestions {
    pub headlines: Vec<String>,
    pub bio: String,
}

/// Extracts the JSON payload from a model response that may wrap it in
/// markdown code fences or surround it with prose. Returns the input
/// unchanged when no object or array is found.
pub fn clean_json(text: &str) -> &str {
    static PAYLOAD: OnceLock<Regex> = OnceLock::new();
    let payload = PAYLOAD
        .get_or_init(|| Regex::new(r"(?s)\{.*\}|\[.*\]").expect("payload pattern compiles"));

    let trimmed = text.trim();
    let without_fences = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);
    match payload.find(without_fences) {
        Some(found) => found.as_str(),
        None => without_fences,
    }
}

/// Encodes raw bytes as a `data:` URI.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

/// Splits a `data:` URI into its mime type and decoded payload.
pub fn split_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let bytes = BASE64.decode(payload).ok()?;
    Some((mime.to_owned(), bytes))
}

/// The advisory-content seam. Implementations must never panic and should
/// answer quickly; callers treat every result as optional garnish.
pub trait SuggestionProvider {
    /// Whether a real backend is wired up. Purely informational; the other
    /// methods degrade on their own.
    fn is_configured(&self) -> bool {
        false
    }

    fn quiz_questions(&self) -> Vec<QuizQuestion> {
        Vec::new()
    }

    /// Conversation openers for `sender_role` contacting `receiver_role`.
    fn chat_icebreakers(&self, _sender_role: &str, _receiver_role: &str) -> Vec<String> {
        vec!["Bonjour !".to_owned()]
    }

    fn contract_clauses(&self, _professional_role: &str, _client_role: &str) -> Vec<String> {
        vec!["Clauses standards.".to_owned()]
    }

    fn collaboration_suggestions(&self, _me: &User, viewed: &User) -> Vec<AiSuggestion> {
        vec![AiSuggestion {
            user_id: viewed.id().clone(),
            justification: "Styles complémentaires.".to_owned(),
        }]
    }

    fn profile_suggestions(&self, _role: &str) -> ProfileSuggestions {
        ProfileSuggestions {
            headlines: vec!["Créateur".to_owned()],
            bio: "Passionné.".to_owned(),
        }
    }

    /// Fresh shooting spots, or empty when discovery is unavailable. The
    /// dispatcher keeps the previous batch on empty.
    fn fetch_spots(&self) -> Vec<Spot> {
        Vec::new()
    }

    /// Returns the retouched image as a `data:` URI, or the input untouched
    /// when retouching is unavailable.
    fn retouch_image(&self, image: &str) -> String {
        image.to_owned()
    }

    fn analyze_style(&self, _portfolio_images: &[String]) -> String {
        "Style Elite".to_owned()
    }
}

/// The unconfigured provider: every method is the trait's fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSuggestions;

impl SuggestionProvider for NullSuggestions {}

/// Canned deterministic content for demo sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggestions {
    spots: Vec<Spot>,
}

impl StaticSuggestions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spots(spots: Vec<Spot>) -> Self {
        Self { spots }
    }
}

impl SuggestionProvider for StaticSuggestions {
    fn is_configured(&self) -> bool {
        true
    }

    fn quiz_questions(&self) -> Vec<QuizQuestion> {
        vec![
            QuizQuestion {
                question: "Quelle ouverture donne la plus faible profondeur de champ ?".to_owned(),
                options: vec!["f/16".to_owned(), "f/8".to_owned(), "f/1.4".to_owned()],
                correct_answer_index: 2,
            },
            QuizQuestion {
                question: "Que désigne la règle des tiers ?".to_owned(),
                options: vec![
                    "Un ratio d'exposition".to_owned(),
                    "Un principe de composition".to_owned(),
                    "Un format de capteur".to_owned(),
                ],
                correct_answer_index: 1,
            },
            QuizQuestion {
                question: "L'heure dorée se situe...".to_owned(),
                options: vec![
                    "Juste après le lever et avant le coucher du soleil".to_owned(),
                    "À midi".to_owned(),
                    "En pleine nuit".to_owned(),
                ],
                correct_answer_index: 0,
            },
        ]
    }

    fn chat_icebreakers(&self, sender_role: &str, receiver_role: &str) -> Vec<String> {
        vec![
            format!("Bonjour ! {sender_role} à la recherche d'un {receiver_role} pour un projet."),
            "Votre portfolio correspond exactement à ce que je cherche.".to_owned(),
            "Disponible pour un shooting cette semaine ?".to_owned(),
        ]
    }

    fn contract_clauses(&self, professional_role: &str, client_role: &str) -> Vec<String> {
        vec![
            format!("Le {professional_role} livre les fichiers retouchés sous 14 jours."),
            format!("Le {client_role} obtient un droit d'usage non exclusif des images."),
            "Toute annulation à moins de 48h est facturée 50%.".to_owned(),
            "Les fonds restent sous séquestre jusqu'à la livraison.".to_owned(),
        ]
    }

    fn fetch_spots(&self) -> Vec<Spot> {
        self.spots.clone()
    }
}
