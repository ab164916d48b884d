//! Folder-name potential analysis
//!
//! Everything here is keyword heuristics over the folder name; no completion
//! call is made, so an analysis returns in well under a millisecond.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    routing::ContentOwnership,
    scoring::{score_audience, score_virality, AudienceScoreMap},
    tables::TECH_THEME_KEYWORDS,
};

const TECHNICAL_MARKERS: [&str; 3] = ["code", "api", "implementation"];
const ADVANCED_MARKERS: [&str; 3] = ["advanced", "expert", "deep"];
const ORIGINAL_MARKERS: [&str; 2] = ["adhd", "personal"];
const FALLBACK_THEME_LIMIT: usize = 3;
const CONFIDENCE: f64 = 0.75;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct AnalyzePotentialRequest {
    pub folder: String,
    /// Accepted for compatibility; the analysis never runs a full flow
    #[serde(default)]
    pub use_flow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct TopicSuggestion {
    pub title: String,
    pub platform: String,
    #[serde(rename = "viralScore")]
    pub viral_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct PotentialAnalysis {
    pub folder: String,
    #[serde(rename = "filesCount")]
    pub files_count: usize,
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(rename = "contentOwnership")]
    pub content_ownership: ContentOwnership,
    #[serde(rename = "valueScore")]
    pub value_score: f64,
    pub viral_score: f64,
    pub complexity_level: String,
    pub key_themes: Vec<String>,
    #[serde(rename = "topTopics")]
    pub top_topics: Vec<TopicSuggestion>,
    pub recommendation: String,
    #[ts(type = "Record<string, number>")]
    pub audience_scores: AudienceScoreMap,
    pub processing_time_ms: u64,
    pub confidence: f64,
}

/// "ai-automation-guide" -> "Ai Automation Guide"
fn title_case(folder: &str) -> String {
    let mut out = String::with_capacity(folder.len());
    let mut prev_alpha = false;
    for ch in folder.replace('-', " ").chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

fn key_themes(folder: &str) -> Vec<String> {
    let lower = folder.to_lowercase();
    let themes: Vec<String> = TECH_THEME_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .map(|kw| kw.to_uppercase())
        .collect();
    if !themes.is_empty() {
        return themes;
    }

    folder
        .split('-')
        .filter(|word| word.chars().count() > 3)
        .take(FALLBACK_THEME_LIMIT)
        .map(str::to_uppercase)
        .collect()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn suggestion_score(viral_score: f64, bonus: f64) -> u32 {
    ((viral_score * 10.0 + bonus) as u32).min(10)
}

fn recommendation(viral_score: f64) -> &'static str {
    if viral_score > 0.7 {
        "🔥 High viral potential! Publish immediately on LinkedIn for maximum reach."
    } else if viral_score > 0.5 {
        "✅ Good potential. Consider adding controversial angles to boost engagement."
    } else {
        "📊 Niche content. Focus on technical communities for better reception."
    }
}

/// Score a raw-content folder by its name.
///
/// `files_count` is supplied by the caller, which owns filesystem access.
pub fn analyze_potential(folder: &str, files_count: usize) -> PotentialAnalysis {
    let start = Instant::now();
    let lower = folder.to_lowercase();

    let title = title_case(folder);
    let themes = key_themes(folder);
    let viral_score = score_virality(folder);

    let main_theme = themes.first().map(String::as_str).unwrap_or("Tech");
    let top_topics = vec![
        TopicSuggestion {
            title: format!("5 Lessons from {} Implementation", title),
            platform: "LinkedIn".to_string(),
            viral_score: suggestion_score(viral_score, 1.0),
        },
        TopicSuggestion {
            title: format!("The {} Mistake Everyone Makes", main_theme),
            platform: "Twitter".to_string(),
            viral_score: suggestion_score(viral_score, 2.0),
        },
        TopicSuggestion {
            title: format!("{}: A Complete Guide", title),
            platform: "Blog".to_string(),
            viral_score: suggestion_score(viral_score, 0.0),
        },
    ];

    let audience_scores = score_audience(
        &title,
        "LinkedIn",
        Some(&AudienceScoreMap::folder_analysis_baseline()),
    );

    let analysis = PotentialAnalysis {
        folder: folder.to_string(),
        files_count,
        content_type: if contains_any(&lower, &TECHNICAL_MARKERS) {
            "TECHNICAL"
        } else {
            "GENERAL"
        }
        .to_string(),
        content_ownership: if contains_any(&lower, &ORIGINAL_MARKERS) {
            ContentOwnership::Original
        } else {
            ContentOwnership::External
        },
        value_score: (viral_score * 100.0).round() / 10.0,
        viral_score,
        complexity_level: if contains_any(&lower, &ADVANCED_MARKERS) {
            "advanced"
        } else {
            "intermediate"
        }
        .to_string(),
        key_themes: themes,
        top_topics,
        recommendation: recommendation(viral_score).to_string(),
        audience_scores,
        processing_time_ms: start.elapsed().as_millis() as u64,
        confidence: CONFIDENCE,
    };

    tracing::debug!(
        "analyzed folder '{}': viral {:.2}, {} themes",
        folder,
        analysis.viral_score,
        analysis.key_themes.len()
    );
    analysis
}
