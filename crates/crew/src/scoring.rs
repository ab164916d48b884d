//! Heuristic audience-affinity and virality scoring
//!
//! Both scorers are small rule engines over the keyword tables in
//! [`crate::tables`]: every matching rule contributes a fixed increment and the
//! result is clamped to `[0, 1]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tables::{AUDIENCE_RULES, PLATFORM_AUDIENCE_BOOSTS, VIRAL_KEYWORDS};

/// Audience segments tracked by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudienceSegment {
    TechnicalFounder,
    SeniorEngineer,
    DecisionMaker,
    SkepticalLearner,
}

impl AudienceSegment {
    pub const ALL: [AudienceSegment; 4] = [
        AudienceSegment::TechnicalFounder,
        AudienceSegment::SeniorEngineer,
        AudienceSegment::DecisionMaker,
        AudienceSegment::SkepticalLearner,
    ];
}

/// Score per audience segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudienceScoreMap(BTreeMap<AudienceSegment, f64>);

impl AudienceScoreMap {
    pub fn new(
        technical_founder: f64,
        senior_engineer: f64,
        decision_maker: f64,
        skeptical_learner: f64,
    ) -> Self {
        Self(BTreeMap::from([
            (AudienceSegment::TechnicalFounder, technical_founder),
            (AudienceSegment::SeniorEngineer, senior_engineer),
            (AudienceSegment::DecisionMaker, decision_maker),
            (AudienceSegment::SkepticalLearner, skeptical_learner),
        ]))
    }

    /// Baseline used when analysing content folders
    pub fn folder_analysis_baseline() -> Self {
        Self::new(0.7, 0.6, 0.5, 0.8)
    }

    /// Missing segments read as 0
    pub fn get(&self, segment: AudienceSegment) -> f64 {
        self.0.get(&segment).copied().unwrap_or(0.0)
    }

    fn add(&mut self, segment: AudienceSegment, delta: f64) {
        *self.0.entry(segment).or_insert(0.0) += delta;
    }

    fn clamp_all(&mut self) {
        for score in self.0.values_mut() {
            *score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AudienceSegment, f64)> + '_ {
        self.0.iter().map(|(segment, score)| (*segment, *score))
    }
}

impl Default for AudienceScoreMap {
    fn default() -> Self {
        Self::new(0.6, 0.6, 0.5, 0.7)
    }
}

/// Score how strongly `title` speaks to each audience segment on `platform`.
///
/// Starts from `fallback` (or the default baseline), applies every keyword
/// group whose keyword occurs in the lowercased title, then the platform
/// boost, and clamps each score to `[0, 1]`.
pub fn score_audience(
    title: &str,
    platform: &str,
    fallback: Option<&AudienceScoreMap>,
) -> AudienceScoreMap {
    let title_lower = title.to_lowercase();
    let platform_lower = platform.to_lowercase();

    let mut scores = fallback.cloned().unwrap_or_default();
    for segment in AudienceSegment::ALL {
        scores.0.entry(segment).or_insert(0.0);
    }

    for rule in AUDIENCE_RULES {
        if rule.keywords.iter().any(|kw| title_lower.contains(kw)) {
            tracing::trace!("audience rule '{}' matched '{}'", rule.name, title);
            for (segment, delta) in rule.deltas {
                scores.add(*segment, *delta);
            }
        }
    }

    if let Some((_, boosts)) = PLATFORM_AUDIENCE_BOOSTS
        .iter()
        .find(|(name, _)| *name == platform_lower)
    {
        for (segment, delta) in boosts.iter() {
            scores.add(*segment, *delta);
        }
    }

    scores.clamp_all();
    scores
}

/// 0.5 base, +0.1 per viral keyword, +0.05 for a LinkedIn mention, capped at 1.0
pub fn score_virality(name: &str) -> f64 {
    let name_lower = name.to_lowercase();

    // accumulate per hit; suggestion scores truncate the sum
    let mut score: f64 = 0.5;
    for _ in VIRAL_KEYWORDS.iter().filter(|kw| name_lower.contains(*kw)) {
        score += 0.1;
    }
    if name_lower.contains("linkedin") {
        score += 0.05;
    }

    score.min(1.0)
}
