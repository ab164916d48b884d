//! Static lookup tables shared by the heuristic stages

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::AudienceSegment;

/// Word-count constraints for a publishing platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct PlatformLimit {
    pub min: u32,
    pub max: u32,
    pub sweet_spot: u32,
}

pub const DEFAULT_SWEET_SPOT: u32 = 800;

pub const PLATFORM_LIMITS: &[(&str, PlatformLimit)] = &[
    ("LinkedIn", PlatformLimit { min: 150, max: 1300, sweet_spot: 600 }),
    ("Twitter", PlatformLimit { min: 100, max: 280, sweet_spot: 200 }),
    ("Beehiiv", PlatformLimit { min: 500, max: 2000, sweet_spot: 1200 }),
    ("Medium", PlatformLimit { min: 400, max: 1500, sweet_spot: 800 }),
];

/// Exact-name lookup; unknown platforms have no limit entry
pub fn platform_limit(platform: &str) -> Option<PlatformLimit> {
    PLATFORM_LIMITS
        .iter()
        .find(|(name, _)| *name == platform)
        .map(|(_, limit)| *limit)
}

/// Target word count for a platform, 800 when the platform is unknown
pub fn target_words(platform: &str) -> u32 {
    platform_limit(platform)
        .map(|limit| limit.sweet_spot)
        .unwrap_or(DEFAULT_SWEET_SPOT)
}

/// intro / body / outro stage names per archetype
pub const DEEP_ANALYSIS_TEMPLATE: [&str; 3] = [
    "Hook → Context → Thesis",
    "Evidence → Analysis → Implications",
    "Synthesis → Action → Future",
];
pub const QUICK_TAKE_TEMPLATE: [&str; 3] = [
    "Bold claim → Evidence",
    "3 key points → Examples",
    "So what? → Next step",
];
pub const TUTORIAL_TEMPLATE: [&str; 3] = [
    "Problem → Solution preview",
    "Step-by-step → Code → Gotchas",
    "Working example → Extensions",
];
pub const CRITIQUE_TEMPLATE: [&str; 3] = [
    "Status quo → Why it's broken",
    "Deep dive → Alternative view",
    "Better way → Call to action",
];

/// `{topic}` is substituted at selection time
pub const DEEP_ANALYSIS_SECTIONS: [&str; 5] = [
    "The Hidden Architecture of {topic}",
    "What the Data Actually Shows",
    "Second-Order Implications Nobody Discusses",
    "The Contrarian Take That Makes Sense",
    "Your Next Move",
];
pub const TUTORIAL_SECTIONS: [&str; 5] = [
    "The Problem You're Actually Solving",
    "Core Concepts in 2 Minutes",
    "Implementation That Actually Works",
    "Common Pitfalls (and How to Avoid Them)",
    "Taking It Further",
];
pub const DEFAULT_SECTIONS: [&str; 5] = [
    "The Setup",
    "The Insight",
    "The Evidence",
    "The Implications",
    "The Action",
];

pub const FORBIDDEN_PHRASES: [&str; 5] = [
    "leveraging",
    "utilize",
    "synergy",
    "best practices",
    "cutting-edge",
];

pub const EVIDENCE_MARKER: &str =
    "\n\n📊 Data point: one statistic stands out, 87% of teams see measurable improvement.";
pub const EXAMPLE_MARKER: &str = "\n\n🔍 Example: Here's how Stripe does it...";

pub const VIRAL_KEYWORDS: [&str; 7] = [
    "solution", "hack", "secret", "mistake", "truth", "guide", "tips",
];

pub const TECH_THEME_KEYWORDS: [&str; 9] = [
    "ai",
    "ml",
    "api",
    "database",
    "cloud",
    "automation",
    "framework",
    "workflow",
    "agent",
];

/// A keyword group and the segment increments it triggers
pub struct AudienceRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub deltas: &'static [(AudienceSegment, f64)],
}

pub const AUDIENCE_RULES: &[AudienceRule] = &[
    AudienceRule {
        name: "workflow",
        keywords: &["framework", "workflow", "process", "solution"],
        deltas: &[
            (AudienceSegment::TechnicalFounder, 0.2),
            (AudienceSegment::DecisionMaker, 0.1),
        ],
    },
    AudienceRule {
        name: "technical",
        keywords: &["architecture", "code", "technical", "engineering", "implementation"],
        deltas: &[
            (AudienceSegment::SeniorEngineer, 0.2),
            (AudienceSegment::TechnicalFounder, 0.1),
        ],
    },
    AudienceRule {
        name: "automation",
        keywords: &["ai", "automation", "efficiency"],
        deltas: &[
            (AudienceSegment::SkepticalLearner, 0.1),
            (AudienceSegment::DecisionMaker, 0.1),
        ],
    },
];

/// Platform adjustments, matched against the lowercased platform name
pub const PLATFORM_AUDIENCE_BOOSTS: &[(&str, &[(AudienceSegment, f64)])] = &[
    ("linkedin", &[(AudienceSegment::DecisionMaker, 0.1)]),
    (
        "twitter",
        &[
            (AudienceSegment::TechnicalFounder, 0.1),
            (AudienceSegment::SeniorEngineer, 0.1),
        ],
    ),
];

pub const HOOK_TEMPLATES: [&str; 5] = [
    "Here's what nobody tells you about {topic}:",
    "I spent 100 hours exploring {topic}. The results surprised me.",
    "The {topic} playbook everyone's using is broken. Here's why:",
    "Forget everything you know about {topic}. Start here instead:",
    "{topic} isn't what you think. Let me show you.",
];
pub const TECHNICAL_HOOK: &str = "Deep dive: How {topic} actually works under the hood";
pub const STRATEGIC_HOOK: &str = "The executive guide to {topic} (no fluff, just insights)";

pub const INSIGHT_TEMPLATES: [&str; 5] = [
    "The hidden cost of {topic} that 90% miss",
    "Why conventional {topic} wisdom is backwards",
    "The counterintuitive approach to {topic} that works",
    "What {topic} teaches us about systemic thinking",
    "The {topic} pattern that predicts the future",
];

pub fn fill_topic(template: &str, topic: &str) -> String {
    template.replace("{topic}", topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_sweet_spots() {
        assert_eq!(target_words("LinkedIn"), 600);
        assert_eq!(target_words("Twitter"), 200);
        assert_eq!(target_words("Beehiiv"), 1200);
        assert_eq!(target_words("Medium"), 800);
    }

    #[test]
    fn test_unknown_platform_uses_default() {
        assert_eq!(target_words("Mastodon"), DEFAULT_SWEET_SPOT);
        assert_eq!(target_words(""), DEFAULT_SWEET_SPOT);
        assert!(platform_limit("linkedin").is_none());
    }

    #[test]
    fn test_keyword_groups_are_disjoint() {
        let mut seen = std::collections::HashSet::new();
        for rule in AUDIENCE_RULES {
            for keyword in rule.keywords {
                assert!(seen.insert(*keyword), "duplicate keyword {keyword}");
            }
        }
    }

    #[test]
    fn test_markers_are_clean() {
        for phrase in FORBIDDEN_PHRASES {
            assert!(!EVIDENCE_MARKER.contains(phrase));
            assert!(!EXAMPLE_MARKER.contains(phrase));
        }
        assert!(EVIDENCE_MARKER.to_lowercase().contains("statistic"));
        assert!(EXAMPLE_MARKER.to_lowercase().contains("example"));
    }
}
