//! Vector Wave style rules applied to generated drafts

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tables::{EVIDENCE_MARKER, EXAMPLE_MARKER, FORBIDDEN_PHRASES};

static REPEATED_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());
static SPACE_BEFORE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+([,.;:!?])").unwrap());

/// Post-processing options for the style filter
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleRules {
    /// Collapse the gaps left behind by phrase removal
    pub normalize_whitespace: bool,
}

impl StyleRules {
    pub fn normalizing() -> Self {
        Self {
            normalize_whitespace: true,
        }
    }

    pub fn apply(&self, draft: &str) -> String {
        let mut text = draft.to_string();

        // Deleting one phrase can splice together another, so repeat until clean
        loop {
            for phrase in FORBIDDEN_PHRASES {
                if text.contains(phrase) {
                    text = text.replace(phrase, "");
                }
            }
            if self.normalize_whitespace {
                text = REPEATED_SPACES.replace_all(&text, " ").into_owned();
                text = SPACE_BEFORE_PUNCTUATION.replace_all(&text, "$1").into_owned();
            }
            if !contains_forbidden(&text) {
                break;
            }
        }

        if !text.to_lowercase().contains("statistic") {
            text.push_str(EVIDENCE_MARKER);
        }

        let lower = text.to_lowercase();
        if !lower.contains("example") && !lower.contains("for instance") {
            text.push_str(EXAMPLE_MARKER);
        }

        text
    }
}

fn contains_forbidden(text: &str) -> bool {
    FORBIDDEN_PHRASES.iter().any(|phrase| text.contains(phrase))
}

/// Strip forbidden phrases (case-sensitive) and append evidence/example
/// markers when the draft lacks them. Whitespace is left as removal leaves it.
pub fn apply_style(draft: &str) -> String {
    StyleRules::default().apply(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_best_practices_and_adds_markers() {
        let styled = apply_style("We leverage best practices here.");

        assert!(!styled.contains("best practices"));
        assert!(styled.starts_with("We leverage  here."));
        assert!(styled.contains(EVIDENCE_MARKER));
        assert!(styled.ends_with(EXAMPLE_MARKER));
    }

    #[test]
    fn test_every_forbidden_phrase_is_removed() {
        for phrase in FORBIDDEN_PHRASES {
            let draft = format!("Teams keep {phrase} and {phrase} again.");
            let styled = apply_style(&draft);
            assert!(!styled.contains(phrase), "{phrase} survived");
        }
    }

    #[test]
    fn test_removal_is_case_sensitive() {
        let styled = apply_style("Synergy matters, for instance in one statistic.");
        assert!(styled.contains("Synergy"));
    }

    #[test]
    fn test_spliced_phrase_is_removed() {
        let styled = apply_style("we utiutilizelize tools");
        assert!(!styled.contains("utilize"));
    }

    #[test]
    fn test_statistic_always_present() {
        for draft in ["", "plain text", "STATISTICS are in", "🔍 example"] {
            assert!(apply_style(draft).to_lowercase().contains("statistic"));
        }
    }

    #[test]
    fn test_existing_markers_are_respected() {
        let draft = "One statistic, for instance, shows growth.";
        assert_eq!(apply_style(draft), draft);

        let draft = "A statistic and an Example.";
        assert_eq!(apply_style(draft), draft);
    }

    #[test]
    fn test_idempotent_on_clean_draft() {
        let once = apply_style("Plain draft.");
        let twice = apply_style(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalizing_rules_collapse_gaps() {
        let styled = StyleRules::normalizing().apply("We leverage best practices here.");
        assert!(styled.starts_with("We leverage here."));
    }

    #[test]
    fn test_normalizing_rules_catch_phrases_joined_by_spaces() {
        let styled = StyleRules::normalizing().apply("best  leveraging  practices");
        assert!(!styled.contains("best practices"));
    }
}
