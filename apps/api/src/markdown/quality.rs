//! Quality gate for normalized resumes.
//!
//! Hard issues make a resume invalid; warnings are advisory only. The gate never
//! fails: every input, including the empty string, yields a verdict.

use serde::Serialize;

use crate::markdown::normalize::count_content_lines;
use crate::markdown::patterns::{HTML_TAG_RE, HTTP_LINK_RE, MAILTO_LINK_RE};

/// Filler phrases that signal the model padded the resume instead of citing facts.
const GENERIC_PHRASES: &[&str] = &[
    "building applications",
    "developing solutions",
    "passionate about",
    "team player",
    "hard worker",
];

/// Markers left behind by icon libraries in profile READMEs.
const ICON_MARKERS: &[&str] = &["iconify", "data-icon"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityVerdict {
    pub valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    /// Non-blank line count.
    pub line_count: usize,
}

/// Quality gate with a configurable soft line limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityGate {
    /// Content-line count above which a trimming warning is raised.
    pub max_lines: usize,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self { max_lines: 45 }
    }
}

impl QualityGate {
    pub fn check(&self, resume: &str) -> QualityVerdict {
        let lower = resume.to_lowercase();
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        if HTML_TAG_RE.is_match(resume) {
            issues.push("Resume contains HTML tags - these must be removed".to_string());
        }

        if ICON_MARKERS.iter().any(|marker| lower.contains(marker)) {
            issues.push("Resume contains icon codes - use plain text instead".to_string());
        }

        if resume.contains("http") && !HTTP_LINK_RE.is_match(resume) {
            warnings.push("URLs found but not properly formatted as markdown links".to_string());
        }

        if !MAILTO_LINK_RE.is_match(resume) {
            warnings.push("Email should be formatted as clickable link".to_string());
        }

        for phrase in GENERIC_PHRASES {
            if lower.contains(phrase) {
                warnings.push(format!(
                    "Found generic phrase: '{phrase}' - consider being more specific"
                ));
            }
        }

        let line_count = count_content_lines(resume);
        if line_count > self.max_lines {
            warnings.push(format!(
                "Resume has {line_count} lines - consider trimming to 35-40 for one page"
            ));
        }

        QualityVerdict {
            valid: issues.is_empty(),
            issues,
            warnings,
            line_count,
        }
    }
}

/// Checks `resume` with the default gate.
pub fn check(resume: &str) -> QualityVerdict {
    QualityGate::default().check(resume)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN_RESUME: &str = "# Jane Doe\n\
        [jane@doe.dev](mailto:jane@doe.dev) | [GitHub](https://github.com/jane)\n\
        \n\
        ## Experience\n\
        - **Acme** Reduced p99 latency by 40% with a Redis cache";

    #[test]
    fn test_clean_resume_passes_without_warnings() {
        let v = check(CLEAN_RESUME);
        assert!(v.valid);
        assert!(v.issues.is_empty());
        assert!(v.warnings.is_empty(), "unexpected warnings: {:?}", v.warnings);
        assert_eq!(v.line_count, 4);
    }

    #[test]
    fn test_html_tag_is_hard_failure() {
        let v = check("<div>Resume</div>");
        assert!(!v.valid);
        assert!(v.issues.iter().any(|i| i.contains("HTML tags")));
    }

    #[test]
    fn test_iconify_is_hard_failure_case_insensitive() {
        let v = check("Skills: ICONIFY logos-rust");
        assert!(!v.valid);
        assert!(v.issues.iter().any(|i| i.contains("icon codes")));
    }

    #[test]
    fn test_data_icon_is_hard_failure() {
        assert!(!check("span data-icon=rust").valid);
    }

    #[test]
    fn test_bare_url_warns() {
        let v = check("Portfolio: https://jane.dev");
        assert!(v.valid);
        assert!(v.warnings.iter().any(|w| w.contains("URLs found")));
    }

    #[test]
    fn test_linked_url_does_not_warn() {
        let v = check("[Portfolio](https://jane.dev)");
        assert!(!v.warnings.iter().any(|w| w.contains("URLs found")));
    }

    #[test]
    fn test_missing_mailto_warns() {
        let v = check("jane@doe.dev");
        assert!(v.warnings.iter().any(|w| w.contains("clickable link")));
    }

    #[test]
    fn test_generic_phrases_each_warn() {
        let v = check("Team player, PASSIONATE ABOUT building applications");
        let generic: Vec<_> = v
            .warnings
            .iter()
            .filter(|w| w.starts_with("Found generic phrase"))
            .collect();
        assert_eq!(generic.len(), 3);
        assert!(v.valid);
    }

    #[test]
    fn test_long_resume_warns() {
        let body: Vec<String> = (0..46).map(|i| format!("- item {i}")).collect();
        let v = check(&body.join("\n"));
        assert_eq!(v.line_count, 46);
        assert!(v.warnings.iter().any(|w| w.contains("46 lines")));
    }

    #[test]
    fn test_custom_line_limit() {
        let gate = QualityGate { max_lines: 2 };
        let v = gate.check("a\nb\nc");
        assert!(v.warnings.iter().any(|w| w.contains("3 lines")));
    }

    #[test]
    fn test_empty_input_yields_verdict() {
        let v = check("");
        assert!(v.valid);
        assert_eq!(v.line_count, 0);
        assert_eq!(v.warnings.len(), 1);
    }

    #[test]
    fn test_check_is_deterministic() {
        let text = "<b>x</b> team player http://x";
        assert_eq!(check(text), check(text));
    }
}
