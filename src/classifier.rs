//! Generic field classification
//!
//! Used when no vendor adapter claims the page. Every fillable control is
//! described by the text around it (name, id, placeholder, aria-label and
//! its label), and that text is matched against an ordered rule table.

use crate::field::{FieldType, confidence};
use crate::page::{ElementId, PageModel};
use regex::Regex;
use std::sync::LazyLock;

/// Ordered rule table over normalized signal text; first match wins.
///
/// Patterns use word boundaries so short tokens ("cv", "tel") only match
/// whole words.
const RULE_PATTERNS: &[(FieldType, &str)] = &[
    (
        FieldType::FirstName,
        r"\b(first ?name|fname|given ?names?|forename|prenom)\b",
    ),
    (
        FieldType::LastName,
        r"\b(last ?name|lname|surname|family ?name)\b",
    ),
    (FieldType::Email, r"\b(e ?mail|mail|eposta|e posta)\b"),
    (
        FieldType::Phone,
        r"\b(phone|telephone|tel|mobile|cell|telefon)\b",
    ),
    (FieldType::Linkedin, r"\blinked ?in\b"),
    (FieldType::Github, r"\bgit ?hub\b"),
    (
        FieldType::Portfolio,
        r"\b(portfolio|personal (site|web ?site))\b",
    ),
    (FieldType::Website, r"\b(web ?site|homepage|url)\b"),
    (FieldType::Resume, r"\b(resume|cv|curriculum vitae)\b"),
    (
        FieldType::CoverLetter,
        r"\b(cover ?letter|motivation letter)\b",
    ),
    (
        FieldType::SalaryExpectation,
        r"\b(salary|compensation|pay expectations?)\b",
    ),
    (
        FieldType::StartDate,
        r"\b(start date|available from|earliest start)\b",
    ),
    (
        FieldType::NoticePeriod,
        r"\b(notice( period)?|availability|when can you start)\b",
    ),
    (
        FieldType::WorkAuth,
        r"\b(authori[sz]ed|work authori[sz]ation|eligib(le|ility))\b",
    ),
    (FieldType::VisaSponsorship, r"\b(visa|sponsorship|sponsor)\b"),
    (FieldType::Relocation, r"\b(relocate|relocation)\b"),
    (FieldType::City, r"\b(city|town|municipality)\b"),
    (FieldType::Country, r"\b(country|nation)\b"),
    (FieldType::Address, r"\b(address|street|location)\b"),
];

static RULES: LazyLock<Vec<(FieldType, Regex)>> = LazyLock::new(|| {
    RULE_PATTERNS
        .iter()
        .map(|(field_type, pattern)| {
            let regex = Regex::new(pattern).expect("classifier patterns are valid");
            (*field_type, regex)
        })
        .collect()
});

/// Outcome of classifying one control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub field_type: FieldType,
    pub confidence: f32,
}

/// Raw text signals gathered around a control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSignals {
    pub name: Option<String>,
    pub id: Option<String>,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    pub label: Option<String>,
}

impl FieldSignals {
    pub fn collect(page: &dyn PageModel, el: ElementId) -> Self {
        let attr = |name: &str| {
            page.attribute(el, name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            name: attr("name"),
            id: attr("id"),
            placeholder: attr("placeholder"),
            aria_label: attr("aria-label"),
            label: page.associated_label(el),
        }
    }

    /// Normalized concatenation of all signals, empty when nothing is known.
    pub fn combined(&self) -> String {
        [
            &self.name,
            &self.id,
            &self.placeholder,
            &self.aria_label,
            &self.label,
        ]
        .into_iter()
        .flatten()
        .map(|s| normalize_signal(s))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Best human-readable label: label, aria-label, placeholder, then name.
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .or_else(|| self.aria_label.clone())
            .or_else(|| self.placeholder.clone())
            .or_else(|| {
                self.name
                    .as_ref()
                    .map(|n| n.replace(['_', '-'], " ").trim().to_string())
            })
            .unwrap_or_default()
    }
}

/// Lowercase, split camelCase, and turn punctuation into single spaces.
///
/// `applicant_firstName` becomes `applicant first name`.
pub fn normalize_signal(text: &str) -> String {
    let mut spaced = String::with_capacity(text.len() + 8);
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if let Some(p) = prev
            && c.is_uppercase()
            && (p.is_lowercase() || p.is_ascii_digit())
        {
            spaced.push(' ');
        }
        if c.is_alphanumeric() {
            spaced.extend(c.to_lowercase());
        } else {
            spaced.push(' ');
        }
        prev = Some(c);
    }
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Heuristic classifier for pages without a vendor adapter
#[derive(Debug, Clone)]
pub struct FieldClassifier {
    matched_confidence: f32,
    custom_question_confidence: f32,
}

impl FieldClassifier {
    pub fn new() -> Self {
        Self::with_confidence(confidence::GENERIC, confidence::CUSTOM_QUESTION)
    }

    pub fn with_confidence(matched: f32, custom_question: f32) -> Self {
        Self {
            matched_confidence: matched.clamp(0.0, 1.0),
            custom_question_confidence: custom_question.clamp(0.0, 1.0),
        }
    }

    /// Classify already-normalized signal text.
    pub fn classify_text(&self, signal: &str) -> Classification {
        if signal.trim().is_empty() {
            return Classification {
                field_type: FieldType::Unknown,
                confidence: 0.0,
            };
        }

        match RULES.iter().find(|(_, regex)| regex.is_match(signal)) {
            Some((field_type, _)) => Classification {
                field_type: *field_type,
                confidence: self.matched_confidence,
            },
            None => Classification {
                field_type: FieldType::CustomQuestion,
                confidence: self.custom_question_confidence,
            },
        }
    }

    pub fn classify_signals(&self, signals: &FieldSignals) -> Classification {
        self.classify_text(&signals.combined())
    }
}

impl Default for FieldClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::FakePage;

    #[test]
    fn normalizes_camel_case_and_punctuation() {
        assert_eq!(normalize_signal("applicant_firstName"), "applicant first name");
        assert_eq!(normalize_signal("  E-Mail  Address "), "e mail address");
        assert_eq!(normalize_signal("job[phone2Number]"), "job phone2 number");
        assert_eq!(normalize_signal("___"), "");
    }

    #[test]
    fn classifies_common_fields() {
        let classifier = FieldClassifier::new();
        let cases = [
            ("first name", FieldType::FirstName),
            ("firstname", FieldType::FirstName),
            ("family name", FieldType::LastName),
            ("email address", FieldType::Email),
            ("e mail", FieldType::Email),
            ("mail", FieldType::Email),
            ("phone number", FieldType::Phone),
            ("linkedin profile", FieldType::Linkedin),
            ("github", FieldType::Github),
            ("personal website", FieldType::Portfolio),
            ("website", FieldType::Website),
            ("upload cv", FieldType::Resume),
            ("cover letter", FieldType::CoverLetter),
            ("expected salary", FieldType::SalaryExpectation),
            ("earliest start date", FieldType::StartDate),
            ("notice period", FieldType::NoticePeriod),
            ("are you authorized to work", FieldType::WorkAuth),
            ("do you require visa sponsorship", FieldType::VisaSponsorship),
            ("willing to relocate", FieldType::Relocation),
            ("city", FieldType::City),
            ("country of residence", FieldType::Country),
            ("street address", FieldType::Address),
        ];
        for (text, expected) in cases {
            let result = classifier.classify_text(text);
            assert_eq!(result.field_type, expected, "signal: {text}");
            assert_eq!(result.confidence, confidence::GENERIC);
        }
    }

    #[test]
    fn short_tokens_need_word_boundaries() {
        let classifier = FieldClassifier::new();
        // "cv" inside "cvv", "tel" inside "hotel"
        assert_eq!(
            classifier.classify_text("card cvv").field_type,
            FieldType::CustomQuestion
        );
        assert_eq!(
            classifier.classify_text("preferred hotel").field_type,
            FieldType::CustomQuestion
        );
    }

    #[test]
    fn email_address_is_not_an_address() {
        let classifier = FieldClassifier::new();
        assert_eq!(
            classifier.classify_text("email address").field_type,
            FieldType::Email
        );
    }

    #[test]
    fn empty_signal_is_unknown() {
        let classifier = FieldClassifier::new();
        let result = classifier.classify_text("   ");
        assert_eq!(result.field_type, FieldType::Unknown);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn unmatched_signal_is_low_confidence_custom_question() {
        let classifier = FieldClassifier::with_confidence(0.5, 0.2);
        let result = classifier.classify_text("tell us about yourself");
        assert_eq!(result.field_type, FieldType::CustomQuestion);
        assert_eq!(result.confidence, 0.2);
    }

    #[test]
    fn signals_are_collected_from_page() {
        let mut page = FakePage::new("example.com");
        let body = page.body();
        page.append_text(body, "label", &[("for", "given")], "Given name");
        let input = page.append(
            body,
            "input",
            &[("id", "given"), ("name", "applicant_firstName"), ("placeholder", " ")],
        );

        let signals = FieldSignals::collect(&page, input);
        assert_eq!(signals.name.as_deref(), Some("applicant_firstName"));
        assert_eq!(signals.placeholder, None);
        assert_eq!(signals.label.as_deref(), Some("Given name"));
        assert_eq!(signals.combined(), "applicant first name given given name");
        assert_eq!(signals.display_label(), "Given name");
    }

    #[test]
    fn display_label_falls_back_to_name() {
        let signals = FieldSignals {
            name: Some("cover_letter-text".to_string()),
            ..FieldSignals::default()
        };
        assert_eq!(signals.display_label(), "cover letter text");
    }
}
