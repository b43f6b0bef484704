use crate::adapters::Adapter;
use crate::adapters::declarative::DeclarativeAdapter;
use crate::adapters::utils::FieldRule;
use crate::field::{DetectedField, FieldType, confidence};
use crate::page::{PageModel, Selector};

/// Lever hosted postings
pub struct LeverAdapter;

impl LeverAdapter {
    pub fn new() -> Self {
        Self
    }
}

const RULES: &[FieldRule] = &[
    FieldRule::all(FieldType::FirstName, &["first", "name"]),
    FieldRule::all(FieldType::LastName, &["last", "name"]),
    FieldRule::any(FieldType::Email, &["email"]),
    FieldRule::any(FieldType::Phone, &["phone"]),
    FieldRule::any(FieldType::Resume, &["resume"]),
    FieldRule::any(FieldType::CoverLetter, &["cover"]),
    FieldRule::any(FieldType::Linkedin, &["linkedin"]),
];

impl DeclarativeAdapter for LeverAdapter {
    fn get_name() -> &'static str {
        "lever"
    }

    fn get_hostnames() -> &'static [&'static str] {
        &["lever.co"]
    }

    fn get_page_markers() -> &'static [Selector] {
        &[
            Selector::Class("lever-jobs"),
            Selector::AttrContains("class", "lever"),
        ]
    }

    fn get_candidates() -> Selector {
        Selector::Any(&[Selector::Tag("input"), Selector::Tag("textarea")])
    }

    fn get_key_attribute() -> &'static str {
        "name"
    }

    fn get_rules() -> &'static [FieldRule] {
        RULES
    }

    fn get_confidence() -> f32 {
        confidence::LEVER
    }

    fn get_label_container() -> Option<Selector> {
        Some(Selector::Class("application-question"))
    }

    fn get_label_selector() -> Selector {
        Selector::Any(&[Selector::Tag("label"), Selector::Class("label")])
    }

    fn get_fallback_attributes() -> &'static [&'static str] {
        &["placeholder", "aria-label", "name"]
    }
}

impl Adapter for LeverAdapter {
    fn name(&self) -> &'static str {
        Self::get_name()
    }

    fn is_matching_page(&self, page: &dyn PageModel) -> bool {
        self.matches_page(page)
    }

    fn detect_fields(&self, page: &dyn PageModel) -> Vec<DetectedField> {
        self.detect_with_rules(page)
    }
}

impl Default for LeverAdapter {
    fn default() -> Self {
        Self::new()
    }
}
