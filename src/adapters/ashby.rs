use crate::adapters::Adapter;
use crate::adapters::declarative::DeclarativeAdapter;
use crate::adapters::utils::FieldRule;
use crate::field::{DetectedField, FieldType, confidence};
use crate::page::{PageModel, Selector};

/// Ashby job boards, keyed by `data-testid`
pub struct AshbyAdapter;

impl AshbyAdapter {
    pub fn new() -> Self {
        Self
    }
}

const RULES: &[FieldRule] = &[
    FieldRule::split(FieldType::FirstName, &["firstname", "first-name"], &["first name"]),
    FieldRule::split(FieldType::LastName, &["lastname", "last-name"], &["last name"]),
    FieldRule::any(FieldType::Email, &["email"]),
    FieldRule::any(FieldType::Phone, &["phone"]),
    FieldRule::any(FieldType::Resume, &["resume"]),
    FieldRule::any(FieldType::CoverLetter, &["cover"]),
];

impl DeclarativeAdapter for AshbyAdapter {
    fn get_name() -> &'static str {
        "ashby"
    }

    fn get_hostnames() -> &'static [&'static str] {
        &["ashbyhq.com"]
    }

    fn get_page_markers() -> &'static [Selector] {
        &[
            Selector::AttrContains("data-testid", "application"),
            Selector::AttrContains("class", "ashby"),
        ]
    }

    fn get_candidates() -> Selector {
        Selector::Any(&[
            Selector::All(&[Selector::Tag("input"), Selector::HasAttr("data-testid")]),
            Selector::All(&[Selector::Tag("textarea"), Selector::HasAttr("data-testid")]),
        ])
    }

    fn get_key_attribute() -> &'static str {
        "data-testid"
    }

    fn get_rules() -> &'static [FieldRule] {
        RULES
    }

    fn get_confidence() -> f32 {
        confidence::ASHBY
    }

    fn get_label_container() -> Option<Selector> {
        Some(Selector::AttrContains("class", "field"))
    }

    fn get_fallback_attributes() -> &'static [&'static str] {
        &["aria-label"]
    }
}

impl Adapter for AshbyAdapter {
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

impl Default for AshbyAdapter {
    fn default() -> Self {
        Self::new()
    }
}
