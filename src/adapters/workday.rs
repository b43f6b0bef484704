use crate::adapters::Adapter;
use crate::adapters::declarative::DeclarativeAdapter;
use crate::adapters::utils::FieldRule;
use crate::field::{DetectedField, FieldType, confidence};
use crate::page::{PageModel, Selector};

/// Workday candidate flows, keyed by `data-automation-id`
pub struct WorkdayAdapter;

impl WorkdayAdapter {
    pub fn new() -> Self {
        Self
    }
}

const RULES: &[FieldRule] = &[
    FieldRule::split(FieldType::FirstName, &["firstname"], &["first name", "given name"]),
    FieldRule::split(FieldType::LastName, &["lastname"], &["last name", "family name"]),
    FieldRule::split(FieldType::Email, &["email"], &["email"]),
    FieldRule::split(FieldType::Phone, &["phone"], &["phone"]),
    FieldRule::split(FieldType::City, &["city"], &["city"]),
    FieldRule::split(FieldType::Country, &["country"], &["country"]),
    FieldRule::split(FieldType::Linkedin, &["linkedin"], &["linkedin"]),
    FieldRule::split(FieldType::Resume, &["resume"], &["resume"]),
    FieldRule::split(FieldType::CoverLetter, &["coverletter"], &["cover letter"]),
];

impl DeclarativeAdapter for WorkdayAdapter {
    fn get_name() -> &'static str {
        "workday"
    }

    fn get_hostnames() -> &'static [&'static str] {
        &["workday"]
    }

    fn get_page_markers() -> &'static [Selector] {
        &[Selector::HasAttr("data-automation-id"), Selector::Class("WD")]
    }

    fn get_candidates() -> Selector {
        Selector::Any(&[
            Selector::All(&[Selector::Tag("input"), Selector::HasAttr("data-automation-id")]),
            Selector::All(&[
                Selector::Tag("textarea"),
                Selector::HasAttr("data-automation-id"),
            ]),
        ])
    }

    fn get_key_attribute() -> &'static str {
        "data-automation-id"
    }

    fn get_rules() -> &'static [FieldRule] {
        RULES
    }

    fn get_confidence() -> f32 {
        confidence::WORKDAY
    }

    fn get_label_container() -> Option<Selector> {
        Some(Selector::AttrEq("data-automation-id", "formField"))
    }

    fn get_fallback_attributes() -> &'static [&'static str] {
        &["aria-label", "placeholder"]
    }
}

impl Adapter for WorkdayAdapter {
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

impl Default for WorkdayAdapter {
    fn default() -> Self {
        Self::new()
    }
}
