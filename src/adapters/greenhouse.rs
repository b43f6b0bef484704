use crate::adapters::Adapter;
use crate::adapters::declarative::DeclarativeAdapter;
use crate::adapters::utils::FieldRule;
use crate::field::{DetectedField, FieldType, confidence};
use crate::page::{PageModel, Selector};

/// Greenhouse job boards; only controls inside the application form count
pub struct GreenhouseAdapter;

impl GreenhouseAdapter {
    pub fn new() -> Self {
        Self
    }
}

const RULES: &[FieldRule] = &[
    FieldRule::split(FieldType::FirstName, &["first_name"], &["first name"]),
    FieldRule::split(FieldType::LastName, &["last_name"], &["last name"]),
    FieldRule::split(FieldType::Email, &["email"], &["email"]),
    FieldRule::split(FieldType::Phone, &["phone"], &["phone"]),
    FieldRule::split(FieldType::City, &["location"], &["location", "city"]),
    FieldRule::split(FieldType::Resume, &["resume"], &["resume"]),
    FieldRule::split(FieldType::CoverLetter, &["cover_letter"], &["cover letter"]),
    FieldRule::split(FieldType::Linkedin, &["linkedin"], &["linkedin"]),
];

const APPLICATION_FORM: Selector =
    Selector::Any(&[Selector::Id("application_form"), Selector::Class("application-form")]);

impl DeclarativeAdapter for GreenhouseAdapter {
    fn get_name() -> &'static str {
        "greenhouse"
    }

    fn get_hostnames() -> &'static [&'static str] {
        &["greenhouse.io"]
    }

    fn get_page_markers() -> &'static [Selector] {
        &[
            Selector::Id("application_form"),
            Selector::Class("greenhouse-application"),
        ]
    }

    fn get_candidates() -> Selector {
        Selector::Any(&[
            Selector::All(&[Selector::Tag("input"), Selector::HasAttr("name")]),
            Selector::All(&[Selector::Tag("textarea"), Selector::HasAttr("name")]),
        ])
    }

    fn get_key_attribute() -> &'static str {
        "name"
    }

    fn get_rules() -> &'static [FieldRule] {
        RULES
    }

    fn get_confidence() -> f32 {
        confidence::GREENHOUSE
    }

    fn get_label_container() -> Option<Selector> {
        Some(Selector::Class("field"))
    }

    fn get_scope() -> Option<Selector> {
        Some(APPLICATION_FORM)
    }
}

impl Adapter for GreenhouseAdapter {
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

impl Default for GreenhouseAdapter {
    fn default() -> Self {
        Self::new()
    }
}
