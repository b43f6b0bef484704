use crate::adapters::Adapter;
use crate::adapters::declarative::DeclarativeAdapter;
use crate::adapters::utils::FieldRule;
use crate::field::{DetectedField, FieldType, confidence};
use crate::page::{PageModel, Selector};

/// iCIMS hosted application forms
pub struct IcimsAdapter;

impl IcimsAdapter {
    pub fn new() -> Self {
        Self
    }
}

const RULES: &[FieldRule] = &[
    FieldRule::any(FieldType::FirstName, &["firstname", "first name"]),
    FieldRule::any(FieldType::LastName, &["lastname", "last name"]),
    FieldRule::any(FieldType::Email, &["email"]),
    FieldRule::any(FieldType::Phone, &["phone"]),
];

impl DeclarativeAdapter for IcimsAdapter {
    fn get_name() -> &'static str {
        "icims"
    }

    fn get_hostnames() -> &'static [&'static str] {
        &["icims.com"]
    }

    fn get_page_markers() -> &'static [Selector] {
        &[Selector::Class("icims-form")]
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
        confidence::ICIMS
    }

    fn get_label_container() -> Option<Selector> {
        Some(Selector::Any(&[
            Selector::Class("iCIMS_InfoField"),
            Selector::Class("form-field"),
        ]))
    }

    fn get_label_selector() -> Selector {
        Selector::Any(&[Selector::Tag("label"), Selector::Class("iCIMS_InfoField_Label")])
    }
}

impl Adapter for IcimsAdapter {
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

impl Default for IcimsAdapter {
    fn default() -> Self {
        Self::new()
    }
}
