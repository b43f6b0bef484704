use crate::adapters::Adapter;
use crate::adapters::declarative::DeclarativeAdapter;
use crate::adapters::utils::FieldRule;
use crate::field::{DetectedField, FieldType, confidence};
use crate::page::{PageModel, Selector};

/// SmartRecruiters application forms, keyed by `data-test`
pub struct SmartRecruitersAdapter;

impl SmartRecruitersAdapter {
    pub fn new() -> Self {
        Self
    }
}

// "first" and "name" may appear apart ("name-first", "First given name")
const RULES: &[FieldRule] = &[
    FieldRule::all(FieldType::FirstName, &["first", "name"]),
    FieldRule::all(FieldType::LastName, &["last", "name"]),
    FieldRule::any(FieldType::Email, &["email"]),
    FieldRule::any(FieldType::Phone, &["phone"]),
];

impl DeclarativeAdapter for SmartRecruitersAdapter {
    fn get_name() -> &'static str {
        "smartrecruiters"
    }

    fn get_hostnames() -> &'static [&'static str] {
        &["smartrecruiters.com"]
    }

    fn get_page_markers() -> &'static [Selector] {
        &[Selector::AttrContains("data-test", "application")]
    }

    fn get_candidates() -> Selector {
        Selector::Any(&[
            Selector::All(&[Selector::Tag("input"), Selector::HasAttr("data-test")]),
            Selector::All(&[Selector::Tag("textarea"), Selector::HasAttr("data-test")]),
        ])
    }

    fn get_key_attribute() -> &'static str {
        "data-test"
    }

    fn get_rules() -> &'static [FieldRule] {
        RULES
    }

    fn get_confidence() -> f32 {
        confidence::SMARTRECRUITERS
    }

    fn get_label_container() -> Option<Selector> {
        Some(Selector::Class("form-group"))
    }
}

impl Adapter for SmartRecruitersAdapter {
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

impl Default for SmartRecruitersAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ElementId, FakePage};

    fn group(page: &mut FakePage, label: &str, test_attr: &str) -> ElementId {
        let body = page.body();
        let wrap = page.append(body, "div", &[("class", "form-group")]);
        page.append_text(wrap, "label", &[], label);
        page.append(wrap, "input", &[("data-test", test_attr)])
    }

    #[test]
    fn matches_marker_on_custom_domain() {
        let adapter = SmartRecruitersAdapter::new();
        let mut page = FakePage::new("careers.acme.com");
        assert!(!adapter.is_matching_page(&page));
        let body = page.body();
        page.append(body, "section", &[("data-test", "application-form")]);
        assert!(adapter.is_matching_page(&page));
        assert!(adapter.is_matching_page(&FakePage::new("jobs.smartrecruiters.com")));
    }

    #[test]
    fn first_name_rule_precedes_last_name() {
        let mut page = FakePage::new("jobs.smartrecruiters.com");
        let first = group(&mut page, "First name", "input-first-name");
        let last = group(&mut page, "Last name", "input-last-name");
        // mentions both "first" and "last": the first rule in order wins
        let ambiguous = group(&mut page, "Name (first last)", "input-full");

        let fields = SmartRecruitersAdapter::new().detect_fields(&page);
        assert_eq!(fields[0].element, first);
        assert_eq!(fields[0].field_type, FieldType::FirstName);
        assert_eq!(fields[1].element, last);
        assert_eq!(fields[1].field_type, FieldType::LastName);
        assert_eq!(fields[2].element, ambiguous);
        assert_eq!(fields[2].field_type, FieldType::FirstName);
    }

    #[test]
    fn unmatched_fields_become_custom_questions() {
        let mut page = FakePage::new("jobs.smartrecruiters.com");
        let email = group(&mut page, "Email", "input-email");
        let question = group(&mut page, "How did you hear about us?", "question-12");

        let fields = SmartRecruitersAdapter::new().detect_fields(&page);
        assert_eq!(fields.len(), 2);
        assert_eq!((fields[0].element, fields[0].field_type), (email, FieldType::Email));
        assert_eq!(
            (fields[1].element, fields[1].field_type),
            (question, FieldType::CustomQuestion)
        );
        assert_eq!(fields[1].confidence, confidence::SMARTRECRUITERS);
    }

    #[test]
    fn controls_without_data_test_are_ignored() {
        let mut page = FakePage::new("jobs.smartrecruiters.com");
        let body = page.body();
        page.append(body, "input", &[("name", "email")]);

        assert!(SmartRecruitersAdapter::new().detect_fields(&page).is_empty());
    }
}
