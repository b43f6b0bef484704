use crate::adapters::Adapter;
use crate::adapters::declarative::DeclarativeAdapter;
use crate::adapters::utils::FieldRule;
use crate::field::{DetectedField, FieldType, confidence};
use crate::page::{PageModel, Selector};

/// SAP SuccessFactors career sites
///
/// Generated UI5 ids carry no meaning, so fields are classified by their
/// `label[for]` text alone.
pub struct SuccessFactorsAdapter;

impl SuccessFactorsAdapter {
    pub fn new() -> Self {
        Self
    }
}

const RULES: &[FieldRule] = &[
    FieldRule::label(FieldType::FirstName, &["first name"]),
    FieldRule::label(FieldType::LastName, &["last name"]),
    FieldRule::label(FieldType::Email, &["email"]),
    FieldRule::label(FieldType::Phone, &["phone"]),
];

impl DeclarativeAdapter for SuccessFactorsAdapter {
    fn get_name() -> &'static str {
        "successfactors"
    }

    fn get_hostnames() -> &'static [&'static str] {
        &["successfactors.com"]
    }

    fn get_page_markers() -> &'static [Selector] {
        &[Selector::HasAttr("data-sap-ui")]
    }

    fn get_candidates() -> Selector {
        Selector::Any(&[Selector::Tag("input"), Selector::Tag("textarea")])
    }

    fn get_key_attribute() -> &'static str {
        "id"
    }

    fn get_rules() -> &'static [FieldRule] {
        RULES
    }

    fn get_confidence() -> f32 {
        confidence::SUCCESSFACTORS
    }

    fn get_label_container() -> Option<Selector> {
        None
    }

    fn get_fallback_attributes() -> &'static [&'static str] {
        &["aria-label"]
    }

    fn get_requires_rendered() -> bool {
        true
    }
}

impl Adapter for SuccessFactorsAdapter {
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

impl Default for SuccessFactorsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::FakePage;

    #[test]
    fn labels_for_ids_and_rendered_controls_only() {
        let mut page = FakePage::new("career5.successfactors.com");
        let body = page.body();
        page.append_text(body, "label", &[("for", "__input3")], "Email address");
        let email = page.append(body, "input", &[("id", "__input3")]);
        // the id alone says nothing
        let phone = page.append(body, "input", &[("id", "email"), ("aria-label", "Phone")]);
        let step = page.append(body, "div", &[]);
        page.append(step, "input", &[("aria-label", "Last name")]);
        page.set_rendered(step, false);

        let fields = SuccessFactorsAdapter::new().detect_fields(&page);
        let found: Vec<_> = fields.iter().map(|f| (f.element, f.field_type)).collect();
        assert_eq!(found, vec![(email, FieldType::Email), (phone, FieldType::Phone)]);
        assert_eq!(fields[0].label, "Email address");
        assert!(fields.iter().all(|f| f.confidence == confidence::SUCCESSFACTORS));
    }

    #[test]
    fn sap_ui_marker() {
        let adapter = SuccessFactorsAdapter::new();
        let mut page = FakePage::new("jobs.acme.com");
        assert!(!adapter.is_matching_page(&page));
        let body = page.body();
        page.append(body, "div", &[("data-sap-ui", "__xmlview0")]);
        assert!(adapter.is_matching_page(&page));
    }
}
