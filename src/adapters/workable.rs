use crate::adapters::Adapter;
use crate::adapters::declarative::DeclarativeAdapter;
use crate::adapters::utils::FieldRule;
use crate::field::{DetectedField, FieldType, confidence};
use crate::page::{PageModel, Selector};

/// Workable application forms
pub struct WorkableAdapter;

impl WorkableAdapter {
    pub fn new() -> Self {
        Self
    }
}

const RULES: &[FieldRule] = &[
    FieldRule::split(FieldType::FirstName, &["firstname"], &["first name"]),
    FieldRule::split(FieldType::LastName, &["lastname"], &["last name"]),
    FieldRule::any(FieldType::Email, &["email"]),
    FieldRule::any(FieldType::Phone, &["phone"]),
];

impl DeclarativeAdapter for WorkableAdapter {
    fn get_name() -> &'static str {
        "workable"
    }

    fn get_hostnames() -> &'static [&'static str] {
        &["workable.com"]
    }

    fn get_page_markers() -> &'static [Selector] {
        &[Selector::AttrEq("data-ui", "form")]
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
        confidence::WORKABLE
    }

    fn get_label_container() -> Option<Selector> {
        Some(Selector::Class("form-field"))
    }

    // labels only come from the field wrapper
    fn get_fallback_attributes() -> &'static [&'static str] {
        &[]
    }
}

impl Adapter for WorkableAdapter {
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

impl Default for WorkableAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ElementId, FakePage};

    fn form_field(page: &mut FakePage, parent: ElementId, label: &str, name: &str) -> ElementId {
        let wrap = page.append(parent, "div", &[("class", "form-field")]);
        page.append_text(wrap, "label", &[], label);
        page.append(wrap, "input", &[("name", name)])
    }

    #[test]
    fn marker_form_on_custom_domain() {
        let mut page = FakePage::new("careers.acme.com");
        let body = page.body();
        let form = page.append(body, "form", &[("data-ui", "form")]);
        let first = form_field(&mut page, form, "First name", "firstname");
        let phone = form_field(&mut page, form, "Mobile", "phone");
        let other = form_field(&mut page, form, "Headline", "headline");
        page.append(form, "input", &[("name", "csrf"), ("type", "hidden")]);

        let adapter = WorkableAdapter::new();
        assert!(adapter.is_matching_page(&page));
        let fields = adapter.detect_fields(&page);
        let found: Vec<_> = fields.iter().map(|f| (f.element, f.field_type)).collect();
        assert_eq!(
            found,
            vec![
                (first, FieldType::FirstName),
                (phone, FieldType::Phone),
                (other, FieldType::CustomQuestion),
            ]
        );
        assert_eq!(fields[2].label, "Headline");
        assert!(fields.iter().all(|f| f.confidence == confidence::WORKABLE));
    }
}
