use crate::adapters::utils::{
    FieldRule, attribute_label, classify_with_rules, container_label, for_label, hostname_matches,
};
use crate::field::DetectedField;
use crate::page::{ControlKind, ElementId, PageModel, Selector};

/// Base trait for vendor adapters described by tables
///
/// A vendor is fully described by its hostnames, DOM markers, candidate
/// selector, label container and ordered classification rules. The provided
/// methods run the shared detection pattern on top of that description.
pub trait DeclarativeAdapter {
    /// Adapter identifier (e.g. "icims", "workday")
    fn get_name() -> &'static str;

    /// Hostname fragments that identify the vendor
    fn get_hostnames() -> &'static [&'static str];

    /// Elements whose presence identifies the vendor on custom domains
    fn get_page_markers() -> &'static [Selector];

    /// Controls considered for classification
    fn get_candidates() -> Selector;

    /// Attribute carrying the vendor's field key (`name`, `data-test`, ...)
    fn get_key_attribute() -> &'static str;

    /// Ordered classification table; first match wins
    fn get_rules() -> &'static [FieldRule];

    fn get_confidence() -> f32;

    /// Ancestor that groups a control with its label; `None` reads
    /// `label[for=id]` instead
    fn get_label_container() -> Option<Selector>;

    /// Label element inside the container
    fn get_label_selector() -> Selector {
        Selector::Tag("label")
    }

    /// Attributes consulted when no container label exists
    fn get_fallback_attributes() -> &'static [&'static str] {
        &["placeholder", "aria-label"]
    }

    /// Restrict candidates to the first element matching this selector
    fn get_scope() -> Option<Selector> {
        None
    }

    /// Skip controls outside the layout (collapsed steps, `display: none`)
    fn get_requires_rendered() -> bool {
        false
    }

    fn matches_page(&self, page: &dyn PageModel) -> bool {
        hostname_matches(page, Self::get_hostnames())
            || Self::get_page_markers()
                .iter()
                .any(|marker| page.query_first(marker).is_some())
    }

    fn extract_label(&self, page: &dyn PageModel, el: ElementId) -> String {
        let from_markup = match Self::get_label_container() {
            Some(container) => {
                container_label(page, el, &container, &Self::get_label_selector())
            }
            None => for_label(page, el),
        };
        from_markup
            .or_else(|| attribute_label(page, el, Self::get_fallback_attributes()))
            .unwrap_or_default()
    }

    /// Run the standard table-driven detection
    fn detect_with_rules(&self, page: &dyn PageModel) -> Vec<DetectedField> {
        let candidates = Self::get_candidates();
        let controls = match Self::get_scope() {
            Some(scope) => match page.query_first(&scope) {
                Some(root) => page.query_all_within(root, &candidates),
                None => {
                    tracing::debug!(adapter = Self::get_name(), "form container not found");
                    return Vec::new();
                }
            },
            None => page.query_all(&candidates),
        };

        let mut fields = Vec::new();
        for el in controls {
            if !page.control_kind(el).is_some_and(ControlKind::is_fillable) {
                continue;
            }
            if page.is_disabled(el) || page.is_readonly(el) {
                continue;
            }
            if Self::get_requires_rendered() && !page.is_rendered(el) {
                continue;
            }

            let key = page
                .attribute(el, Self::get_key_attribute())
                .unwrap_or_default();
            let label = self.extract_label(page, el);
            let field_type = classify_with_rules(Self::get_rules(), &key, &label);
            if field_type.is_unknown() {
                continue;
            }

            fields.push(DetectedField::new(
                el,
                field_type,
                label,
                Self::get_confidence(),
            ));
        }

        tracing::debug!(
            adapter = Self::get_name(),
            fields = fields.len(),
            "vendor detection finished"
        );
        fields
    }
}
