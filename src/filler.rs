//! Writing values into form controls
//!
//! Frameworks such as React keep their own copy of an input's value and
//! only learn about changes through events, so every successful fill is
//! followed by exactly one `input` and one `change` event, in that order.

use crate::page::{ControlKind, ElementId, EventKind, PageModel, Selector};
use serde::Serialize;

const TRUTHY: &[&str] = &["yes", "true", "1", "on", "checked"];
const FALSY: &[&str] = &["no", "false", "0", "off", ""];

/// Fill one control with `value`.
///
/// Returns `false` without touching the page when the target cannot take
/// the value: file, hidden and button inputs, non-controls, disabled
/// controls (including those in a disabled fieldset), read-only text
/// entry, selects without a matching option and radios whose value or
/// label differ.
pub fn fill_field(page: &dyn PageModel, target: ElementId, value: &str) -> bool {
    let Some(kind) = page.control_kind(target) else {
        tracing::debug!(element = %target, "fill rejected: not a form control");
        return false;
    };
    if !kind.is_fillable() {
        tracing::debug!(element = %target, ?kind, "fill rejected: control kind");
        return false;
    }
    if page.is_disabled(target) || page.is_readonly(target) {
        tracing::debug!(element = %target, "fill rejected: control is not editable");
        return false;
    }

    let filled = match kind {
        ControlKind::Text | ControlKind::TextArea => {
            page.set_value(target, value);
            true
        }
        ControlKind::Select => fill_select(page, target, value),
        ControlKind::Checkbox => fill_checkbox(page, target, value),
        ControlKind::Radio => fill_radio(page, target, value),
        ControlKind::File | ControlKind::Hidden | ControlKind::Button => false,
    };

    if filled {
        page.dispatch_event(target, EventKind::Input);
        page.dispatch_event(target, EventKind::Change);
    } else {
        tracing::debug!(element = %target, ?kind, "fill rejected: no matching choice");
    }
    filled
}

fn option_value(page: &dyn PageModel, option: ElementId) -> String {
    page.attribute(option, "value")
        .unwrap_or_else(|| page.trimmed_text(option))
}

/// Exact option value first, then exact text, then text containing `value`.
fn fill_select(page: &dyn PageModel, select: ElementId, value: &str) -> bool {
    let options = page.query_all_within(select, &Selector::Tag("option"));
    let wanted = value.trim().to_lowercase();

    let chosen = options
        .iter()
        .find(|o| option_value(page, **o) == value)
        .or_else(|| {
            options
                .iter()
                .find(|o| page.trimmed_text(**o).to_lowercase() == wanted)
        })
        .or_else(|| {
            if wanted.is_empty() {
                return None;
            }
            options
                .iter()
                .find(|o| page.trimmed_text(**o).to_lowercase().contains(&wanted))
        });

    match chosen {
        Some(option) => {
            page.set_value(select, &option_value(page, *option));
            true
        }
        None => false,
    }
}

/// Case-insensitive comparison against the control's `value` or label.
fn matches_choice(page: &dyn PageModel, el: ElementId, wanted: &str) -> bool {
    if wanted.is_empty() {
        return false;
    }
    let value_matches = page
        .attribute(el, "value")
        .is_some_and(|v| v.trim().to_lowercase() == wanted);
    value_matches
        || page
            .associated_label(el)
            .is_some_and(|label| label.to_lowercase() == wanted)
}

fn fill_checkbox(page: &dyn PageModel, checkbox: ElementId, value: &str) -> bool {
    let wanted = value.trim().to_lowercase();
    let checked = if TRUTHY.contains(&wanted.as_str()) {
        true
    } else if FALSY.contains(&wanted.as_str()) {
        false
    } else if matches_choice(page, checkbox, &wanted) {
        true
    } else {
        return false;
    };
    page.set_checked(checkbox, checked);
    true
}

fn fill_radio(page: &dyn PageModel, radio: ElementId, value: &str) -> bool {
    let wanted = value.trim().to_lowercase();
    if !matches_choice(page, radio, &wanted) {
        return false;
    }

    // a checked radio unchecks the rest of its group
    if let Some(group) = page.attribute(radio, "name") {
        let owner = form_owner(page, radio);
        for other in page.query_all(&Selector::Tag("input")) {
            if other != radio
                && page.control_kind(other) == Some(ControlKind::Radio)
                && page.attribute(other, "name").as_deref() == Some(group.as_str())
                && form_owner(page, other) == owner
            {
                page.set_checked(other, false);
            }
        }
    }
    page.set_checked(radio, true);
    true
}

/// Nearest enclosing `<form>`; radio groups never span two forms.
fn form_owner(page: &dyn PageModel, el: ElementId) -> Option<ElementId> {
    page.closest(el, &Selector::Tag("form"))
}

/// One value destined for one control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillRequest {
    pub element: ElementId,
    pub value: String,
}

impl FillRequest {
    pub fn new(element: ElementId, value: impl Into<String>) -> Self {
        Self {
            element,
            value: value.into(),
        }
    }
}

/// Outcome of [`batch_fill`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillSummary {
    pub attempted: usize,
    pub filled: usize,
    /// Controls that refused their value, in request order
    pub rejected: Vec<ElementId>,
}

/// Fill controls in request order.
pub fn batch_fill(page: &dyn PageModel, requests: &[FillRequest]) -> FillSummary {
    let mut summary = FillSummary::default();
    for request in requests {
        summary.attempted += 1;
        if fill_field(page, request.element, &request.value) {
            summary.filled += 1;
        } else {
            summary.rejected.push(request.element);
        }
    }
    tracing::info!(
        attempted = summary.attempted,
        filled = summary.filled,
        "batch fill finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::FakePage;

    #[test]
    fn text_input_gets_value_and_two_events() {
        let mut page = FakePage::new("example.com");
        let body = page.body();
        let input = page.append(body, "input", &[("type", "email")]);

        assert!(fill_field(&page, input, "ada@example.com"));
        assert_eq!(page.value(input), "ada@example.com");
        assert_eq!(page.events_for(input), vec![EventKind::Input, EventKind::Change]);
    }

    #[test]
    fn textarea_value_is_replaced_exactly() {
        let mut page = FakePage::new("example.com");
        let body = page.body();
        let area = page.append_text(body, "textarea", &[], "old");

        assert!(fill_field(&page, area, "  line one\nline two "));
        assert_eq!(page.value(area), "  line one\nline two ");
    }

    #[test]
    fn unfillable_targets_are_untouched() {
        let mut page = FakePage::new("example.com");
        let body = page.body();
        let file = page.append(body, "input", &[("type", "file")]);
        let hidden = page.append(body, "input", &[("type", "hidden"), ("value", "t")]);
        let submit = page.append(body, "input", &[("type", "submit")]);
        let div = page.append(body, "div", &[]);
        let disabled = page.append(body, "input", &[("disabled", "")]);
        let readonly = page.append(body, "input", &[("readonly", "")]);

        for el in [file, hidden, submit, div, disabled, readonly] {
            assert!(!fill_field(&page, el, "x"), "{el} accepted a value");
        }
        assert_eq!(page.value(file), "");
        assert_eq!(page.value(hidden), "t");
        assert!(page.events().is_empty());
    }

    #[test]
    fn select_matches_value_then_text() {
        let mut page = FakePage::new("example.com");
        let body = page.body();
        let select = page.append(body, "select", &[]);
        page.append_text(select, "option", &[("value", "")], "Choose");
        page.append_text(select, "option", &[("value", "de")], "East Germany");
        page.append_text(select, "option", &[("value", "ger")], "Germany");

        assert!(fill_field(&page, select, "de"));
        assert_eq!(page.value(select), "de");
        assert!(fill_field(&page, select, "germany"));
        assert_eq!(page.value(select), "ger");
        assert!(fill_field(&page, select, "east"));
        assert_eq!(page.value(select), "de");
    }

    #[test]
    fn select_without_matching_option_is_rejected() {
        let mut page = FakePage::new("example.com");
        let body = page.body();
        let select = page.append(body, "select", &[]);
        page.append_text(select, "option", &[("value", "fr")], "France");

        assert!(!fill_field(&page, select, "Spain"));
        assert_eq!(page.value(select), "fr");
        assert!(page.events().is_empty());
    }

    #[test]
    fn checkbox_truthy_falsy_and_label() {
        let mut page = FakePage::new("example.com");
        let body = page.body();
        let label = page.append_text(body, "label", &[], "Remote");
        let remote = page.append(label, "input", &[("type", "checkbox")]);

        assert!(fill_field(&page, remote, "Yes"));
        assert!(page.is_checked(remote));
        assert!(fill_field(&page, remote, "off"));
        assert!(!page.is_checked(remote));
        assert!(fill_field(&page, remote, "remote"));
        assert!(page.is_checked(remote));
        assert!(!fill_field(&page, remote, "maybe"));
        assert!(page.is_checked(remote));
    }

    #[test]
    fn radio_checks_matching_option_only() {
        let mut page = FakePage::new("example.com");
        let body = page.body();
        let yes = page.append(
            body,
            "input",
            &[("type", "radio"), ("name", "auth"), ("value", "yes")],
        );
        let no = page.append(
            body,
            "input",
            &[("type", "radio"), ("name", "auth"), ("value", "no"), ("checked", "")],
        );

        assert!(!fill_field(&page, yes, "No"));
        assert!(!page.is_checked(yes));

        assert!(fill_field(&page, yes, "YES"));
        assert!(page.is_checked(yes));
        assert!(!page.is_checked(no));
        assert_eq!(page.events_for(no), Vec::<EventKind>::new());
    }

    #[test]
    fn readonly_only_blocks_text_entry() {
        let mut page = FakePage::new("example.com");
        let body = page.body();
        let select = page.append(body, "select", &[("readonly", "")]);
        page.append_text(select, "option", &[("value", "a")], "A");
        page.append_text(select, "option", &[("value", "b")], "B");
        let check = page.append(body, "input", &[("type", "checkbox"), ("readonly", "")]);
        let area = page.append(body, "textarea", &[("readonly", "")]);

        assert!(fill_field(&page, select, "b"));
        assert_eq!(page.value(select), "b");
        assert!(fill_field(&page, check, "yes"));
        assert!(page.is_checked(check));
        assert!(!fill_field(&page, area, "text"));
        assert_eq!(page.value(area), "");
    }

    #[test]
    fn batch_fill_counts_in_order() {
        let mut page = FakePage::new("example.com");
        let body = page.body();
        let first = page.append(body, "input", &[]);
        let file = page.append(body, "input", &[("type", "file")]);
        let last = page.append(body, "textarea", &[]);

        let summary = batch_fill(
            &page,
            &[
                FillRequest::new(first, "Ada"),
                FillRequest::new(file, "cv.pdf"),
                FillRequest::new(last, "Hello"),
            ],
        );
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.filled, 2);
        assert_eq!(summary.rejected, vec![file]);
        let order: Vec<_> = page.events().iter().map(|e| e.element).collect();
        assert_eq!(order, vec![first, first, last, last]);
    }
}
