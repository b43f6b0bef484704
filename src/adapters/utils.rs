use crate::field::FieldType;
use crate::page::{ElementId, PageModel, Selector};

/// Substring condition over lowercased signal text
#[derive(Debug, Clone, Copy)]
pub enum Needle {
    /// Any of the substrings occurs
    Any(&'static [&'static str]),
    /// Every substring occurs, in any position
    All(&'static [&'static str]),
}

impl Needle {
    pub fn matches(&self, haystack: &str) -> bool {
        match self {
            Needle::Any(needles) => needles.iter().any(|n| haystack.contains(n)),
            Needle::All(needles) => needles.iter().all(|n| haystack.contains(n)),
        }
    }
}

/// One entry of a vendor's ordered classification table
///
/// The vendor key (`name`, `data-test`, ...) and the visible label are
/// tested separately, so a word in the label never satisfies a key-only
/// needle.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field_type: FieldType,
    pub key: Needle,
    pub label: Needle,
}

const NOTHING: Needle = Needle::Any(&[]);

impl FieldRule {
    /// Any of `needles` in the key or in the label
    pub const fn any(field_type: FieldType, needles: &'static [&'static str]) -> Self {
        Self {
            field_type,
            key: Needle::Any(needles),
            label: Needle::Any(needles),
        }
    }

    /// All of `needles` in the key, or all of them in the label
    pub const fn all(field_type: FieldType, needles: &'static [&'static str]) -> Self {
        Self {
            field_type,
            key: Needle::All(needles),
            label: Needle::All(needles),
        }
    }

    /// Separate needles for the key and for the label
    pub const fn split(
        field_type: FieldType,
        key: &'static [&'static str],
        label: &'static [&'static str],
    ) -> Self {
        Self {
            field_type,
            key: Needle::Any(key),
            label: Needle::Any(label),
        }
    }

    /// Label-only rule, for vendors without a stable field key
    pub const fn label(field_type: FieldType, needles: &'static [&'static str]) -> Self {
        Self {
            field_type,
            key: NOTHING,
            label: Needle::Any(needles),
        }
    }

    pub fn matches(&self, key: &str, label: &str) -> bool {
        self.key.matches(key) || self.label.matches(label)
    }
}

/// Classify a control by its vendor key and label against an ordered
/// rule table.
///
/// First match wins; nothing matching yields `custom_question` so the field
/// can still be offered for an assisted answer.
pub fn classify_with_rules(rules: &[FieldRule], key: &str, label: &str) -> FieldType {
    let key = key.to_lowercase();
    let label = label.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&key, &label))
        .map(|rule| rule.field_type)
        .unwrap_or(FieldType::CustomQuestion)
}

/// Label text from the nearest vendor container.
///
/// Walks up to the closest ancestor matching `container` and returns the
/// trimmed text of its first descendant matching `label`.
pub fn container_label(
    page: &dyn PageModel,
    el: ElementId,
    container: &Selector,
    label: &Selector,
) -> Option<String> {
    let parent = page.closest(el, container)?;
    let label = page.find_descendant(parent, label)?;
    let text = page.trimmed_text(label);
    (!text.is_empty()).then_some(text)
}

/// Text of the `label[for=id]` pointing at the control.
pub fn for_label(page: &dyn PageModel, el: ElementId) -> Option<String> {
    let id = page.attribute(el, "id")?;
    let label = page.label_for_id(&id)?;
    let text = page.trimmed_text(label);
    (!text.is_empty()).then_some(text)
}

/// First non-empty attribute among `names`, trimmed.
pub fn attribute_label(page: &dyn PageModel, el: ElementId, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        page.attribute(el, name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Whether the hostname contains any of the vendor's domain fragments.
pub fn hostname_matches(page: &dyn PageModel, fragments: &[&str]) -> bool {
    let host = page.hostname().to_ascii_lowercase();
    fragments.iter().any(|f| host.contains(f))
}
