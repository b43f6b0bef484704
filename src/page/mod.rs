//! Abstract page model
//!
//! The host page owns the DOM. Everything in this crate talks to it through
//! [`PageModel`], a narrow capability interface: element handles, attribute
//! access, tree walks, value mutation and synthetic event dispatch. Tests use
//! [`FakePage`]; the command-line binding uses [`SnapshotPage`], a DOM capture
//! serialized by the browser side.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod fake;
pub mod selector;
pub mod snapshot;

pub use fake::{DispatchedEvent, FakePage};
pub use selector::Selector;
pub use snapshot::{DomSnapshot, SnapshotNode, SnapshotPage};

/// Non-owning handle to an element of a page model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Change notifications a framework listens for, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Input,
    Change,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Input => "input",
            EventKind::Change => "change",
        }
    }
}

/// Kind of form control, derived from tag name and `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    TextArea,
    Select,
    Checkbox,
    Radio,
    File,
    Hidden,
    Button,
}

impl ControlKind {
    pub fn from_parts(tag: &str, input_type: Option<&str>) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "textarea" => Some(ControlKind::TextArea),
            "select" => Some(ControlKind::Select),
            "input" => {
                let input_type = input_type.map(|t| t.trim().to_ascii_lowercase());
                Some(match input_type.as_deref() {
                    Some("hidden") => ControlKind::Hidden,
                    Some("file") => ControlKind::File,
                    Some("checkbox") => ControlKind::Checkbox,
                    Some("radio") => ControlKind::Radio,
                    Some("submit" | "button" | "reset" | "image") => ControlKind::Button,
                    _ => ControlKind::Text,
                })
            }
            _ => None,
        }
    }

    /// Whether a value can be written programmatically. File inputs are
    /// excluded: browsers refuse scripted file assignment.
    pub fn is_fillable(self) -> bool {
        matches!(
            self,
            ControlKind::Text
                | ControlKind::TextArea
                | ControlKind::Select
                | ControlKind::Checkbox
                | ControlKind::Radio
        )
    }
}

/// Tags that count as form controls when scanning mutations and pages.
pub const FORM_CONTROL_TAGS: [&str; 3] = ["input", "textarea", "select"];

/// Capability interface over a host-owned, DOM-like element tree.
///
/// Mutating methods take `&self`: the tree belongs to the host and is
/// mutated through it, the same way a script mutates a live document.
pub trait PageModel {
    fn hostname(&self) -> String;

    /// All elements in document order.
    fn elements(&self) -> Vec<ElementId>;

    /// Lowercase tag name.
    fn tag_name(&self, el: ElementId) -> String;

    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;

    fn parent(&self, el: ElementId) -> Option<ElementId>;

    fn children(&self, el: ElementId) -> Vec<ElementId>;

    /// Concatenated text of the element and its descendants.
    fn text_content(&self, el: ElementId) -> String;

    /// Whether the element takes part in layout (has an offset parent).
    fn is_rendered(&self, el: ElementId) -> bool;

    fn value(&self, el: ElementId) -> String;

    fn set_value(&self, el: ElementId, value: &str);

    fn is_checked(&self, el: ElementId) -> bool;

    fn set_checked(&self, el: ElementId, checked: bool);

    fn dispatch_event(&self, el: ElementId, event: EventKind);

    fn has_attribute(&self, el: ElementId, name: &str) -> bool {
        self.attribute(el, name).is_some()
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.attribute(el, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn matches(&self, el: ElementId, selector: &Selector) -> bool {
        selector.matches(self, el)
    }

    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.elements()
            .into_iter()
            .filter(|el| self.matches(*el, selector))
            .collect()
    }

    fn query_first(&self, selector: &Selector) -> Option<ElementId> {
        self.elements()
            .into_iter()
            .find(|el| self.matches(*el, selector))
    }

    /// Descendants of `root` in document order, excluding `root`.
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).into_iter().rev().collect();
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(self.children(el).into_iter().rev());
        }
        out
    }

    fn query_all_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|el| self.matches(*el, selector))
            .collect()
    }

    fn find_descendant(&self, root: ElementId, selector: &Selector) -> Option<ElementId> {
        self.descendants(root)
            .into_iter()
            .find(|el| self.matches(*el, selector))
    }

    /// Nearest inclusive ancestor matching `selector`.
    fn closest(&self, el: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut current = Some(el);
        while let Some(candidate) = current {
            if self.matches(candidate, selector) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Whether `el` is `ancestor` or sits below it.
    fn is_within(&self, el: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(el);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent(candidate);
        }
        false
    }

    /// Text content with runs of whitespace collapsed and ends trimmed.
    fn trimmed_text(&self, el: ElementId) -> String {
        self.text_content(el)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn label_for_id(&self, id: &str) -> Option<ElementId> {
        if id.is_empty() {
            return None;
        }
        self.elements().into_iter().find(|el| {
            self.tag_name(*el) == "label" && self.attribute(*el, "for").as_deref() == Some(id)
        })
    }

    /// Text of the `<label>` associated with a control: `label[for=id]`
    /// first, then a wrapping `<label>`. The control's own text (options,
    /// textarea content) is not part of its label.
    fn associated_label(&self, el: ElementId) -> Option<String> {
        let by_for = self
            .attribute(el, "id")
            .and_then(|id| self.label_for_id(&id));
        let label = by_for.or_else(|| self.closest(el, &Selector::Tag("label")))?;
        let mut raw = self.text_content(label);
        if self.is_within(el, label) {
            let own = self.text_content(el);
            if !own.is_empty() {
                raw = raw.replacen(&own, "", 1);
            }
        }
        let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        (!text.is_empty()).then_some(text)
    }

    fn control_kind(&self, el: ElementId) -> Option<ControlKind> {
        ControlKind::from_parts(&self.tag_name(el), self.attribute(el, "type").as_deref())
    }

    /// Disabled itself or inside a `<fieldset disabled>`.
    fn is_disabled(&self, el: ElementId) -> bool {
        if self.has_attribute(el, "disabled") {
            return true;
        }
        let mut current = self.parent(el);
        while let Some(ancestor) = current {
            if self.tag_name(ancestor) == "fieldset" && self.has_attribute(ancestor, "disabled") {
                return true;
            }
            current = self.parent(ancestor);
        }
        false
    }

    /// `readonly` only applies to text entry; selects and toggles ignore it.
    fn is_readonly(&self, el: ElementId) -> bool {
        matches!(
            self.control_kind(el),
            Some(ControlKind::Text | ControlKind::TextArea)
        ) && self.has_attribute(el, "readonly")
    }

    /// Rendered and neither disabled nor read-only.
    fn is_interactive(&self, el: ElementId) -> bool {
        self.is_rendered(el) && !self.is_disabled(el) && !self.is_readonly(el)
    }

    /// Whether the element is a form control or contains one.
    fn contains_form_control(&self, el: ElementId) -> bool {
        let is_control = |e: ElementId| FORM_CONTROL_TAGS.contains(&self.tag_name(e).as_str());
        is_control(el) || self.descendants(el).into_iter().any(is_control)
    }
}
