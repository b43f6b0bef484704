use super::{ElementId, EventKind, PageModel};
use std::cell::RefCell;

/// An event recorded by [`FakePage::dispatch_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchedEvent {
    pub element: ElementId,
    pub kind: EventKind,
}

#[derive(Debug, Clone)]
struct FakeNode {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    rendered: bool,
}

#[derive(Debug, Clone, Default)]
struct ControlState {
    value: String,
    checked: bool,
}

/// In-memory page model for tests
///
/// Build a tree with [`FakePage::append`], run detection or filling against
/// it, then inspect values and the recorded event log.
///
/// # Example
///
/// ```rust
/// use atsfill::page::{EventKind, FakePage, PageModel};
///
/// let mut page = FakePage::new("jobs.example.com");
/// let body = page.body();
/// let input = page.append(body, "input", &[("name", "email")]);
///
/// page.set_value(input, "ada@example.com");
/// page.dispatch_event(input, EventKind::Input);
///
/// assert_eq!(page.value(input), "ada@example.com");
/// assert_eq!(page.events_for(input), vec![EventKind::Input]);
/// ```
#[derive(Debug)]
pub struct FakePage {
    hostname: String,
    nodes: Vec<FakeNode>,
    state: RefCell<Vec<ControlState>>,
    events: RefCell<Vec<DispatchedEvent>>,
}

impl FakePage {
    /// Create a page with an empty `<body>` root.
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            nodes: vec![FakeNode {
                tag: "body".to_string(),
                attributes: Vec::new(),
                text: String::new(),
                parent: None,
                children: Vec::new(),
                rendered: true,
            }],
            state: RefCell::new(vec![ControlState::default()]),
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn body(&self) -> ElementId {
        ElementId(0)
    }

    /// Append an element under `parent` and return its handle.
    pub fn append(
        &mut self,
        parent: ElementId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> ElementId {
        self.append_text(parent, tag, attributes, "")
    }

    /// Append an element carrying its own text.
    pub fn append_text(
        &mut self,
        parent: ElementId,
        tag: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> ElementId {
        let id = ElementId(self.nodes.len());
        let tag = tag.to_ascii_lowercase();
        let attributes: Vec<(String, String)> = attributes
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
            .collect();
        let attr = |name: &str| {
            attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        };

        let mut initial = ControlState {
            value: match tag.as_str() {
                "input" => attr("value").unwrap_or_default(),
                "textarea" => text.to_string(),
                _ => String::new(),
            },
            checked: attr("checked").is_some(),
        };

        if tag == "option" {
            initial.value = attr("value").unwrap_or_else(|| text.trim().to_string());
            if let Some(select) = self.nearest_select(parent) {
                let first_option = !self
                    .descendants(select)
                    .iter()
                    .any(|d| self.nodes[d.0].tag == "option");
                let mut state = self.state.borrow_mut();
                if first_option || attr("selected").is_some() {
                    state[select.0].value = initial.value.clone();
                }
            }
        }

        self.nodes.push(FakeNode {
            tag,
            attributes,
            text: text.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            rendered: true,
        });
        self.nodes[parent.0].children.push(id);
        self.state.get_mut().push(initial);
        id
    }

    /// Toggle layout participation, e.g. to model `display: none`.
    pub fn set_rendered(&mut self, el: ElementId, rendered: bool) {
        self.nodes[el.0].rendered = rendered;
    }

    pub fn events(&self) -> Vec<DispatchedEvent> {
        self.events.borrow().clone()
    }

    pub fn events_for(&self, el: ElementId) -> Vec<EventKind> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.element == el)
            .map(|e| e.kind)
            .collect()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    fn nearest_select(&self, el: ElementId) -> Option<ElementId> {
        let mut current = Some(el);
        while let Some(candidate) = current {
            if self.nodes[candidate.0].tag == "select" {
                return Some(candidate);
            }
            current = self.nodes[candidate.0].parent;
        }
        None
    }

    fn node(&self, el: ElementId) -> Option<&FakeNode> {
        self.nodes.get(el.0)
    }
}

impl PageModel for FakePage {
    fn hostname(&self) -> String {
        self.hostname.clone()
    }

    fn elements(&self) -> Vec<ElementId> {
        let root = self.body();
        let mut out = vec![root];
        out.extend(self.descendants(root));
        out
    }

    fn tag_name(&self, el: ElementId) -> String {
        self.node(el).map(|n| n.tag.clone()).unwrap_or_default()
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        self.node(el)?
            .attributes
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.clone())
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.node(el)?.parent
    }

    fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.node(el).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn text_content(&self, el: ElementId) -> String {
        let Some(node) = self.node(el) else {
            return String::new();
        };
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&self.text_content(*child));
        }
        text
    }

    fn is_rendered(&self, el: ElementId) -> bool {
        if self.control_kind(el) == Some(super::ControlKind::Hidden) {
            return false;
        }
        let mut current = Some(el);
        while let Some(candidate) = current {
            match self.node(candidate) {
                Some(node) if node.rendered => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    fn value(&self, el: ElementId) -> String {
        self.state
            .borrow()
            .get(el.0)
            .map(|s| s.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&self, el: ElementId, value: &str) {
        if let Some(state) = self.state.borrow_mut().get_mut(el.0) {
            state.value = value.to_string();
        }
    }

    fn is_checked(&self, el: ElementId) -> bool {
        self.state.borrow().get(el.0).is_some_and(|s| s.checked)
    }

    fn set_checked(&self, el: ElementId, checked: bool) {
        if let Some(state) = self.state.borrow_mut().get_mut(el.0) {
            state.checked = checked;
        }
    }

    fn dispatch_event(&self, el: ElementId, kind: EventKind) {
        self.events
            .borrow_mut()
            .push(DispatchedEvent { element: el, kind });
    }
}
