use super::fake::DispatchedEvent;
use super::{ControlKind, ElementId, EventKind, PageModel};
use crate::error::{AtsError, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;

/// Serialized DOM capture produced by the browser side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomSnapshot {
    /// Page URL; the hostname is derived from it unless given explicitly
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub root: SnapshotNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Live control value at capture time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Layout flag captured from `offsetParent`
    #[serde(default = "default_rendered", skip_serializing_if = "is_rendered_default")]
    pub rendered: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotNode>,
}

fn default_rendered() -> bool {
    true
}

fn is_rendered_default(rendered: &bool) -> bool {
    *rendered
}

#[derive(Debug)]
struct FlatNode {
    tag: String,
    attributes: BTreeMap<String, String>,
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

/// Page model backed by a [`DomSnapshot`]
///
/// Mutations made through [`PageModel`] are kept alongside the captured tree
/// and can be exported again with [`SnapshotPage::to_snapshot`].
#[derive(Debug)]
pub struct SnapshotPage {
    url: String,
    hostname: String,
    nodes: Vec<FlatNode>,
    state: RefCell<Vec<ControlState>>,
    events: RefCell<Vec<DispatchedEvent>>,
}

impl SnapshotPage {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AtsError::io(path, e))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: DomSnapshot = serde_json::from_str(json).map_err(AtsError::Snapshot)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: DomSnapshot) -> Result<Self> {
        let hostname = match snapshot.hostname {
            Some(host) => host,
            None if snapshot.url.is_empty() => String::new(),
            // hostless URLs (local `file:` captures) only match the generic adapter
            None => url::Url::parse(&snapshot.url)
                .map(|u| u.host_str().unwrap_or_default().to_string())
                .map_err(|_| AtsError::SnapshotUrl {
                    url: snapshot.url.clone(),
                })?,
        };

        let mut page = Self {
            url: snapshot.url,
            hostname,
            nodes: Vec::new(),
            state: RefCell::new(Vec::new()),
            events: RefCell::new(Vec::new()),
        };
        page.flatten(snapshot.root, None);
        page.seed_select_values();
        tracing::debug!(
            hostname = %page.hostname,
            elements = page.nodes.len(),
            "loaded page snapshot"
        );
        Ok(page)
    }

    fn flatten(&mut self, node: SnapshotNode, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.nodes.len());
        let tag = node.tag.to_ascii_lowercase();
        let attributes: BTreeMap<String, String> = node
            .attributes
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();

        let value = node.value.unwrap_or_else(|| match tag.as_str() {
            "textarea" => node.text.clone(),
            "option" => attributes
                .get("value")
                .cloned()
                .unwrap_or_else(|| node.text.trim().to_string()),
            _ => attributes.get("value").cloned().unwrap_or_default(),
        });
        let checked = node
            .checked
            .unwrap_or_else(|| attributes.contains_key("checked"));

        self.nodes.push(FlatNode {
            tag,
            attributes,
            text: node.text,
            parent,
            children: Vec::new(),
            rendered: node.rendered,
        });
        self.state.get_mut().push(ControlState { value, checked });

        for child in node.children {
            let child_id = self.flatten(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    /// Selects without a captured value take their selected or first option.
    fn seed_select_values(&mut self) {
        let selects: Vec<ElementId> = (0..self.nodes.len())
            .map(ElementId)
            .filter(|el| self.nodes[el.0].tag == "select")
            .collect();
        for select in selects {
            if !self.state.get_mut()[select.0].value.is_empty() {
                continue;
            }
            let options: Vec<ElementId> = self
                .descendants(select)
                .into_iter()
                .filter(|el| self.nodes[el.0].tag == "option")
                .collect();
            let chosen = options
                .iter()
                .find(|el| self.nodes[el.0].attributes.contains_key("selected"))
                .or(options.first())
                .copied();
            if let Some(option) = chosen {
                let value = self.state.get_mut()[option.0].value.clone();
                self.state.get_mut()[select.0].value = value;
            }
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn events(&self) -> Vec<DispatchedEvent> {
        self.events.borrow().clone()
    }

    /// Export the tree with current control values.
    pub fn to_snapshot(&self) -> DomSnapshot {
        DomSnapshot {
            url: self.url.clone(),
            hostname: Some(self.hostname.clone()),
            root: self.export(ElementId(0)),
        }
    }

    fn export(&self, el: ElementId) -> SnapshotNode {
        let node = &self.nodes[el.0];
        let state = self.state.borrow()[el.0].clone();
        let is_control = self.control_kind(el).is_some();
        let is_toggle = matches!(
            self.control_kind(el),
            Some(ControlKind::Checkbox | ControlKind::Radio)
        );

        SnapshotNode {
            tag: node.tag.clone(),
            attributes: node.attributes.clone(),
            text: node.text.clone(),
            value: is_control.then_some(state.value),
            checked: is_toggle.then_some(state.checked),
            rendered: node.rendered,
            children: node.children.iter().map(|c| self.export(*c)).collect(),
        }
    }

    fn node(&self, el: ElementId) -> Option<&FlatNode> {
        self.nodes.get(el.0)
    }

    /// Inline styles and attributes that take an element out of layout.
    fn hidden_by_markup(node: &FlatNode) -> bool {
        if node.attributes.contains_key("hidden") {
            return true;
        }
        node.attributes.get("style").is_some_and(|style| {
            let style: String = style
                .to_ascii_lowercase()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            style.contains("display:none") || style.contains("visibility:hidden")
        })
    }
}

impl PageModel for SnapshotPage {
    fn hostname(&self) -> String {
        self.hostname.clone()
    }

    fn elements(&self) -> Vec<ElementId> {
        if self.nodes.is_empty() {
            return Vec::new();
        }
        let root = ElementId(0);
        let mut out = vec![root];
        out.extend(self.descendants(root));
        out
    }

    fn tag_name(&self, el: ElementId) -> String {
        self.node(el).map(|n| n.tag.clone()).unwrap_or_default()
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.node(el)?
            .attributes
            .get(&name.to_ascii_lowercase())
            .cloned()
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
        if self.control_kind(el) == Some(ControlKind::Hidden) {
            return false;
        }
        let mut current = Some(el);
        while let Some(candidate) = current {
            match self.node(candidate) {
                Some(node) if node.rendered && !Self::hidden_by_markup(node) => {
                    current = node.parent
                }
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
        tracing::trace!(element = %el, event = kind.as_str(), "dispatch");
        self.events
            .borrow_mut()
            .push(DispatchedEvent { element: el, kind });
    }
}
