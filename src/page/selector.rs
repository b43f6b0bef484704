use super::{ElementId, PageModel};

/// Structural element matcher.
///
/// Covers the subset of CSS the adapters rely on. Variants hold only
/// static data so vendor selectors can live in constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// `tag`
    Tag(&'static str),
    /// `.class`
    Class(&'static str),
    /// `#id`
    Id(&'static str),
    /// `[attr]`
    HasAttr(&'static str),
    /// `[attr="value"]`
    AttrEq(&'static str, &'static str),
    /// `[attr*="value"]`
    AttrContains(&'static str, &'static str),
    /// `a, b`
    Any(&'static [Selector]),
    /// `ab` (compound)
    All(&'static [Selector]),
}

impl Selector {
    pub fn matches<P: PageModel + ?Sized>(&self, page: &P, el: ElementId) -> bool {
        match self {
            Selector::Tag(tag) => page.tag_name(el).eq_ignore_ascii_case(tag),
            Selector::Class(class) => page.has_class(el, class),
            Selector::Id(id) => page.attribute(el, "id").as_deref() == Some(*id),
            Selector::HasAttr(name) => page.has_attribute(el, name),
            Selector::AttrEq(name, value) => page.attribute(el, name).as_deref() == Some(*value),
            Selector::AttrContains(name, needle) => page
                .attribute(el, name)
                .is_some_and(|value| value.contains(*needle)),
            Selector::Any(options) => options.iter().any(|s| s.matches(page, el)),
            Selector::All(parts) => parts.iter().all(|s| s.matches(page, el)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::FakePage;

    const NAMED_INPUT: Selector =
        Selector::All(&[Selector::Tag("input"), Selector::HasAttr("name")]);
    const TEXT_CONTROLS: Selector =
        Selector::Any(&[Selector::Tag("input"), Selector::Tag("textarea")]);

    #[test]
    fn compound_and_list_selectors() {
        let mut page = FakePage::new("example.com");
        let body = page.body();
        let named = page.append(body, "input", &[("name", "email")]);
        let bare = page.append(body, "input", &[]);
        let area = page.append(body, "textarea", &[("data-test", "application-cover")]);

        assert!(NAMED_INPUT.matches(&page, named));
        assert!(!NAMED_INPUT.matches(&page, bare));
        assert_eq!(page.query_all(&TEXT_CONTROLS), vec![named, bare, area]);
        assert!(Selector::AttrContains("data-test", "application").matches(&page, area));
        assert!(!Selector::AttrEq("data-test", "application").matches(&page, area));
    }

    #[test]
    fn id_and_class_selectors() {
        let mut page = FakePage::new("example.com");
        let body = page.body();
        let form = page.append(body, "form", &[("id", "application_form"), ("class", "WD")]);

        assert!(Selector::Id("application_form").matches(&page, form));
        assert!(Selector::Class("WD").matches(&page, form));
        assert!(!Selector::Class("wd").matches(&page, form));
        assert!(Selector::Tag("FORM").matches(&page, form));
    }
}
