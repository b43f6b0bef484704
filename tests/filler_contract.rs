use atsfill::filler::{FillRequest, batch_fill, fill_field};
use atsfill::page::{EventKind, FakePage, PageModel, SnapshotPage};

#[test]
fn every_successful_fill_fires_input_then_change_once() {
    let mut page = FakePage::new("example.com");
    let body = page.body();
    let text = page.append(body, "input", &[("type", "text")]);
    let area = page.append(body, "textarea", &[]);
    let select = page.append(body, "select", &[]);
    page.append_text(select, "option", &[("value", "yes")], "Yes");
    page.append_text(select, "option", &[("value", "no")], "No");
    let check = page.append(body, "input", &[("type", "checkbox")]);
    let radio = page.append(body, "input", &[("type", "radio"), ("value", "remote")]);

    let cases = [
        (text, "Ada"),
        (area, "Hi"),
        (select, "No"),
        (check, "true"),
        (radio, "Remote"),
    ];
    for (el, value) in cases {
        page.clear_events();
        assert!(fill_field(&page, el, value), "{el} refused {value}");
        assert_eq!(page.events_for(el), vec![EventKind::Input, EventKind::Change]);
        assert_eq!(page.events().len(), 2);
    }

    assert_eq!(page.value(select), "no");
    assert!(page.is_checked(check));
    assert!(page.is_checked(radio));
}

#[test]
fn radio_group_stops_at_its_form() {
    let mut page = FakePage::new("example.com");
    let body = page.body();
    let apply = page.append(body, "form", &[]);
    let yes = page.append(
        apply,
        "input",
        &[("type", "radio"), ("name", "remote"), ("value", "yes")],
    );
    let no = page.append(
        apply,
        "input",
        &[("type", "radio"), ("name", "remote"), ("value", "no"), ("checked", "")],
    );
    let survey = page.append(body, "form", &[]);
    let other = page.append(
        survey,
        "input",
        &[("type", "radio"), ("name", "remote"), ("value", "no"), ("checked", "")],
    );

    assert!(fill_field(&page, yes, "yes"));
    assert!(page.is_checked(yes));
    assert!(!page.is_checked(no));
    assert!(page.is_checked(other));
    assert!(page.events_for(other).is_empty());
}

#[test]
fn controls_in_a_disabled_fieldset_are_rejected() {
    let mut page = FakePage::new("example.com");
    let body = page.body();
    let fieldset = page.append(body, "fieldset", &[("disabled", "")]);
    let input = page.append(fieldset, "input", &[("name", "email")]);
    let select = page.append(fieldset, "select", &[]);
    page.append_text(select, "option", &[("value", "de")], "Germany");

    assert!(!fill_field(&page, input, "ada@example.com"));
    assert!(!fill_field(&page, select, "de"));
    assert_eq!(page.value(input), "");
    assert!(page.events().is_empty());
}

#[test]
fn file_inputs_are_never_mutated() {
    let mut page = FakePage::new("example.com");
    let body = page.body();
    let file = page.append(body, "input", &[("type", "file"), ("name", "resume")]);

    assert!(!fill_field(&page, file, "/home/ada/cv.pdf"));
    assert_eq!(page.value(file), "");
    assert!(page.events().is_empty());
}

#[test]
fn value_is_written_verbatim() {
    let mut page = FakePage::new("example.com");
    let body = page.body();
    let input = page.append(body, "input", &[]);

    let value = "  Ada \u{2014} Lovelace  ";
    assert!(fill_field(&page, input, value));
    assert_eq!(page.value(input), value);
}

#[test]
fn batch_fill_on_snapshot_page_exports_new_values() {
    let page = SnapshotPage::from_json(
        r#"{
            "url": "https://careers.example.com/apply",
            "root": { "tag": "body", "children": [
                { "tag": "input", "attributes": { "name": "email" } },
                { "tag": "input", "attributes": { "type": "checkbox", "name": "terms" } },
                { "tag": "input", "attributes": { "type": "file", "name": "cv" } }
            ]}
        }"#,
    )
    .unwrap();
    let ids = page.elements();

    let summary = batch_fill(
        &page,
        &[
            FillRequest::new(ids[1], "ada@example.com"),
            FillRequest::new(ids[2], "yes"),
            FillRequest::new(ids[3], "cv.pdf"),
        ],
    );
    assert_eq!(summary.filled, 2);
    assert_eq!(summary.rejected, vec![ids[3]]);

    let exported = page.to_snapshot();
    let children = &exported.root.children;
    assert_eq!(children[0].value.as_deref(), Some("ada@example.com"));
    assert_eq!(children[1].checked, Some(true));
    assert_eq!(page.events().len(), 4);
}
