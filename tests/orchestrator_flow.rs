use atsfill::adapters::AdapterRegistry;
use atsfill::debounce::{DebouncedDetector, ManualClock};
use atsfill::orchestrator::{FieldSink, MutationRecord, Orchestrator};
use atsfill::page::{FakePage, PageModel};
use atsfill::profile::{FieldValues, ProfileFiller};
use atsfill::{DetectionReport, FieldType};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[derive(Default)]
struct Recorder {
    adapters: Vec<String>,
    counts: Vec<usize>,
}

impl FieldSink for Recorder {
    fn on_fields(&mut self, _page: &dyn PageModel, report: DetectionReport) {
        self.adapters.push(report.adapter.clone());
        self.counts.push(report.len());
    }
}

#[test]
fn debounced_detection_fills_page_once_per_burst() {
    let mut page = FakePage::new("careers.example.com");
    let body = page.body();
    let form = page.append(body, "form", &[]);
    let email = page.append(form, "input", &[("name", "email")]);
    let phone = page.append(form, "input", &[("name", "phone")]);
    let page = Rc::new(page);

    let mut values = FieldValues::new();
    values.insert(FieldType::Email, "ada@example.com");
    values.insert(FieldType::Phone, "+44 20 7946 0018");
    let sink = Rc::new(RefCell::new(ProfileFiller::new(values)));

    let clock = ManualClock::new();
    let detector = DebouncedDetector::new(ms(300), ms(1000)).with_clock(clock.clone());
    let mut orchestrator = Orchestrator::new(
        page.clone(),
        Rc::new(AdapterRegistry::default()),
        sink.clone(),
        detector,
    );

    for _ in 0..5 {
        assert!(orchestrator.on_mutations(&[MutationRecord::added([form])]));
        clock.advance(ms(50));
    }
    assert_eq!(orchestrator.next_deadline(), Some(ms(200 + 300)));
    clock.advance(ms(250));
    assert!(orchestrator.poll());
    assert!(!orchestrator.poll());

    assert_eq!(sink.borrow().passes(), 1);
    assert_eq!(sink.borrow().last_summary().map(|s| s.filled), Some(2));
    assert_eq!(page.value(email), "ada@example.com");
    assert_eq!(page.value(phone), "+44 20 7946 0018");
}

#[test]
fn independent_orchestrators_keep_their_own_timers() {
    let clock = ManualClock::new();
    let recorder = Rc::new(RefCell::new(Recorder::default()));

    let build = |host: &str, delay: u64| {
        let mut page = FakePage::new(host);
        let body = page.body();
        let input = page.append(body, "input", &[("name", "email")]);
        let orchestrator = Orchestrator::new(
            Rc::new(page),
            Rc::new(AdapterRegistry::default()),
            recorder.clone(),
            DebouncedDetector::new(ms(delay), ms(0)).with_clock(clock.clone()),
        );
        (orchestrator, input)
    };
    let (mut fast, fast_input) = build("careers.example.com", 100);
    let (mut slow, slow_input) = build("jobs.lever.co", 200);

    fast.on_mutations(&[MutationRecord::added([fast_input])]);
    slow.on_mutations(&[MutationRecord::added([slow_input])]);
    clock.advance(ms(100));
    assert!(fast.poll());
    assert!(!slow.poll());
    clock.advance(ms(100));
    assert!(slow.poll());

    let recorder = recorder.borrow();
    assert_eq!(recorder.adapters, vec!["generic", "lever"]);
    assert_eq!(recorder.counts, vec![1, 1]);
}

#[test]
fn teardown_stops_pending_detection() {
    let mut page = FakePage::new("careers.example.com");
    let body = page.body();
    let input = page.append(body, "input", &[("name", "email")]);
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let clock = ManualClock::new();
    let mut orchestrator = Orchestrator::new(
        Rc::new(page),
        Rc::new(AdapterRegistry::default()),
        recorder.clone(),
        DebouncedDetector::new(ms(300), ms(1000)).with_clock(clock.clone()),
    );

    orchestrator.on_mutations(&[MutationRecord::added([input])]);
    assert!(orchestrator.is_pending());
    orchestrator.teardown();
    assert!(!orchestrator.is_pending());
    clock.advance(ms(1000));
    assert!(!orchestrator.poll());
    assert!(recorder.borrow().adapters.is_empty());
}
