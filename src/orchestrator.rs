//! Per-page detection lifecycle
//!
//! The host forwards DOM mutation batches. Batches that add form controls
//! schedule a debounced detection pass; the pass selects an adapter,
//! collects fields and hands them to a [`FieldSink`], which decides what
//! to fill.

use crate::adapters::AdapterRegistry;
use crate::debounce::DebouncedDetector;
use crate::field::DetectionReport;
use crate::page::{ElementId, PageModel};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Receives the fields found by each detection pass
pub trait FieldSink {
    fn on_fields(&mut self, page: &dyn PageModel, report: DetectionReport);
}

/// Nodes added to the page by one DOM mutation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationRecord {
    pub added_nodes: Vec<ElementId>,
}

impl MutationRecord {
    pub fn added(nodes: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            added_nodes: nodes.into_iter().collect(),
        }
    }
}

/// One detection pass: select the adapter, collect fields, notify the sink.
///
/// Returns the number of fields delivered.
pub fn run_detection_pipeline(
    page: &dyn PageModel,
    registry: &AdapterRegistry,
    sink: &mut dyn FieldSink,
) -> usize {
    let report = registry.detect(page);
    let count = report.len();
    sink.on_fields(page, report);
    count
}

pub struct Orchestrator {
    page: Rc<dyn PageModel>,
    registry: Rc<AdapterRegistry>,
    sink: Rc<RefCell<dyn FieldSink>>,
    detector: DebouncedDetector,
}

impl Orchestrator {
    pub fn new(
        page: Rc<dyn PageModel>,
        registry: Rc<AdapterRegistry>,
        sink: Rc<RefCell<dyn FieldSink>>,
        detector: DebouncedDetector,
    ) -> Self {
        Self {
            page,
            registry,
            sink,
            detector,
        }
    }

    /// Schedule the initial pass for a freshly loaded page.
    pub fn start(&mut self) {
        let pass = self.pass();
        self.detector.schedule(pass);
    }

    /// Schedule a pass if any added node is or contains a form control.
    ///
    /// Returns whether a pass was scheduled.
    pub fn on_mutations(&mut self, batch: &[MutationRecord]) -> bool {
        let adds_controls = batch
            .iter()
            .flat_map(|record| record.added_nodes.iter())
            .any(|node| self.page.contains_form_control(*node));
        if !adds_controls {
            tracing::trace!(records = batch.len(), "mutation batch without form controls");
            return false;
        }

        let pass = self.pass();
        self.detector.schedule(pass);
        true
    }

    /// Run the pending pass if it is due.
    pub fn poll(&mut self) -> bool {
        self.detector.poll()
    }

    /// Run a pass immediately, dropping any pending one.
    pub fn detect_now(&mut self) {
        let pass = self.pass();
        self.detector.flush(pass);
    }

    /// Drop pending work; nothing runs afterwards unless rescheduled.
    pub fn teardown(&mut self) {
        self.detector.cancel();
        tracing::debug!("orchestrator torn down");
    }

    pub fn is_pending(&self) -> bool {
        self.detector.is_pending()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.detector.next_deadline()
    }

    fn pass(&self) -> Box<dyn FnOnce()> {
        let page = Rc::clone(&self.page);
        let registry = Rc::clone(&self.registry);
        let sink = Rc::clone(&self.sink);
        Box::new(move || match sink.try_borrow_mut() {
            Ok(mut sink) => {
                run_detection_pipeline(page.as_ref(), &registry, &mut *sink);
            }
            Err(_) => tracing::warn!("field sink busy; detection pass skipped"),
        })
    }
}
