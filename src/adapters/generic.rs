use crate::adapters::Adapter;
use crate::classifier::{FieldClassifier, FieldSignals};
use crate::field::{DetectedField, FieldType};
use crate::page::{ControlKind, PageModel, Selector};

const FORM_CONTROLS: Selector = Selector::Any(&[
    Selector::Tag("input"),
    Selector::Tag("textarea"),
    Selector::Tag("select"),
]);

/// Heuristic fallback for pages no vendor adapter recognises
#[derive(Debug, Clone)]
pub struct GenericAdapter {
    classifier: FieldClassifier,
    include_custom_questions: bool,
}

impl GenericAdapter {
    pub fn new() -> Self {
        Self::with_classifier(FieldClassifier::new())
    }

    pub fn with_classifier(classifier: FieldClassifier) -> Self {
        Self {
            classifier,
            include_custom_questions: true,
        }
    }

    /// Drop `custom_question` results entirely.
    pub fn without_custom_questions(mut self) -> Self {
        self.include_custom_questions = false;
        self
    }
}

impl Adapter for GenericAdapter {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn is_matching_page(&self, _page: &dyn PageModel) -> bool {
        true
    }

    fn detect_fields(&self, page: &dyn PageModel) -> Vec<DetectedField> {
        let mut fields = Vec::new();
        for el in page.query_all(&FORM_CONTROLS) {
            if !page.control_kind(el).is_some_and(ControlKind::is_fillable) {
                continue;
            }
            if !page.is_interactive(el) {
                tracing::trace!(element = %el, "skipping non-interactive control");
                continue;
            }

            let signals = FieldSignals::collect(page, el);
            let classification = self.classifier.classify_signals(&signals);
            match classification.field_type {
                FieldType::Unknown => continue,
                FieldType::CustomQuestion if !self.include_custom_questions => continue,
                _ => {}
            }

            fields.push(DetectedField::new(
                el,
                classification.field_type,
                signals.display_label(),
                classification.confidence,
            ));
        }

        tracing::debug!(fields = fields.len(), "generic detection finished");
        fields
    }
}

impl Default for GenericAdapter {
    fn default() -> Self {
        Self::new()
    }
}
