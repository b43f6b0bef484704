//! Vendor adapters and the registry that picks one per page
//!
//! Adapters are tried in a fixed priority order and the first one whose
//! page check succeeds produces the whole result. The generic heuristic
//! adapter runs only when no vendor matches.

use crate::classifier::FieldClassifier;
use crate::config::DetectionConfig;
use crate::field::{DetectedField, DetectionReport};
use crate::page::PageModel;

pub mod ashby;
pub mod declarative;
pub mod generic;
pub mod greenhouse;
pub mod icims;
pub mod lever;
pub mod smartrecruiters;
pub mod successfactors;
pub mod utils;
pub mod workable;
pub mod workday;

pub use ashby::AshbyAdapter;
pub use generic::GenericAdapter;
pub use greenhouse::GreenhouseAdapter;
pub use icims::IcimsAdapter;
pub use lever::LeverAdapter;
pub use smartrecruiters::SmartRecruitersAdapter;
pub use successfactors::SuccessFactorsAdapter;
pub use workable::WorkableAdapter;
pub use workday::WorkdayAdapter;

/// Field detector for one family of pages
pub trait Adapter {
    /// Stable identifier reported alongside detected fields
    fn name(&self) -> &'static str;

    fn is_matching_page(&self, page: &dyn PageModel) -> bool;

    /// Fields in document order
    fn detect_fields(&self, page: &dyn PageModel) -> Vec<DetectedField>;
}

/// Ordered adapter list with a generic fallback
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn Adapter>>,
    fallback: GenericAdapter,
}

impl AdapterRegistry {
    /// Empty registry; every page goes to `fallback`.
    pub fn new(fallback: GenericAdapter) -> Self {
        Self {
            adapters: Vec::new(),
            fallback,
        }
    }

    /// Append an adapter at the lowest priority so far.
    pub fn register<A: Adapter + 'static>(mut self, adapter: A) -> Self {
        self.adapters.push(Box::new(adapter));
        self
    }

    /// Built-in vendors in their default priority order.
    pub fn with_defaults(config: &DetectionConfig) -> Self {
        let classifier = FieldClassifier::with_confidence(
            config.generic_confidence,
            config.custom_question_confidence,
        );
        let mut fallback = GenericAdapter::with_classifier(classifier);
        if !config.include_custom_questions {
            fallback = fallback.without_custom_questions();
        }

        Self::new(fallback)
            .register(IcimsAdapter::new())
            .register(SmartRecruitersAdapter::new())
            .register(GreenhouseAdapter::new())
            .register(LeverAdapter::new())
            .register(WorkdayAdapter::new())
            .register(AshbyAdapter::new())
            .register(WorkableAdapter::new())
            .register(SuccessFactorsAdapter::new())
    }

    /// First matching vendor adapter, or the fallback.
    pub fn select(&self, page: &dyn PageModel) -> &dyn Adapter {
        for adapter in &self.adapters {
            if adapter.is_matching_page(page) {
                return adapter.as_ref();
            }
        }
        &self.fallback
    }

    /// Adapter names in evaluation order, fallback last.
    pub fn adapter_names(&self) -> Vec<&'static str> {
        self.adapters
            .iter()
            .map(|adapter| adapter.name())
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }

    pub fn detect(&self, page: &dyn PageModel) -> DetectionReport {
        let adapter = self.select(page);
        tracing::info!(
            adapter = adapter.name(),
            hostname = %page.hostname(),
            "adapter selected"
        );
        let report = DetectionReport::new(adapter.name(), adapter.detect_fields(page));
        tracing::debug!(fields = report.len(), "detection pass complete");
        report
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::with_defaults(&DetectionConfig::default())
    }
}

/// Detect the fields of `page` with the first matching adapter.
pub fn detect_fields(page: &dyn PageModel, registry: &AdapterRegistry) -> DetectionReport {
    registry.detect(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use crate::page::{ElementId, FakePage};

    struct Fixed {
        name: &'static str,
        host: &'static str,
    }

    impl Adapter for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_matching_page(&self, page: &dyn PageModel) -> bool {
            page.hostname().contains(self.host)
        }

        fn detect_fields(&self, _page: &dyn PageModel) -> Vec<DetectedField> {
            vec![DetectedField::new(ElementId(1), FieldType::Email, self.name, 0.9)]
        }
    }

    #[test]
    fn default_priority_order() {
        assert_eq!(
            AdapterRegistry::default().adapter_names(),
            vec![
                "icims",
                "smartrecruiters",
                "greenhouse",
                "lever",
                "workday",
                "ashby",
                "workable",
                "successfactors",
                "generic"
            ]
        );
    }

    #[test]
    fn first_match_wins() {
        let registry = AdapterRegistry::new(GenericAdapter::new())
            .register(Fixed {
                name: "a",
                host: "example",
            })
            .register(Fixed {
                name: "b",
                host: "jobs",
            });

        let page = FakePage::new("jobs.example.com");
        let report = detect_fields(&page, &registry);
        assert_eq!(report.adapter, "a");
        assert_eq!(report.len(), 1);
        assert_eq!(report.fields[0].label, "a");
    }

    #[test]
    fn falls_back_to_generic() {
        let registry = AdapterRegistry::default();
        let mut page = FakePage::new("careers.example.com");
        let body = page.body();
        page.append(body, "input", &[("name", "email")]);

        let report = registry.detect(&page);
        assert_eq!(report.adapter, "generic");
        assert_eq!(report.fields[0].field_type, FieldType::Email);
    }

    #[test]
    fn vendor_result_is_not_merged_with_generic() {
        let registry = AdapterRegistry::default();
        let mut page = FakePage::new("acme.icims.com");
        let body = page.body();
        page.append(body, "input", &[("name", "firstname")]);
        // no `name`: invisible to iCIMS, would be found generically
        page.append(body, "input", &[("aria-label", "Phone")]);

        let report = registry.detect(&page);
        assert_eq!(report.adapter, "icims");
        assert_eq!(report.len(), 1);
        assert_eq!(report.fields[0].field_type, FieldType::FirstName);
    }

    #[test]
    fn detection_config_reaches_the_fallback() {
        let config = DetectionConfig {
            generic_confidence: 0.5,
            custom_question_confidence: 0.1,
            include_custom_questions: false,
        };
        let registry = AdapterRegistry::with_defaults(&config);
        let mut page = FakePage::new("careers.example.com");
        let body = page.body();
        page.append(body, "input", &[("name", "email")]);
        page.append(body, "textarea", &[("name", "motivation")]);

        let report = registry.detect(&page);
        assert_eq!(report.len(), 1);
        assert_eq!(report.fields[0].confidence, 0.5);
    }
}
