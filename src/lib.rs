pub mod adapters;
pub mod classifier;
pub mod config;
pub mod debounce;
pub mod error;
pub mod field;
pub mod filler;
pub mod orchestrator;
pub mod output;
pub mod page;
pub mod profile;

pub use adapters::{Adapter, AdapterRegistry, detect_fields};
pub use debounce::DebouncedDetector;
pub use error::{AtsError, Result};
pub use field::{DetectedField, DetectionReport, FieldType};
pub use filler::{FillRequest, FillSummary, batch_fill, fill_field};
pub use orchestrator::{FieldSink, MutationRecord, Orchestrator};
pub use page::{ElementId, PageModel};
