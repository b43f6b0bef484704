//! Stable JSON documents printed by the command-line tool

use crate::field::{DetectedField, DetectionReport, FieldType};
use crate::filler::FillSummary;
use crate::page::{ControlKind, ElementId, PageModel};
use schemars::JsonSchema;
use serde::Serialize;

/// Bumped whenever a field of the JSON output changes meaning.
pub const SCHEMA_VERSION: u32 = 1;

/// `atsfill detect --json`
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct DetectionOutput {
    pub version: u32,
    pub hostname: String,
    /// Adapter that produced the fields
    pub adapter: String,
    pub fields: Vec<DetectedField>,
}

impl DetectionOutput {
    pub fn new(page: &dyn PageModel, report: DetectionReport) -> Self {
        Self {
            version: SCHEMA_VERSION,
            hostname: page.hostname(),
            adapter: report.adapter,
            fields: report.fields,
        }
    }
}

/// Current state of one detected control after filling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldState {
    pub element: ElementId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

impl FieldState {
    pub fn read(page: &dyn PageModel, field: &DetectedField) -> Self {
        let is_toggle = matches!(
            page.control_kind(field.element),
            Some(ControlKind::Checkbox | ControlKind::Radio)
        );
        Self {
            element: field.element,
            field_type: field.field_type,
            value: page.value(field.element),
            checked: is_toggle.then(|| page.is_checked(field.element)),
        }
    }
}

/// `atsfill fill --json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillOutput {
    pub version: u32,
    pub hostname: String,
    pub adapter: String,
    pub attempted: usize,
    pub filled: usize,
    pub rejected: Vec<ElementId>,
    pub fields: Vec<FieldState>,
}

impl FillOutput {
    pub fn new(page: &dyn PageModel, report: &DetectionReport, summary: FillSummary) -> Self {
        Self {
            version: SCHEMA_VERSION,
            hostname: page.hostname(),
            adapter: report.adapter.clone(),
            attempted: summary.attempted,
            filled: summary.filled,
            rejected: summary.rejected,
            fields: report
                .fields
                .iter()
                .map(|field| FieldState::read(page, field))
                .collect(),
        }
    }
}
