use crate::error::AtsError;
use crate::page::ElementId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Confidence levels assigned by the detectors
///
/// Vendor adapters carry a structural guarantee about the page (a known
/// container, a vendor data attribute), so they sit above the generic
/// heuristics. The values are tunable; only their relative order matters.
pub mod confidence {
    pub const WORKDAY: f32 = 0.9;
    pub const GREENHOUSE: f32 = 0.85;
    pub const SMARTRECRUITERS: f32 = 0.8;
    pub const LEVER: f32 = 0.8;
    pub const ICIMS: f32 = 0.75;
    pub const ASHBY: f32 = 0.85;
    pub const WORKABLE: f32 = 0.8;
    pub const SUCCESSFACTORS: f32 = 0.75;

    /// Generic heuristic match on the combined signal text
    pub const GENERIC: f32 = 0.6;

    /// Generic catch-all for labelled fields no rule recognised
    pub const CUSTOM_QUESTION: f32 = 0.4;
}

/// Semantic category of a form field.
///
/// The snake_case names are a stable contract for the profile-matching and
/// answer-generation layers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    FirstName,
    LastName,
    Email,
    Phone,
    City,
    Country,
    Address,
    Linkedin,
    Github,
    Portfolio,
    Website,
    Resume,
    CoverLetter,
    SalaryExpectation,
    NoticePeriod,
    WorkAuth,
    VisaSponsorship,
    Relocation,
    StartDate,
    CustomQuestion,
    Unknown,
}

impl FieldType {
    pub const ALL: [FieldType; 21] = [
        FieldType::FirstName,
        FieldType::LastName,
        FieldType::Email,
        FieldType::Phone,
        FieldType::City,
        FieldType::Country,
        FieldType::Address,
        FieldType::Linkedin,
        FieldType::Github,
        FieldType::Portfolio,
        FieldType::Website,
        FieldType::Resume,
        FieldType::CoverLetter,
        FieldType::SalaryExpectation,
        FieldType::NoticePeriod,
        FieldType::WorkAuth,
        FieldType::VisaSponsorship,
        FieldType::Relocation,
        FieldType::StartDate,
        FieldType::CustomQuestion,
        FieldType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::FirstName => "first_name",
            FieldType::LastName => "last_name",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::City => "city",
            FieldType::Country => "country",
            FieldType::Address => "address",
            FieldType::Linkedin => "linkedin",
            FieldType::Github => "github",
            FieldType::Portfolio => "portfolio",
            FieldType::Website => "website",
            FieldType::Resume => "resume",
            FieldType::CoverLetter => "cover_letter",
            FieldType::SalaryExpectation => "salary_expectation",
            FieldType::NoticePeriod => "notice_period",
            FieldType::WorkAuth => "work_auth",
            FieldType::VisaSponsorship => "visa_sponsorship",
            FieldType::Relocation => "relocation",
            FieldType::StartDate => "start_date",
            FieldType::CustomQuestion => "custom_question",
            FieldType::Unknown => "unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, FieldType::Unknown)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = AtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        FieldType::ALL
            .iter()
            .copied()
            .find(|ft| ft.as_str() == wanted)
            .ok_or_else(|| AtsError::UnknownFieldType(s.to_string()))
    }
}

/// A form control recognised on the page.
///
/// `element` is a non-owning handle into the page model and is only
/// meaningful for the page the field was detected on.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct DetectedField {
    pub element: ElementId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub confidence: f32,
}

impl DetectedField {
    pub fn new(
        element: ElementId,
        field_type: FieldType,
        label: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            element,
            field_type,
            label: label.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Result of one detection pass.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct DetectionReport {
    /// Name of the adapter that produced the fields
    pub adapter: String,
    pub fields: Vec<DetectedField>,
}

impl DetectionReport {
    /// Build a report, dropping `unknown` fields and collapsing duplicate
    /// elements. The first occurrence keeps its position; a later duplicate
    /// only replaces it when strictly more confident.
    pub fn new(adapter: impl Into<String>, fields: Vec<DetectedField>) -> Self {
        let mut unique: Vec<DetectedField> = Vec::with_capacity(fields.len());
        for field in fields {
            if field.field_type.is_unknown() {
                continue;
            }
            match unique.iter_mut().find(|f| f.element == field.element) {
                Some(existing) if field.confidence > existing.confidence => *existing = field,
                Some(_) => {}
                None => unique.push(field),
            }
        }

        Self {
            adapter: adapter.into(),
            fields: unique,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn find(&self, field_type: FieldType) -> Option<&DetectedField> {
        self.fields.iter().find(|f| f.field_type == field_type)
    }
}
