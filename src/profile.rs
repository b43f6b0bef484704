//! Mapping detected fields to candidate data
//!
//! The detection core only says what each control is. This module decides
//! what goes into it: a [`ValueSource`] answers per [`FieldType`], and
//! [`ProfileFiller`] turns a detection report into fills.

use crate::error::{AtsError, Result};
use crate::field::{DetectionReport, FieldType};
use crate::filler::{FillRequest, FillSummary, batch_fill};
use crate::orchestrator::FieldSink;
use crate::page::PageModel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Answers the value to fill for a field type, if any
pub trait ValueSource {
    fn value_for(&self, field_type: FieldType) -> Option<String>;
}

impl<T: ValueSource + ?Sized> ValueSource for Box<T> {
    fn value_for(&self, field_type: FieldType) -> Option<String> {
        (**self).value_for(field_type)
    }
}

/// Candidate profile as exported by the extension's storage layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub personal_info: PersonalInfo,
    pub preferences: Preferences,
    pub work_auth: WorkAuth,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub address: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub salary_expectation: String,
    pub notice_period: String,
    pub start_date: String,
}

/// Yes/no answers; unset questions are left for the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkAuth {
    pub authorized: Option<bool>,
    pub needs_visa: Option<bool>,
    pub can_relocate: Option<bool>,
}

fn yes_no(answer: Option<bool>) -> Option<String> {
    answer.map(|a| if a { "Yes" } else { "No" }.to_string())
}

impl Profile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AtsError::io(path, e))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(AtsError::Profile)
    }
}

impl ValueSource for Profile {
    fn value_for(&self, field_type: FieldType) -> Option<String> {
        let info = &self.personal_info;
        let text = match field_type {
            FieldType::FirstName => &info.first_name,
            FieldType::LastName => &info.last_name,
            FieldType::Email => &info.email,
            FieldType::Phone => &info.phone,
            FieldType::City => &info.city,
            FieldType::Country => &info.country,
            FieldType::Address => &info.address,
            FieldType::Linkedin => &info.linkedin,
            FieldType::Github => &info.github,
            FieldType::Portfolio => &info.portfolio,
            FieldType::Website => &info.website,
            FieldType::SalaryExpectation => &self.preferences.salary_expectation,
            FieldType::NoticePeriod => &self.preferences.notice_period,
            FieldType::StartDate => &self.preferences.start_date,
            FieldType::WorkAuth => return yes_no(self.work_auth.authorized),
            FieldType::VisaSponsorship => return yes_no(self.work_auth.needs_visa),
            FieldType::Relocation => return yes_no(self.work_auth.can_relocate),
            // uploads and free-text answers need the user or an assistant
            FieldType::Resume
            | FieldType::CoverLetter
            | FieldType::CustomQuestion
            | FieldType::Unknown => return None,
        };
        (!text.trim().is_empty()).then(|| text.clone())
    }
}

/// Explicit `field_type=value` pairs, e.g. from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: BTreeMap<FieldType, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field_type: FieldType, value: impl Into<String>) {
        self.values.insert(field_type, value.into());
    }

    pub fn from_assignments<I, S>(assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = Self::new();
        for assignment in assignments {
            let (field_type, value) = parse_assignment(assignment.as_ref())?;
            values.insert(field_type, value);
        }
        Ok(values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ValueSource for FieldValues {
    fn value_for(&self, field_type: FieldType) -> Option<String> {
        self.values.get(&field_type).cloned()
    }
}

/// Parse `first_name=Ada` (the value may itself contain `=`).
pub fn parse_assignment(input: &str) -> Result<(FieldType, String)> {
    let Some((key, value)) = input.split_once('=') else {
        return Err(AtsError::InvalidAssignment {
            input: input.to_string(),
        });
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(AtsError::InvalidAssignment {
            input: input.to_string(),
        });
    }
    Ok((key.parse()?, value.to_string()))
}

/// Fill requests for every detected field the source has a value for,
/// in detection order.
pub fn plan_fills(report: &DetectionReport, source: &dyn ValueSource) -> Vec<FillRequest> {
    report
        .fields
        .iter()
        .filter_map(|field| {
            source
                .value_for(field.field_type)
                .filter(|value| !value.is_empty())
                .map(|value| FillRequest::new(field.element, value))
        })
        .collect()
}

/// Field sink that fills every detected field it has a value for
#[derive(Debug)]
pub struct ProfileFiller<S> {
    source: S,
    last_summary: Option<FillSummary>,
    passes: usize,
}

impl<S: ValueSource> ProfileFiller<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            last_summary: None,
            passes: 0,
        }
    }

    pub fn fill(&mut self, page: &dyn PageModel, report: &DetectionReport) -> FillSummary {
        let requests = plan_fills(report, &self.source);
        let summary = batch_fill(page, &requests);
        self.passes += 1;
        self.last_summary = Some(summary.clone());
        summary
    }

    pub fn last_summary(&self) -> Option<&FillSummary> {
        self.last_summary.as_ref()
    }

    /// Number of detection passes handled so far
    pub fn passes(&self) -> usize {
        self.passes
    }
}

impl<S: ValueSource> FieldSink for ProfileFiller<S> {
    fn on_fields(&mut self, page: &dyn PageModel, report: DetectionReport) {
        self.fill(page, &report);
    }
}
