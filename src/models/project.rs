use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkClassification {
    Construction,
    Maintenance,
    Fabrication,
}

impl WorkClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Construction => "construction",
            Self::Maintenance => "maintenance",
            Self::Fabrication => "fabrication",
        }
    }

    /// Only construction work is broken down into phases on the timeline.
    pub fn has_phases(&self) -> bool {
        matches!(self, Self::Construction)
    }
}

impl fmt::Display for WorkClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkClassification {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "construction" => Ok(Self::Construction),
            "maintenance" => Ok(Self::Maintenance),
            "fabrication" => Ok(Self::Fabrication),
            other => anyhow::bail!("invalid work classification: {other}"),
        }
    }
}

/// A project as supplied by the upstream filter/sort layer. Dates are kept as
/// the raw ISO strings so that parsing failures can be reported per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub classification: String,
}

impl ProjectRecord {
    /// Name to show in the dashboard, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }

    /// Start date parsed the same way a layout pass parses it.
    pub fn start(&self) -> Option<NaiveDate> {
        parse_date(&self.id, "start_date", &self.start_date).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInterval {
    pub id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub classification: WorkClassification,
}

impl ProjectInterval {
    pub fn parse(record: &ProjectRecord) -> Result<Self, LayoutError> {
        let start = parse_date(&record.id, "start_date", &record.start_date)?;
        let end = parse_date(&record.id, "end_date", &record.end_date)?;
        let classification = record
            .classification
            .parse::<WorkClassification>()
            .map_err(|_| LayoutError::UnknownClassification {
                id: record.id.clone(),
                value: record.classification.clone(),
            })?;

        Ok(Self {
            id: record.id.clone(),
            start,
            end,
            classification,
        })
    }

    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}

fn parse_date(id: &str, field: &'static str, value: &str) -> Result<NaiveDate, LayoutError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| LayoutError::MalformedInterval {
        id: id.to_string(),
        field,
        value: value.to_string(),
    })
}
