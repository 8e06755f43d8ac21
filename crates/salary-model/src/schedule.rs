//! Salary schedules and their cells.
//!
//! Payloads from the schedule API are not uniform: flags arrive as
//! `isCalculated` or `is_calculated`, salaries as numbers or formatted
//! strings, provenance under several names. The deserializers here normalize
//! all of that so downstream code only ever sees one shape.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::amount::parse_amount;
use crate::education::{ColumnId, Education, column_key};
use crate::error::{ModelError, Result};
use crate::parse_result::ParseResult;

/// Period used when the payload does not name one.
pub const DEFAULT_PERIOD: &str = "Full Year";

/// Identity of a cell within one schedule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellKey {
    pub education: Education,
    #[serde(default)]
    pub credits: u32,
    pub step: u32,
}

impl CellKey {
    pub fn new(education: Education, credits: u32, step: u32) -> Self {
        Self {
            education,
            credits,
            step,
        }
    }

    pub fn column(&self) -> ColumnId {
        ColumnId::new(self.education.clone(), self.credits)
    }

    pub fn column_key(&self) -> String {
        column_key(&self.education, self.credits)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} step {}", self.column_key(), self.step)
    }
}

/// One schedule entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryCell {
    pub step: u32,
    pub education: Education,
    #[serde(default)]
    pub credits: u32,
    #[serde(default, deserialize_with = "deserialize_salary")]
    pub salary: Option<f64>,
    /// Set when the backend derived the value instead of recording it.
    #[serde(default, alias = "isCalculated", deserialize_with = "deserialize_flag")]
    pub is_calculated: bool,
    #[serde(
        default,
        alias = "calculatedFrom",
        alias = "is_calculated_from",
        alias = "isCalculatedFrom",
        deserialize_with = "deserialize_source",
        skip_serializing_if = "Option::is_none"
    )]
    pub calculated_from: Option<CellKey>,
}

impl SalaryCell {
    /// An authoritative value taken from the source schedule.
    pub fn recorded(step: u32, education: Education, credits: u32, salary: f64) -> Self {
        Self {
            step,
            education,
            credits,
            salary: Some(salary),
            is_calculated: false,
            calculated_from: None,
        }
    }

    /// A value derived by the backend, optionally pointing at its source cell.
    pub fn calculated(
        step: u32,
        education: Education,
        credits: u32,
        salary: Option<f64>,
        calculated_from: Option<CellKey>,
    ) -> Self {
        Self {
            step,
            education,
            credits,
            salary,
            is_calculated: true,
            calculated_from,
        }
    }

    /// An empty, user-editable cell (new row or column).
    pub fn blank(step: u32, education: Education, credits: u32) -> Self {
        Self {
            step,
            education,
            credits,
            salary: None,
            is_calculated: false,
            calculated_from: None,
        }
    }

    pub fn key(&self) -> CellKey {
        CellKey::new(self.education.clone(), self.credits, self.step)
    }

    pub fn column(&self) -> ColumnId {
        ColumnId::new(self.education.clone(), self.credits)
    }

    pub fn column_key(&self) -> String {
        column_key(&self.education, self.credits)
    }

    /// True when the cell holds a recorded (non-calculated) salary.
    pub fn is_authoritative(&self) -> bool {
        !self.is_calculated && self.salary.is_some()
    }
}

/// Identity of a schedule within a district.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScheduleId {
    pub school_year: String,
    pub period: String,
}

impl ScheduleId {
    pub fn new(school_year: impl Into<String>, period: impl Into<String>) -> Self {
        Self {
            school_year: school_year.into(),
            period: period.into(),
        }
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.school_year, self.period)
    }
}

fn default_period() -> String {
    DEFAULT_PERIOD.to_string()
}

/// One (school year, period) salary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(alias = "schoolYear")]
    pub school_year: String,
    #[serde(default = "default_period")]
    pub period: String,
    #[serde(default)]
    pub salaries: Vec<SalaryCell>,
}

impl Schedule {
    pub fn new(school_year: impl Into<String>, period: impl Into<String>) -> Self {
        Self {
            school_year: school_year.into(),
            period: period.into(),
            salaries: Vec::new(),
        }
    }

    pub fn with_salaries(mut self, salaries: Vec<SalaryCell>) -> Self {
        self.salaries = salaries;
        self
    }

    pub fn id(&self) -> ScheduleId {
        ScheduleId::new(self.school_year.clone(), self.period.clone())
    }

    pub fn cell(&self, key: &CellKey) -> Option<&SalaryCell> {
        self.salaries.iter().find(|cell| {
            cell.step == key.step && cell.credits == key.credits && cell.education == key.education
        })
    }

    pub fn cell_mut(&mut self, key: &CellKey) -> Option<&mut SalaryCell> {
        self.salaries.iter_mut().find(|cell| {
            cell.step == key.step && cell.credits == key.credits && cell.education == key.education
        })
    }

    /// Distinct columns in display order.
    pub fn columns(&self) -> Vec<ColumnId> {
        let columns: BTreeSet<ColumnId> = self.salaries.iter().map(SalaryCell::column).collect();
        columns.into_iter().collect()
    }

    /// Distinct steps, ascending.
    pub fn steps(&self) -> Vec<u32> {
        let steps: BTreeSet<u32> = self.salaries.iter().map(|cell| cell.step).collect();
        steps.into_iter().collect()
    }

    /// Checks the school year format, step numbering and cell uniqueness.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        parse_school_year(&self.school_year)?;
        let mut seen = BTreeSet::new();
        for cell in &self.salaries {
            if cell.step == 0 {
                return Err(ModelError::InvalidStep {
                    school_year: self.school_year.clone(),
                    step: cell.step,
                });
            }
            if !seen.insert(cell.key()) {
                return Err(ModelError::DuplicateCell {
                    school_year: self.school_year.clone(),
                    step: cell.step,
                    column: cell.column_key(),
                });
            }
        }
        Ok(())
    }

    /// Replaces the salaries with the cells of a successful parse.
    ///
    /// Every parsed value becomes a recorded cell. When two columns share the
    /// same education and credits (suffixed duplicates), the first column's
    /// value is kept. Returns the number of cells written; a failed parse
    /// leaves the schedule untouched and returns 0.
    pub fn apply_parse(&mut self, result: &ParseResult) -> usize {
        if !result.success {
            return 0;
        }
        let mut seen = BTreeSet::new();
        let mut salaries = Vec::new();
        for step in &result.steps {
            for column in &result.columns {
                let Some(value) = result.value(*step, &column.key) else {
                    continue;
                };
                let key = CellKey::new(column.education.clone(), column.credits, *step);
                if !seen.insert(key) {
                    continue;
                }
                salaries.push(SalaryCell::recorded(
                    *step,
                    column.education.clone(),
                    column.credits,
                    value,
                ));
            }
        }
        let written = salaries.len();
        self.salaries = salaries;
        written
    }
}

/// Splits `"2023-2024"` into its two years.
///
/// # Errors
///
/// Returns [`ModelError::InvalidSchoolYear`] unless the value is two
/// four-digit consecutive years joined by `-`.
pub fn parse_school_year(value: &str) -> Result<(i32, i32)> {
    let invalid = || ModelError::InvalidSchoolYear {
        value: value.to_string(),
    };
    let (start, end) = value.trim().split_once('-').ok_or_else(invalid)?;
    if start.len() != 4 || end.len() != 4 {
        return Err(invalid());
    }
    let start: i32 = start.parse().map_err(|_| invalid())?;
    let end: i32 = end.parse().map_err(|_| invalid())?;
    if end != start + 1 {
        return Err(invalid());
    }
    Ok((start, end))
}

pub fn format_school_year(start: i32) -> String {
    format!("{start}-{}", start + 1)
}

/// Reads schedules from a JSON array or from `{"schedules": [...]}`.
///
/// # Errors
///
/// Returns [`ModelError::Json`] when the payload is not valid JSON or does
/// not have either shape.
pub fn load_schedules(json: &str) -> Result<Vec<Schedule>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Payload {
        List(Vec<Schedule>),
        Wrapped { schedules: Vec<Schedule> },
    }
    let payload: Payload = serde_json::from_str(json)?;
    Ok(match payload {
        Payload::List(schedules) | Payload::Wrapped { schedules } => schedules,
    })
}

fn deserialize_salary<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSalary {
        Number(f64),
        Text(String),
    }
    let raw = Option::<RawSalary>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawSalary::Number(value)) if value.is_finite() => Some(value),
        Some(RawSalary::Text(text)) => parse_amount(&text),
        _ => None,
    })
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Number(i64),
        Text(String),
    }
    let raw = Option::<RawFlag>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawFlag::Bool(value)) => value,
        Some(RawFlag::Number(value)) => value != 0,
        Some(RawFlag::Text(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "y"
        ),
        None => false,
    })
}

fn deserialize_source<'de, D>(deserializer: D) -> std::result::Result<Option<CellKey>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSource {
        Key(CellKey),
        Other(serde::de::IgnoredAny),
    }
    let raw = Option::<RawSource>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawSource::Key(key)) => Some(key),
        Some(RawSource::Other(_)) | None => None,
    })
}
