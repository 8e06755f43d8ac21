//! Input loading and selection shared by the CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use tracing::{debug, info};

use salary_ingest::{normalize_header_token, parse_header_phrase, parse_header_token};
use salary_model::{
    CellKey, ColumnId, DEFAULT_PERIOD, Education, EducationVocabulary, Schedule, ScheduleId,
    load_schedules, parse_school_year,
};
use salary_transform::InputGrid;

/// Reads a text file, or stdin when `path` is `None` or `-`.
pub fn read_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("read stdin")?;
            Ok(text)
        }
    }
}

pub fn load_schedule_file(path: &Path) -> Result<Vec<Schedule>> {
    let json = read_text(Some(path))?;
    let schedules =
        load_schedules(&json).with_context(|| format!("parse schedules {}", path.display()))?;
    info!(path = %path.display(), schedules = schedules.len(), "schedules loaded");
    Ok(schedules)
}

/// Loads a replacement education vocabulary from a JSON object file.
pub fn load_vocabulary(path: &Path) -> Result<EducationVocabulary> {
    let json = read_text(Some(path))?;
    let vocabulary: EducationVocabulary = serde_json::from_str(&json)
        .with_context(|| format!("parse vocabulary {}", path.display()))?;
    if vocabulary.is_empty() {
        bail!("vocabulary {} has no entries", path.display());
    }
    debug!(path = %path.display(), words = vocabulary.len(), "vocabulary loaded");
    Ok(vocabulary)
}

/// Picks one schedule by school year and period.
///
/// Without a school year the latest valid one is used. Without a period,
/// "Full Year" is preferred, then the first listed.
pub fn select_schedule<'a>(
    schedules: &'a [Schedule],
    school_year: Option<&str>,
    period: Option<&str>,
) -> Result<&'a Schedule> {
    let candidates: Vec<&Schedule> = schedules
        .iter()
        .filter(|schedule| school_year.is_none_or(|year| schedule.school_year == year))
        .filter(|schedule| period.is_none_or(|period| schedule.period == period))
        .collect();
    let latest_year = candidates
        .iter()
        .filter_map(|schedule| parse_school_year(&schedule.school_year).ok())
        .max();
    let in_year: Vec<&Schedule> = match latest_year {
        Some(year) => candidates
            .into_iter()
            .filter(|schedule| parse_school_year(&schedule.school_year).ok() == Some(year))
            .collect(),
        None => candidates,
    };
    in_year
        .iter()
        .find(|schedule| schedule.period == DEFAULT_PERIOD)
        .or_else(|| in_year.first())
        .copied()
        .ok_or_else(|| {
            anyhow!(
                "no schedule matches school year {} and period {}",
                school_year.unwrap_or("(any)"),
                period.unwrap_or("(any)")
            )
        })
}

/// Reads a column written like a schedule header (`M+30`, `MA30`, `CAGS`).
pub fn parse_column(text: &str, vocabulary: &EducationVocabulary) -> Result<ColumnId> {
    parse_header_token(&normalize_header_token(text), vocabulary)
        .or_else(|| parse_header_phrase(text, vocabulary))
        .map(|column| column.id())
        .ok_or_else(|| anyhow!("unrecognized column '{text}' (try B, M+30 or D)"))
}

/// Splits a `NAME=FILE` district argument.
pub fn parse_district(arg: &str) -> Result<(String, PathBuf)> {
    let (name, path) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=FILE, got '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() || path.trim().is_empty() {
        bail!("expected NAME=FILE, got '{arg}'");
    }
    Ok((name.to_string(), PathBuf::from(path.trim())))
}

/// One edited value from a diff input file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputEntry {
    #[serde(alias = "schoolYear")]
    pub school_year: String,
    #[serde(default = "default_period")]
    pub period: String,
    pub education: Education,
    #[serde(default)]
    pub credits: u32,
    pub step: u32,
    #[serde(deserialize_with = "deserialize_raw")]
    pub value: String,
}

fn default_period() -> String {
    DEFAULT_PERIOD.to_string()
}

/// Keeps the value as typed; numbers are turned back into their JSON text.
fn deserialize_raw<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

/// Builds an input grid from a JSON array of [`InputEntry`] values.
pub fn input_grid_from_json(json: &str) -> Result<InputGrid> {
    let entries: Vec<InputEntry> = serde_json::from_str(json).context("parse edit input")?;
    let mut input = InputGrid::new();
    for entry in entries {
        let schedule = ScheduleId::new(entry.school_year, entry.period);
        let key = CellKey::new(entry.education, entry.credits, entry.step);
        input.set(&schedule, key, entry.value);
    }
    debug!(cells = input.len(), "edit input loaded");
    Ok(input)
}
