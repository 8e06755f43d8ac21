use serde::{Deserialize, Serialize};

use crate::amount::round_salary;
use crate::education::{Education, column_key};
use crate::schedule::{CellKey, ScheduleId};

/// A validated manual edit, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRecord {
    pub school_year: String,
    pub period: String,
    pub education: Education,
    pub credits: u32,
    pub step: u32,
    /// Always rounded to cents.
    pub salary: f64,
}

impl EditRecord {
    pub fn new(schedule: &ScheduleId, key: &CellKey, salary: f64) -> Self {
        Self {
            school_year: schedule.school_year.clone(),
            period: schedule.period.clone(),
            education: key.education.clone(),
            credits: key.credits,
            step: key.step,
            salary: round_salary(salary),
        }
    }

    pub fn column_key(&self) -> String {
        column_key(&self.education, self.credits)
    }
}
