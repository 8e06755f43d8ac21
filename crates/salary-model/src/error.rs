use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid school year '{value}' (expected YYYY-YYYY with consecutive years)")]
    InvalidSchoolYear { value: String },
    #[error("duplicate salary cell in {school_year}: step {step}, {column}")]
    DuplicateCell {
        school_year: String,
        step: u32,
        column: String,
    },
    #[error("invalid step {step} in {school_year} (steps start at 1)")]
    InvalidStep { school_year: String, step: u32 },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
