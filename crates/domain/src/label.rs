use outreach_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const LABEL_NAME_MIN_LENGTH: usize = 3;
const LABEL_NAME_MAX_LENGTH: usize = 255;

/// Trimmed label name between 3 and 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelName(String);

impl LabelName {
    /// Creates a validated label name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            return Err(AppError::Validation(
                "Label Name cannot be empty.".to_owned(),
            ));
        }
        if length < LABEL_NAME_MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "Label Name must be at least {LABEL_NAME_MIN_LENGTH} characters."
            )));
        }
        if length > LABEL_NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "Label Name cannot exceed {LABEL_NAME_MAX_LENGTH} characters."
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the trimmed name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the case-folded form used for uniqueness checks.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}
