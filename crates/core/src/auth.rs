use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult, NonEmptyString};

/// Role and branch identity a request acts under.
///
/// Both tokens are opaque strings owned by the external identity service.
/// Construction rejects empty or whitespace-only values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessScope {
    role_key: NonEmptyString,
    branch_key: NonEmptyString,
}

impl AccessScope {
    /// Creates a validated role/branch scope.
    pub fn new(role_key: impl Into<String>, branch_key: impl Into<String>) -> AppResult<Self> {
        let role_key = NonEmptyString::new(role_key)
            .map_err(|_| AppError::Validation("role_key must be a non-empty string".to_owned()))?;
        let branch_key = NonEmptyString::new(branch_key).map_err(|_| {
            AppError::Validation("branch_key must be a non-empty string".to_owned())
        })?;

        Ok(Self {
            role_key,
            branch_key,
        })
    }

    /// Returns the role key.
    #[must_use]
    pub fn role_key(&self) -> &str {
        self.role_key.as_str()
    }

    /// Returns the branch key the role acts in.
    #[must_use]
    pub fn branch_key(&self) -> &str {
        self.branch_key.as_str()
    }
}

impl std::fmt::Display for AccessScope {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}@{}", self.role_key, self.branch_key)
    }
}
