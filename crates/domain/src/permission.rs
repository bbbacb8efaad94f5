use outreach_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

const UNIQUE_ID_PREFIX: &str = "PER-";
const UNIQUE_ID_HEX_LENGTH: usize = 10;

/// Externally visible permission identifier, `PER-` plus 10 uppercase hex chars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionUniqueId(String);

impl PermissionUniqueId {
    /// Generates a fresh identifier from a random UUID.
    #[must_use]
    pub fn generate() -> Self {
        let hex: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(UNIQUE_ID_HEX_LENGTH)
            .collect();

        Self(format!("{UNIQUE_ID_PREFIX}{}", hex.to_ascii_uppercase()))
    }

    /// Parses a stored identifier, rejecting values outside the `PER-XXXXXXXXXX` format.
    pub fn parse(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let is_valid = value
            .strip_prefix(UNIQUE_ID_PREFIX)
            .map(|hex| {
                hex.len() == UNIQUE_ID_HEX_LENGTH
                    && hex
                        .chars()
                        .all(|character| matches!(character, '0'..='9' | 'A'..='F'))
            })
            .unwrap_or(false);

        if !is_valid {
            return Err(AppError::Validation(format!(
                "invalid permission unique id '{value}'"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// One record of the record-shaped grant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGrantRecord {
    /// Action key the record refers to.
    pub action_key: String,
    /// Explicit grant flag; only `true` grants the action.
    pub has_permission: bool,
}

/// Action set stored on a permission row.
///
/// Rows written by provisioning always use [`ActionGrants::Keys`]. Older rows
/// may carry records with an explicit grant flag, so both shapes are decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionGrants {
    /// Plain list of granted action keys.
    Keys(Vec<String>),
    /// Records carrying an action key and an explicit grant flag.
    Records(Vec<ActionGrantRecord>),
}

impl ActionGrants {
    /// Builds a key list with duplicates removed, keeping first-seen order.
    #[must_use]
    pub fn from_action_keys<I, S>(action_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys: Vec<String> = Vec::new();
        for key in action_keys {
            let key = key.into();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        Self::Keys(keys)
    }

    /// Decodes the stored JSON value.
    ///
    /// A list of strings decodes to [`ActionGrants::Keys`], a list of objects to
    /// [`ActionGrants::Records`]. Anything else, including mixed lists, is rejected.
    pub fn decode(value: &Value) -> AppResult<Self> {
        let Some(items) = value.as_array() else {
            return Err(AppError::Validation(format!(
                "action grants must be a list, got '{value}'"
            )));
        };

        if items.iter().all(Value::is_string) {
            return Ok(Self::Keys(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(ToOwned::to_owned))
                    .collect(),
            ));
        }

        if items.iter().all(Value::is_object) {
            return items
                .iter()
                .filter_map(Value::as_object)
                .map(decode_record)
                .collect::<AppResult<Vec<_>>>()
                .map(Self::Records);
        }

        Err(AppError::Validation(
            "action grants mix strings and records".to_owned(),
        ))
    }

    /// Encodes the grants into their stored JSON form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Keys(keys) => Value::Array(keys.iter().cloned().map(Value::String).collect()),
            Self::Records(records) => Value::Array(
                records
                    .iter()
                    .map(|record| {
                        let mut object = Map::new();
                        object.insert(
                            "action_key".to_owned(),
                            Value::String(record.action_key.clone()),
                        );
                        object.insert(
                            "has_permission".to_owned(),
                            Value::Bool(record.has_permission),
                        );
                        Value::Object(object)
                    })
                    .collect(),
            ),
        }
    }

    /// Returns whether the action key is granted.
    #[must_use]
    pub fn grants(&self, action_key: &str) -> bool {
        match self {
            Self::Keys(keys) => keys.iter().any(|key| key == action_key),
            Self::Records(records) => records
                .iter()
                .any(|record| record.action_key == action_key && record.has_permission),
        }
    }

    /// Returns the granted action keys in stored order.
    #[must_use]
    pub fn granted_action_keys(&self) -> Vec<String> {
        match self {
            Self::Keys(keys) => keys.clone(),
            Self::Records(records) => records
                .iter()
                .filter(|record| record.has_permission)
                .map(|record| record.action_key.clone())
                .collect(),
        }
    }
}

fn decode_record(object: &Map<String, Value>) -> AppResult<ActionGrantRecord> {
    let action_key = object
        .get("action_key")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AppError::Validation("action grant record is missing 'action_key'".to_owned())
        })?;

    Ok(ActionGrantRecord {
        action_key: action_key.to_owned(),
        has_permission: object
            .get("has_permission")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}
