use outreach_application::{CreateLabelInput, LabelRecord, UpdateLabelInput};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Status filter of the label listing.
#[derive(Debug, Deserialize)]
pub struct LabelListQuery {
    pub status: Option<bool>,
}

/// Incoming payload for label creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-label-request.ts"
)]
pub struct CreateLabelRequest {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Incoming payload for partial label updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-label-request.ts"
)]
pub struct UpdateLabelRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// API representation of a label.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/label-response.ts"
)]
pub struct LabelResponse {
    pub label_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CreateLabelRequest> for CreateLabelInput {
    fn from(value: CreateLabelRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            is_active: value.is_active,
        }
    }
}

impl From<UpdateLabelRequest> for UpdateLabelInput {
    fn from(value: UpdateLabelRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            is_active: value.is_active,
        }
    }
}

impl From<LabelRecord> for LabelResponse {
    fn from(value: LabelRecord) -> Self {
        Self {
            label_id: value.label_id,
            name: value.name,
            description: value.description,
            is_active: value.is_active,
            created_by: value.created_by,
            updated_by: value.updated_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
