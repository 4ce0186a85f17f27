use serde::{Deserialize, Serialize};

use crate::ids::{SessionId, UserId};

/// POST /events request — record a prediction for an already-scored message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordPredictionRequest {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub wbc_score: u8,
    pub user_message: String,
}

/// POST /events/{id}/outcome request — attach ground truth.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordOutcomeRequest {
    pub actual_risk: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// PUT /threshold request. Out-of-range values are clamped, not rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateThresholdRequest {
    pub threshold: i64,
}

/// PUT /threshold response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThresholdResponse {
    pub threshold: u8,
}
