use serde::{Deserialize, Serialize};

use crate::ids::{SessionId, UserId};
use crate::types::{DetectionEvent, RiskAssessment};

/// POST /score request — score a single message without recording it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub text: String,
}

/// POST /screen request — score a message and record the prediction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScreenRequest {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub message: String,
}

/// POST /screen response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScreenResponse {
    pub assessment: RiskAssessment,
    pub event: DetectionEvent,
}
