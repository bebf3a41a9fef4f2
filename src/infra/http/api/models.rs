use serde::Deserialize;
use uuid::Uuid;

use crate::domain::blocks::{CaseBlockKind, LandingBlockKind};

/// Save request for one block. `block_id` present means update; absent
/// means create. `position` is optional in both directions: a create
/// without one appends at the end of the sequence, an update without one
/// preserves the stored position.
#[derive(Debug, Deserialize)]
pub struct SaveLandingBlockRequest {
    pub kind: LandingBlockKind,
    pub content: serde_json::Value,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default)]
    pub block_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SaveCaseBlockRequest {
    pub kind: CaseBlockKind,
    pub content: serde_json::Value,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default)]
    pub block_id: Option<Uuid>,
}
