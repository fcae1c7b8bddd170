// Queue Descriptor Model

use serde::{Deserialize, Serialize};

/// Queue identifier (UUID v4)
pub type QueueId = String;

/// Queue descriptor, persisted as the fixed-name metadata file inside the
/// queue's directory.
///
/// `created_at` is an RFC3339 nanosecond-precision string and doubles as the
/// listing sort key (UTC timestamps compare chronologically as strings).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    pub id: QueueId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub run_id: String,
    #[serde(default)]
    pub actor_id: String,
    pub created_at: String,
}

impl Queue {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        run_id: impl Into<String>,
        actor_id: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            run_id: run_id.into(),
            actor_id: actor_id.into(),
            created_at: created_at.into(),
        }
    }
}
