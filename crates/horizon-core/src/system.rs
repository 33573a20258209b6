//! Systems: the repeatable processes that move goals forward

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// A system or habit loop. Frequency is free-form here ("every weekday
/// morning"), unlike the fixed enum on non-negotiables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct System {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub frequency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewSystem {
    pub name: String,
    pub description: String,
    pub frequency: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

impl Resource for System {
    type Draft = NewSystem;
    type Patch = SystemPatch;

    const KIND: ResourceKind = ResourceKind::System;

    fn id(&self) -> i64 {
        self.id
    }

    fn synthesize(draft: &NewSystem, id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            frequency: draft.frequency.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &SystemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(frequency) = &patch.frequency {
            self.frequency = frequency.clone();
        }
    }
}
