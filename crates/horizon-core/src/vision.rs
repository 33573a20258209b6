//! Yearly vision: the north-star statement everything else hangs off

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// One year's vision. A user keeps at most a handful of these, one per
/// planning year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vision {
    pub id: i64,
    /// Planning year this vision covers.
    pub year: i32,
    /// The north-star statement.
    pub north_star: String,
    /// Short theme for the year ("Year of Depth").
    pub yearly_theme: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload for a vision.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewVision {
    pub year: i32,
    pub north_star: String,
    pub yearly_theme: String,
}

/// Partial update payload for a vision.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VisionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub north_star: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly_theme: Option<String>,
}

impl Resource for Vision {
    type Draft = NewVision;
    type Patch = VisionPatch;

    const KIND: ResourceKind = ResourceKind::Vision;

    fn id(&self) -> i64 {
        self.id
    }

    fn synthesize(draft: &NewVision, id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            year: draft.year,
            north_star: draft.north_star.clone(),
            yearly_theme: draft.yearly_theme.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &VisionPatch) {
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(north_star) = &patch.north_star {
            self.north_star = north_star.clone();
        }
        if let Some(theme) = &patch.yearly_theme {
            self.yearly_theme = theme.clone();
        }
    }
}
