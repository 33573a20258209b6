//! Quarterly reflections: the retrospective loop

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// A written retrospective for one quarter of the planning year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuarterlyReflection {
    pub id: i64,
    /// 1-4.
    pub quarter: u8,
    pub year: i32,
    #[serde(default)]
    pub wins: String,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub lessons_learned: String,
    #[serde(default)]
    pub adjustments: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuarterlyReflection {
    /// "Q3 2026" style label.
    pub fn label(&self) -> String {
        format!("Q{} {}", self.quarter, self.year)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewReflection {
    pub quarter: u8,
    pub year: i32,
    pub wins: String,
    pub challenges: String,
    pub lessons_learned: String,
    pub adjustments: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReflectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wins: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenges: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons_learned: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustments: Option<String>,
}

impl Resource for QuarterlyReflection {
    type Draft = NewReflection;
    type Patch = ReflectionPatch;

    const KIND: ResourceKind = ResourceKind::Reflection;

    fn id(&self) -> i64 {
        self.id
    }

    fn synthesize(draft: &NewReflection, id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            quarter: draft.quarter,
            year: draft.year,
            wins: draft.wins.clone(),
            challenges: draft.challenges.clone(),
            lessons_learned: draft.lessons_learned.clone(),
            adjustments: draft.adjustments.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &ReflectionPatch) {
        if let Some(quarter) = patch.quarter {
            self.quarter = quarter;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(wins) = &patch.wins {
            self.wins = wins.clone();
        }
        if let Some(challenges) = &patch.challenges {
            self.challenges = challenges.clone();
        }
        if let Some(lessons) = &patch.lessons_learned {
            self.lessons_learned = lessons.clone();
        }
        if let Some(adjustments) = &patch.adjustments {
            self.adjustments = adjustments.clone();
        }
    }
}
