//! Obstacles: what stands in the way, and how to get around it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// How badly an obstacle threatens its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!(
                "unknown severity '{other}' (expected low, medium, high or critical)"
            )),
        }
    }
}

/// An obstacle logged against a goal, with its mitigation plan. Like KPIs,
/// obstacle mutations invalidate cached goals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: i64,
    pub goal: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub mitigation: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewObstacle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<i64>,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub mitigation: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ObstaclePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,
}

impl Resource for Obstacle {
    type Draft = NewObstacle;
    type Patch = ObstaclePatch;

    const KIND: ResourceKind = ResourceKind::Obstacle;

    fn id(&self) -> i64 {
        self.id
    }

    fn synthesize(draft: &NewObstacle, id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            goal: draft.goal,
            title: draft.title.clone(),
            description: draft.description.clone(),
            severity: draft.severity,
            mitigation: draft.mitigation.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &ObstaclePatch) {
        if let Some(goal) = patch.goal {
            self.goal = Some(goal);
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(severity) = patch.severity {
            self.severity = severity;
        }
        if let Some(mitigation) = &patch.mitigation {
            self.mitigation = mitigation.clone();
        }
    }
}
