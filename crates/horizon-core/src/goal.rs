//! Goals: a vision broken into trackable outcomes

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// Lifecycle of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl GoalStatus {
    /// Wire string, as sent to `by_status` filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Pending => "pending",
            GoalStatus::InProgress => "in_progress",
            GoalStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(GoalStatus::Pending),
            "in_progress" | "in-progress" => Ok(GoalStatus::InProgress),
            "completed" | "done" => Ok(GoalStatus::Completed),
            other => Err(format!(
                "unknown goal status '{other}' (expected pending, in_progress or completed)"
            )),
        }
    }
}

/// A goal under a vision. Progress is derived on the server from the
/// goal's KPIs; the client never computes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    /// Owning vision, if the goal has been attached to one.
    pub vision: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    /// Server-derived completion, 0-100.
    #[serde(default)]
    pub progress_percentage: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload for a goal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewGoal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision: Option<i64>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

/// Partial update payload for a goal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoalPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

impl Resource for Goal {
    type Draft = NewGoal;
    type Patch = GoalPatch;

    const KIND: ResourceKind = ResourceKind::Goal;

    fn id(&self) -> i64 {
        self.id
    }

    fn synthesize(draft: &NewGoal, id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            vision: draft.vision,
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status.unwrap_or_default(),
            target_date: draft.target_date,
            progress_percentage: Some(0.0),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &GoalPatch) {
        if let Some(vision) = patch.vision {
            self.vision = Some(vision);
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(target_date) = patch.target_date {
            self.target_date = Some(target_date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn status_round_trips_through_wire_strings() {
        for status in [GoalStatus::Pending, GoalStatus::InProgress, GoalStatus::Completed] {
            let parsed: GoalStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn synthesized_goal_defaults_to_pending_with_zero_progress() {
        let draft = NewGoal {
            title: "Run a marathon".into(),
            ..Default::default()
        };
        let goal = Goal::synthesize(&draft, -7, Utc::now());
        assert_eq!(goal.status, GoalStatus::Pending);
        assert_eq!(goal.progress_percentage, Some(0.0));
        assert_eq!(goal.id, -7);
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let draft = NewGoal {
            title: "Run a marathon".into(),
            description: "Sub-4h".into(),
            ..Default::default()
        };
        let mut goal = Goal::synthesize(&draft, 1, Utc::now());
        goal.apply_patch(&GoalPatch {
            status: Some(GoalStatus::InProgress),
            ..Default::default()
        });
        assert_eq!(goal.status, GoalStatus::InProgress);
        assert_eq!(goal.title, "Run a marathon");
        assert_eq!(goal.description, "Sub-4h");
    }
}
