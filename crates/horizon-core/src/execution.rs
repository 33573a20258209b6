//! Executions: what actually gets done, month by month

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// Lifecycle of a monthly execution item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Deferred,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExecutionStatus::Planned => "planned",
            ExecutionStatus::InProgress => "in_progress",
            ExecutionStatus::Completed => "completed",
            ExecutionStatus::Deferred => "deferred",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(ExecutionStatus::Planned),
            "in_progress" | "in-progress" => Ok(ExecutionStatus::InProgress),
            "completed" | "done" => Ok(ExecutionStatus::Completed),
            "deferred" => Ok(ExecutionStatus::Deferred),
            other => Err(format!("unknown execution status '{other}'")),
        }
    }
}

/// English month name for a 1-12 month number, for list display.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "?",
    }
}

/// A concrete piece of work scheduled into a month of the planning year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    pub id: i64,
    /// Goal this execution advances, if any.
    pub goal: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// 1-12.
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub status: ExecutionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload for an execution.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewExecution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<i64>,
    pub title: String,
    pub description: String,
    pub month: u32,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExecutionStatus>,
}

/// Partial update payload for an execution.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExecutionStatus>,
}

impl Resource for Execution {
    type Draft = NewExecution;
    type Patch = ExecutionPatch;

    const KIND: ResourceKind = ResourceKind::Execution;

    fn id(&self) -> i64 {
        self.id
    }

    fn synthesize(draft: &NewExecution, id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            goal: draft.goal,
            title: draft.title.clone(),
            description: draft.description.clone(),
            month: draft.month,
            year: draft.year,
            status: draft.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &ExecutionPatch) {
        if let Some(goal) = patch.goal {
            self.goal = Some(goal);
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(month) = patch.month {
            self.month = month;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}
