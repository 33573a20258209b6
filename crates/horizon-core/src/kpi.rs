//! KPIs: measurable indicators attached to goals

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// A key performance indicator for one goal. Mutating a KPI invalidates
/// the cached goals, since goal progress is recomputed server-side from
/// its KPIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpi {
    pub id: i64,
    /// Owning goal.
    pub goal: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub target_value: f64,
    #[serde(default)]
    pub actual_value: f64,
    /// Unit label shown after values ("km", "signups").
    #[serde(default)]
    pub unit: String,
    /// Server-derived actual/target, 0-100.
    #[serde(default)]
    pub progress_percentage: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload for a KPI.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewKpi {
    pub goal: i64,
    pub name: String,
    pub description: String,
    pub target_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<f64>,
    pub unit: String,
}

/// Partial update payload for a KPI.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KpiPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Resource for Kpi {
    type Draft = NewKpi;
    type Patch = KpiPatch;

    const KIND: ResourceKind = ResourceKind::Kpi;

    fn id(&self) -> i64 {
        self.id
    }

    fn synthesize(draft: &NewKpi, id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            goal: draft.goal,
            name: draft.name.clone(),
            description: draft.description.clone(),
            target_value: draft.target_value,
            actual_value: draft.actual_value.unwrap_or(0.0),
            unit: draft.unit.clone(),
            progress_percentage: Some(0.0),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &KpiPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(target_value) = patch.target_value {
            self.target_value = target_value;
        }
        if let Some(actual_value) = patch.actual_value {
            self.actual_value = actual_value;
        }
        if let Some(unit) = &patch.unit {
            self.unit = unit.clone();
        }
    }
}
