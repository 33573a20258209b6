//! Resource metadata: kinds, REST paths, cache keys, invalidation edges

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// The nine REST resources exposed by the planning service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Vision,
    Goal,
    Kpi,
    NonNegotiable,
    System,
    Person,
    Execution,
    Obstacle,
    Reflection,
}

impl ResourceKind {
    /// Path segment under `/api/`, with the trailing-slash convention the
    /// server routes expect (`/api/goals/`, `/api/goals/7/`).
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Vision => "visions",
            ResourceKind::Goal => "goals",
            ResourceKind::Kpi => "kpis",
            ResourceKind::NonNegotiable => "non-negotiables",
            ResourceKind::System => "systems",
            ResourceKind::Person => "people",
            ResourceKind::Execution => "executions",
            ResourceKind::Obstacle => "obstacles",
            ResourceKind::Reflection => "reflections",
        }
    }

    /// Key under which this kind's list is cached. Item entries append the
    /// record id (`goals/7`).
    pub fn cache_key(&self) -> &'static str {
        self.path()
    }

    /// Kinds whose cached data is stale after a successful mutation of
    /// `self`. Goal progress is derived on the server from its KPIs and
    /// obstacles, so mutating either invalidates goals.
    pub fn invalidates(&self) -> &'static [ResourceKind] {
        match self {
            ResourceKind::Kpi | ResourceKind::Obstacle => &[ResourceKind::Goal],
            _ => &[],
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A record tied to one [`ResourceKind`], with the payload types the API
/// accepts for it and the synthesis hooks the optimistic cache needs.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Create payload (`POST` body).
    type Draft: Serialize + Send + Sync;
    /// Partial update payload (`PATCH` body).
    type Patch: Serialize + Send + Sync;

    /// Which resource this record belongs to.
    const KIND: ResourceKind;

    /// Server-assigned id (negative while provisional).
    fn id(&self) -> i64;

    /// Build a provisional record from a draft, before the server has
    /// answered. Defaults mirror what the server would assign.
    fn synthesize(draft: &Self::Draft, id: i64, now: DateTime<Utc>) -> Self;

    /// Apply a partial update to a cached record in place.
    fn apply_patch(&mut self, patch: &Self::Patch);
}

/// Paginated list envelope, as the server's list endpoints return it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// List endpoints answer with either the paginated envelope or a bare
/// array, depending on the view. Both normalize to `Vec<T>`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    Paginated(Paginated<T>),
    Plain(Vec<T>),
}

impl<T> ListBody<T> {
    pub fn into_results(self) -> Vec<T> {
        match self {
            ListBody::Paginated(page) => page.results,
            ListBody::Plain(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_server_routes() {
        assert_eq!(ResourceKind::NonNegotiable.path(), "non-negotiables");
        assert_eq!(ResourceKind::Person.path(), "people");
        assert_eq!(ResourceKind::Reflection.path(), "reflections");
    }

    #[test]
    fn kpi_and_obstacle_invalidate_goals() {
        assert_eq!(ResourceKind::Kpi.invalidates(), &[ResourceKind::Goal]);
        assert_eq!(ResourceKind::Obstacle.invalidates(), &[ResourceKind::Goal]);
        assert!(ResourceKind::Goal.invalidates().is_empty());
    }

    #[test]
    fn list_body_accepts_both_shapes() {
        let paginated: ListBody<i32> =
            serde_json::from_str(r#"{"count":2,"next":null,"previous":null,"results":[1,2]}"#)
                .unwrap();
        let plain: ListBody<i32> = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(paginated.into_results(), vec![1, 2]);
        assert_eq!(plain.into_results(), vec![1, 2]);
    }
}
