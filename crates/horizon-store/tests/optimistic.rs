//! Optimistic mutation behavior
//!
//! The properties that make the store trustworthy: exactly one
//! provisional entry while a create is in flight, exact snapshot
//! restoration on failure, write-through on update, and the KPI/obstacle
//! edge that invalidates cached goals.
//!
//! Tests run with paused time; a gated mock call parks, timers
//! auto-advance, and the cache can be observed mid-mutation without
//! sleeping.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Notify;
use tokio::time::timeout;

use horizon_core::{
    Goal, GoalPatch, Kpi, NewGoal, NewKpi, NewObstacle, Obstacle, Resource, ResourceKind,
};
use horizon_store::{MockClient, QueryCache, ResourceStore};

fn goal(id: i64, title: &str) -> Goal {
    Goal::synthesize(
        &NewGoal {
            title: title.into(),
            ..Default::default()
        },
        id,
        Utc::now(),
    )
}

fn goal_store(
    seeds: Vec<Goal>,
) -> (
    MockClient<Goal>,
    QueryCache,
    ResourceStore<Goal, MockClient<Goal>>,
) {
    let client = MockClient::seeded(seeds);
    let cache = QueryCache::with_defaults();
    let store = ResourceStore::new(client.clone(), cache.clone());
    (client, cache, store)
}

const GOALS_KEY: &str = "goals";

#[tokio::test(start_paused = true)]
async fn create_adds_exactly_one_provisional_entry_while_in_flight() {
    let (client, cache, store) = goal_store(vec![goal(1, "Seed")]);
    store.list().await.unwrap();

    let gate = Arc::new(Notify::new());
    client.gate_with(gate.clone());

    let create = store.create(NewGoal {
        title: "Brand new".into(),
        ..Default::default()
    });
    tokio::pin!(create);

    // Parked at the gate: the network call has not resolved.
    assert!(
        timeout(Duration::from_millis(20), &mut create).await.is_err(),
        "create should still be waiting on the server"
    );

    let mid_flight: Vec<Goal> = cache.get(GOALS_KEY).await.unwrap();
    assert_eq!(mid_flight.len(), 2);
    let provisional: Vec<&Goal> = mid_flight.iter().filter(|g| g.id < 0).collect();
    assert_eq!(provisional.len(), 1, "exactly one provisional entry");
    assert_eq!(provisional[0].title, "Brand new");

    gate.notify_one();
    let created = create.await.unwrap();
    client.clear_gate();
    assert!(created.id > 0);

    // The list entry was invalidated; the refetch is authoritative.
    assert!(cache.get::<Vec<Goal>>(GOALS_KEY).await.is_none());
    let after = store.list().await.unwrap();
    assert_eq!(after.len(), 2);
    assert!(after.iter().all(|g| g.id > 0), "no provisional ids survive");
    assert_eq!(after.iter().filter(|g| g.title == "Brand new").count(), 1);
}

#[tokio::test]
async fn create_failure_restores_the_exact_snapshot() {
    let (client, cache, store) = goal_store(vec![goal(1, "Seed"), goal(2, "Other")]);
    store.list().await.unwrap();
    let before = cache.snapshot(GOALS_KEY).await;

    client.fail_next();
    let err = store
        .create(NewGoal {
            title: "Doomed".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));

    assert_eq!(cache.snapshot(GOALS_KEY).await, before, "no partial writes");
    let list: Vec<Goal> = cache.get(GOALS_KEY).await.unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|g| g.id > 0));
    // The server never saw the record either.
    assert_eq!(client.records().len(), 2);
}

#[tokio::test]
async fn create_without_a_cached_list_skips_the_provisional_insert() {
    let (_client, cache, store) = goal_store(vec![goal(1, "Seed")]);

    let created = store
        .create(NewGoal {
            title: "Cold cache".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(created.id > 0);
    // Nothing was cached before, nothing is cached after.
    assert!(cache.get::<Vec<Goal>>(GOALS_KEY).await.is_none());
}

#[tokio::test(start_paused = true)]
async fn update_patches_list_and_item_entries_immediately() {
    let (client, cache, store) = goal_store(vec![goal(1, "Before")]);
    store.list().await.unwrap();
    store.get(1).await.unwrap();

    let gate = Arc::new(Notify::new());
    client.gate_with(gate.clone());

    let update = store.update(
        1,
        GoalPatch {
            title: Some("After".into()),
            ..Default::default()
        },
    );
    tokio::pin!(update);
    assert!(timeout(Duration::from_millis(20), &mut update).await.is_err());

    let list: Vec<Goal> = cache.get(GOALS_KEY).await.unwrap();
    assert_eq!(list[0].title, "After");
    let item: Goal = cache.get("goals/1").await.unwrap();
    assert_eq!(item.title, "After");

    gate.notify_one();
    let updated = update.await.unwrap();
    client.clear_gate();
    assert_eq!(updated.title, "After");

    // Authoritative write-through on the item, invalidation on the list.
    let item: Goal = cache.get("goals/1").await.unwrap();
    assert_eq!(item.title, "After");
    assert!(cache.get::<Vec<Goal>>(GOALS_KEY).await.is_none());
}

#[tokio::test]
async fn update_failure_restores_both_entries() {
    let (client, cache, store) = goal_store(vec![goal(1, "Before")]);
    store.list().await.unwrap();
    store.get(1).await.unwrap();
    let list_before = cache.snapshot(GOALS_KEY).await;
    let item_before = cache.snapshot("goals/1").await;

    client.fail_next();
    store
        .update(
            1,
            GoalPatch {
                title: Some("After".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(cache.snapshot(GOALS_KEY).await, list_before);
    assert_eq!(cache.snapshot("goals/1").await, item_before);
    let item: Goal = cache.get("goals/1").await.unwrap();
    assert_eq!(item.title, "Before");
}

#[tokio::test(start_paused = true)]
async fn delete_removes_the_record_immediately() {
    let (client, cache, store) = goal_store(vec![goal(1, "Keep"), goal(2, "Drop")]);
    store.list().await.unwrap();
    store.get(2).await.unwrap();

    let gate = Arc::new(Notify::new());
    client.gate_with(gate.clone());

    let delete = store.delete(2);
    tokio::pin!(delete);
    assert!(timeout(Duration::from_millis(20), &mut delete).await.is_err());

    let mid_flight: Vec<Goal> = cache.get(GOALS_KEY).await.unwrap();
    assert_eq!(mid_flight.len(), 1);
    assert_eq!(mid_flight[0].id, 1);
    assert!(cache.get::<Goal>("goals/2").await.is_none());

    gate.notify_one();
    delete.await.unwrap();
    client.clear_gate();
    assert_eq!(client.records().len(), 1);
}

#[tokio::test]
async fn delete_failure_restores_both_entries() {
    let (client, cache, store) = goal_store(vec![goal(1, "Keep"), goal(2, "Drop")]);
    store.list().await.unwrap();
    store.get(2).await.unwrap();
    let list_before = cache.snapshot(GOALS_KEY).await;
    let item_before = cache.snapshot("goals/2").await;

    client.fail_next();
    store.delete(2).await.unwrap_err();

    assert_eq!(cache.snapshot(GOALS_KEY).await, list_before);
    assert_eq!(cache.snapshot("goals/2").await, item_before);
    assert_eq!(cache.get::<Vec<Goal>>(GOALS_KEY).await.unwrap().len(), 2);
}

#[tokio::test]
async fn kpi_mutations_invalidate_cached_goals() {
    let cache = QueryCache::with_defaults();
    let kpis: ResourceStore<Kpi, MockClient<Kpi>> =
        ResourceStore::new(MockClient::new(), cache.clone());

    // A goals page has data cached, list and item both.
    cache.put(&QueryCache::list_key(ResourceKind::Goal), &vec![goal(1, "G")]).await;
    cache.put(&QueryCache::item_key(ResourceKind::Goal, 1), &goal(1, "G")).await;

    kpis.create(NewKpi {
        goal: 1,
        name: "Weekly mileage".into(),
        target_value: 40.0,
        unit: "km".into(),
        ..Default::default()
    })
    .await
    .unwrap();

    // Goal progress is server-derived from KPIs; both entries are stale.
    assert!(cache.get::<Vec<Goal>>("goals").await.is_none());
    assert!(cache.get::<Goal>("goals/1").await.is_none());
}

#[tokio::test]
async fn obstacle_mutations_invalidate_cached_goals() {
    let cache = QueryCache::with_defaults();
    let obstacles: ResourceStore<Obstacle, MockClient<Obstacle>> =
        ResourceStore::new(MockClient::new(), cache.clone());

    cache.put("goals", &vec![goal(1, "G")]).await;

    let created = obstacles
        .create(NewObstacle {
            goal: Some(1),
            title: "Injury risk".into(),
            mitigation: "Strength work twice a week".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(created.id > 0);
    assert!(cache.get::<Vec<Goal>>("goals").await.is_none());
}

#[tokio::test]
async fn failed_kpi_mutation_leaves_cached_goals_alone() {
    let cache = QueryCache::with_defaults();
    let client: MockClient<Kpi> = MockClient::new();
    let kpis = ResourceStore::new(client.clone(), cache.clone());

    cache.put("goals", &vec![goal(1, "G")]).await;

    client.fail_next();
    kpis.create(NewKpi {
        goal: 1,
        name: "Doomed".into(),
        target_value: 1.0,
        unit: "x".into(),
        ..Default::default()
    })
    .await
    .unwrap_err();

    // Related invalidation only happens on success.
    assert!(cache.get::<Vec<Goal>>("goals").await.is_some());
}
