//! All nine stores over one shared cache

use horizon_api::{Api, RestClient};
use horizon_core::{
    Execution, Goal, Kpi, NonNegotiable, Obstacle, Person, QuarterlyReflection, System, Vision,
};

use crate::cache::QueryCache;
use crate::store::ResourceStore;

/// Store over the HTTP-backed client for one resource kind.
pub type HttpStore<R> = ResourceStore<R, RestClient<R>>;

/// One store per resource, all sharing one [`QueryCache`]. Mutating a
/// KPI through `kpis` invalidates what `goals` has cached, because the
/// cache is shared.
#[derive(Debug)]
pub struct Stores {
    cache: QueryCache,
    pub visions: HttpStore<Vision>,
    pub goals: HttpStore<Goal>,
    pub kpis: HttpStore<Kpi>,
    pub non_negotiables: HttpStore<NonNegotiable>,
    pub systems: HttpStore<System>,
    pub people: HttpStore<Person>,
    pub executions: HttpStore<Execution>,
    pub obstacles: HttpStore<Obstacle>,
    pub reflections: HttpStore<QuarterlyReflection>,
}

impl Stores {
    pub fn new(api: &Api) -> Self {
        Self::with_cache(api, QueryCache::with_defaults())
    }

    pub fn with_cache(api: &Api, cache: QueryCache) -> Self {
        Self {
            visions: ResourceStore::new(api.visions.clone(), cache.clone()),
            goals: ResourceStore::new(api.goals.clone(), cache.clone()),
            kpis: ResourceStore::new(api.kpis.clone(), cache.clone()),
            non_negotiables: ResourceStore::new(api.non_negotiables.clone(), cache.clone()),
            systems: ResourceStore::new(api.systems.clone(), cache.clone()),
            people: ResourceStore::new(api.people.clone(), cache.clone()),
            executions: ResourceStore::new(api.executions.clone(), cache.clone()),
            obstacles: ResourceStore::new(api.obstacles.clone(), cache.clone()),
            reflections: ResourceStore::new(api.reflections.clone(), cache.clone()),
            cache,
        }
    }

    /// The shared cache.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }
}
