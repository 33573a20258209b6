//! # Horizon Core
//!
//! Domain records for the Strategic Horizon planning service.
//!
//! Every record mirrors a REST resource on the server: a numeric `id`,
//! descriptive fields, status enums, and `created_at`/`updated_at`
//! timestamps. The server is the authority for all of them; the client
//! never enforces relationships beyond carrying the foreign-key ids.
//!
//! ## Quick Start
//!
//! ```rust
//! use horizon_core::{NewGoal, Resource, ResourceKind};
//! use chrono::Utc;
//!
//! let draft = NewGoal {
//!     vision: Some(1),
//!     title: "Ship the beta".into(),
//!     ..Default::default()
//! };
//!
//! // A provisional record, the way the cache sees it before the server
//! // confirms the create.
//! let goal = horizon_core::Goal::synthesize(&draft, -42, Utc::now());
//! assert_eq!(goal.id, -42);
//! assert_eq!(horizon_core::Goal::KIND, ResourceKind::Goal);
//! ```

pub mod auth;
pub mod execution;
pub mod goal;
pub mod kpi;
pub mod non_negotiable;
pub mod obstacle;
pub mod person;
pub mod reflection;
pub mod resource;
pub mod system;
pub mod vision;

pub use auth::{Credentials, RefreshRequest, RefreshResponse, TokenPair};
pub use execution::{Execution, ExecutionPatch, ExecutionStatus, NewExecution};
pub use goal::{Goal, GoalPatch, GoalStatus, NewGoal};
pub use kpi::{Kpi, KpiPatch, NewKpi};
pub use non_negotiable::{Frequency, NewNonNegotiable, NonNegotiable, NonNegotiablePatch};
pub use obstacle::{NewObstacle, Obstacle, ObstaclePatch, Severity};
pub use person::{NewPerson, Person, PersonPatch, PersonRole};
pub use reflection::{NewReflection, QuarterlyReflection, ReflectionPatch};
pub use resource::{ListBody, Paginated, Resource, ResourceKind};
pub use system::{NewSystem, System, SystemPatch};
pub use vision::{NewVision, Vision, VisionPatch};
