//! One module per page of the app

pub mod dashboard;
pub mod executions;
pub mod goals;
pub mod kpis;
pub mod login;
pub mod non_negotiables;
pub mod obstacles;
pub mod people;
pub mod reflections;
pub mod systems;
pub mod vision;
