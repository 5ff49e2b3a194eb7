//! HealthGuard: the in-memory core of a role-gated community health
//! monitoring dashboard. Two independent stores (access control, case
//! aggregation) plus the route guard that gates the view layer.

pub mod auth;
pub mod guard;
pub mod health_data;
pub mod models;
pub mod report;
pub mod seed;
pub mod utils;
