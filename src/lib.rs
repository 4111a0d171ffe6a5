// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: Postgres adapters
// - presentation: HTTP handlers and routing
// - application: use cases, ports and access policy
// - domain: users, projects and their state rules

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
