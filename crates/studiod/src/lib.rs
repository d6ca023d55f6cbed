//! Rewrite Studio daemon library - exposes modules for testing.

pub mod page;
pub mod routes;
pub mod server;
