// DeliverySleuth - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: platform, app, or touch the filesystem directly.

pub mod classify;
pub mod evaluate;
pub mod export;
pub mod model;
pub mod parser;
