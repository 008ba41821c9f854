// DeliverySleuth - app/mod.rs
//
// Application layer: file handling and orchestration around the core loop.
// Dependencies: core layer.

pub mod evaluator;
