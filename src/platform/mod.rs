// DeliverySleuth - platform/mod.rs
//
// Platform abstraction layer: config directory resolution, config.toml.
// Dependencies: standard library, directories crate, core::export for
// output format names.

pub mod config;
