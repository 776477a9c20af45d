//! HTTP handler modules, one per resource.

pub mod devices;
pub mod import;
pub mod products;
