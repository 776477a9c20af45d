//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod device_identity_repo;
pub mod product_repo;

pub use device_identity_repo::DeviceIdentityRepo;
pub use product_repo::ProductRepo;
