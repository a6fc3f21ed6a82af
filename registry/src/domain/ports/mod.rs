//! Domain ports defining the edges of the hexagon.
//!
//! The registry reaches storage only through these traits. Each port exposes
//! a strongly typed error so adapters map their failures into predictable
//! variants instead of leaking driver errors into the domain.

mod macros;
pub(crate) use macros::define_port_error;

mod registry_store;

#[cfg(test)]
pub use registry_store::MockRegistryStore;
pub use registry_store::{RegistryStore, RegistryStoreError};
