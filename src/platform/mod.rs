//! Platform abstraction layer
//!
//! Browser-only glue around the simulation:
//! - Storage (LocalStorage)
//! - Network (catalog fetch, result submission)
//! - JS bindings driven by the presentation layer

#[cfg(target_arch = "wasm32")]
pub mod bindings;
#[cfg(target_arch = "wasm32")]
pub mod net;
#[cfg(target_arch = "wasm32")]
pub mod storage;
