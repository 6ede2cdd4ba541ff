//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the learning algorithms and
//! everything they collaborate with. The traits are owned by the domain and
//! implemented by callers: environments by simulation code, observers by
//! reporting code.

pub mod environment;
pub mod observer;

pub use environment::{Environment, Step};
pub use observer::TrainingObserver;
