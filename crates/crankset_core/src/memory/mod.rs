//! # Memory Management
//!
//! Pre-allocated pools for zero-allocation ticks.
//!
//! ## Design Philosophy
//!
//! All memory is allocated once at startup. During a tick:
//! - No heap allocations
//! - Slots are recycled by flipping a liveness flag
//! - Handles are slot indices, never addresses

mod pool;

pub use pool::{ActiveHandles, ComponentPool, Handle};
