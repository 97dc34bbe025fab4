//! Hashing collections used for walk bookkeeping.
//!
//! Keys are small integers on a single thread, so the default build uses
//! `rustc-hash`. The `std-hash` feature swaps back to the standard hasher.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
}
