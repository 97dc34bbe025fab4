//! Testing utilities and scripted hosts for Prowl.
//!
//! A walk needs a hierarchy, an asynchronous scroll/settle surface and a
//! click sink. [`FakeTree`] scripts all three deterministically so engine
//! behavior, including suspension and resumption, can be asserted without a
//! live UI.

pub mod fake_tree;
pub mod harness;
pub mod scopes;

pub use fake_tree::{ClickKind, FakeTree};
pub use harness::{pump, Recorder};
pub use scopes::FakeScopes;

pub mod prelude {
    pub use crate::fake_tree::{ClickKind, FakeTree};
    pub use crate::harness::{pump, Recorder};
    pub use crate::scopes::FakeScopes;
}
