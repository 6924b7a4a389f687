//! The two user-facing surfaces
//!
//! Neither surface holds platform handles: the store, speech driver and
//! prompt are passed into each operation, and the surfaces only talk to
//! each other through the store.

pub mod admin;
pub mod learner;

pub use admin::{AdminSurface, SettingField};
pub use learner::{AdvanceOutcome, LearnerSurface};
