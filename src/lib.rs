//! lfukit: a constant-time LFU cache with least-recently-used tie-breaking.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
