//! `vs-core`: foundational types for the `votesim` precinct simulator.
//!
//! This crate is a dependency of every other `vs-*` crate.  It has no `vs-*`
//! dependencies and minimal external ones (`rand`, `rand_distr`, and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PrecinctId`, `StationId`, `VoterSeq`                 |
//! | [`time`]        | `Tick` (one simulated second)                         |
//! | [`rng`]         | `RandomSource` trait, `SimRng`                        |
//! | [`config`]      | `ElectionConfig` and its validation                   |
//! | [`precinct`]    | `Precinct` static attributes                          |
//! | [`voter`]       | `Voter` record                                        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `Tick`, and `Voter`. |

pub mod config;
pub mod error;
pub mod ids;
pub mod precinct;
pub mod rng;
pub mod time;
pub mod voter;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ElectionConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{PrecinctId, StationId, VoterSeq};
pub use precinct::Precinct;
pub use rng::{RandomSource, SimRng};
pub use time::Tick;
pub use voter::Voter;
