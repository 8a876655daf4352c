//! `vs-input`: loading the election configuration and precinct list.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`loader`]    | `load_election`, per-file loaders, `*_reader` variants     |
//! | [`error`]     | `InputError`, `InputResult<T>`                             |
//!
//! # Input files
//!
//! | File              | Format | Becomes                                   |
//! |-------------------|--------|-------------------------------------------|
//! | configuration     | JSON   | [`vs_core::ElectionConfig`] (minus table) |
//! | service times     | CSV    | `ElectionConfig::service_times_secs`      |
//! | precincts         | CSV    | `Vec<vs_core::Precinct>`                  |
//!
//! Every loaded configuration is validated before it is returned, so the
//! simulator never sees a malformed one.

pub mod error;
pub mod loader;


pub use error::{InputError, InputResult};
pub use loader::{
    load_config_json, load_config_reader, load_election, load_precincts_csv,
    load_precincts_reader, load_service_times_csv, load_service_times_reader,
};
