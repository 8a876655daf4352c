//! `vs-sim`: precinct queueing simulation and station-count search.
//!
//! # Per-precinct search
//!
//! ```text
//! for stations in StationBounds::for_precinct(..):
//!   for iteration in 0..config.iterations:
//!     ① Arrivals: ArrivalGenerator draws a fresh voter population.
//!     ② Trial:    second by second until everyone is done,
//!                 completions free their stations,
//!                 then arrived voters take the lowest free stations.
//!     ③ Stats:    mean/dev wait and toolong counts over expected voters;
//!                 waits folded into the candidate's histogram.
//!   accept `stations` if no iteration had a toolong voter.
//! ```
//!
//! # Crate layout
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`arrivals`]     | `ArrivalGenerator`                                    |
//! | [`time_queue`]   | `TimeQueue<T>` time-keyed FIFO multimap               |
//! | [`stations`]     | `StationPool`                                         |
//! | [`trial`]        | `Trial`, `run_trial`                                  |
//! | [`histogram`]    | `WaitHistogram`, `HistogramRow`                       |
//! | [`stats`]        | `IterationSummary`, `summarize`                       |
//! | [`search`]       | `StationCountSearch`, `StationBounds`, outcomes       |
//! | [`observer`]     | `SearchObserver`, `NoopObserver`, `EventLog`          |
//! | [`runner`]       | `Runner`, `StreamPolicy`, `RunSummary`                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Searches precincts on Rayon's thread pool under             |
//! |            | `StreamPolicy::PerPrecinct`.                               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vs_sim::{NoopObserver, Runner};
//!
//! let summary = Runner::new(&config)?.run(&precincts, &mut NoopObserver)?;
//! for outcome in &summary.outcomes {
//!     println!("{}: {:?}", outcome.precinct, outcome.accepted);
//! }
//! ```

pub mod arrivals;
pub mod error;
pub mod histogram;
pub mod observer;
pub mod runner;
pub mod search;
pub mod stations;
pub mod stats;
pub mod time_queue;
pub mod trial;


pub use arrivals::ArrivalGenerator;
pub use error::{SimError, SimResult};
pub use histogram::{HistogramRow, WaitHistogram};
pub use observer::{EventLog, NoopObserver, SearchEvent, SearchObserver};
pub use runner::{RunSummary, Runner, SkipReason, StreamPolicy};
pub use search::{CandidateBatch, SearchOutcome, StationBounds, StationCountSearch};
pub use stations::StationPool;
pub use stats::{IterationSummary, TooLongCounts};
pub use time_queue::TimeQueue;
pub use trial::{run_trial, Trial};
