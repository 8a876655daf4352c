use thiserror::Error;
use vs_core::{CoreError, PrecinctId, Tick};

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("precinct {precinct} has no expected voters")]
    NoExpectedVoters { precinct: PrecinctId },

    #[error("station count must be at least one")]
    NoStations,

    #[error("trial stalled at {second}: {pending} pending, {in_service} in service")]
    TrialStalled {
        second:     Tick,
        pending:    usize,
        in_service: usize,
    },
}

pub type SimResult<T> = Result<T, SimError>;
