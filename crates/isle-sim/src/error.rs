use thiserror::Error;

/// Why a spawn attempt produced nothing. Never fatal; the scheduler retries
/// on its next interval.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("map too small for inset spawn bounds")]
    Degenerate,
    #[error("no eligible column after {attempts} attempts")]
    NoEligibleColumn { attempts: usize },
    #[error("population cap {max} reached")]
    AtCapacity { max: usize },
}
