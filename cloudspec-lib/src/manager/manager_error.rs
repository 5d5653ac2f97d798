use crate::loader::PlanError;
use crate::preflight::PreflightError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    #[error("the manager has not been initiated")]
    NotInitiated,

    #[error("the manager has already been initiated")]
    AlreadyInitiated,

    #[error(transparent)]
    Preflight(#[from] PreflightError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}
