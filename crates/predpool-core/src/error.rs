//! predpool error types.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A replica's predictor failed to build at dispatcher construction.
    /// Fatal — the dispatcher is never handed out in this state.
    Construction(String),
    /// The task pool refused a drain job (queue full or shut down).
    /// The affected submission was not accepted; resubmit if desired.
    SubmissionRejected,
    /// The predictor failed on one input. Carried on that task's handle
    /// only; sibling tasks and the dispatcher are unaffected.
    Predict(String),
    /// The producing side of a completion handle went away without
    /// resolving it. Waiting on such a handle returns this instead of
    /// blocking forever.
    HandleBroken,
    /// Operation attempted on a shut-down pool.
    Shutdown,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construction(msg) => write!(f, "replica construction failed: {}", msg),
            Self::SubmissionRejected => write!(f, "task pool rejected submission"),
            Self::Predict(msg) => write!(f, "prediction failed: {}", msg),
            Self::HandleBroken => write!(f, "completion handle broken"),
            Self::Shutdown => write!(f, "pool is shut down"),
        }
    }
}

impl std::error::Error for PoolError {}

pub type Result<T> = std::result::Result<T, PoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = PoolError::SubmissionRejected;
        assert_eq!(format!("{}", e), "task pool rejected submission");

        let e = PoolError::Construction("bad model path".into());
        assert_eq!(
            format!("{}", e),
            "replica construction failed: bad model path"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_err(_: &dyn std::error::Error) {}
        takes_err(&PoolError::HandleBroken);
    }
}
