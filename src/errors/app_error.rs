use thiserror::Error;
use varmap_core::PairError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("usage: {0}")]
    Usage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Pairs(#[from] PairError),
    /// Error en modo forward tras haber aplicado ya `count` pares.
    #[error("{source}; {count} pair(s) already applied: {applied}")]
    PartiallyApplied {
        count: usize,
        applied: String,
        #[source]
        source: PairError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_variant_format() {
        let err = AppError::Config("bad mode".into());
        assert_eq!(err.to_string(), "configuration error: bad mode");
    }

    #[test]
    fn test_io_variant_from() {
        let io_err = std::io::Error::other("disk gone");
        let err: AppError = io_err.into();
        assert_eq!(err.to_string(), "IO error: disk gone");
    }

    #[test]
    fn test_pairs_variant_is_transparent() {
        let err: AppError = PairError::UnbalancedPairs { len: 1 }.into();
        assert!(err.to_string().starts_with("expected an even number of arguments, but got 1"));
    }

    #[test]
    fn test_partially_applied_format() {
        let err = AppError::PartiallyApplied {
            count: 1,
            applied: r#"{"a":1}"#.into(),
            source: PairError::UnbalancedPairs { len: 3 },
        };
        assert!(err.to_string().ends_with(r#"; 1 pair(s) already applied: {"a":1}"#));
    }
}
