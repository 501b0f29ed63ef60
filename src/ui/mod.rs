use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod theme;

pub use spinner::Spinner;
pub use theme::Style;

/// Runs an interactive flow, returning `Ok(None)` if the user backed out
/// with Ctrl+C or Escape.
pub fn interactive<T, F>(flow: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match flow() {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.downcast_ref::<InquireError>().is_some_and(is_cancel) => Ok(None),
        Err(e) => Err(e),
    }
}

const fn is_cancel(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_flow_returns_value() {
        assert_eq!(interactive(|| Ok(3)).unwrap_or_default(), Some(3));
    }

    #[test]
    fn test_escape_and_ctrl_c_are_not_errors() {
        for err in [
            InquireError::OperationCanceled,
            InquireError::OperationInterrupted,
        ] {
            let result = interactive::<(), _>(|| Err(err.into()));
            assert!(matches!(result, Ok(None)));
        }
    }

    #[test]
    fn test_other_errors_propagate() {
        let result = interactive::<(), _>(|| Err(anyhow::anyhow!("disk full")));
        let Err(err) = result else {
            panic!("expected an error");
        };
        assert!(err.to_string().contains("disk full"));
        assert!(!is_cancel(&InquireError::Custom("test".into())));
    }
}
