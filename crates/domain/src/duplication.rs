use crate::{CreateError, PlanID, ReadError, StorageError, WeekNumber};

#[allow(async_fn_in_trait)]
pub trait DuplicationService {
    /// Copies all days of `from` — sections, exercises and alternatives
    /// included — into `to` with fresh ids. Alternatives in the copy point to
    /// the copied primaries, never to rows of the source week. A source week
    /// without days is a no-op.
    async fn duplicate_week(
        &self,
        plan_id: PlanID,
        from: WeekNumber,
        to: WeekNumber,
    ) -> Result<WeekDuplication, DuplicationError>;
}

/// Rows created by one duplication run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WeekDuplication {
    pub days: usize,
    pub sections: usize,
    pub exercises: usize,
    pub alternatives: usize,
}

impl WeekDuplication {
    #[must_use]
    pub fn total(&self) -> usize {
        self.days + self.sections + self.exercises + self.alternatives
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DuplicationError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The duplication failed and the cleanup of the rows created by the
    /// failed run did not complete either. `remaining` rows of the target
    /// week are left behind.
    #[error("Week duplication aborted, {remaining} of {created} copied rows could not be removed")]
    Partial { created: usize, remaining: usize },
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for DuplicationError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound => DuplicationError::Other(Box::new(ReadError::NotFound)),
            ReadError::Storage(storage) => DuplicationError::Storage(storage),
            ReadError::Other(other) => DuplicationError::Other(other),
        }
    }
}

impl From<CreateError> for DuplicationError {
    fn from(value: CreateError) -> Self {
        match value {
            CreateError::Storage(storage) => DuplicationError::Storage(storage),
            CreateError::Other(other) => DuplicationError::Other(other),
            other => DuplicationError::Other(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_week_duplication_total() {
        assert_eq!(WeekDuplication::default().total(), 0);
        assert_eq!(
            WeekDuplication {
                days: 2,
                sections: 3,
                exercises: 5,
                alternatives: 4,
            }
            .total(),
            14
        );
    }

    #[test]
    fn test_duplication_error_from_read_error() {
        assert!(matches!(
            DuplicationError::from(ReadError::Storage(StorageError::NoConnection)),
            DuplicationError::Storage(StorageError::NoConnection)
        ));
        assert!(matches!(
            DuplicationError::from(ReadError::Other("foo".into())),
            DuplicationError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_duplication_error_from_create_error() {
        assert!(matches!(
            DuplicationError::from(CreateError::Storage(StorageError::NoConnection)),
            DuplicationError::Storage(StorageError::NoConnection)
        ));
        assert!(matches!(
            DuplicationError::from(CreateError::NotFound),
            DuplicationError::Other(error) if error.to_string() == "not found"
        ));
    }
}
