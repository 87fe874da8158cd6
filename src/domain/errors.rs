// Domain-level errors for todo workflows.
#[derive(Debug, PartialEq, Eq)]
pub enum TodoError {
    NotFound(i64),
    StorageFailure,
}
