use crate::db::QueryError;

/// Outcome of one aggregate query, as the view sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset<T> {
    Rows(Vec<T>),
    Empty,
    Failed(String),
}

impl<T> Dataset<T> {
    pub fn from_result(result: Result<Vec<T>, QueryError>) -> Self {
        match result {
            Ok(rows) if rows.is_empty() => Dataset::Empty,
            Ok(rows) => Dataset::Rows(rows),
            Err(e) => Dataset::Failed(e.to_string()),
        }
    }

    /// Rows to render; empty for both `Empty` and `Failed`.
    pub fn rows(&self) -> &[T] {
        match self {
            Dataset::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Dataset::Rows(_) => "ok",
            Dataset::Empty => "empty",
            Dataset::Failed(_) => "failed",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Dataset::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Dataset::Failed(_))
    }
}
