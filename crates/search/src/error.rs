use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("{what} must not be empty")]
    EmptyQuery { what: &'static str },
}

/// Reject empty or whitespace-only targets before any resolution runs.
///
/// Returns the trimmed query on success.
pub fn require_query<'a>(query: &'a str, what: &'static str) -> Result<&'a str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SearchError::EmptyQuery { what });
    }
    Ok(trimmed)
}
