//! Internal error taxonomy.
//!
//! Nothing here crosses the facade boundary: every `native_*` function
//! converts a `FilterError` into the typed failure value documented for
//! that call (`false`, `None`, or simply the no-op) before it ever
//! reaches a caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("input was empty where content was required")]
    EmptyInput,

    #[error("engine was queried before initialize() was called")]
    NotInitialized,

    #[error("filter list contained no valid rules")]
    NoValidRules,

    #[error("failed to compile pattern `{pattern}`: {source}")]
    PatternCompilation {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, FilterError>;
