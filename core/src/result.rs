//! The outcome type every operation in this crate completes with.

use crate::error::ApiError;

/// Either the requested value or the single `ApiError` explaining why not.
pub type ApiResult<T> = Result<T, ApiError>;

/// Run a fallible computation and capture its outcome as an `ApiResult`.
///
/// Any error type convertible into `ApiError` is accepted, so parser
/// failures can be folded into the uniform error shape in one step.
pub fn capture<T, E, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<ApiError>,
{
    f().map_err(Into::into)
}
