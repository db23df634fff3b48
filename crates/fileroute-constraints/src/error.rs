use thiserror::Error;

/// Errors raised by constraint evaluation and registration
///
/// These signal misuse by the routing integration. Request data that fails a
/// constraint is never an error; it is a `false` match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// A runtime match was requested without naming the parameter
    #[error("route constraint invoked without a parameter name")]
    MissingParameterName,

    /// A template referenced a constraint name nobody registered
    #[error("unknown route constraint `{0}`")]
    UnknownConstraint(String),

    /// A pattern constraint could not be compiled
    #[error("invalid pattern for route constraint `{name}`: {message}")]
    InvalidPattern { name: String, message: String },
}
