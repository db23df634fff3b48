use fileroute_constraints::ConstraintError;
use thiserror::Error;

/// Errors raised while building a router
///
/// Matching never fails; a path either resolves or it does not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("invalid route template `{template}`: {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("route `{pattern}` constrains `{parameter}` with unknown constraint `{constraint}`")]
    UnknownConstraint {
        pattern: String,
        parameter: String,
        constraint: String,
    },

    #[error("route `{pattern}` has a default for `{parameter}`, which is not one of its parameters")]
    UnknownDefault { pattern: String, parameter: String },

    #[error("static file route `{0}` has no parameter to map onto a file")]
    MissingFileParameter(String),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}
