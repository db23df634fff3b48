//! # fileroute constraints
//!
//! Route parameter constraints that let a router decide between serving a
//! static file and dispatching to a dynamic handler.
//!
//! The centre of the crate is [`is_file_name`], a syntactic classifier: a
//! value "looks like" a file name when its last `/`-separated segment has a
//! dot followed by at least one non-dot character. It is exposed to routers
//! through the `file` and `nonfile` constraints.
//!
//! ## Two ways to ask
//!
//! - **Runtime**: [`RouteConstraint::matches`] looks the parameter up in
//!   [`RouteValues`], coerces it to text and classifies it. Missing values are
//!   a `false` match, never an error.
//! - **Literal**: [`RouteConstraint::matches_literal`] classifies a literal
//!   template segment while routes are analyzed at startup.
//!
//! Both go through the same validation, so they always agree.
//!
//! ## Example
//!
//! ```
//! use fileroute_constraints::{ConstraintMap, RouteDirection, RouteValues};
//!
//! let constraints = ConstraintMap::default();
//! let file = constraints.resolve("file").unwrap();
//!
//! let values = RouteValues::new().with("file", "report.pdf");
//! assert_eq!(file.matches(None, "file", &values, RouteDirection::IncomingRequest), Ok(true));
//!
//! let empty = RouteValues::new();
//! assert_eq!(file.matches(None, "file", &empty, RouteDirection::IncomingRequest), Ok(false));
//!
//! assert!(!file.matches_literal("file", "images/"));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod constraint;
mod error;
mod file_name;
mod registry;
mod value;

pub use constraint::{
    value_text, ParameterConstraint, PatternConstraint, RequestContext, RouteConstraint,
    RouteDirection,
};
pub use error::ConstraintError;
pub use file_name::is_file_name;
pub use registry::{ConstraintMap, ConstraintRef};
pub use value::{RouteValue, RouteValues};
