use std::fmt;
use std::process::ExitCode;

use anyhow::{Context, Result};
use fileroute_constraints::{ConstraintError, RouteConstraint, RouteDirection, RouteValues};
use tracing::warn;

use crate::config::Config;

const PARAMETER: &str = "value";

/// Result of running one value through both sides of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Value-match side, as evaluated for an incoming request
    pub request: bool,
    /// Literal-match side, as evaluated when a route is registered
    pub literal: bool,
}

impl Outcome {
    pub fn agrees(&self) -> bool {
        self.request == self.literal
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.request, self.literal) {
            (true, true) => f.write_str("match"),
            (false, false) => f.write_str("no match"),
            (request, literal) => write!(f, "MISMATCH (request={}, literal={})", request, literal),
        }
    }
}

pub fn evaluate(constraint: &dyn RouteConstraint, value: &str) -> Result<Outcome, ConstraintError> {
    let values = RouteValues::new().with(PARAMETER, value);
    let request = constraint.matches(None, PARAMETER, &values, RouteDirection::IncomingRequest)?;
    let literal = constraint.matches_literal(PARAMETER, value);

    Ok(Outcome { request, literal })
}

pub fn run(config: &Config, constraint: &str, values: &[String]) -> Result<ExitCode> {
    let constraints = config.constraint_map()?;
    let resolved = constraints
        .resolve(constraint)
        .with_context(|| {
            let known: Vec<&str> = constraints.names().collect();
            format!("Unknown constraint `{}` (known: {})", constraint, known.join(", "))
        })?;

    let mut disagreements = 0;
    for value in values {
        let outcome = evaluate(&*resolved, value)?;
        if !outcome.agrees() {
            warn!(constraint, value = %value, "constraint sides disagree");
            disagreements += 1;
        }
        println!("{:<10} {}", outcome.to_string(), value);
    }

    Ok(if disagreements == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
