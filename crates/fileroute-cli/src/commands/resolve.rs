use std::process::ExitCode;

use anyhow::Result;
use fileroute_router::{Dispatch, RouteMatch};

use crate::config::Config;

fn describe_params(route_match: &RouteMatch) -> String {
    let mut params: Vec<String> = route_match
        .params
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();
    params.sort();
    params.join(" ")
}

/// One line per path: `<path> -> <decision>`
pub fn describe(path: &str, dispatch: &Dispatch) -> String {
    match dispatch {
        Dispatch::StaticFile { file, .. } => format!("{} -> file {}", path, file.display()),
        Dispatch::Handler(route_match) => {
            let route = &route_match.route;
            let label = route.name.as_deref().unwrap_or(&route.pattern);
            let params = describe_params(route_match);

            if params.is_empty() {
                format!("{} -> handler {}", path, label)
            } else {
                format!("{} -> handler {} ({})", path, label, params)
            }
        }
        Dispatch::NotFound => format!("{} -> not found", path),
    }
}

pub fn run(config: &Config, paths: &[String]) -> Result<ExitCode> {
    let router = config.build_router()?;

    for path in paths {
        println!("{}", describe(path, &router.resolve(path)));
    }

    Ok(ExitCode::SUCCESS)
}
