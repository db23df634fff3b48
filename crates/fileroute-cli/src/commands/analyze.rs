use std::process::ExitCode;

use anyhow::Result;
use clap::ValueEnum;
use fileroute_router::RouteDiagnostic;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render(diagnostics: &[RouteDiagnostic], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(diagnostics)?),
        OutputFormat::Text if diagnostics.is_empty() => Ok("no problems found".to_string()),
        OutputFormat::Text => Ok(diagnostics
            .iter()
            .map(|diagnostic| format!("{}: {}", diagnostic.severity(), diagnostic))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Exits with failure when any diagnostic is an error
pub fn run(config: &Config, format: OutputFormat) -> Result<ExitCode> {
    let router = config.build_router()?;
    let diagnostics = router.analyze();

    println!("{}", render(&diagnostics, format)?);

    Ok(if diagnostics.iter().any(RouteDiagnostic::is_error) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn overlap() -> RouteDiagnostic {
        RouteDiagnostic::LiteralOverlap {
            literal_pattern: "/favicon.ico".to_string(),
            parameter_pattern: "/*path".to_string(),
            parameter: "path".to_string(),
            constraint: "file".to_string(),
            literal: "favicon.ico".to_string(),
        }
    }

    #[test]
    fn test_render_text() {
        assert_eq!(render(&[], OutputFormat::Text).unwrap(), "no problems found");
        assert_eq!(
            render(&[overlap()], OutputFormat::Text).unwrap(),
            "warning: /favicon.ico: `favicon.ico` is also accepted by `path` in /*path (constraint `file`)"
        );
    }

    #[test]
    fn test_render_json() {
        let json = render(&[overlap()], OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["kind"], "literal_overlap");
        assert_eq!(parsed[0]["literal"], "favicon.ico");
    }

    #[test]
    fn test_default_config_is_clean() {
        let router = Config::default().build_router().unwrap();
        assert!(router.analyze().is_empty());
    }
}
