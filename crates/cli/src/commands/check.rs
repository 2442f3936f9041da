use ordina_core::catalog::Catalog;
use ordina_core::config::{AppConfig, LoadOptions};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct ReadinessCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<ReadinessCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"check serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> CheckReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(ReadinessCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });

            match Catalog::load(&config.catalog.path) {
                Ok(catalog) => {
                    checks.push(ReadinessCheck {
                        name: "catalog_file",
                        status: CheckStatus::Pass,
                        details: format!(
                            "loaded {} products from `{}`",
                            catalog.len(),
                            config.catalog.path.display()
                        ),
                    });
                    checks.push(check_catalog_structure(&catalog));
                }
                Err(error) => {
                    checks.push(ReadinessCheck {
                        name: "catalog_file",
                        status: CheckStatus::Fail,
                        details: error.to_string(),
                    });
                    checks.push(ReadinessCheck {
                        name: "catalog_structure",
                        status: CheckStatus::Skipped,
                        details: "skipped because the catalog did not load".to_string(),
                    });
                }
            }
        }
        Err(error) => {
            checks.push(ReadinessCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(ReadinessCheck {
                name: "catalog_file",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(ReadinessCheck {
                name: "catalog_structure",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "check: all readiness checks passed".to_string()
    } else {
        "check: one or more readiness checks failed".to_string()
    };

    CheckReport { overall_status, summary, checks }
}

fn check_catalog_structure(catalog: &Catalog) -> ReadinessCheck {
    let violations = catalog.validate();
    if violations.is_empty() {
        return ReadinessCheck {
            name: "catalog_structure",
            status: CheckStatus::Pass,
            details: "all product definitions are well formed".to_string(),
        };
    }

    let details = violations
        .iter()
        .map(|violation| violation.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    ReadinessCheck { name: "catalog_structure", status: CheckStatus::Fail, details }
}

fn render_human(report: &CheckReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
