use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use ordina_core::amount::AmountEdit;
use ordina_core::app::Storefront;
use ordina_core::cart::{CartLineId, OrderDraft};
use ordina_core::catalog::{Catalog, OptionId, ParamId, ProductId};
use ordina_core::config::{AppConfig, LoadOptions};
use serde::{Deserialize, Serialize};

use crate::commands::CommandResult;
use crate::view::TextView;

#[derive(Debug)]
pub struct OrderOptions {
    /// TOML script with the ordering steps to replay.
    pub script: PathBuf,
    /// Use the built-in demo catalog instead of the configured file.
    pub demo: bool,
    /// Emit only the machine-readable report.
    pub json: bool,
}

#[derive(Debug, Deserialize)]
struct OrderScript {
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Step {
    Select {
        product: String,
        param: String,
        option: String,
        #[serde(default = "default_selected")]
        selected: bool,
    },
    Amount {
        product: String,
        set: Option<String>,
        op: Option<StepOp>,
    },
    Expand {
        product: String,
    },
    Add {
        product: String,
    },
    LineAmount {
        line: usize,
        set: Option<String>,
        op: Option<StepOp>,
    },
    RemoveLine {
        line: usize,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StepOp {
    Increase,
    Decrease,
}

fn default_selected() -> bool {
    true
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum StepStatus {
    Ok,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum RunStatus {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
struct StepReport {
    index: usize,
    action: &'static str,
    status: StepStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct OrderReport {
    command: &'static str,
    status: RunStatus,
    summary: String,
    total_elapsed_ms: u64,
    steps: Vec<StepReport>,
    draft: OrderDraft,
}

pub fn run(options: OrderOptions) -> CommandResult {
    let started = Instant::now();

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "order",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let raw = match fs::read_to_string(&options.script) {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure(
                "order",
                "script_read",
                format!("failed to read `{}`: {error}", options.script.display()),
                3,
            );
        }
    };

    let script: OrderScript = match toml::from_str(&raw) {
        Ok(script) => script,
        Err(error) => {
            return CommandResult::failure(
                "order",
                "script_parse",
                format!("failed to parse `{}`: {error}", options.script.display()),
                3,
            );
        }
    };

    let catalog = if options.demo {
        crate::demo::demo_catalog()
    } else {
        match Catalog::load(&config.catalog.path) {
            Ok(catalog) => catalog,
            Err(error) => {
                return CommandResult::failure("order", "catalog_load", error.to_string(), 4);
            }
        }
    };

    let mut storefront = match Storefront::new(&catalog, &config, TextView::new()) {
        Ok(storefront) => storefront,
        Err(error) => {
            return CommandResult::failure("order", "wiring", error.to_string(), 5);
        }
    };

    tracing::info!(
        event_name = "cli.order.session_started",
        steps = script.steps.len(),
        demo = options.demo,
        "order session started"
    );

    let mut session_lines: Vec<CartLineId> = Vec::new();
    let mut steps = Vec::with_capacity(script.steps.len());
    for (position, step) in script.steps.iter().enumerate() {
        let index = position + 1;
        let action = action_name(step);
        tracing::debug!(event_name = "cli.order.step", index, action, "executing step");
        let (status, detail) = execute_step(&mut storefront, &mut session_lines, step);
        steps.push(StepReport { index, action, status, detail });
    }

    let passed = steps.iter().filter(|step| step.status == StepStatus::Ok).count();
    let total = steps.len();
    let failed = passed != total;
    tracing::info!(
        event_name = "cli.order.session_finished",
        passed,
        failed = total - passed,
        "order session finished"
    );

    let total_elapsed_ms = started.elapsed().as_millis() as u64;
    let report = OrderReport {
        command: "order",
        status: if failed { RunStatus::Fail } else { RunStatus::Pass },
        summary: format!("order: {passed}/{total} steps passed in {total_elapsed_ms}ms"),
        total_elapsed_ms,
        steps,
        draft: storefront.cart().order_draft(),
    };

    let machine = serde_json::to_string(&report).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"order\",\"status\":\"fail\",\"summary\":\"serialization failed\",\"error\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    });

    let output = if options.json {
        machine
    } else {
        let mut lines = vec![report.summary.clone()];
        for step in &report.steps {
            let marker = match step.status {
                StepStatus::Ok => "ok",
                StepStatus::Failed => "fail",
            };
            lines.push(format!("- [{marker}] {}: {}: {}", step.index, step.action, step.detail));
        }
        lines.push(storefront.view().render_cart());
        format!("{}\n{machine}", lines.join("\n"))
    };

    CommandResult { exit_code: if failed { 6 } else { 0 }, output }
}

fn action_name(step: &Step) -> &'static str {
    match step {
        Step::Select { .. } => "select",
        Step::Amount { .. } => "amount",
        Step::Expand { .. } => "expand",
        Step::Add { .. } => "add",
        Step::LineAmount { .. } => "line_amount",
        Step::RemoveLine { .. } => "remove_line",
    }
}

fn execute_step(
    storefront: &mut Storefront<TextView>,
    session_lines: &mut Vec<CartLineId>,
    step: &Step,
) -> (StepStatus, String) {
    match step {
        Step::Select { product, param, option, selected } => {
            let product = ProductId(product.clone());
            let result = storefront.select_option(
                &product,
                &ParamId(param.clone()),
                &OptionId(option.clone()),
                *selected,
            );
            match result {
                Ok(()) => {
                    let detail = storefront
                        .item(&product)
                        .map(|item| format!("unit price now {}", item.unit_price()))
                        .unwrap_or_else(|| "selection applied".to_string());
                    (StepStatus::Ok, detail)
                }
                Err(error) => (StepStatus::Failed, error.to_string()),
            }
        }
        Step::Amount { product, set, op } => {
            let edit = match resolve_edit(set, op) {
                Ok(edit) => edit,
                Err(detail) => return (StepStatus::Failed, detail),
            };
            let product = ProductId(product.clone());
            match storefront.edit_item_amount(&product, &edit) {
                Ok(()) => {
                    let detail = storefront
                        .item(&product)
                        .map(|item| format!("amount now {}", item.amount()))
                        .unwrap_or_else(|| "amount edited".to_string());
                    (StepStatus::Ok, detail)
                }
                Err(error) => (StepStatus::Failed, error.to_string()),
            }
        }
        Step::Expand { product } => {
            match storefront.toggle_item_expanded(&ProductId(product.clone())) {
                Ok(()) => (StepStatus::Ok, "expansion toggled".to_string()),
                Err(error) => (StepStatus::Failed, error.to_string()),
            }
        }
        Step::Add { product } => match storefront.add_to_cart(&ProductId(product.clone())) {
            Ok(id) => {
                session_lines.push(id);
                let reference = session_lines.len();
                let detail = storefront
                    .cart()
                    .line(id)
                    .map(|line| format!("line {reference} added: {} x {}", line.amount(), line.name()))
                    .unwrap_or_else(|| format!("line {reference} added"));
                (StepStatus::Ok, detail)
            }
            Err(error) => (StepStatus::Failed, error.to_string()),
        },
        Step::LineAmount { line, set, op } => {
            let id = match resolve_line(session_lines, *line) {
                Ok(id) => id,
                Err(detail) => return (StepStatus::Failed, detail),
            };
            let edit = match resolve_edit(set, op) {
                Ok(edit) => edit,
                Err(detail) => return (StepStatus::Failed, detail),
            };
            match storefront.edit_line_amount(id, &edit) {
                Ok(()) => {
                    let detail = storefront
                        .cart()
                        .line(id)
                        .map(|cart_line| {
                            format!("amount {}, line price {}", cart_line.amount(), cart_line.price())
                        })
                        .unwrap_or_else(|| "amount edited".to_string());
                    (StepStatus::Ok, detail)
                }
                Err(error) => (StepStatus::Failed, error.to_string()),
            }
        }
        Step::RemoveLine { line } => {
            let id = match resolve_line(session_lines, *line) {
                Ok(id) => id,
                Err(detail) => return (StepStatus::Failed, detail),
            };
            let present = storefront.cart().line(id).is_some();
            storefront.remove_line(id);
            let detail = if present {
                format!("line {line} removed")
            } else {
                format!("line {line} was not in the cart")
            };
            (StepStatus::Ok, detail)
        }
    }
}

fn resolve_edit(set: &Option<String>, op: &Option<StepOp>) -> Result<AmountEdit, String> {
    match (set, op) {
        (Some(raw), None) => Ok(AmountEdit::Set(raw.clone())),
        (None, Some(StepOp::Increase)) => Ok(AmountEdit::Increase),
        (None, Some(StepOp::Decrease)) => Ok(AmountEdit::Decrease),
        _ => Err("expected exactly one of `set` and `op`".to_string()),
    }
}

fn resolve_line(session_lines: &[CartLineId], reference: usize) -> Result<CartLineId, String> {
    reference
        .checked_sub(1)
        .and_then(|index| session_lines.get(index))
        .copied()
        .ok_or_else(|| format!("no line {reference} in this session"))
}
