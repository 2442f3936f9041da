use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use ordina_cli::commands::{check, config, menu, order};
use serde_json::Value;
use tempfile::TempDir;

const MENU_JSON: &str = r#"
{
  "products": {
    "cake": { "name": "Nonna's Doughnut", "price": 9 },
    "pizza": {
      "name": "Margherita",
      "price": 20,
      "params": {
        "toppings": {
          "label": "Toppings",
          "type": "checkboxes",
          "options": {
            "olives": { "label": "Olives", "price": 2, "default": true }
          }
        }
      }
    }
  }
}
"#;

#[test]
fn menu_demo_reports_ok_with_product_count() {
    with_env(&[], || {
        let result = menu::run(menu::MenuOptions { demo: true });
        assert_eq!(result.exit_code, 0, "expected successful demo menu render");
        assert!(result.output.contains("Margherita (pizza)  base 20"));

        let payload = parse_payload(last_line(&result.output));
        assert_eq!(payload["command"], "menu");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["products"], 3);
    });
}

#[test]
fn menu_reports_catalog_load_failure_for_missing_file() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("absent.json").display().to_string();

    with_env(&[("ORDINA_CATALOG_PATH", path.as_str())], || {
        let result = menu::run(menu::MenuOptions { demo: false });
        assert_eq!(result.exit_code, 4, "expected catalog load failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "menu");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "catalog_load");
    });
}

#[test]
fn menu_renders_a_catalog_loaded_from_disk() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("menu.json");
    fs::write(&path, MENU_JSON).expect("catalog file should be written");
    let path = path.display().to_string();

    with_env(&[("ORDINA_CATALOG_PATH", path.as_str())], || {
        let result = menu::run(menu::MenuOptions { demo: false });
        assert_eq!(result.exit_code, 0, "expected successful menu render");
        assert!(result.output.contains("Margherita (pizza)  base 20"));
        assert!(result.output.contains("amount [1]  price 20"));

        let payload = parse_payload(last_line(&result.output));
        assert_eq!(payload["products"], 2);
    });
}

#[test]
fn order_replays_a_demo_session_and_reports_the_draft() {
    let dir = TempDir::new().expect("temp dir should be created");
    let script = dir.path().join("order.toml");
    fs::write(
        &script,
        r#"
[[steps]]
action = "select"
product = "pizza"
param = "toppings"
option = "salami"

[[steps]]
action = "amount"
product = "pizza"
set = "2"

[[steps]]
action = "add"
product = "pizza"

[[steps]]
action = "add"
product = "cake"

[[steps]]
action = "line_amount"
line = 2
set = "3"
"#,
    )
    .expect("script should be written");

    with_env(&[], || {
        let result = order::run(order::OrderOptions { script, demo: true, json: true });
        assert_eq!(result.exit_code, 0, "expected every step to pass");

        let payload = parse_payload(last_line(&result.output));
        assert_eq!(payload["command"], "order");
        assert_eq!(payload["status"], "pass");

        let steps = payload["steps"].as_array().expect("steps should be an array");
        assert_eq!(steps.len(), 5);
        assert!(steps.iter().all(|step| step["status"] == "ok"));
        assert_eq!(steps[0]["detail"], "unit price now 23");
        assert_eq!(steps[1]["detail"], "amount now 2");
        assert_eq!(steps[2]["detail"], "line 1 added: 2 x Margherita");
        assert_eq!(steps[3]["detail"], "line 2 added: 1 x Ring Doughnut");
        assert_eq!(steps[4]["detail"], "amount 3, line price 27");

        let draft = &payload["draft"];
        let lines = draft["lines"].as_array().expect("draft should carry lines");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["unit_price"], "23");
        assert_eq!(lines[0]["price"], "46");
        assert_eq!(lines[1]["amount"], 3);
        assert_eq!(lines[1]["price"], "27");

        assert_eq!(draft["totals"]["total_number"], 5);
        assert_eq!(draft["totals"]["subtotal_price"], "73");
        assert_eq!(draft["totals"]["delivery_fee"], "20");
        assert_eq!(draft["totals"]["total_price"], "93");
    });
}

#[test]
fn order_marks_unknown_option_steps_failed_and_keeps_going() {
    let dir = TempDir::new().expect("temp dir should be created");
    let script = dir.path().join("order.toml");
    fs::write(
        &script,
        r#"
[[steps]]
action = "select"
product = "pizza"
param = "toppings"
option = "pineapple"

[[steps]]
action = "add"
product = "pizza"
"#,
    )
    .expect("script should be written");

    with_env(&[], || {
        let result = order::run(order::OrderOptions { script, demo: true, json: true });
        assert_eq!(result.exit_code, 6, "expected a failed step to fail the session");

        let payload = parse_payload(last_line(&result.output));
        assert_eq!(payload["status"], "fail");

        let steps = payload["steps"].as_array().expect("steps should be an array");
        assert_eq!(steps[0]["status"], "failed");
        assert_eq!(steps[1]["status"], "ok");
        assert_eq!(payload["draft"]["lines"].as_array().map(Vec::len), Some(1));
    });
}

#[test]
fn order_rejects_an_unparseable_script() {
    let dir = TempDir::new().expect("temp dir should be created");
    let script = dir.path().join("order.toml");
    fs::write(&script, "steps = [ not toml").expect("script should be written");

    with_env(&[], || {
        let result = order::run(order::OrderOptions { script, demo: true, json: true });
        assert_eq!(result.exit_code, 3, "expected script parse failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "order");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "script_parse");
    });
}

#[test]
fn order_fails_line_references_outside_the_session() {
    let dir = TempDir::new().expect("temp dir should be created");
    let script = dir.path().join("order.toml");
    fs::write(
        &script,
        r#"
[[steps]]
action = "line_amount"
line = 1
set = "2"
"#,
    )
    .expect("script should be written");

    with_env(&[], || {
        let result = order::run(order::OrderOptions { script, demo: true, json: true });
        assert_eq!(result.exit_code, 6, "expected the dangling reference to fail");

        let payload = parse_payload(last_line(&result.output));
        assert_eq!(payload["steps"][0]["status"], "failed");
        assert_eq!(payload["steps"][0]["detail"], "no line 1 in this session");
    });
}

#[test]
fn check_passes_with_a_wellformed_catalog() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("menu.json");
    fs::write(&path, MENU_JSON).expect("catalog file should be written");
    let path = path.display().to_string();

    with_env(&[("ORDINA_CATALOG_PATH", path.as_str())], || {
        let output = check::run(true);
        let payload: Value =
            serde_json::from_str(&output).expect("check output should be valid JSON");

        assert_eq!(payload["overall_status"], "pass");
        assert_eq!(payload["checks"][0]["name"], "config_validation");
        assert_eq!(payload["checks"][1]["name"], "catalog_file");
        assert_eq!(payload["checks"][2]["name"], "catalog_structure");
        assert!(payload["checks"]
            .as_array()
            .expect("checks should be an array")
            .iter()
            .all(|chk| chk["status"] == "pass"));
    });
}

#[test]
fn check_reports_catalog_violations() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("menu.json");
    fs::write(&path, r#"{ "products": { "bad": { "name": " ", "price": -1 } } }"#)
        .expect("catalog file should be written");
    let path = path.display().to_string();

    with_env(&[("ORDINA_CATALOG_PATH", path.as_str())], || {
        let output = check::run(true);
        let payload: Value =
            serde_json::from_str(&output).expect("check output should be valid JSON");

        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(payload["checks"][1]["status"], "pass");
        assert_eq!(payload["checks"][2]["status"], "fail");
        let details = payload["checks"][2]["details"].as_str().unwrap_or("");
        assert!(details.contains("has an empty name"));
        assert!(details.contains("negative base price"));
    });
}

#[test]
fn check_skips_structure_when_the_catalog_is_missing() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("absent.json").display().to_string();

    with_env(&[("ORDINA_CATALOG_PATH", path.as_str())], || {
        let output = check::run(false);
        let mut lines = output.lines();

        assert_eq!(lines.next(), Some("check: one or more readiness checks failed"));
        assert!(output.contains("- [ok] config_validation:"));
        assert!(output.contains("- [fail] catalog_file:"));
        assert!(output.contains("- [skip] catalog_structure:"));
    });
}

#[test]
fn config_attributes_env_and_default_sources() {
    with_env(&[("ORDINA_CART_DELIVERY_FEE", "12")], || {
        let output = config::run();

        assert!(output.starts_with("effective config (source precedence: env > file > default):"));
        assert!(output
            .contains("- cart.delivery_fee = 12 (source: env (ORDINA_CART_DELIVERY_FEE))"));
        assert!(output.contains("- widget.min = 1 (source: default)"));
        assert!(output.contains("- catalog.path = menu.json (source: default)"));
    });
}

#[test]
fn config_names_the_alias_env_key_that_supplied_a_value() {
    with_env(&[("ORDINA_LOG_LEVEL", "debug"), ("ORDINA_LOG_FORMAT", "json")], || {
        let output = config::run();

        assert!(output.contains("- logging.level = debug (source: env (ORDINA_LOG_LEVEL))"));
        assert!(output.contains("- logging.format = Json (source: env (ORDINA_LOG_FORMAT))"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn last_line(output: &str) -> &str {
    output.lines().last().unwrap_or_default()
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "ORDINA_WIDGET_DEFAULT_VALUE",
        "ORDINA_WIDGET_MIN",
        "ORDINA_WIDGET_MAX",
        "ORDINA_CART_DELIVERY_FEE",
        "ORDINA_CATALOG_PATH",
        "ORDINA_LOGGING_LEVEL",
        "ORDINA_LOGGING_FORMAT",
        "ORDINA_LOG_LEVEL",
        "ORDINA_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
