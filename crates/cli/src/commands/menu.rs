use ordina_core::app::Storefront;
use ordina_core::catalog::Catalog;
use ordina_core::config::{AppConfig, LoadOptions};
use serde::Serialize;

use crate::commands::CommandResult;
use crate::view::TextView;

#[derive(Debug, Default)]
pub struct MenuOptions {
    /// Use the built-in demo catalog instead of the configured file.
    pub demo: bool,
}

#[derive(Debug, Serialize)]
struct MenuReport {
    command: &'static str,
    status: &'static str,
    products: usize,
}

pub fn run(options: MenuOptions) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "menu",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let catalog = if options.demo {
        crate::demo::demo_catalog()
    } else {
        match Catalog::load(&config.catalog.path) {
            Ok(catalog) => catalog,
            Err(error) => {
                return CommandResult::failure("menu", "catalog_load", error.to_string(), 4);
            }
        }
    };

    let storefront = match Storefront::new(&catalog, &config, TextView::new()) {
        Ok(storefront) => storefront,
        Err(error) => {
            return CommandResult::failure("menu", "wiring", error.to_string(), 5);
        }
    };

    tracing::info!(
        event_name = "cli.menu.booted",
        products = catalog.len(),
        demo = options.demo,
        "storefront booted"
    );

    let report = MenuReport { command: "menu", status: "ok", products: catalog.len() };
    let machine = serde_json::to_string(&report).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"menu\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    });

    CommandResult {
        exit_code: 0,
        output: format!("{}\n{machine}", storefront.view().render_menu()),
    }
}
