pub mod amount;
pub mod app;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod menu;
pub mod selection;
pub mod signal;
pub mod view;

pub use amount::{AmountEdit, AmountWidget};
pub use app::Storefront;
pub use cart::{
    Cart, CartLine, CartLineId, CartLineSummary, CartTotals, OrderDraft, SummaryParam,
};
pub use catalog::{
    Catalog, CatalogError, CatalogViolation, OptionId, ParamId, ParamKind, ParamOption, Parameter,
    ProductDefinition, ProductId,
};
pub use config::{
    AppConfig, CartConfig, CatalogConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat,
    LoggingConfig, WidgetConfig,
};
pub use errors::{ApplicationError, DomainError, WiringError};
pub use menu::{unit_price, MenuItem};
pub use selection::Selection;
pub use signal::{LineSignal, Updated};
pub use view::{ElementRole, View};
