use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::amount::{AmountEdit, AmountWidget};
use crate::cart::{CartLineSummary, SummaryParam};
use crate::catalog::{OptionId, ParamId, ProductDefinition, ProductId};
use crate::config::WidgetConfig;
use crate::errors::DomainError;
use crate::selection::Selection;
use crate::signal::Updated;

/// Per-unit price of `product` under `selection`, starting from the base
/// price. Selected non-default options add their price; deselected default
/// options subtract theirs (the base already includes them).
pub fn unit_price(product: &ProductDefinition, selection: &Selection) -> Decimal {
    let mut price = product.price;
    for (param_id, param) in &product.params {
        for (option_id, option) in &param.options {
            let selected = selection.is_selected(param_id, option_id);
            if selected && !option.default {
                price += option.price;
            } else if !selected && option.default {
                price -= option.price;
            }
        }
    }
    price
}

/// One orderable catalog entry: the product definition it was built from,
/// the live selection, its amount widget, and the cached prices.
#[derive(Clone, Debug)]
pub struct MenuItem {
    id: ProductId,
    product: ProductDefinition,
    selection: Selection,
    amount: AmountWidget,
    unit_price: Decimal,
    total_price: Decimal,
}

impl MenuItem {
    /// `initial_amount` is the raw value of the rendered amount input, when
    /// one was rendered; invalid values fall back to the configured default.
    pub fn new(
        id: ProductId,
        product: ProductDefinition,
        initial_amount: Option<&str>,
        widget: &WidgetConfig,
    ) -> Self {
        let selection = Selection::from_defaults(&product);
        let amount = AmountWidget::new(initial_amount, widget);
        let mut item = Self {
            id,
            product,
            selection,
            amount,
            unit_price: Decimal::ZERO,
            total_price: Decimal::ZERO,
        };
        item.reprice();
        item
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn product(&self) -> &ProductDefinition {
        &self.product
    }

    pub fn name(&self) -> &str {
        &self.product.name
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn amount(&self) -> u32 {
        self.amount.value()
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Displayed price: `unit_price * amount`.
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Applies one selection change and reprices. Single-choice parameters
    /// replace their previous selection when a new option is picked.
    pub fn set_selected(
        &mut self,
        param_id: &ParamId,
        option_id: &OptionId,
        selected: bool,
    ) -> Result<(), DomainError> {
        let param = self.product.params.get(param_id).ok_or_else(|| {
            DomainError::UnknownParameter { product: self.id.clone(), param: param_id.clone() }
        })?;
        if !param.options.contains_key(option_id) {
            return Err(DomainError::UnknownOption {
                param: param_id.clone(),
                option: option_id.clone(),
            });
        }

        if selected && param.kind.single_choice() {
            self.selection.replace(param_id, option_id);
        } else {
            self.selection.set(param_id, option_id, selected);
        }
        self.reprice();
        Ok(())
    }

    /// Routes an edit to the amount widget; reprices only when the widget
    /// reports an actual change.
    pub fn edit_amount(&mut self, edit: &AmountEdit) -> Option<Updated> {
        let updated = self.amount.edit(edit);
        if updated.is_some() {
            self.reprice();
        }
        updated
    }

    /// Immutable summary of the current state, ready for the cart. Parameters
    /// with no selected options are pruned.
    pub fn summary(&self) -> CartLineSummary {
        let mut params = BTreeMap::new();
        for (param_id, param) in &self.product.params {
            let options: BTreeMap<OptionId, String> = param
                .options
                .iter()
                .filter(|(option_id, _)| self.selection.is_selected(param_id, option_id))
                .map(|(option_id, option)| (option_id.clone(), option.label.clone()))
                .collect();
            if options.is_empty() {
                continue;
            }
            params.insert(
                param_id.clone(),
                SummaryParam { label: param.label.clone(), options },
            );
        }

        CartLineSummary {
            product: self.id.clone(),
            name: self.product.name.clone(),
            amount: self.amount.value(),
            unit_price: self.unit_price,
            price: self.total_price,
            params,
        }
    }

    fn reprice(&mut self) {
        self.unit_price = unit_price(&self.product, &self.selection);
        self.total_price = self.unit_price * Decimal::from(self.amount.value());
    }
}
