use crate::amount::AmountEdit;
use crate::cart::{Cart, CartLineId, CartTotals};
use crate::catalog::{Catalog, ProductId};
use crate::config::AppConfig;
use crate::errors::{ApplicationError, DomainError, WiringError};
use crate::menu::MenuItem;
use crate::signal::LineSignal;
use crate::view::{ElementRole, View};

struct ItemBinding<V: View> {
    item: MenuItem,
    card: V::Card,
    amount_input: V::Element,
    price_display: V::Element,
    expanded: bool,
}

struct LineBinding<V: View> {
    id: CartLineId,
    card: V::Card,
    amount_input: V::Element,
    price_display: V::Element,
}

/// Orchestrates the menu, the cart, and the rendering collaborator.
///
/// Owns every component and performs all signal routing: widgets report to
/// their owners, lines report to the cart, and the storefront pushes the
/// affected displays after each consumed signal.
pub struct Storefront<V: View> {
    view: V,
    items: Vec<ItemBinding<V>>,
    lines: Vec<LineBinding<V>>,
    cart: Cart,
}

impl<V: View> Storefront<V> {
    /// Renders a card per catalog product, wires the role-tagged children,
    /// runs the initial price computation, and pushes the initial displays.
    /// A card missing a required role aborts the boot.
    pub fn new(catalog: &Catalog, config: &AppConfig, mut view: V) -> Result<Self, WiringError> {
        let mut items = Vec::with_capacity(catalog.len());

        for (product_id, product) in catalog.iter() {
            let card = view.render_catalog_card(product_id, product);
            let context = format!("menu item `{product_id}`");
            let amount_input = find_required(&view, &card, ElementRole::AmountInput, &context)?;
            let price_display = find_required(&view, &card, ElementRole::PriceDisplay, &context)?;

            let initial = view.input_value(amount_input);
            let item = MenuItem::new(
                product_id.clone(),
                product.clone(),
                initial.as_deref(),
                &config.widget,
            );

            view.set_input(amount_input, &item.amount().to_string());
            view.set_text(price_display, &item.total_price().to_string());
            items.push(ItemBinding { item, card, amount_input, price_display, expanded: false });
        }

        let cart = Cart::new(&config.cart, &config.widget);
        view.show_totals(cart.totals());

        Ok(Self { view, items, lines: Vec::new(), cart })
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn totals(&self) -> &CartTotals {
        self.cart.totals()
    }

    pub fn item(&self, product: &ProductId) -> Option<&MenuItem> {
        self.items
            .iter()
            .find(|binding| binding.item.id() == product)
            .map(|binding| &binding.item)
    }

    /// Applies a selection change to one catalog item and refreshes its
    /// price display.
    pub fn select_option(
        &mut self,
        product: &ProductId,
        param: &crate::catalog::ParamId,
        option: &crate::catalog::OptionId,
        selected: bool,
    ) -> Result<(), DomainError> {
        let binding = self
            .items
            .iter_mut()
            .find(|binding| binding.item.id() == product)
            .ok_or_else(|| DomainError::UnknownProduct(product.clone()))?;
        binding.item.set_selected(param, option, selected)?;

        let price_display = binding.price_display;
        let text = binding.item.total_price().to_string();
        self.view.set_text(price_display, &text);
        Ok(())
    }

    /// Routes an amount edit to one catalog item. The visible input is reset
    /// to the stored value whether or not the edit was accepted; the price
    /// display refreshes only on an actual change.
    pub fn edit_item_amount(
        &mut self,
        product: &ProductId,
        edit: &AmountEdit,
    ) -> Result<(), DomainError> {
        let binding = self
            .items
            .iter_mut()
            .find(|binding| binding.item.id() == product)
            .ok_or_else(|| DomainError::UnknownProduct(product.clone()))?;
        let updated = binding.item.edit_amount(edit);

        let amount_input = binding.amount_input;
        let amount = binding.item.amount().to_string();
        let price_display = binding.price_display;
        let price = binding.item.total_price().to_string();

        self.view.set_input(amount_input, &amount);
        if updated.is_some() {
            self.view.set_text(price_display, &price);
        }
        Ok(())
    }

    /// Expands one catalog card and collapses every other. Toggling the
    /// already-expanded card collapses it.
    pub fn toggle_item_expanded(&mut self, product: &ProductId) -> Result<(), DomainError> {
        let target = self
            .items
            .iter()
            .position(|binding| binding.item.id() == product)
            .ok_or_else(|| DomainError::UnknownProduct(product.clone()))?;

        for (index, binding) in self.items.iter_mut().enumerate() {
            let expanded = if index == target { !binding.expanded } else { false };
            if expanded != binding.expanded {
                binding.expanded = expanded;
                self.view.set_expanded(&binding.card, expanded);
            }
        }
        Ok(())
    }

    /// Snapshots one catalog item into a new cart line: renders the line
    /// card, wires its children, appends the line, and refreshes totals.
    /// A miswired line card fails the operation before the cart mutates.
    pub fn add_to_cart(&mut self, product: &ProductId) -> Result<CartLineId, ApplicationError> {
        let summary = self
            .items
            .iter()
            .find(|binding| binding.item.id() == product)
            .map(|binding| binding.item.summary())
            .ok_or_else(|| DomainError::UnknownProduct(product.clone()))?;

        let card = self.view.render_cart_line(&summary);
        let context = format!("cart line `{}`", summary.product);
        let amount_input = find_required(&self.view, &card, ElementRole::AmountInput, &context)?;
        let price_display = find_required(&self.view, &card, ElementRole::PriceDisplay, &context)?;

        let id = self.cart.add(summary);
        self.lines.push(LineBinding { id, card, amount_input, price_display });
        self.view.show_totals(self.cart.totals());
        Ok(id)
    }

    /// Routes an amount edit to one cart line. The line's input is reset
    /// either way; on an actual change the line signal is handed to the
    /// cart and the totals display refreshes.
    pub fn edit_line_amount(
        &mut self,
        line: CartLineId,
        edit: &AmountEdit,
    ) -> Result<(), DomainError> {
        let signal = self
            .cart
            .line_mut(line)
            .map(|cart_line| cart_line.edit_amount(edit))
            .ok_or(DomainError::UnknownLine(line))?;

        if let Some(cart_line) = self.cart.line(line) {
            let amount = cart_line.amount().to_string();
            let price = cart_line.price().to_string();
            if let Some(binding) = self.lines.iter().find(|binding| binding.id == line) {
                self.view.set_input(binding.amount_input, &amount);
                if signal.is_some() {
                    self.view.set_text(binding.price_display, &price);
                }
            }
        }

        if let Some(signal) = signal {
            self.cart.handle(signal);
            self.view.show_totals(self.cart.totals());
        }
        Ok(())
    }

    /// Removes one cart line. Removal of an id the cart does not hold is a
    /// recovered no-op; totals are refreshed either way.
    pub fn remove_line(&mut self, line: CartLineId) {
        let signal = match self.cart.line(line) {
            Some(cart_line) => cart_line.request_remove(),
            None => LineSignal::Remove(line),
        };
        self.cart.handle(signal);

        if let Some(position) = self.lines.iter().position(|binding| binding.id == line) {
            let binding = self.lines.remove(position);
            self.view.remove_card(&binding.card);
        }
        self.view.show_totals(self.cart.totals());
    }
}

fn find_required<V: View>(
    view: &V,
    card: &V::Card,
    role: ElementRole,
    context: &str,
) -> Result<V::Element, WiringError> {
    view.find_child(card, role)
        .ok_or_else(|| WiringError::MissingElement { card: context.to_string(), role })
}
