use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::amount::{AmountEdit, AmountWidget};
use crate::catalog::{OptionId, ParamId, ProductId};
use crate::config::{CartConfig, WidgetConfig};
use crate::signal::LineSignal;

/// Identity of one cart line. Minted per add, never reused; two lines for
/// the same product stay distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartLineId(Uuid);

impl CartLineId {
    fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CartLineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryParam {
    pub label: String,
    /// Selected options, id to display label.
    pub options: BTreeMap<OptionId, String>,
}

/// Immutable record of a catalog item at the moment it was added to the
/// cart. `price` is `unit_price * amount`; `params` holds only parameters
/// with at least one selected option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineSummary {
    pub product: ProductId,
    pub name: String,
    pub amount: u32,
    pub unit_price: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub params: BTreeMap<ParamId, SummaryParam>,
}

/// A line in the cart. Owns its amount widget; the unit price is frozen at
/// add time and only the amount can change afterwards.
#[derive(Clone, Debug)]
pub struct CartLine {
    id: CartLineId,
    product: ProductId,
    name: String,
    amount: AmountWidget,
    unit_price: Decimal,
    price: Decimal,
    params: BTreeMap<ParamId, SummaryParam>,
}

impl CartLine {
    fn from_summary(summary: CartLineSummary, widget: &WidgetConfig) -> Self {
        let amount = AmountWidget::new(Some(&summary.amount.to_string()), widget);
        let price = summary.unit_price * Decimal::from(amount.value());
        Self {
            id: CartLineId::mint(),
            product: summary.product,
            name: summary.name,
            amount,
            unit_price: summary.unit_price,
            price,
            params: summary.params,
        }
    }

    pub fn id(&self) -> CartLineId {
        self.id
    }

    pub fn product(&self) -> &ProductId {
        &self.product
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> u32 {
        self.amount.value()
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn params(&self) -> &BTreeMap<ParamId, SummaryParam> {
        &self.params
    }

    /// The removal signal this line raises when its remove action fires.
    pub fn request_remove(&self) -> LineSignal {
        LineSignal::Remove(self.id)
    }

    pub fn to_summary(&self) -> CartLineSummary {
        CartLineSummary {
            product: self.product.clone(),
            name: self.name.clone(),
            amount: self.amount.value(),
            unit_price: self.unit_price,
            price: self.price,
            params: self.params.clone(),
        }
    }

    /// Mutable edits stay inside the crate; external callers go through the
    /// storefront, which routes the resulting signal to the cart.
    pub(crate) fn edit_amount(&mut self, edit: &AmountEdit) -> Option<LineSignal> {
        self.amount.edit(edit)?;
        self.price = self.unit_price * Decimal::from(self.amount.value());
        Some(LineSignal::Updated)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub total_number: u32,
    pub subtotal_price: Decimal,
    /// Fee as displayed: zero while the cart is empty.
    pub delivery_fee: Decimal,
    pub total_price: Decimal,
}

impl CartTotals {
    fn empty() -> Self {
        Self {
            total_number: 0,
            subtotal_price: Decimal::ZERO,
            delivery_fee: Decimal::ZERO,
            total_price: Decimal::ZERO,
        }
    }
}

/// Serializable snapshot of the whole cart, used for order hand-off.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderDraft {
    pub created_at: DateTime<Utc>,
    pub lines: Vec<CartLineSummary>,
    pub totals: CartTotals,
}

/// Ordered collection of cart lines with cached aggregate totals. Totals are
/// recomputed from scratch on every mutation.
#[derive(Clone, Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    delivery_fee: Decimal,
    widget: WidgetConfig,
    totals: CartTotals,
}

impl Cart {
    pub fn new(cart: &CartConfig, widget: &WidgetConfig) -> Self {
        Self {
            lines: Vec::new(),
            delivery_fee: cart.delivery_fee,
            widget: widget.clone(),
            totals: CartTotals::empty(),
        }
    }

    /// Appends a new line. Never merges: adding the same product twice
    /// yields two lines with distinct ids.
    pub fn add(&mut self, summary: CartLineSummary) -> CartLineId {
        let line = CartLine::from_summary(summary, &self.widget);
        let id = line.id();
        self.lines.push(line);
        self.recompute_totals();
        id
    }

    /// Consumes one line signal. `Updated` refreshes totals; `Remove` drops
    /// the first identity match, or nothing when the id is not held. Totals
    /// are recomputed either way.
    pub fn handle(&mut self, signal: LineSignal) {
        if let LineSignal::Remove(id) = signal {
            if let Some(position) = self.lines.iter().position(|line| line.id() == id) {
                self.lines.remove(position);
            }
        }
        self.recompute_totals();
    }

    pub fn line(&self, id: CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    pub(crate) fn line_mut(&mut self, id: CartLineId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id() == id)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    pub fn order_draft(&self) -> OrderDraft {
        OrderDraft {
            created_at: Utc::now(),
            lines: self.lines.iter().map(CartLine::to_summary).collect(),
            totals: self.totals.clone(),
        }
    }

    fn recompute_totals(&mut self) {
        let total_number: u32 = self.lines.iter().map(CartLine::amount).sum();
        let subtotal_price: Decimal = self.lines.iter().map(CartLine::price).sum();
        let (delivery_fee, total_price) = if total_number == 0 {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            (self.delivery_fee, subtotal_price + self.delivery_fee)
        };
        self.totals = CartTotals { total_number, subtotal_price, delivery_fee, total_price };
    }
}
