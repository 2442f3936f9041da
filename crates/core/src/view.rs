use std::fmt;

use crate::cart::{CartLineSummary, CartTotals};
use crate::catalog::{ProductDefinition, ProductId};

/// Semantic tag for a child element inside a rendered card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementRole {
    AmountInput,
    PriceDisplay,
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AmountInput => "amount_input",
            Self::PriceDisplay => "price_display",
        })
    }
}

/// Rendering collaborator. The engine renders nothing itself: it asks the
/// view for cards, resolves role-tagged children once per card, and then
/// pushes display writes through the returned element handles.
///
/// `find_child` returning `None` means the rendered card lacks a role the
/// engine requires; the engine treats that as a fatal wiring error for the
/// operation that rendered the card.
pub trait View {
    /// Opaque handle for a rendered card.
    type Card;
    /// Opaque handle for a child element; copied freely into bindings.
    type Element: Copy;

    fn render_catalog_card(
        &mut self,
        product_id: &ProductId,
        product: &ProductDefinition,
    ) -> Self::Card;

    fn render_cart_line(&mut self, summary: &CartLineSummary) -> Self::Card;

    fn find_child(&self, card: &Self::Card, role: ElementRole) -> Option<Self::Element>;

    /// Current raw value of an input element, if the view rendered one.
    fn input_value(&self, element: Self::Element) -> Option<String>;

    fn set_input(&mut self, element: Self::Element, value: &str);

    fn set_text(&mut self, element: Self::Element, value: &str);

    fn set_expanded(&mut self, card: &Self::Card, expanded: bool);

    fn remove_card(&mut self, card: &Self::Card);

    fn show_totals(&mut self, totals: &CartTotals);
}
