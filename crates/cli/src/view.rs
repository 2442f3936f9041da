use ordina_core::cart::{CartLineSummary, CartTotals};
use ordina_core::catalog::{ParamKind, ProductDefinition, ProductId};
use ordina_core::view::{ElementRole, View};
use rust_decimal::Decimal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CardKind {
    Menu,
    Line,
}

#[derive(Debug)]
struct TextCard {
    kind: CardKind,
    heading: String,
    details: Vec<String>,
    amount_input: usize,
    price_display: usize,
    expanded: bool,
    removed: bool,
}

/// Arena-backed text renderer. Cards are text blocks; the amount input and
/// price display of each card are plain string slots the engine writes
/// through the [`View`] contract.
#[derive(Debug, Default)]
pub struct TextView {
    cards: Vec<TextCard>,
    elements: Vec<String>,
    totals: Option<CartTotals>,
}

impl TextView {
    pub fn new() -> Self {
        Self::default()
    }

    /// One block per catalog card, in render order.
    pub fn render_menu(&self) -> String {
        let mut lines = vec!["menu:".to_string()];
        for card in self.live_cards(CardKind::Menu) {
            self.push_card_block(&mut lines, card);
        }
        lines.join("\n")
    }

    /// One block per live cart line, then the totals line as last pushed.
    pub fn render_cart(&self) -> String {
        let cards: Vec<&TextCard> = self.live_cards(CardKind::Line).collect();
        let mut lines = Vec::new();

        if cards.is_empty() {
            lines.push("cart: empty".to_string());
        } else {
            lines.push("cart:".to_string());
            for card in cards {
                self.push_card_block(&mut lines, card);
            }
        }

        if let Some(totals) = &self.totals {
            lines.push(format!(
                "totals: items {}, subtotal {}, delivery {}, total {}",
                totals.total_number,
                totals.subtotal_price,
                totals.delivery_fee,
                totals.total_price
            ));
        }
        lines.join("\n")
    }

    fn live_cards(&self, kind: CardKind) -> impl Iterator<Item = &TextCard> {
        self.cards.iter().filter(move |card| card.kind == kind && !card.removed)
    }

    fn push_card_block(&self, lines: &mut Vec<String>, card: &TextCard) {
        let suffix = if card.expanded { "  [expanded]" } else { "" };
        lines.push(format!("{}{suffix}", card.heading));
        lines.extend(card.details.iter().map(|detail| format!("  {detail}")));
        lines.push(format!(
            "  amount [{}]  price {}",
            self.elements[card.amount_input], self.elements[card.price_display]
        ));
    }

    fn new_card(
        &mut self,
        kind: CardKind,
        heading: String,
        details: Vec<String>,
        amount: String,
        price: String,
    ) -> usize {
        let amount_input = self.new_element(amount);
        let price_display = self.new_element(price);
        self.cards.push(TextCard {
            kind,
            heading,
            details,
            amount_input,
            price_display,
            expanded: false,
            removed: false,
        });
        self.cards.len() - 1
    }

    fn new_element(&mut self, initial: String) -> usize {
        self.elements.push(initial);
        self.elements.len() - 1
    }
}

fn option_marker(kind: ParamKind, selected: bool) -> &'static str {
    match (kind.single_choice(), selected) {
        (true, true) => "(*)",
        (true, false) => "( )",
        (false, true) => "[*]",
        (false, false) => "[ ]",
    }
}

fn price_suffix(price: Decimal) -> String {
    if price > Decimal::ZERO {
        format!(" +{price}")
    } else {
        String::new()
    }
}

impl View for TextView {
    type Card = usize;
    type Element = usize;

    fn render_catalog_card(
        &mut self,
        product_id: &ProductId,
        product: &ProductDefinition,
    ) -> usize {
        let heading = format!("{} ({})  base {}", product.name, product_id, product.price);
        let details = product
            .params
            .values()
            .map(|param| {
                let options = param
                    .options
                    .values()
                    .map(|option| {
                        format!(
                            "{} {}{}",
                            option_marker(param.kind, option.default),
                            option.label,
                            price_suffix(option.price)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("  ");
                format!("{}: {options}", param.label)
            })
            .collect();

        self.new_card(CardKind::Menu, heading, details, String::new(), String::new())
    }

    fn render_cart_line(&mut self, summary: &CartLineSummary) -> usize {
        let heading = format!("{} (unit {})", summary.name, summary.unit_price);
        let details = summary
            .params
            .values()
            .map(|param| {
                let labels = param.options.values().cloned().collect::<Vec<_>>().join(", ");
                format!("{}: {labels}", param.label)
            })
            .collect();

        self.new_card(
            CardKind::Line,
            heading,
            details,
            summary.amount.to_string(),
            summary.price.to_string(),
        )
    }

    fn find_child(&self, card: &usize, role: ElementRole) -> Option<usize> {
        let record = &self.cards[*card];
        Some(match role {
            ElementRole::AmountInput => record.amount_input,
            ElementRole::PriceDisplay => record.price_display,
        })
    }

    fn input_value(&self, element: usize) -> Option<String> {
        Some(self.elements[element].clone())
    }

    fn set_input(&mut self, element: usize, value: &str) {
        self.elements[element] = value.to_string();
    }

    fn set_text(&mut self, element: usize, value: &str) {
        self.elements[element] = value.to_string();
    }

    fn set_expanded(&mut self, card: &usize, expanded: bool) {
        self.cards[*card].expanded = expanded;
    }

    fn remove_card(&mut self, card: &usize) {
        self.cards[*card].removed = true;
    }

    fn show_totals(&mut self, totals: &CartTotals) {
        self.totals = Some(totals.clone());
    }
}
