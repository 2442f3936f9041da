use std::collections::BTreeMap;

use ordina_core::catalog::{
    Catalog, OptionId, ParamId, ParamKind, ParamOption, Parameter, ProductDefinition, ProductId,
};
use rust_decimal::Decimal;

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    price: u32,
    params: &'static [ParamSeed],
}

struct ParamSeed {
    id: &'static str,
    label: &'static str,
    kind: ParamKind,
    options: &'static [OptionSeed],
}

struct OptionSeed {
    id: &'static str,
    label: &'static str,
    price: u32,
    default: bool,
}

const PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed { id: "cake", name: "Ring Doughnut", price: 9, params: &[] },
    ProductSeed {
        id: "breakfast",
        name: "Farmhouse Breakfast",
        price: 9,
        params: &[ParamSeed {
            id: "drink",
            label: "Drink",
            kind: ParamKind::Radios,
            options: &[
                OptionSeed { id: "tea", label: "Black tea", price: 1, default: true },
                OptionSeed { id: "coffee", label: "Filter coffee", price: 2, default: false },
                OptionSeed { id: "juice", label: "Orange juice", price: 2, default: false },
            ],
        }],
    },
    ProductSeed {
        id: "pizza",
        name: "Margherita",
        price: 20,
        params: &[
            ParamSeed {
                id: "sauce",
                label: "Sauce",
                kind: ParamKind::Radios,
                options: &[
                    OptionSeed { id: "tomato", label: "Tomato", price: 0, default: true },
                    OptionSeed { id: "cream", label: "Garlic cream", price: 2, default: false },
                ],
            },
            ParamSeed {
                id: "toppings",
                label: "Toppings",
                kind: ParamKind::Checkboxes,
                options: &[
                    OptionSeed { id: "olives", label: "Olives", price: 2, default: true },
                    OptionSeed { id: "peppers", label: "Red peppers", price: 2, default: true },
                    OptionSeed { id: "mushrooms", label: "Mushrooms", price: 1, default: false },
                    OptionSeed { id: "basil", label: "Basil", price: 1, default: false },
                    OptionSeed { id: "salami", label: "Salami", price: 3, default: false },
                ],
            },
        ],
    },
];

/// Built-in catalog backing `--demo` runs and the integration tests.
pub fn demo_catalog() -> Catalog {
    let products = PRODUCT_SEEDS
        .iter()
        .map(|seed| (ProductId(seed.id.to_string()), product(seed)))
        .collect::<BTreeMap<_, _>>();
    Catalog::new(products)
}

fn product(seed: &ProductSeed) -> ProductDefinition {
    let params = seed
        .params
        .iter()
        .map(|param| (ParamId(param.id.to_string()), parameter(param)))
        .collect();
    ProductDefinition { name: seed.name.to_string(), price: Decimal::from(seed.price), params }
}

fn parameter(seed: &ParamSeed) -> Parameter {
    let options = seed
        .options
        .iter()
        .map(|option| {
            (
                OptionId(option.id.to_string()),
                ParamOption {
                    label: option.label.to_string(),
                    price: Decimal::from(option.price),
                    default: option.default,
                },
            )
        })
        .collect();
    Parameter { label: seed.label.to_string(), kind: seed.kind, options }
}
