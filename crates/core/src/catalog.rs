use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParamId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a parameter admits selections. Single-choice kinds replace the
/// previous selection when a new option is picked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    #[default]
    Checkboxes,
    Radios,
    Select,
}

impl ParamKind {
    pub fn single_choice(self) -> bool {
        matches!(self, Self::Radios | Self::Select)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamOption {
    pub label: String,
    pub price: Decimal,
    /// A default option's price is already folded into the product's base
    /// price; deselecting it subtracts that price.
    #[serde(default)]
    pub default: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: ParamKind,
    pub options: BTreeMap<OptionId, ParamOption>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDefinition {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub params: BTreeMap<ParamId, Parameter>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: serde_json::Error },
    #[error("could not parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogViolation {
    pub code: &'static str,
    pub message: String,
}

/// Product definitions keyed by id. Catalog documents may carry extra
/// presentation fields (descriptions, images); those are ignored on load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: BTreeMap<ProductId, ProductDefinition>,
}

impl Catalog {
    pub fn new(products: BTreeMap<ProductId, ProductDefinition>) -> Self {
        Self { products }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        serde_json::from_str(&raw)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&ProductDefinition> {
        self.products.get(product_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &ProductDefinition)> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn validate(&self) -> Vec<CatalogViolation> {
        let mut violations = Vec::new();

        for (product_id, product) in &self.products {
            if product.name.trim().is_empty() {
                violations.push(CatalogViolation {
                    code: "empty_product_name",
                    message: format!("product `{product_id}` has an empty name"),
                });
            }
            if product.price.is_sign_negative() {
                violations.push(CatalogViolation {
                    code: "negative_price",
                    message: format!("product `{product_id}` has a negative base price"),
                });
            }

            for (param_id, param) in &product.params {
                if param.label.trim().is_empty() {
                    violations.push(CatalogViolation {
                        code: "empty_param_label",
                        message: format!("parameter `{product_id}.{param_id}` has an empty label"),
                    });
                }
                if param.options.is_empty() {
                    violations.push(CatalogViolation {
                        code: "param_without_options",
                        message: format!("parameter `{product_id}.{param_id}` has no options"),
                    });
                }

                for (option_id, option) in &param.options {
                    if option.label.trim().is_empty() {
                        violations.push(CatalogViolation {
                            code: "empty_option_label",
                            message: format!(
                                "option `{product_id}.{param_id}.{option_id}` has an empty label"
                            ),
                        });
                    }
                    if option.price.is_sign_negative() {
                        violations.push(CatalogViolation {
                            code: "negative_price",
                            message: format!(
                                "option `{product_id}.{param_id}.{option_id}` has a negative price"
                            ),
                        });
                    }
                }
            }
        }

        violations
    }
}
