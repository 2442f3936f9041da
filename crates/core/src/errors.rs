use thiserror::Error;

use crate::cart::CartLineId;
use crate::catalog::{OptionId, ParamId, ProductId};
use crate::view::ElementRole;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown product `{0}`")]
    UnknownProduct(ProductId),
    #[error("product `{product}` has no parameter `{param}`")]
    UnknownParameter { product: ProductId, param: ParamId },
    #[error("parameter `{param}` has no option `{option}`")]
    UnknownOption { param: ParamId, option: OptionId },
    #[error("cart has no line `{0}`")]
    UnknownLine(CartLineId),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WiringError {
    #[error("rendered card for {card} is missing its `{role}` element")]
    MissingElement { card: String, role: ElementRole },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Wiring(#[from] WiringError),
}

#[cfg(test)]
mod tests {
    use crate::catalog::{OptionId, ParamId, ProductId};
    use crate::view::ElementRole;

    use super::{ApplicationError, DomainError, WiringError};

    #[test]
    fn domain_errors_name_the_offending_ids() {
        let error = DomainError::UnknownOption {
            param: ParamId("toppings".into()),
            option: OptionId("anchovies".into()),
        };
        assert_eq!(error.to_string(), "parameter `toppings` has no option `anchovies`");

        let error = DomainError::UnknownProduct(ProductId("sushi".into()));
        assert_eq!(error.to_string(), "unknown product `sushi`");
    }

    #[test]
    fn wiring_error_names_the_card_and_role() {
        let error = WiringError::MissingElement {
            card: "menu item `pizza`".to_string(),
            role: ElementRole::AmountInput,
        };
        assert_eq!(
            error.to_string(),
            "rendered card for menu item `pizza` is missing its `amount_input` element"
        );
    }

    #[test]
    fn application_error_wraps_both_families_transparently() {
        let domain: ApplicationError = DomainError::UnknownProduct(ProductId("x".into())).into();
        assert_eq!(domain.to_string(), "unknown product `x`");

        let wiring: ApplicationError = WiringError::MissingElement {
            card: "cart line `x`".to_string(),
            role: ElementRole::PriceDisplay,
        }
        .into();
        assert!(matches!(wiring, ApplicationError::Wiring(_)));
    }
}
