use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{OptionId, ParamId, ProductDefinition};

/// Snapshot of the options currently picked for one catalog item, keyed by
/// parameter. Kept free of catalog knowledge: validity checks live with the
/// owning item, which holds the product definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    chosen: BTreeMap<ParamId, BTreeSet<OptionId>>,
}

impl Selection {
    pub fn from_defaults(product: &ProductDefinition) -> Self {
        let chosen = product
            .params
            .iter()
            .map(|(param_id, param)| {
                let defaults = param
                    .options
                    .iter()
                    .filter(|(_, option)| option.default)
                    .map(|(option_id, _)| option_id.clone())
                    .collect();
                (param_id.clone(), defaults)
            })
            .collect();
        Self { chosen }
    }

    pub fn set(&mut self, param: &ParamId, option: &OptionId, selected: bool) {
        let options = self.chosen.entry(param.clone()).or_default();
        if selected {
            options.insert(option.clone());
        } else {
            options.remove(option);
        }
    }

    /// Makes `option` the only selection for `param`. Used for single-choice
    /// parameter kinds.
    pub fn replace(&mut self, param: &ParamId, option: &OptionId) {
        self.chosen.insert(param.clone(), BTreeSet::from([option.clone()]));
    }

    pub fn is_selected(&self, param: &ParamId, option: &OptionId) -> bool {
        self.chosen.get(param).map(|options| options.contains(option)).unwrap_or(false)
    }

    pub fn selected(&self, param: &ParamId) -> impl Iterator<Item = &OptionId> {
        self.chosen.get(param).into_iter().flatten()
    }
}
