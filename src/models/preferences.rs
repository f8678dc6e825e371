//! Budget and currency preferences

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Default currency symbol when none has been chosen
pub const DEFAULT_CURRENCY: &str = "$";

/// The scalar settings stored next to the transaction list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Monthly spending budget; zero means "unset"
    pub monthly_budget: Money,
    /// Currency symbol or code shown in front of amounts
    pub currency: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            monthly_budget: Money::zero(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Preferences {
    pub fn has_budget(&self) -> bool {
        self.monthly_budget.is_positive()
    }
}
