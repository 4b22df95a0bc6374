//! # Discount Evaluator
//!
//! Pure lookup of promotion codes against a fixed registry, plus the
//! minimum-subtotal gate.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply "GRANCOMPRA"                                                     │
//! │       │                                                                 │
//! │       ├── code in registry?        no → UnknownDiscountCode            │
//! │       │                                                                 │
//! │       ├── subtotal >= min gate?    no → DiscountMinimumNotMet          │
//! │       │                                                                 │
//! │       ├── discount already active? yes → DiscountAlreadyApplied        │
//! │       │                                                                 │
//! │       └── stored on the cart; folded into every recomputation          │
//! │                                                                         │
//! │  Codes have no expiry and no usage cap: a promo is always on.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Discount
// =============================================================================

/// How a discount reduces the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum DiscountKind {
    /// Percentage of the subtotal, in basis points (1000 = 10%).
    Percentage(u32),
    /// Fixed amount off the subtotal.
    Fixed(Money),
}

/// A discount definition from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    /// The code the shopper types, stored uppercase.
    pub code: String,

    pub kind: DiscountKind,

    /// Minimum subtotal required before the code may be applied.
    pub min_subtotal: Option<Money>,
}

impl Discount {
    /// The amount this discount takes off the given subtotal, clamped so a
    /// discount can never produce a negative total.
    pub fn amount_for(&self, subtotal: Money) -> Money {
        let raw = match self.kind {
            DiscountKind::Percentage(bps) => subtotal.percentage(bps),
            DiscountKind::Fixed(amount) => amount,
        };
        raw.min(subtotal)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// The static table of known codes. Not user-editable at runtime.
#[derive(Debug, Clone, Default)]
pub struct DiscountRegistry {
    codes: HashMap<String, Discount>,
}

impl DiscountRegistry {
    /// An empty registry (useful for tests).
    pub fn empty() -> Self {
        DiscountRegistry::default()
    }

    /// The storefront's built-in promotions.
    pub fn builtin() -> Self {
        let mut registry = DiscountRegistry::default();
        registry.insert(Discount {
            code: "BIENVENIDO10".to_string(),
            kind: DiscountKind::Percentage(1000), // 10%
            min_subtotal: None,
        });
        registry.insert(Discount {
            code: "GRANCOMPRA".to_string(),
            kind: DiscountKind::Percentage(1500), // 15%
            min_subtotal: Some(Money::from_soles(500)),
        });
        registry.insert(Discount {
            code: "SOLES20".to_string(),
            kind: DiscountKind::Fixed(Money::from_soles(20)),
            min_subtotal: Some(Money::from_soles(100)),
        });
        registry
    }

    /// Adds a definition, keyed case-insensitively.
    pub fn insert(&mut self, discount: Discount) {
        self.codes.insert(discount.code.to_uppercase(), discount);
    }

    /// Case-insensitive lookup.
    pub fn get(&self, code: &str) -> Option<&Discount> {
        self.codes.get(&code.trim().to_uppercase())
    }

    /// Validates a code against the registry and the current subtotal.
    ///
    /// ## Failure order
    /// Unknown code, then minimum not met. Whether another discount is
    /// already active is the cart's business, checked by the aggregator.
    pub fn validate(&self, code: &str, subtotal: Money) -> CoreResult<&Discount> {
        let discount = self
            .get(code)
            .ok_or_else(|| CoreError::UnknownDiscountCode(code.trim().to_string()))?;

        if let Some(minimum) = discount.min_subtotal {
            if subtotal < minimum {
                return Err(CoreError::DiscountMinimumNotMet {
                    code: discount.code.clone(),
                    minimum,
                    subtotal,
                });
            }
        }

        Ok(discount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_codes_present() {
        let registry = DiscountRegistry::builtin();
        assert!(registry.get("BIENVENIDO10").is_some());
        assert!(registry.get("GRANCOMPRA").is_some());
        assert!(registry.get("SOLES20").is_some());
        assert!(registry.get("NOPE").is_none());
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_trims() {
        let registry = DiscountRegistry::builtin();
        assert!(registry.get("bienvenido10").is_some());
        assert!(registry.get("  GranCompra ").is_some());
    }

    #[test]
    fn test_scenario_b_percentage_amount() {
        // 10% of S/ 200.00 is S/ 20.00
        let registry = DiscountRegistry::builtin();
        let discount = registry
            .validate("BIENVENIDO10", Money::from_soles(200))
            .unwrap();
        assert_eq!(discount.amount_for(Money::from_soles(200)), Money::from_soles(20));
    }

    #[test]
    fn test_scenario_c_minimum_not_met() {
        let registry = DiscountRegistry::builtin();
        let err = registry
            .validate("GRANCOMPRA", Money::from_soles(300))
            .unwrap_err();
        match err {
            CoreError::DiscountMinimumNotMet { code, minimum, subtotal } => {
                assert_eq!(code, "GRANCOMPRA");
                assert_eq!(minimum, Money::from_soles(500));
                assert_eq!(subtotal, Money::from_soles(300));
            }
            other => panic!("expected DiscountMinimumNotMet, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_code() {
        let registry = DiscountRegistry::builtin();
        let err = registry.validate("DESCUENTAZO", Money::from_soles(100)).unwrap_err();
        assert!(matches!(err, CoreError::UnknownDiscountCode(code) if code == "DESCUENTAZO"));
    }

    #[test]
    fn test_fixed_amount_clamped_to_subtotal() {
        let discount = Discount {
            code: "SOLES20".to_string(),
            kind: DiscountKind::Fixed(Money::from_soles(20)),
            min_subtotal: None,
        };
        // A S/ 20 fixed discount on a S/ 12.50 subtotal takes off only S/ 12.50
        assert_eq!(
            discount.amount_for(Money::from_cents(1250)),
            Money::from_cents(1250)
        );
    }

    #[test]
    fn test_percentage_never_exceeds_subtotal() {
        let discount = Discount {
            code: "TODO".to_string(),
            kind: DiscountKind::Percentage(10000), // 100%
            min_subtotal: None,
        };
        let subtotal = Money::from_cents(999);
        assert_eq!(discount.amount_for(subtotal), subtotal);
    }
}
