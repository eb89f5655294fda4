//! # Cost Consistency
//!
//! A product's internal cost is stored twice: as a number (`cost_price`) and
//! as its mnemonic [`PriceCode`](crate::price_code::PriceCode) (`cost_code`).
//! At creation, whichever one the caller left out is derived from the other.
//!
//! ## Derivation Table
//! ```text
//! ┌──────────────┬──────────────┬──────────────────────────────────────────┐
//! │  cost_price  │  cost_code   │  result                                  │
//! ├──────────────┼──────────────┼──────────────────────────────────────────┤
//! │  present     │  absent      │  cost_code  := encode_money(cost_price)  │
//! │  absent      │  present     │  cost_price := decode_money(cost_code)   │
//! │              │              │    (stays absent if the code is invalid) │
//! │  present     │  present     │  stored as given, even if inconsistent   │
//! │  absent      │  absent      │  no cost data                            │
//! └──────────────┴──────────────┴──────────────────────────────────────────┘
//! ```
//!
//! The rule never fails. What it did is reported as a [`CostDerivation`] so
//! the caller can log degraded cases.

use serde::{Deserialize, Serialize};

use crate::error::PriceCodeError;
use crate::money::Money;
use crate::price_code;

// =============================================================================
// Types
// =============================================================================

/// The pair of cost fields on a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostFields {
    pub cost_price: Option<Money>,
    pub cost_code: Option<String>,
}

impl CostFields {
    pub fn new(cost_price: Option<Money>, cost_code: Option<String>) -> Self {
        Self {
            cost_price,
            cost_code,
        }
    }

    /// Runs the consistency rule on these fields.
    pub fn reconcile(self) -> CostOutcome {
        reconcile(self.cost_price, self.cost_code)
    }
}

/// How the stored cost fields were arrived at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostDerivation {
    /// Code was derived from the supplied price.
    CodeFromPrice,

    /// Price was derived from the supplied code.
    PriceFromCode,

    /// Supplied code could not be decoded; price left absent.
    UndecodableCode(PriceCodeError),

    /// Supplied price could not be encoded; code left absent.
    UnencodablePrice(PriceCodeError),

    /// Both were supplied and stored untouched.
    ///
    /// `consistent` is true when the code decodes to the whole-unit part of
    /// the price.
    SuppliedBoth { consistent: bool },

    /// Neither was supplied.
    NoCostData,
}

impl CostDerivation {
    /// True for outcomes worth a warning in the logs.
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            CostDerivation::UndecodableCode(_)
                | CostDerivation::UnencodablePrice(_)
                | CostDerivation::SuppliedBoth { consistent: false }
        )
    }
}

/// Result of applying the rule: the fields to persist plus what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostOutcome {
    pub fields: CostFields,
    pub derivation: CostDerivation,
}

// =============================================================================
// Rule
// =============================================================================

/// Applies the cost consistency rule.
///
/// A blank code counts as absent. Supplied codes are kept exactly as given;
/// derived codes are upper case.
///
/// ## Example
/// ```rust
/// use mtc_core::cost::{reconcile, CostDerivation};
/// use mtc_core::money::Money;
///
/// let outcome = reconcile(Some(Money::from_cents(12_000)), None);
/// assert_eq!(outcome.fields.cost_code.as_deref(), Some("MAS"));
/// assert_eq!(outcome.derivation, CostDerivation::CodeFromPrice);
/// ```
pub fn reconcile(cost_price: Option<Money>, cost_code: Option<String>) -> CostOutcome {
    let cost_code = cost_code.filter(|c| !c.trim().is_empty());

    match (cost_price, cost_code) {
        (Some(price), None) => match price_code::encode_money(price) {
            Ok(code) => CostOutcome {
                fields: CostFields::new(Some(price), Some(code.into_string())),
                derivation: CostDerivation::CodeFromPrice,
            },
            Err(e) => CostOutcome {
                fields: CostFields::new(Some(price), None),
                derivation: CostDerivation::UnencodablePrice(e),
            },
        },

        (None, Some(code)) => match price_code::decode_money(&code) {
            Ok(price) => CostOutcome {
                fields: CostFields::new(Some(price), Some(code)),
                derivation: CostDerivation::PriceFromCode,
            },
            Err(e) => CostOutcome {
                fields: CostFields::new(None, Some(code)),
                derivation: CostDerivation::UndecodableCode(e),
            },
        },

        (Some(price), Some(code)) => {
            let consistent = price_code::decode(&code)
                .ok()
                .zip(u64::try_from(price.major()).ok())
                .is_some_and(|(decoded, units)| decoded == units);

            CostOutcome {
                fields: CostFields::new(Some(price), Some(code)),
                derivation: CostDerivation::SuppliedBoth { consistent },
            }
        }

        (None, None) => CostOutcome {
            fields: CostFields::default(),
            derivation: CostDerivation::NoCostData,
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
