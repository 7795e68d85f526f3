//! Tax tables and rules.
//!
//! A checkout command carries an ordered list of tables. The first one is the
//! default table; every other table is an alternate table that items select by
//! name.

use serde::{Deserialize, Serialize};

use crate::area::Area;

/// A single region-scoped tax rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRule {
    pub rate: f64,
    pub area: Area,
    pub shipping_taxed: bool,
}

impl TaxRule {
    pub fn new(rate: f64, area: Area) -> Self {
        Self {
            rate,
            area,
            shipping_taxed: false,
        }
    }

    pub fn with_shipping_taxed(mut self, shipping_taxed: bool) -> Self {
        self.shipping_taxed = shipping_taxed;
        self
    }
}

/// Named, ordered set of tax rules.
///
/// An empty rule list is accepted here; the provider rejects it later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxTable {
    pub name: String,
    pub standalone: bool,
    pub merchant_calculated: bool,
    pub rules: Vec<TaxRule>,
}

impl TaxTable {
    pub fn new(name: impl Into<String>, standalone: bool) -> Self {
        Self {
            name: name.into(),
            standalone,
            merchant_calculated: false,
            rules: Vec::new(),
        }
    }

    pub fn with_merchant_calculated(mut self, merchant_calculated: bool) -> Self {
        self.merchant_calculated = merchant_calculated;
        self
    }

    pub fn with_rule(mut self, rule: TaxRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn add_rule(&mut self, rule: TaxRule) -> &mut TaxRule {
        self.rules.push(rule);
        let last = self.rules.len() - 1;
        &mut self.rules[last]
    }
}
