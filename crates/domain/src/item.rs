//! Cart items, their digital content and tax table selection.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use checkout_core::{DomainError, DomainResult, Money, Weight};

use crate::private_data::PrivateDataMap;
use crate::subscription::Subscription;
use crate::tax::TaxTable;

/// How the provider shows digital content after purchase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisplayDisposition {
    Optimistic,
    #[default]
    Pessimistic,
}

impl DisplayDisposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayDisposition::Optimistic => "OPTIMISTIC",
            DisplayDisposition::Pessimistic => "PESSIMISTIC",
        }
    }
}

impl fmt::Display for DisplayDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayDisposition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPTIMISTIC" => Ok(DisplayDisposition::Optimistic),
            "PESSIMISTIC" => Ok(DisplayDisposition::Pessimistic),
            other => Err(DomainError::validation(format!(
                "display disposition must be OPTIMISTIC or PESSIMISTIC, got {other}"
            ))),
        }
    }
}

/// Delivery details for downloadable goods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalContent {
    pub description: Option<String>,
    pub email_delivery: Option<bool>,
    pub key: Option<String>,
    pub url: Option<String>,
    pub display_disposition: DisplayDisposition,
}

/// Fields shared by cart items and the recurrent items of a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub description: Option<String>,
    pub unit_price: Option<Money>,
    pub quantity: u32,
    pub merchant_item_id: Option<String>,
    pub weight: Option<Weight>,
    pub private_data: Option<PrivateDataMap>,
    pub digital_content: Option<DigitalContent>,
    tax_table: Option<String>,
}

impl LineItem {
    pub fn new(name: impl Into<String>, unit_price: Money, quantity: u32) -> Self {
        Self {
            name: name.into(),
            description: None,
            unit_price: Some(unit_price),
            quantity,
            merchant_item_id: None,
            weight: None,
            private_data: None,
            digital_content: None,
            tax_table: None,
        }
    }

    /// An item with nothing but a name; price and quantity are filled in later.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            unit_price: None,
            quantity: 0,
            merchant_item_id: None,
            weight: None,
            private_data: None,
            digital_content: None,
            tax_table: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_merchant_item_id(mut self, id: impl Into<String>) -> Self {
        self.merchant_item_id = Some(id.into());
        self
    }

    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_private_data(mut self, data: PrivateDataMap) -> Self {
        self.private_data = Some(data);
        self
    }

    pub fn with_digital_content(mut self, content: DigitalContent) -> Self {
        self.digital_content = Some(content);
        self
    }

    /// Name of the selected tax table, if any.
    pub fn tax_table(&self) -> Option<&str> {
        self.tax_table.as_deref()
    }

    /// Select `table` for this item.
    ///
    /// `registered` is the tax table list of the command owning the item; the
    /// table must already be part of it.
    pub fn set_tax_table(&mut self, table: &TaxTable, registered: &[TaxTable]) -> DomainResult<()> {
        if !registered.contains(table) {
            return Err(DomainError::validation(format!(
                "tax table '{}' is not registered with the command",
                table.name
            )));
        }
        self.tax_table = Some(table.name.clone());
        Ok(())
    }

    /// Resolve a selector by exact name against `registered`.
    ///
    /// Returns `false` and leaves the selection untouched when nothing matches.
    pub fn resolve_tax_table(&mut self, name: &str, registered: &[TaxTable]) -> bool {
        match registered.iter().find(|t| t.name == name) {
            Some(table) => {
                self.tax_table = Some(table.name.clone());
                true
            }
            None => false,
        }
    }

    pub fn clear_tax_table(&mut self) {
        self.tax_table = None;
    }
}

/// An item of a shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub line: LineItem,
    pub subscription: Option<Subscription>,
}

impl Item {
    pub fn new(name: impl Into<String>, unit_price: Money, quantity: u32) -> Self {
        Self::from(LineItem::new(name, unit_price, quantity))
    }

    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscription = Some(subscription);
        self
    }
}

impl From<LineItem> for Item {
    fn from(line: LineItem) -> Self {
        Self {
            line,
            subscription: None,
        }
    }
}
