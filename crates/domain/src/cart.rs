//! Shopping cart owned by a checkout or order-recurrence command.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::private_data::PrivateDataMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingCart {
    pub items: Vec<Item>,
    pub expires_at: Option<DateTime<Utc>>,
    pub private_data: Option<PrivateDataMap>,
}

impl ShoppingCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item and return it for further configuration.
    pub fn add_item(&mut self, item: impl Into<Item>) -> &mut Item {
        self.items.push(item.into());
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn with_item(mut self, item: impl Into<Item>) -> Self {
        self.items.push(item.into());
        self
    }
}
