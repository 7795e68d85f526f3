//! Subscriptions attached to cart items.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use checkout_core::{DomainError, Money};

use crate::item::LineItem;

/// Billing interval of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionPeriod {
    Daily,
    Weekly,
    SemiMonthly,
    Monthly,
    EveryTwoMonths,
    Quarterly,
    Yearly,
}

impl SubscriptionPeriod {
    pub const ALL: [SubscriptionPeriod; 7] = [
        SubscriptionPeriod::Daily,
        SubscriptionPeriod::Weekly,
        SubscriptionPeriod::SemiMonthly,
        SubscriptionPeriod::Monthly,
        SubscriptionPeriod::EveryTwoMonths,
        SubscriptionPeriod::Quarterly,
        SubscriptionPeriod::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPeriod::Daily => "DAILY",
            SubscriptionPeriod::Weekly => "WEEKLY",
            SubscriptionPeriod::SemiMonthly => "SEMI_MONTHLY",
            SubscriptionPeriod::Monthly => "MONTHLY",
            SubscriptionPeriod::EveryTwoMonths => "EVERY_TWO_MONTHS",
            SubscriptionPeriod::Quarterly => "QUARTERLY",
            SubscriptionPeriod::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for SubscriptionPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("invalid subscription period: {s}")))
    }
}

/// Who drives the recurring charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    Merchant,
    Google,
}

impl SubscriptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Merchant => "merchant",
            SubscriptionType::Google => "google",
        }
    }
}

impl fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merchant" => Ok(SubscriptionType::Merchant),
            "google" => Ok(SubscriptionType::Google),
            other => Err(DomainError::validation(format!("invalid subscription type: {other}"))),
        }
    }
}

/// One payment schedule entry: `times` charges of at most `maximum_charge`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPayment {
    pub times: Option<u32>,
    pub maximum_charge: Money,
}

impl SubscriptionPayment {
    pub fn new(maximum_charge: Money) -> Self {
        Self {
            times: None,
            maximum_charge,
        }
    }

    pub fn with_times(mut self, times: u32) -> Self {
        self.times = Some(times);
        self
    }
}

/// Recurring billing attached to an item.
///
/// `period` and `kind` are set by [`Subscription::new`]; they stay optional so
/// that inbound documents with a missing or unknown attribute still decode.
/// Recurrent items are plain [`LineItem`]s and cannot carry a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub period: Option<SubscriptionPeriod>,
    pub kind: Option<SubscriptionType>,
    pub no_charge_after: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub payments: Vec<SubscriptionPayment>,
    pub recurrent_items: Vec<LineItem>,
}

impl Subscription {
    pub fn new(period: SubscriptionPeriod, kind: SubscriptionType) -> Self {
        Self {
            period: Some(period),
            kind: Some(kind),
            no_charge_after: None,
            start_date: None,
            payments: Vec::new(),
            recurrent_items: Vec::new(),
        }
    }

    /// A subscription with no attributes set.
    pub fn empty() -> Self {
        Self {
            period: None,
            kind: None,
            no_charge_after: None,
            start_date: None,
            payments: Vec::new(),
            recurrent_items: Vec::new(),
        }
    }

    pub fn with_payment(mut self, payment: SubscriptionPayment) -> Self {
        self.payments.push(payment);
        self
    }

    pub fn with_recurrent_item(mut self, item: LineItem) -> Self {
        self.recurrent_items.push(item);
        self
    }
}
