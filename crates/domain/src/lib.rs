//! Checkout domain model.
//!
//! Carts, items, tax tables, shipping methods, commands, notifications and
//! responses as plain Rust values. This crate knows nothing about XML; the
//! wire mapping lives in `checkout-xml`.

pub mod address;
pub mod area;
pub mod cart;
pub mod command;
pub mod frontend;
pub mod item;
pub mod notification;
pub mod order;
pub mod parameterized_url;
pub mod private_data;
pub mod response;
pub mod shipping;
pub mod subscription;
pub mod tax;

pub use address::{Address, AnonymousAddress};
pub use area::{Area, UsCountryRegion, UsState};
pub use cart::ShoppingCart;
pub use command::{
    AddMerchantOrderNumber, AddTrackingData, ArchiveOrder, AuthorizeOrder, BackorderItems, CancelItems, CancelOrder,
    ChargeAndShipOrder, ChargeOrder, CheckoutCommand, Command, CreateOrderRecurrenceRequest, DeliverOrder,
    EndpointKind, ItemsCommand, MerchantCalculations, NotificationDataRequest, NotificationDataTokenRequest,
    NotificationHistoryRequest, OrderReport, ProcessOrder, RefundOrder, ResetItemsShippingInformation, ReturnItems,
    SendBuyerMessage, ShipItems, UnarchiveOrder,
};
pub use frontend::{Frontend, FrontendConfig, PurchaseType, TaxTableFactory};
pub use item::{DigitalContent, DisplayDisposition, Item, LineItem};
pub use notification::{
    AuthorizationAmountNotification, ChargeAmountNotification, ChargebackAmountNotification, MerchantCodeAdjustment,
    MerchantCodeKind, NewOrderNotification, Notification, NotificationHeader, OrderAdjustment,
    OrderStateChangeNotification, RefundAmountNotification, RiskInformation, RiskInformationNotification,
    ShippingAdjustment, ShippingAdjustmentKind,
};
pub use order::{ChargeFee, FinancialState, FulfillmentState, ItemInfo, TrackingData};
pub use parameterized_url::{ParameterizedUrl, UrlParameter, UrlParameterType};
pub use private_data::{PrivateData, PrivateDataMap};
pub use response::{
    CheckoutRedirect, MerchantCalculationResult, MerchantCalculationResults, MerchantCodeResult,
    NotificationAcknowledgment, NotificationDataResponse, NotificationDataTokenResponse, NotificationHistoryResponse,
    RequestReceived, SubscriptionRequestReceived,
};
pub use shipping::{
    AreaFilter, CarrierCalculatedShipping, CarrierCalculatedShippingOption, CarrierPickup, DeliveryAddressCategory,
    DeliveryMethod, FlatRateShipping, MerchantCalculatedShipping, PickupShipping, ShippingCompany, ShippingPackage,
};
pub use subscription::{Subscription, SubscriptionPayment, SubscriptionPeriod, SubscriptionType};
pub use tax::{TaxRule, TaxTable};
