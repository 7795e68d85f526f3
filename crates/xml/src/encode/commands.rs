use checkout_domain::{
    BackorderItems, Command, ItemsCommand, NotificationHistoryRequest, OrderReport, ResetItemsShippingInformation,
    ReturnItems, TrackingData,
};

use crate::encode::checkout::checkout_element;
use crate::encode::{bool_text, command_root, money_element, shopping_cart_element, timestamp_text};
use crate::error::CodecResult;
use crate::tree::Element;

/// Root element of the document for `command`.
pub(crate) fn command_element(command: &Command) -> CodecResult<Element> {
    let mut root = command_root(command.tag(), command.google_order_number());
    match command {
        Command::Checkout(checkout) => return checkout_element(checkout),
        Command::ChargeOrder(c) => {
            if let Some(amount) = &c.amount {
                root.push(money_element("amount", amount));
            }
        }
        Command::ChargeAndShipOrder(c) => {
            if let Some(amount) = &c.amount {
                root.push(money_element("amount", amount));
            }
            if let Some(tracking) = &c.tracking_data {
                root.add_child("tracking-data-list").push(tracking_data_element(tracking));
            }
            if c.send_email {
                root.add_text_child("send-email", bool_text(true));
            }
        }
        Command::RefundOrder(c) => {
            if let Some(amount) = &c.amount {
                root.push(money_element("amount", amount));
            }
            if let Some(comment) = &c.comment {
                root.add_text_child("comment", comment.as_str());
            }
            root.add_text_child("reason", c.reason.as_str());
        }
        Command::CancelOrder(c) => write_reason(&mut root, &c.reason, c.comment.as_deref()),
        Command::AuthorizeOrder(_)
        | Command::ProcessOrder(_)
        | Command::ArchiveOrder(_)
        | Command::UnarchiveOrder(_) => {}
        Command::AddMerchantOrderNumber(c) => {
            root.add_text_child("merchant-order-number", c.merchant_order_number.as_str());
        }
        Command::DeliverOrder(c) => {
            if let Some(tracking) = &c.tracking_data {
                root.push(tracking_data_element(tracking));
            }
            root.add_text_child("send-email", bool_text(c.send_email));
        }
        Command::AddTrackingData(c) => {
            root.push(tracking_data_element(&c.tracking_data));
        }
        Command::SendBuyerMessage(c) => {
            root.add_text_child("message", c.message.as_str());
            if let Some(send_email) = c.send_email {
                root.add_text_child("send-email", bool_text(send_email));
            }
        }
        Command::CreateOrderRecurrenceRequest(c) => {
            root.push(shopping_cart_element(&c.shopping_cart)?);
        }
        Command::ShipItems(c) => {
            write_item_shipping_information(&mut root, &c.items);
            root.add_text_child("send-email", bool_text(c.items.send_email));
        }
        Command::BackorderItems(BackorderItems { items })
        | Command::ReturnItems(ReturnItems { items })
        | Command::ResetItemsShippingInformation(ResetItemsShippingInformation { items }) => {
            write_item_ids(&mut root, items);
        }
        Command::CancelItems(c) => {
            write_item_ids(&mut root, &c.items);
            write_reason(&mut root, &c.reason, c.comment.as_deref());
        }
        Command::OrderReport(c) => write_order_report(&mut root, c),
        Command::NotificationHistoryRequest(c) => write_notification_history_request(&mut root, c),
        Command::NotificationDataRequest(c) => {
            root.add_text_child("continue-token", c.continue_token.as_str());
        }
        Command::NotificationDataTokenRequest(c) => {
            if let Some(start_time) = &c.start_time {
                root.add_text_child("start-time", timestamp_text(start_time));
            }
        }
    }
    Ok(root)
}

fn tracking_data_element(tracking: &TrackingData) -> Element {
    let mut el = Element::new("tracking-data");
    el.add_text_child("carrier", tracking.carrier.as_str());
    el.add_text_child("tracking-number", tracking.tracking_number.as_str());
    el
}

fn write_reason(root: &mut Element, reason: &str, comment: Option<&str>) {
    root.add_text_child("reason", reason);
    if let Some(comment) = comment {
        root.add_text_child("comment", comment);
    }
}

/// `item-ids` followed by `send-email`.
fn write_item_ids(root: &mut Element, command: &ItemsCommand) {
    let ids = root.add_child("item-ids");
    for info in &command.item_infos {
        ids.add_child("item-id")
            .add_text_child("merchant-item-id", info.merchant_item_id.as_str());
    }
    root.add_text_child("send-email", bool_text(command.send_email));
}

fn write_item_shipping_information(root: &mut Element, command: &ItemsCommand) {
    let list = root.add_child("item-shipping-information-list");
    for info in &command.item_infos {
        let entry = list.add_child("item-shipping-information");
        entry
            .add_child("item-id")
            .add_text_child("merchant-item-id", info.merchant_item_id.as_str());
        let tracking_list = entry.add_child("tracking-data-list");
        for tracking in &info.tracking_data {
            tracking_list.push(tracking_data_element(tracking));
        }
    }
}

fn write_order_report(root: &mut Element, report: &OrderReport) {
    root.set_attribute("start-date", report.formatted_start_date());
    root.set_attribute("end-date", report.formatted_end_date());
    if let Some(state) = report.financial_state {
        root.add_text_child("financial-state", state.as_str());
    }
    if let Some(state) = report.fulfillment_state {
        root.add_text_child("fulfillment-state", state.as_str());
    }
    if let Some(zone) = &report.date_time_zone {
        root.add_text_child("date-time-zone", zone.as_str());
    }
}

fn write_notification_history_request(root: &mut Element, request: &NotificationHistoryRequest) {
    if let Some(serial_number) = &request.serial_number {
        root.add_text_child("serial-number", serial_number.as_str());
    }
    if let Some(start_time) = &request.start_time {
        root.add_text_child("start-time", timestamp_text(start_time));
    }
    if let Some(end_time) = &request.end_time {
        root.add_text_child("end-time", timestamp_text(end_time));
    }
    if !request.notification_types.is_empty() {
        let types = root.add_child("notification-types");
        for kind in &request.notification_types {
            types.add_text_child("notification-type", kind.as_str());
        }
    }
    if !request.order_numbers.is_empty() {
        let numbers = root.add_child("order-numbers");
        for number in &request.order_numbers {
            numbers.add_text_child("google-order-number", number.as_str());
        }
    }
    if let Some(token) = &request.next_page_token {
        root.add_text_child("next-page-token", token.as_str());
    }
}
