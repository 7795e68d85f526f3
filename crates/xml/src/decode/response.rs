use checkout_core::{GoogleOrderNumber, SerialNumber};
use checkout_domain::{
    CheckoutRedirect, Notification, NotificationAcknowledgment, NotificationDataResponse,
    NotificationDataTokenResponse, NotificationHistoryResponse, RequestReceived, SubscriptionRequestReceived,
    TaxTable,
};

use crate::decode::notification::decode_notification;
use crate::decode::{optional_text, parse_bool};
use crate::error::{CheckoutError, CodecError, CodecResult};
use crate::tree::Element;

fn serial_number(root: &Element) -> CodecResult<SerialNumber> {
    let text = root.required_attribute("serial-number")?;
    SerialNumber::new(text).map_err(|e| CodecError::invalid_value("serial-number", text, e))
}

pub(crate) fn decode_checkout_redirect(root: &Element) -> CodecResult<CheckoutRedirect> {
    Ok(CheckoutRedirect {
        serial_number: serial_number(root)?,
        redirect_url: root.required_child_text("redirect-url")?.to_string(),
    })
}

pub(crate) fn decode_request_received(root: &Element) -> CodecResult<RequestReceived> {
    Ok(RequestReceived {
        serial_number: serial_number(root)?,
    })
}

pub(crate) fn decode_subscription_request_received(root: &Element) -> CodecResult<SubscriptionRequestReceived> {
    let number = root.required_child_text("new-google-order-number")?;
    Ok(SubscriptionRequestReceived {
        serial_number: serial_number(root)?,
        new_google_order_number: GoogleOrderNumber::new(number)
            .map_err(|e| CodecError::invalid_value("new-google-order-number", number, e))?,
    })
}

/// The `<error>` document as a [`CheckoutError`]; the status code is attached by the caller.
pub(crate) fn decode_checkout_error(root: &Element) -> CodecResult<CheckoutError> {
    Ok(CheckoutError {
        serial_number: serial_number(root)?,
        message: root.child_text("error-message").unwrap_or_default().to_string(),
        response_code: None,
    })
}

pub(crate) fn decode_notification_history_response(
    root: &Element,
    tax_tables: &[TaxTable],
) -> CodecResult<NotificationHistoryResponse> {
    Ok(NotificationHistoryResponse {
        notifications: notifications(root, tax_tables)?,
        next_page_token: optional_text(root, "next-page-token"),
    })
}

pub(crate) fn decode_notification_data_token_response(root: &Element) -> CodecResult<NotificationDataTokenResponse> {
    Ok(NotificationDataTokenResponse {
        serial_number: serial_number(root)?,
        continue_token: root.required_child_text("continue-token")?.to_string(),
    })
}

pub(crate) fn decode_notification_data_response(
    root: &Element,
    tax_tables: &[TaxTable],
) -> CodecResult<NotificationDataResponse> {
    Ok(NotificationDataResponse {
        serial_number: serial_number(root)?,
        continue_token: root.required_child_text("continue-token")?.to_string(),
        has_more_notifications: parse_bool(
            "has-more-notifications",
            root.required_child_text("has-more-notifications")?,
        )?,
        notifications: notifications(root, tax_tables)?,
    })
}

pub(crate) fn decode_notification_acknowledgment(root: &Element) -> CodecResult<NotificationAcknowledgment> {
    let serial_number = root
        .attribute("serial-number")
        .map(|text| SerialNumber::new(text).map_err(|e| CodecError::invalid_value("serial-number", text, e)))
        .transpose()?;
    Ok(NotificationAcknowledgment { serial_number })
}

/// Every child of `<notifications>`; an unknown tag fails the whole collection.
fn notifications(root: &Element, tax_tables: &[TaxTable]) -> CodecResult<Vec<Notification>> {
    root.child("notifications")
        .map(|list| {
            list.children()
                .iter()
                .map(|child| decode_notification(child, tax_tables))
                .collect()
        })
        .unwrap_or_else(|| Ok(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse;

    const REFUND: &str = r#"<refund-amount-notification serial-number="a1">
        <google-order-number>841171949013218</google-order-number>
        <latest-refund-amount currency="USD">5.00</latest-refund-amount>
        <total-refund-amount currency="USD">5.00</total-refund-amount>
        <timestamp>2007-03-19T15:06:29Z</timestamp>
      </refund-amount-notification>"#;

    #[test]
    fn checkout_redirect() {
        let root = parse(
            r#"<checkout-redirect serial-number="981283ea-c324-44bb-a10c-fc3b2eba5707">
                 <redirect-url>https://checkout.google.com/view/buy?o=shoppingcart&amp;shoppingcart=8572098456</redirect-url>
               </checkout-redirect>"#,
        )
        .unwrap();
        let redirect = decode_checkout_redirect(&root).unwrap();
        assert_eq!(redirect.serial_number.as_str(), "981283ea-c324-44bb-a10c-fc3b2eba5707");
        assert_eq!(
            redirect.redirect_url,
            "https://checkout.google.com/view/buy?o=shoppingcart&shoppingcart=8572098456"
        );
    }

    #[test]
    fn subscription_request_received() {
        let root = parse(
            r#"<subscription-request-received serial-number="s1"><new-google-order-number>1234</new-google-order-number></subscription-request-received>"#,
        )
        .unwrap();
        let received = decode_subscription_request_received(&root).unwrap();
        assert_eq!(received.new_google_order_number.as_str(), "1234");
    }

    #[test]
    fn error_without_message_has_empty_text() {
        let root = parse(r#"<error serial-number="e1"/>"#).unwrap();
        let error = decode_checkout_error(&root).unwrap();
        assert_eq!(error.message, "");
        assert_eq!(error.response_code, None);
    }

    #[test]
    fn notification_data_response() {
        let xml = format!(
            r#"<notification-data-response serial-number="d1">
                 <continue-token>CP7gobCbJBCJzMm...</continue-token>
                 <notifications>{REFUND}</notifications>
                 <has-more-notifications>true</has-more-notifications>
               </notification-data-response>"#
        );
        let response = decode_notification_data_response(&parse(&xml).unwrap(), &[]).unwrap();
        assert_eq!(response.continue_token, "CP7gobCbJBCJzMm...");
        assert!(response.has_more_notifications);
        assert_eq!(response.notifications.len(), 1);
        assert_eq!(response.notifications[0].notification_type(), "refund-amount-notification");
    }

    #[test]
    fn history_response_without_notifications() {
        let root = parse("<notification-history-response><next-page-token>abc</next-page-token></notification-history-response>").unwrap();
        let response = decode_notification_history_response(&root, &[]).unwrap();
        assert!(response.notifications.is_empty());
        assert_eq!(response.next_page_token.as_deref(), Some("abc"));
    }

    #[test]
    fn unknown_notification_in_collection_fails() {
        let xml = format!(
            "<notification-history-response><notifications>{REFUND}<surprise-notification/></notifications></notification-history-response>"
        );
        assert_eq!(
            decode_notification_history_response(&parse(&xml).unwrap(), &[]).unwrap_err(),
            CodecError::UnknownRoot("surprise-notification".to_string())
        );
    }

    #[test]
    fn acknowledgment_serial_is_optional() {
        let root = parse("<notification-acknowledgment/>").unwrap();
        assert_eq!(decode_notification_acknowledgment(&root).unwrap(), NotificationAcknowledgment::new());
    }
}
