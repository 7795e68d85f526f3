use chrono::{TimeZone, Utc};
use checkout_core::{Money, SerialNumber};
use checkout_domain::{
    Command, Frontend, FrontendConfig, Item, LineItem, NotificationAcknowledgment, PrivateData, PrivateDataMap,
    ShoppingCart, Subscription, SubscriptionPayment, SubscriptionPeriod, SubscriptionType,
};
use checkout_xml::decode::{decode_private_data_map, decode_shopping_cart};
use checkout_xml::tree::parse;
use checkout_xml::{decode, encode, encode_acknowledgment, CheckoutError, CodecError, Inbound};

fn frontend() -> Frontend {
    checkout_observability::init();
    Frontend::new(FrontendConfig::new("123456789", "merchant-key"))
}

#[test]
fn order_report_survives_encode_and_decode() {
    let frontend = frontend();
    let mut report = frontend
        .create_order_report_command(
            Utc.with_ymd_and_hms(2007, 9, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2007, 9, 30, 23, 59, 59).unwrap(),
        )
        .unwrap();
    report.set_financial_state("CHARGED").unwrap();
    report.set_fulfillment_state("NEW").unwrap();
    report.date_time_zone = Some("America/New_York".to_string());

    let xml = encode(&Command::OrderReport(report.clone())).unwrap();
    assert!(xml.contains(r#"start-date="2007-09-01T00:00:00""#));
    assert!(xml.contains(r#"end-date="2007-09-30T23:59:59""#));

    let Inbound::OrderReport(decoded) = decode(&xml, &frontend).unwrap() else {
        panic!("expected order report");
    };
    assert_eq!(decoded, report);
}

#[test]
fn private_data_example_encodes_and_decodes_exactly() {
    let data = PrivateDataMap::new()
        .with("item-note", PrivateData::list(["Text 1", "Text 2"]))
        .with("nested", PrivateDataMap::new().with("tags", "value"));
    let item = Item::from(LineItem::new("Note holder", Money::new(100, "USD"), 1).with_private_data(data.clone()));

    let mut checkout = frontend().create_checkout_command();
    checkout.shopping_cart.add_item(item);
    let xml = encode(&Command::Checkout(checkout)).unwrap();
    assert!(xml.contains(
        "<merchant-private-item-data><item-note>Text 1</item-note><item-note>Text 2</item-note>\
         <nested><tags>value</tags></nested></merchant-private-item-data>"
    ));

    let root = parse(&xml).unwrap();
    let block = root.path("shopping-cart/items/item/merchant-private-item-data").unwrap();
    assert_eq!(decode_private_data_map(block), Some(data));
}

#[test]
fn private_data_too_deep_for_the_wire_fails_the_encode() {
    let deep = PrivateData::list([PrivateData::list([PrivateData::list([PrivateData::from(
        PrivateDataMap::new().with("lost", "v"),
    )])])]);
    let item = Item::from(
        LineItem::new("Note holder", Money::new(100, "USD"), 1).with_private_data(PrivateDataMap::new().with("k", deep)),
    );

    let mut checkout = frontend().create_checkout_command();
    checkout.shopping_cart.add_item(item);
    assert!(matches!(
        encode(&Command::Checkout(checkout)),
        Err(CodecError::InvalidValue { element, .. }) if element == "k"
    ));
}

#[test]
fn subscription_cart_survives_encode_and_decode() {
    let subscription = Subscription::new(SubscriptionPeriod::Monthly, SubscriptionType::Google)
        .with_payment(SubscriptionPayment::new(Money::new(100, "USD")))
        .with_recurrent_item(
            LineItem::new("An interesting subscription", Money::new(100, "USD"), 1)
                .with_description("A flat rate monthly charge"),
        );
    let item = Item::new("Interesting Subscription", Money::new(0, "USD"), 1).with_subscription(subscription);
    let mut checkout = frontend().create_checkout_command();
    checkout.shopping_cart.add_item(item);
    let expected: ShoppingCart = checkout.shopping_cart.clone();

    let xml = encode(&Command::Checkout(checkout)).unwrap();
    let root = parse(&xml).unwrap();
    let cart = decode_shopping_cart(root.required_child("shopping-cart").unwrap(), &[]).unwrap();

    let subscription = cart.items[0].subscription.as_ref().unwrap();
    assert_eq!(subscription.recurrent_items.len(), 1);
    assert_eq!(subscription.payments[0].maximum_charge, Money::new(100, "USD"));
    assert_eq!(cart.items[0].line.name, expected.items[0].line.name);
    assert_eq!(
        subscription.recurrent_items[0].description,
        expected.items[0].subscription.as_ref().unwrap().recurrent_items[0].description
    );
}

#[test]
fn acknowledgment_survives_encode_and_decode() {
    let frontend = frontend();
    for ack in [
        NotificationAcknowledgment::new(),
        NotificationAcknowledgment {
            serial_number: Some(SerialNumber::new("bea6bc1b-e1e2-44fe-80ff-0180e33a2614").unwrap()),
        },
    ] {
        let xml = encode_acknowledgment(&ack).unwrap();
        let Inbound::NotificationAcknowledgment(decoded) = decode(&xml, &frontend).unwrap() else {
            panic!("expected acknowledgment");
        };
        assert_eq!(decoded, ack);
    }
}

#[test]
fn error_document_becomes_a_checkout_error() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<error xmlns="http://checkout.google.com/schema/2" serial-number="3c394432-8270-411b-9239-98c2c499f87f">
  <error-message>Bad username and/or password for API Access.</error-message>
</error>"#;
    assert_eq!(
        decode(xml, &frontend()).unwrap_err(),
        CodecError::Checkout(CheckoutError {
            serial_number: SerialNumber::new("3c394432-8270-411b-9239-98c2c499f87f").unwrap(),
            message: "Bad username and/or password for API Access.".to_string(),
            response_code: None,
        })
    );
}

#[test]
fn unknown_document_is_rejected() {
    assert_eq!(
        decode("<foo/>", &frontend()).unwrap_err(),
        CodecError::UnknownRoot("foo".to_string())
    );
}
