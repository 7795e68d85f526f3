use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use checkout_core::Money;
use checkout_domain::{Frontend, FrontendConfig, Notification, TaxTable, TaxTableFactory};
use checkout_xml::{decode, CodecError, Inbound};

struct FixedTaxTables;

impl TaxTableFactory for FixedTaxTables {
    fn effective_tax_tables_at(&self, _time: DateTime<Utc>) -> Vec<TaxTable> {
        vec![TaxTable::new("Default", false), TaxTable::new("Some Table", false)]
    }
}

fn frontend() -> Frontend {
    checkout_observability::init();
    Frontend::new(FrontendConfig::new("123456789", "merchant-key")).with_tax_table_factory(Arc::new(FixedTaxTables))
}

fn notification(xml: &str) -> Notification {
    match decode(xml, &frontend()) {
        Ok(Inbound::Notification(notification)) => notification,
        other => panic!("expected a notification, got {other:?}"),
    }
}

const RISK_INFORMATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<risk-information-notification xmlns="http://checkout.google.com/schema/2" serial-number="4f5adc5b-aac5-4618-9e3b-75e60eaf29cd">
  <timestamp>2007-04-30T08:03:57.000Z</timestamp>
  <google-order-number>1564645586934214</google-order-number>
  <risk-information>
    <billing-address>
      <contact-name>Mr Contact Smith</contact-name>
      <company-name>ACME Products</company-name>
      <email>contact_smith@example.com</email>
      <phone>012345 234567</phone>
      <fax>012345 345678</fax>
      <address1>123 Testing Road</address1>
      <address2>Test Village</address2>
      <country-code>GB</country-code>
      <city>Testcity</city>
      <region>South Testshire</region>
      <postal-code>S6 1TT</postal-code>
    </billing-address>
    <ip-address>123.456.123.456</ip-address>
    <avs-response>Y</avs-response>
    <cvn-response>M</cvn-response>
    <eligible-for-protection>true</eligible-for-protection>
    <partial-cc-number>6789</partial-cc-number>
    <buyer-account-age>61</buyer-account-age>
  </risk-information>
</risk-information-notification>"#;

#[test]
fn risk_information_notification() {
    let Notification::RiskInformation(risk) = notification(RISK_INFORMATION) else {
        panic!("expected risk information");
    };

    assert_eq!(risk.header.serial_number.as_str(), "4f5adc5b-aac5-4618-9e3b-75e60eaf29cd");
    assert_eq!(risk.header.google_order_number.as_str(), "1564645586934214");
    assert_eq!(risk.header.timestamp, Utc.with_ymd_and_hms(2007, 4, 30, 8, 3, 57).unwrap());

    let info = risk.risk_information;
    assert_eq!(info.billing_address.contact_name.as_deref(), Some("Mr Contact Smith"));
    assert_eq!(info.billing_address.company_name.as_deref(), Some("ACME Products"));
    assert_eq!(info.billing_address.country_code(), "GB");
    assert_eq!(info.billing_address.city(), "Testcity");
    assert_eq!(info.ip_address.as_deref(), Some("123.456.123.456"));
    assert_eq!(info.avs_response.as_deref(), Some("Y"));
    assert_eq!(info.cvn_response.as_deref(), Some("M"));
    assert!(info.eligible_for_protection);
    assert_eq!(info.partial_cc_number.as_deref(), Some("6789"));
    assert_eq!(info.buyer_account_age, Some(61));
}

const CHARGEBACK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<chargeback-amount-notification xmlns="http://checkout.google.com/schema/2"
  serial-number="bea6bc1b-e1e2-44fe-80ff-0180e33a2614">
  <google-order-number>841171949013218</google-order-number>
  <latest-chargeback-amount currency="GBP">226.06</latest-chargeback-amount>
  <total-chargeback-amount currency="GBP">226.06</total-chargeback-amount>
  <latest-fee-refund-amount currency="GBP">2.21</latest-fee-refund-amount>
  <latest-chargeback-fee-amount currency="GBP">10.00</latest-chargeback-fee-amount>
  <timestamp>2006-03-18T20:25:31</timestamp>
</chargeback-amount-notification>"#;

const MINIMAL_CHARGEBACK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<chargeback-amount-notification xmlns="http://checkout.google.com/schema/2"
  serial-number="bea6bc1b-e1e2-44fe-80ff-0180e33a2614">
  <google-order-number>841171949013218</google-order-number>
  <latest-chargeback-amount currency="GBP">226.06</latest-chargeback-amount>
  <total-chargeback-amount currency="GBP">226.06</total-chargeback-amount>
  <timestamp>2006-03-18T20:25:31</timestamp>
</chargeback-amount-notification>"#;

#[test]
fn chargeback_amount_notification() {
    let Notification::ChargebackAmount(chargeback) = notification(CHARGEBACK) else {
        panic!("expected chargeback amount");
    };

    assert_eq!(chargeback.header.serial_number.as_str(), "bea6bc1b-e1e2-44fe-80ff-0180e33a2614");
    assert_eq!(chargeback.header.google_order_number.as_str(), "841171949013218");
    assert_eq!(chargeback.header.timestamp, Utc.with_ymd_and_hms(2006, 3, 18, 20, 25, 31).unwrap());
    assert_eq!(chargeback.latest_chargeback_amount, Money::new(22606, "GBP"));
    assert_eq!(chargeback.total_chargeback_amount, Money::new(22606, "GBP"));
    assert_eq!(chargeback.latest_fee_refund_amount, Some(Money::new(221, "GBP")));
    assert_eq!(chargeback.latest_chargeback_fee_amount, Some(Money::new(1000, "GBP")));
}

#[test]
fn chargeback_fee_amounts_are_optional() {
    let Notification::ChargebackAmount(chargeback) = notification(MINIMAL_CHARGEBACK) else {
        panic!("expected chargeback amount");
    };
    assert_eq!(chargeback.total_chargeback_amount, Money::new(22606, "GBP"));
    assert_eq!(chargeback.latest_fee_refund_amount, None);
    assert_eq!(chargeback.latest_chargeback_fee_amount, None);
}

#[test]
fn missing_mandatory_amount_fails_the_decode() {
    let xml = MINIMAL_CHARGEBACK.replace(
        r#"<total-chargeback-amount currency="GBP">226.06</total-chargeback-amount>"#,
        "",
    );
    assert_eq!(
        decode(&xml, &frontend()).unwrap_err(),
        CodecError::missing_element("chargeback-amount-notification", "total-chargeback-amount")
    );
}

#[test]
fn oversized_amount_fails_the_decode() {
    let xml = CHARGEBACK.replace(
        r#"<latest-chargeback-amount currency="GBP">226.06</latest-chargeback-amount>"#,
        r#"<latest-chargeback-amount currency="GBP">79228162514264337593543950335</latest-chargeback-amount>"#,
    );
    match decode(&xml, &frontend()) {
        Err(CodecError::InvalidValue { element, value, .. }) => {
            assert_eq!(element, "latest-chargeback-amount");
            assert_eq!(value, "79228162514264337593543950335");
        }
        other => panic!("expected an invalid value, got {other:?}"),
    }
}

#[test]
fn notification_history_resolves_tax_tables_through_the_frontend() {
    let xml = r#"<notification-history-response xmlns="http://checkout.google.com/schema/2">
      <notifications>
        <new-order-notification serial-number="85f54628-538a-44fc-8605-ae62364f6c71">
          <google-order-number>841171949013218</google-order-number>
          <timestamp>2007-03-19T15:06:26Z</timestamp>
          <buyer-billing-address><address1>1 Main St</address1><city>Mountain View</city><region>CA</region><postal-code>94043</postal-code><country-code>US</country-code></buyer-billing-address>
          <buyer-shipping-address><address1>1 Main St</address1><city>Mountain View</city><region>CA</region><postal-code>94043</postal-code><country-code>US</country-code></buyer-shipping-address>
          <shopping-cart>
            <items>
              <item>
                <item-name>Dry Food Pack</item-name>
                <item-description>A pack of highly nutritious dried food.</item-description>
                <unit-price currency="USD">35.00</unit-price>
                <quantity>1</quantity>
                <tax-table-selector>Some Table</tax-table-selector>
              </item>
            </items>
          </shopping-cart>
          <order-total currency="USD">35.00</order-total>
          <financial-order-state>REVIEWING</financial-order-state>
          <fulfillment-order-state>NEW</fulfillment-order-state>
        </new-order-notification>
      </notifications>
      <next-page-token>page-2</next-page-token>
    </notification-history-response>"#;

    let Inbound::NotificationHistory(history) = decode(xml, &frontend()).unwrap() else {
        panic!("expected notification history");
    };
    assert_eq!(history.next_page_token.as_deref(), Some("page-2"));
    let Notification::NewOrder(order) = &history.notifications[0] else {
        panic!("expected new order");
    };
    assert_eq!(order.shopping_cart.items[0].line.tax_table(), Some("Some Table"));
    assert_eq!(order.order_adjustment, None);
    assert_eq!(order.email_allowed, None);
}
