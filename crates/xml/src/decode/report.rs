use chrono::{DateTime, NaiveDateTime, Utc};

use checkout_domain::OrderReport;

use crate::decode::optional_text;
use crate::error::{CodecError, CodecResult};
use crate::tree::Element;

/// Decode an `<order-list-request>` back into its report command.
pub fn decode_order_report(root: &Element) -> CodecResult<OrderReport> {
    let start = report_date(root, "start-date")?;
    let end = report_date(root, "end-date")?;
    let mut report = OrderReport::new(start, end)?;

    if let Some(state) = optional_text(root, "financial-state") {
        report
            .set_financial_state(&state)
            .map_err(|e| CodecError::invalid_value("financial-state", &state, e))?;
    }
    if let Some(state) = optional_text(root, "fulfillment-state") {
        report
            .set_fulfillment_state(&state)
            .map_err(|e| CodecError::invalid_value("fulfillment-state", &state, e))?;
    }
    report.date_time_zone = optional_text(root, "date-time-zone");
    Ok(report)
}

fn report_date(root: &Element, name: &str) -> CodecResult<DateTime<Utc>> {
    let text = root.required_attribute(name)?;
    NaiveDateTime::parse_from_str(text, OrderReport::DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| CodecError::invalid_value(name, text, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse;
    use chrono::TimeZone;
    use checkout_domain::{FinancialState, FulfillmentState};

    #[test]
    fn decodes_all_fields() {
        let el = parse(
            r#"<order-list-request xmlns="http://checkout.google.com/schema/2" start-date="2007-09-01T00:00:00" end-date="2007-09-30T23:59:59">
                 <financial-state>CHARGED</financial-state>
                 <fulfillment-state>NEW</fulfillment-state>
                 <date-time-zone>America/New_York</date-time-zone>
               </order-list-request>"#,
        )
        .unwrap();

        let report = decode_order_report(&el).unwrap();
        assert_eq!(report.start_date(), Utc.with_ymd_and_hms(2007, 9, 1, 0, 0, 0).unwrap());
        assert_eq!(report.end_date(), Utc.with_ymd_and_hms(2007, 9, 30, 23, 59, 59).unwrap());
        assert_eq!(report.financial_state, Some(FinancialState::Charged));
        assert_eq!(report.fulfillment_state, Some(FulfillmentState::New));
        assert_eq!(report.date_time_zone.as_deref(), Some("America/New_York"));
    }

    #[test]
    fn filters_are_optional() {
        let el = parse(r#"<order-list-request start-date="2007-09-01T00:00:00" end-date="2007-09-01T00:00:00"/>"#).unwrap();
        let report = decode_order_report(&el).unwrap();
        assert_eq!(report.financial_state, None);
        assert_eq!(report.fulfillment_state, None);
        assert_eq!(report.date_time_zone, None);
    }

    #[test]
    fn rejects_bad_dates_and_states() {
        let el = parse(r#"<order-list-request end-date="2007-09-01T00:00:00"/>"#).unwrap();
        assert_eq!(
            decode_order_report(&el).unwrap_err(),
            CodecError::missing_attribute("order-list-request", "start-date")
        );

        let el = parse(r#"<order-list-request start-date="2007-09-02T00:00:00" end-date="2007-09-01T00:00:00"/>"#).unwrap();
        assert!(matches!(decode_order_report(&el), Err(CodecError::Domain(_))));

        let el = parse(
            r#"<order-list-request start-date="2007-09-01T00:00:00" end-date="2007-09-02T00:00:00"><financial-state>DUMMY</financial-state></order-list-request>"#,
        )
        .unwrap();
        assert!(matches!(decode_order_report(&el), Err(CodecError::InvalidValue { .. })));
    }
}
