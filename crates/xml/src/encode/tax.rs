use checkout_domain::TaxTable;

use crate::encode::{area_element, bool_text, rate_text};
use crate::tree::Element;

/// `<tax-tables>` for a command; the first table is the default one.
///
/// Returns `None` when there are no tables.
pub(crate) fn tax_tables_element(tables: &[TaxTable]) -> Option<Element> {
    let (default_table, alternates) = tables.split_first()?;

    let mut el = Element::new("tax-tables").with_attribute("merchant-calculated", bool_text(default_table.merchant_calculated));

    let rules = el.add_child("default-tax-table").add_child("tax-rules");
    for rule in &default_table.rules {
        let rule_el = rules.add_child("default-tax-rule");
        rule_el.add_text_child("shipping-taxed", bool_text(rule.shipping_taxed));
        rule_el.add_text_child("rate", rate_text(rule.rate));
        rule_el.add_child("tax-area").push(area_element(&rule.area));
    }

    let alternate_tables = el.add_child("alternate-tax-tables");
    for table in alternates {
        let table_el = alternate_tables.push(
            Element::new("alternate-tax-table")
                .with_attribute("name", table.name.as_str())
                .with_attribute("standalone", bool_text(table.standalone)),
        );
        let rules = table_el.add_child("alternate-tax-rules");
        for rule in &table.rules {
            let rule_el = rules.add_child("alternate-tax-rule");
            rule_el.add_text_child("rate", rate_text(rule.rate));
            rule_el.add_child("tax-area").push(area_element(&rule.area));
        }
    }

    Some(el)
}
