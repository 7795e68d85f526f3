use checkout_domain::Area;

use crate::tree::Element;

pub(crate) fn area_element(area: &Area) -> Element {
    match area {
        Area::UsZip { pattern } => {
            let mut el = Element::new("us-zip-area");
            el.add_text_child("zip-pattern", pattern.as_str());
            el
        }
        Area::UsCountry { region } => Element::new("us-country-area").with_attribute("country-area", region.as_str()),
        Area::UsState { state } => {
            let mut el = Element::new("us-state-area");
            el.add_text_child("state", state.as_str());
            el
        }
        Area::World => Element::new("world-area"),
        Area::Postal {
            country_code,
            postal_code_pattern,
        } => {
            let mut el = Element::new("postal-area");
            el.add_text_child("country-code", country_code.as_str());
            if let Some(pattern) = postal_code_pattern {
                el.add_text_child("postal-code-pattern", pattern.as_str());
            }
            el
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_domain::UsCountryRegion;

    #[test]
    fn us_state_area_wraps_the_code() {
        let el = area_element(&Area::us_state("CA").unwrap());
        assert_eq!(el.name(), "us-state-area");
        assert_eq!(el.children().len(), 1);
        assert_eq!(el.child_text("state"), Some("CA"));
    }

    #[test]
    fn us_country_area_is_an_attribute() {
        let el = area_element(&Area::us_country(UsCountryRegion::Continental48));
        assert_eq!(el.attribute("country-area"), Some("CONTINENTAL_48"));
        assert!(!el.has_children());
    }

    #[test]
    fn postal_pattern_is_optional() {
        let el = area_element(&Area::postal("DE", None));
        assert_eq!(el.child_text("country-code"), Some("DE"));
        assert!(el.child("postal-code-pattern").is_none());

        let el = area_element(&Area::postal("CA", Some("M4*".to_string())));
        assert_eq!(el.child_text("postal-code-pattern"), Some("M4*"));
    }

    #[test]
    fn world_and_zip_areas() {
        assert_eq!(area_element(&Area::world()), Element::new("world-area"));
        let zip = area_element(&Area::us_zip("940*"));
        assert_eq!(zip.path("zip-pattern").map(Element::text), Some("940*"));
    }
}
