use checkout_domain::{PrivateData, PrivateDataMap};

use crate::tree::Element;

/// Value of a private-data element.
///
/// A leaf is a scalar. Children become a map keyed by tag name in first
/// appearance order; a tag repeated among siblings becomes a list.
pub fn decode_private_data(el: &Element) -> PrivateData {
    if !el.has_children() {
        return PrivateData::scalar(el.text());
    }

    let mut map = PrivateDataMap::new();
    let mut seen: Vec<&str> = Vec::new();
    for child in el.children() {
        if seen.contains(&child.name()) {
            continue;
        }
        seen.push(child.name());

        let siblings: Vec<_> = el.children_named(child.name()).collect();
        let value = if siblings.len() > 1 {
            PrivateData::List(siblings.into_iter().map(decode_private_data).collect())
        } else {
            decode_private_data(child)
        };
        map.insert(child.name(), value);
    }
    PrivateData::Map(map)
}

/// The map under `merchant-private-data` / `merchant-private-item-data`.
///
/// Returns `None` for a container without child elements.
pub fn decode_private_data_map(el: &Element) -> Option<PrivateDataMap> {
    match decode_private_data(el) {
        PrivateData::Map(map) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::sanitize_tag;
    use crate::tree::parse;
    use proptest::prelude::*;

    #[test]
    fn repeated_tags_become_lists() {
        let el = parse(
            "<merchant-private-item-data>\
               <item-note>Text 1</item-note>\
               <item-note>Text 2</item-note>\
               <nested><tags>value</tags></nested>\
             </merchant-private-item-data>",
        )
        .unwrap();

        let expected = PrivateDataMap::new()
            .with("item-note", PrivateData::list(["Text 1", "Text 2"]))
            .with("nested", PrivateDataMap::new().with("tags", "value"));
        assert_eq!(decode_private_data_map(&el), Some(expected));
    }

    #[test]
    fn leaf_container_is_not_a_map() {
        let el = parse("<merchant-private-data>opaque</merchant-private-data>").unwrap();
        assert_eq!(decode_private_data(&el), PrivateData::scalar("opaque"));
        assert_eq!(decode_private_data_map(&el), None);
    }

    mod proptest_tests {
        use super::*;
        use crate::encode::write_private_data;

        fn key() -> impl Strategy<Value = String> {
            "[a-z][a-z0-9-]{0,8}"
        }

        fn scalar() -> impl Strategy<Value = PrivateData> {
            "[A-Za-z0-9]{1,12}".prop_map(PrivateData::Scalar)
        }

        /// Trees that survive the wire: lists hold two or more scalars or maps,
        /// and maps are non-empty.
        fn tree() -> impl Strategy<Value = PrivateData> {
            scalar().prop_recursive(3, 24, 4, |inner| {
                prop_oneof![
                    prop::collection::vec(prop_oneof![scalar(), map_of(inner.clone())], 2..4).prop_map(PrivateData::List),
                    map_of(inner),
                ]
            })
        }

        fn map_of(inner: impl Strategy<Value = PrivateData>) -> impl Strategy<Value = PrivateData> {
            prop::collection::vec((key(), inner), 1..4).prop_map(|entries| {
                PrivateData::Map(entries.into_iter().collect())
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig { cases: 1000, ..ProptestConfig::default() })]

            #[test]
            fn encode_then_decode_restores_the_tree(entries in prop::collection::vec((key(), tree()), 1..4)) {
                let map: PrivateDataMap = entries.into_iter().collect();
                let mut el = Element::new("merchant-private-data");
                write_private_data(&mut el, &map).unwrap();
                prop_assert_eq!(decode_private_data_map(&el), Some(map));
            }

            #[test]
            fn sanitized_keys_are_valid_tags(key in "\\PC{0,16}") {
                let tag = sanitize_tag(&key);
                prop_assert!(tag.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':')));
            }
        }
    }
}
