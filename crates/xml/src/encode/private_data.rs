use checkout_domain::{PrivateData, PrivateDataMap};

use crate::error::{CodecError, CodecResult};
use crate::tree::Element;

/// Turn an arbitrary key into a tag name: whitespace becomes `-`, anything
/// outside `[A-Za-z0-9-_:]` is dropped.
pub fn sanitize_tag(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
        .collect()
}

/// Append one child per entry of `data` to `parent`.
///
/// Fails with [`CodecError::InvalidValue`] when a map sits inside a list
/// that is still nested after the flatten pass.
pub(crate) fn write_private_data(parent: &mut Element, data: &PrivateDataMap) -> CodecResult<()> {
    for (key, value) in data.iter() {
        let tag = sanitize_tag(key);
        match value {
            PrivateData::List(entries) => {
                for entry in flatten_once(entries) {
                    write_value(parent, &tag, entry)?;
                }
            }
            other => write_value(parent, &tag, other)?,
        }
    }
    Ok(())
}

fn write_value(parent: &mut Element, tag: &str, value: &PrivateData) -> CodecResult<()> {
    match value {
        PrivateData::Scalar(text) => {
            parent.add_text_child(tag, text.as_str());
        }
        PrivateData::Map(map) => write_private_data(parent.add_child(tag), map)?,
        // still nested after flattening
        PrivateData::List(entries) => {
            let text = joined_scalars(tag, entries)?;
            parent.add_text_child(tag, text);
        }
    }
    Ok(())
}

fn flatten_once(entries: &[PrivateData]) -> Vec<&PrivateData> {
    entries
        .iter()
        .flat_map(|entry| match entry {
            PrivateData::List(inner) => inner.iter().collect::<Vec<_>>(),
            other => vec![other],
        })
        .collect()
}

fn joined_scalars(tag: &str, entries: &[PrivateData]) -> CodecResult<String> {
    let mut parts = Vec::new();
    collect_scalars(tag, entries, &mut parts)?;
    Ok(parts.join(" "))
}

fn collect_scalars<'a>(tag: &str, entries: &'a [PrivateData], out: &mut Vec<&'a str>) -> CodecResult<()> {
    for entry in entries {
        match entry {
            PrivateData::Scalar(text) => out.push(text),
            PrivateData::List(inner) => collect_scalars(tag, inner, out)?,
            PrivateData::Map(map) => {
                let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
                return Err(CodecError::invalid_value(
                    tag,
                    format!("{{{}}}", keys.join(", ")),
                    "map nested more than one list level deep",
                ));
            }
        }
    }
    Ok(())
}
