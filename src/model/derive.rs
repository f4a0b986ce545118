//! Settings inferred from one another when a section is sealed

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::option_types::{OptionTypeRegistry, INDENT_SIZE, INDENT_STYLE, TAB_WIDTH};

use super::option::EditorOption;

/// First version in which `indent_style = tab` implies `indent_size = tab`.
const INDENT_SIZE_TAB_SINCE: &str = "0.10.0";

/// Compare dotted version strings numerically, component by component.
///
/// Missing components count as zero, as do components that are not numbers.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.trim()
            .split('.')
            .map(|part| part.parse().unwrap_or(0))
            .collect()
    };
    let (a, b) = (parse(a), parse(b));
    let len = a.len().max(b.len());

    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Fill in `indent_size` and `tab_width` from each other.
///
/// Rules run once, in order:
/// 1. `indent_style = tab` without `indent_size` (version >= 0.10.0) gives `indent_size = tab`
/// 2. `indent_size` other than `tab` without `tab_width` gives `tab_width = <indent_size>`
/// 3. `indent_size = tab` with `tab_width` gives `indent_size = <tab_width>`
///
/// Derived options replace existing entries in place.
pub fn apply_derivation_rules(
    options: &mut IndexMap<String, EditorOption>,
    version: &str,
    registry: &OptionTypeRegistry,
) {
    let value_of = |options: &IndexMap<String, EditorOption>, name: &str| {
        options.get(name).map(|o| o.source_value().to_string())
    };

    let indent_style = value_of(options, INDENT_STYLE);
    let mut indent_size = value_of(options, INDENT_SIZE);
    let tab_width = value_of(options, TAB_WIDTH);

    if indent_style.as_deref() == Some("tab")
        && indent_size.is_none()
        && compare_versions(version, INDENT_SIZE_TAB_SINCE).is_ge()
    {
        options.insert(
            INDENT_SIZE.to_string(),
            EditorOption::new(registry, INDENT_SIZE, "tab"),
        );
        indent_size = Some("tab".to_string());
    }

    let tab_width = match (&indent_size, tab_width) {
        (Some(size), None) if size != "tab" => {
            options.insert(
                TAB_WIDTH.to_string(),
                EditorOption::new(registry, TAB_WIDTH, size),
            );
            Some(size.clone())
        }
        (_, tab_width) => tab_width,
    };

    if let (Some("tab"), Some(width)) = (indent_size.as_deref(), tab_width) {
        options.insert(
            INDENT_SIZE.to_string(),
            EditorOption::new(registry, INDENT_SIZE, &width),
        );
    }
}
