//! Template code to category lookup.

use crate::models::AppConfig;

const DEFAULT_ICON: &str = "📦";

/// Category of a template code, and the prefix it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: String,
    pub prefix: String,
}

/// Letters of `code` with every digit removed.
pub fn prefix_of(code: &str) -> String {
    code.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Classify `code` (uppercase) using the configured tables.
///
/// Fixed-size codes map to the fixed-size category, which is also used as the
/// prefix. Any other code maps through its prefix, falling back to the prefix
/// itself for unknown ones.
pub fn classify(config: &AppConfig, code: &str) -> Classification {
    if config.fixed_size_codes.iter().any(|c| c == code) {
        return Classification {
            category: config.fixed_size_category.clone(),
            prefix: config.fixed_size_category.clone(),
        };
    }

    let prefix = prefix_of(code);
    let category = config
        .categories
        .get(&prefix)
        .cloned()
        .unwrap_or_else(|| prefix.clone());
    Classification { category, prefix }
}

pub fn category_for(config: &AppConfig, code: &str) -> String {
    classify(config, code).category
}

/// First run of digits in `code`, used to order a category; 0 if none.
pub fn number_of(code: &str) -> u64 {
    code.chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

pub fn icon_for<'a>(config: &'a AppConfig, category: &str) -> &'a str {
    config
        .category_icons
        .get(category)
        .map(String::as_str)
        .unwrap_or(DEFAULT_ICON)
}
