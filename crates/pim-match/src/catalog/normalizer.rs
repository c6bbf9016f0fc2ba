/// Lookup key for part names: lower-cased with every whitespace character removed.
pub fn normalize_name(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub(crate) fn clean_identifier(value: &str) -> String {
    value.replace(['\r', '\n'], "").trim().to_string()
}
