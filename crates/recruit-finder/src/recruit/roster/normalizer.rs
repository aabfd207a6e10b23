/// Splits the legacy string encoding `"['近距離', '支援', 'ロボット']"` into its entries.
pub(crate) fn split_legacy_tags(value: &str) -> Vec<String> {
    let inner = value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');

    inner
        .split(',')
        .map(|entry| {
            entry
                .trim()
                .trim_matches(|c| c == '\'' || c == '"')
                .trim()
                .to_string()
        })
        .filter(|entry| !entry.is_empty())
        .collect()
}
