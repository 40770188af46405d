/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Case-insensitive substring test used for name and address sniffing.
///
/// `needle` must already be lower-case.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// True when the string is empty or whitespace only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
