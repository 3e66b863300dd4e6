//! Serde default-value functions for config fields.

pub(super) fn default_name() -> String {
    "Babel".to_string()
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_command_prefix() -> String {
    "!".to_string()
}
pub(super) fn default_notice_ttl_secs() -> u64 {
    10
}
pub(super) fn default_message_cache_size() -> usize {
    200
}
pub(super) fn default_backend() -> String {
    "google".to_string()
}
pub(super) fn default_detect_prefix_chars() -> usize {
    1000
}
pub(super) fn default_timeout_secs() -> u64 {
    30
}
pub(super) fn default_google_base_url() -> String {
    "https://translate.googleapis.com".to_string()
}
pub(super) fn default_libretranslate_url() -> String {
    "http://localhost:5000".to_string()
}
