use base64::{engine::general_purpose, Engine as _};

/// Format a single `KEY=value` env entry
pub fn plain_env_entry(key: &str, value: &str) -> String {
    format!("{}={}", key, value)
}

/// Format a single `KEY=base64(value)` env entry
pub fn base64_env_entry(key: &str, value: &str) -> String {
    format!("{}={}", key, general_purpose::STANDARD.encode(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_value_only() {
        assert_eq!(base64_env_entry("TOKEN", "secret"), "TOKEN=c2VjcmV0");
        assert_eq!(plain_env_entry("TOKEN", "secret"), "TOKEN=secret");
    }
}
