/// Parse a boolean flag from an optional string value
pub fn parse_flag(value: Option<&String>, default: bool) -> bool {
    match value {
        Some(v) => {
            let t = v.trim().to_lowercase();
            if t.is_empty() {
                default
            } else {
                matches!(t.as_str(), "1" | "true" | "yes" | "on")
            }
        }
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_falls_back_to_default() {
        assert!(parse_flag(Some(&"  ".to_string()), true));
        assert!(!parse_flag(None, false));
    }

    #[test]
    fn recognises_truthy_spellings() {
        for raw in ["1", "TRUE", "yes", " on "] {
            assert!(parse_flag(Some(&raw.to_string()), false), "{raw}");
        }
        assert!(!parse_flag(Some(&"off".to_string()), true));
    }
}
