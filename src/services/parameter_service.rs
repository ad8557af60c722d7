use crate::models::{Parameter, ParameterBlock};

/// Parse a multi-line `option:value` / `option=value` block.
///
/// Each line is split on its first `:` or `=`; option and value are trimmed.
/// Blank lines are skipped and a line without a separator yields an empty value.
/// Empty input is returned as-is instead of an empty list, so callers check
/// for content before invoking.
pub fn parse_parameter_block(value: Option<&str>) -> Option<ParameterBlock> {
    let raw = value?;
    if raw.is_empty() {
        return Some(ParameterBlock::Raw(raw.to_string()));
    }
    let parameters = raw
        .split(['\n', '\r'])
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once([':', '=']) {
            Some((option, value)) => Parameter {
                option: option.trim().to_string(),
                value: value.trim().to_string(),
            },
            None => Parameter {
                option: line.trim().to_string(),
                value: String::new(),
            },
        })
        .collect();
    Some(ParameterBlock::Parsed(parameters))
}

/// Parse a block only when it carries content
pub fn parse_non_empty_block(value: Option<&str>) -> Option<ParameterBlock> {
    value
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| parse_parameter_block(Some(raw)))
}
