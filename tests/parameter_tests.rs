use clusterform::models::{Parameter, ParameterBlock};
use clusterform::services::parameter_service::{parse_non_empty_block, parse_parameter_block};

fn param(option: &str, value: &str) -> Parameter {
    Parameter {
        option: option.to_string(),
        value: value.to_string(),
    }
}

#[test]
fn test_parse_mixed_separators() {
    let block = parse_parameter_block(Some("max_connections:100\nshared_buffers=1GB"));
    assert_eq!(
        block,
        Some(ParameterBlock::Parsed(vec![
            param("max_connections", "100"),
            param("shared_buffers", "1GB"),
        ]))
    );
}

#[test]
fn test_parse_trims_and_skips_blank_lines() {
    let block = parse_parameter_block(Some("  work_mem : 64MB \r\n\r\n\n maintenance_work_mem= 1GB"));
    assert_eq!(
        block,
        Some(ParameterBlock::Parsed(vec![
            param("work_mem", "64MB"),
            param("maintenance_work_mem", "1GB"),
        ]))
    );
}

#[test]
fn test_parse_splits_on_first_separator_only() {
    let block = parse_parameter_block(Some("archive_command=test ! -f /wal/%f && cp %p /wal/%f\nrepo1-path:/var/lib:backups"));
    assert_eq!(
        block,
        Some(ParameterBlock::Parsed(vec![
            param("archive_command", "test ! -f /wal/%f && cp %p /wal/%f"),
            param("repo1-path", "/var/lib:backups"),
        ]))
    );
}

#[test]
fn test_parse_line_without_separator() {
    let block = parse_parameter_block(Some("jit"));
    assert_eq!(block, Some(ParameterBlock::Parsed(vec![param("jit", "")])));
}

#[test]
fn test_parse_absent_and_empty_input() {
    assert_eq!(parse_parameter_block(None), None);
    assert_eq!(
        parse_parameter_block(Some("")),
        Some(ParameterBlock::Raw(String::new()))
    );
}

#[test]
fn test_non_empty_block_drops_empty_input() {
    assert_eq!(parse_non_empty_block(None), None);
    assert_eq!(parse_non_empty_block(Some("")), None);
    assert_eq!(
        parse_non_empty_block(Some("a=1")),
        Some(ParameterBlock::Parsed(vec![param("a", "1")]))
    );
}

#[test]
fn test_parsed_block_serializes_as_list() {
    let block = parse_parameter_block(Some("vm.swappiness=1")).unwrap();
    assert_eq!(
        serde_json::to_value(&block).unwrap(),
        serde_json::json!([{"option": "vm.swappiness", "value": "1"}])
    );
}
