mod common;

use clusterform::services::{map_form_values_to_yaml_editor, parse_yaml_editor_values, render_yaml};
use common::{cloud_form_json, form, local_form_json, with};
use serde_json::json;

#[test]
fn test_yaml_editor_values_for_cloud_form() {
    let vars = map_form_values_to_yaml_editor(&form(cloud_form_json("azure"))).unwrap();

    assert_eq!(vars.get("environment_id"), Some(&json!(2)));
    assert_eq!(vars.get("cloud_provider"), Some(&json!("azure")));
    assert_eq!(vars.get("ansible_user"), Some(&json!("azureadmin")));
    assert_eq!(vars.get("server_image"), Some(&json!("ami-0abc")));
}

#[test]
fn test_yaml_editor_values_for_local_form_inline_password() {
    let state = form(with(
        local_form_json(),
        json!({"authenticationMethod": "password", "password": "pw", "isHaproxyLoadBalancer": true}),
    ));
    let vars = map_form_values_to_yaml_editor(&state).unwrap();

    assert_eq!(vars.get("description"), Some(&json!("on-prem cluster")));
    assert_eq!(vars.get("with_haproxy_load_balancing"), Some(&json!(true)));
    assert_eq!(vars.get("ansible_ssh_pass"), Some(&json!("pw")));
    assert!(!vars.contains_key("cloud_provider"));
}

#[test]
fn test_render_yaml_round_trips_through_editor() {
    let vars = map_form_values_to_yaml_editor(&form(local_form_json())).unwrap();
    let text = render_yaml(&vars).unwrap();

    assert!(text.contains("patroni_cluster_name: pg-local"));
    assert_eq!(parse_yaml_editor_values(&text), Some(vars));
}

#[test]
fn test_parse_yaml_editor_values() {
    let doc = parse_yaml_editor_values(
        "cloud_provider: aws\nserver_count: 3\nssh_public_keys:\n  - 'ssh-rsa AAA'\n",
    )
    .unwrap();

    assert_eq!(doc.get("cloud_provider"), Some(&json!("aws")));
    assert_eq!(doc.get("server_count"), Some(&json!(3)));
    assert_eq!(doc.get("ssh_public_keys"), Some(&json!(["ssh-rsa AAA"])));
}

#[test]
fn test_parse_yaml_editor_rejects_invalid_documents() {
    assert_eq!(parse_yaml_editor_values("key: [unclosed"), None);
    assert_eq!(parse_yaml_editor_values("- just\n- a list\n"), None);
    assert_eq!(parse_yaml_editor_values("plain scalar"), None);
    assert_eq!(parse_yaml_editor_values(""), None);
}
