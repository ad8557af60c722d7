use std::env;
use std::sync::Mutex;

use clusterform::config;
use once_cell::sync::Lazy;

// Tests in this file mutate process-wide environment variables.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn test_expert_mode_defaults_to_off() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::remove_var("CLUSTERFORM_EXPERT_MODE");

    assert!(!config::get_expert_mode());
}

#[test]
fn test_expert_mode_from_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::set_var("CLUSTERFORM_EXPERT_MODE", "yes");

    assert!(config::get_expert_mode());

    env::set_var("CLUSTERFORM_EXPERT_MODE", "0");
    assert!(!config::get_expert_mode());

    // Clean up
    env::remove_var("CLUSTERFORM_EXPERT_MODE");
}

#[test]
fn test_expert_mode_applies_to_documents_without_flag() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::set_var("CLUSTERFORM_EXPERT_MODE", "true");

    let state = clusterform::models::FormState::from_json_str("{}").unwrap();
    assert!(state.is_expert());

    let explicit = clusterform::models::FormState::from_json_str(r#"{"expertMode": false}"#).unwrap();
    assert!(!explicit.is_expert());

    env::remove_var("CLUSTERFORM_EXPERT_MODE");
}

#[test]
fn test_default_project_id() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::remove_var("CLUSTERFORM_PROJECT_ID");
    assert_eq!(config::get_default_project_id(), config::DEFAULT_PROJECT_ID);

    env::set_var("CLUSTERFORM_PROJECT_ID", " 42 ");
    assert_eq!(config::get_default_project_id(), 42);

    env::set_var("CLUSTERFORM_PROJECT_ID", "not-a-number");
    assert_eq!(config::get_default_project_id(), config::DEFAULT_PROJECT_ID);

    env::remove_var("CLUSTERFORM_PROJECT_ID");
}

#[test]
fn test_default_secret_id_ignores_non_positive_values() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::set_var("CLUSTERFORM_SECRET_ID", "0");
    assert_eq!(config::get_default_secret_id(), None);

    env::set_var("CLUSTERFORM_SECRET_ID", "7");
    assert_eq!(config::get_default_secret_id(), Some(7));

    env::remove_var("CLUSTERFORM_SECRET_ID");
    assert_eq!(config::get_default_secret_id(), None);
}

#[test]
fn test_load_env_file_from_path() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::remove_var("CLUSTERFORM_PROJECT_ID");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.env");
    std::fs::write(&path, "CLUSTERFORM_PROJECT_ID=9\n").unwrap();

    config::load_env_file(path.to_str());
    assert_eq!(config::get_default_project_id(), 9);

    env::remove_var("CLUSTERFORM_PROJECT_ID");
}
