use super::*;

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u64 = env_parse("__APPER_TEST_MISSING__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__APPER_TEST_VALID__", "0.25") };
    let val: f64 = env_parse("__APPER_TEST_VALID__", 0.0);
    assert!((val - 0.25).abs() < f64::EPSILON);
    unsafe { std::env::remove_var("__APPER_TEST_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__APPER_TEST_INVALID__", "soon") };
    let val: u64 = env_parse("__APPER_TEST_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__APPER_TEST_INVALID__") };
}

// =============================================================================
// ReplayConfig
// =============================================================================

#[test]
fn from_env_reads_both_keys() {
    unsafe {
        std::env::set_var("APPER_MESSAGE_SECS", "3");
        std::env::set_var("APPER_ZOOM_STEP", "0.5");
    }
    let config = ReplayConfig::from_env();
    unsafe {
        std::env::remove_var("APPER_MESSAGE_SECS");
        std::env::remove_var("APPER_ZOOM_STEP");
    }
    assert_eq!(config.message_secs, 3);
    assert!((config.zoom_step - 0.5).abs() < f64::EPSILON);
    assert!(!config.realtime);
}

#[test]
fn flags_override_environment() {
    let config = ReplayConfig::default().with_overrides(Some(2), None, true);
    assert_eq!(config.message_secs, 2);
    assert!((config.zoom_step - DEFAULT_ZOOM_STEP).abs() < f64::EPSILON);
    assert!(config.realtime);
}

#[test]
fn shell_config_uses_message_secs() {
    let config = ReplayConfig { message_secs: 4, ..ReplayConfig::default() };
    assert_eq!(config.shell().message_duration, Duration::from_secs(4));
}
