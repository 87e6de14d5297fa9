use super::*;

// =============================================================================
// env_parse — unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_parse_reads_value() {
    let key = "__TEST_CFG_PARSE_U32_311__";
    unsafe { std::env::set_var(key, " 42 ") };
    assert_eq!(env_parse::<u32>(key, 7), 42);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_invalid_falls_back() {
    let key = "__TEST_CFG_PARSE_BAD_312__";
    unsafe { std::env::set_var(key, "lots") };
    assert_eq!(env_parse::<usize>(key, 5), 5);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_unset_falls_back() {
    assert!((env_parse::<f32>("__TEST_CFG_SURELY_UNSET_313__", 0.7) - 0.7).abs() < f32::EPSILON);
}

// =============================================================================
// defaults
// =============================================================================

#[test]
fn chatbot_defaults() {
    let cfg = ChatbotConfig::default();
    assert!((cfg.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(cfg.max_tokens, 1000);
    assert_eq!(cfg.retrieval_top_k, 5);
}

#[test]
fn auth_defaults() {
    let cfg = AuthConfig::default();
    assert_eq!(cfg.secret_key, DEV_SECRET_KEY);
    assert_eq!(cfg.algorithm, Algorithm::HS256);
    assert_eq!(cfg.access_token_expire_minutes, 30);
}

// =============================================================================
// from_env — the only test touching these shared variables.
// =============================================================================

#[test]
fn from_env_reads_and_validates() {
    unsafe {
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("PORT");
        std::env::remove_var("SECRET_KEY");
        std::env::remove_var("ALGORITHM");
    }
    assert!(matches!(AppConfig::from_env(), Err(ConfigError::Missing("DATABASE_URL"))));

    unsafe {
        std::env::set_var("DATABASE_URL", "postgres://u:p@localhost/textbook");
        std::env::set_var("SECRET_KEY", "s3cret");
        std::env::set_var("ALGORITHM", "HS512");
    }
    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.auth.secret_key, "s3cret");
    assert_eq!(cfg.auth.algorithm, Algorithm::HS512);

    unsafe { std::env::set_var("ALGORITHM", "ROT13") };
    let err = AppConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("ALGORITHM"));

    unsafe { std::env::set_var("PORT", "not-a-port") };
    unsafe { std::env::set_var("ALGORITHM", "HS256") };
    assert!(matches!(AppConfig::from_env(), Err(ConfigError::Invalid { key: "PORT", .. })));

    unsafe {
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("PORT");
        std::env::remove_var("SECRET_KEY");
        std::env::remove_var("ALGORITHM");
    }
}
