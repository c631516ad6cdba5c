//! Environment variable precedence tests.
//!
//! Uses `figment::Jail` so env changes are sandboxed per test.

use cura_config::CuraConfig;
use figment::Jail;

#[test]
fn prefixed_env_sets_nested_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("CURALINK_SERVER__PORT", "8088");
        jail.set_env("CURALINK_DATABASE__PATH", ":memory:");
        jail.set_env("CURALINK_GENERAL__DASHBOARD_LIMIT", "3");

        let config = CuraConfig::load().expect("config loads");
        assert_eq!(config.server.port, 8088);
        assert!(config.database.is_memory());
        assert_eq!(config.general.dashboard_limit, 3);
        Ok(())
    });
}

#[test]
fn legacy_env_names_are_honoured() {
    Jail::expect_with(|jail| {
        jail.set_env("PORT", "7000");
        jail.set_env("FRONTEND_ORIGIN", "https://curalink.example");
        jail.set_env("APILAYER_API_KEY", "legacy-key");

        let config = CuraConfig::load().expect("config loads");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.cors_origin, "https://curalink.example");
        assert_eq!(config.keywords.api_key, "legacy-key");
        assert!(config.keywords.is_configured());
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_legacy_env() {
    Jail::expect_with(|jail| {
        jail.set_env("PORT", "7000");
        jail.set_env("CURALINK_SERVER__PORT", "9000");

        let config = CuraConfig::load().expect("config loads");
        assert_eq!(config.server.port, 9000);
        Ok(())
    });
}

#[test]
fn invalid_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("CURALINK_KEYWORDS__TIMEOUT_SECS", "0");
        assert!(CuraConfig::load().is_err());
        Ok(())
    });
}
