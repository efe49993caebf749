//! Tests for layered configuration.

use figment::Jail;

use crate::config::SimdConfig;
use crate::simd_native::InstructionTier;

#[test]
fn test_defaults() {
    let config = SimdConfig::default();
    assert_eq!(config.max_tier, None);
    assert!(config.self_test);
    assert!(!config.warmup);
}

#[test]
fn test_load_without_file_or_env_gives_defaults() {
    Jail::expect_with(|_jail| {
        assert_eq!(SimdConfig::load().unwrap(), SimdConfig::default());
        Ok(())
    });
}

#[test]
fn test_load_reads_toml_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "simdist.toml",
            r#"
                max_tier = "sse4.1"
                warmup = true
            "#,
        )?;
        let config = SimdConfig::load().unwrap();
        assert_eq!(config.max_tier, Some(InstructionTier::Sse41));
        assert!(config.warmup);
        assert!(config.self_test);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("simdist.toml", "max_tier = \"avx512f\"")?;
        jail.set_env("SIMDIST_MAX_TIER", "baseline");
        jail.set_env("SIMDIST_SELF_TEST", "false");
        let config = SimdConfig::load().unwrap();
        assert_eq!(config.max_tier, Some(InstructionTier::Baseline));
        assert!(!config.self_test);
        Ok(())
    });
}

#[test]
fn test_from_file_uses_explicit_path() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "max_tier = \"avx\"")?;
        let config = SimdConfig::from_file("custom.toml").unwrap();
        assert_eq!(config.max_tier, Some(InstructionTier::Avx));
        Ok(())
    });
}

#[test]
fn test_unknown_tier_is_config_error() {
    Jail::expect_with(|jail| {
        jail.set_env("SIMDIST_MAX_TIER", "mmx");
        let err = SimdConfig::load().unwrap_err();
        assert!(matches!(err, crate::Error::Config(message) if message.contains("mmx")));
        Ok(())
    });
}

#[test]
fn test_with_max_tier() {
    let config = SimdConfig::default().with_max_tier(InstructionTier::Avx2);
    assert_eq!(config.max_tier, Some(InstructionTier::Avx2));
}
