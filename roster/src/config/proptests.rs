//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{BackupSettings, Config, OutputFormat, PoolConfig};
use super::validator::ConfigValidator;
use proptest::prelude::*;
use std::path::PathBuf;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Tsv),
        Just(OutputFormat::Table),
    ]
}

fn pool_strategy() -> impl Strategy<Value = PoolConfig> {
    (
        prop::option::of(0u32..=20),
        prop::option::of(1u32..=20),
        prop::option::of(0usize..=500),
        prop::option::of(1u64..=120),
        prop::option::of(1u64..=10_000),
    )
        .prop_map(|(min_idle, max_size, cache, timeout, busy)| PoolConfig {
            min_idle,
            max_size,
            statement_cache_capacity: cache,
            connection_timeout_seconds: timeout,
            busy_timeout_ms: busy,
        })
}

fn backup_strategy() -> impl Strategy<Value = BackupSettings> {
    (
        prop::option::of("[a-z][a-z0-9]{0,10}"),
        prop::option::of("[a-z]{1,10}\\.sql"),
    )
        .prop_map(|(tool, file)| BackupSettings {
            tool,
            file: file.map(PathBuf::from),
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("[a-z]{1,12}\\.db"),
        prop::option::of(pool_strategy()),
        prop::option::of(backup_strategy()),
        prop::option::of(output_format_strategy()),
    )
        .prop_map(|(database, pool, backup, output_format)| Config {
            database: database.map(PathBuf::from),
            pool,
            backup,
            output_format,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Higher precedence wins for every field it sets
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(&result.database, &high.database.clone().or_else(|| low.database.clone()));
        prop_assert_eq!(result.output_format, high.output_format.or(low.output_format));

        let low_pool = low.pool.clone().unwrap_or_default();
        let high_pool = high.pool.clone().unwrap_or_default();
        let pool = result.pool.clone().unwrap_or_default();
        prop_assert_eq!(pool.max_size, high_pool.max_size.or(low_pool.max_size));
        prop_assert_eq!(pool.min_idle, high_pool.min_idle.or(low_pool.min_idle));
        prop_assert_eq!(pool.busy_timeout_ms, high_pool.busy_timeout_ms.or(low_pool.busy_timeout_ms));

        let low_backup = low.backup.clone().unwrap_or_default();
        let high_backup = high.backup.clone().unwrap_or_default();
        let backup = result.backup.unwrap_or_default();
        prop_assert_eq!(backup.tool, high_backup.tool.or(low_backup.tool));
        prop_assert_eq!(backup.file, high_backup.file.or(low_backup.file));
    }

    // Empty config is identity element for merge
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Merging is associative
    #[test]
    fn config_merge_associative(
        a in config_strategy(),
        b in config_strategy(),
        c in config_strategy()
    ) {
        // (a merge b) merge c
        let mut left = a.clone();
        ConfigMerger::merge_into(&mut left, &b);
        ConfigMerger::merge_into(&mut left, &c);

        // a merge (b merge c)
        let mut right = a;
        let mut b_merge_c = b;
        ConfigMerger::merge_into(&mut b_merge_c, &c);
        ConfigMerger::merge_into(&mut right, &b_merge_c);

        prop_assert_eq!(left, right);
    }

    // Every config that passes validation produces a valid pool config
    #[test]
    fn validated_config_opens_valid_pool(config in config_strategy()) {
        let config = Config {
            database: Some(config.database.unwrap_or_else(|| PathBuf::from("x.db"))),
            ..config
        };

        if ConfigValidator::validate(&config).is_ok() {
            let db = config.database_config().unwrap();
            prop_assert!(db.validate().is_ok());
        }
    }
}
