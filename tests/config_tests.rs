use std::path::Path;
use std::time::Duration;

use token_pulse::config::{Config, SourceKind};
use token_pulse::model::filter::{CategoryTab, TimeWindow};

#[test]
fn parse_default_toml() {
    let config = Config::load_from_path(Path::new("config/default.toml")).expect("default config");

    assert_eq!(config.feed.interval(), Duration::from_millis(1_000));
    let bounds = config.feed.walk_bounds();
    assert_eq!(bounds.max_swing, 0.03);
    assert_eq!(bounds.liquidity_swing, 0.01);
    assert_eq!(bounds.max_volume_step, 1_000);
    assert_eq!(bounds.floor, 1_000.0);

    assert_eq!(config.api.bind_addr, "127.0.0.1:3000");
    assert_eq!(config.api.latency_ms, 1_000);
    assert!(config.api.embedded);

    assert_eq!(config.source.kind, SourceKind::Http);
    assert_eq!(config.source.base_url, "http://127.0.0.1:3000");
    assert_eq!(config.source.latency_ms, 1_500);
    assert_eq!(config.source.timeout(), Duration::from_secs(5));

    assert_eq!(config.ui.flash_dwell(), Duration::from_millis(300));
    let filters = config.ui.default_filters().expect("filters");
    assert_eq!(filters.tab, CategoryTab::Surge);
    assert_eq!(filters.time, TimeWindow::FiveMinutes);

    assert_eq!(config.logging.file, "token-pulse.log");
}

#[test]
fn partial_sections_fill_in_defaults() {
    let config = Config::from_toml_str(
        r#"
[feed]
interval_ms = 250

[source]
kind = "mock"
latency_ms = 0
"#,
    )
    .expect("partial config");
    assert_eq!(config.feed.interval_ms, 250);
    assert_eq!(config.feed.max_swing, 0.03);
    assert_eq!(config.source.kind, SourceKind::Mock);
    assert_eq!(config.source.latency_ms, 0);
    assert_eq!(config.ui.refresh_rate_ms, 100);
}

#[test]
fn rejects_out_of_range_values() {
    for bad in [
        "[feed]\nmax_swing = 1.5\n",
        "[feed]\nliquidity_swing = -0.1\n",
        "[feed]\nfloor = -1.0\n",
        "[source]\ntimeout_ms = 0\n",
        "[ui]\nflash_dwell_ms = 0\n",
        "[ui]\nrefresh_rate_ms = 0\n",
        "[ui]\ndefault_tab = \"hot\"\n",
        "[ui]\ndefault_time = \"5M\"\n",
        "[source]\nkind = \"http\"\nbase_url = \"  \"\n",
    ] {
        assert!(Config::from_toml_str(bad).is_err(), "should reject: {}", bad);
    }
}

#[test]
fn accepts_tab_label_spelling() {
    let config = Config::from_toml_str("[ui]\ndefault_tab = \"DEX Screener\"\ndefault_time = \"1h\"\n")
        .expect("label spelling is accepted");
    let filters = config.ui.default_filters().expect("filters");
    assert_eq!(filters.tab, CategoryTab::DexScreener);
    assert_eq!(filters.time, TimeWindow::OneHour);
}

#[test]
/// Verifies `TOKEN_PULSE_CONFIG` picks the config file and
/// `TOKEN_PULSE_SOURCE_URL` replaces `source.base_url`, trimmed of
/// surrounding whitespace and the trailing slash. A blank URL is ignored.
fn load_applies_env_overrides() {
    let path = std::env::temp_dir().join(format!("token-pulse-config-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "[feed]\ninterval_ms = 777\n\n[source]\nkind = \"http\"\nbase_url = \"http://from-file:1\"\n",
    )
    .expect("write temp config");

    std::env::set_var("TOKEN_PULSE_CONFIG", &path);
    std::env::set_var("TOKEN_PULSE_SOURCE_URL", "  http://10.0.0.5:4000/  ");
    let overridden = Config::load();

    std::env::set_var("TOKEN_PULSE_SOURCE_URL", "   ");
    let blank = Config::load();

    std::env::remove_var("TOKEN_PULSE_SOURCE_URL");
    std::env::remove_var("TOKEN_PULSE_CONFIG");
    std::fs::remove_file(&path).ok();

    let overridden = overridden.expect("config from env path");
    assert_eq!(overridden.feed.interval_ms, 777);
    assert_eq!(overridden.source.base_url, "http://10.0.0.5:4000");

    let blank = blank.expect("config from env path");
    assert_eq!(blank.source.base_url, "http://from-file:1");
}
