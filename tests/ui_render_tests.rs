use std::time::{Duration, Instant};

use ratatui::backend::TestBackend;
use ratatui::style::Color;
use ratatui::Terminal;

use token_pulse::event::ApiStatus;
use token_pulse::fixtures::mock_tokens;
use token_pulse::model::filter::TokenFilters;
use token_pulse::model::token::DynamicRecord;
use token_pulse::store::TokenStore;
use token_pulse::ui::sparkline::sparkline;
use token_pulse::ui::{self, AppState};

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn terminal_for(state: &AppState) -> Terminal<TestBackend> {
    let backend = TestBackend::new(140, 40);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal
        .draw(|frame| ui::render(frame, state))
        .expect("render should succeed");
    terminal
}

fn draw(state: &AppState) -> String {
    buffer_text(&terminal_for(state))
}

/// Foreground colour of the first cell of `needle`, if it is on screen.
fn fg_of(terminal: &Terminal<TestBackend>, needle: &str) -> Option<Color> {
    let buf = terminal.backend().buffer();
    let area = buf.area;
    let glyphs: Vec<String> = needle.chars().map(|c| c.to_string()).collect();
    let len = glyphs.len() as u16;
    for y in 0..area.height {
        for x in 0..=area.width.saturating_sub(len) {
            if glyphs
                .iter()
                .enumerate()
                .all(|(i, g)| buf[(x + i as u16, y)].symbol() == g)
            {
                return Some(buf[(x, y)].fg);
            }
        }
    }
    None
}

fn state() -> AppState {
    AppState::new(TokenFilters::default(), Duration::from_millis(300), "mock")
}

#[test]
/// Verifies the loading state renders skeleton rows under the column headers.
fn render_skeleton_while_loading() {
    let text = draw(&state());
    assert!(text.contains("Pulse (loading)"));
    assert!(text.contains("PAIR INFO"));
    assert!(text.contains("MARKET CAP"));
    assert!(text.contains("LOADING"));
    assert!(text.contains("░"));
}

#[test]
/// Verifies a loaded listing shows each token with formatted figures and
/// sparkline glyphs.
fn render_loaded_listing() {
    let store = TokenStore::new();
    store.initialize(&mock_tokens());
    let mut state = state();
    state.set_listing(mock_tokens());
    state.observe(store.snapshot(), Instant::now());

    let text = draw(&state);
    assert!(text.contains("Pumpbook"));
    assert!(text.contains("Tiberius"));
    assert!(text.contains("$13,500"));
    assert!(text.contains("$16,600"));
    assert!(text.contains("+136.10%"));
    assert!(text.contains("-42.80%"));
    assert!(text.contains("15.05%"));
    assert!(text.contains("[ Buy ]"));
    assert!(text.contains("tokens: 6"));
    assert!(text.contains("LIVE"));
    assert!(text.contains('█'));
}

#[test]
/// Verifies live store values replace the fetched starting values on screen.
fn render_uses_live_values() {
    let store = TokenStore::new();
    store.initialize(&mock_tokens());
    let mut state = state();
    state.set_listing(mock_tokens());
    state.observe(store.snapshot(), Instant::now());

    store.apply("pumpbook", |r| DynamicRecord {
        market_cap: 14_250.0,
        ..r.clone()
    });
    state.observe(store.snapshot(), Instant::now());
    assert_eq!(state.update_count, 1);

    let text = draw(&state);
    assert!(text.contains("$14,250"));
    assert!(!text.contains("$13,500"));
    assert!(text.contains("updates: 1"));
}

#[test]
/// Verifies the failure panel is distinct from the empty-listing panel.
fn render_error_and_empty_states() {
    let mut failed = state();
    failed.set_fetch_failed("listing fetch failed (status 500): boom".to_string());
    let text = draw(&failed);
    assert!(text.contains("Failed to load tokens"));
    assert!(text.contains("ERROR"));
    assert!(!text.contains("No tokens listed"));

    let mut empty = state();
    empty.set_listing(Vec::new());
    let text = draw(&empty);
    assert!(text.contains("No tokens listed for this filter."));
    assert!(!text.contains("Failed to load tokens"));
}

#[test]
/// Verifies filter tabs, time windows and API status appear in the chrome.
fn render_filter_bar_and_api_status() {
    let mut state = state();
    state.set_api_status(ApiStatus::Listening);
    let text = draw(&state);
    for label in ["Trending", "Surge", "DEX Screener", "Pump Live", "1m", "5m", "30m", "1h"] {
        assert!(text.contains(label), "missing filter label {}", label);
    }
    assert!(text.contains("API ON"));
    assert!(text.contains("Listing API listening"));
}

#[test]
/// Verifies a changed market cap renders green on a rise, red on a fall and
/// white again once the flash dwell has passed.
fn render_flash_colours_follow_market_cap() {
    let store = TokenStore::new();
    store.initialize(&mock_tokens());
    let mut state = state();
    state.set_listing(mock_tokens());
    let t0 = Instant::now();
    state.observe(store.snapshot(), t0);
    assert_eq!(fg_of(&terminal_for(&state), "$13,500"), Some(Color::White));

    store.apply("pumpbook", |r| DynamicRecord {
        market_cap: 14_250.0,
        ..r.clone()
    });
    state.observe(store.snapshot(), t0 + Duration::from_millis(10));
    assert_eq!(fg_of(&terminal_for(&state), "$14,250"), Some(Color::Green));

    let t1 = t0 + Duration::from_millis(500);
    store.apply("pumpbook", |r| DynamicRecord {
        market_cap: 13_000.0,
        ..r.clone()
    });
    state.observe(store.snapshot(), t1);
    assert_eq!(fg_of(&terminal_for(&state), "$13,000"), Some(Color::Red));

    state.observe(store.snapshot(), t1 + Duration::from_millis(300));
    assert_eq!(fg_of(&terminal_for(&state), "$13,000"), Some(Color::White));
}

#[test]
/// Verifies sparklines take the trend colour: green when the latest sample
/// is above the first, red otherwise.
fn render_sparkline_trend_colours() {
    let store = TokenStore::new();
    let tokens = mock_tokens();
    store.initialize(&tokens);
    let mut state = state();
    state.set_listing(tokens.clone());
    state.observe(store.snapshot(), Instant::now());
    let terminal = terminal_for(&state);

    let spark = |id: &str| {
        let token = tokens.iter().find(|t| t.id == id).expect("fixture");
        sparkline(&token.market_cap.sparkline)
    };
    assert_eq!(fg_of(&terminal, &spark("pumpbook")), Some(Color::Green));
    assert_eq!(fg_of(&terminal, &spark("tiberius")), Some(Color::Red));
}
