pub mod dashboard;
pub mod sparkline;
pub mod table;

use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::event::ApiStatus;
use crate::fetch::FetchState;
use crate::flash::FlashBoard;
use crate::model::filter::TokenFilters;
use crate::model::token::TokenRecord;
use crate::store::Snapshot;

use dashboard::{FilterBar, KeybindBar, LogPanel, StatusBar};
use table::{EmptyListingPanel, FetchErrorPanel, SkeletonTable, TokenTable};

const MAX_LOG_MESSAGES: usize = 200;

/// Everything the dashboard draws. Mutated only on the UI thread.
pub struct AppState {
    pub filters: TokenFilters,
    pub fetch: FetchState,
    pub snapshot: Arc<Snapshot>,
    pub flashes: FlashBoard,
    pub selected: usize,
    /// Store changes observed since the last listing load.
    pub update_count: u64,
    pub api_listening: bool,
    pub source_label: String,
    pub log_messages: Vec<String>,
    /// Reference time for flash decay in the next frame.
    pub frame_time: Instant,
}

impl AppState {
    pub fn new(filters: TokenFilters, flash_dwell: Duration, source_label: &str) -> Self {
        Self {
            filters,
            fetch: FetchState::Loading,
            snapshot: Arc::new(Snapshot::default()),
            flashes: FlashBoard::new(flash_dwell),
            selected: 0,
            update_count: 0,
            api_listening: false,
            source_label: source_label.to_string(),
            log_messages: Vec::new(),
            frame_time: Instant::now(),
        }
    }

    pub fn push_log(&mut self, msg: String) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.log_messages.push(format!("{} {}", stamp, msg));
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    pub fn tokens(&self) -> &[TokenRecord] {
        self.fetch.tokens().unwrap_or(&[])
    }

    pub fn selected_token(&self) -> Option<&TokenRecord> {
        self.tokens().get(self.selected)
    }

    pub fn move_selection(&mut self, up: bool) {
        let len = self.tokens().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if up {
            self.selected.saturating_sub(1)
        } else {
            (self.selected + 1).min(len - 1)
        };
    }

    /// A new listing request went out: show skeletons, drop flash baselines.
    pub fn begin_loading(&mut self) {
        self.fetch = FetchState::Loading;
        self.snapshot = Arc::new(Snapshot::default());
        self.flashes.reset();
        self.selected = 0;
        self.update_count = 0;
    }

    pub fn set_listing(&mut self, tokens: Vec<TokenRecord>) {
        self.push_log(format!("Loaded {} tokens ({} {})", tokens.len(), self.filters.tab, self.filters.time));
        self.fetch = FetchState::Loaded(tokens);
        self.selected = 0;
    }

    pub fn set_fetch_failed(&mut self, message: String) {
        self.push_log(format!("[ERR] Listing fetch failed: {}", message));
        self.fetch = FetchState::Failed(message);
    }

    /// Take in the newest store snapshot. The first snapshot after a load
    /// only sets flash baselines.
    pub fn observe(&mut self, snapshot: Arc<Snapshot>, now: Instant) {
        self.frame_time = now;
        if snapshot.version == self.snapshot.version {
            return;
        }
        if !self.snapshot.is_empty() && !snapshot.is_empty() {
            self.update_count += 1;
        }
        self.flashes.observe(&snapshot, now);
        self.snapshot = snapshot;
    }

    pub fn set_api_status(&mut self, status: ApiStatus) {
        self.api_listening = status == ApiStatus::Listening;
        match status {
            ApiStatus::Listening => self.push_log("Listing API listening".to_string()),
            ApiStatus::Stopped => self.push_log("[WARN] Listing API stopped".to_string()),
        }
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(1), // filters
            Constraint::Min(10),   // token table
            Constraint::Length(6), // system log
            Constraint::Length(1), // keybinds
        ])
        .split(frame.area());

    frame.render_widget(
        StatusBar {
            filters: state.filters,
            fetch_label: state.fetch.label(),
            source_label: &state.source_label,
            api_listening: state.api_listening,
            update_count: state.update_count,
            tracked: state.snapshot.len(),
        },
        outer[0],
    );

    frame.render_widget(FilterBar { filters: state.filters }, outer[1]);

    match &state.fetch {
        FetchState::Loading => frame.render_widget(SkeletonTable, outer[2]),
        FetchState::Failed(message) => frame.render_widget(FetchErrorPanel { message }, outer[2]),
        FetchState::Loaded(tokens) if tokens.is_empty() => {
            frame.render_widget(EmptyListingPanel, outer[2])
        }
        FetchState::Loaded(tokens) => frame.render_widget(
            TokenTable::new(tokens, &state.snapshot, &state.flashes, state.frame_time)
                .selected(Some(state.selected)),
            outer[2],
        ),
    }

    frame.render_widget(LogPanel::new(&state.log_messages), outer[3]);
    frame.render_widget(KeybindBar, outer[4]);
}
