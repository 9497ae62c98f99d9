use std::time::Instant;

use crate::event::AppEvent;
use crate::input::UiCommand;
use crate::notifier::Subscription;
use crate::runtime::listing_session::ListingSession;
use crate::ui::AppState;

/// Wires the listing session (fetch, store, ticker) to the dashboard view.
pub struct App {
    pub state: AppState,
    session: ListingSession,
    subscription: Subscription,
}

impl App {
    pub fn new(state: AppState, session: ListingSession) -> Self {
        let subscription = session.store().subscribe();
        Self {
            state,
            session,
            subscription,
        }
    }

    pub fn session(&self) -> &ListingSession {
        &self.session
    }

    /// Issue a listing request for the current filters.
    pub fn reload(&mut self) {
        self.state.begin_loading();
        let request_id = self.session.request(self.state.filters);
        tracing::debug!(request_id, "Listing requested");
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::TokensLoaded { request_id, tokens } => {
                if self.session.on_tokens_loaded(request_id, &tokens) {
                    self.state.set_listing(tokens);
                }
            }
            AppEvent::FetchFailed { request_id, message } => {
                if self.session.on_fetch_failed(request_id) {
                    self.state.set_fetch_failed(message);
                }
            }
            AppEvent::Api(status) => self.state.set_api_status(status),
            AppEvent::LogMessage(msg) => self.state.push_log(msg),
            AppEvent::Error(msg) => self.state.push_log(format!("[ERR] {}", msg)),
        }
    }

    /// Returns `true` when the user asked to quit.
    pub fn handle_command(&mut self, cmd: UiCommand) -> bool {
        match cmd {
            UiCommand::Quit => return true,
            UiCommand::NextTab => {
                self.state.filters.tab = self.state.filters.tab.next();
                self.reload();
            }
            UiCommand::PrevTab => {
                self.state.filters.tab = self.state.filters.tab.prev();
                self.reload();
            }
            UiCommand::NextTimeWindow => {
                self.state.filters.time = self.state.filters.time.next();
                self.reload();
            }
            UiCommand::SelectUp => self.state.move_selection(true),
            UiCommand::SelectDown => self.state.move_selection(false),
            UiCommand::Buy => {
                let msg = match self.state.selected_token() {
                    Some(token) => format!("Buy {} ({}) - demo only, no order sent", token.name, token.id),
                    None => "Buy: no token selected".to_string(),
                };
                self.state.push_log(msg);
            }
            UiCommand::Reload => self.reload(),
        }
        false
    }

    /// Pull the newest store snapshot into the view.
    pub fn sync(&mut self, now: Instant) {
        let snapshot = self.subscription.current();
        self.state.observe(snapshot, now);
    }

    pub fn shutdown(&mut self) {
        self.session.stop();
    }
}
