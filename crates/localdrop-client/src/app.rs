//! The state-owning event loop.
//!
//! [`App`] holds the only [`AppState`] and drains a single channel of
//! [`AppEvent`]s. User actions and finished file reads arrive on the same
//! channel, so every mutation happens on this one task, one event at a time.
//! On shutdown the loop keeps going until every started upload has landed.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use localdrop_store::KvStore;

use crate::commands;
use crate::events::{AppEvent, UiEvent};
use crate::host::Host;
use crate::render::Pane;
use crate::state::AppState;

pub struct App<S: KvStore, H: Host> {
    state: AppState<S>,
    host: H,
    page_url: String,
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
    uploads_in_flight: usize,
}

impl<S: KvStore, H: Host> App<S, H> {
    pub fn new(state: AppState<S>, host: H, page_url: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            host,
            page_url: page_url.into(),
            tx,
            rx,
            uploads_in_flight: 0,
        }
    }

    /// Handle for feeding events from other tasks or threads.
    pub fn sender(&self) -> UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub fn state(&self) -> &AppState<S> {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Uploads whose content is still being read.
    pub fn uploads_in_flight(&self) -> usize {
        self.uploads_in_flight
    }

    /// Process events until [`AppEvent::Shutdown`], then wait for pending
    /// uploads.
    pub async fn run(mut self) -> Self {
        info!("event loop started");
        while let Some(event) = self.rx.recv().await {
            if matches!(event, AppEvent::Shutdown) {
                break;
            }
            self.handle(event);
        }
        self.finish_uploads().await;
        info!("event loop stopped");
        self
    }

    /// Apply every outstanding upload read. Other events are dropped.
    async fn finish_uploads(&mut self) {
        if self.uploads_in_flight > 0 {
            info!(pending = self.uploads_in_flight, "waiting for uploads before stopping");
        }
        while self.uploads_in_flight > 0 {
            match self.rx.recv().await {
                Some(event @ AppEvent::UploadRead { .. }) => self.handle(event),
                Some(_) => {}
                None => break,
            }
        }
    }

    /// Wait for the next event and handle it. Returns `false` on shutdown.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(AppEvent::Shutdown) | None => false,
            Some(event) => {
                self.handle(event);
                true
            }
        }
    }

    /// Run one event to completion.
    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Ui(ui) => self.handle_ui(ui),
            AppEvent::UploadRead { file_name, result } => {
                self.uploads_in_flight = self.uploads_in_flight.saturating_sub(1);
                commands::files::finish_upload(&mut self.state, &mut self.host, &file_name, result)
            }
            AppEvent::Shutdown => {}
        }
    }

    fn handle_ui(&mut self, event: UiEvent) {
        debug!(?event, "ui event");
        let state = &mut self.state;
        let host = &mut self.host;

        match event {
            UiEvent::Load => {
                commands::profile::show_profile(state, host);
                commands::files::refresh_files(state, host);
                commands::messaging::refresh_chat(state, host);
            }
            UiEvent::SubmitFile(pending) => {
                if commands::files::submit_file(host, &self.tx, pending) {
                    self.uploads_in_flight += 1;
                }
            }
            UiEvent::SearchInput(keyword) => commands::files::search_input(state, host, keyword),
            UiEvent::SearchSubmit => commands::files::search_submit(state, host),
            UiEvent::SendChat(body) => commands::messaging::send_chat(state, host, &body),
            UiEvent::SaveProfileName(name) => {
                commands::profile::save_profile_name(state, host, &name)
            }
            UiEvent::CreateInvite => {
                commands::invite::create_invite(host, &self.page_url);
            }
            UiEvent::CopyContent { row } => commands::files::copy_content(state, host, row),
            UiEvent::SecondaryActivate { row } => {
                commands::files::secondary_activate(state, host, row)
            }
            UiEvent::Redraw(Pane::Files) => commands::files::refresh_files(state, host),
            UiEvent::Redraw(Pane::Chat) => commands::messaging::refresh_chat(state, host),
        }

        self.host.action_finished();
    }
}
