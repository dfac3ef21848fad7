//! Active-player selection and event aggregation.
//!
//! One [`Aggregator`] drains the event queue, keeps the set of tracked
//! players, decides which one is active and writes a status line whenever
//! the active player's state changes.

mod events;
mod handle;
mod selection;
mod source;

pub use events::{EventReceiver, EventSender, MediaEvent, channel};
pub use handle::{PlayerHandle, PlayerState};
pub use selection::SelectionPolicy;
pub use source::PlayerSource;

use std::{io::Write, ops::ControlFlow};

use tracing::{debug, info, instrument, warn};

use crate::{
    output::{Formatter, OutputSink},
    services::mpris::{PlaybackStatus, PlayerId, TrackMetadata},
};

/// Owns the tracked players and turns events into status lines.
pub struct Aggregator<S, W: Write> {
    source: S,
    policy: SelectionPolicy,
    formatter: Formatter,
    sink: OutputSink<W>,
    /// Tracked players in attach order
    players: Vec<PlayerHandle>,
    active: Option<PlayerId>,
}

impl<S: PlayerSource, W: Write> Aggregator<S, W> {
    /// Create an aggregator with no tracked players
    pub fn new(
        source: S,
        policy: SelectionPolicy,
        formatter: Formatter,
        sink: OutputSink<W>,
    ) -> Self {
        Self {
            source,
            policy,
            formatter,
            sink,
            players: Vec::new(),
            active: None,
        }
    }

    /// Drain the event queue until an interrupt arrives or every
    /// producer has gone away.
    pub async fn run(&mut self, mut events: EventReceiver) {
        info!("Waiting for player events");

        while let Some(event) = events.recv().await {
            if self.handle(event).await.is_break() {
                info!("Interrupted, stopping event loop");
                return;
            }
        }

        debug!("All event producers closed");
    }

    /// Process a single event.
    ///
    /// Returns `ControlFlow::Break` once the loop should stop.
    pub async fn handle(&mut self, event: MediaEvent) -> ControlFlow<()> {
        match event {
            MediaEvent::Appeared(player_id) => self.on_appeared(player_id).await,
            MediaEvent::Vanished(player_id) => self.on_vanished(&player_id).await,
            MediaEvent::PlaybackChanged { player_id, status } => {
                self.on_playback_changed(&player_id, status);
            }
            MediaEvent::MetadataChanged {
                player_id,
                metadata,
            } => self.on_metadata_changed(&player_id, metadata),
            MediaEvent::ShiftRequested => self.on_shift().await,
            MediaEvent::Interrupt => {
                self.sink.clear();
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    /// Currently active player
    pub fn active_player(&self) -> Option<&PlayerId> {
        self.active.as_ref()
    }

    /// Tracked players in attach order
    pub fn tracked_players(&self) -> impl Iterator<Item = &PlayerHandle> {
        self.players.iter()
    }

    /// Output sink
    pub fn sink(&self) -> &OutputSink<W> {
        &self.sink
    }

    #[instrument(skip(self), fields(bus_name = %player_id.bus_name()))]
    async fn on_appeared(&mut self, player_id: PlayerId) {
        if self.find(&player_id).is_some() {
            debug!("Player already tracked");
            return;
        }

        let handle = match self.source.attach(&player_id).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Failed to attach player: {e}");
                return;
            }
        };
        self.players.push(handle);

        if self.policy.is_eligible(&player_id) {
            info!("Player became active");
            self.active = Some(player_id);
            self.emit_active();
        } else {
            debug!("Player tracked but excluded by filter");
        }
    }

    #[instrument(skip(self), fields(bus_name = %player_id.bus_name()))]
    async fn on_vanished(&mut self, player_id: &PlayerId) {
        let Some(index) = self.find(player_id) else {
            debug!("Ignoring vanish of untracked player");
            return;
        };
        self.players.remove(index);
        info!("Player vanished");

        if self.active.as_ref() != Some(player_id) {
            return;
        }

        let order = self.source.priority_order().await;
        let tracked: Vec<&PlayerId> = self.players.iter().map(PlayerHandle::id).collect();
        self.active = self.policy.resolve(&order, &tracked);

        match &self.active {
            Some(next) => {
                info!(next = %next, "Active player re-resolved");
                self.emit_active();
            }
            None => {
                info!("No active player left");
                self.sink.clear();
            }
        }
    }

    fn on_playback_changed(&mut self, player_id: &PlayerId, status: PlaybackStatus) {
        let Some(index) = self.find(player_id) else {
            return;
        };
        if !self.players[index].apply_playback_status(status) {
            return;
        }
        debug!(bus_name = %player_id, %status, "Playback status changed");

        if self.is_active(player_id) {
            self.emit_active();
        }
    }

    fn on_metadata_changed(&mut self, player_id: &PlayerId, metadata: TrackMetadata) {
        let Some(index) = self.find(player_id) else {
            return;
        };
        if !self.players[index].apply_metadata(metadata) {
            return;
        }
        debug!(bus_name = %player_id, "Metadata changed");

        if self.is_active(player_id) {
            self.emit_active();
        }
    }

    #[instrument(skip(self))]
    async fn on_shift(&mut self) {
        if self.players.is_empty() {
            debug!("Shift requested with no players");
            return;
        }

        let order = self.source.priority_order().await;
        let tracked: Vec<&PlayerId> = self.players.iter().map(PlayerHandle::id).collect();

        match self.policy.shift(self.active.as_ref(), &order, &tracked) {
            Some(next) => {
                info!(next = %next, "Shifted active player");
                self.active = Some(next);
                self.emit_active();
            }
            None => debug!("Shift left the active player unchanged"),
        }
    }

    fn find(&self, player_id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|handle| handle.id() == player_id)
    }

    fn is_active(&self, player_id: &PlayerId) -> bool {
        self.active.as_ref() == Some(player_id)
    }

    fn emit_active(&mut self) {
        let Some(handle) = self
            .active
            .as_ref()
            .and_then(|id| self.players.iter().find(|handle| handle.id() == id))
        else {
            return;
        };

        let text = self.formatter.format(handle.state());
        self.sink.emit(text.as_deref(), handle.player_name());
    }
}
