//! Integration tests for active-player selection and status output.
//!
//! Drives the aggregator with an in-memory player source and captures
//! the emitted lines.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::{
    collections::HashMap,
    ops::ControlFlow,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use mediabar::{
    aggregator::{Aggregator, MediaEvent, PlayerHandle, PlayerSource, SelectionPolicy},
    config::{OutputConfig, OutputFormat},
    output::{Formatter, OutputSink},
    services::mpris::{MediaError, PlaybackStatus, PlayerId, TrackMetadata},
};

#[derive(Clone, Default)]
struct FakeSource {
    players: Arc<Mutex<HashMap<PlayerId, (PlaybackStatus, TrackMetadata)>>>,
    order: Arc<Mutex<Vec<PlayerId>>>,
}

impl FakeSource {
    /// Register a player and put it at the front of the ordering
    fn add(&self, name: &str, status: PlaybackStatus, metadata: TrackMetadata) -> PlayerId {
        let id = PlayerId::from_name(name);
        self.players
            .lock()
            .unwrap()
            .insert(id.clone(), (status, metadata));
        let mut order = self.order.lock().unwrap();
        order.retain(|known| known != &id);
        order.insert(0, id.clone());
        id
    }

    fn remove(&self, id: &PlayerId) {
        self.players.lock().unwrap().remove(id);
        self.order.lock().unwrap().retain(|known| known != id);
    }

    fn reorder(&self, order: &[&PlayerId]) {
        *self.order.lock().unwrap() = order.iter().map(|id| (*id).clone()).collect();
    }
}

#[async_trait]
impl PlayerSource for FakeSource {
    async fn priority_order(&self) -> Vec<PlayerId> {
        self.order.lock().unwrap().clone()
    }

    async fn attach(&self, player_id: &PlayerId) -> Result<PlayerHandle, MediaError> {
        let players = self.players.lock().unwrap();
        let (status, metadata) = players
            .get(player_id)
            .cloned()
            .ok_or_else(|| MediaError::PlayerNotFound(player_id.clone()))?;
        Ok(PlayerHandle::new(player_id.clone(), status, metadata))
    }
}

struct Harness {
    source: FakeSource,
    aggregator: Aggregator<FakeSource, Vec<u8>>,
}

impl Harness {
    fn new(format: OutputFormat, filter: Option<&str>) -> Self {
        let source = FakeSource::default();
        let output = OutputConfig {
            format,
            ..Default::default()
        };
        let aggregator = Aggregator::new(
            source.clone(),
            SelectionPolicy::new(filter.map(str::to_string)),
            Formatter::from(&output),
            OutputSink::new(Vec::new(), &output),
        );
        Self { source, aggregator }
    }

    fn text() -> Self {
        Self::new(OutputFormat::Text, None)
    }

    async fn handle(&mut self, event: MediaEvent) -> ControlFlow<()> {
        self.aggregator.handle(event).await
    }

    /// Deliver an event that must not stop the loop
    async fn send(&mut self, event: MediaEvent) {
        assert!(self.handle(event).await.is_continue());
    }

    async fn appear(
        &mut self,
        name: &str,
        status: PlaybackStatus,
        metadata: TrackMetadata,
    ) -> PlayerId {
        let id = self.source.add(name, status, metadata);
        self.send(MediaEvent::Appeared(id.clone())).await;
        id
    }

    async fn vanish(&mut self, id: &PlayerId) {
        self.source.remove(id);
        self.send(MediaEvent::Vanished(id.clone())).await;
    }

    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.aggregator.sink().get_ref().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn playing(artist: &str, title: &str) -> (PlaybackStatus, TrackMetadata) {
    (PlaybackStatus::Playing, TrackMetadata::new(artist, title))
}

mod scenarios {
    use super::*;

    #[tokio::test]
    async fn mpv_paused_then_metadata_then_playing() {
        let mut harness = Harness::text();

        let mpv = harness
            .appear("mpv", PlaybackStatus::Paused, TrackMetadata::new("", "Song1"))
            .await;
        harness
            .send(MediaEvent::MetadataChanged {
                player_id: mpv.clone(),
                metadata: TrackMetadata::new("Band", "Song1"),
            })
            .await;
        harness
            .send(MediaEvent::PlaybackChanged {
                player_id: mpv,
                status: PlaybackStatus::Playing,
            })
            .await;

        assert_eq!(harness.lines(), vec![" Song1", " Band - Song1", "Band - Song1"]);
    }

    #[tokio::test]
    async fn mpv_without_title_fallback_writes_blank() {
        let output = OutputConfig {
            format: OutputFormat::Text,
            title_fallback: false,
            ..Default::default()
        };
        let source = FakeSource::default();
        let mut aggregator = Aggregator::new(
            source.clone(),
            SelectionPolicy::default(),
            Formatter::from(&output),
            OutputSink::new(Vec::new(), &output),
        );

        let mpv = source.add("mpv", PlaybackStatus::Paused, TrackMetadata::new("", "Song1"));
        let flow = aggregator.handle(MediaEvent::Appeared(mpv)).await;

        assert!(flow.is_continue());

        assert_eq!(aggregator.sink().get_ref().as_slice(), b"\n");
    }

    #[tokio::test]
    async fn spotify_ad_then_track() {
        let mut harness = Harness::text();

        let spotify = harness
            .appear(
                "spotify",
                PlaybackStatus::Playing,
                TrackMetadata::default().with_track_id("spotify:ad:123"),
            )
            .await;
        harness
            .send(MediaEvent::MetadataChanged {
                player_id: spotify,
                metadata: TrackMetadata::new("X", "Y").with_track_id("spotify:track:abc"),
            })
            .await;

        assert_eq!(harness.lines(), vec!["AD PLAYING", "X - Y"]);
    }

    #[tokio::test]
    async fn interrupt_with_no_players() {
        let mut harness = Harness::text();

        let flow = harness.handle(MediaEvent::Interrupt).await;

        assert!(flow.is_break());
        assert_eq!(harness.aggregator.sink().get_ref().as_slice(), b"\n");
    }

    #[tokio::test]
    async fn run_stops_at_interrupt() {
        let mut harness = Harness::text();
        let mpv = harness
            .source
            .add("mpv", PlaybackStatus::Playing, TrackMetadata::new("A", "B"));

        let (tx, rx) = mediabar::aggregator::channel();
        tx.send(MediaEvent::Appeared(mpv.clone())).unwrap();
        tx.send(MediaEvent::Interrupt).unwrap();
        tx.send(MediaEvent::PlaybackChanged {
            player_id: mpv,
            status: PlaybackStatus::Paused,
        })
        .unwrap();

        harness.aggregator.run(rx).await;

        assert_eq!(harness.lines(), vec!["A - B", ""]);
    }
}

mod selection {
    use super::*;

    #[tokio::test]
    async fn newest_player_becomes_active() {
        let mut harness = Harness::text();
        let (status, metadata) = playing("A", "a");
        let first = harness.appear("mpv", status, metadata).await;
        let (status, metadata) = playing("B", "b");
        let second = harness.appear("vlc", status, metadata).await;

        assert_eq!(harness.aggregator.active_player(), Some(&second));
        assert_ne!(harness.aggregator.active_player(), Some(&first));
        assert_eq!(harness.lines(), vec!["A - a", "B - b"]);
    }

    #[tokio::test]
    async fn inactive_player_changes_are_silent() {
        let mut harness = Harness::text();
        let (status, metadata) = playing("A", "a");
        let first = harness.appear("mpv", status, metadata).await;
        let (status, metadata) = playing("B", "b");
        harness.appear("vlc", status, metadata).await;

        for _ in 0..2 {
            harness
                .send(MediaEvent::MetadataChanged {
                    player_id: first.clone(),
                    metadata: TrackMetadata::new("A", "next"),
                })
                .await;
        }
        harness
            .send(MediaEvent::PlaybackChanged {
                player_id: first.clone(),
                status: PlaybackStatus::Paused,
            })
            .await;

        assert_eq!(harness.lines().len(), 2);
        let tracked = harness
            .aggregator
            .tracked_players()
            .find(|handle| handle.id() == &first)
            .unwrap();
        assert_eq!(tracked.title(), "next");
        assert_eq!(tracked.playback_status(), PlaybackStatus::Paused);
    }

    #[tokio::test]
    async fn vanish_of_active_replays_previous() {
        let mut harness = Harness::text();
        let (status, metadata) = playing("A", "a");
        let first = harness.appear("mpv", status, metadata).await;
        let (status, metadata) = playing("B", "b");
        let second = harness.appear("vlc", status, metadata).await;

        harness.vanish(&second).await;

        assert_eq!(harness.aggregator.active_player(), Some(&first));
        assert_eq!(harness.lines(), vec!["A - a", "B - b", "A - a"]);
    }

    #[tokio::test]
    async fn vanish_follows_priority_order() {
        let mut harness = Harness::text();
        let (status, metadata) = playing("A", "a");
        let first = harness.appear("mpv", status, metadata).await;
        let (status, metadata) = playing("B", "b");
        let second = harness.appear("vlc", status, metadata).await;
        let (status, metadata) = playing("C", "c");
        let third = harness.appear("spotify", status, metadata).await;

        harness.source.reorder(&[&third, &first, &second]);
        harness.vanish(&third).await;

        assert_eq!(harness.aggregator.active_player(), Some(&first));
        assert_eq!(harness.lines().last().map(String::as_str), Some("A - a"));
    }

    #[tokio::test]
    async fn vanish_of_last_player_clears() {
        let mut harness = Harness::text();
        let (status, metadata) = playing("A", "a");
        let mpv = harness.appear("mpv", status, metadata).await;

        harness.vanish(&mpv).await;

        assert_eq!(harness.aggregator.active_player(), None);
        assert_eq!(harness.lines(), vec!["A - a", ""]);
    }

    #[tokio::test]
    async fn vanish_of_inactive_or_unknown_player_is_silent() {
        let mut harness = Harness::text();
        let (status, metadata) = playing("A", "a");
        let first = harness.appear("mpv", status, metadata).await;
        let (status, metadata) = playing("B", "b");
        let second = harness.appear("vlc", status, metadata).await;

        harness.vanish(&first).await;
        harness.vanish(&first).await;
        harness
            .send(MediaEvent::Vanished(PlayerId::from_name("never.seen")))
            .await;

        assert_eq!(harness.aggregator.active_player(), Some(&second));
        assert_eq!(harness.lines().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_appear_is_ignored() {
        let mut harness = Harness::text();
        let (status, metadata) = playing("A", "a");
        let mpv = harness.appear("mpv", status, metadata).await;

        harness.send(MediaEvent::Appeared(mpv)).await;

        assert_eq!(harness.aggregator.tracked_players().count(), 1);
        assert_eq!(harness.lines().len(), 1);
    }

    #[tokio::test]
    async fn unreadable_player_is_skipped() {
        let mut harness = Harness::text();

        harness
            .send(MediaEvent::Appeared(PlayerId::from_name("ghost")))
            .await;

        assert_eq!(harness.aggregator.tracked_players().count(), 0);
        assert_eq!(harness.aggregator.active_player(), None);
        assert!(harness.lines().is_empty());
    }

    #[tokio::test]
    async fn player_gone_before_appear_is_not_tracked() {
        let mut harness = Harness::text();
        let (status, metadata) = playing("A", "a");
        let mpv = harness.appear("mpv", status, metadata).await;
        let gone = PlayerId::from_name("vlc");

        harness.send(MediaEvent::Vanished(gone.clone())).await;
        harness.send(MediaEvent::Appeared(gone)).await;

        assert_eq!(harness.aggregator.tracked_players().count(), 1);
        assert_eq!(harness.aggregator.active_player(), Some(&mpv));
        assert_eq!(harness.lines(), vec!["A - a"]);
    }

    #[tokio::test]
    async fn unchanged_playback_status_writes_nothing() {
        let mut harness = Harness::text();
        let (status, metadata) = playing("A", "a");
        let mpv = harness.appear("mpv", status, metadata.clone()).await;

        harness
            .send(MediaEvent::PlaybackChanged {
                player_id: mpv.clone(),
                status: PlaybackStatus::Playing,
            })
            .await;
        harness
            .send(MediaEvent::MetadataChanged {
                player_id: mpv,
                metadata,
            })
            .await;

        assert_eq!(harness.lines(), vec!["A - a"]);
    }
}

mod shift {
    use super::*;

    #[tokio::test]
    async fn single_player_is_noop() {
        let mut harness = Harness::text();
        let (status, metadata) = playing("A", "a");
        harness.appear("mpv", status, metadata).await;

        harness.send(MediaEvent::ShiftRequested).await;

        assert_eq!(harness.lines().len(), 1);
    }

    #[tokio::test]
    async fn no_players_is_noop() {
        let mut harness = Harness::text();

        harness.send(MediaEvent::ShiftRequested).await;

        assert!(harness.lines().is_empty());
    }

    #[tokio::test]
    async fn picks_head_of_fresh_order() {
        let mut harness = Harness::text();
        let (status, metadata) = playing("A", "a");
        let first = harness.appear("mpv", status, metadata).await;
        let (status, metadata) = playing("B", "b");
        let second = harness.appear("vlc", status, metadata).await;

        harness.source.reorder(&[&first, &second]);
        harness.send(MediaEvent::ShiftRequested).await;

        assert_eq!(harness.aggregator.active_player(), Some(&first));
        assert_eq!(harness.lines(), vec!["A - a", "B - b", "A - a"]);

        harness
            .send(MediaEvent::MetadataChanged {
                player_id: second,
                metadata: TrackMetadata::new("B", "other"),
            })
            .await;
        assert_eq!(harness.lines().len(), 3);
    }

    #[tokio::test]
    async fn unchanged_order_is_noop() {
        let mut harness = Harness::text();
        let (status, metadata) = playing("A", "a");
        harness.appear("mpv", status, metadata).await;
        let (status, metadata) = playing("B", "b");
        harness.appear("vlc", status, metadata).await;

        harness.send(MediaEvent::ShiftRequested).await;

        assert_eq!(harness.lines().len(), 2);
    }
}

mod filter {
    use super::*;

    #[tokio::test]
    async fn only_filtered_player_produces_output() {
        let mut harness = Harness::new(OutputFormat::Text, Some("spotify"));
        let (status, metadata) = playing("X", "Y");
        let spotify = harness.appear("spotify", status, metadata).await;
        let (status, metadata) = playing("A", "a");
        let mpv = harness.appear("mpv", status, metadata).await;

        harness
            .send(MediaEvent::MetadataChanged {
                player_id: mpv.clone(),
                metadata: TrackMetadata::new("A", "b"),
            })
            .await;
        harness.source.reorder(&[&mpv, &spotify]);
        harness.send(MediaEvent::ShiftRequested).await;
        harness.vanish(&mpv).await;

        assert_eq!(harness.aggregator.active_player(), Some(&spotify));
        assert_eq!(harness.aggregator.tracked_players().count(), 1);
        assert_eq!(harness.lines(), vec!["X - Y"]);
    }

    #[tokio::test]
    async fn missing_filtered_player_never_outputs() {
        let mut harness = Harness::new(OutputFormat::Text, Some("spotify"));
        let (status, metadata) = playing("A", "a");
        harness.appear("mpv", status, metadata).await;

        assert_eq!(harness.aggregator.active_player(), None);
        assert!(harness.lines().is_empty());
    }
}

mod json {
    use super::*;

    #[tokio::test]
    async fn records_carry_player_class() {
        let mut harness = Harness::new(OutputFormat::Json, None);
        let mpv = harness
            .appear("mpv", PlaybackStatus::Paused, TrackMetadata::default())
            .await;
        harness.vanish(&mpv).await;

        assert_eq!(
            harness.lines(),
            vec![
                r#"{"text":"","class":"custom-mpv","alt":"mpv"}"#.to_string(),
                String::new(),
            ]
        );
    }

    #[tokio::test]
    async fn instance_names_use_backend_name() {
        let mut harness = Harness::new(OutputFormat::Json, None);
        let (status, metadata) = playing("A", "a");
        harness
            .appear("firefox.instance_1_42", status, metadata)
            .await;

        let line: serde_json::Value = serde_json::from_str(&harness.lines()[0]).unwrap();
        assert_eq!(line["text"], "A - a");
        assert_eq!(line["class"], "custom-firefox");
        assert_eq!(line["alt"], "firefox");
    }
}
