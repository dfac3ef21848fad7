use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};
use zbus::{Connection, fdo, names::BusName, proxy::CacheProperties};

use super::{
    MPRIS_PREFIX, MediaError, MediaPlayer2PlayerProxy, PLAYERCTLD_INSTANCE, PlaybackStatus,
    PlayerId, PlayerOrder, PlayerctldProxy, TrackMetadata, discovery::PlayerDiscovery,
    monitoring::PlayerMonitoring,
};
use crate::aggregator::{EventSender, PlayerHandle, PlayerSource};

/// MPRIS players on the session bus as a [`PlayerSource`].
///
/// Priority order comes from `playerctld` when it is running, otherwise
/// from the recency order kept by discovery and monitoring.
pub struct MprisSource {
    connection: Connection,
    order: PlayerOrder,
    monitoring: PlayerMonitoring,
    discovery_handle: JoinHandle<()>,
}

impl MprisSource {
    /// Start discovery and announce the players already on the bus.
    ///
    /// Existing players are announced least recent first, so the most
    /// recent one ends up active.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::InitializationFailed` if the discovery
    /// subscription cannot be set up, or `MediaError::DbusError` if
    /// listing bus names fails.
    #[instrument(skip_all)]
    pub async fn start(
        connection: Connection,
        events: EventSender,
        ignored_players: Vec<String>,
    ) -> Result<Self, MediaError> {
        info!("Starting MPRIS source");
        let order = PlayerOrder::new();
        let discovery = PlayerDiscovery::new(
            connection.clone(),
            events.clone(),
            order.clone(),
            ignored_players,
        );
        let monitoring = PlayerMonitoring::new(events, order.clone());

        let discovery_handle = discovery.start_discovery().await?;

        let mut existing = discovery.existing_players().await?;
        if let Some(ranked) = playerctld_order(&connection).await {
            existing.sort_by_key(|id| {
                ranked
                    .iter()
                    .position(|ranked_id| ranked_id == id)
                    .map_or(0, |rank| ranked.len() - rank)
            });
        }

        for player_id in existing {
            discovery.handle_player_added(player_id).await;
        }

        Ok(Self {
            connection,
            order,
            monitoring,
            discovery_handle,
        })
    }
}

#[async_trait]
impl PlayerSource for MprisSource {
    async fn priority_order(&self) -> Vec<PlayerId> {
        match playerctld_order(&self.connection).await {
            Some(order) => order,
            None => self.order.snapshot().await,
        }
    }

    #[instrument(skip(self), fields(bus_name = %player_id.bus_name()))]
    async fn attach(&self, player_id: &PlayerId) -> Result<PlayerHandle, MediaError> {
        let player_proxy = MediaPlayer2PlayerProxy::builder(&self.connection)
            .destination(player_id.bus_name().to_string())
            .map_err(MediaError::DbusError)?
            .build()
            .await
            .map_err(MediaError::DbusError)?;

        // A player that already left the bus fails here and is not tracked.
        let playback_status = PlaybackStatus::from(player_proxy.playback_status().await?.as_str());

        let metadata = match player_proxy.metadata().await {
            Ok(metadata) => TrackMetadata::from(metadata),
            Err(e) => {
                debug!("Metadata unreadable, starting empty: {e}");
                TrackMetadata::default()
            }
        };

        debug!(%playback_status, "Read initial player state");

        let mut handle = PlayerHandle::new(player_id.clone(), playback_status, metadata);
        handle.subscribe(
            self.monitoring
                .start_monitoring(player_id.clone(), player_proxy),
        );

        Ok(handle)
    }
}

impl Drop for MprisSource {
    fn drop(&mut self) {
        self.discovery_handle.abort();
    }
}

/// playerctld's player ordering, if playerctld is running.
///
/// Checks ownership first so the query never bus-activates the daemon.
async fn playerctld_order(connection: &Connection) -> Option<Vec<PlayerId>> {
    let bus_name = format!("{MPRIS_PREFIX}{PLAYERCTLD_INSTANCE}");
    let name = BusName::try_from(bus_name.as_str()).ok()?;

    let dbus_proxy = fdo::DBusProxy::new(connection).await.ok()?;
    if !dbus_proxy.name_has_owner(name).await.ok()? {
        return None;
    }

    let playerctld = PlayerctldProxy::builder(connection)
        .cache_properties(CacheProperties::No)
        .build()
        .await
        .ok()?;

    let names = match playerctld.player_names().await {
        Ok(names) => names,
        Err(e) => {
            debug!("playerctld order unavailable: {e}");
            return None;
        }
    };

    Some(
        names
            .iter()
            .map(|name| PlayerId::from_name(name))
            .filter(PlayerId::is_player)
            .collect(),
    )
}
