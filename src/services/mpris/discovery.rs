use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};
use zbus::{Connection, fdo};

use super::{MPRIS_PREFIX, MediaError, PlayerId, PlayerOrder};
use crate::aggregator::{EventSender, MediaEvent};

/// Watches the session bus for MPRIS players coming and going
#[derive(Clone)]
pub struct PlayerDiscovery {
    connection: Connection,
    events: EventSender,
    order: PlayerOrder,
    ignored_players: Vec<String>,
}

impl PlayerDiscovery {
    /// Create a new player discovery handler
    ///
    /// Players whose bus name contains any of `ignored_players` are never
    /// announced.
    pub fn new(
        connection: Connection,
        events: EventSender,
        order: PlayerOrder,
        ignored_players: Vec<String>,
    ) -> Self {
        Self {
            connection,
            events,
            order,
            ignored_players,
        }
    }

    /// Start monitoring for players appearing and vanishing
    ///
    /// # Errors
    /// Returns error if D-Bus proxy creation or signal subscription fails
    #[instrument(skip(self))]
    pub async fn start_discovery(&self) -> Result<JoinHandle<()>, MediaError> {
        info!("Starting MPRIS player discovery monitoring");
        let dbus_proxy = fdo::DBusProxy::new(&self.connection)
            .await
            .map_err(|e| MediaError::InitializationFailed(format!("DBus proxy failed: {e}")))?;

        let mut name_owner_changed =
            dbus_proxy.receive_name_owner_changed().await.map_err(|e| {
                MediaError::InitializationFailed(format!("Signal subscription failed: {e}"))
            })?;

        let discovery = self.clone();
        let handle = tokio::spawn(async move {
            while let Some(signal) = name_owner_changed.next().await {
                let Ok(args) = signal.args() else {
                    continue;
                };

                if !args.name().starts_with(MPRIS_PREFIX) {
                    continue;
                }

                let player_id = PlayerId::from_bus_name(args.name());

                let delivered = match (args.old_owner().as_deref(), args.new_owner().as_deref()) {
                    (Some(_), None) => discovery.handle_player_removed(player_id).await,
                    (None, Some(_)) => discovery.handle_player_added(player_id).await,
                    _ => true,
                };

                if !delivered {
                    debug!("Event queue closed, stopping discovery");
                    break;
                }
            }
        });

        info!("MPRIS player discovery monitoring started successfully");
        Ok(handle)
    }

    /// List players already on the bus
    ///
    /// # Errors
    /// Returns error if D-Bus proxy creation or name listing fails
    #[instrument(skip(self))]
    pub async fn existing_players(&self) -> Result<Vec<PlayerId>, MediaError> {
        let dbus_proxy = fdo::DBusProxy::new(&self.connection)
            .await
            .map_err(|e| MediaError::InitializationFailed(format!("DBus proxy failed: {e}")))?;

        let names = dbus_proxy
            .list_names()
            .await
            .map_err(|e| MediaError::DbusError(e.into()))?;

        let players: Vec<PlayerId> = names
            .iter()
            .map(|name| PlayerId::from_bus_name(name))
            .filter(PlayerId::is_player)
            .collect();

        info!(count = players.len(), "Found existing MPRIS players");
        Ok(players)
    }

    /// Announce a player. Returns `false` once the event queue is closed.
    #[instrument(skip(self), fields(bus_name = %player_id.bus_name()))]
    pub async fn handle_player_added(&self, player_id: PlayerId) -> bool {
        if !player_id.is_player() {
            return true;
        }

        if self.should_ignore_player(player_id.bus_name()) {
            info!("Ignoring player based on configuration");
            return true;
        }

        info!("MPRIS player appeared");
        self.order.promote(&player_id).await;
        self.events.send(MediaEvent::Appeared(player_id)).is_ok()
    }

    /// Announce a player leaving. Returns `false` once the event queue is closed.
    #[instrument(skip(self), fields(bus_name = %player_id.bus_name()))]
    pub async fn handle_player_removed(&self, player_id: PlayerId) -> bool {
        if !player_id.is_player() {
            return true;
        }

        info!("MPRIS player vanished");
        self.order.remove(&player_id).await;
        self.events.send(MediaEvent::Vanished(player_id)).is_ok()
    }

    /// Check if a player should be ignored based on its bus name
    pub fn should_ignore_player(&self, bus_name: &str) -> bool {
        self.ignored_players
            .iter()
            .any(|pattern| bus_name.contains(pattern.as_str()))
    }
}
