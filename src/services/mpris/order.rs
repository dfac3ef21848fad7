use std::sync::Arc;

use tokio::sync::RwLock;

use super::PlayerId;

/// Most-recently-active ordering of known players.
///
/// Players move to the front when they appear and when they start
/// playing. Shared between discovery and property monitoring.
#[derive(Debug, Clone, Default)]
pub struct PlayerOrder {
    players: Arc<RwLock<Vec<PlayerId>>>,
}

impl PlayerOrder {
    /// Create an empty ordering
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a player to the front, inserting it if unknown
    pub async fn promote(&self, player_id: &PlayerId) {
        let mut players = self.players.write().await;
        players.retain(|id| id != player_id);
        players.insert(0, player_id.clone());
    }

    /// Forget a player
    pub async fn remove(&self, player_id: &PlayerId) {
        let mut players = self.players.write().await;
        players.retain(|id| id != player_id);
    }

    /// Current ordering, most recent first
    pub async fn snapshot(&self) -> Vec<PlayerId> {
        self.players.read().await.clone()
    }
}
