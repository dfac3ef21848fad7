use crate::services::mpris::PlayerId;

/// Decides which tracked player is active.
///
/// "Active" is the first eligible tracked player in the source's current
/// priority order. With a startup filter only players matching it are
/// eligible; the rest are tracked but never surface.
#[derive(Debug, Clone, Default)]
pub struct SelectionPolicy {
    filter: Option<String>,
}

impl SelectionPolicy {
    /// Create a policy, optionally restricted to one player
    ///
    /// The filter matches either the backend name (`firefox`) or the full
    /// instance name (`firefox.instance_1_42`).
    pub fn new(filter: Option<String>) -> Self {
        Self { filter }
    }

    /// Whether the player may ever become active
    pub fn is_eligible(&self, player_id: &PlayerId) -> bool {
        match &self.filter {
            Some(filter) => player_id.player_name() == filter || player_id.instance() == filter,
            None => true,
        }
    }

    /// Pick the active player after the current one went away.
    ///
    /// `tracked` is in attach order. Falls back to the most recently
    /// attached eligible player when the ordering names none of them.
    pub fn resolve(&self, order: &[PlayerId], tracked: &[&PlayerId]) -> Option<PlayerId> {
        order
            .iter()
            .find(|id| tracked.contains(id) && self.is_eligible(id))
            .or_else(|| {
                tracked
                    .iter()
                    .rev()
                    .copied()
                    .find(|id| self.is_eligible(id))
            })
            .cloned()
    }

    /// Pick the active player after a shift request.
    ///
    /// Returns `None` when nothing should change: fewer than two eligible
    /// players, or the ordering still leads with the current one.
    pub fn shift(
        &self,
        current: Option<&PlayerId>,
        order: &[PlayerId],
        tracked: &[&PlayerId],
    ) -> Option<PlayerId> {
        let eligible = tracked.iter().filter(|id| self.is_eligible(id)).count();
        if eligible < 2 {
            return None;
        }

        order
            .iter()
            .find(|id| tracked.contains(id) && self.is_eligible(id))
            .filter(|candidate| Some(*candidate) != current)
            .cloned()
    }
}
