/// Freshness of a track's predicted position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// The gap since the last detection is within tolerance
    #[default]
    Fresh,
    /// Too many frames without a detection; only a new update revives it
    Stale,
}

impl TrackState {
    pub fn is_fresh(self) -> bool {
        self == TrackState::Fresh
    }
}
