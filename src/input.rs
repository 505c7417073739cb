//! Per-tick key snapshot handed to the simulation by the input collaborator.

/// Held keys plus edge-triggered requests.
///
/// `left`, `right` and `fire` are level-triggered and only read.  `escape` is
/// an edge: the host sets it on key press and the game clears it through
/// [`InputSnapshot::take_escape`] once consumed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub escape: bool,
}

impl InputSnapshot {
    /// Returns the pending escape edge and clears it.
    pub fn take_escape(&mut self) -> bool {
        std::mem::take(&mut self.escape)
    }

    /// Horizontal direction: -1 left, +1 right, 0 when both or neither.
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
