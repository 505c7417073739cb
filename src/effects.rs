//! Side effects reported by a simulation tick.

/// Something the UI must react to.  Produced in tick order by
/// `GameState::step`; the core never applies them itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    ToggleModal,
    IncrementScore(u32),
    PlayerDeath,
}

/// UI callbacks invoked for each effect.
pub trait UpdateUiFunctions {
    fn toggle_modal(&mut self);
    fn increment_score(&mut self, amount: u32);
    fn player_death(&mut self);
}

impl Effect {
    pub fn apply<U: UpdateUiFunctions + ?Sized>(self, ui: &mut U) {
        match self {
            Effect::ToggleModal => ui.toggle_modal(),
            Effect::IncrementScore(amount) => ui.increment_score(amount),
            Effect::PlayerDeath => ui.player_death(),
        }
    }
}
