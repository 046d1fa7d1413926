use std::fmt;

/// Where the agent is within a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    AwaitingInitialReply,
    ExecutingTools,
    AwaitingFinalReply,
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TurnState::Idle => "idle",
            TurnState::AwaitingInitialReply => "awaiting initial reply",
            TurnState::ExecutingTools => "executing tools",
            TurnState::AwaitingFinalReply => "awaiting final reply",
        };
        f.write_str(label)
    }
}

/// Puts the agent back to `Idle` however the turn ends, including when the
/// turn future is dropped mid-flight.
pub(super) struct StateGuard<'a> {
    state: &'a mut TurnState,
}

impl<'a> StateGuard<'a> {
    pub(super) fn new(state: &'a mut TurnState) -> Self {
        Self { state }
    }

    pub(super) fn set(&mut self, next: TurnState) {
        log::trace!("turn state: {} -> {}", self.state, next);
        *self.state = next;
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        *self.state = TurnState::Idle;
    }
}
