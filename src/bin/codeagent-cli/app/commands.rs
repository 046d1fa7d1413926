/// Words typed at the prompt that control the session instead of being
/// sent to the model.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReplCommand {
    Quit,
    Help,
    Reset,
    Clear,
}

impl ReplCommand {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "quit" | "exit" | "bye" => Some(Self::Quit),
            "help" => Some(Self::Help),
            "reset" => Some(Self::Reset),
            "clear" => Some(Self::Clear),
            _ => None,
        }
    }
}
