/// Application-level events delivered through the app channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The player reached the end of the trace
    PlaybackFinished,
}

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Choosing or typing the input array
    #[default]
    Setup,
    /// Watching the sort play back
    Show,
}

impl Screen {
    pub fn key_context(&self) -> crate::config::KeyContext {
        match self {
            Screen::Setup => crate::config::KeyContext::Setup,
            Screen::Show => crate::config::KeyContext::Show,
        }
    }
}
