pub mod config;
pub mod input;
pub mod player;
pub mod render;
pub mod trace;
pub mod ui;
pub mod util;

pub use config::Config;
pub use input::{ArrayConfig, Field, InputError, InputMode, ParamMode};
pub use player::{driver::play_until_idle, Player, PlayerError, PlayerState, Tick};
pub use render::{CellBoard, Element, Renderer, Transcript};
pub use trace::{trace, Command, Trace, TraceError, Traced};
pub use ui::App;
