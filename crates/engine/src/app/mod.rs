mod audio;
mod input;
mod loop_runner;
mod rendering;
mod screen;

pub use audio::{AudioError, CueSink, SoundCue, SoundPlayer};
pub use input::{InputAction, InputSnapshot};
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use rendering::{DiscDesc, FrameDesc, ModalDesc, Renderer, SlotDesc};
pub use screen::{Screen, ScreenCommand};
