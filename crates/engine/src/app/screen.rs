use super::audio::CueSink;
use super::input::InputSnapshot;
use super::rendering::FrameDesc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    None,
    Quit,
}

/// The single interactive surface driven by the loop. `update` runs once per
/// fixed tick; `frame` is read after the tick's updates for drawing.
pub trait Screen {
    fn resize(&mut self, width: u32, height: u32);
    fn update(&mut self, input: &InputSnapshot, cues: &mut dyn CueSink) -> ScreenCommand;
    fn frame(&self) -> FrameDesc;
    fn title(&self) -> Option<String> {
        None
    }
}
