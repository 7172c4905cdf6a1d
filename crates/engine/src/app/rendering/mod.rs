mod frame;
mod raster;
mod renderer;

pub use frame::{DiscDesc, FrameDesc, ModalDesc, SlotDesc};
pub use renderer::Renderer;
