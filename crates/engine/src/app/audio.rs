use std::io::Cursor;
use std::sync::Arc;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, PlayError, Sink};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to decode sound: {0}")]
    Decode(#[source] DecoderError),
    #[error("failed to open playback sink: {0}")]
    Sink(#[source] PlayError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Confirm,
}

/// Fire-and-forget sound side effect. Implementations never report failure
/// back to the caller.
pub trait CueSink {
    fn play(&mut self, cue: SoundCue);
}

impl CueSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

/// Plays cues on the default output device. Falls silent when the device or
/// the sound bytes are unavailable.
pub struct SoundPlayer {
    output: Option<(OutputStream, OutputStreamHandle)>,
    confirm: Option<Arc<[u8]>>,
    warned_playback_failure: bool,
}

impl SoundPlayer {
    pub fn new(confirm: Option<Arc<[u8]>>) -> Self {
        if confirm.is_none() {
            warn!(cue = "confirm", "sound_unavailable_playing_silently");
        }
        let output = match OutputStream::try_default() {
            Ok(pair) => Some(pair),
            Err(error) => {
                warn!(error = %error, "audio_device_unavailable");
                None
            }
        };
        Self {
            output,
            confirm,
            warned_playback_failure: false,
        }
    }

    pub fn silent() -> Self {
        Self {
            output: None,
            confirm: None,
            warned_playback_failure: true,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.output.is_none() || self.confirm.is_none()
    }

    fn bytes_for(&self, cue: SoundCue) -> Option<&Arc<[u8]>> {
        match cue {
            SoundCue::Confirm => self.confirm.as_ref(),
        }
    }

    fn try_play(&self, cue: SoundCue) -> Result<(), AudioError> {
        let (Some((_, handle)), Some(bytes)) = (self.output.as_ref(), self.bytes_for(cue)) else {
            return Ok(());
        };
        let decoder = decode_cue(bytes)?;
        let sink = Sink::try_new(handle).map_err(AudioError::Sink)?;
        sink.append(decoder);
        sink.detach();
        Ok(())
    }
}

impl CueSink for SoundPlayer {
    fn play(&mut self, cue: SoundCue) {
        if self.is_silent() {
            return;
        }
        match self.try_play(cue) {
            Ok(()) => debug!(?cue, "sound_cue_played"),
            Err(error) => {
                if !self.warned_playback_failure {
                    self.warned_playback_failure = true;
                    warn!(?cue, error = %error, "sound_cue_failed");
                }
            }
        }
    }
}

fn decode_cue(bytes: &Arc<[u8]>) -> Result<Decoder<Cursor<Arc<[u8]>>>, AudioError> {
    Decoder::new(Cursor::new(Arc::clone(bytes))).map_err(AudioError::Decode)
}
