use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use log::debug;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, StreamError};

/// Fire-and-forget sound effects.
///
/// Implementations never report failures to the caller.
pub trait AudioCue {
    fn play_sound(&mut self, resource: &Path);
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mute;

impl AudioCue for Mute {
    fn play_sound(&mut self, _resource: &Path) {}
}

/// Rings the terminal bell regardless of the requested resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl AudioCue for TerminalBell {
    fn play_sound(&mut self, resource: &Path) {
        let mut stdout = io::stdout();
        if let Err(error) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            debug!("terminal bell for {} failed: {error}", resource.display());
        }
    }
}

/// Decodes sound files onto the default audio output.
///
/// Resources that cannot be opened or decoded ring the terminal bell instead.
pub struct RodioCue {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    fallback: TerminalBell,
}

impl RodioCue {
    /// Opens the default output device.
    pub fn try_default() -> Result<Self, StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            fallback: TerminalBell,
        })
    }
}

impl AudioCue for RodioCue {
    fn play_sound(&mut self, resource: &Path) {
        let Some(source) = open_sound(resource) else {
            self.fallback.play_sound(resource);
            return;
        };

        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(source);
                sink.detach();
            }
            Err(error) => debug!("no sink for {}: {error}", resource.display()),
        }
    }
}

/// Opens and decodes `resource`, logging why it is unusable.
fn open_sound(resource: &Path) -> Option<Decoder<BufReader<File>>> {
    let file = match File::open(resource) {
        Ok(file) => file,
        Err(error) => {
            debug!("cannot open sound {}: {error}", resource.display());
            return None;
        }
    };

    match Decoder::new(BufReader::new(file)) {
        Ok(source) => Some(source),
        Err(error) => {
            debug!("cannot decode sound {}: {error}", resource.display());
            None
        }
    }
}
