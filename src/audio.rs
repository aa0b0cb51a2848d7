use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consts::{MUSIC_PATHS, STEP_SOUND_PATH, WIN_SOUND_PATH};
use crate::gamestate::{GameEvent, GameHooks};

type FileDecoder = Decoder<BufReader<File>>;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open sound {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode sound {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("no audio output: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("failed to create sink: {0}")]
    Play(#[from] rodio::PlayError),
}

/// Playback levels, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volumes {
    pub music: f32,
    pub step: f32,
    pub win: f32,
}

fn decode(path: &str) -> Result<FileDecoder, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_string(),
        source,
    })?;
    Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
        path: path.to_string(),
        source,
    })
}

fn load_effect(path: &str) -> Option<Buffered<FileDecoder>> {
    match decode(path) {
        Ok(decoder) => Some(decoder.buffered()),
        Err(e) => {
            warn!("{e}; sound disabled");
            None
        }
    }
}

/// Background music plus one-shot effects for footsteps and the win jingle.
/// Any sound that fails to load is silently skipped afterwards.
pub struct Audio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    _music: Option<Sink>,
    step: Option<Buffered<FileDecoder>>,
    win: Option<Buffered<FileDecoder>>,
    volumes: Volumes,
}

impl Audio {
    pub fn try_create(volumes: Volumes) -> Result<Self, AudioError> {
        let (_stream, handle) = OutputStream::try_default()?;
        let music = Self::start_music(&handle, volumes.music);
        info!("audio output ready");
        Ok(Audio {
            _stream,
            handle,
            _music: music,
            step: load_effect(STEP_SOUND_PATH),
            win: load_effect(WIN_SOUND_PATH),
            volumes,
        })
    }

    fn start_music(handle: &OutputStreamHandle, volume: f32) -> Option<Sink> {
        let Some(path) = MUSIC_PATHS.iter().find(|p| Path::new(p).exists()) else {
            debug!("no music file found");
            return None;
        };
        let result = decode(path).and_then(|decoder| {
            let sink = Sink::try_new(handle)?;
            sink.set_volume(volume);
            sink.append(decoder.repeat_infinite());
            Ok(sink)
        });
        match result {
            Ok(sink) => {
                debug!("looping music from {path}");
                Some(sink)
            }
            Err(e) => {
                warn!("{e}; music disabled");
                None
            }
        }
    }

    fn play(&self, sound: Option<&Buffered<FileDecoder>>, volume: f32) {
        let Some(sound) = sound else {
            return;
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(volume);
                sink.append(sound.clone());
                sink.detach();
            }
            Err(e) => warn!("could not play sound: {e}"),
        }
    }
}

impl GameHooks for Audio {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Footstep => self.play(self.step.as_ref(), self.volumes.step),
            GameEvent::Won => self.play(self.win.as_ref(), self.volumes.win),
            _ => {}
        }
    }
}
