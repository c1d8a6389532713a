// Fire-and-forget sound playback
//
// The frame loop never waits on audio: `play` returns immediately and any
// failure is logged, never propagated.

use std::path::Path;

/// Sink for one-shot sound effects
pub trait AudioSink {
    fn play(&self, path: &Path);
}

/// Audio sink that only logs requests (used when no audio backend is built in)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&self, path: &Path) {
        log::info!("Sound requested: {}", path.display());
    }
}

#[cfg(feature = "audio")]
pub use rodio_sink::RodioAudio;

#[cfg(feature = "audio")]
mod rodio_sink {
    use super::AudioSink;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    /// Audio sink backed by the default rodio output device
    pub struct RodioAudio {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl RodioAudio {
        pub fn new() -> anyhow::Result<Self> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    impl AudioSink for RodioAudio {
        fn play(&self, path: &Path) {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(e) => {
                    log::warn!("Cannot open sound {}: {}", path.display(), e);
                    return;
                }
            };
            let source = match Decoder::new(BufReader::new(file)) {
                Ok(source) => source,
                Err(e) => {
                    log::warn!("Cannot decode sound {}: {}", path.display(), e);
                    return;
                }
            };
            let Ok(sink) = Sink::try_new(&self.handle) else {
                return;
            };
            sink.append(source);
            sink.detach();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    /// Records every requested sound; clones share the same log
    #[derive(Debug, Default, Clone)]
    pub struct RecordingAudio {
        pub played: Rc<RefCell<Vec<PathBuf>>>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&self, path: &Path) {
            self.played.borrow_mut().push(path.to_path_buf());
        }
    }

    #[test]
    fn test_log_audio_does_not_fail_on_missing_file() {
        LogAudio.play(Path::new("sounds/does-not-exist.wav"));
    }

    #[test]
    fn test_recording_audio() {
        let audio = RecordingAudio::default();
        audio.play(Path::new("sounds/caw.wav"));
        assert_eq!(audio.played.borrow().len(), 1);
    }
}
