use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::player::{MediaResource, volume_for};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent, ResourceId};

/// Front door of the audio thread.
pub struct AudioEngine {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioEngine {
    /// Spawn the engine thread. Lifecycle events arrive on the returned receiver.
    pub fn new(audio_settings: AudioSettings) -> (Self, Receiver<AudioEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<AudioEvent>();

        let join = spawn_audio_thread(rx, events_tx, audio_settings);

        (
            Self {
                tx,
                join: Mutex::new(Some(join)),
            },
            events_rx,
        )
    }

    /// Acquire a resource for `path`. It lives until the returned handle is dropped.
    pub fn open(&self, id: ResourceId, path: PathBuf, muted: bool) -> AudioHandle {
        let _ = self.tx.send(AudioCmd::Open {
            id,
            path,
            volume: volume_for(muted),
        });
        AudioHandle {
            id,
            tx: self.tx.clone(),
        }
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

/// A component's handle on one engine resource.
///
/// Dropping the handle releases the resource; the engine stops emitting
/// events for its id.
#[derive(Debug)]
pub struct AudioHandle {
    id: ResourceId,
    tx: Sender<AudioCmd>,
}

impl AudioHandle {
    #[cfg(test)]
    pub(super) fn for_test(id: ResourceId, tx: Sender<AudioCmd>) -> Self {
        Self { id, tx }
    }
}

impl MediaResource for AudioHandle {
    fn play(&mut self) {
        let _ = self.tx.send(AudioCmd::Play(self.id));
    }

    fn pause(&mut self) {
        let _ = self.tx.send(AudioCmd::Pause(self.id));
    }

    fn seek(&mut self, to: Duration) {
        let _ = self.tx.send(AudioCmd::Seek { id: self.id, to });
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.tx.send(AudioCmd::SetVolume {
            id: self.id,
            volume,
        });
    }
}

impl Drop for AudioHandle {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCmd::Release(self.id));
    }
}
