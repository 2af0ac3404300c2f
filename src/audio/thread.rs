use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder};

use crate::config::AudioSettings;

use super::clock::PlayClock;
use super::sink::{Voice, VoiceSource};
use super::types::{AudioCmd, AudioError, AudioEvent, ResourceId};

/// Per-resource engine state. Owned exclusively by the engine thread.
struct Entry<V> {
    path: PathBuf,
    voice: Option<V>,
    volume: f32,
    duration: Option<Duration>,
    clock: PlayClock,
}

impl<V: Voice> Entry<V> {
    /// Make sure a voice exists, rebuilding it at the clock position if the
    /// previous one ran dry or failed to decode.
    fn ensure_voice<S>(&mut self, source: &S, now: Instant) -> bool
    where
        S: VoiceSource<Voice = V>,
    {
        if self.voice.as_ref().is_some_and(|v| !v.empty()) {
            return true;
        }
        match source.voice_at(&self.path, self.clock.position(now), self.volume) {
            Ok(voice) => {
                self.voice = Some(voice);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot prepare audio resource");
                false
            }
        }
    }

    fn play<S>(&mut self, source: &S, now: Instant)
    where
        S: VoiceSource<Voice = V>,
    {
        if !self.ensure_voice(source, now) {
            return;
        }
        if let Some(v) = self.voice.as_ref() {
            v.play();
        }
        self.clock.start(now);
    }

    fn pause(&mut self, now: Instant) {
        if let Some(v) = self.voice.as_ref() {
            v.pause();
        }
        self.clock.stop(now);
    }

    fn clamp(&self, pos: Duration) -> Duration {
        match self.duration {
            Some(d) => pos.min(d),
            None => pos,
        }
    }

    fn seek<S>(&mut self, source: &S, to: Duration, now: Instant)
    where
        S: VoiceSource<Voice = V>,
    {
        let to = self.clamp(to);

        // Scrubbing: rebuild the voice and skip into the file.
        if let Some(v) = self.voice.take() {
            v.stop();
        }
        self.clock.reset_to(to, now);

        match source.voice_at(&self.path, to, self.volume) {
            Ok(voice) => {
                if self.clock.is_running() {
                    voice.play();
                }
                self.voice = Some(voice);
            }
            Err(e) => tracing::warn!(error = %e, "seek failed"),
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(v) = self.voice.as_ref() {
            v.set_volume(volume);
        }
    }

    /// Returns true when the voice ran out while the clock was running.
    fn finished(&self) -> bool {
        self.clock.is_running() && self.voice.as_ref().is_some_and(|v| v.empty())
    }

    fn rewind(&mut self) {
        if let Some(v) = self.voice.take() {
            v.stop();
        }
        self.clock = PlayClock::default();
    }

    fn elapsed(&self, now: Instant) -> Duration {
        self.clamp(self.clock.position(now))
    }
}

fn fade_out_voice<V: Voice>(voice: &V, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        voice.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        voice.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    voice.set_volume(0.0);
}

/// Every open resource of the engine, keyed by id.
pub(super) struct Mixer<S: VoiceSource> {
    source: S,
    entries: HashMap<ResourceId, Entry<S::Voice>>,
    events: Sender<AudioEvent>,
}

impl<S: VoiceSource> Mixer<S> {
    pub(super) fn new(source: S, events: Sender<AudioEvent>) -> Self {
        Self {
            source,
            entries: HashMap::new(),
            events,
        }
    }

    /// Apply one command. Returns false once the engine should stop.
    pub(super) fn apply(&mut self, cmd: AudioCmd, now: Instant) -> bool {
        match cmd {
            AudioCmd::Open { id, path, volume } => {
                let duration = self.source.duration(&path);
                let voice = match self.source.voice_at(&path, Duration::ZERO, volume) {
                    Ok(v) => Some(v),
                    Err(e) => {
                        tracing::warn!(track = id, error = %e, "audio resource failed to load");
                        None
                    }
                };

                // Metadata only counts once the file is actually decodable.
                if let (Some(_), Some(d)) = (voice.as_ref(), duration) {
                    let _ = self.events.send(AudioEvent::MetadataLoaded { id, duration: d });
                }

                tracing::debug!(track = id, path = %path.display(), "opened audio resource");
                self.entries.insert(
                    id,
                    Entry {
                        path,
                        voice,
                        volume,
                        duration,
                        clock: PlayClock::default(),
                    },
                );
            }
            AudioCmd::Play(id) => {
                if let Some(e) = self.entries.get_mut(&id) {
                    e.play(&self.source, now);
                }
            }
            AudioCmd::Pause(id) => {
                if let Some(e) = self.entries.get_mut(&id) {
                    e.pause(now);
                }
            }
            AudioCmd::Seek { id, to } => {
                if let Some(e) = self.entries.get_mut(&id) {
                    e.seek(&self.source, to, now);
                }
            }
            AudioCmd::SetVolume { id, volume } => {
                if let Some(e) = self.entries.get_mut(&id) {
                    e.set_volume(volume);
                }
            }
            AudioCmd::Release(id) => {
                if let Some(mut e) = self.entries.remove(&id) {
                    e.rewind();
                    tracing::debug!(track = id, "released audio resource");
                }
            }
            AudioCmd::Quit { fade_out_ms } => {
                let playing: Vec<&Entry<S::Voice>> = self
                    .entries
                    .values()
                    .filter(|e| e.clock.is_running())
                    .collect();
                // Fade out gently before stopping.
                for e in &playing {
                    if let Some(v) = e.voice.as_ref() {
                        fade_out_voice(v, e.volume, fade_out_ms / playing.len() as u64);
                        v.stop();
                    }
                }
                return false;
            }
        }
        true
    }

    /// Report progress for running resources. A resource that ran out emits
    /// `Ended` once and is rewound to the start, paused.
    pub(super) fn tick(&mut self, now: Instant) {
        for (&id, e) in self.entries.iter_mut() {
            if e.finished() {
                e.rewind();
                let _ = self.events.send(AudioEvent::Ended { id });
            } else if e.clock.is_running() {
                let _ = self.events.send(AudioEvent::TimeUpdate {
                    id,
                    elapsed: e.elapsed(now),
                });
            }
        }
    }
}

fn open_stream() -> Result<OutputStream, AudioError> {
    let mut stream = OutputStreamBuilder::open_default_stream()?;
    // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
    // but noisy for a TUI app.
    stream.log_on_drop(false);
    Ok(stream)
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match open_stream() {
            Ok(s) => s,
            Err(e) => {
                // Handles keep working; their commands just go nowhere.
                tracing::error!(error = %e, "audio engine disabled");
                return;
            }
        };

        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));
        let mut mixer = Mixer::new(stream, events);
        let mut last_tick = Instant::now();

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if !mixer.apply(cmd, Instant::now()) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            let now = Instant::now();
            if now.saturating_duration_since(last_tick) < tick {
                continue;
            }
            last_tick = now;
            mixer.tick(now);
        }
    })
}
