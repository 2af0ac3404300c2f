//! Root view model: `App` and `Focus`.
//!
//! The `App` owns the two page-wide flags (mute, submitted), the contact form
//! and one playback component per catalog track.

use crate::audio::AudioEvent;
use crate::catalog::Track;
use crate::config::{ContactSettings, FocusSetting};
use crate::contact::{ContactError, ContactForm, SubmitOutcome, Submitter};
use crate::gallery::Photo;
use crate::player::{MediaResource, TrackPlayer};

/// Which part of the page receives keyboard input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Contact,
    Playlist,
}

impl From<FocusSetting> for Focus {
    fn from(s: FocusSetting) -> Self {
        match s {
            FocusSetting::Contact => Focus::Contact,
            FocusSetting::Playlist => Focus::Playlist,
        }
    }
}

/// The main application model.
pub struct App {
    pub players: Vec<TrackPlayer>,
    pub selected: usize,
    pub focus: Focus,

    pub muted: bool,
    pub submitted: bool,
    pub contact: ContactForm,

    pub photos: Vec<Photo>,
}

impl App {
    /// Mount one component per track. `open` acquires the audio resource of
    /// each audio track.
    pub fn new<F>(tracks: Vec<Track>, muted: bool, mut open: F) -> Self
    where
        F: FnMut(&Track, &str, bool) -> Box<dyn MediaResource>,
    {
        let players = tracks
            .into_iter()
            .map(|t| TrackPlayer::mount(t, muted, &mut open))
            .collect();

        Self {
            players,
            selected: 0,
            focus: Focus::Playlist,
            muted,
            submitted: false,
            contact: ContactForm::default(),
            photos: Vec::new(),
        }
    }

    pub fn set_photos(&mut self, photos: Vec<Photo>) {
        self.photos = photos;
    }

    /// Flip the mute flag and push it down to every audio component.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        let muted = self.muted;
        for panel in self.players.iter_mut().filter_map(TrackPlayer::audio_mut) {
            panel.set_muted(muted);
        }
        tracing::debug!(muted, "mute toggled");
    }

    /// Validate and relay the contact form.
    ///
    /// Returns true when a request was dispatched. Nothing is sent after a
    /// successful submission or while a request is still in flight.
    pub fn submit_contact_form(&mut self, settings: &ContactSettings, submitter: &Submitter) -> bool {
        if self.submitted || self.contact.in_flight {
            return false;
        }

        if let Err(e) = self.contact.validate() {
            self.contact.notice = Some(e.to_string());
            return false;
        }

        self.contact.notice = None;
        self.contact.in_flight = true;
        submitter.dispatch(self.contact.body(settings));
        true
    }

    /// Apply the outcome of a submission. Failures are only logged; the form
    /// stays as it was.
    pub fn on_submit_result(&mut self, outcome: SubmitOutcome) {
        self.contact.in_flight = false;
        match outcome {
            Ok(()) => {
                tracing::info!("contact form submitted");
                self.submitted = true;
                self.focus = Focus::Playlist;
            }
            Err(ContactError::Transport(reason)) => {
                tracing::warn!(%reason, "contact form handler unreachable")
            }
            Err(e) => tracing::warn!(error = %e, "contact form submission failed"),
        }
    }

    /// Deliver an engine event to the component that owns the resource.
    /// Events for ids that are no longer mounted are dropped.
    pub fn route_audio_event(&mut self, event: AudioEvent) {
        let id = event.id();
        match self
            .players
            .iter_mut()
            .find(|p| p.id() == id)
            .and_then(TrackPlayer::audio_mut)
        {
            Some(panel) => panel.handle_event(&event),
            None => tracing::trace!(track = id, ?event, "dropping event for unmounted resource"),
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.players.is_empty()
    }

    pub fn selected_player_mut(&mut self) -> Option<&mut TrackPlayer> {
        self.players.get_mut(self.selected)
    }

    /// Mutable access to a component by track id.
    pub fn player_mut(&mut self, id: u32) -> Option<&mut TrackPlayer> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    /// Move selection to the next track, wrapping around.
    pub fn next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.players.len();
        }
    }

    /// Move selection to the previous track, wrapping around.
    pub fn prev(&mut self) {
        if self.has_tracks() {
            self.selected = match self.selected {
                0 => self.players.len() - 1,
                n => n - 1,
            };
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Contact => Focus::Playlist,
            // The form is gone once submitted; nothing to focus there.
            Focus::Playlist if self.submitted => Focus::Playlist,
            Focus::Playlist => Focus::Contact,
        };
    }
}
