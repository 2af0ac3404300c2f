use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::*;
use crate::audio::AudioEvent;
use crate::catalog::{Track, TrackKind};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Play,
    Pause,
    Seek(Duration),
    Volume(f32),
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Call>>>);

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }
}

impl MediaResource for Recorder {
    fn play(&mut self) {
        self.0.borrow_mut().push(Call::Play);
    }
    fn pause(&mut self) {
        self.0.borrow_mut().push(Call::Pause);
    }
    fn seek(&mut self, to: Duration) {
        self.0.borrow_mut().push(Call::Seek(to));
    }
    fn set_volume(&mut self, volume: f32) {
        self.0.borrow_mut().push(Call::Volume(volume));
    }
}

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn panel_with_duration(d: Duration) -> (AudioPanel, Recorder) {
    let rec = Recorder::default();
    let mut panel = AudioPanel::new(Box::new(rec.clone()));
    panel.handle_event(&AudioEvent::MetadataLoaded { id: 1, duration: d });
    (panel, rec)
}

fn audio_track(id: u32) -> Track {
    Track {
        id,
        title: "Minor Swing".into(),
        artist: "Swing Dynamique".into(),
        kind: TrackKind::Audio {
            audio_url: "music/minor-swing.mp3".into(),
        },
    }
}

fn video_track(id: u32, url: &str) -> Track {
    Track {
        id,
        title: "Live".into(),
        artist: "Swing Dynamique".into(),
        kind: TrackKind::Video {
            video_url: url.into(),
        },
    }
}

#[test]
fn format_time_pads_seconds_and_truncates() {
    assert_eq!(format_time(secs(65)), "1:05");
    assert_eq!(format_time(secs(5)), "0:05");
    assert_eq!(format_time(secs(600)), "10:00");
    assert_eq!(format_time(Duration::from_secs_f64(59.9)), "0:59");
    assert_eq!(format_time(Duration::ZERO), "0:00");
    assert_eq!(format_time(secs(6000)), "100:00");
}

#[test]
fn toggle_play_alternates_resource_calls() {
    let (mut panel, rec) = panel_with_duration(secs(100));
    panel.toggle_play();
    assert!(panel.session.is_playing);
    panel.toggle_play();
    assert!(!panel.session.is_playing);
    panel.toggle_play();
    assert!(panel.session.is_playing);
    assert_eq!(rec.calls(), vec![Call::Play, Call::Pause, Call::Play]);
}

#[test]
fn seek_is_linear_in_fraction_and_optimistic() {
    let (mut panel, rec) = panel_with_duration(secs(200));

    panel.on_seek(0.25);
    assert_eq!(panel.session.elapsed, secs(50));

    let mut last = Duration::ZERO;
    for i in 0..=10 {
        let p = i as f64 / 10.0;
        panel.on_seek(p);
        assert_eq!(panel.session.elapsed, secs(200).mul_f64(p));
        assert!(panel.session.elapsed >= last);
        last = panel.session.elapsed;
    }
    assert_eq!(rec.calls()[0], Call::Seek(secs(50)));
}

#[test]
fn seek_clamps_fraction_and_is_zero_without_duration() {
    let (mut panel, _) = panel_with_duration(secs(100));
    panel.on_seek(1.7);
    assert_eq!(panel.session.elapsed, secs(100));
    panel.on_seek(-0.3);
    assert_eq!(panel.session.elapsed, Duration::ZERO);
    panel.on_seek(f64::NAN);
    assert_eq!(panel.session.elapsed, Duration::ZERO);

    let rec = Recorder::default();
    let mut unknown = AudioPanel::new(Box::new(rec.clone()));
    unknown.on_seek(0.5);
    assert_eq!(unknown.session.elapsed, Duration::ZERO);
    assert_eq!(rec.calls(), vec![Call::Seek(Duration::ZERO)]);
}

#[test]
fn scrub_stays_within_track() {
    let (mut panel, _) = panel_with_duration(secs(30));
    panel.scrub(5);
    assert_eq!(panel.session.elapsed, secs(5));
    panel.scrub(-10);
    assert_eq!(panel.session.elapsed, Duration::ZERO);
    panel.scrub(100);
    assert_eq!(panel.session.elapsed, secs(30));
}

#[test]
fn ended_resets_regardless_of_prior_state() {
    let (mut panel, _) = panel_with_duration(secs(90));
    panel.toggle_play();
    panel.handle_event(&AudioEvent::TimeUpdate {
        id: 1,
        elapsed: secs(89),
    });
    panel.handle_event(&AudioEvent::Ended { id: 1 });
    assert!(!panel.session.is_playing);
    assert_eq!(panel.session.elapsed, Duration::ZERO);

    let (mut paused, _) = panel_with_duration(secs(90));
    paused.handle_event(&AudioEvent::Ended { id: 1 });
    assert!(!paused.session.is_playing);
    assert_eq!(paused.session.elapsed, Duration::ZERO);
}

#[test]
fn muting_only_touches_volume() {
    let (mut panel, rec) = panel_with_duration(secs(90));
    panel.toggle_play();
    panel.on_seek(0.5);
    let before = panel.session;

    panel.set_muted(true);
    assert_eq!(panel.session, before);
    panel.set_muted(false);
    assert_eq!(panel.session, before);

    let calls = rec.calls();
    assert_eq!(&calls[calls.len() - 2..], &[Call::Volume(0.0), Call::Volume(1.0)]);
}

#[test]
fn progress_is_zero_until_duration_known() {
    let mut s = PlaybackSession::default();
    s.on_time_update(secs(10));
    assert_eq!(s.progress(), 0.0);

    s.on_metadata_loaded(secs(40));
    assert_eq!(s.progress(), 0.25);

    s.on_time_update(secs(80));
    assert_eq!(s.progress(), 1.0);
}

#[test]
fn mount_opens_resource_only_for_audio() {
    let mut opened = Vec::new();
    let audio = TrackPlayer::mount(audio_track(3), true, |t, url, muted| {
        opened.push((t.id, url.to_string(), muted));
        Box::new(Recorder::default())
    });
    assert!(audio.audio().is_some());
    assert!(audio.video().is_none());
    assert_eq!(opened, vec![(3, "music/minor-swing.mp3".to_string(), true)]);

    let video = TrackPlayer::mount(
        video_track(4, "https://host/watch?v=ABC123"),
        false,
        |_, _, _| panic!("videos have no local resource"),
    );
    assert_eq!(video.id(), 4);
    assert_eq!(
        video.video().and_then(|v| v.embed_url.as_deref()),
        Some("https://www.youtube.com/embed/ABC123")
    );
}

#[test]
fn malformed_video_url_has_no_embed() {
    let video = TrackPlayer::mount(
        video_track(5, "https://host/live"),
        false,
        |_, _, _| panic!("videos have no local resource"),
    );
    assert_eq!(video.video().map(|v| v.embed_url.clone()), Some(None));
}
