//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the page with `ratatui`: hero banner, contact form,
//! gallery, playlist and footer. `draw` returns the screen areas of the
//! progress bars so mouse clicks can be turned into seek fractions.

use std::path::Path;

use chrono::Datelike;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::{App, Focus};
use crate::config::Settings;
use crate::contact::FormField;
use crate::player::{PlayerBody, TrackPlayer, format_time};

/// Rows taken by one track panel, borders included.
const PANEL_HEIGHT: u16 = 5;

/// Static page copy, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Page {
    pub band_name: String,
    pub tagline: String,
    pub availability: String,
    pub hero_image: String,
    pub photo_credit: String,
    pub thank_you: String,
    pub show_gallery: bool,
    pub scrub_seconds: u64,
    pub year: i32,
}

impl Page {
    pub fn from_settings(settings: &Settings, hero_image: &Path) -> Self {
        Self {
            band_name: settings.site.band_name.clone(),
            tagline: settings.site.tagline.clone(),
            availability: settings.site.availability.clone(),
            hero_image: hero_image.display().to_string(),
            photo_credit: settings.site.photo_credit.clone(),
            thank_you: settings.contact.thank_you.clone(),
            show_gallery: settings.ui.show_gallery,
            scrub_seconds: settings.controls.scrub_seconds,
            year: chrono::Local::now().year(),
        }
    }
}

/// Progress bar areas from the last frame, keyed by track id.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    bars: Vec<(u32, Rect)>,
}

impl HitMap {
    pub fn push(&mut self, id: u32, area: Rect) {
        self.bars.push((id, area));
    }

    /// Which bar was hit at `(column, row)`, and at what fraction of its width.
    pub fn hit(&self, column: u16, row: u16) -> Option<(u32, f64)> {
        self.bars.iter().find_map(|&(id, r)| {
            let inside = r.width > 0
                && column >= r.x
                && column < r.x + r.width
                && row >= r.y
                && row < r.y + r.height;
            inside.then(|| (id, f64::from(column - r.x) / f64::from(r.width)))
        })
    }
}

fn controls_text(app: &App, scrub_seconds: u64) -> String {
    match app.focus {
        Focus::Contact => {
            "[tab/enter] next field | [shift+tab] prev field | [ctrl+s] send | [esc] back to music"
                .to_string()
        }
        Focus::Playlist => format!(
            "[j/k] select | [space/p] play/pause | [H/L] scrub -/+{scrub_seconds}s | [0-9] seek | \
             [click] seek | [m] mute | [tab] contact | [q] quit"
        ),
    }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire page into `frame` and return the clickable progress bars.
pub fn draw(frame: &mut Frame, app: &App, page: &Page) -> HitMap {
    let mut hits = HitMap::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(PANEL_HEIGHT),
            Constraint::Length(4),
        ])
        .split(frame.area());

    draw_hero(frame, page, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    if page.show_gallery {
        let gallery_height = (app.photos.len() as u16).saturating_add(4).min(body[0].height / 2);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(gallery_height)])
            .split(body[0]);
        draw_contact(frame, app, page, left[0]);
        draw_gallery(frame, app, page, left[1]);
    } else {
        draw_contact(frame, app, page, body[0]);
    }

    draw_playlist(frame, app, body[1], &mut hits);
    draw_footer(frame, app, page, chunks[2]);

    hits
}

fn draw_hero(frame: &mut Frame, page: &Page, area: Rect) {
    let hero = Paragraph::new(page.tagline.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(format!(" {} ", page.band_name)).bold())
                .title_alignment(Alignment::Center)
                .title_bottom(Line::from(format!(" {} ", page.hero_image)).right_aligned()),
        );
    frame.render_widget(hero, area);
}

fn draw_contact(frame: &mut Frame, app: &App, page: &Page, area: Rect) {
    let mut lines: Vec<Line> = vec![Line::from(page.availability.as_str()).italic(), Line::from("")];

    if app.submitted {
        lines.push(Line::from(page.thank_you.as_str()).bold());
    } else {
        let editing = app.focus == Focus::Contact;
        for field in [FormField::Name, FormField::Email, FormField::Message] {
            let focused = editing && app.contact.focus == field;
            let marker = if focused { "> " } else { "  " };
            let value = app.contact.value(field);
            let value_style = if focused {
                Style::default().add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{:<8}", field.label()), Style::default().bold()),
                Span::styled(value.to_string(), value_style),
            ]));
        }

        lines.push(Line::from(""));
        let send_focused = editing && app.contact.focus == FormField::Send;
        let send = format!("[ {} ]", FormField::Send.label());
        lines.push(if send_focused {
            Line::from(send).reversed()
        } else {
            Line::from(send)
        });

        if app.contact.in_flight {
            lines.push(Line::from("sending…").dim());
        } else if let Some(notice) = &app.contact.notice {
            lines.push(Line::from(notice.as_str()).dim());
        }
    }

    let mut block = padded_block(" contact ");
    if app.focus == Focus::Contact {
        block = block.border_style(Style::default().add_modifier(Modifier::BOLD));
    }

    let contact = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(contact, area);
}

fn draw_gallery(frame: &mut Frame, app: &App, page: &Page, area: Rect) {
    let mut lines: Vec<Line> = app
        .photos
        .iter()
        .map(|p| Line::from(format!("▣ {}", p.name)))
        .collect();
    if lines.is_empty() {
        lines.push(Line::from("no photos").dim());
    }
    lines.push(Line::from(page.photo_credit.as_str()).dim().centered());

    let gallery = Paragraph::new(lines).block(padded_block(" gallery "));
    frame.render_widget(gallery, area);
}

/// First visible panel index so that `selected` stays on screen, centered when possible.
fn visible_window(total: usize, capacity: usize, selected: usize) -> (usize, usize) {
    if capacity == 0 {
        return (0, 0);
    }
    if total <= capacity {
        return (0, total);
    }
    let half = capacity / 2;
    let mut start = selected.saturating_sub(half);
    if start + capacity > total {
        start = total - capacity;
    }
    (start, start + capacity)
}

fn draw_playlist(frame: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let outer = Block::default().borders(Borders::ALL).title(" notre musique ");
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if !app.has_tracks() {
        frame.render_widget(Paragraph::new("no tracks in catalog").dim(), inner);
        return;
    }

    let capacity = (inner.height / PANEL_HEIGHT) as usize;
    let (start, end) = visible_window(app.players.len(), capacity, app.selected);

    for (slot, idx) in (start..end).enumerate() {
        let rect = Rect {
            x: inner.x,
            y: inner.y + slot as u16 * PANEL_HEIGHT,
            width: inner.width,
            height: PANEL_HEIGHT,
        };
        let selected = app.focus == Focus::Playlist && idx == app.selected;
        draw_track(frame, &app.players[idx], selected, rect, hits);
    }
}

fn draw_track(frame: &mut Frame, player: &TrackPlayer, selected: bool, area: Rect, hits: &mut HitMap) {
    let track = &player.track;
    let icon = match &player.body {
        PlayerBody::Audio(panel) if panel.session.is_playing => "⏸",
        PlayerBody::Audio(_) => "▶",
        PlayerBody::Video(_) => "▷",
    };

    let mut block = Block::default().borders(Borders::ALL).title(Line::from(vec![
        Span::raw(format!(" {icon} ")),
        Span::raw(track.title.as_str()).bold(),
        Span::raw(format!(" · {} ", track.artist)),
    ]));
    if selected {
        block = block.border_style(Style::default().add_modifier(Modifier::REVERSED));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    match &player.body {
        PlayerBody::Audio(panel) => {
            let gauge = Gauge::default()
                .ratio(panel.session.progress())
                .label("")
                .use_unicode(true);
            frame.render_widget(gauge, rows[0]);
            hits.push(player.id(), rows[0]);

            let labels = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[1]);
            frame.render_widget(
                Paragraph::new(format_time(panel.session.elapsed)).dim(),
                labels[0],
            );
            frame.render_widget(
                Paragraph::new(format_time(panel.session.duration))
                    .dim()
                    .alignment(Alignment::Right),
                labels[1],
            );
        }
        PlayerBody::Video(video) => {
            let text = match &video.embed_url {
                Some(url) => Line::from(vec![Span::raw("embed: "), Span::raw(url.as_str()).underlined()]),
                None => Line::from("no embeddable video").dim(),
            };
            frame.render_widget(Paragraph::new(text), rows[0]);
            frame.render_widget(Paragraph::new("plays in the embedded frame").dim(), rows[1]);
        }
    }
}

fn draw_footer(frame: &mut Frame, app: &App, page: &Page, area: Rect) {
    let sound = if app.muted { "🔇 muted" } else { "🔊 sound on" };
    let lines = vec![
        Line::from(controls_text(app, page.scrub_seconds)),
        Line::from(vec![
            Span::raw(format!("© {} {}. All rights reserved.", page.year, page.band_name)).dim(),
            Span::raw("  •  "),
            Span::raw(sound).bold(),
        ]),
    ];

    let footer = Paragraph::new(lines)
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, area);
}
