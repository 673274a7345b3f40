pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppState};
use crate::config::Theme;
use crate::session::{CharOutcome, SessionStatus};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Format a second count as m:ss for the countdown display.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0).ceil() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

fn timer_style(seconds: f64) -> Style {
    let color = if seconds <= 10.0 {
        Color::Red
    } else {
        Color::Cyan
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn pending_style(theme: Theme) -> Style {
    match theme {
        Theme::Dark => Style::default().add_modifier(Modifier::BOLD | Modifier::DIM),
        Theme::Light => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);

        let pending = pending_style(self.config.theme);
        let cursor_style = pending.add_modifier(Modifier::UNDERLINED);

        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let magenta_style = Style::default().fg(Color::Magenta);

        if !session.is_over() {
            let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
            let mut prompt_occupied_lines = ((session.target.width() as f64
                / max_chars_per_line.max(1) as f64)
                .ceil()
                + 1.0) as u16;

            let time_left_lines = if session.is_timed() { 2 } else { 0 };

            if session.target.width() <= max_chars_per_line as usize {
                prompt_occupied_lines = 1;
            }

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .horizontal_margin(HORIZONTAL_MARGIN)
                .constraints(
                    [
                        Constraint::Length(
                            ((area.height as f64 - prompt_occupied_lines as f64) / 2.0) as u16,
                        ),
                        Constraint::Length(time_left_lines),
                        Constraint::Length(prompt_occupied_lines),
                        Constraint::Length(2),
                        Constraint::Min(0),
                    ]
                    .as_ref(),
                )
                .split(area);

            let cursor = session.input().chars().count();
            let spans = session
                .target
                .chars()
                .zip(session.char_outcomes())
                .enumerate()
                .map(|(idx, (c, outcome))| match outcome {
                    CharOutcome::Correct => Span::styled(c.to_string(), green_bold_style),
                    CharOutcome::Incorrect => Span::styled(
                        match c {
                            // make a missed space visible
                            ' ' => "·".to_owned(),
                            c => c.to_string(),
                        },
                        red_bold_style,
                    ),
                    CharOutcome::Pending => {
                        if idx == cursor {
                            Span::styled(c.to_string(), cursor_style)
                        } else {
                            Span::styled(c.to_string(), pending)
                        }
                    }
                })
                .collect::<Vec<Span>>();

            let widget = Paragraph::new(Line::from(spans))
                .alignment(if prompt_occupied_lines == 1 {
                    // when the prompt is small enough to fit on one line
                    // centering the text gives a nice zen feeling
                    Alignment::Center
                } else {
                    Alignment::Left
                })
                .wrap(Wrap { trim: true });

            widget.render(chunks[2], buf);

            if let Some(seconds) = session.seconds_remaining() {
                let timer = Paragraph::new(Span::styled(
                    format_clock(seconds),
                    timer_style(seconds),
                ))
                .alignment(Alignment::Center);

                timer.render(chunks[1], buf);
            }

            if session.status() == SessionStatus::Idle {
                let hint = Paragraph::new(Span::styled(
                    "start typing to begin",
                    pending.patch(italic_style),
                ))
                .alignment(Alignment::Center);

                hint.render(chunks[3], buf);
            }
        } else {
            let show_settings = matches!(self.state, AppState::Results);

            let constraints = if show_settings {
                vec![
                    Constraint::Min(1),    // chart
                    Constraint::Length(1), // stats
                    Constraint::Length(1), // banner
                    Constraint::Length(1), // padding
                    Constraint::Length(1), // legend
                ]
            } else {
                vec![
                    Constraint::Min(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ]
            };

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .horizontal_margin(HORIZONTAL_MARGIN)
                .vertical_margin(VERTICAL_MARGIN)
                .constraints(constraints.as_slice())
                .split(area);

            let (overall_duration, highest_wpm) = crate::ui::charting::compute_chart_params(
                session.samples(),
                session.seconds_remaining(),
            );

            let tuples: Vec<(f64, f64)> =
                session.samples().iter().map(|p| (p.t, p.wpm)).collect();
            let datasets = vec![Dataset::default()
                .marker(ratatui::symbols::Marker::Braille)
                .style(magenta_style)
                .graph_type(GraphType::Line)
                .data(&tuples)];

            let chart = Chart::new(datasets)
                .x_axis(
                    Axis::default()
                        .title("seconds")
                        .bounds([1.0, overall_duration])
                        .labels(vec![
                            Span::styled("1", bold_style),
                            Span::styled(
                                crate::ui::charting::format_label(overall_duration),
                                bold_style,
                            ),
                        ]),
                )
                .y_axis(
                    Axis::default()
                        .title("wpm")
                        .bounds([0.0, highest_wpm])
                        .labels(vec![
                            Span::styled("0", bold_style),
                            Span::styled(
                                crate::ui::charting::format_label(highest_wpm),
                                bold_style,
                            ),
                        ]),
                );

            chart.render(chunks[0], buf);

            if let Some(stats) = session.stats() {
                let summary = Paragraph::new(Span::styled(
                    format!(
                        "{} wpm   {}% acc   {} chars",
                        stats.wpm,
                        stats.accuracy,
                        session.input().chars().count()
                    ),
                    bold_style,
                ))
                .alignment(Alignment::Center);

                summary.render(chunks[1], buf);

                let (banner_text, banner_color) = match session.status() {
                    SessionStatus::TimedOut => (
                        format!("Time's up! {} wpm, {}% accuracy", stats.wpm, stats.accuracy),
                        Color::Yellow,
                    ),
                    _ => (
                        format!("Completed! {} wpm, {}% accuracy", stats.wpm, stats.accuracy),
                        Color::Green,
                    ),
                };

                let banner = Paragraph::new(Span::styled(
                    banner_text,
                    Style::default().fg(banner_color).add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center);

                banner.render(chunks[2], buf);
            }

            if show_settings {
                let legend = Paragraph::new(Span::styled(
                    "(r)etry / (n)ew / (t)imer / (d)ark-light / (esc)ape",
                    italic_style,
                ));

                legend.render(chunks[4], buf);
            }

            if self.confetti.is_active {
                render_confetti(&self.confetti, area, buf);
            }
        }
    }
}

/// Render confetti particles on top of the results screen
fn render_confetti(confetti: &crate::celebration::Confetti, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    for particle in &confetti.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;

        if x < area.width && y < area.height {
            let color = colors[particle.color_index % colors.len()];

            let style = match particle.fade() {
                f if f > 0.7 => Style::default().fg(color).add_modifier(Modifier::BOLD),
                f if f > 0.3 => Style::default().fg(color),
                _ => Style::default().fg(color).add_modifier(Modifier::DIM),
            };

            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(&particle.symbol.to_string());
                cell.set_style(style);
            }
        }
    }
}
