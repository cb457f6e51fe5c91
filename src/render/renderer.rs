use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{self, EndReason, GamePhase, GameSnapshot, Position};
use crate::metrics::GameMetrics;

/// Each grid cell is drawn two columns wide so cells look square
const CELL_WIDTH: u16 = 2;

/// Draws snapshots; holds no game state of its own
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &GameSnapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        // The grid keeps its logical size whatever the terminal size is
        let grid_area = centered_rect(
            snapshot.grid_width as u16 * CELL_WIDTH + 2,
            snapshot.grid_height as u16 + 2,
            chunks[1],
        );
        frame.render_widget(self.render_grid(snapshot), grid_area);

        if let Some(overlay) = self.render_overlay(snapshot) {
            let overlay_area = centered_rect(36, 8, chunks[1]);
            frame.render_widget(Clear, overlay_area);
            frame.render_widget(overlay, overlay_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, snapshot: &GameSnapshot) -> Paragraph<'static> {
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.grid_height);

        for y in 0..snapshot.grid_height {
            let mut spans = Vec::with_capacity(snapshot.grid_width);

            for x in 0..snapshot.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if Some(pos) == head {
                    Span::styled(
                        head_glyph(snapshot.direction),
                        Style::default()
                            .fg(if snapshot.is_over() {
                                Color::Red
                            } else {
                                Color::LightGreen
                            })
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if Some(pos) == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.snake.len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Phase: ", Style::default().fg(Color::Yellow)),
            Span::styled(phase_label(snapshot.phase), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_overlay(&self, snapshot: &GameSnapshot) -> Option<Paragraph<'static>> {
        let (title, color, lines) = match snapshot.phase {
            GamePhase::Running => return None,
            GamePhase::Ready => (
                " Ready ",
                Color::Green,
                vec![
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Press ", Style::default().fg(Color::Gray)),
                        key_span("Enter"),
                        Span::styled(" or ", Style::default().fg(Color::Gray)),
                        key_span("Space"),
                    ]),
                    Line::from(Span::styled("to start", Style::default().fg(Color::Gray))),
                ],
            ),
            GamePhase::Paused => (
                " Paused ",
                Color::Yellow,
                vec![
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Press ", Style::default().fg(Color::Gray)),
                        key_span("Space"),
                        Span::styled(" to resume", Style::default().fg(Color::Gray)),
                    ]),
                ],
            ),
            GamePhase::Over => {
                let (headline, color) = match snapshot.end_reason {
                    Some(EndReason::BoardFilled) => ("YOU WIN", Color::Green),
                    _ => ("GAME OVER", Color::Red),
                };
                (
                    " Game Over ",
                    color,
                    vec![
                        Line::from(Span::styled(
                            headline,
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        )),
                        Line::from(Span::styled(
                            end_reason_text(snapshot.end_reason),
                            Style::default().fg(Color::Gray),
                        )),
                        Line::from(""),
                        Line::from(vec![
                            Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                            Span::styled(
                                snapshot.score.to_string(),
                                Style::default()
                                    .fg(Color::White)
                                    .add_modifier(Modifier::BOLD),
                            ),
                        ]),
                        Line::from(vec![
                            Span::styled("Press ", Style::default().fg(Color::Gray)),
                            key_span("R"),
                            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                            Span::styled(
                                "Q",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(" to quit", Style::default().fg(Color::Gray)),
                        ]),
                    ],
                )
            }
        };

        Some(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title),
            ),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )
}

/// The head points the way the snake is travelling
fn head_glyph(direction: game::Direction) -> &'static str {
    match direction {
        game::Direction::Up => "▲ ",
        game::Direction::Down => "▼ ",
        game::Direction::Left => "◀ ",
        game::Direction::Right => "▶ ",
    }
}

fn phase_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Ready => "Ready",
        GamePhase::Running => "Running",
        GamePhase::Paused => "Paused",
        GamePhase::Over => "Over",
    }
}

fn end_reason_text(reason: Option<EndReason>) -> &'static str {
    match reason {
        Some(EndReason::Wall) => "Hit the wall",
        Some(EndReason::SelfCollision) => "Bit its own tail",
        Some(EndReason::BoardFilled) => "The board is full",
        None => "",
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
