mod direction;
mod effects;
mod engine;
mod food;
mod grid;
mod over;
mod paused;
mod session;
mod snake;
mod spawner;
mod speed;
mod timer;
pub(crate) use self::grid::Grid;
pub(crate) use self::session::Session;
use self::direction::Direction;
use self::over::GameOver;
use self::paused::Paused;
use self::session::{GameStatus, Snapshot};
use crate::app::AppState;
use crate::command::Command;
use crate::consts;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use rand::{rngs::ThreadRng, Rng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, LineGauge, Widget},
    Frame,
};
use std::io;
use std::time::Instant;

/// The game screen: a [`Session`] plus the glue between it and the terminal
#[derive(Debug)]
pub(crate) struct GameScreen<R = ThreadRng> {
    session: Session<R>,
}

impl<R: Rng> GameScreen<R> {
    pub(crate) fn new(session: Session<R>) -> GameScreen<R> {
        GameScreen { session }
    }

    /// Wait for either the next tick or the next input event, whichever comes
    /// first, and act on it.  With no tick scheduled, this blocks until an
    /// event arrives.
    pub(crate) fn process_input(&mut self) -> io::Result<Option<AppState>> {
        match self.session.timer().wait(Instant::now()) {
            Some(wait) => {
                if wait.is_zero() || !poll(wait)? {
                    self.tick(Instant::now());
                    Ok(None)
                } else {
                    Ok(self.handle_event(read()?, Instant::now()))
                }
            }
            None => Ok(self.handle_event(read()?, Instant::now())),
        }
    }

    fn tick(&mut self, now: Instant) {
        if let Err(e) = self.session.tick(now) {
            tracing::warn!(error = %e, "tick fired while game not running");
        }
    }

    fn handle_event(&mut self, event: Event, now: Instant) -> Option<AppState> {
        if event == Event::FocusLost {
            let _ = self.session.pause();
            return None;
        }
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit => return Some(AppState::Quit),
            Command::Up => self.session.steer(Direction::North, now),
            Command::Down => self.session.steer(Direction::South, now),
            Command::Left => self.session.steer(Direction::West, now),
            Command::Right => self.session.steer(Direction::East, now),
            Command::Start => {
                let _ = self.session.start();
            }
            Command::Pause => {
                let _ = self.session.toggle_pause(now);
            }
            Command::Restart => self.session.restart(),
            Command::Mute => self.session.toggle_sound(),
        }
        None
    }
}

impl<R> GameScreen<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self.view(Instant::now()), frame.area());
    }

    fn view(&self, now: Instant) -> GameView<'_> {
        GameView {
            snapshot: self.session.snapshot(),
            now,
        }
    }
}

/// A rendering of a game as of a given instant (which decides the flash phase
/// and the power-up gauge)
#[derive(Clone, Copy, Debug)]
struct GameView<'a> {
    snapshot: Snapshot<'a>,
    now: Instant,
}

impl GameView<'_> {
    fn render_score_bar(&self, area: Rect, buf: &mut Buffer) {
        let snap = &self.snapshot;
        Line::styled(
            format!(" Score: {}  High: {}", snap.score, snap.high_score),
            consts::SCORE_BAR_STYLE,
        )
        .render(area, buf);
        let sound = if snap.sound { "Sound: on " } else { "Sound: off " };
        Line::from(sound).right_aligned().render(area, buf);
    }

    fn draw_snake(&self, board: &mut Canvas<'_>) {
        let snap = &self.snapshot;
        let snake = snap.snake;
        let flashing = snap.flash.is_active();
        if snap.flash.body_visible(self.now) {
            let tail_index = snake.body().len().saturating_sub(1);
            for (i, &pos) in snake.body().iter().enumerate() {
                let (symbol, style) = if i == tail_index {
                    (consts::SNAKE_TAIL_SYMBOL, consts::SNAKE_TAIL_STYLE)
                } else {
                    (consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE)
                };
                board.draw_cell(
                    pos,
                    symbol,
                    if flashing { consts::FLASH_STYLE } else { style },
                );
            }
        }
        let head_style = if flashing {
            consts::FLASH_STYLE
        } else {
            consts::SNAKE_STYLE
        };
        board.draw_cell(snake.head(), snake.head_symbol(), head_style);
        // Mark the cell the snake crashed into, overwriting whatever is there
        if snap.status == GameStatus::Over {
            let crash = snake.next_head(snap.grid).unwrap_or(snake.head());
            board.draw_cell(crash, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        }
    }

    fn render_message(&self, area: Rect, buf: &mut Buffer) {
        let snap = &self.snapshot;
        match snap.status {
            GameStatus::Idle => key_hints(&[("Start", "Enter"), ("Quit", "q")]).render(area, buf),
            GameStatus::Waiting => {
                Line::from(" Steer with ←↓↑→, wasd, or hjkl to go").render(area, buf);
            }
            GameStatus::Running => {
                if let Some(effect) = snap.active_effect {
                    let label = format!(
                        " {} {:.1}s ",
                        effect.kind.label(),
                        effect.remaining(self.now).as_secs_f64()
                    );
                    let label = Line::styled(label, effect.kind.style());
                    let width = u16::try_from(label.width()).unwrap_or(u16::MAX);
                    let [label_area, gauge_area] =
                        Layout::horizontal([Constraint::Length(width), Constraint::Fill(1)])
                            .areas(area);
                    label.render(label_area, buf);
                    LineGauge::default()
                        .ratio(effect.progress(self.now))
                        .label("")
                        .filled_style(effect.kind.style())
                        .unfilled_style(consts::GAUGE_UNFILLED_STYLE)
                        .render(gauge_area.inner(Margin::new(1, 0)), buf);
                } else {
                    key_hints(&[("Pause", "Space"), ("Restart", "r"), ("Sound", "m")])
                        .render(area, buf);
                }
            }
            GameStatus::Paused | GameStatus::Over => (),
        }
    }
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.snapshot;
        let display = get_display_area(area, snap.grid);
        let [score_area, board_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        self.render_score_bar(score_area, buf);

        let side = snap.grid.size();
        let block_size = Size {
            width: side.saturating_mul(2).saturating_add(2),
            height: side.saturating_add(2),
        };
        let block_area = center_rect(board_area, block_size);
        Block::bordered().render(block_area, buf);
        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for food in snap.foods {
            board.draw_cell(food.position, food.kind.symbol(), food.kind.style());
        }
        self.draw_snake(&mut board);

        match snap.status {
            GameStatus::Paused => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                Paused.render(pause_area, buf);
            }
            GameStatus::Over => {
                let over_area = center_rect(
                    display,
                    Size {
                        width: GameOver::WIDTH,
                        height: GameOver::HEIGHT,
                    },
                );
                GameOver {
                    score: snap.score,
                    high_score: snap.high_score,
                    new_record: snap.new_record,
                }
                .render(over_area, buf);
            }
            GameStatus::Idle | GameStatus::Waiting | GameStatus::Running => (),
        }
        self.render_message(msg_area, buf);
    }
}

/// Build a line of the form " Label (key)  Label (key)" with the keys
/// highlighted
fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut line = Line::default();
    for (i, &(label, key)) in hints.iter().enumerate() {
        line.push_span(if i == 0 { " " } else { "  " });
        line.push_span(label);
        line.push_span(" (");
        line.push_span(Span::styled(key, consts::KEY_STYLE));
        line.push_span(")");
    }
    line
}

/// The inside of the board, addressed in grid cells.  Each cell is two
/// terminal columns wide; the glyph goes in the left column.
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(2)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}
