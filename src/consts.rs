//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Default number of cells along each side of the (square) grid
pub(crate) const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest grid side accepted from the configuration; the initial snake
/// needs room for its three segments to the left of the centre.
pub(crate) const MIN_GRID_SIZE: u16 = 6;

/// Largest grid side accepted from the configuration
pub(crate) const MAX_GRID_SIZE: u16 = 40;

/// The maximum number of food items present on the grid at one time
pub(crate) const MAX_FOODS: usize = 3;

/// Number of segments the snake starts with
pub(crate) const INITIAL_SNAKE_LENGTH: u16 = 3;

/// Tick interval at a score of zero, in milliseconds
pub(crate) const BASE_SPEED_MS: u64 = 150;

/// The tick interval never drops below this many milliseconds from score
/// alone
pub(crate) const MIN_SPEED_MS: u64 = 80;

/// How many milliseconds the tick interval shrinks by per speed step
pub(crate) const SPEED_INCREMENT_MS: u64 = 2;

/// How many points make up one speed step
pub(crate) const POINTS_PER_SPEED_STEP: u32 = 5;

/// Floor for the tick interval while a Speed power-up is active, in
/// milliseconds
pub(crate) const BOOSTED_MIN_SPEED_MS: u64 = 50;

/// Points awarded for eating any power-up
pub(crate) const POWER_UP_POINTS: u32 = 5;

/// Probability that a single placement attempt draws a power-up rather than
/// score food
pub(crate) const POWER_UP_PROBABILITY: f64 = 0.1;

/// Placement attempts before the spawner gives up on one item
pub(crate) const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// How long the Speed power-up lasts
pub(crate) const SPEED_DURATION: Duration = Duration::from_millis(5000);

/// How long the Slow power-up lasts
pub(crate) const SLOW_DURATION: Duration = Duration::from_millis(7000);

/// How long the Invincible power-up lasts
pub(crate) const INVINCIBLE_DURATION: Duration = Duration::from_millis(3000);

/// How long the snake's body flashes after any power-up is eaten
pub(crate) const FLASH_DURATION: Duration = Duration::from_millis(1500);

/// Length of one visible or hidden half of a flash blink
pub(crate) const FLASH_BLINK_PERIOD: Duration = Duration::from_millis(200);

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the last segment of the snake
pub(crate) const SNAKE_TAIL_SYMBOL: char = '∘';

/// Glyph for the Speed power-up
pub(crate) const SPEED_SYMBOL: char = '»';

/// Glyph for the Slow power-up
pub(crate) const SLOW_SYMBOL: char = '«';

/// Glyph for the Invincible power-up
pub(crate) const INVINCIBLE_SYMBOL: char = '◈';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the snake's tail
pub(crate) const SNAKE_TAIL_STYLE: Style = Style::new().fg(Color::Green);

/// Style for the snake's body while it is flashing
pub(crate) const FLASH_STYLE: Style = Style::new()
    .fg(Color::Rgb(0xff, 0xd7, 0x00))
    .add_modifier(Modifier::BOLD);

/// Style for 1-point food
pub(crate) const RED_FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for 2-point food
pub(crate) const BLUE_FOOD_STYLE: Style = Style::new().fg(Color::LightBlue);

/// Style for 3-point food
pub(crate) const GREEN_FOOD_STYLE: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

/// Style for the Speed power-up
pub(crate) const SPEED_STYLE: Style = Style::new()
    .fg(Color::Rgb(0xff, 0xa5, 0x00))
    .add_modifier(Modifier::BOLD);

/// Style for the Slow power-up
pub(crate) const SLOW_STYLE: Style = Style::new()
    .fg(Color::Rgb(0x99, 0x66, 0xcc))
    .add_modifier(Modifier::BOLD);

/// Style for the Invincible power-up
pub(crate) const INVINCIBLE_STYLE: Style = Style::new()
    .fg(Color::Rgb(0xff, 0xd7, 0x00))
    .add_modifier(Modifier::BOLD);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// The game display is never narrower than this, so that the key hints under
/// the board fit on small grids
pub(crate) const MIN_DISPLAY_WIDTH: u16 = 44;

/// Style for the empty part of the power-up timer gauge
pub(crate) const GAUGE_UNFILLED_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style for the "New high score!" notice
pub(crate) const RECORD_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);
