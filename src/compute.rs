/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameSession` and returns a brand-new `GameSession`.  Nothing here
/// touches the terminal, the clock or the filesystem.

use std::ops::ControlFlow;

use tracing::{debug, info};

use crate::entities::{Bullet, GameSession, GameStatus, Ship, Size};
use crate::error::ConfigError;
use crate::fleet;
use crate::settings::Settings;

pub const STARTING_LIVES: u32 = 3;

/// Logical input, already decoded from raw key events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft { held: bool },
    MoveRight { held: bool },
    Fire,
    /// Honoured only while the game is over.
    Restart,
    Quit,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state: full fleet, centred ship, three lives.
///
/// Fails only when the screen cannot hold a single alien.
pub fn init_state(settings: Settings, alien_size: Size) -> Result<GameSession, ConfigError> {
    let grid = fleet::grid_dimensions(&settings, alien_size)?;
    info!(
        columns = grid.columns,
        rows = grid.rows,
        width = settings.screen_width,
        height = settings.screen_height,
        "new game"
    );
    Ok(GameSession {
        ship: Ship::new(&settings),
        bullets: Vec::new(),
        aliens: fleet::build_fleet(&settings, alien_size),
        alien_size,
        score: 0,
        lives: STARTING_LIVES,
        level: 1,
        status: GameStatus::Active,
        frame: 0,
        settings,
    })
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Apply one input command.  `Break` means the player asked to quit; it is
/// returned in every state and the caller is expected to stop the loop.
pub fn apply_command(state: &GameSession, command: Command) -> ControlFlow<(), GameSession> {
    let next = match command {
        Command::Quit => return ControlFlow::Break(()),
        Command::MoveLeft { held } => set_moving_left(state, held),
        Command::MoveRight { held } => set_moving_right(state, held),
        Command::Fire => fire_bullet(state),
        Command::Restart => restart(state),
    };
    ControlFlow::Continue(next)
}

pub fn set_moving_left(state: &GameSession, held: bool) -> GameSession {
    if !state.is_active() {
        return state.clone();
    }
    GameSession {
        ship: Ship {
            moving_left: held,
            ..state.ship.clone()
        },
        ..state.clone()
    }
}

pub fn set_moving_right(state: &GameSession, held: bool) -> GameSession {
    if !state.is_active() {
        return state.clone();
    }
    GameSession {
        ship: Ship {
            moving_right: held,
            ..state.ship.clone()
        },
        ..state.clone()
    }
}

/// Fire from the ship's nose, unless the bullet cap is reached or the game
/// is over.  A refused shot is not an error.
pub fn fire_bullet(state: &GameSession) -> GameSession {
    if !state.is_active() || state.bullets.len() >= state.settings.bullets_allowed {
        debug!(live = state.bullets.len(), "fire ignored");
        return state.clone();
    }
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet::new(&state.ship, &state.settings));
    GameSession {
        bullets,
        ..state.clone()
    }
}

/// Start over from a finished game.  Ignored while a game is running.
pub fn restart(state: &GameSession) -> GameSession {
    if state.is_active() {
        return state.clone();
    }
    let mut next = state.clone();
    next.settings.reset();
    next.score = 0;
    next.lives = STARTING_LIVES;
    next.level = 1;
    next.status = GameStatus::Active;
    next.ship.moving_left = false;
    next.ship.moving_right = false;
    reset_positions(&mut next);
    info!(previous_score = state.score, "game restarted");
    next
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame: ship, bullets, fleet, then
/// collisions and whatever state change they cause.  A finished game is
/// returned unchanged.
pub fn tick(state: &GameSession) -> GameSession {
    if !state.is_active() {
        return state.clone();
    }
    let mut next = state.clone();
    next.frame += 1;

    next.ship.update(&next.settings);
    update_bullets(&mut next);
    fleet::update_aliens(&mut next.aliens, &mut next.settings);
    check_collisions(&mut next);

    next
}

fn update_bullets(state: &mut GameSession) {
    let speed = state.settings.bullet_speed;
    for bullet in state.bullets.iter_mut() {
        bullet.update(speed);
    }

    let gone: Vec<usize> = state
        .bullets
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_off_screen())
        .map(|(i, _)| i)
        .collect();
    if !gone.is_empty() {
        state.bullets = without(&state.bullets, &gone);
    }
}

// ── Collisions ───────────────────────────────────────────────────────────────

fn check_collisions(state: &mut GameSession) {
    // Bullets ↔ aliens.  Each bullet takes out every alien it overlaps; an
    // alien already destroyed by an earlier bullet is not scored twice.
    let mut dead_aliens = vec![false; state.aliens.len()];
    let mut spent_bullets: Vec<usize> = Vec::new();
    for (bi, bullet) in state.bullets.iter().enumerate() {
        let mut hit = false;
        for (ai, alien) in state.aliens.iter().enumerate() {
            if !dead_aliens[ai] && bullet.rect.collides(&alien.rect) {
                dead_aliens[ai] = true;
                hit = true;
            }
        }
        if hit {
            spent_bullets.push(bi);
        }
    }

    let killed: Vec<usize> = dead_aliens
        .iter()
        .enumerate()
        .filter(|(_, dead)| **dead)
        .map(|(i, _)| i)
        .collect();
    if !killed.is_empty() {
        state.score += killed.len() as u32 * state.settings.alien_points;
        state.aliens = without(&state.aliens, &killed);
        state.bullets = without(&state.bullets, &spent_bullets);
    }

    // Aliens ↔ ship, or an alien reaching the bottom.  Either way it is one hit.
    let touched_ship = state
        .aliens
        .iter()
        .any(|a| a.rect.collides(&state.ship.rect));
    let reached_bottom = state
        .aliens
        .iter()
        .any(|a| a.rect.bottom() >= state.settings.screen_height);

    if touched_ship || reached_bottom {
        ship_hit(state);
    } else if state.aliens.is_empty() {
        start_new_level(state);
    }
}

// ── State transitions ────────────────────────────────────────────────────────

fn ship_hit(state: &mut GameSession) {
    if state.lives > 1 {
        state.lives -= 1;
        reset_positions(state);
        info!(lives = state.lives, score = state.score, "ship hit");
    } else {
        // The last life is never taken; the board stays as it was.
        state.status = GameStatus::GameOver;
        info!(score = state.score, level = state.level, "game over");
    }
}

fn start_new_level(state: &mut GameSession) {
    state.settings.increase_difficulty();
    state.level += 1;
    reset_positions(state);
    info!(
        level = state.level,
        alien_speed = state.settings.alien_speed,
        "fleet destroyed, next level"
    );
}

fn reset_positions(state: &mut GameSession) {
    state.bullets.clear();
    state.aliens = fleet::build_fleet(&state.settings, state.alien_size);
    state.ship.center(&state.settings);
}

/// Copy of `items` without the given indices.
fn without<T: Clone>(items: &[T], removed: &[usize]) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| !removed.contains(i))
        .map(|(_, item)| item.clone())
        .collect()
}
