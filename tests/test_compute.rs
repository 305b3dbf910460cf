use std::ops::ControlFlow;

use alien_invasion::compute::*;
use alien_invasion::config::GameConfig;
use alien_invasion::entities::*;
use alien_invasion::error::ConfigError;
use alien_invasion::settings::{FleetDirection, Settings};

const ALIEN: Size = Size { width: 20, height: 20 };

/// 800x600 screen, 60x48 ship, 20x20 aliens: a 19 x 10 fleet.
fn make_state() -> GameSession {
    init_state(Settings::default(), ALIEN).unwrap()
}

/// A state whose fleet is replaced by the given aliens, placed by top-left corner.
fn with_aliens(positions: &[(i32, i32)]) -> GameSession {
    let mut s = make_state();
    s.aliens = positions.iter().map(|&(x, y)| Alien::new(x, y, ALIEN)).collect();
    s
}

fn bullet_at(x: i32, y: i32) -> Bullet {
    Bullet {
        y: y as f32,
        rect: Rect::new(x, y, 3, 15),
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_starts_active_with_full_fleet() {
    let s = make_state();
    assert_eq!(s.status, GameStatus::Active);
    assert_eq!(s.lives, 3);
    assert_eq!(s.score, 0);
    assert_eq!(s.level, 1);
    assert_eq!(s.frame, 0);
    assert_eq!(s.aliens.len(), 19 * 10);
    assert!(s.bullets.is_empty());
}

#[test]
fn init_state_centres_ship_on_bottom_edge() {
    let s = make_state();
    assert_eq!(s.ship.rect.x, 370);
    assert_eq!(s.ship.rect.bottom(), 600);
    assert!(!s.ship.moving_left && !s.ship.moving_right);
}

#[test]
fn init_state_rejects_screen_without_room_for_aliens() {
    let mut config = GameConfig::default();
    config.window.width = 30;
    config.ship.width = 20;
    let err = init_state(Settings::new(&config), ALIEN).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyFleet { columns, .. } if columns <= 0));
}

// ── input commands ────────────────────────────────────────────────────────────

#[test]
fn move_flags_follow_held_state() {
    let s = make_state();
    let s2 = set_moving_left(&s, true);
    assert!(s2.ship.moving_left);
    let s3 = set_moving_right(&s2, true);
    assert!(s3.ship.moving_left && s3.ship.moving_right);
    let s4 = set_moving_left(&s3, false);
    assert!(!s4.ship.moving_left);
    // pure: the original is untouched
    assert!(!s.ship.moving_left);
}

#[test]
fn quit_breaks_in_every_state() {
    let s = make_state();
    assert_eq!(apply_command(&s, Command::Quit), ControlFlow::Break(()));
    let mut over = make_state();
    over.status = GameStatus::GameOver;
    assert_eq!(apply_command(&over, Command::Quit), ControlFlow::Break(()));
}

#[test]
fn movement_ignored_while_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    match apply_command(&s, Command::MoveRight { held: true }) {
        ControlFlow::Continue(next) => assert!(!next.ship.moving_right),
        ControlFlow::Break(()) => panic!("movement must not quit"),
    }
}

// ── firing ────────────────────────────────────────────────────────────────────

#[test]
fn fire_spawns_bullet_at_ship_nose() {
    let s = make_state();
    let s2 = fire_bullet(&s);
    assert_eq!(s2.bullets.len(), 1);
    let b = &s2.bullets[0];
    assert_eq!(b.rect.centerx(), s.ship.rect.centerx());
    assert_eq!(b.rect.top(), s.ship.rect.top());
    assert_eq!(b.y, s.ship.rect.top() as f32);
}

#[test]
fn fire_capped_at_bullets_allowed() {
    let mut s = make_state();
    for _ in 0..3 {
        s = fire_bullet(&s);
    }
    assert_eq!(s.bullets.len(), 3);
    let s2 = fire_bullet(&fire_bullet(&s));
    assert_eq!(s2.bullets.len(), 3);
}

#[test]
fn fire_ignored_while_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    assert!(fire_bullet(&s).bullets.is_empty());
}

// ── tick — ship & bullets ─────────────────────────────────────────────────────

#[test]
fn tick_increments_frame() {
    let s = make_state();
    assert_eq!(tick(&s).frame, 1);
}

#[test]
fn tick_moves_ship_by_ship_speed() {
    let s = set_moving_right(&make_state(), true);
    let s2 = tick(&s);
    assert_eq!(s2.ship.x, 375.0);
    assert_eq!(s2.ship.rect.x, 375);
}

#[test]
fn tick_bullet_climbs_by_bullet_speed() {
    let mut s = make_state();
    s.bullets.push(bullet_at(5, 500));
    let s2 = tick(&s);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].y, 493.0);
    assert_eq!(s2.bullets[0].rect.y, 493);
}

#[test]
fn tick_removes_bullet_once_fully_off_top() {
    let mut s = make_state();
    s.bullets.push(bullet_at(5, -10)); // → -17, bottom -2: gone
    s.bullets.push(bullet_at(9, 2)); // → -5, bottom 10: still visible
    let s2 = tick(&s);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].rect.x, 9);
}

#[test]
fn bullets_never_linger_below_top_edge() {
    let mut s = make_state();
    for _ in 0..300 {
        s = tick(&fire_bullet(&s));
        for b in &s.bullets {
            assert!(b.rect.bottom() > 0);
        }
    }
}

// ── tick — bullet ↔ alien ─────────────────────────────────────────────────────

#[test]
fn bullet_destroys_alien_and_scores() {
    let mut s = with_aliens(&[(100, 100), (300, 100)]);
    s.bullets.push(bullet_at(105, 110)); // climbs to 103, inside the first alien
    let s2 = tick(&s);
    assert_eq!(s2.score, 10);
    assert_eq!(s2.aliens.len(), 1);
    assert_eq!(s2.aliens[0].rect.x, 301);
    assert!(s2.bullets.is_empty());
}

#[test]
fn one_bullet_destroys_every_alien_it_overlaps() {
    let mut s = with_aliens(&[(100, 100), (100, 110), (600, 100)]);
    s.bullets.push(bullet_at(105, 110));
    let s2 = tick(&s);
    assert_eq!(s2.score, 20);
    assert_eq!(s2.aliens.len(), 1);
    assert!(s2.bullets.is_empty());
}

#[test]
fn alien_is_only_scored_once() {
    let mut s = with_aliens(&[(100, 100), (600, 100)]);
    s.bullets.push(bullet_at(105, 110));
    s.bullets.push(bullet_at(108, 112));
    let s2 = tick(&s);
    assert_eq!(s2.score, 10);
    // the second bullet found nothing left to hit and keeps flying
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].rect.x, 108);
}

#[test]
fn bullet_missing_alien_leaves_it() {
    let mut s = with_aliens(&[(100, 100)]);
    s.bullets.push(bullet_at(200, 110));
    let s2 = tick(&s);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.aliens.len(), 1);
    assert_eq!(s2.bullets.len(), 1);
}

// ── tick — new level ──────────────────────────────────────────────────────────

#[test]
fn clearing_the_fleet_starts_next_level() {
    let mut s = with_aliens(&[(100, 100)]);
    s.bullets.push(bullet_at(105, 110));
    s.bullets.push(bullet_at(500, 300));
    let s2 = tick(&s);

    assert_eq!(s2.level, 2);
    assert_eq!(s2.score, 10);
    assert_eq!(s2.lives, 3);
    assert_eq!(s2.aliens.len(), 19 * 10);
    assert!(s2.bullets.is_empty());
    assert!((s2.settings.alien_speed - 1.0 * 1.1).abs() < 1e-6);
    assert_eq!(s2.status, GameStatus::Active);
}

#[test]
fn difficulty_compounds_across_levels() {
    let mut s = make_state();
    for _ in 0..3 {
        s.aliens = vec![Alien::new(100, 100, ALIEN)];
        s.bullets = vec![bullet_at(105, 110)];
        s = tick(&s);
    }
    assert_eq!(s.level, 4);
    assert_eq!(s.score, 30);
    assert!((s.settings.alien_speed - 1.1f32.powi(3)).abs() < 1e-5);
}

// ── tick — ship hit ───────────────────────────────────────────────────────────

#[test]
fn alien_touching_ship_costs_a_life_and_resets_board() {
    let mut s = with_aliens(&[(10, 560), (300, 100)]);
    s.ship.x = 0.0;
    s.ship.rect.x = 0;
    s.settings.fleet_direction = FleetDirection::Left;
    s.settings.alien_speed = 2.0;
    s.bullets.push(bullet_at(500, 300));

    let s2 = tick(&s);

    assert_eq!(s2.lives, 2);
    assert_eq!(s2.status, GameStatus::Active);
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.aliens.len(), 19 * 10);
    assert_eq!(s2.ship.rect.x, 370);
    // the fleet keeps its heading and pace
    assert_eq!(s2.settings.fleet_direction, FleetDirection::Left);
    assert_eq!(s2.settings.alien_speed, 2.0);
}

#[test]
fn alien_reaching_bottom_counts_as_hit() {
    let s = with_aliens(&[(700, 585), (100, 100)]);
    let s2 = tick(&s);
    assert_eq!(s2.lives, 2);
    assert_eq!(s2.aliens.len(), 19 * 10);
}

#[test]
fn hit_and_bottom_same_frame_costs_one_life() {
    // overlaps the ship (370..430, 552..600) and pokes past the bottom edge
    let s = with_aliens(&[(380, 585)]);
    assert!(s.aliens[0].rect.collides(&s.ship.rect));

    let s2 = tick(&s);

    assert_eq!(s2.lives, 2);
    assert_eq!(s2.status, GameStatus::Active);
    assert_eq!(s2.level, 1);
    assert_eq!(s2.aliens.len(), 19 * 10);
    assert_eq!(s2.ship.rect.x, 370);
}

#[test]
fn last_life_hit_ends_game_and_keeps_board() {
    let mut s = with_aliens(&[(700, 585), (100, 100)]);
    s.lives = 1;
    s.bullets.push(bullet_at(5, 500));

    let s2 = tick(&s);

    assert_eq!(s2.status, GameStatus::GameOver);
    assert!(!s2.is_active());
    assert_eq!(s2.lives, 1);
    assert_eq!(s2.aliens.len(), 2);
    assert_eq!(s2.aliens[0].rect.x, 701);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].rect.y, 493);
}

#[test]
fn game_over_state_is_frozen() {
    let mut s = make_state();
    s.bullets.push(bullet_at(5, 500));
    s.ship.moving_right = true;
    s.status = GameStatus::GameOver;

    let mut s2 = s.clone();
    for _ in 0..10 {
        s2 = tick(&s2);
    }
    assert_eq!(s2, s);
}

// ── restart ───────────────────────────────────────────────────────────────────

#[test]
fn restart_from_game_over_resets_everything() {
    let mut s = make_state();
    s.settings.increase_difficulty();
    s.settings.increase_difficulty();
    s.settings.fleet_direction = FleetDirection::Left;
    s.score = 120;
    s.level = 3;
    s.lives = 1;
    s.ship.moving_left = true;
    s.bullets.push(bullet_at(5, 500));
    s.aliens.truncate(4);
    s.status = GameStatus::GameOver;

    let s2 = match apply_command(&s, Command::Restart) {
        ControlFlow::Continue(next) => next,
        ControlFlow::Break(()) => panic!("restart must not quit"),
    };

    assert_eq!(s2.status, GameStatus::Active);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.lives, 3);
    assert_eq!(s2.level, 1);
    assert_eq!(s2.settings.alien_speed, 1.0);
    assert_eq!(s2.settings.ship_speed, 5.0);
    assert_eq!(s2.settings.bullet_speed, 7.0);
    assert_eq!(s2.settings.speedup_scale, 1.1);
    assert_eq!(s2.settings.fleet_direction, FleetDirection::Right);
    assert_eq!(s2.aliens.len(), 19 * 10);
    assert!(s2.bullets.is_empty());
    assert!(!s2.ship.moving_left);
    assert_eq!(s2.ship.rect.x, 370);
}

#[test]
fn restart_ignored_while_playing() {
    let mut s = make_state();
    s.score = 50;
    assert_eq!(restart(&s), s);
}
