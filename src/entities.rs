/// Game entity types and their per-frame motion rules.
///
/// Entities never hold a reference back to the session; whatever they need
/// from [`Settings`] is passed in by the caller.

use crate::settings::{FleetDirection, Settings};

// ── Geometry ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

/// Integer bounding box in screen pixels, y growing downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.width / 2
    }

    /// True when the two boxes share at least one pixel.  Touching edges
    /// do not count.
    pub fn collides(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Ship ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    /// Exact horizontal position; `rect.x` is its truncation.
    pub x: f32,
    pub rect: Rect,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// A stationary ship centred on the bottom edge.
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Ship {
            x: 0.0,
            rect: Rect::new(0, 0, settings.ship_width, settings.ship_height),
            moving_left: false,
            moving_right: false,
        };
        ship.center(settings);
        ship
    }

    pub fn update(&mut self, settings: &Settings) {
        let mut x = self.x;
        if self.moving_right {
            x += settings.ship_speed;
        }
        if self.moving_left {
            x -= settings.ship_speed;
        }
        let max_x = (settings.screen_width - self.rect.width).max(0) as f32;
        self.x = x.clamp(0.0, max_x);
        self.rect.x = self.x as i32;
    }

    pub fn center(&mut self, settings: &Settings) {
        self.rect.x = settings.screen_width / 2 - self.rect.width / 2;
        self.rect.y = settings.screen_height - self.rect.height;
        self.x = self.rect.x as f32;
    }
}

// ── Bullet ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    /// Exact vertical position, decreasing as the bullet climbs.
    pub y: f32,
    pub rect: Rect,
}

impl Bullet {
    /// Spawn at the ship's nose: centred on it, top edges aligned.
    pub fn new(ship: &Ship, settings: &Settings) -> Self {
        let rect = Rect::new(
            ship.rect.centerx() - settings.bullet_width / 2,
            ship.rect.top(),
            settings.bullet_width,
            settings.bullet_height,
        );
        Bullet {
            y: rect.y as f32,
            rect,
        }
    }

    pub fn update(&mut self, bullet_speed: f32) {
        self.y -= bullet_speed;
        self.rect.y = self.y as i32;
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() <= 0
    }
}

// ── Alien ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    pub rect: Rect,
}

impl Alien {
    pub fn new(x: i32, y: i32, size: Size) -> Self {
        Alien {
            x: x as f32,
            y: y as f32,
            rect: Rect::new(x, y, size.width, size.height),
        }
    }

    /// True once the alien touches or passes either side of the screen.
    pub fn at_edge(&self, screen_width: i32) -> bool {
        self.rect.right() >= screen_width || self.rect.left() <= 0
    }

    pub fn drop_by(&mut self, amount: i32) {
        self.y += amount as f32;
        self.rect.y = self.y as i32;
    }

    pub fn update(&mut self, alien_speed: f32, direction: FleetDirection) {
        self.x += alien_speed * direction.sign();
        self.rect.x = self.x as i32;
    }
}

// ── Session ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    GameOver,
}

/// The entire game state.  Cloneable so the pure update functions in
/// [`crate::compute`] can return a new copy without touching the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub settings: Settings,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
    /// Bounding box of the alien sprite; drives the fleet layout.
    pub alien_size: Size,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub status: GameStatus,
    pub frame: u64,
}

impl GameSession {
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            screen_width: self.settings.screen_width,
            screen_height: self.settings.screen_height,
            bg_color: self.settings.bg_color,
            bullet_color: self.settings.bullet_color,
            ship: self.ship.rect,
            bullets: self.bullets.iter().map(|b| b.rect).collect(),
            aliens: self.aliens.iter().map(|a| a.rect).collect(),
            score: self.score,
            lives: self.lives,
            level: self.level,
            game_active: self.is_active(),
        }
    }
}

/// Read-only view handed to the renderer once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub screen_width: i32,
    pub screen_height: i32,
    pub bg_color: [u8; 3],
    pub bullet_color: [u8; 3],
    pub ship: Rect,
    pub bullets: Vec<Rect>,
    pub aliens: Vec<Rect>,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub game_active: bool,
}
