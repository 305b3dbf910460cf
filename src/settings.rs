/// Session-wide tunables.
///
/// Sizes and colours are fixed for the whole session.  The speed block is
/// scaled up on every level and restored by [`Settings::reset`].

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FleetDirection {
    Left,
    Right,
}

impl FleetDirection {
    pub fn sign(self) -> f32 {
        match self {
            FleetDirection::Left => -1.0,
            FleetDirection::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            FleetDirection::Left => FleetDirection::Right,
            FleetDirection::Right => FleetDirection::Left,
        }
    }
}

/// The values that change with difficulty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Speeds {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub fleet_direction: FleetDirection,
    pub speedup_scale: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub screen_width: i32,
    pub screen_height: i32,
    pub bg_color: [u8; 3],

    pub ship_width: i32,
    pub ship_height: i32,

    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_color: [u8; 3],
    pub bullets_allowed: usize,

    pub fleet_drop_speed: i32,
    pub alien_points: u32,

    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub fleet_direction: FleetDirection,
    pub speedup_scale: f32,

    initial: Speeds,
}

impl Settings {
    pub fn new(config: &GameConfig) -> Self {
        let initial = Speeds {
            ship_speed: config.ship.speed,
            bullet_speed: config.bullet.speed,
            alien_speed: config.fleet.alien_speed,
            fleet_direction: FleetDirection::Right,
            speedup_scale: config.fleet.speedup_scale,
        };
        let mut settings = Self {
            screen_width: config.window.width,
            screen_height: config.window.height,
            bg_color: config.window.bg_color,
            ship_width: config.ship.width,
            ship_height: config.ship.height,
            bullet_width: config.bullet.width,
            bullet_height: config.bullet.height,
            bullet_color: config.bullet.color,
            bullets_allowed: config.bullet.allowed,
            fleet_drop_speed: config.fleet.drop_speed,
            alien_points: config.fleet.points_per_alien,
            ship_speed: 0.0,
            bullet_speed: 0.0,
            alien_speed: 0.0,
            fleet_direction: FleetDirection::Right,
            speedup_scale: 0.0,
            initial,
        };
        settings.reset();
        settings
    }

    /// The speeds this session started with.
    pub fn initial_speeds(&self) -> Speeds {
        self.initial
    }

    /// Current speed block, for logging and snapshots.
    pub fn speeds(&self) -> Speeds {
        Speeds {
            ship_speed: self.ship_speed,
            bullet_speed: self.bullet_speed,
            alien_speed: self.alien_speed,
            fleet_direction: self.fleet_direction,
            speedup_scale: self.speedup_scale,
        }
    }

    /// Scale every speed by `speedup_scale`.  Compounds across levels.
    pub fn increase_difficulty(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.alien_speed *= self.speedup_scale;
    }

    pub fn reset(&mut self) {
        let Speeds {
            ship_speed,
            bullet_speed,
            alien_speed,
            fleet_direction,
            speedup_scale,
        } = self.initial;
        self.ship_speed = ship_speed;
        self.bullet_speed = bullet_speed;
        self.alien_speed = alien_speed;
        self.fleet_direction = fleet_direction;
        self.speedup_scale = speedup_scale;
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
