/// Alien fleet layout and collective motion.

use tracing::debug;

use crate::entities::{Alien, Size};
use crate::error::ConfigError;
use crate::settings::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FleetGrid {
    pub columns: i32,
    pub rows: i32,
}

impl FleetGrid {
    /// Columns and rows that fit the screen, leaving one alien of margin on
    /// each side and between neighbours, and three ship heights of clearance
    /// above the bottom.  May be zero or negative on tiny screens.
    pub fn fit(settings: &Settings, alien: Size) -> Self {
        let step_x = alien.width.saturating_mul(2).max(1);
        let step_y = alien.height.saturating_mul(2).max(1);
        let available_x = settings.screen_width.saturating_sub(step_x);
        let available_y = settings
            .screen_height
            .saturating_sub(settings.ship_height.saturating_mul(3))
            .saturating_sub(alien.height);
        FleetGrid {
            columns: available_x.div_euclid(step_x),
            rows: available_y.div_euclid(step_y),
        }
    }

    /// Number of aliens in the grid, or `None` if it does not fit an `i32`.
    pub fn count(&self) -> Option<usize> {
        let aliens = self.columns.max(0).checked_mul(self.rows.max(0))?;
        usize::try_from(aliens).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.columns <= 0 || self.rows <= 0
    }
}

/// Like [`FleetGrid::fit`], but an empty grid is a startup error rather than
/// an unwinnable level.
pub fn grid_dimensions(settings: &Settings, alien: Size) -> Result<FleetGrid, ConfigError> {
    if alien.width <= 0 || alien.height <= 0 {
        return Err(ConfigError::Invalid {
            field: "alien sprite",
            reason: format!("{}x{} is not a usable size", alien.width, alien.height),
        });
    }
    let grid = FleetGrid::fit(settings, alien);
    if grid.is_empty() {
        return Err(ConfigError::EmptyFleet {
            columns: grid.columns,
            rows: grid.rows,
        });
    }
    if grid.count().is_none() {
        return Err(ConfigError::Invalid {
            field: "window",
            reason: format!(
                "{} x {} aliens is too many to lay out",
                grid.columns, grid.rows
            ),
        });
    }
    Ok(grid)
}

/// Lay out a full fleet, row by row.
pub fn build_fleet(settings: &Settings, alien: Size) -> Vec<Alien> {
    let grid = FleetGrid::fit(settings, alien);
    let mut aliens = Vec::with_capacity(grid.count().unwrap_or(0));
    for row in 0..grid.rows.max(0) {
        for column in 0..grid.columns.max(0) {
            let x = alien.width * (1 + 2 * column);
            let y = alien.height * (1 + 2 * row);
            aliens.push(Alien::new(x, y, alien));
        }
    }
    aliens
}

/// Drop the fleet and reverse it if any alien has reached a side.
/// Returns whether a reversal happened.
pub fn check_fleet_edges(aliens: &mut [Alien], settings: &mut Settings) -> bool {
    if aliens.iter().any(|a| a.at_edge(settings.screen_width)) {
        change_fleet_direction(aliens, settings);
        true
    } else {
        false
    }
}

pub fn change_fleet_direction(aliens: &mut [Alien], settings: &mut Settings) {
    for alien in aliens.iter_mut() {
        alien.drop_by(settings.fleet_drop_speed);
    }
    settings.fleet_direction = settings.fleet_direction.flipped();
    debug!(direction = ?settings.fleet_direction, "fleet reversed");
}

/// One frame of fleet motion: edge check first, then the sideways step.
pub fn update_aliens(aliens: &mut [Alien], settings: &mut Settings) {
    check_fleet_edges(aliens, settings);
    for alien in aliens.iter_mut() {
        alien.update(settings.alien_speed, settings.fleet_direction);
    }
}
