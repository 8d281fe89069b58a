//! Fit viewport
//!
//! The world is scaled uniformly to fit the screen and centred, leaving
//! letterbox bars on the long axis. Screen coordinates are pixels with a
//! y-down origin at the top-left; world coordinates are y-up.

use glam::Vec2;

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    world_size: Vec2,
    screen_size: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Vec2::new(WORLD_WIDTH, WORLD_HEIGHT))
    }
}

impl Viewport {
    /// Viewport over a world of the given size, with a screen of the same size
    pub fn new(world_size: Vec2) -> Self {
        Self {
            world_size,
            screen_size: world_size,
        }
    }

    /// Update for a new screen size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        log::debug!(
            "Viewport resized to {}x{} (scale {:.3})",
            width,
            height,
            self.scale()
        );
    }

    /// Screen pixels per world unit
    pub fn scale(&self) -> f32 {
        (self.screen_size.x / self.world_size.x).min(self.screen_size.y / self.world_size.y)
    }

    /// Bottom-left corner of the letterboxed area, in y-up screen pixels
    fn origin(&self) -> Vec2 {
        (self.screen_size - self.world_size * self.scale()) * 0.5
    }

    /// Screen pixel (y-down) to world units (y-up)
    pub fn unproject(&self, screen: Vec2) -> Vec2 {
        let flipped = Vec2::new(screen.x, self.screen_size.y - screen.y);
        (flipped - self.origin()) / self.scale()
    }

    /// World units (y-up) to screen pixel (y-down)
    pub fn project(&self, world: Vec2) -> Vec2 {
        let flipped = world * self.scale() + self.origin();
        Vec2::new(flipped.x, self.screen_size.y - flipped.y)
    }
}
