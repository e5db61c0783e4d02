//! Host interfaces
//!
//! The engine never renders, plays audio or polls devices itself. The host
//! implements [`DrawSink`] and [`SoundSink`] and hands in an
//! [`InputSnapshot`] each frame.

use crate::foundation::math::Vec2;

/// RGBA color multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Tint {
    /// No tint
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Create a tint from components
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Tint {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

/// One sprite draw request
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    /// Host-side sprite (texture) name
    pub sprite: &'static str,
    /// Frame index within the sprite sheet
    pub frame: u32,
    /// World-space center
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Uniform scale
    pub scale: f32,
    /// Color multiplier
    pub tint: Tint,
}

impl SpriteDraw {
    /// Create a draw of frame 0 with no rotation, unit scale and no tint
    pub fn new(sprite: &'static str, position: Vec2) -> Self {
        Self {
            sprite,
            frame: 0,
            position,
            rotation: 0.0,
            scale: 1.0,
            tint: Tint::WHITE,
        }
    }

    /// Set the frame index
    pub fn with_frame(mut self, frame: u32) -> Self {
        self.frame = frame;
        self
    }

    /// Set the rotation
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the tint
    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }
}

/// Receives draw requests; typically enqueues sprites on a host renderer
pub trait DrawSink {
    /// Queue one sprite
    fn draw_sprite(&mut self, draw: SpriteDraw);
}

impl DrawSink for Vec<SpriteDraw> {
    fn draw_sprite(&mut self, draw: SpriteDraw) {
        self.push(draw);
    }
}

/// Receives sound triggers
pub trait SoundSink {
    /// Trigger the named sound cue
    fn play(&mut self, cue: &'static str);
}

impl SoundSink for Vec<&'static str> {
    fn play(&mut self, cue: &'static str) {
        self.push(cue);
    }
}

/// Sound sink that drops every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSound;

impl SoundSink for SilentSound {
    fn play(&mut self, _cue: &'static str) {}
}

/// Input state sampled by the host once per frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Horizontal movement axis in [-1, 1]
    pub move_x: f32,
    /// Vertical movement axis in [-1, 1]
    pub move_y: f32,
    /// Fire held
    pub fire: bool,
    /// Pause pressed this frame
    pub pause: bool,
    /// Confirm pressed this frame
    pub confirm: bool,
}

impl InputSnapshot {
    /// Movement axes as a vector, clamped to unit length
    pub fn movement(&self) -> Vec2 {
        let axis = Vec2::new(self.move_x.clamp(-1.0, 1.0), self.move_y.clamp(-1.0, 1.0));
        if axis.norm_squared() > 1.0 {
            axis.normalize()
        } else {
            axis
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diagonal_movement_is_unit_length() {
        let input = InputSnapshot {
            move_x: 1.0,
            move_y: -1.0,
            ..Default::default()
        };
        assert_relative_eq!(input.movement().norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_vec_sinks_record_requests() {
        let mut draws: Vec<SpriteDraw> = Vec::new();
        draws.draw_sprite(SpriteDraw::new("ship", Vec2::new(1.0, 2.0)).with_frame(3));
        assert_eq!(draws[0].frame, 3);

        let mut sounds: Vec<&'static str> = Vec::new();
        sounds.play("laser");
        assert_eq!(sounds, vec!["laser"]);
    }
}
