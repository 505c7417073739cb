//! Drawing surface abstraction and colour palette.
//!
//! The core issues primitive draw calls; the host owns the actual canvas.
//! Draw passes take `&self` on every entity so they cannot mutate state.

use crate::entities::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

// ── Colour palette ────────────────────────────────────────────────────────────

pub mod palette {
    use super::Rgb;

    pub const BACKGROUND: Rgb = Rgb(0x0b, 0x0d, 0x1a);
    pub const BORDER: Rgb = Rgb(0x2a, 0x3f, 0x8f);
    pub const PLAYER: Rgb = Rgb(0xf0, 0xf0, 0xf0);
    pub const PLAYER_BULLET: Rgb = Rgb(0x3c, 0xe0, 0xf0);
    pub const OPPONENT_BULLET: Rgb = Rgb(0xe0, 0x3c, 0xd0);
    pub const DRONE: Rgb = Rgb(0x3c, 0xd0, 0x5a);
    pub const STRIKER: Rgb = Rgb(0xf0, 0xa0, 0x28);
    pub const BOSS: Rgb = Rgb(0xe0, 0x32, 0x3c);
    pub const SPARK: Rgb = Rgb(0xff, 0xe0, 0x60);
    pub const EMBER: Rgb = Rgb(0xff, 0x70, 0x30);
    pub const DEBRIS: Rgb = Rgb(0xc8, 0xc8, 0xd8);
    pub const TEXT: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const GAME_OVER: Rgb = Rgb(0xe0, 0x32, 0x3c);
}

/// 2D drawing surface provided by the host.
pub trait Surface {
    fn set_fill(&mut self, color: Rgb);
    fn set_stroke(&mut self, color: Rgb);
    fn set_line_width(&mut self, width: f32);

    fn fill_rect(&mut self, min: Vec2, size: Vec2) -> std::io::Result<()>;
    fn stroke_rect(&mut self, min: Vec2, size: Vec2) -> std::io::Result<()>;
    /// Fill the closed polygon through `points`.
    fn fill_path(&mut self, points: &[Vec2]) -> std::io::Result<()>;
    /// Draw `text` centred on `at`.
    fn fill_text(&mut self, text: &str, at: Vec2) -> std::io::Result<()>;
}

/// Axis-aligned square approximating a circle; used for bullets and particles.
pub fn fill_dot<S: Surface + ?Sized>(surface: &mut S, center: Vec2, radius: f32) -> std::io::Result<()> {
    let r = Vec2::splat(radius);
    surface.fill_rect(center - r, r * 2.0)
}
