//! Scene building: game state to an ordered list of 2D draw commands
//!
//! Back-to-front order is fixed: background wash, paddle, orbs (only while
//! playing), particles.

use glam::Vec2;

use crate::consts::{ORB_GLOW, PLAYER_GLOW, TRAIL_ALPHA};
use crate::sim::{GamePhase, GameState, Rgb};

/// A single 2D drawing operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    /// Paint the whole surface with `color` at `alpha` (1.0 = hard clear)
    Fill { color: Rgb, alpha: f32 },
    /// Axis-aligned rectangle from its top-left corner
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Rgb,
        alpha: f32,
        glow: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb,
        alpha: f32,
        glow: f32,
    },
}

/// Render options derived from settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    /// Translucent wash instead of a hard clear
    pub trails: bool,
    pub glow: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            trails: true,
            glow: true,
        }
    }
}

/// The per-frame background pass: a translucent wash leaves motion trails
pub fn background(state: &GameState, opts: &SceneOptions) -> DrawCmd {
    let alpha = if opts.trails { TRAIL_ALPHA } else { 1.0 };
    DrawCmd::Fill {
        color: state.palette.bg,
        alpha,
    }
}

/// Entity pass: paddle, then orbs while playing, then particles
pub fn entities(state: &GameState, opts: &SceneOptions) -> Vec<DrawCmd> {
    let glow = |amount: f32| if opts.glow { amount } else { 0.0 };
    let show_orbs = state.phase == GamePhase::Playing;
    let orb_count = if show_orbs { state.orbs.len() } else { 0 };
    let mut cmds = Vec::with_capacity(2 + orb_count * 2 + state.particles.len());

    // Paddle body plus a thin highlight strip
    let p = &state.player;
    cmds.push(DrawCmd::Rect {
        pos: p.pos,
        size: p.size,
        color: p.color,
        alpha: 1.0,
        glow: glow(PLAYER_GLOW),
    });
    cmds.push(DrawCmd::Rect {
        pos: p.pos + Vec2::new(5.0, 5.0),
        size: Vec2::new((p.size.x - 10.0).max(0.0), 2.0),
        color: Rgb::WHITE,
        alpha: 1.0,
        glow: 0.0,
    });

    if show_orbs {
        for orb in &state.orbs {
            cmds.push(DrawCmd::Circle {
                center: orb.pos,
                radius: orb.radius,
                color: orb.color,
                alpha: 1.0,
                glow: glow(ORB_GLOW),
            });
            cmds.push(DrawCmd::Circle {
                center: orb.pos,
                radius: orb.radius * 0.4,
                color: Rgb::WHITE,
                alpha: 1.0,
                glow: 0.0,
            });
        }
    }

    for particle in &state.particles {
        cmds.push(DrawCmd::Circle {
            center: particle.pos,
            radius: particle.size,
            color: particle.color,
            alpha: particle.life.clamp(0.0, 1.0),
            glow: 0.0,
        });
    }

    cmds
}
