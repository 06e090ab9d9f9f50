//! Canvas 2D playback of draw commands

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::DrawCmd;
use crate::driver::Surface;

/// A `<canvas>` element and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up a canvas by element id. None if it is missing or has no 2D context.
    pub fn from_id(id: &str) -> Option<Self> {
        let canvas = web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        Self::new(canvas)
    }

    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn set_glow(&self, glow: f32, css: &str) {
        if glow > 0.0 {
            self.ctx.set_shadow_blur(glow as f64);
            self.ctx.set_shadow_color(css);
        } else {
            self.ctx.set_shadow_blur(0.0);
        }
    }
}

impl Surface for CanvasSurface {
    fn display_size(&self) -> (u32, u32) {
        (
            self.canvas.client_width().max(0) as u32,
            self.canvas.client_height().max(0) as u32,
        )
    }

    fn backing_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn draw(&mut self, commands: &[DrawCmd]) {
        let ctx = &self.ctx;
        for cmd in commands {
            match *cmd {
                DrawCmd::Fill { color, alpha } => {
                    ctx.set_shadow_blur(0.0);
                    ctx.set_global_alpha(alpha as f64);
                    ctx.set_fill_style_str(&color.to_string());
                    ctx.fill_rect(
                        0.0,
                        0.0,
                        self.canvas.width() as f64,
                        self.canvas.height() as f64,
                    );
                }
                DrawCmd::Rect {
                    pos,
                    size,
                    color,
                    alpha,
                    glow,
                } => {
                    let css = color.to_string();
                    self.set_glow(glow, &css);
                    ctx.set_global_alpha(alpha as f64);
                    ctx.set_fill_style_str(&css);
                    ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                    alpha,
                    glow,
                } => {
                    let css = color.to_string();
                    self.set_glow(glow, &css);
                    ctx.set_global_alpha(alpha as f64);
                    ctx.set_fill_style_str(&css);
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
                        .ok();
                    ctx.fill();
                }
            }
        }
        ctx.set_global_alpha(1.0);
        ctx.set_shadow_blur(0.0);
    }
}
