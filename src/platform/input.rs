//! Input listeners
//!
//! Listeners only write the driver's `TickInput`; the next tick consumes it.

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent};

use super::{SharedApp, hud};
use crate::sim::GamePhase;

/// Pointer x in canvas coordinates
fn canvas_x(canvas: &HtmlCanvasElement, client_x: i32) -> f32 {
    let rect = canvas.get_bounding_client_rect();
    client_x as f32 - rect.left() as f32
}

/// Mode toggles only count while playing, so the click that starts a
/// session does not also flip the mode.
fn request_toggle(app: &SharedApp) {
    let mut app = app.borrow_mut();
    if app.driver.state.phase == GamePhase::Playing {
        app.driver.input.toggle = true;
    }
}

fn request_start(app: &SharedApp) {
    let mut app = app.borrow_mut();
    app.resume_audio();
    app.driver.input.start = true;
}

fn toggle_mute(app: &SharedApp) {
    let mut app = app.borrow_mut();
    let mut settings = app.settings().clone();
    settings.muted = !settings.muted;
    log::info!("Muted: {}", settings.muted);
    app.apply_settings(settings);
}

fn cycle_quality(app: &SharedApp) {
    let mut app = app.borrow_mut();
    let mut settings = app.settings().clone();
    settings.set_quality(settings.quality.cycled());
    log::info!("Quality: {}", settings.quality);
    app.apply_settings(settings);
}

pub fn setup_input_handlers(canvas: &HtmlCanvasElement, app: SharedApp) {
    let Some(window) = web_sys::window() else {
        return;
    };

    // Mouse move
    {
        let app = app.clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let x = canvas_x(&canvas_clone, event.client_x());
            app.borrow_mut().driver.input.pointer_x = Some(x);
        });
        let _ = window
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Click toggles
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            request_toggle(&app);
        });
        let _ = canvas
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Touch move
    {
        let app = app.clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            if let Some(touch) = event.touches().get(0) {
                let x = canvas_x(&canvas_clone, touch.client_x());
                app.borrow_mut().driver.input.pointer_x = Some(x);
            }
        });
        let _ = canvas
            .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Touch start toggles and moves
    {
        let app = app.clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            if let Some(touch) = event.touches().get(0) {
                let x = canvas_x(&canvas_clone, touch.client_x());
                app.borrow_mut().driver.input.pointer_x = Some(x);
            }
            request_toggle(&app);
        });
        let _ = canvas
            .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Keyboard
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.code().as_str() {
                "Space" => {
                    event.prevent_default();
                    request_toggle(&app);
                }
                "KeyM" => toggle_mute(&app),
                "KeyQ" => cycle_quality(&app),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn setup_buttons(app: SharedApp) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    for id in ["start-btn", "retry-btn"] {
        if let Some(btn) = document.get_element_by_id(id) {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                request_start(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    if let Some(btn) = document.get_element_by_id("theme-btn") {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            request_theme(&app);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Ask for a palette and hand it to the next tick. Failure keeps the current one.
fn request_theme(app: &SharedApp) {
    let Some(input) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("theme-input"))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let theme = input.value();
    if theme.trim().is_empty() {
        return;
    }

    let client = app.borrow().hud.client();
    let app = app.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match client.generate_theme(&theme).await {
            Ok(palette) => {
                log::info!("Theme '{}' generated", theme.trim());
                hud::apply_palette_css(&palette);
                app.borrow_mut().driver.input.palette = Some(palette);
            }
            Err(e) => log::warn!("Theme generation failed, keeping palette: {}", e),
        }
    });
}
