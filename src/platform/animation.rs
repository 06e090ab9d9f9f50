//! requestAnimationFrame loop

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;

use super::SharedApp;
use crate::driver::LoopControl;

/// Self-rescheduling frame loop. One instance runs at a time; `stop` is
/// safe to call any number of times.
#[derive(Default)]
pub struct AnimationLoop {
    control: RefCell<LoopControl>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl AnimationLoop {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn start(this: &Rc<Self>, app: SharedApp) {
        if !this.control.borrow_mut().begin() {
            log::warn!("Frame loop already running");
            return;
        }

        let weak: Weak<Self> = Rc::downgrade(this);
        let closure = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            let Some(this) = weak.upgrade() else {
                return;
            };
            this.control.borrow_mut().fired();
            if !this.control.borrow().is_running() {
                return;
            }
            app.borrow_mut().frame();
            this.schedule();
        });
        *this.callback.borrow_mut() = Some(closure);

        log::info!("Frame loop started");
        this.schedule();
    }

    fn schedule(&self) {
        if !self.control.borrow().is_running() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => self.control.borrow_mut().scheduled(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    pub fn stop(&self) {
        let was_running = self.control.borrow().is_running();
        if let Some(handle) = self.control.borrow_mut().stop() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
        if was_running {
            log::info!("Frame loop stopped");
        }
    }
}
