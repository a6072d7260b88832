use crate::mouse_gestures::db::GestureTable;
use crate::mouse_gestures::event::{EventResponse, InputEvent, Point};
use crate::mouse_gestures::manager::GestureManager;
use crate::mouse_gestures::mouse::MouseManager;
use crate::mouse_gestures::status::StatusField;
use crate::settings::GestureSettings;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Ready,
    Gesture,
    Drag,
}

/// Screen rectangle of the content viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentArea {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ContentArea {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// `true` when `point` lies strictly inside the area shrunk by `margin`
    /// on every side.
    pub fn contains(&self, point: Point, margin: f32) -> bool {
        let x = point.x - self.left;
        let y = point.y - self.top;
        margin < x && x < self.width - margin && margin < y && y < self.height - margin
    }
}

/// Routes host input to the mouse arbiter and the gesture builder.
///
/// READY -> GESTURE on right button down inside the active surface,
/// READY -> DRAG on a drag start with a usable payload. Both return to READY
/// by stopping (the action may run) or cancelling (nothing runs).
pub struct GestureController {
    state: GestureState,
    mouse: MouseManager,
    gesture: GestureManager,
    area: Option<ContentArea>,
    margin: f32,
    debug_logging: bool,
}

impl GestureController {
    pub fn new(gesture: GestureManager, settings: &GestureSettings) -> Self {
        Self {
            state: GestureState::Ready,
            mouse: MouseManager::new(),
            gesture,
            area: None,
            margin: settings.area_margin_px,
            debug_logging: settings.debug_logging,
        }
    }

    pub fn with_table(
        table: GestureTable,
        settings: &GestureSettings,
        status: Rc<dyn StatusField>,
    ) -> Self {
        Self::new(GestureManager::new(table, settings, status), settings)
    }

    /// Updates the content viewport. Until one is set no gesture can start.
    pub fn set_content_area(&mut self, area: ContentArea) {
        self.area = Some(area);
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn manager(&self) -> &GestureManager {
        &self.gesture
    }

    pub fn mouse(&self) -> &MouseManager {
        &self.mouse
    }

    /// Handles one host event and tells the host what to suppress.
    pub fn handle(&mut self, event: &InputEvent) -> EventResponse {
        let response = self.dispatch(event);
        self.gesture.poll_timers(Instant::now());
        response
    }

    /// Fires status timers due at `now`.
    pub fn poll_timers(&mut self, now: Instant) {
        self.gesture.poll_timers(now);
    }

    fn dispatch(&mut self, event: &InputEvent) -> EventResponse {
        let mut response = EventResponse::default();
        match event {
            InputEvent::MouseDown(e) => {
                let verdict = self.mouse.observe(event);
                response = verdict.response;
                if verdict.allow_gesture == Some(true) {
                    if self.state == GestureState::Ready {
                        if self.in_gesture_area(e.screen) {
                            self.start_gesture(event);
                        }
                    } else {
                        self.cancel("button pressed mid-gesture");
                    }
                } else if self.state != GestureState::Ready {
                    self.cancel("second button pressed");
                }
            }
            InputEvent::MouseMove(e) => {
                response = self.mouse.observe(event).response;
                if self.state == GestureState::Gesture {
                    if self.in_gesture_area(e.screen) {
                        self.gesture.update(event);
                    } else {
                        self.cancel("left gesture area");
                    }
                }
            }
            InputEvent::MouseUp(e) => {
                let verdict = self.mouse.observe(event);
                response = verdict.response;
                if verdict.allow_gesture == Some(true) && self.state == GestureState::Gesture {
                    if self.in_gesture_area(e.screen) {
                        self.stop(event);
                    } else {
                        self.cancel("released outside gesture area");
                    }
                }
            }
            InputEvent::WindowMouseUp(e) => {
                if self.state == GestureState::Gesture && e.target.in_open_popup {
                    self.cancel("popup opened");
                }
            }
            InputEvent::Wheel(_) => {
                response = self.mouse.observe(event).response;
                if self.state == GestureState::Gesture {
                    response.suppress();
                    self.gesture.update(event);
                }
            }
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => {
                // During a drag, modifiers come from polling drag-over flags.
                if self.state == GestureState::Gesture {
                    self.gesture.update(event);
                }
            }
            InputEvent::ContextMenu(_) | InputEvent::Click(_) => {
                response = self.mouse.observe(event).response;
            }
            InputEvent::DragStart(e) => {
                if self.state == GestureState::Ready && self.in_gesture_area(e.screen) {
                    self.start_drag(event);
                }
            }
            InputEvent::DragEnd(_) => {
                response = self.mouse.observe(event).response;
                // Escape pressed or dropped somewhere the host refused.
                if self.state == GestureState::Drag {
                    self.cancel("drag ended");
                }
            }
            InputEvent::DragOver(e) => {
                if self.state != GestureState::Drag {
                    return response;
                }
                // Shift+Alt hands the drag back to the host.
                if e.modifiers.shift && e.modifiers.alt {
                    self.cancel("drag force-cancelled");
                } else if e.target.is_editable() {
                    // Text fields keep their native drop behaviour.
                    self.cancel("dragged over editable target");
                } else if self.in_gesture_area(e.screen) {
                    response.suppress();
                    self.gesture.update(event);
                } else {
                    self.cancel("left gesture area");
                }
            }
            InputEvent::Drop(e) => {
                if self.state != GestureState::Drag {
                    return response;
                }
                if e.target.is_editable() {
                    self.cancel("dropped on editable target");
                } else {
                    response.suppress();
                    self.stop(event);
                }
            }
        }
        response
    }

    fn in_gesture_area(&self, point: Point) -> bool {
        self.area
            .is_some_and(|area| area.contains(point, self.margin))
    }

    fn start_gesture(&mut self, event: &InputEvent) {
        if self.gesture.init(event) {
            self.transition(GestureState::Gesture);
        }
    }

    fn start_drag(&mut self, event: &InputEvent) {
        if self.gesture.init(event) {
            self.transition(GestureState::Drag);
        }
    }

    fn stop(&mut self, event: &InputEvent) {
        self.gesture.evaluate(event);
        self.clear();
    }

    fn cancel(&mut self, reason: &str) {
        if self.debug_logging {
            tracing::debug!(reason, "gesture cancelled");
        }
        self.clear();
    }

    fn clear(&mut self) {
        self.transition(GestureState::Ready);
        self.gesture.clear();
    }

    fn transition(&mut self, state: GestureState) {
        if self.debug_logging && self.state != state {
            tracing::debug!(from = ?self.state, to = ?state, "gesture state");
        }
        self.state = state;
    }
}
