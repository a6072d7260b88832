use crate::mouse_gestures::event::{EventResponse, InputEvent, MouseButton};

/// Result of feeding one event to [`MouseManager`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseVerdict {
    /// Set on right button down/up: whether a gesture may start/stop.
    pub allow_gesture: Option<bool>,
    pub response: EventResponse,
}

/// Arbitrates between right-button gestures and the host's native
/// context menu and click.
///
/// Must see every button, motion, wheel, drag-end, context-menu and click
/// event of the surface, in arrival order.
#[derive(Debug, Default)]
pub struct MouseManager {
    right_down: bool,
    else_down: bool,
    suppress_menu: bool,
    suppress_click: bool,
}

impl MouseManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, event: &InputEvent) -> MouseVerdict {
        let mut verdict = MouseVerdict::default();

        match event {
            InputEvent::MouseDown(e) if e.button == MouseButton::Right => {
                verdict.allow_gesture = Some(!self.else_down);
                verdict.response.context_menu = Some(true);
                self.right_down = true;
                self.suppress_menu = self.else_down;
            }
            InputEvent::MouseDown(_) => {
                self.suppress_click = false;
                self.else_down = true;
                if self.right_down {
                    self.suppress_menu = true;
                    self.suppress_click = true;
                }
            }
            InputEvent::MouseUp(e) if e.button == MouseButton::Right => {
                verdict.allow_gesture = Some(!self.else_down);
                self.right_down = false;
            }
            InputEvent::MouseUp(_) => {
                self.else_down = false;
            }
            // A drag is always driven by the primary button.
            InputEvent::DragEnd(_) => {
                self.else_down = false;
            }
            InputEvent::MouseMove(_) | InputEvent::Wheel(_) => {
                if self.right_down {
                    self.suppress_menu = true;
                }
            }
            InputEvent::ContextMenu(_) => {
                verdict.response.context_menu = Some(!self.suppress_menu);
                self.suppress_menu = false;
            }
            InputEvent::Click(e) if e.button == MouseButton::Right => {
                // Alt+right click resyncs a confused state.
                if e.modifiers.alt {
                    tracing::debug!("mouse state reset by alt+right click");
                    self.clear();
                }
            }
            InputEvent::Click(_) => {
                if self.suppress_click {
                    verdict.response.prevent_default = true;
                    self.suppress_click = false;
                }
            }
            _ => {}
        }

        verdict
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn right_down(&self) -> bool {
        self.right_down
    }

    pub fn other_down(&self) -> bool {
        self.else_down
    }

    pub fn menu_suppressed(&self) -> bool {
        self.suppress_menu
    }

    pub fn click_suppressed(&self) -> bool {
        self.suppress_click
    }
}
