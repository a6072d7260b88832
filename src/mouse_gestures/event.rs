use crate::mouse_gestures::target::EventTarget;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from(value: (f32, f32)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Shift,
    Control,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Absolute screen coordinates.
    pub screen: Point,
    pub button: MouseButton,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub target: EventTarget,
}

impl PointerEvent {
    pub fn new(screen: impl Into<Point>, button: MouseButton) -> Self {
        Self {
            screen: screen.into(),
            button,
            modifiers: Modifiers::default(),
            target: EventTarget::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub screen: Point,
    /// Negative values scroll up.
    pub delta_y: f32,
    #[serde(default)]
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragEvent {
    pub screen: Point,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub target: EventTarget,
}

impl DragEvent {
    pub fn new(screen: impl Into<Point>) -> Self {
        Self {
            screen: screen.into(),
            modifiers: Modifiers::default(),
            target: EventTarget::default(),
        }
    }
}

/// Every host input the gesture engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    MouseDown(PointerEvent),
    MouseUp(PointerEvent),
    MouseMove(PointerEvent),
    /// Button release seen at window level, outside the content surface.
    WindowMouseUp(PointerEvent),
    Wheel(WheelEvent),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    ContextMenu(PointerEvent),
    Click(PointerEvent),
    DragStart(DragEvent),
    DragOver(DragEvent),
    DragEnd(DragEvent),
    Drop(DragEvent),
}

impl InputEvent {
    /// Screen position for events that carry one.
    pub fn screen(&self) -> Option<Point> {
        match self {
            InputEvent::MouseDown(e)
            | InputEvent::MouseUp(e)
            | InputEvent::MouseMove(e)
            | InputEvent::WindowMouseUp(e)
            | InputEvent::ContextMenu(e)
            | InputEvent::Click(e) => Some(e.screen),
            InputEvent::Wheel(e) => Some(e.screen),
            InputEvent::DragStart(e)
            | InputEvent::DragOver(e)
            | InputEvent::DragEnd(e)
            | InputEvent::Drop(e) => Some(e.screen),
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InputEvent::MouseDown(_) => "mousedown",
            InputEvent::MouseUp(_) => "mouseup",
            InputEvent::MouseMove(_) => "mousemove",
            InputEvent::WindowMouseUp(_) => "window_mouseup",
            InputEvent::Wheel(_) => "wheel",
            InputEvent::KeyDown(_) => "keydown",
            InputEvent::KeyUp(_) => "keyup",
            InputEvent::ContextMenu(_) => "contextmenu",
            InputEvent::Click(_) => "click",
            InputEvent::DragStart(_) => "dragstart",
            InputEvent::DragOver(_) => "dragover",
            InputEvent::DragEnd(_) => "dragend",
            InputEvent::Drop(_) => "drop",
        }
    }
}

/// What the host must do with the event it just dispatched. Applied
/// synchronously before the dispatch callback returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    pub prevent_default: bool,
    pub stop_propagation: bool,
    /// `Some(false)` hides the native context menu, `Some(true)` re-enables it.
    pub context_menu: Option<bool>,
}

impl EventResponse {
    pub fn suppress(&mut self) {
        self.prevent_default = true;
        self.stop_propagation = true;
    }
}
