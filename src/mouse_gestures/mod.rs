pub mod controller;
pub mod db;
pub mod engine;
pub mod event;
pub mod manager;
pub mod mouse;
pub mod sign;
pub mod status;
pub mod target;

pub use controller::{ContentArea, GestureController, GestureState};
pub use db::{
    default_gesture_db, format_rule_patterns, load_gestures, ActionRegistry, CommandSink,
    DispatchedCommand, GestureAction, GestureCommand, GestureDb, GestureEntry, GestureRule,
    GestureTable, GESTURES_FILE,
};
pub use engine::GestureTracer;
pub use event::{
    DragEvent, EventResponse, InputEvent, Key, KeyEvent, Modifiers, MouseButton, Point,
    PointerEvent, WheelEvent,
};
pub use manager::{resolve_drag_payload, DragPayload, GestureError, GestureManager};
pub use mouse::{MouseManager, MouseVerdict};
pub use sign::{ModifierSet, Pattern, PatternError, Sign};
pub use status::{RecordingStatusField, StatusField};
pub use target::{Element, ElementKind, EventTarget};
