pub mod logging;
pub mod mouse_gestures;
pub mod replay;
pub mod settings;
