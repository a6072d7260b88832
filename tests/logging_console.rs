use std::{thread::sleep, time::Duration};

use mouse_gesture::logging;
use mouse_gesture::settings::GestureSettings;
use serial_test::serial;
use tempfile::tempdir;

#[test]
#[serial]
fn default_settings_log_to_console_only() {
    let dir = tempdir().unwrap();
    let settings = GestureSettings::default();
    assert_eq!(settings.log_path(), None);

    logging::init(settings.debug_logging, settings.log_path());
    tracing::info!("console only");

    sleep(Duration::from_millis(100));

    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 0, "no log file should be created");
}
