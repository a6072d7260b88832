use mouse_gesture::mouse_gestures::default_gesture_db;
use mouse_gesture::replay::{gesture_db_for, load_script, replay};
use mouse_gesture::settings::GestureSettings;
use std::io::Write;
use tempfile::NamedTempFile;

const SCRIPT: &str = r#"{
    "area": { "left": 100.0, "top": 50.0, "width": 800.0, "height": 600.0 },
    "events": [
        { "type": "mouse_down", "screen": { "x": 500.0, "y": 300.0 }, "button": "right" },
        { "type": "mouse_move", "screen": { "x": 500.0, "y": 340.0 }, "button": "right" },
        { "type": "mouse_move", "screen": { "x": 540.0, "y": 340.0 }, "button": "right" },
        { "type": "mouse_up", "screen": { "x": 540.0, "y": 340.0 }, "button": "right" },
        { "type": "context_menu", "screen": { "x": 540.0, "y": 340.0 }, "button": "right" },
        { "type": "drag_start", "screen": { "x": 500.0, "y": 300.0 },
          "target": { "selection": "ferris" } },
        { "type": "drag_over", "screen": { "x": 460.0, "y": 300.0 } },
        { "type": "drop", "screen": { "x": 460.0, "y": 300.0 } }
    ]
}"#;

#[test]
fn replays_script_against_default_table() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SCRIPT.as_bytes()).unwrap();

    let script = load_script(file.path().to_str().unwrap()).unwrap();
    let settings = GestureSettings::default();
    let db = gesture_db_for(&settings).unwrap();
    assert_eq!(db, default_gesture_db());

    let report = replay(&script, &db, &settings).unwrap();

    let commands: Vec<_> = report
        .commands
        .iter()
        .map(|c| (c.command.as_str(), c.gesture.as_str()))
        .collect();
    assert_eq!(commands, vec![("tab:close", "DR"), ("web:open", "TEXT#L")]);
    assert_eq!(report.commands[1].args.as_deref(), Some("Weblio"));
    assert_eq!(report.commands[1].drag_data.as_deref(), Some("ferris"));

    assert_eq!(report.responses.len(), 8);
    assert_eq!(report.responses[4].context_menu, Some(false));
    assert!(report.responses[6].prevent_default);
    assert!(report
        .statuses
        .iter()
        .any(|s| s == "Gesture: DR (Close tab)"));
}

#[test]
fn gestures_file_setting_overrides_default_table() {
    let mut rules = NamedTempFile::new().unwrap();
    write!(
        rules,
        r#"{{ "gestures": [ {{ "name": "Only", "gestures": ["U"], "command": "only" }} ] }}"#
    )
    .unwrap();
    let settings = GestureSettings {
        gestures_file: Some(rules.path().to_str().unwrap().to_string()),
        ..GestureSettings::default()
    };
    let db = gesture_db_for(&settings).unwrap();
    assert_eq!(db.gestures.len(), 1);
    assert_eq!(db.gestures[0].command, "only");
}
