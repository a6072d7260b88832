use mouse_gesture::logging;
use mouse_gesture::mouse_gestures::{
    default_gesture_db, format_rule_patterns, ActionRegistry, CommandSink, DispatchedCommand,
    GestureTable, GESTURES_FILE,
};
use mouse_gesture::replay::{gesture_db_for, load_script, replay};
use mouse_gesture::settings::{GestureSettings, SETTINGS_FILE};
use std::rc::Rc;

const USAGE: &str = "usage: mouse_gesture <events.json> [settings.json]
       mouse_gesture --list-gestures [settings.json]
       mouse_gesture --dump-gestures";

struct Discard;

impl CommandSink for Discard {
    fn dispatch(&self, _command: DispatchedCommand) -> anyhow::Result<()> {
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(first) = args.next() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    if first == "--dump-gestures" {
        println!("{}", serde_json::to_string_pretty(&default_gesture_db())?);
        eprintln!("save as {GESTURES_FILE} and point gesturesFile at it to customise");
        return Ok(());
    }

    let settings_path = args.next().unwrap_or_else(|| SETTINGS_FILE.to_string());
    let settings = GestureSettings::load(&settings_path)?;
    logging::init(settings.debug_logging, settings.log_path());
    let db = gesture_db_for(&settings)?;

    if first == "--list-gestures" {
        let table = GestureTable::from_db(&db, &ActionRegistry::with_sink(Rc::new(Discard)))?;
        for rule in table.rules() {
            let state = if rule.is_disabled() { " (disabled)" } else { "" };
            println!("{:<32} {}{state}", rule.name(), format_rule_patterns(rule));
        }
        return Ok(());
    }

    let script = load_script(&first)?;
    tracing::info!(events = script.events.len(), rules = db.gestures.len(), "replaying");

    let report = replay(&script, &db, &settings)?;
    for status in report.statuses.iter().filter(|s| !s.is_empty()) {
        println!("status  {status}");
    }
    for command in &report.commands {
        match &command.drag_data {
            Some(data) => println!(
                "command {} ({}) gesture={} data={}",
                command.command, command.rule, command.gesture, data
            ),
            None => println!(
                "command {} ({}) gesture={}",
                command.command, command.rule, command.gesture
            ),
        }
    }
    Ok(())
}
