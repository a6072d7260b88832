//! Replays a recorded event script through a gesture controller.

use crate::mouse_gestures::{
    default_gesture_db, load_gestures, ActionRegistry, CommandSink, ContentArea,
    DispatchedCommand, EventResponse, GestureController, GestureDb, GestureTable, InputEvent,
    RecordingStatusField,
};
use crate::settings::GestureSettings;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    pub area: ContentArea,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    pub commands: Vec<DispatchedCommand>,
    pub statuses: Vec<String>,
    pub responses: Vec<EventResponse>,
}

#[derive(Default)]
struct CollectingSink {
    commands: RefCell<Vec<DispatchedCommand>>,
}

impl CommandSink for CollectingSink {
    fn dispatch(&self, command: DispatchedCommand) -> anyhow::Result<()> {
        self.commands.borrow_mut().push(command);
        Ok(())
    }
}

pub fn load_script(path: &str) -> anyhow::Result<ReplayScript> {
    let content = std::fs::read_to_string(path)?;
    let script: ReplayScript = serde_json::from_str(&content)?;
    Ok(script)
}

/// The rule file named by `settings`, or the built-in table.
pub fn gesture_db_for(settings: &GestureSettings) -> anyhow::Result<GestureDb> {
    match &settings.gestures_file {
        Some(path) => load_gestures(path),
        None => Ok(default_gesture_db()),
    }
}

pub fn replay(
    script: &ReplayScript,
    db: &GestureDb,
    settings: &GestureSettings,
) -> anyhow::Result<ReplayReport> {
    let sink = Rc::new(CollectingSink::default());
    let registry = ActionRegistry::with_sink(sink.clone());
    let table = GestureTable::from_db(db, &registry)?;
    let status = RecordingStatusField::new();

    let mut controller = GestureController::with_table(table, settings, Rc::new(status.clone()));
    controller.set_content_area(script.area);

    let responses = script
        .events
        .iter()
        .map(|event| controller.handle(event))
        .collect();

    let commands = sink.commands.borrow().clone();
    Ok(ReplayReport {
        commands,
        statuses: status.messages(),
        responses,
    })
}
