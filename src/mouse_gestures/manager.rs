use crate::mouse_gestures::db::{GestureCommand, GestureTable, PatternIssueKind, RuleMatch};
use crate::mouse_gestures::engine::GestureTracer;
use crate::mouse_gestures::event::{InputEvent, Key};
use crate::mouse_gestures::sign::{canonical_sequence, format_signs, ModifierSet, Sign};
use crate::mouse_gestures::status::{DeferredStatus, StatusField};
use crate::mouse_gestures::target::EventTarget;
use crate::settings::GestureSettings;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureError {
    /// The chain hit its length cap.
    TooLong,
    /// The matched action failed.
    CommandError,
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureError::TooLong => f.write_str("Too long"),
            GestureError::CommandError => f.write_str("Command error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub sign: Sign,
    pub data: String,
}

/// Probes a drag source for, in order, selected text, a link and an image.
pub fn resolve_drag_payload(target: &EventTarget) -> Option<DragPayload> {
    if let Some(text) = target.selection_text() {
        return Some(DragPayload {
            sign: Sign::DragText,
            data: text.to_string(),
        });
    }
    if let Some(url) = target.link_url().filter(|url| !url.is_empty()) {
        return Some(DragPayload {
            sign: Sign::DragLink,
            data: url,
        });
    }
    target
        .image_url()
        .filter(|url| !url.is_empty())
        .map(|url| DragPayload {
            sign: Sign::DragImage,
            data: url,
        })
}

#[derive(Debug, Default)]
struct GestureSession {
    modifiers: ModifierSet,
    chain: Vec<Sign>,
    drag: Option<DragPayload>,
    matched: Option<RuleMatch>,
    quick_shot: bool,
    error: Option<GestureError>,
}

impl GestureSession {
    /// Forgets the chain and its match; modifiers and drag payload stay.
    fn rearm(&mut self) {
        self.chain.clear();
        self.matched = None;
        self.quick_shot = false;
    }
}

enum ChainUpdate {
    Unchanged,
    Appended,
    Overflow,
}

/// Builds gestures from input and runs the matching rule.
pub struct GestureManager {
    table: GestureTable,
    tracer: GestureTracer,
    session: GestureSession,
    status: Rc<dyn StatusField>,
    deferred: DeferredStatus,
    max_chain_len: usize,
    redisplay_delay: Duration,
    debug_logging: bool,
}

impl GestureManager {
    pub fn new(
        table: GestureTable,
        settings: &GestureSettings,
        status: Rc<dyn StatusField>,
    ) -> Self {
        for issue in table.find_unreachable(settings.max_chain_length) {
            let rule = table.rule(issue.rule_idx).map(|rule| rule.name()).unwrap_or("?");
            match issue.kind {
                PatternIssueKind::Shadowed { by_rule, .. } => {
                    let by = table.rule(by_rule).map(|rule| rule.name()).unwrap_or("?");
                    tracing::warn!(rule, pattern = %issue.pattern, shadowed_by = by, "gesture pattern is unreachable");
                }
                PatternIssueKind::AdjacentRepeat => {
                    tracing::warn!(rule, pattern = %issue.pattern, "gesture pattern repeats a sign");
                }
                PatternIssueKind::TooLong => {
                    tracing::warn!(rule, pattern = %issue.pattern, "gesture pattern exceeds max chain length");
                }
            }
        }

        Self {
            table,
            tracer: GestureTracer::new(settings.tolerance_px),
            session: GestureSession::default(),
            status,
            deferred: DeferredStatus::default(),
            max_chain_len: settings.max_chain_length,
            redisplay_delay: Duration::from_millis(settings.status_redisplay_delay_ms),
            debug_logging: settings.debug_logging,
        }
    }

    /// Starts a session. Fails only for a drag start without a usable
    /// payload, in which case no session exists afterwards.
    pub fn init(&mut self, event: &InputEvent) -> bool {
        self.session = GestureSession::default();
        if let InputEvent::DragStart(e) = event {
            match resolve_drag_payload(&e.target) {
                Some(payload) => self.session.drag = Some(payload),
                None => {
                    tracing::debug!("drag start without text, link or image");
                    return false;
                }
            }
        }

        self.status.set_over_link(false);
        if let Some(point) = event.screen() {
            self.tracer.begin(point);
        }
        true
    }

    /// Feeds one event into the session. Returns `true` when a quick shot
    /// fired.
    pub fn update(&mut self, event: &InputEvent) -> bool {
        if self.session.error.is_some() {
            return false;
        }

        // The previous update fired a quick shot: start a fresh candidate.
        if self.session.quick_shot {
            self.session.rearm();
        }

        let chain = self.update_chain(event);
        let modifiers_changed = self.update_modifiers(event);
        if matches!(chain, ChainUpdate::Unchanged) && !modifiers_changed {
            return false;
        }

        self.session.matched = match self.session.error {
            Some(_) => None,
            None if self.session.chain.is_empty() => None,
            None => self.table.match_sequence(&self.built_signs()),
        };
        self.session.quick_shot = self.session.matched.is_some_and(|m| m.quick_shot);

        let text = self.show_status();
        if self.debug_logging {
            tracing::debug!(status = %text, "gesture updated");
        }

        if self.session.quick_shot {
            self.do_action(event);
            return true;
        }
        false
    }

    /// Completes the session. Returns `true` when an action ran.
    pub fn evaluate(&mut self, event: &InputEvent) -> bool {
        if self.session.quick_shot || self.session.chain.is_empty() {
            return false;
        }
        if self.session.error.is_some() {
            return false;
        }
        if self.session.matched.is_none() && self.debug_logging {
            tracing::debug!(gesture = %self.built_gesture(), "gesture has no match");
        }
        self.do_action(event)
    }

    pub fn clear(&mut self) {
        self.status.message("");
        self.session = GestureSession::default();
        self.tracer.reset();
        self.status.set_over_link(true);
    }

    /// Shows error statuses whose redisplay timer has expired.
    pub fn poll_timers(&mut self, now: Instant) {
        for text in self.deferred.take_due(now) {
            self.status.message(&text);
        }
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Canonical sequence, with a leading `!` after a quick-shot match.
    pub fn built_gesture(&self) -> String {
        let signs = format_signs(&self.built_signs());
        if self.session.quick_shot {
            format!("{}{}", Sign::QuickShotMarker.token(), signs)
        } else {
            signs
        }
    }

    pub fn chain(&self) -> &[Sign] {
        &self.session.chain
    }

    pub fn modifiers(&self) -> ModifierSet {
        self.session.modifiers
    }

    pub fn drag_payload(&self) -> Option<&DragPayload> {
        self.session.drag.as_ref()
    }

    pub fn error(&self) -> Option<GestureError> {
        self.session.error
    }

    pub fn is_quick_shot(&self) -> bool {
        self.session.quick_shot
    }

    pub fn matched_rule(&self) -> Option<&str> {
        let matched = self.session.matched?;
        self.table.rule(matched.rule_idx).map(|rule| rule.name())
    }

    pub fn table(&self) -> &GestureTable {
        &self.table
    }

    /// `Gesture: <sequence>[ (<rule>)][ [<error>!]]`
    pub fn status_text(&self) -> String {
        let mut text = format!("Gesture: {}", self.built_gesture());
        if let Some(name) = self.matched_rule() {
            text.push_str(&format!(" ({name})"));
        }
        if let Some(error) = self.session.error {
            text.push_str(&format!(" [{error}!]"));
        }
        text
    }

    fn built_signs(&self) -> Vec<Sign> {
        canonical_sequence(
            &self.session.modifiers,
            self.session.drag.as_ref().map(|drag| drag.sign),
            &self.session.chain,
        )
    }

    fn update_chain(&mut self, event: &InputEvent) -> ChainUpdate {
        let sign = match event {
            InputEvent::MouseMove(e) => self.tracer.observe(e.screen),
            InputEvent::DragOver(e) => self.tracer.observe(e.screen),
            InputEvent::Wheel(e) if e.delta_y < 0.0 => Some(Sign::WheelUp),
            InputEvent::Wheel(e) if e.delta_y > 0.0 => Some(Sign::WheelDown),
            _ => None,
        };
        let Some(sign) = sign else {
            return ChainUpdate::Unchanged;
        };

        if self.session.chain.last() == Some(&sign) {
            return ChainUpdate::Unchanged;
        }
        if self.session.chain.len() >= self.max_chain_len {
            self.session.error = Some(GestureError::TooLong);
            return ChainUpdate::Overflow;
        }
        self.session.chain.push(sign);
        ChainUpdate::Appended
    }

    fn update_modifiers(&mut self, event: &InputEvent) -> bool {
        let modifiers = &mut self.session.modifiers;
        match event {
            InputEvent::KeyDown(e) | InputEvent::KeyUp(e) => {
                let held = matches!(event, InputEvent::KeyDown(_));
                match e.key {
                    Key::Shift => modifiers.set(Sign::ShiftHeld, held),
                    Key::Control => modifiers.set(Sign::CtrlHeld, held),
                    Key::Other => false,
                }
            }
            // Key events are unreliable mid-drag, so the flags are polled.
            InputEvent::DragOver(e) => {
                let shift = modifiers.set(Sign::ShiftHeld, e.modifiers.shift);
                let ctrl = modifiers.set(Sign::CtrlHeld, e.modifiers.ctrl);
                shift || ctrl
            }
            _ => false,
        }
    }

    fn do_action(&mut self, event: &InputEvent) -> bool {
        let Some(matched) = self.session.matched else {
            return false;
        };
        let Some(rule) = self.table.rule(matched.rule_idx) else {
            return false;
        };

        let command = GestureCommand {
            event: event.clone(),
            gesture: self.built_gesture(),
            drag_data: self.session.drag.as_ref().map(|drag| drag.data.clone()),
        };
        let result = panic::catch_unwind(AssertUnwindSafe(|| rule.run(&command)))
            .unwrap_or_else(|payload| Err(anyhow::anyhow!(panic_message(payload.as_ref()))));

        match result {
            Ok(()) => {
                tracing::info!(rule = rule.name(), gesture = %command.gesture, "gesture command");
                true
            }
            Err(err) => {
                self.session.error = Some(GestureError::CommandError);
                let text = self.show_status();
                tracing::error!(status = %text, error = ?err, "gesture command failed");
                false
            }
        }
    }

    fn show_status(&mut self) -> String {
        let text = self.status_text();
        if self.session.error.is_some() {
            // The session is about to be cleared; show it again afterwards.
            self.deferred.schedule(text.clone(), self.redisplay_delay);
        } else {
            self.status.message(&text);
        }
        text
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("command panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("command panicked: {msg}")
    } else {
        "command panicked".to_string()
    }
}
