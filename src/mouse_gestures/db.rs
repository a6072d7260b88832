use crate::mouse_gestures::event::InputEvent;
use crate::mouse_gestures::sign::{Pattern, PatternError, Sign};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub const GESTURES_FILE: &str = "mouse_gestures.json";
pub const SCHEMA_VERSION: u32 = 1;

/// Snapshot handed to an action when its gesture completes.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureCommand {
    pub event: InputEvent,
    /// Built sign sequence, prefixed with `!` for quick shots.
    pub gesture: String,
    pub drag_data: Option<String>,
}

pub trait GestureAction {
    fn run(&self, command: &GestureCommand) -> anyhow::Result<()>;
}

impl<F> GestureAction for F
where
    F: Fn(&GestureCommand) -> anyhow::Result<()>,
{
    fn run(&self, command: &GestureCommand) -> anyhow::Result<()> {
        self(command)
    }
}

/// Command forwarded to a [`CommandSink`] by table entries that name a
/// command instead of a registered action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedCommand {
    pub rule: String,
    pub command: String,
    pub args: Option<String>,
    pub gesture: String,
    pub drag_data: Option<String>,
}

pub trait CommandSink {
    fn dispatch(&self, command: DispatchedCommand) -> anyhow::Result<()>;
}

struct DispatchAction {
    rule: String,
    command: String,
    args: Option<String>,
    sink: Rc<dyn CommandSink>,
}

impl GestureAction for DispatchAction {
    fn run(&self, command: &GestureCommand) -> anyhow::Result<()> {
        self.sink.dispatch(DispatchedCommand {
            rule: self.rule.clone(),
            command: self.command.clone(),
            args: self.args.clone(),
            gesture: command.gesture.clone(),
            drag_data: command.drag_data.clone(),
        })
    }
}

pub struct GestureRule {
    name: String,
    patterns: Vec<Pattern>,
    action: Rc<dyn GestureAction>,
    disabled: bool,
}

impl fmt::Debug for GestureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureRule")
            .field("name", &self.name)
            .field("patterns", &self.patterns)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl GestureRule {
    pub fn new<A>(name: &str, patterns: &[&str], action: A) -> Result<Self, PatternError>
    where
        A: GestureAction + 'static,
    {
        Self::with_action(name, patterns, Rc::new(action))
    }

    pub fn with_action(
        name: &str,
        patterns: &[&str],
        action: Rc<dyn GestureAction>,
    ) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|pattern| Pattern::parse(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.to_string(),
            patterns,
            action,
            disabled: false,
        })
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn run(&self, command: &GestureCommand) -> anyhow::Result<()> {
        self.action.run(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule_idx: usize,
    pub pattern_idx: usize,
    pub quick_shot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternIssueKind {
    /// An identical pattern appears earlier in the table.
    Shadowed { by_rule: usize, by_pattern: usize },
    /// Two equal signs in a row; a session chain never repeats a sign.
    AdjacentRepeat,
    /// Longer than a session chain may grow.
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternIssue {
    pub rule_idx: usize,
    pub pattern_idx: usize,
    pub pattern: String,
    pub kind: PatternIssueKind,
}

/// Ordered gesture rules. First rule, then first pattern, wins.
#[derive(Debug, Default)]
pub struct GestureTable {
    rules: Vec<GestureRule>,
}

impl GestureTable {
    pub fn new(rules: Vec<GestureRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[GestureRule] {
        &self.rules
    }

    pub fn rule(&self, idx: usize) -> Option<&GestureRule> {
        self.rules.get(idx)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Exact match of `built` against enabled rules.
    pub fn match_sequence(&self, built: &[Sign]) -> Option<RuleMatch> {
        if built.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| !rule.disabled)
            .find_map(|(rule_idx, rule)| {
                rule.patterns
                    .iter()
                    .position(|pattern| pattern.matches(built))
                    .map(|pattern_idx| RuleMatch {
                        rule_idx,
                        pattern_idx,
                        quick_shot: rule.patterns[pattern_idx].is_quick_shot(),
                    })
            })
    }

    /// Patterns of enabled rules that can never win a match.
    pub fn find_unreachable(&self, max_chain_len: usize) -> Vec<PatternIssue> {
        let mut issues = Vec::new();
        let mut seen: HashMap<Vec<Sign>, (usize, usize)> = HashMap::new();
        for (rule_idx, rule) in self.rules.iter().enumerate() {
            if rule.disabled {
                continue;
            }
            for (pattern_idx, pattern) in rule.patterns.iter().enumerate() {
                let issue = |kind| PatternIssue {
                    rule_idx,
                    pattern_idx,
                    pattern: pattern.source().to_string(),
                    kind,
                };
                if pattern.has_adjacent_repeat() {
                    issues.push(issue(PatternIssueKind::AdjacentRepeat));
                }
                if pattern.chain().len() > max_chain_len {
                    issues.push(issue(PatternIssueKind::TooLong));
                }
                match seen.get(&pattern.signs()) {
                    Some(&(by_rule, by_pattern)) => issues.push(issue(
                        PatternIssueKind::Shadowed {
                            by_rule,
                            by_pattern,
                        },
                    )),
                    None => {
                        seen.insert(pattern.signs(), (rule_idx, pattern_idx));
                    }
                }
            }
        }
        issues
    }

    /// Builds the table from its file form. Each command name is looked up in
    /// `registry`.
    pub fn from_db(db: &GestureDb, registry: &ActionRegistry) -> anyhow::Result<Self> {
        let mut rules = Vec::with_capacity(db.gestures.len());
        for entry in &db.gestures {
            let action = registry.resolve(entry)?;
            let patterns: Vec<&str> = entry.gestures.iter().map(String::as_str).collect();
            let rule = GestureRule::with_action(&entry.name, &patterns, action)?
                .disabled(entry.disabled);
            rules.push(rule);
        }
        Ok(Self::new(rules))
    }
}

/// Named actions available to table entries. When a sink is installed,
/// unregistered command names are forwarded to it.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Rc<dyn GestureAction>>,
    sink: Option<Rc<dyn CommandSink>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: Rc<dyn CommandSink>) -> Self {
        Self {
            actions: HashMap::new(),
            sink: Some(sink),
        }
    }

    pub fn register<A>(&mut self, command: &str, action: A) -> &mut Self
    where
        A: GestureAction + 'static,
    {
        self.actions.insert(command.to_string(), Rc::new(action));
        self
    }

    fn resolve(&self, entry: &GestureEntry) -> anyhow::Result<Rc<dyn GestureAction>> {
        if let Some(action) = self.actions.get(&entry.command) {
            return Ok(Rc::clone(action));
        }
        match &self.sink {
            Some(sink) => Ok(Rc::new(DispatchAction {
                rule: entry.name.clone(),
                command: entry.command.clone(),
                args: entry.args.clone(),
                sink: Rc::clone(sink),
            })),
            None => Err(anyhow::anyhow!(
                "gesture {:?} uses unknown command {:?}",
                entry.name,
                entry.command
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GestureEntry {
    pub name: String,
    pub gestures: Vec<String>,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl GestureEntry {
    fn new(name: &str, gestures: &[&str], command: &str) -> Self {
        Self {
            name: name.to_string(),
            gestures: gestures.iter().map(|g| g.to_string()).collect(),
            command: command.to_string(),
            args: None,
            disabled: false,
        }
    }

    fn with_args(mut self, args: &str) -> Self {
        self.args = Some(args.to_string());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GestureDb {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub gestures: Vec<GestureEntry>,
}

impl Default for GestureDb {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            gestures: Vec::new(),
        }
    }
}

/// Reads a rule file. A missing or blank file yields an empty table.
pub fn load_gestures(path: &str) -> anyhow::Result<GestureDb> {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    if content.trim().is_empty() {
        return Ok(GestureDb::default());
    }
    let db: GestureDb = serde_json::from_str(&content)?;
    if db.schema_version != SCHEMA_VERSION {
        return Err(anyhow::anyhow!(
            "Unsupported gesture schema version {}",
            db.schema_version
        ));
    }
    for entry in &db.gestures {
        for pattern in &entry.gestures {
            Pattern::parse(pattern)?;
        }
    }
    Ok(db)
}

/// The stock browser gesture set.
pub fn default_gesture_db() -> GestureDb {
    let gestures = vec![
        // Navigation
        GestureEntry::new("Back", &["L"], "browser:back"),
        GestureEntry::new("Previous page", &["S&L"], "navi:prev"),
        GestureEntry::new("Forward", &["R"], "browser:forward"),
        GestureEntry::new("Next page", &["S&R"], "navi:next"),
        GestureEntry::new("Page history", &["!LW-", "!RW-"], "ui:back_forward_menu"),
        GestureEntry::new("Scroll to top", &["U"], "cmd:scroll_top"),
        GestureEntry::new("Scroll to bottom", &["D"], "cmd:scroll_bottom"),
        GestureEntry::new("Reload/Stop", &["UD"], "browser:reload_or_stop"),
        GestureEntry::new("Reload skipping cache", &["UDU"], "browser:reload_skip_cache"),
        // Tabs
        GestureEntry::new("Duplicate tab", &["DL"], "tab:duplicate"),
        GestureEntry::new("Undo close tab", &["LU"], "tab:undo_close"),
        GestureEntry::new("Close tab", &["DR"], "tab:close"),
        GestureEntry::new("Force close tab", &["S&C&DR"], "tab:force_close"),
        GestureEntry::new("Close read tabs", &["S&DRL", "DRLW+", "DRLW-"], "tab:close_read"),
        GestureEntry::new("Close left tabs", &["S&DRDL", "DRDLW+", "DRDLW-"], "tab:close_left"),
        GestureEntry::new("Close right tabs", &["S&DRDR", "DRDRW+", "DRDRW-"], "tab:close_right"),
        GestureEntry::new("Close other tabs", &["S&DRU", "DRUW+", "DRUW-"], "tab:close_others"),
        GestureEntry::new("Replace with home", &["S&DURD", "DURDW+", "DURDW-"], "home:replace"),
        GestureEntry::new("Open home", &["DURD"], "home:open"),
        // UI
        GestureEntry::new("Toggle history sidebar", &["RD"], "sidebar:history"),
        GestureEntry::new("Toggle bookmarks sidebar", &["LD"], "sidebar:bookmarks"),
        GestureEntry::new("Previous tab", &["!W+"], "tab:prev"),
        GestureEntry::new("Next tab", &["!W-"], "tab:next"),
        // Drag and drop
        GestureEntry::new("Dictionary lookup", &["TEXT#L"], "web:open").with_args("Weblio"),
        GestureEntry::new("Translate", &["S&TEXT#L"], "web:open").with_args("GoogleTranslation"),
        GestureEntry::new("Search", &["TEXT#R"], "web:open").with_args("GoogleSearch"),
        GestureEntry::new("Search this site", &["S&TEXT#R"], "web:search_site")
            .with_args("GoogleSearch"),
        GestureEntry::new("Find in page", &["TEXT#D"], "find:highlight"),
        GestureEntry::new("Refine search (focus)", &["TEXT#UR"], "form:add_terms")
            .with_args("focus"),
        GestureEntry::new("Refine search (submit)", &["S&TEXT#UR"], "form:add_terms")
            .with_args("submit"),
        GestureEntry::new("Exclude from search (focus)", &["TEXT#DR"], "form:exclude_terms")
            .with_args("focus"),
        GestureEntry::new("Exclude from search (submit)", &["S&TEXT#DR"], "form:exclude_terms")
            .with_args("submit"),
        GestureEntry::new("Open in new tab", &["LINK#U", "IMAGE#U"], "tab:open")
            .with_args("foreground"),
        GestureEntry::new("Open in background tab", &["LINK#D", "IMAGE#D"], "tab:open")
            .with_args("background"),
    ];
    GestureDb {
        schema_version: SCHEMA_VERSION,
        gestures,
    }
}

/// Human readable list of a rule's patterns, e.g. `"!LW-, !RW-"`.
pub fn format_rule_patterns(rule: &GestureRule) -> String {
    rule.patterns
        .iter()
        .map(|pattern| pattern.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}
