use std::fmt;

/// One token of the gesture alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Left,
    Right,
    Up,
    Down,
    WheelUp,
    WheelDown,
    ShiftHeld,
    CtrlHeld,
    DragText,
    DragLink,
    DragImage,
    QuickShotMarker,
}

/// Tokens in greedy-parse order. Longer tokens sharing a first letter with a
/// shorter one must come first.
const TOKENS: [(&str, Sign); 12] = [
    ("S&", Sign::ShiftHeld),
    ("C&", Sign::CtrlHeld),
    ("TEXT#", Sign::DragText),
    ("LINK#", Sign::DragLink),
    ("IMAGE#", Sign::DragImage),
    ("W+", Sign::WheelUp),
    ("W-", Sign::WheelDown),
    ("L", Sign::Left),
    ("R", Sign::Right),
    ("U", Sign::Up),
    ("D", Sign::Down),
    ("!", Sign::QuickShotMarker),
];

impl Sign {
    pub fn token(self) -> &'static str {
        match self {
            Sign::ShiftHeld => "S&",
            Sign::CtrlHeld => "C&",
            Sign::Left => "L",
            Sign::Right => "R",
            Sign::Up => "U",
            Sign::Down => "D",
            Sign::WheelUp => "W+",
            Sign::WheelDown => "W-",
            Sign::DragText => "TEXT#",
            Sign::DragLink => "LINK#",
            Sign::DragImage => "IMAGE#",
            Sign::QuickShotMarker => "!",
        }
    }

    pub fn is_modifier(self) -> bool {
        matches!(self, Sign::ShiftHeld | Sign::CtrlHeld)
    }

    pub fn is_drag_type(self) -> bool {
        matches!(self, Sign::DragText | Sign::DragLink | Sign::DragImage)
    }

    /// Direction and wheel signs, the only ones that go into a chain.
    pub fn is_chain(self) -> bool {
        matches!(
            self,
            Sign::Left | Sign::Right | Sign::Up | Sign::Down | Sign::WheelUp | Sign::WheelDown
        )
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Concatenates the tokens of `signs`.
pub fn format_signs(signs: &[Sign]) -> String {
    signs.iter().map(|sign| sign.token()).collect()
}

/// Held modifier keys. A set, so acquisition order never leaks into the
/// built sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierSet {
    shift: bool,
    ctrl: bool,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, sign: Sign) -> bool {
        match sign {
            Sign::ShiftHeld => self.shift,
            Sign::CtrlHeld => self.ctrl,
            _ => false,
        }
    }

    /// Sets the held state of a modifier sign. Returns `true` if it changed.
    pub fn set(&mut self, sign: Sign, held: bool) -> bool {
        let slot = match sign {
            Sign::ShiftHeld => &mut self.shift,
            Sign::CtrlHeld => &mut self.ctrl,
            _ => return false,
        };
        if *slot == held {
            return false;
        }
        *slot = held;
        true
    }

    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Held modifiers in canonical order: Shift, then Ctrl.
    pub fn iter(&self) -> impl Iterator<Item = Sign> {
        [(self.shift, Sign::ShiftHeld), (self.ctrl, Sign::CtrlHeld)]
            .into_iter()
            .filter_map(|(held, sign)| held.then_some(sign))
    }
}

/// Builds the canonical sequence: modifiers, then the drag type, then the
/// chain.
pub fn canonical_sequence(
    modifiers: &ModifierSet,
    drag_type: Option<Sign>,
    chain: &[Sign],
) -> Vec<Sign> {
    let mut signs = Vec::with_capacity(chain.len() + 3);
    signs.extend(modifiers.iter());
    signs.extend(drag_type);
    signs.extend_from_slice(chain);
    signs
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternErrorKind {
    EmptyPattern,
    UnknownToken { offset: usize },
    MisplacedQuickShot { offset: usize },
    DuplicateModifier { sign: Sign },
    ModifierAfterDragType { offset: usize },
    ModifierInChain { offset: usize },
    MultipleDragTypes { offset: usize },
    DragTypeInChain { offset: usize },
    EmptyChain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pub pattern: String,
    pub kind: PatternErrorKind,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid gesture pattern {:?}: {:?}", self.pattern, self.kind)
    }
}

impl std::error::Error for PatternError {}

/// A parsed gesture pattern.
///
/// Modifiers are stored as a set so `C&S&DR` and `S&C&DR` describe the same
/// gesture; everything else keeps its written order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    quick_shot: bool,
    modifiers: ModifierSet,
    drag_type: Option<Sign>,
    chain: Vec<Sign>,
    source: String,
}

impl Pattern {
    pub fn parse(input: &str) -> Result<Self, PatternError> {
        let error = |kind| PatternError {
            pattern: input.to_string(),
            kind,
        };

        let tokens = tokenize(input).map_err(error)?;
        if tokens.is_empty() {
            return Err(error(PatternErrorKind::EmptyPattern));
        }

        let mut quick_shot = false;
        let mut modifiers = ModifierSet::new();
        let mut drag_type = None;
        let mut chain = Vec::new();

        for (idx, (offset, sign)) in tokens.into_iter().enumerate() {
            match sign {
                Sign::QuickShotMarker => {
                    if idx != 0 {
                        return Err(error(PatternErrorKind::MisplacedQuickShot { offset }));
                    }
                    quick_shot = true;
                }
                Sign::ShiftHeld | Sign::CtrlHeld => {
                    if !chain.is_empty() {
                        return Err(error(PatternErrorKind::ModifierInChain { offset }));
                    }
                    if drag_type.is_some() {
                        return Err(error(PatternErrorKind::ModifierAfterDragType { offset }));
                    }
                    if !modifiers.set(sign, true) {
                        return Err(error(PatternErrorKind::DuplicateModifier { sign }));
                    }
                }
                Sign::DragText | Sign::DragLink | Sign::DragImage => {
                    if !chain.is_empty() {
                        return Err(error(PatternErrorKind::DragTypeInChain { offset }));
                    }
                    if drag_type.is_some() {
                        return Err(error(PatternErrorKind::MultipleDragTypes { offset }));
                    }
                    drag_type = Some(sign);
                }
                _ => chain.push(sign),
            }
        }

        // Sessions with an empty chain never match, so such a pattern is dead.
        if chain.is_empty() {
            return Err(error(PatternErrorKind::EmptyChain));
        }

        Ok(Self {
            quick_shot,
            modifiers,
            drag_type,
            chain,
            source: input.to_string(),
        })
    }

    pub fn is_quick_shot(&self) -> bool {
        self.quick_shot
    }

    pub fn chain(&self) -> &[Sign] {
        &self.chain
    }

    /// The pattern as written in the table.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Canonical sequence without the quick-shot marker.
    pub fn signs(&self) -> Vec<Sign> {
        canonical_sequence(&self.modifiers, self.drag_type, &self.chain)
    }

    /// Exact comparison against a built sequence, ignoring the marker.
    pub fn matches(&self, built: &[Sign]) -> bool {
        let prefix = self.modifiers.iter().count() + usize::from(self.drag_type.is_some());
        if built.len() != prefix + self.chain.len() {
            return false;
        }
        let (head, chain) = built.split_at(prefix);
        let mut expected_head = self.modifiers.iter().chain(self.drag_type);
        head.iter().all(|sign| expected_head.next() == Some(*sign)) && chain == self.chain
    }

    /// `true` when two neighbouring chain signs are equal. A session chain can
    /// never contain such a run.
    pub fn has_adjacent_repeat(&self) -> bool {
        self.chain.windows(2).any(|pair| pair[0] == pair[1])
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quick_shot {
            f.write_str(Sign::QuickShotMarker.token())?;
        }
        f.write_str(&format_signs(&self.signs()))
    }
}

fn tokenize(input: &str) -> Result<Vec<(usize, Sign)>, PatternErrorKind> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    let trimmed = input.trim();
    while offset < trimmed.len() {
        let rest = &trimmed[offset..];
        let (token, sign) = TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
            .ok_or(PatternErrorKind::UnknownToken { offset })?;
        tokens.push((offset, *sign));
        offset += token.len();
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_order_is_canonical() {
        let mut a = ModifierSet::new();
        a.set(Sign::CtrlHeld, true);
        a.set(Sign::ShiftHeld, true);
        let mut b = ModifierSet::new();
        b.set(Sign::ShiftHeld, true);
        b.set(Sign::CtrlHeld, true);

        let chain = [Sign::Down, Sign::Right];
        assert_eq!(
            format_signs(&canonical_sequence(&a, None, &chain)),
            format_signs(&canonical_sequence(&b, None, &chain))
        );
        assert_eq!(format_signs(&canonical_sequence(&a, None, &chain)), "S&C&DR");
    }

    #[test]
    fn parses_drag_and_wheel_tokens() {
        let pattern = Pattern::parse("S&TEXT#UR").unwrap();
        assert_eq!(
            pattern.signs(),
            vec![Sign::ShiftHeld, Sign::DragText, Sign::Up, Sign::Right]
        );

        let pattern = Pattern::parse("!LW-").unwrap();
        assert!(pattern.is_quick_shot());
        assert_eq!(pattern.chain(), &[Sign::Left, Sign::WheelDown]);
        assert_eq!(pattern.to_string(), "!LW-");
    }

    #[test]
    fn reversed_modifiers_normalize() {
        let pattern = Pattern::parse("C&S&DR").unwrap();
        assert_eq!(pattern.to_string(), "S&C&DR");
        assert_eq!(pattern.source(), "C&S&DR");
    }

    #[test]
    fn rejects_malformed_patterns() {
        let kind = |input: &str| Pattern::parse(input).unwrap_err().kind;
        assert_eq!(kind(""), PatternErrorKind::EmptyPattern);
        assert_eq!(kind("LX"), PatternErrorKind::UnknownToken { offset: 1 });
        assert_eq!(kind("L!R"), PatternErrorKind::MisplacedQuickShot { offset: 1 });
        assert_eq!(kind("LS&"), PatternErrorKind::ModifierInChain { offset: 1 });
        assert_eq!(
            kind("S&S&L"),
            PatternErrorKind::DuplicateModifier { sign: Sign::ShiftHeld }
        );
        assert_eq!(kind("TEXT#LINK#L"), PatternErrorKind::MultipleDragTypes { offset: 5 });
        assert_eq!(kind("S&"), PatternErrorKind::EmptyChain);
    }

    #[test]
    fn matches_ignores_quick_shot_marker() {
        let pattern = Pattern::parse("!W-").unwrap();
        assert!(pattern.matches(&[Sign::WheelDown]));
        assert!(!pattern.matches(&[Sign::QuickShotMarker, Sign::WheelDown]));
        assert!(!pattern.matches(&[Sign::ShiftHeld, Sign::WheelDown]));
    }
}
