use crate::stack::Stack;

/// A region of the program that is not dispatched as instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Between `"` delimiters: every cell's raw value is pushed.
    StringLiteral,
    /// Between `;` delimiters: every cell is skipped.
    CommentSkip,
}

impl Mode {
    pub fn from_trigger(byte: u8) -> Option<Self> {
        match byte {
            b'"' => Some(Mode::StringLiteral),
            b';' => Some(Mode::CommentSkip),
            _ => None,
        }
    }

    pub fn trigger(self) -> u8 {
        match self {
            Mode::StringLiteral => b'"',
            Mode::CommentSkip => b';',
        }
    }

    /// Per-cell action while engaged.
    fn apply(self, byte: u8, stack: &mut Stack) {
        match self {
            Mode::StringLiteral => stack.push(byte as i64),
            Mode::CommentSkip => {}
        }
    }
}

/// What the execution loop should do with the current cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The cell belongs to a mode; don't dispatch it.
    Suppress,
    /// No mode involved; dispatch as an instruction.
    Dispatch,
}

/// Single-slot mode state machine. Modes don't nest: while one is
/// engaged, the other's trigger is just another cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModeToggle {
    active: Option<Mode>,
}

impl ModeToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Mode> {
        self.active
    }

    /// Offer the current cell. Delimiters are consumed without running
    /// the mode's action; cells in between get the action.
    pub fn offer(&mut self, byte: u8, stack: &mut Stack) -> Toggle {
        match self.active {
            Some(mode) if mode.trigger() == byte => {
                self.active = None;
                Toggle::Suppress
            }
            Some(mode) => {
                mode.apply(byte, stack);
                Toggle::Suppress
            }
            None => match Mode::from_trigger(byte) {
                Some(mode) => {
                    self.active = Some(mode);
                    Toggle::Suppress
                }
                None => Toggle::Dispatch,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(toggle: &mut ModeToggle, stack: &mut Stack, cells: &[u8]) -> Vec<Toggle> {
        cells.iter().map(|&b| toggle.offer(b, stack)).collect()
    }

    #[test]
    fn test_plain_cells_dispatch() {
        let mut toggle = ModeToggle::new();
        let mut stack = Stack::new();
        assert_eq!(feed(&mut toggle, &mut stack, b"1+"), vec![Toggle::Dispatch; 2]);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_string_mode_pushes_inner_cells_only() {
        let mut toggle = ModeToggle::new();
        let mut stack = Stack::new();
        let out = feed(&mut toggle, &mut stack, b"\"AB\"");
        assert_eq!(out, vec![Toggle::Suppress; 4]);
        assert_eq!(stack.as_slice(), &[65, 66]);
        assert_eq!(toggle.active(), None);
    }

    #[test]
    fn test_comment_mode_skips_without_pushing() {
        let mut toggle = ModeToggle::new();
        let mut stack = Stack::new();
        let out = feed(&mut toggle, &mut stack, b";@.;");
        assert_eq!(out, vec![Toggle::Suppress; 4]);
        assert_eq!(stack.depth(), 0);
        assert_eq!(toggle.offer(b'.', &mut stack), Toggle::Dispatch);
    }

    #[test]
    fn test_modes_do_not_nest() {
        let mut toggle = ModeToggle::new();
        let mut stack = Stack::new();
        feed(&mut toggle, &mut stack, b"\";\"");
        // The `;` inside the string is data, not a comment trigger.
        assert_eq!(stack.as_slice(), &[b';' as i64]);
        assert_eq!(toggle.active(), None);

        feed(&mut toggle, &mut stack, b";\"");
        assert_eq!(toggle.active(), Some(Mode::CommentSkip));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_entry_step_does_not_apply_action() {
        let mut toggle = ModeToggle::new();
        let mut stack = Stack::new();
        assert_eq!(toggle.offer(b'"', &mut stack), Toggle::Suppress);
        assert_eq!(toggle.active(), Some(Mode::StringLiteral));
        assert_eq!(stack.depth(), 0);
    }
}
