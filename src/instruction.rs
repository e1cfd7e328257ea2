/// The instruction set, decoded from a single grid byte.
///
/// `"` and `;` never reach decoding while the mode toggle intercepts them,
/// so they have no variant of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// ` `
    Nop,
    /// `@`
    Halt,
    /// `#`: skip the next cell.
    Trampoline,
    /// `0`-`9` and `a`-`f`: push the literal value.
    Literal(i64),
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `!`
    Not,
    /// `` ` ``
    Greater,
    /// `:`
    Dup,
    /// `\`
    Swap,
    /// `$`
    Discard,
    /// `g`
    Get,
    /// `p`
    Put,
    /// `^`
    North,
    /// `v`
    South,
    /// `>`
    East,
    /// `<`
    West,
    /// `[`: rotate heading +90 degrees, east toward south.
    TurnClockwise,
    /// `]`: rotate heading -90 degrees.
    TurnCounterClockwise,
    /// `?`
    Random,
    /// `_`: west if nonzero, else east.
    HorizontalIf,
    /// `|`: north if nonzero, else south.
    VerticalIf,
    /// `.`
    OutputInt,
    /// `,`
    OutputChar,
    /// `&`
    InputInt,
    /// `~`
    InputChar,
    Unknown(u8),
}

impl Instruction {
    pub fn decode(byte: u8) -> Self {
        use Instruction::*;
        match byte {
            b' ' => Nop,
            b'@' => Halt,
            b'#' => Trampoline,
            b'0'..=b'9' => Literal((byte - b'0') as i64),
            b'a'..=b'f' => Literal((byte - b'a' + 10) as i64),
            b'+' => Add,
            b'-' => Sub,
            b'*' => Mul,
            b'/' => Div,
            b'%' => Rem,
            b'!' => Not,
            b'`' => Greater,
            b':' => Dup,
            b'\\' => Swap,
            b'$' => Discard,
            b'g' => Get,
            b'p' => Put,
            b'^' => North,
            b'v' => South,
            b'>' => East,
            b'<' => West,
            b'[' => TurnClockwise,
            b']' => TurnCounterClockwise,
            b'?' => Random,
            b'_' => HorizontalIf,
            b'|' => VerticalIf,
            b'.' => OutputInt,
            b',' => OutputChar,
            b'&' => InputInt,
            b'~' => InputChar,
            other => Unknown(other),
        }
    }
}

/// What an executed instruction leaves for the loop to push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Push(i64),
    /// Pushed in order, so the last value ends on top.
    PushMany(Vec<i64>),
}
