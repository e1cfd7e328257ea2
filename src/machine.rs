use std::io::Write;

use log::{debug, trace};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::instruction::{Effect, Instruction};
use crate::io::Input;
use crate::mode::{ModeToggle, Toggle};
use crate::pointer::{Heading, Pointer};
use crate::stack::Stack;

/// Configuration for a single run.
#[derive(Debug, Clone, Default)]
pub struct MachineConfig {
    /// Seed for `?`. Unseeded runs draw from OS entropy.
    pub seed: Option<u64>,
    /// Stop after this many cycles even if `@` was never reached.
    pub step_limit: Option<usize>,
}

/// How a completed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles executed, including the halting one.
    pub steps: usize,
    /// False if the step limit cut the run short.
    pub halted: bool,
}

/// The whole interpreter state for one run of one program.
pub struct Machine {
    grid: Grid,
    pointer: Pointer,
    stack: Stack,
    mode: ModeToggle,
    running: bool,
    rng: SmallRng,
    step_limit: Option<usize>,
    steps: usize,
}

impl Machine {
    pub fn new(source: &[u8], config: MachineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            grid: Grid::new(source),
            pointer: Pointer::new(),
            stack: Stack::new(),
            mode: ModeToggle::new(),
            running: true,
            rng,
            step_limit: config.step_limit,
            steps: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Run until `@`, a fatal error, or the step limit.
    pub fn run<I, W>(&mut self, input: &mut I, output: &mut W) -> Result<RunSummary>
    where
        I: Input + ?Sized,
        W: Write + ?Sized,
    {
        while self.running {
            if self.step_limit.is_some_and(|limit| self.steps >= limit) {
                debug!("step limit reached after {} steps", self.steps);
                return Ok(RunSummary {
                    steps: self.steps,
                    halted: false,
                });
            }
            if let Err(e) = self.step(input, output) {
                let (x, y) = self.pointer.position();
                debug!("fatal at ({x}, {y}) after {} steps: {e}", self.steps);
                return Err(e);
            }
        }
        debug!("halted after {} steps", self.steps);
        Ok(RunSummary {
            steps: self.steps,
            halted: true,
        })
    }

    /// One fetch-toggle-dispatch-advance cycle.
    ///
    /// The pointer advances even after a heading change or `#`, so a new
    /// heading takes effect on this very advance.
    pub fn step<I, W>(&mut self, input: &mut I, output: &mut W) -> Result<()>
    where
        I: Input + ?Sized,
        W: Write + ?Sized,
    {
        let (x, y) = self.pointer.position();
        let byte = self.grid.peek(x, y);
        trace!("({x}, {y}) {:?} stack={:?}", byte as char, self.stack.as_slice());

        if self.mode.offer(byte, &mut self.stack) == Toggle::Dispatch {
            match self.execute(Instruction::decode(byte), input, output)? {
                Effect::None => {}
                Effect::Push(val) => self.stack.push(val),
                Effect::PushMany(vals) => self.stack.push_many(&vals),
            }
        }

        self.pointer.advance(&self.grid);
        self.steps += 1;
        Ok(())
    }

    fn execute<I, W>(&mut self, instr: Instruction, input: &mut I, output: &mut W) -> Result<Effect>
    where
        I: Input + ?Sized,
        W: Write + ?Sized,
    {
        use Instruction::*;

        let effect = match instr {
            Nop => Effect::None,
            Halt => {
                self.running = false;
                Effect::None
            }
            Trampoline => {
                self.pointer.advance(&self.grid);
                Effect::None
            }
            Literal(val) => Effect::Push(val),

            Add => {
                let [a, b] = self.stack.pop_n();
                Effect::Push(b.wrapping_add(a))
            }
            Sub => {
                let [a, b] = self.stack.pop_n();
                Effect::Push(b.wrapping_sub(a))
            }
            Mul => {
                let [a, b] = self.stack.pop_n();
                Effect::Push(b.wrapping_mul(a))
            }
            Div => {
                let [a, b] = self.stack.pop_n();
                Effect::Push(floor_div(b, a)?)
            }
            Rem => {
                let [a, b] = self.stack.pop_n();
                Effect::Push(floor_rem(b, a)?)
            }
            Not => Effect::Push((self.stack.pop() == 0) as i64),
            Greater => {
                let [a, b] = self.stack.pop_n();
                Effect::Push((b > a) as i64)
            }

            Dup => {
                let val = self.stack.pop();
                Effect::PushMany(vec![val, val])
            }
            Swap => {
                let [a, b] = self.stack.pop_n();
                Effect::PushMany(vec![a, b])
            }
            Discard => {
                self.stack.pop();
                Effect::None
            }

            Get => {
                let [y, x] = self.stack.pop_n();
                Effect::Push(self.grid.read(x, y)? as i64)
            }
            Put => {
                let [y, x, val] = self.stack.pop_n();
                self.grid.write(x, y, val)?;
                Effect::None
            }

            North => self.turn(Heading::North),
            South => self.turn(Heading::South),
            East => self.turn(Heading::East),
            West => self.turn(Heading::West),
            TurnClockwise => {
                self.pointer.rotate(90)?;
                Effect::None
            }
            TurnCounterClockwise => {
                self.pointer.rotate(-90)?;
                Effect::None
            }
            Random => {
                self.pointer.randomize_heading(&mut self.rng);
                Effect::None
            }
            HorizontalIf => {
                let heading = if self.stack.pop() != 0 { Heading::West } else { Heading::East };
                self.turn(heading)
            }
            VerticalIf => {
                let heading = if self.stack.pop() != 0 { Heading::North } else { Heading::South };
                self.turn(heading)
            }

            OutputInt => {
                write!(output, "{} ", self.stack.pop())?;
                output.flush()?;
                Effect::None
            }
            OutputChar => {
                let val = self.stack.pop();
                let ch = u32::try_from(val)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(Error::InvalidChar(val))?;
                write!(output, "{ch}")?;
                output.flush()?;
                Effect::None
            }
            InputInt => {
                let line = input.read_line()?.ok_or(Error::EndOfInput)?;
                match line.trim().parse::<i64>() {
                    Ok(val) => Effect::Push(val),
                    Err(source) => return Err(Error::InvalidInteger { input: line, source }),
                }
            }
            InputChar => {
                let ch = input.read_char()?.ok_or(Error::EndOfInput)?;
                Effect::Push(ch as i64)
            }

            Unknown(byte) => return Err(Error::UnknownInstruction(byte as char)),
        };
        Ok(effect)
    }

    fn turn(&mut self, heading: Heading) -> Effect {
        self.pointer.set_heading(heading);
        Effect::None
    }
}

/// Integer division rounding toward negative infinity.
fn floor_div(b: i64, a: i64) -> Result<i64> {
    if a == 0 {
        return Err(Error::DivisionByZero);
    }
    let q = b.wrapping_div(a);
    if b.wrapping_rem(a) != 0 && (b < 0) != (a < 0) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Remainder taking the sign of the divisor.
fn floor_rem(b: i64, a: i64) -> Result<i64> {
    if a == 0 {
        return Err(Error::DivisionByZero);
    }
    let r = b.wrapping_rem(a);
    if r != 0 && (r < 0) != (a < 0) {
        Ok(r + a)
    } else {
        Ok(r)
    }
}
