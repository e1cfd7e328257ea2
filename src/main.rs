use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use gridfunge::io::{Input, StreamInput};
use gridfunge::machine::{Machine, MachineConfig};

#[derive(Parser)]
#[command(name = "gridfunge", about = "Interpreter for a two-dimensional Befunge-family language")]
struct Cli {
    /// Program file to run.
    program: PathBuf,

    /// Remove newline after program output.
    #[arg(long)]
    raw: bool,

    /// Random seed for `?`, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many steps even if the program never halts.
    #[arg(long)]
    step_limit: Option<usize>,
}

/// Interactive stdin. `~` takes a single keypress instead of a whole line.
struct Terminal {
    lines: StreamInput<io::StdinLock<'static>>,
}

impl Terminal {
    fn new() -> Self {
        Self {
            lines: StreamInput::new(io::stdin().lock()),
        }
    }
}

impl Input for Terminal {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        eprint!("=>");
        self.lines.read_line()
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        eprint!(">");
        enable_raw_mode()?;
        let key = read_key();
        disable_raw_mode()?;
        key
    }
}

/// Block until a printable key, Enter, or Tab is pressed. Ctrl-C and
/// Ctrl-D read as end of input.
fn read_key() -> io::Result<Option<char>> {
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None);
            }
            KeyCode::Char(c) => return Ok(Some(c)),
            KeyCode::Enter => return Ok(Some('\n')),
            KeyCode::Tab => return Ok(Some('\t')),
            _ => {}
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let source = match std::fs::read(&cli.program) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("{}: {e}", cli.program.display());
            std::process::exit(1);
        }
    };

    let config = MachineConfig {
        seed: cli.seed,
        step_limit: cli.step_limit,
    };
    let mut machine = Machine::new(&source, config);
    let mut stdout = io::stdout().lock();

    let result = if io::stdin().is_terminal() {
        machine.run(&mut Terminal::new(), &mut stdout)
    } else {
        machine.run(&mut StreamInput::new(io::stdin().lock()), &mut stdout)
    };

    match result {
        Ok(summary) if !summary.halted => {
            eprintln!("stopped after {} steps without halting", summary.steps);
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    if !cli.raw && stdout.is_terminal() {
        if let Err(e) = writeln!(stdout) {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
