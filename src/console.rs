// Command console: a fixed registry of toy shell commands and the
// transcript they print into.

use crate::view::{Transcript, TranscriptLine};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const BANNER: &str = r"
     _           _      _
    (_)_ __   __| | ___| | __
    | | '_ \ / _` |/ __| |/ /
    | | |_) | (_| | (__|   <
   _/ | .__/ \__,_|\___|_|\_\
  |__/|_|
";

const MATRIX_GLYPHS: &str = "ｦｱｳｴｵｶｷｹｺｻｼｽｾｿﾀﾂﾃﾅﾆﾇﾈﾊﾋﾎﾏﾐﾑﾒﾓﾔﾕﾗﾘﾜ0123456789";
const MATRIX_ROWS: usize = 5;
const MATRIX_COLS: usize = 40;

const HELP: &str = "Available commands:
  help       - Show this help message
  clear      - Clear command history
  whoami     - About me
  contact    - Get in touch
  konami     - ???
  matrix     - Enter the matrix
  hack       - Hacker mode activated

Try typing anything to discover more...";

const WHOAMI: &str = "jpdck - Developer, tinkerer, homelab enthusiast.
Building things one commit at a time.";

const CONTACT: &str = "> GitHub: https://github.com/jpdck
> Feel free to reach out via GitHub issues or discussions.";

const KONAMI: &str = "↑ ↑ ↓ ↓ ← → ← → B A
You've unlocked... absolutely nothing. But nice try!";

const HACK: &str = "> Accessing mainframe...
> Bypassing firewall...
> Downloading the internet...
> [################] 100%

Just kidding. I'm a developer, not a movie hacker.";

pub const CAT_USAGE: &str = "Usage: cat [file]
Try: cat README.md";

pub const README: &str = "# jpdck's Portfolio

Welcome to my corner of the internet.
Check out my projects above, or type 'help' for fun commands.";

const SUDO: &str = "Nice try. You're not getting root access to my portfolio.";

const EXIT: &str = "You can't exit. You're here forever. Muahaha!
(Just close the tab if you really want to leave.)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Whoami,
    Contact,
    Konami,
    Matrix,
    Hack,
    Ls,
    Cat,
    CatReadme,
    Pwd,
    Sudo,
    Exit,
    Date,
    Echo,
}

impl Command {
    pub const ALL: [Command; 15] = [
        Command::Help,
        Command::Clear,
        Command::Whoami,
        Command::Contact,
        Command::Konami,
        Command::Matrix,
        Command::Hack,
        Command::Ls,
        Command::Cat,
        Command::CatReadme,
        Command::Pwd,
        Command::Sudo,
        Command::Exit,
        Command::Date,
        Command::Echo,
    ];

    pub fn trigger(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Clear => "clear",
            Command::Whoami => "whoami",
            Command::Contact => "contact",
            Command::Konami => "konami",
            Command::Matrix => "matrix",
            Command::Hack => "hack",
            Command::Ls => "ls",
            Command::Cat => "cat",
            Command::CatReadme => "cat readme.md",
            Command::Pwd => "pwd",
            Command::Sudo => "sudo",
            Command::Exit => "exit",
            Command::Date => "date",
            Command::Echo => "echo",
        }
    }

    pub fn from_trigger(trigger: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.trigger() == trigger)
    }

    /// Run the handler. `None` means the command produced nothing to print
    /// and the caller handles its effect (only `clear` does this).
    pub fn run<R: Rng + ?Sized>(self, args: &[&str], rng: &mut R) -> Option<String> {
        let text = match self {
            Command::Help => HELP.to_string(),
            Command::Clear => return None,
            Command::Whoami => WHOAMI.to_string(),
            Command::Contact => CONTACT.to_string(),
            Command::Konami => KONAMI.to_string(),
            Command::Matrix => matrix(rng),
            Command::Hack => HACK.to_string(),
            Command::Ls => "projects/    easter-eggs/    README.md".to_string(),
            Command::Cat => CAT_USAGE.to_string(),
            Command::CatReadme => README.to_string(),
            Command::Pwd => "/home/jpdck/github.io".to_string(),
            Command::Sudo => SUDO.to_string(),
            Command::Exit => EXIT.to_string(),
            Command::Date => chrono::Local::now()
                .format("%a %b %d %Y %H:%M:%S GMT%z")
                .to_string(),
            Command::Echo => args.join(" "),
        };
        Some(text)
    }
}

fn matrix<R: Rng + ?Sized>(rng: &mut R) -> String {
    let glyphs: Vec<char> = MATRIX_GLYPHS.chars().collect();
    let mut out = String::new();
    for _ in 0..MATRIX_ROWS {
        for _ in 0..MATRIX_COLS {
            out.push(glyphs[rng.gen_range(0..glyphs.len())]);
        }
        out.push('\n');
    }
    out.push_str("\nWake up, Neo...");
    out
}

pub fn not_found(token: &str) -> String {
    format!("Command not found: {token}\nType 'help' for available commands.")
}

/// How a line of input maps onto the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Blank,
    Found { command: Command, args: Vec<String> },
    NotFound { token: String },
}

/// Resolve a raw input line.
///
/// Precedence: the whole trimmed, lowercased line is tried as a trigger
/// first, and only then its first token. So `cat readme.md` hits the
/// multi-word trigger while `cat notes.txt` falls back to plain `cat`.
/// Arguments are the remaining lowercased tokens in both cases.
pub fn resolve(input: &str) -> Resolution {
    let line = input.trim().to_lowercase();
    let mut tokens = line.split_whitespace();
    let Some(token) = tokens.next() else {
        return Resolution::Blank;
    };
    let args: Vec<String> = tokens.map(str::to_string).collect();

    match Command::from_trigger(&line).or_else(|| Command::from_trigger(token)) {
        Some(command) => Resolution::Found { command, args },
        None => Resolution::NotFound {
            token: token.to_string(),
        },
    }
}

impl Resolution {
    /// Run whatever the line resolved to. `None` for blank input and for
    /// commands that print nothing.
    pub fn run<R: Rng + ?Sized>(self, rng: &mut R) -> Option<String> {
        match self {
            Resolution::Blank => None,
            Resolution::Found { command, args } => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                command.run(&args, rng)
            }
            Resolution::NotFound { token } => Some(not_found(&token)),
        }
    }
}

pub fn execute_command<R: Rng + ?Sized>(input: &str, rng: &mut R) -> Option<String> {
    resolve(input).run(rng)
}

/// What `Console::submit` did to the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    /// Blank line; nothing was appended.
    Nothing,
    /// The transcript was wiped.
    Cleared,
    /// The prompt line was appended, followed by `output` if it is non-empty.
    Appended { output: String },
}

/// Owns the transcript and the randomness used by `matrix`.
pub struct Console {
    transcript: Transcript,
    rng: StdRng,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Console {
            transcript: Transcript::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Console {
            transcript: Transcript::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Handle one submitted line.
    pub fn submit(&mut self, input: &str) -> Submitted {
        let resolution = resolve(input);
        debug!("event=console_submit resolution={resolution:?}");
        if resolution == Resolution::Blank {
            return Submitted::Nothing;
        }
        match resolution.run(&mut self.rng) {
            None => {
                self.transcript.clear();
                Submitted::Cleared
            }
            Some(output) => {
                self.transcript.push(TranscriptLine::Prompt(input.to_string()));
                if !output.is_empty() {
                    self.transcript.push(TranscriptLine::Output(output.clone()));
                }
                Submitted::Appended { output }
            }
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}
