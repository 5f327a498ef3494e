use std::io::Write;
use std::process::{Command, Stdio};

use log::*;

use crate::error::{Error, Result};
use crate::format::ID_DELIMITER;

/// Lets a human pick one of the given lines.
pub trait Selector {
    /// `None` when the user backs out without choosing.
    fn select(&self, lines: &[String]) -> Result<Option<String>>;
}

// fzf exit codes for "nothing matched" and "interrupted by user"
const NO_MATCH: i32 = 1;
const INTERRUPTED: i32 = 130;

#[derive(Debug, Clone)]
pub struct Fzf {
    bin: String,
}

impl Fzf {
    pub fn new(bin: &str) -> Fzf {
        Fzf {
            bin: bin.to_owned(),
        }
    }

    fn args() -> Vec<String> {
        vec![
            "--with-nth=2..".to_owned(),
            "--height=15".to_owned(),
            "--style=minimal".to_owned(),
            "--color=dark".to_owned(),
            format!("--delimiter={}", ID_DELIMITER),
        ]
    }
}

impl Selector for Fzf {
    fn select(&self, lines: &[String]) -> Result<Option<String>> {
        let mut fzf = Command::new(&self.bin);
        fzf.args(Fzf::args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            // fzf draws on stderr, let it reach the terminal
            .stderr(Stdio::inherit());
        debug!("Command {:?}", fzf);
        let mut fzf = fzf
            .spawn()
            .map_err(|e| Error::Selector(format!("cannot start {}: {}", self.bin, e)))?;

        if let Some(mut stdin) = fzf.stdin.take() {
            // fzf may quit before reading everything; its exit status tells the story
            if let Err(e) = stdin.write_all(lines.join("\n").as_bytes()) {
                debug!("fzf stopped reading input: {}", e);
            }
        }

        let output = fzf
            .wait_with_output()
            .map_err(|e| Error::Selector(e.to_string()))?;
        match output.status.code() {
            Some(0) => {}
            Some(code) if code == NO_MATCH || code == INTERRUPTED => {
                debug!("fzf exited with {}, nothing selected", code);
                return Ok(None);
            }
            Some(code) => {
                return Err(Error::Selector(format!("{} exited with code {}", self.bin, code)))
            }
            None => {
                return Err(Error::Selector(format!("{} terminated by signal", self.bin)))
            }
        }
        let choice = String::from_utf8_lossy(&output.stdout);
        let choice = choice.trim();
        if choice.is_empty() {
            Ok(None)
        } else {
            Ok(Some(choice.to_owned()))
        }
    }
}
