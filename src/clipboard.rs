use std::env;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use log::*;

use crate::error::{Error, Result};

pub trait Clipboard {
    fn copy(&self, text: &str) -> Result<()>;
}

/// Known clipboard writers per platform, in order of preference.
#[cfg(target_os = "macos")]
const CANDIDATES: &[&[&str]] = &[&["pbcopy"]];
#[cfg(windows)]
const CANDIDATES: &[&[&str]] = &[&["clip"]];
#[cfg(not(any(target_os = "macos", windows)))]
const CANDIDATES: &[&[&str]] = &[
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "-b"],
];

/// A program (plus arguments) that puts its stdin on the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    program: String,
    args: Vec<String>,
}

impl ClipboardCommand {
    /// Uses `overridden` when given, otherwise the first known writer on `PATH`.
    pub fn resolve(overridden: Option<&[String]>) -> Result<ClipboardCommand> {
        let path = env::var_os("PATH").unwrap_or_default();
        ClipboardCommand::resolve_in(overridden, |program| {
            env::split_paths(&path).any(|dir| is_executable(&dir.join(program)))
        })
    }

    fn resolve_in<F>(overridden: Option<&[String]>, installed: F) -> Result<ClipboardCommand>
    where
        F: Fn(&str) -> bool,
    {
        if let Some((program, args)) = overridden.and_then(|o| o.split_first()) {
            return Ok(ClipboardCommand {
                program: program.to_owned(),
                args: args.to_vec(),
            });
        }
        CANDIDATES
            .iter()
            .find(|candidate| installed(candidate[0]))
            .map(|candidate| ClipboardCommand {
                program: candidate[0].to_owned(),
                args: candidate[1..].iter().map(|a| a.to_string()).collect(),
            })
            .ok_or_else(|| {
                Error::Clipboard(
                    "no clipboard command found (set CLIP_BIN or install pbcopy/xclip/wl-copy)"
                        .to_owned(),
                )
            })
    }
}

impl Clipboard for ClipboardCommand {
    fn copy(&self, text: &str) -> Result<()> {
        let mut copy = Command::new(&self.program);
        copy.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null());
        debug!("Command {:?}", copy);
        let mut copy = copy
            .spawn()
            .map_err(|e| Error::Clipboard(format!("cannot start {}: {}", self.program, e)))?;
        // Only ever hand the secret over stdin, never as an argument
        if let Some(mut stdin) = copy.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| Error::Clipboard(format!("writing to {}: {}", self.program, e)))?;
        }
        let status = copy
            .wait()
            .map_err(|e| Error::Clipboard(e.to_string()))?;
        if !status.success() {
            return Err(Error::Clipboard(match status.code() {
                Some(c) => format!("{} failed with exit code {}", self.program, c),
                None => format!("{} terminated by signal", self.program),
            }));
        }
        Ok(())
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}
