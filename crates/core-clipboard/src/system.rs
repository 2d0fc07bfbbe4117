//! OS clipboard through platform commands.
//!
//! Candidate commands are chosen from the platform name and the display /
//! multiplexer environment, then tried in order until one succeeds. Every
//! command runs under a deadline: a helper thread drains the child's stdout
//! and reports over a channel, and a child still running at the deadline is
//! killed.

use std::io::{Read, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::bounded;
use tracing::{debug, trace};

use crate::{ClipboardBackend, ClipboardError, ClipboardRead, osc52_sequence};

/// One clipboard command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

const fn cmd(program: &'static str, args: &'static [&'static str]) -> CommandSpec {
    CommandSpec { program, args }
}

/// Environment facts used to pick clipboard commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardEnv {
    /// `std::env::consts::OS` style name (`linux`, `macos`, `windows`, ...).
    pub platform: String,
    pub wayland: bool,
    pub x11: bool,
    pub tmux: bool,
    pub termux: bool,
}

impl ClipboardEnv {
    /// Inspect the running process.
    pub fn detect() -> Self {
        let set = |name: &str| std::env::var_os(name).is_some_and(|v| !v.is_empty());
        Self {
            platform: std::env::consts::OS.to_string(),
            wayland: set("WAYLAND_DISPLAY"),
            x11: set("DISPLAY"),
            tmux: set("TMUX"),
            termux: set("TERMUX_VERSION")
                || std::env::var("PREFIX").is_ok_and(|p| p.contains("com.termux")),
        }
    }

    /// Read commands in preference order.
    pub fn read_commands(&self) -> Vec<CommandSpec> {
        let mut out = Vec::new();
        match self.platform.as_str() {
            "macos" => out.push(cmd("pbpaste", &[])),
            "windows" => out.push(cmd(
                "powershell",
                &["-NoProfile", "-Command", "Get-Clipboard"],
            )),
            _ => {
                if self.termux {
                    out.push(cmd("termux-clipboard-get", &[]));
                }
                if self.wayland {
                    out.push(cmd("wl-paste", &["--no-newline"]));
                }
                if self.x11 {
                    out.push(cmd("xclip", &["-selection", "clipboard", "-o"]));
                    out.push(cmd("xsel", &["--clipboard", "--output"]));
                }
            }
        }
        if self.tmux {
            out.push(cmd("tmux", &["save-buffer", "-"]));
        }
        out
    }

    /// Write commands in preference order (text is fed on stdin).
    pub fn write_commands(&self) -> Vec<CommandSpec> {
        let mut out = Vec::new();
        match self.platform.as_str() {
            "macos" => out.push(cmd("pbcopy", &[])),
            "windows" => out.push(cmd("clip", &[])),
            _ => {
                if self.termux {
                    out.push(cmd("termux-clipboard-set", &[]));
                }
                if self.wayland {
                    out.push(cmd("wl-copy", &[]));
                }
                if self.x11 {
                    out.push(cmd("xclip", &["-selection", "clipboard"]));
                    out.push(cmd("xsel", &["--clipboard", "--input"]));
                }
            }
        }
        if self.tmux {
            out.push(cmd("tmux", &["load-buffer", "-"]));
        }
        out
    }
}

/// OS clipboard backend.
pub struct SystemClipboard {
    env: ClipboardEnv,
    timeout: Duration,
    osc52: bool,
}

impl SystemClipboard {
    pub fn new(timeout: Duration, osc52: bool) -> Self {
        Self::with_env(ClipboardEnv::detect(), timeout, osc52)
    }

    pub fn with_env(env: ClipboardEnv, timeout: Duration, osc52: bool) -> Self {
        Self {
            env,
            timeout,
            osc52,
        }
    }

    fn try_read(&self) -> Result<String, ClipboardError> {
        let mut last = ClipboardError::Unsupported(self.env.platform.clone());
        for spec in self.env.read_commands() {
            match run_command(&spec, None, self.timeout) {
                Ok(text) => return Ok(text.replace("\r\n", "\n")),
                Err(err) => {
                    debug!(target: "clipboard", program = spec.program, error = %err, "read_failed");
                    last = err;
                }
            }
        }
        Err(last)
    }

    fn try_write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last = ClipboardError::Unsupported(self.env.platform.clone());
        for spec in self.env.write_commands() {
            match run_command(&spec, Some(text), self.timeout) {
                Ok(_) => return Ok(()),
                Err(err) => {
                    debug!(target: "clipboard", program = spec.program, error = %err, "write_failed");
                    last = err;
                }
            }
        }
        Err(last)
    }

    fn broadcast_osc52(&self, text: &str) {
        let seq = osc52_sequence(text, self.env.tmux);
        let mut out = std::io::stdout();
        if let Err(err) = out.write_all(seq.as_bytes()).and_then(|_| out.flush()) {
            debug!(target: "clipboard", error = %err, "osc52_failed");
        }
    }
}

impl ClipboardBackend for SystemClipboard {
    fn write(&mut self, text: &str) -> bool {
        if self.osc52 {
            self.broadcast_osc52(text);
        }
        self.try_write(text).is_ok()
    }

    fn read(&mut self) -> ClipboardRead {
        match self.try_read() {
            Ok(text) => ClipboardRead::Text(text),
            Err(_) => ClipboardRead::Unavailable,
        }
    }
}

/// Run `spec`, optionally feeding `input` on stdin, and collect stdout.
fn run_command(
    spec: &CommandSpec,
    input: Option<&str>,
    timeout: Duration,
) -> Result<String, ClipboardError> {
    let deadline = Instant::now() + timeout;
    let mut child = Command::new(spec.program)
        .args(spec.args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(if input.is_some() {
            Stdio::null()
        } else {
            Stdio::piped()
        })
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ClipboardError::Spawn {
            program: spec.program.to_string(),
            source,
        })?;

    // The helper thread owns both pipes; this thread only waits up to the deadline.
    let (tx, rx) = bounded(1);
    let payload = input.map(|text| text.as_bytes().to_vec());
    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    thread::spawn(move || {
        let res = feed_and_collect(payload, stdin, stdout);
        let _ = tx.send(res);
    });

    let timed_out = || ClipboardError::Timeout {
        program: spec.program.to_string(),
        timeout_ms: timeout.as_millis() as u64,
    };
    let bytes = match rx.recv_deadline(deadline) {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(err)) => {
            kill(&mut child);
            return Err(err.into());
        }
        Err(_) => {
            kill(&mut child);
            return Err(timed_out());
        }
    };

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            kill(&mut child);
            return Err(timed_out());
        }
        thread::sleep(Duration::from_millis(5));
    };
    if !status.success() {
        return Err(ClipboardError::Exit {
            program: spec.program.to_string(),
            code: status.code(),
        });
    }
    trace!(target: "clipboard", program = spec.program, bytes = bytes.len(), "command_ok");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn feed_and_collect(
    payload: Option<Vec<u8>>,
    stdin: Option<ChildStdin>,
    stdout: Option<ChildStdout>,
) -> std::io::Result<Vec<u8>> {
    if let (Some(bytes), Some(mut pipe)) = (payload, stdin) {
        pipe.write_all(&bytes)?;
        // dropping `pipe` closes the child's stdin
    }
    let mut buf = Vec::new();
    if let Some(mut pipe) = stdout {
        pipe.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

fn kill(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
