use std::{
    os::unix::process::CommandExt, sync::mpsc, thread, time::Duration,
};

use crate::error::{Error, Result};

/// Runs a host command and returns its normalized standard output.
pub trait Run {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<String>;
}

/// Program and arguments, as given on a command line.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Splits on whitespace. No quoting support.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace().map(String::from);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn run_with<R: Run + ?Sized>(&self, runner: &R) -> Result<String> {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        runner.run(&self.program, &args[..])
    }
}

impl std::str::FromStr for CommandLine {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Empty command line: {s:?}"))
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs commands as child processes, with a forced locale so that labels
/// like "Local Loopback" come out untranslated.
#[derive(Debug, Clone)]
pub struct Exec {
    pub locale: String,
    pub timeout: Option<Duration>,
}

impl Default for Exec {
    fn default() -> Self {
        Self {
            locale: "C".to_string(),
            timeout: Some(Duration::from_secs(5)),
        }
    }
}

impl Run for Exec {
    #[tracing::instrument(skip(self))]
    fn run(&self, cmd: &str, args: &[&str]) -> Result<String> {
        let mut command = std::process::Command::new(cmd);
        command
            .args(args)
            .env("LANG", &self.locale)
            .env("LC_ALL", &self.locale);
        let out = match self.timeout {
            None => exec(command, cmd, args)?,
            Some(timeout) => exec_with_timeout(command, cmd, args, timeout)?,
        };
        Ok(join_lines(&out))
    }
}

/// Stdout lines, each with trailing whitespace removed, joined by `\n`.
pub fn join_lines(out: &[u8]) -> String {
    String::from_utf8_lossy(out)
        .lines()
        .map(str::trim_end)
        .collect::<Vec<&str>>()
        .join("\n")
}

fn describe(cmd: &str, args: &[&str]) -> String {
    format!("{cmd} {args:?}")
}

fn check(
    out: std::process::Output,
    cmd: &str,
    args: &[&str],
) -> Result<Vec<u8>> {
    if out.status.success() {
        Ok(out.stdout)
    } else {
        let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
        tracing::error!(
            ?cmd,
            ?args,
            status = ?out.status,
            ?stderr,
            "Failed to execute command."
        );
        Err(Error::CommandFailed {
            cmd: describe(cmd, args),
            status: out.status,
            stderr,
        })
    }
}

pub fn exec(
    mut command: std::process::Command,
    cmd: &str,
    args: &[&str],
) -> Result<Vec<u8>> {
    let out = command.output().map_err(|source| Error::Spawn {
        cmd: describe(cmd, args),
        source,
    })?;
    check(out, cmd, args)
}

pub fn exec_with_timeout(
    mut command: std::process::Command,
    cmd: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<Vec<u8>> {
    let cmd_str = describe(cmd, args);
    let child = command
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        // XXX Sets PGID to PID. So we can kill as group (with any children).
        .process_group(0)
        .spawn()
        .map_err(|source| Error::Spawn {
            cmd: cmd_str.clone(),
            source,
        })?;
    let pid = child.id();
    let (tx, rx) = mpsc::channel();
    thread::spawn({
        let cmd_str = cmd_str.clone();
        move || {
            let result = child.wait_with_output().map_err(|source| {
                Error::Spawn {
                    cmd: cmd_str.clone(),
                    source,
                }
            });
            tx.send(result).unwrap_or_else(|error| {
                tracing::error!(
                    ?error,
                    pid,
                    cmd = cmd_str,
                    "Failed to return send cmd result. Receiver dropped."
                );
            })
        }
    });
    match rx.recv_timeout(timeout) {
        Ok(result) => check(result?, cmd, args),
        Err(_) => {
            if let Err(error) = kill(pid) {
                tracing::error!(
                    ?error,
                    pid,
                    cmd = cmd_str,
                    "Failed to kill timed-out process."
                );
            }
            Err(Error::Timeout {
                cmd: cmd_str,
                timeout,
            })
        }
    }
}

fn kill(pid: u32) -> anyhow::Result<()> {
    use nix::{sys::signal::Signal::SIGKILL, unistd::Pid};

    // Catch wrap arounds when going from u32 to i32:
    let pid: i32 = pid.try_into()?;
    let pid: Pid = Pid::from_raw(pid);
    nix::sys::signal::killpg(pid, SIGKILL)?;
    Ok(())
}
