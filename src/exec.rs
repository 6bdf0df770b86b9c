use std::{
    io::{self, Write},
    path::Path,
    process::Stdio,
};

use console::Style;
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::Command,
};
use tracing::{debug, warn};

/// Output fragments that get echoed to stderr when a subprocess prints them.
const ERROR_KEYWORDS: &[&str] = &["error: "];

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("cannot parse command `{command}`: {message}")]
    InvalidCommand { command: String, message: String },

    #[error("cannot spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}", code.map(|c| format!("code {c}")).unwrap_or_else(|| "a signal".to_string()))]
    Failed { command: String, code: Option<i32> },
}

impl ExecError {
    /// Exit code of the child, when it got far enough to exit with one.
    pub fn code(&self) -> Option<i32> {
        match self {
            ExecError::Failed { code, .. } => *code,
            _ => None,
        }
    }
}

/// Runs `command` inside `working_dir` and waits for it to exit.
///
/// The command line is tokenized with shell quoting rules and spawned without a
/// shell. Both output streams are read line by line while the child runs;
/// lines containing an error keyword are echoed to stderr. Only the exit
/// status decides the result: `Ok` for exactly 0, [`ExecError::Failed`]
/// otherwise.
pub async fn run(command: &str, working_dir: &Path) -> Result<(), ExecError> {
    let argv = shell_words::split(command).map_err(|e| ExecError::InvalidCommand {
        command: command.to_string(),
        message: e.to_string(),
    })?;
    let (program, args) = argv.split_first().ok_or_else(|| ExecError::InvalidCommand {
        command: command.to_string(),
        message: "empty command".to_string(),
    })?;

    debug!(command, dir = %working_dir.display(), "spawning");
    let mut child = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ExecError::Spawn {
            command: command.to_string(),
            source,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let (mut out_echo, mut err_echo) = (io::stderr(), io::stderr());
    let (status, _, _) = tokio::join!(
        child.wait(),
        scan(stdout, &mut out_echo),
        scan(stderr, &mut err_echo)
    );
    let status = status.map_err(|source| ExecError::Spawn {
        command: command.to_string(),
        source,
    })?;

    debug!(command, ?status, "exited");
    if status.success() {
        Ok(())
    } else {
        Err(ExecError::Failed {
            command: command.to_string(),
            code: status.code(),
        })
    }
}

/// Reads `stream` to EOF, echoing lines with an error keyword to `echo`.
///
/// Lines are decoded lossily so non-UTF-8 output never stops the read; the
/// pipe stays drained until the child closes it.
async fn scan<R, W>(stream: Option<R>, echo: &mut W)
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let Some(stream) = stream else {
        return;
    };
    let red = Style::new().red().for_stderr();
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => return,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']);
                if contains_error_keyword(line) {
                    let _ = writeln!(echo, "{}", red.apply_to(line));
                } else {
                    debug!("{line}");
                }
            }
            Err(err) => {
                warn!(%err, "cannot read subprocess output, discarding the rest");
                let _ = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await;
                return;
            }
        }
    }
}

pub fn contains_error_keyword(output: &str) -> bool {
    let output = output.to_lowercase();
    ERROR_KEYWORDS.iter().any(|keyword| output.contains(keyword))
}
