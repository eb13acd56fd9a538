use super::{DamageOracle, DamageRange, DamageRequest, OracleError, OracleResponse};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs an external calculator once per request: request JSON on stdin,
/// response JSON on stdout.
#[derive(Debug, Clone)]
pub struct ProcessOracle {
    program: String,
    args: Vec<String>,
}

impl ProcessOracle {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a command line on whitespace, e.g. `"node calc.js"`.
    pub fn from_command_line(cmd: &str) -> Option<Self> {
        let mut parts = cmd.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl DamageOracle for ProcessOracle {
    fn evaluate(&self, request: &DamageRequest) -> Result<DamageRange, OracleError> {
        let payload = serde_json::to_vec(request)
            .map_err(|e| OracleError::Malformed(format!("cannot encode request: {}", e)))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| OracleError::Unavailable(format!("{}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&payload) {
                Ok(()) => {}
                // The oracle may answer without reading its input.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("Oracle closed stdin early: {}", e);
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(OracleError::Unavailable(format!("write to oracle: {}", e)));
                }
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| OracleError::Unavailable(format!("wait for oracle: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OracleError::Unavailable(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        debug!("Oracle replied with {} bytes", output.stdout.len());

        let response: OracleResponse = serde_json::from_slice(&output.stdout)
            .map_err(|e| OracleError::Malformed(e.to_string()))?;
        response.into_range()
    }
}
