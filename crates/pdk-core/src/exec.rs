//! Runs the external PDK program that does the actual work.

use std::ffi::OsStr;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::ExecError;

/// Forwards a command line to the external PDK program.
#[derive(Debug, Clone)]
pub struct PdkExecutor {
    program: String,
}

impl PdkExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the program with `args`, sharing this process's stdio, and return
    /// its exit code. Termination by signal is reported as 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be started or waited on.
    pub async fn run<I, S>(&self, args: I) -> Result<i32, ExecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        tracing::debug!(program = %self.program, "Forwarding to PDK");
        let status = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ExecError::from_io(&self.program, e))?;

        let code = status.code().unwrap_or(1);
        tracing::debug!(program = %self.program, code, "PDK exited");
        Ok(code)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn exit_code_is_passed_through() {
        let exec = PdkExecutor::new("sh");
        assert_eq!(exec.run(["-c", "exit 0"]).await.unwrap(), 0);
        assert_eq!(exec.run(["-c", "exit 3"]).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn arguments_are_forwarded_verbatim() {
        let exec = PdkExecutor::new("sh");
        let script = r#"[ "$1" = "new" ] && [ "$2" = "fact" ] && [ "$3" = "--debug" ]"#;
        let code = exec
            .run(["-c", script, "sh", "new", "fact", "--debug"])
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn signal_termination_maps_to_one() {
        let exec = PdkExecutor::new("sh");
        assert_eq!(exec.run(["-c", "kill -9 $$"]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_program_is_not_found() {
        let exec = PdkExecutor::new("pdk-definitely-not-installed");
        let err = exec.run(["build"]).await.unwrap_err();
        assert!(matches!(
            err,
            ExecError::NotFound { ref program } if program == "pdk-definitely-not-installed"
        ));
    }
}
