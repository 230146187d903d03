//! Process Runner Module
//! Executes the converter as a child process and captures its output.

use std::io;
use std::process::Command;

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a program to completion and captures what it printed.
///
/// The loader only depends on this trait, so the converter can be swapped for
/// an in-process implementation or a fake in tests.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput>;
}

/// Runs commands with `std::process::Command`, blocking until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        let output = Command::new(program).args(args).output()?;

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for Box<R> {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        (**self).run(program, args)
    }
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for std::sync::Arc<R> {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        (**self).run(program, args)
    }
}
