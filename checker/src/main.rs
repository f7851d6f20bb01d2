//! `tslocale-check` entrypoint.
//!
//! Validates catalogs or renders a probe message, writing results to stdout
//! and failures to stderr.

use std::io::Write;

use clap::Parser;
use tslocale_check::cli::{Cli, Command};
use tslocale_check::{Result, check, resolve};

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::Check(args) => check(args, stdout).map(|_| ()),
        Command::Resolve(args) => resolve(args, stdout, stderr).map(|_| ()),
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Nothing left to report to.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tslocale_check::CheckError;

    #[rstest]
    fn exit_code_is_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);

        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[rstest]
    fn exit_code_prints_error_and_returns_one() {
        let err = CheckError::CheckFailed {
            failed: 1,
            checked: 3,
        };
        let mut stderr = Vec::new();

        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);

        assert_eq!(exit_code, 1);
        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("1 of 3 catalog(s) failed the check"));
    }

    #[rstest]
    fn resolve_without_catalogs_renders_the_fallback() {
        let cli = Cli::parse_from([
            "tslocale-check",
            "resolve",
            "-l",
            "en_US",
            "Set folder to %1",
            "/srv",
        ]);
        let (mut stdout, mut stderr) = (Vec::new(), Vec::new());

        run(&cli, &mut stdout, &mut stderr).expect("fallback language is always loaded");

        assert_eq!(
            String::from_utf8(stdout).expect("UTF-8"),
            "Set folder to /srv\n"
        );
    }
}
