use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// How a failing step affects the whole task.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    Abort,
    Warn,
}

/// One `cargo` invocation with a progress label.
pub struct Step {
    pub label: &'static str,
    pub args: &'static [&'static str],
    pub on_failure: OnFailure,
}

/// Run `step`, printing progress. Returns the output on success, `None` when
/// a warn-only step failed.
pub fn run(step: &Step) -> Result<Option<Output>> {
    println!("{}", format!("  {}...", step.label).cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(step.args)
        .output()
        .with_context(|| format!("Failed to run cargo {}", step.args.join(" ")))?;

    if output.status.success() {
        println!(
            "{}",
            format!(
                "  ✓ {} passed in {:.2}s",
                step.label,
                start.elapsed().as_secs_f64()
            )
            .green()
        );
        println!();
        return Ok(Some(output));
    }

    match step.on_failure {
        OnFailure::Abort => {
            eprintln!("{}", format!("  ✗ {} failed", step.label).red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            for line in String::from_utf8_lossy(&output.stdout).lines() {
                eprintln!("  {line}");
            }
            anyhow::bail!("{} failed", step.label);
        }
        OnFailure::Warn => {
            eprintln!("{}", format!("  ⚠ {} reported problems", step.label).yellow().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            println!();
            Ok(None)
        }
    }
}
