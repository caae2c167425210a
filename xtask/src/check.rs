use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{self, OnFailure, Step};

// Bare-metal x86_64 stands in for the kernel environment: no std, no alloc.
const NO_STD_TARGET: &str = "x86_64-unknown-none";

const STEPS: &[Step] = &[
    Step {
        label: "Checking platform crate (no_std)",
        args: &["check", "-p", "platform", "--target", NO_STD_TARGET],
        on_failure: OnFailure::Abort,
    },
    Step {
        label: "Checking card crate (no_std, defmt)",
        args: &[
            "check",
            "-p",
            "card",
            "--target",
            NO_STD_TARGET,
            "--features",
            "defmt",
        ],
        on_failure: OnFailure::Abort,
    },
    Step {
        label: "Checking card crate (host, tracing)",
        args: &["check", "-p", "card", "--features", "tracing"],
        on_failure: OnFailure::Abort,
    },
    Step {
        label: "Running clippy lints",
        args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        on_failure: OnFailure::Warn,
    },
    Step {
        label: "Checking code formatting",
        args: &["fmt", "--all", "--check"],
        on_failure: OnFailure::Warn,
    },
];

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking machine driver builds...".cyan().bold());
    println!();

    let total_start = Instant::now();
    for s in STEPS {
        step::run(s)?;
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
