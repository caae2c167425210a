use anyhow::Result;
use colored::Colorize;

use crate::step::{self, OnFailure, Step};

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let step = Step {
        label: "Documentation build",
        args: if open {
            &["doc", "--workspace", "--no-deps", "--document-private-items", "--open"]
        } else {
            &["doc", "--workspace", "--no-deps", "--document-private-items"]
        },
        on_failure: OnFailure::Abort,
    };
    step::run(&step)?;

    if !open {
        println!(
            "   {}",
            "Open target/doc/card/index.html in your browser".dimmed()
        );
        println!(
            "   {}",
            "Or run 'cargo run -p xtask -- doc --open'".dimmed()
        );
        println!();
    }

    Ok(())
}
