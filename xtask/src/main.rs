use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for freelook")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Launch the desktop app at a given stage
    Run {
        /// triangle, mvp, cube or camera
        #[arg(default_value = "camera")]
        stage: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            for task in [fmt_args(), clippy_args(), test_args(), doc_args()] {
                cargo(&task)?;
            }
        }
        Commands::Fmt => cargo(&fmt_args())?,
        Commands::Clippy => cargo(&clippy_args())?,
        Commands::Test => cargo(&test_args())?,
        Commands::Doc => cargo(&doc_args())?,
        Commands::Run { stage } => cargo(&[
            "run",
            "-p",
            "freelook-desktop",
            "--",
            "--stage",
            stage.as_str(),
        ])?,
    }

    Ok(())
}

fn fmt_args() -> Vec<&'static str> {
    vec!["fmt", "--all", "--", "--check"]
}

fn clippy_args() -> Vec<&'static str> {
    vec!["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]
}

fn test_args() -> Vec<&'static str> {
    vec!["test", "--workspace"]
}

fn doc_args() -> Vec<&'static str> {
    vec!["doc", "--workspace", "--no-deps"]
}

/// Run `cargo <args>`, failing if it exits unsuccessfully.
fn cargo(args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {} failed", args[0]);
    }
    Ok(())
}
