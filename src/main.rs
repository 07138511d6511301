// PROCRASTINATOR v1.0.0 -- ALGORITHM-CONFIGURATION SELECTION
// FINDS THE CONFIGURATION WITH THE LOWEST MEAN RUNTIME FROM RECORDED
// MEASUREMENTS, WITH PROBABILISTIC GUARANTEES AND A BOUNDED SAMPLING BUDGET
//
// SELECTION HAPPENS IN THE LIBRARY (LEDGER + SELECTORS, PURE RUST)
// THE BINARY HANDLES: ARGUMENTS, LOADING, REPORTING

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cli::check::run_check;
use cli::leaps::{run_leaps, LeapsArgs};
use cli::procrastinate::{run_procrastinate, ProcrastinateArgs};
use cli::DatasetArgs;

#[derive(Parser)]
#[command(name = "procrastinator")]
#[command(about = "PROCRASTINATOR -- ADAPTIVE ALGORITHM-CONFIGURATION SELECTION")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    // RUN LEAPSANDBOUNDS ON THE MEASUREMENTS
    Leaps(LeapsArgs),

    // RUN STRUCTURED PROCRASTINATION ON THE MEASUREMENTS
    Procrastinate(ProcrastinateArgs),

    // PRINT DATASET SIZE AND PER-CONFIGURATION STATISTICS
    Check(DatasetArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Leaps(args) => run_leaps(args)?,
        Command::Procrastinate(args) => run_procrastinate(args)?,
        Command::Check(args) => run_check(args)?,
    }

    println!("PROCRASTINATOR OUT.");
    Ok(())
}
