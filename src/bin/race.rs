//! Binary that reads graph commands from standard in, races the exact SAT-based
//! vertex cover solver against two greedy approximations on every edge update,
//! and writes the three covers to standard out.

use std::error;
use std::io;

use clap::Parser;

use vc_race::calc_stats::CalcLog;
use vc_race::command;

#[derive(Parser)]
#[command(about = "Race an exact SAT-based vertex cover solver against two greedy approximations.")]
struct Args {
    /// Collect per-run ratio and runtime statistics, reported at exit.
    #[arg(long)]
    calc: bool,
}

pub fn main() -> Result<(), Box<dyn error::Error>> {
    let args = Args::parse();
    let stdin = io::stdin();
    let stdin = stdin.lock();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut log = args.calc.then(CalcLog::default);
    command::run(stdin, &mut stdout, log.as_mut())?;
    if let Some(log) = log {
        log.render(&mut stdout)?;
    }
    Ok(())
}
