mod builtins;
mod cli;
mod config;
mod error;
mod eval;
mod jobs;
mod parser;
mod signals;
mod ui;

use std::io::stdin;
use std::process;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use config::ShellConfig;
use error::ShellError;
use eval::Evaluator;
use jobs::SharedJobs;
use ui::Prompt;

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|_| ui::usage());
    if cli.show_usage {
        ui::usage();
    }

    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = ShellConfig::load()?;
    let jobs = SharedJobs::new();
    signals::install(jobs.clone())?;

    let evaluator = Evaluator::new(jobs, cli.verbose || config.verbose);
    let prompt = Prompt::new(&config.prompt);

    loop {
        if !cli.no_prompt {
            prompt.show();
        }

        let mut line = String::new();
        let read = stdin().read_line(&mut line).map_err(ShellError::Read)?;
        if read == 0 {
            // End of input (ctrl-d) exits cleanly.
            return Ok(());
        }

        let line = line.trim_end();
        evaluator.eval(line, &parser::parse_line(line))?;
    }
}
