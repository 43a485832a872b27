use clap::Parser;
use std::process::ExitCode;

use stobj::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = stderrlog::new()
        .verbosity(cli.verbosity as usize + 2)
        .module(module_path!())
        .init()
    {
        eprintln!("failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    let outcome = run(&cli);

    // stderrlog only ever writes to stderr; `--log` additionally gets the
    // final one-line status, which is all a fatal run needs for a record.
    if let Some(path) = &cli.log {
        let line = match &outcome {
            Ok(()) => "run completed successfully\n".to_string(),
            Err(e) => format!("run failed: {e}\n"),
        };
        if let Err(e) = std::fs::write(path, line) {
            eprintln!("failed to write {}: {e}", path.display());
        }
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
