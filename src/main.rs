use anyhow::Result;
use clap::Parser;

use artinya_cli::cli::commands::{configure, providers, run};
use artinya_cli::cli::{Args, Command};
use artinya_cli::config::{ConfigManager, ResolveOptions};
use artinya_cli::language::print_languages;
use artinya_cli::output::{self, OutputConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        verbosity: args.verbose,
    });

    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Providers { provider }) => {
            let manager = ConfigManager::resolve(args.config)?;
            providers::print_providers(&manager, provider.as_deref())?;
        }
        Some(Command::Configure) => {
            let manager = ConfigManager::resolve(args.config)?;
            configure::run_configure(&manager)?;
        }
        None => {
            let describe = args.describe_override();
            let evaluate = args.eval_override();
            let options = run::RunOptions {
                file: args.file,
                texts: args.texts,
                resolve: ResolveOptions {
                    from: args.from,
                    to: args.to,
                    provider: args.provider,
                    model: args.model,
                    max_retries: args.max_retries,
                    describe,
                    evaluate,
                },
                output: args.output,
                report: args.report,
                config: args.config,
            };
            run::run(options).await?;
        }
    }

    Ok(())
}
