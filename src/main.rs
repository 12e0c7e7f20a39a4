use anyhow::Result;
use clap::Parser;
use qa_reader_data::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qa_reader_data=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
