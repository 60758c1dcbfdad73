use clap::Parser;
use console::style;
use mirra::config::Cli;
use mirra::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli)?;

    println!("mirra v{}", mirra::VERSION);
    println!("  Source:   {}", config.source.display());
    println!("  Replica:  {}", config.replica.display());
    println!(
        "  Interval: every {} minute(s)",
        config.interval.as_secs() / 60
    );
    println!("  Journal:  {}", config.log_dir.display());

    if config.delete {
        println!(
            "{}",
            style("Extraneous entries in the replica will be deleted.").yellow()
        );
    }

    mirra::commands::sync::run(config)?;

    Ok(())
}
