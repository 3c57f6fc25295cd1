use anyhow::{Context, Result};
use fooddb_builder::builder::build_database;
use fooddb_builder::cli::parse_args;
use fooddb_builder::config::Config;
use fooddb_builder::logging;

fn main() -> Result<()> {
    let config = Config::load();
    logging::init(&config);

    let cli_args = parse_args();

    let summary = build_database(&cli_args.template, &cli_args.nutrition_csv, &cli_args.output)
        .with_context(|| {
            format!(
                "Failed to build food database '{}' from '{}' and '{}'",
                cli_args.output.display(),
                cli_args.template.display(),
                cli_args.nutrition_csv.display()
            )
        })?;

    println!(
        "Wrote {} foods to {}",
        summary.foods_written,
        summary.output_path.display()
    );
    Ok(())
}
