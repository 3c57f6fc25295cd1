use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the empty food database template (JSON object)
    pub template: PathBuf,
    /// Path to the per-100g nutrition facts CSV
    pub nutrition_csv: PathBuf,
    /// Where to write the populated food database
    pub output: PathBuf,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_positional_paths() {
        let cli = Cli::try_parse_from(["fooddb-builder", "empty.fdb", "facts.csv", "default.fdb"])
            .unwrap();
        assert_eq!(cli.template, PathBuf::from("empty.fdb"));
        assert_eq!(cli.nutrition_csv, PathBuf::from("facts.csv"));
        assert_eq!(cli.output, PathBuf::from("default.fdb"));
    }

    #[test]
    fn test_missing_output_is_rejected() {
        assert!(Cli::try_parse_from(["fooddb-builder", "empty.fdb", "facts.csv"]).is_err());
    }
}
