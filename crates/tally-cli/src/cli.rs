use clap::Parser;

/// Command-line parser for the `tally` binary.
///
/// Everything else comes from configuration (`tally.toml`, `TALLY_*`).
#[derive(Debug, Parser)]
#[command(
    name = "tally",
    version,
    about = "Tail a live JSON-lines feed into SQLite and chart mean sentiment per category"
)]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::Cli;

    #[test]
    fn clap_command_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rejects_unknown_arguments() {
        assert!(Cli::try_parse_from(["tally", "--follow"]).is_err());
        assert!(Cli::try_parse_from(["tally"]).is_ok());
    }
}
