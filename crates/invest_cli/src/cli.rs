//! Command-line surface: one subcommand per record operation.

use clap::{Args, Parser, Subcommand};
use invest_core::RecordId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "invest",
    version,
    about = "Track assets, their categories, and their indicators."
)]
pub struct Cli {
    /// SQLite database file, or `:memory:`. Overrides INVEST_DB_PATH.
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error). Overrides INVEST_LOG_LEVEL.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage assets.
    #[command(subcommand)]
    Assets(AssetCommand),
    /// Manage categories.
    #[command(subcommand)]
    Categories(CategoryCommand),
    /// Manage indicators.
    #[command(subcommand)]
    Indicators(IndicatorCommand),
    /// Compare indicators across selected assets and categories.
    Decision(DecisionArgs),
    /// Print the core version.
    Version,
}

#[derive(Subcommand, Debug)]
pub enum AssetCommand {
    List,
    Get {
        id: RecordId,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        category_id: RecordId,
    },
    /// Update only the fields given.
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        category_id: Option<RecordId>,
    },
    Delete {
        id: RecordId,
    },
    ByCategory {
        category_id: RecordId,
    },
    ByType {
        #[arg(value_name = "TYPE")]
        kind: String,
    },
    /// Case-sensitive name substring search.
    Search {
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    List,
    Get {
        id: RecordId,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update only the fields given.
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: RecordId,
    },
    /// Exact name match.
    ByName {
        name: String,
    },
    /// Case-sensitive name substring search.
    Search {
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum IndicatorCommand {
    List,
    Get {
        id: RecordId,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        value: f64,
        #[arg(long)]
        asset_id: RecordId,
    },
    /// Update only the fields given.
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        value: Option<f64>,
        #[arg(long)]
        asset_id: Option<RecordId>,
    },
    Delete {
        id: RecordId,
    },
    ByAsset {
        asset_id: RecordId,
    },
    /// Case-sensitive name substring search.
    Search {
        name: String,
    },
    /// Indicators with min <= value <= max.
    ByValue {
        #[arg(long, allow_negative_numbers = true)]
        min: f64,
        #[arg(long, allow_negative_numbers = true)]
        max: f64,
    },
}

#[derive(Args, Debug)]
pub struct DecisionArgs {
    /// Asset id to include (repeatable).
    #[arg(long = "asset", value_name = "ID")]
    pub asset_ids: Vec<RecordId>,
    /// Category id to include (repeatable).
    #[arg(long = "category", value_name = "ID")]
    pub category_ids: Vec<RecordId>,
}

#[cfg(test)]
mod tests {
    use super::{AssetCommand, Cli, Command, IndicatorCommand};
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_partial_asset_update() {
        let cli = Cli::parse_from(["invest", "assets", "update", "3", "--type", "bond"]);
        match cli.command {
            Command::Assets(AssetCommand::Update {
                id,
                name,
                kind,
                category_id,
            }) => {
                assert_eq!(id, 3);
                assert_eq!(name, None);
                assert_eq!(kind.as_deref(), Some("bond"));
                assert_eq!(category_id, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_negative_indicator_values() {
        let cli = Cli::parse_from([
            "invest",
            "--db",
            ":memory:",
            "indicators",
            "by-value",
            "--min",
            "-2.5",
            "--max",
            "0",
        ]);
        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new(":memory:")));
        match cli.command {
            Command::Indicators(IndicatorCommand::ByValue { min, max }) => {
                assert_eq!(min, -2.5);
                assert_eq!(max, 0.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
