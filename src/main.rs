use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use sonar_rank::cmd;
use std::path::PathBuf;
use std::process;

/// Code-quality trend ranking for SonarQube projects
///
/// sonar-rank reads an exported snapshot of component measurement histories,
/// derives how each component changed over a trailing window and prints the
/// best and worst components for every ranking criterion.
#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the components of an export directory
    Rank {
        /// Directory holding components.json and history/
        #[arg(value_name = "EXPORT_DIR")]
        export_dir: PathBuf,

        /// Configuration file (default: .sonar-rank.toml in the current directory)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Maximum entries per ranking
        #[arg(short, long)]
        top: Option<usize>,

        /// Length of the trailing window in days
        #[arg(short, long)]
        window_days: Option<u32>,

        /// Criteria to run, comma-separated (default: all)
        #[arg(long, value_delimiter = ',')]
        criteria: Option<Vec<String>>,

        /// Output as JSON
        #[arg(long, conflicts_with = "progressive")]
        json: bool,

        /// Clear the terminal and re-render after every loaded component
        #[arg(short, long)]
        progressive: bool,
    },

    /// Write a default sonar-rank configuration
    Init {
        /// Replace an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match cli.command {
        Some(Commands::Rank {
            export_dir,
            config,
            top,
            window_days,
            criteria,
            json,
            progressive,
        }) => cmd::cmd_rank(&cmd::RankArgs {
            export_dir,
            config,
            top,
            window_days,
            criteria,
            json,
            progressive,
        }),
        Some(Commands::Init { force }) => cmd::cmd_init(force),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell, &mut Cli::command());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("sonar-rank v{}", env!("CARGO_PKG_VERSION"));
            println!("Code-quality trend ranking for SonarQube projects\n");
            println!("Usage: sonar-rank <COMMAND>\n");
            println!("Commands:");
            println!("  rank         Rank the components of an export directory");
            println!("  init         Write a default sonar-rank configuration");
            println!("  completions  Generate shell completions");
            println!("\nRun 'sonar-rank <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use sonar_rank::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert()
    }

    #[test]
    fn test_about_comes_from_doc_comment() {
        let about = Cli::command().get_about().map(|a| a.to_string());
        assert_eq!(
            about.as_deref(),
            Some("Code-quality trend ranking for SonarQube projects")
        );
    }

    #[test]
    fn test_criteria_split_on_commas() {
        let cli = Cli::parse_from([
            "sonar-rank",
            "rank",
            "export",
            "--criteria",
            "coverage,debt",
        ]);
        match cli.command {
            Some(Commands::Rank { criteria, .. }) => {
                assert_eq!(
                    criteria,
                    Some(vec!["coverage".to_string(), "debt".to_string()])
                );
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn test_json_conflicts_with_progressive() {
        let result = Cli::try_parse_from(["sonar-rank", "rank", "export", "--json", "--progressive"]);
        assert!(result.is_err());
    }
}
