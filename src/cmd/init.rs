//! Init command implementation
//!
//! Handles the `sonar-rank init` command which writes a configuration file
//! holding every default value, ready to be edited.

use anyhow::Result;
use console::style;
use std::env;
use std::path::Path;

use crate::config::{self, ConfigFile, ConfigLoader};
use crate::fmt;
use crate::ranking::Criterion;

/// Outcome of an init run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A new file was written
    Created,
    /// An existing file was replaced
    Overwritten,
    /// A file exists and `force` was not given
    Skipped,
}

/// Initialize sonar-rank configuration in the current directory
///
/// Creates a `.sonar-rank.toml` holding the default settings. An existing
/// file is left untouched unless `force` is set.
///
/// # Examples
///
/// ```no_run
/// use sonar_rank::cmd::init::cmd_init;
///
/// cmd_init(false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init(force: bool) -> Result<()> {
    println!(
        "{} {} Initializing sonar-rank",
        fmt::ROCKET,
        style("sonar-rank init").bold()
    );
    println!();

    let project_root = env::current_dir()?;
    match init_config(&project_root, force)? {
        InitOutcome::Skipped => {
            println!(
                "{} Config file already exists: {}",
                fmt::WARNING,
                style(config::CONFIG_FILE_NAME).cyan()
            );
            println!("   Pass --force to replace it with the defaults.");
            return Ok(());
        }
        InitOutcome::Overwritten => println!(
            "{} Replaced {} with the defaults",
            fmt::CHECKMARK,
            style(config::CONFIG_FILE_NAME).cyan().bold()
        ),
        InitOutcome::Created => println!(
            "{} Created {}",
            fmt::CHECKMARK,
            style(config::CONFIG_FILE_NAME).cyan().bold()
        ),
    }
    println!();

    println!("{}  Next Steps:", fmt::INFO);
    println!(
        "   1. Set {} to your server's dashboard link prefix",
        style("dashboard-url").green()
    );
    println!(
        "   2. Run {} to rank an exported snapshot",
        style("sonar-rank rank <EXPORT_DIR>").cyan()
    );
    println!();

    println!("{}  Available Criteria:", fmt::SPARKLES);
    for criterion in Criterion::all() {
        println!(
            "   {} {} - {}",
            style("•").dim(),
            style(criterion.name).bold(),
            style(criterion.heading).dim()
        );
    }

    Ok(())
}

/// Write the default configuration into `project_root`
pub fn init_config(project_root: &Path, force: bool) -> Result<InitOutcome> {
    let existed = ConfigLoader::exists(project_root);
    if existed && !force {
        return Ok(InitOutcome::Skipped);
    }

    ConfigLoader::save(&ConfigFile::default(), project_root)?;

    Ok(if existed {
        InitOutcome::Overwritten
    } else {
        InitOutcome::Created
    })
}
