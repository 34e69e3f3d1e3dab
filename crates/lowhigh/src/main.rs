//! `lowhigh` - run LOW/HIGH naming and bake-group actions on a scene snapshot

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use lowhigh_engine::foundation::logging;
use lowhigh_engine::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "lowhigh")]
#[command(about = "LOW/HIGH renaming and bake-pair organizer for scene snapshots", long_about = None)]
#[command(version)]
struct Cli {
    /// Scene snapshot (.toml or .ron)
    scene: PathBuf,

    /// Configuration file (.toml or .ron); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Entity to act on; repeat for several
    #[arg(short, long = "select", value_name = "NAME")]
    select: Vec<String>,

    /// Act on every geometric entity in the scene
    #[arg(long, conflicts_with = "select")]
    all: bool,

    /// Where to write the updated scene; defaults to overwriting SCENE
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add the LOW or HIGH suffix to the selection
    #[command(name = "add-suffix")]
    AddSuffix {
        /// Suffix to add
        side: Side,
    },

    /// Strip LOW/HIGH suffixes from the selection
    #[command(name = "remove-suffix")]
    RemoveSuffix,

    /// Duplicate the selection into the LOW or HIGH group
    Copy {
        /// Target group
        side: Side,
    },

    /// Find LOW/HIGH pairs and move them into bake groups
    #[command(name = "find-pairs")]
    FindPairs {
        /// Only report pairs; leave groups untouched
        #[arg(long)]
        no_groups: bool,

        /// Put all pairs into one shared bake group
        #[arg(long)]
        common: bool,
    },

    /// Remove empty bake groups
    Clean,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Low,
    High,
}

impl From<Side> for Role {
    fn from(side: Side) -> Self {
        match side {
            Side::Low => Self::Low,
            Side::High => Self::High,
        }
    }
}

impl Command {
    fn action(&self) -> Action {
        match *self {
            Self::AddSuffix { side } => Action::AddSuffix(side.into()),
            Self::RemoveSuffix => Action::RemoveSuffix,
            Self::Copy { side } => Action::CopyTo(side.into()),
            Self::FindPairs { .. } => Action::FindPairs,
            Self::Clean => Action::CleanBakeGroups,
        }
    }

    /// Apply per-invocation overrides to the loaded configuration
    fn configure(&self, mut config: LowHighConfig) -> LowHighConfig {
        if let Self::FindPairs { no_groups, common } = *self {
            if no_groups {
                config.naming.create_groups = false;
            }
            if common {
                config.naming.use_common_group = true;
            }
        }
        config
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_with_default(if cli.verbose { "debug" } else { "info" });

    let config = match &cli.config {
        Some(path) => LowHighConfig::load_from_file(path)?,
        None => LowHighConfig::default(),
    };
    let config = cli.command.configure(config);

    let snapshot = SceneSnapshot::load(&cli.scene)?;
    let mut scene = Scene::from_snapshot(&snapshot)?;
    log::debug!("Loaded {} entities from {}", scene.world.len(), cli.scene.display());

    let selection = if cli.all {
        scene
            .world
            .iter()
            .filter(|(_, entity)| entity.kind().is_geometric())
            .map(|(id, _)| id)
            .collect()
    } else {
        let (found, missing) = scene.resolve_names(&cli.select);
        for name in missing {
            log::warn!("No entity named '{}'", name);
        }
        found
    };

    let report = actions::run(&mut scene, &selection, &config, cli.command.action())?;

    if report.status == ActionStatus::Finished {
        let output = cli.output.as_ref().unwrap_or(&cli.scene);
        scene.snapshot().save(output)?;
        log::debug!("Wrote {}", output.display());
    }

    println!("{}", report.message);
    Ok(())
}
