//! parshift - coordinate transformation by par file.
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use parshift::config::{self, Entry, Registry, Transformed};
use parshift::{Format, Point, Transformer};

#[derive(Debug, Parser)]
#[command(name = "parshift", version, about = "Coordinate transformation by par file")]
struct Cli {
    /// The registry file, overrides PARSHIFT_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Prints debug logs
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lists the registered parameter files
    List {
        /// Shows path, format and description
        #[arg(short = 'l', long)]
        long: bool,
    },
    /// Registers parameter files
    Add {
        #[arg(required = true)]
        path: Vec<PathBuf>,
        /// The keys in the order of the files, the file stems when absent
        #[arg(short, long)]
        key: Vec<String>,
        /// The format, guessed from the file stem when absent
        #[arg(short, long)]
        format: Option<Format>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Unregisters parameter files
    Remove {
        #[arg(required = true)]
        key: Vec<String>,
        /// Matches the keys by regular expressions from the start
        #[arg(short, long)]
        regex: bool,
    },
    /// Prints the statistics of the parameters as json
    Summary { key: String },
    /// Converts a par file into json
    Convert {
        path: PathBuf,
        #[arg(short, long)]
        format: Format,
        /// Writes to the file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Transforms the points of a json file
    Trans {
        /// The transformers applied in sequence
        #[arg(required = true)]
        key: Vec<String>,
        /// The json file, `{"point": [{"latitude": .., "longitude": .., "altitude": ..}]}`
        #[arg(short, long)]
        input: PathBuf,
        /// Backward transformation in reverse order
        #[arg(short, long)]
        backward: bool,
        /// Uses the verified backward transformation
        #[arg(short, long, requires = "backward")]
        safe: bool,
        /// Writes to the file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Deserialize)]
struct Input {
    point: Vec<Point>,
}

#[derive(Debug, Serialize)]
struct Output {
    point: Vec<Transformed>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default = if cli.verbose > 0 { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();

    let (path, source) = config::resolve_path(cli.config.as_deref());
    tracing::debug!(path = %path.display(), ?source, "registry");

    match cli.command {
        Command::List { long } => list(&Registry::load(path)?, long),
        Command::Add {
            path: files,
            key,
            format,
            description,
        } => add(Registry::load(path)?, files, key, format, description),
        Command::Remove { key, regex } => remove(Registry::load(path)?, &key, regex),
        Command::Summary { key } => {
            let tf = Registry::load(path)?.load_transformer(&key)?;
            write(None, &serde_json::to_string_pretty(&tf.statistics())?)
        }
        Command::Convert {
            path: file,
            format,
            output,
        } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let tf = Transformer::from_str(&text, format)
                .with_context(|| format!("failed to parse {}", file.display()))?;
            write(output.as_deref(), &serde_json::to_string(&tf)?)
        }
        Command::Trans {
            key,
            input,
            backward,
            safe,
            output,
        } => {
            let registry = Registry::load(path)?;
            trans(&registry, &key, &input, backward, safe, output.as_deref())
        }
    }
}

fn write(output: Option<&Path>, s: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, s).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{s}")?;
            Ok(())
        }
    }
}

fn list(registry: &Registry, long: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for entry in registry.entries() {
        if long {
            writeln!(
                stdout,
                "{}\t{}\t{}\t{}",
                entry.key,
                entry.format(),
                entry.path.display(),
                entry.description.as_deref().unwrap_or("")
            )?;
        } else {
            writeln!(stdout, "{}", entry.key)?;
        }
    }
    Ok(())
}

fn add(
    mut registry: Registry,
    files: Vec<PathBuf>,
    keys: Vec<String>,
    format: Option<Format>,
    description: Option<String>,
) -> Result<()> {
    if !keys.is_empty() && keys.len() != files.len() {
        anyhow::bail!("{} keys given for {} files", keys.len(), files.len());
    }

    for (i, file) in files.into_iter().enumerate() {
        let path = fs::canonicalize(&file)
            .with_context(|| format!("failed to access {}", file.display()))?;

        let key = match keys.get(i) {
            Some(key) => key.clone(),
            None => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .with_context(|| format!("no file stem in {}", path.display()))?,
        };

        let entry = Entry {
            key,
            path,
            format,
            description: description.clone(),
        };

        // fails early on a broken file
        entry.load_transformer(registry.base())?;

        tracing::debug!(key = %entry.key, path = %entry.path.display(), "add");
        registry.add(entry)?;
    }

    registry.save()?;
    Ok(())
}

fn remove(mut registry: Registry, keys: &[String], regex: bool) -> Result<()> {
    let mut removed = Vec::new();

    for key in keys {
        if regex {
            // anchors at the start only
            let pattern = Regex::new(&format!("^(?:{key})"))
                .with_context(|| format!("invalid regex: '{key}'"))?;
            removed.extend(registry.remove_if(|entry| pattern.is_match(&entry.key)));
        } else {
            removed.extend(registry.remove(key));
        }
    }

    if removed.is_empty() {
        anyhow::bail!("key not found: {}", keys.join(", "));
    }
    for entry in &removed {
        tracing::debug!(key = %entry.key, "remove");
    }

    registry.save()?;
    Ok(())
}

fn trans(
    registry: &Registry,
    keys: &[String],
    input: &Path,
    backward: bool,
    safe: bool,
    output: Option<&Path>,
) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let input: Input = serde_json::from_str(&text)
        .with_context(|| format!("invalid input {}", input.display()))?;

    let point = registry.transform(input.point, keys, backward, safe)?;

    write(output, &serde_json::to_string(&Output { point })?)
}
