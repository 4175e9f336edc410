//! jobforge CLI - compile declarative job definitions to Jenkins XML
//!
//! Usage:
//!   jobforge compile job.yaml --install wrappers.timestamp=1.8
//!   jobforge compile job.yaml -o config.xml
//!   jobforge list
//!
//! The CLI is glue only: it loads the definition file, records installed
//! plugin versions on the built-in registry, and hands everything to the
//! library. All compilation logic lives in the library.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jobforge::registry::RegistryNode;
use jobforge::{catalog, compile, ConfigNode, Document, RegistryGroup};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "jobforge")]
#[command(about = "Compile declarative job definitions to Jenkins XML")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a YAML or JSON job definition
    Compile {
        /// Job definition file
        file: PathBuf,

        /// Entity type (registry root) to compile under
        #[arg(long, default_value = "job")]
        entity: String,

        /// Installed plugin version, e.g. wrappers.timestamp=1.8 (repeatable)
        #[arg(short, long = "install", value_name = "PATH=VERSION")]
        install: Vec<String>,

        /// Name of the document root element
        #[arg(long, default_value = "project")]
        root: String,

        /// Write the XML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List registered capabilities
    List,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            file,
            entity,
            install,
            root,
            output,
        } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let config: ConfigNode = parse_definition(&file, &content)?;

            let mut registry = catalog::default_registry();
            for spec in &install {
                let (path, version) = spec
                    .split_once('=')
                    .with_context(|| format!("expected PATH=VERSION, got '{}'", spec))?;
                registry.install_version(&format!("{}.{}", entity, path), version)?;
            }

            let mut doc = Document::new(&root);
            compile(&registry, &entity, &config, &mut doc)?;

            let xml = doc.to_xml();
            match output {
                Some(path) => std::fs::write(&path, xml)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{}", xml),
            }
        }

        Commands::List => {
            let registry = catalog::default_registry();
            if let Some(group) = registry.root("job") {
                print_group(group, "job");
            }
        }
    }

    Ok(())
}

fn parse_definition(file: &Path, content: &str) -> Result<ConfigNode> {
    match file.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(content)
            .with_context(|| format!("invalid JSON in {}", file.display())),
        Some("yaml") | Some("yml") => serde_yaml::from_str(content)
            .with_context(|| format!("invalid YAML in {}", file.display())),
        _ => bail!("unsupported definition format: {}", file.display()),
    }
}

fn print_group(group: &RegistryGroup, prefix: &str) {
    for (key, node) in group.iter() {
        let path = format!("{}.{}", prefix, key);
        match node {
            RegistryNode::Group(sub) => print_group(sub, &path),
            RegistryNode::Entry(_) => println!("{}", path),
        }
    }
}
