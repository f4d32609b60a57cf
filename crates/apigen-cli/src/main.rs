use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use rayon::prelude::*;

use apigen_core::config::{self, ApigenConfig, CONFIG_FILE_NAME, MethodConfig};
use apigen_core::ir::{Method, NamedType, Record, Request, Type};
use apigen_core::{QuerySet, from_json_str, from_yaml_str, infer_query, path_record};
use apigen_go::emitters::types::TypeDeclarations;
use apigen_go::format::formatter_for;
use apigen_go::{GeneratorOptions, GoClientGenerator, SourceWriter};

#[derive(Parser)]
#[command(name = "apigen", about = "Go API client generator driven by sample payloads", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Go client described by the config file
    Generate {
        /// Path to the config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file, overriding the configured one
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the Go types inferred from one sample document
    Infer {
        /// Sample document (JSON or YAML)
        sample: PathBuf,

        /// Name of the top-level type
        #[arg(long, default_value = "Response")]
        name: String,
    },

    /// Initialize a new apigen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { config, output } => cmd_generate(config, output),

        Commands::Infer { sample, name } => cmd_infer(&sample, &name),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apigen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Read a sample document, picking the decoder from the file extension.
fn load_sample(path: &Path) -> Result<Record> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let record = match ext {
        "yaml" | "yml" => from_yaml_str(&content),
        _ => from_json_str(&content),
    };
    record.with_context(|| format!("failed to infer a schema from {}", path.display()))
}

/// Build one method from its config entry. Sample paths are relative to `base`.
fn build_method(base: &Path, cfg: &MethodConfig) -> Result<Method> {
    log::debug!("inferring {} {} {}", cfg.name, cfg.verb, cfg.url);

    let body = cfg
        .body
        .as_deref()
        .map(|sample| load_sample(&base.join(sample)))
        .transpose()?;

    // A method without a response sample gets an empty response struct.
    let response = match cfg.response.as_deref() {
        Some(sample) => load_sample(&base.join(sample))?,
        None => Record::default(),
    };

    let request = Request {
        path: path_record(&cfg.url),
        query: cfg
            .query
            .as_deref()
            .map(|query| infer_query(&QuerySet::parse(query))),
        body,
    };

    Method::new(
        &cfg.name,
        cfg.verb,
        cfg.url.as_str(),
        request,
        Type::Record(response),
    )
    .with_context(|| format!("invalid method {}", cfg.name))
}

/// Infer every configured method and render the formatted client source.
fn render_client(base: &Path, cfg: &ApigenConfig) -> Result<Vec<u8>> {
    let generator = GoClientGenerator::new(GeneratorOptions::from(cfg));

    let entries: Vec<(&str, &MethodConfig)> = cfg
        .services
        .iter()
        .flat_map(|(service, methods)| methods.iter().map(move |m| (service.as_str(), m)))
        .collect();

    entries.par_iter().try_for_each(|(service, method_cfg)| {
        let method = build_method(base, method_cfg)?;
        generator.register(service, method);
        Ok::<_, anyhow::Error>(())
    })?;

    let formatter = formatter_for(cfg.formatter);
    let mut source = Vec::new();
    generator
        .generate(formatter.as_ref(), &mut source)
        .context("failed to generate the Go client")?;
    Ok(source)
}

fn cmd_generate(config_path: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let Some(cfg) = config::load_config(&config_path)? else {
        anyhow::bail!(
            "{} not found. Run `apigen init` to create one.",
            config_path.display()
        );
    };

    if cfg.services.is_empty() {
        eprintln!("No services configured. Add a `services` section to your config.");
        return Ok(());
    }

    log::info!("loaded {}", config_path.display());
    let base = config_path.parent().unwrap_or(Path::new("."));
    let output = output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    let source = render_client(base, &cfg)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(&output, &source).with_context(|| format!("failed to write {}", output.display()))?;

    let methods: usize = cfg.services.values().map(Vec::len).sum();
    eprintln!(
        "Generated {} services ({} methods) in {}",
        cfg.services.len(),
        methods,
        output.display()
    );
    Ok(())
}

/// Go declarations of the type inferred from `sample`, named `name`.
fn infer_declarations(sample: &Path, name: &str) -> Result<String> {
    let record = load_sample(sample)?;
    let root = Arc::new(NamedType::new(name, Type::Record(record)));

    let mut w = SourceWriter::new();
    TypeDeclarations::new().declare(&mut w, &root);
    Ok(w.take()?)
}

fn cmd_infer(sample: &Path, name: &str) -> Result<()> {
    print!("{}", infer_declarations(sample, name)?);
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
