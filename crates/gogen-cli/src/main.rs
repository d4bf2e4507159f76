use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use gogen_core::CodeGenerator;
use gogen_core::config::{self, CONFIG_FILE_NAME, GogenConfig};
use gogen_core::decorate;
use gogen_core::parse;
use gogen_core::parse::spec::ApiSpec;
use gogen_core::resolve::GoResolver;
use gogen_go::GoModelGenerator;

#[derive(Parser)]
#[command(name = "gogen", about = "Swagger to Go code generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go code from one or more Swagger specs
    Generate {
        /// Spec file or directory of spec files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect the decorated context of a Swagger spec
    Inspect {
        /// Path to the spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new gogen configuration
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

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output } => cmd_generate(input, output),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "gogen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<GogenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Resolve the list of spec files for an input path, skipping excluded
/// include files when the input is a directory.
fn collect_spec_files(input: &Path, cfg: &GogenConfig) -> Result<Vec<PathBuf>> {
    if input.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(input)
            .with_context(|| format!("failed to read directory {}", input.display()))?
        {
            let path = entry?.path();
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !matches!(ext, "yaml" | "yml" | "json") {
                continue;
            }
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            if cfg.exclude.iter().any(|excluded| excluded == name) {
                continue;
            }
            files.push(path);
        }
        // Deterministic ordering regardless of directory iteration order
        files.sort();
        if files.is_empty() {
            bail!("no spec files found in {}", input.display());
        }
        Ok(files)
    } else {
        Ok(vec![input.to_path_buf()])
    }
}

fn load_spec(path: &Path) -> Result<ApiSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");
    let spec = match ext {
        "json" => parse::from_json(&content),
        _ => parse::from_yaml(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(spec)
}

fn cmd_generate(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let mut cfg = try_load_config()?.unwrap_or_default();
    if let Some(output) = output {
        cfg.output = output.display().to_string();
    }
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));

    let mut specs = Vec::new();
    for path in collect_spec_files(&input, &cfg)? {
        specs.push(load_spec(&path)?);
    }

    let resolver = GoResolver::new(&cfg);
    let context = decorate::run(&specs, &cfg, &resolver).context("decoration failed")?;

    let generator = GoModelGenerator;
    let files = generator
        .generate(&context, &cfg)
        .context("generation failed")?;

    for file in files {
        if let Some(parent) = Path::new(&file.path).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&file.path, &file.content)
            .with_context(|| format!("failed to write {}", file.path))?;
        println!("wrote {}", file.path);
    }
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let spec = load_spec(&input)?;
    let resolver = GoResolver::new(&cfg);
    let context = decorate::run_single(&spec, &cfg, &resolver).context("decoration failed")?;

    let rendered = match format {
        InspectFormat::Yaml => serde_yaml_ng::to_string(&context)?,
        InspectFormat::Json => serde_json::to_string_pretty(&context)?,
    };
    println!("{rendered}");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", CONFIG_FILE_NAME);
    }
    fs::write(&path, config::default_config_content())
        .with_context(|| format!("failed to write {CONFIG_FILE_NAME}"))?;
    println!("wrote {CONFIG_FILE_NAME}");
    Ok(())
}
