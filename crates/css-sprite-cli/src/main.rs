use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use css_sprite_core::{GroupConfig, SpriteBuilder, SpriteConfig, StyleOptions};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "css-sprite",
    about = "Compile icon folders into sprite sheets and a stylesheet",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show a progress bar while building (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate sprite images and the combined stylesheet
    #[command(visible_alias = "generate")]
    Build(BuildArgs),
    /// Delete previously generated sprites and stylesheet
    #[command(visible_alias = "delete")]
    Clean(ConfigArgs),
    /// Write a starter sprite.json and source directory
    Init(InitArgs),
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// Config file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long, default_value = "sprite.json", help_heading = "Input/Output")]
    config: PathBuf,
    /// Directory relative paths are resolved against (defaults to the config file's directory)
    #[arg(long, help_heading = "Input/Output")]
    root: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct BuildArgs {
    #[command(flatten)]
    config: ConfigArgs,

    // Layout
    /// Row width limit in pixels (overrides settings.max-width)
    #[arg(long, help_heading = "Layout")]
    max_width: Option<u32>,
    /// Skip icons narrower or shorter than this (overrides settings.min-size)
    #[arg(long, help_heading = "Layout")]
    min_size: Option<u32>,
    /// Skip icons wider or taller than this (overrides settings.max-size)
    #[arg(long, help_heading = "Layout")]
    max_size: Option<u32>,
    /// Sort icons by ascending width before layout (overrides settings.sort)
    #[arg(long, action=ArgAction::Set, help_heading = "Layout")]
    sort: Option<bool>,

    // Export
    /// PNG compression level 0..=9 (overrides settings.quality)
    #[arg(long, help_heading = "Export")]
    quality: Option<u8>,
    /// Append !important to generated declarations
    #[arg(long, default_value_t = false, help_heading = "Export")]
    important: bool,
    /// Also emit a :hover companion class per icon
    #[arg(long, default_value_t = false, help_heading = "Export")]
    hover: bool,
    /// Write sprite-<group>.json manifests next to the sprites
    #[arg(long, default_value_t = false, help_heading = "Export")]
    manifest: bool,
    /// Remove previous artifacts before building
    #[arg(long, default_value_t = false, help_heading = "Export")]
    clean: bool,
    /// Compile everything but write no files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
    /// Print the merged configuration (after file/CLI) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
}

#[derive(Args, Debug, Clone)]
struct InitArgs {
    /// Project directory to initialise
    #[arg(default_value = ".")]
    dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Build(args) => run_build(args, cli.progress && !cli.quiet),
        Commands::Clean(args) => run_clean(args),
        Commands::Init(args) => run_init(args),
    }
}

fn run_build(args: &BuildArgs, show_progress: bool) -> anyhow::Result<()> {
    let (mut cfg, root) = load_config(&args.config)?;
    apply_overrides(&mut cfg, args);

    if args.print_config {
        match args.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }
    cfg.validate()?;

    let builder = SpriteBuilder::new(cfg, root)
        .with_style(StyleOptions {
            important: args.important,
            hover: args.hover,
        })
        .with_manifest(args.manifest)
        .dry_run(args.dry_run);

    if args.clean && !args.dry_run {
        let removed = builder.clean()?;
        info!(count = removed.len(), "previous build cleared");
    }

    let bar = if show_progress {
        use indicatif::{ProgressBar, ProgressStyle};
        let b = ProgressBar::new(builder.config().sprites.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} building {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };
    let report = builder.build_with(|group| {
        if let Some(b) = &bar {
            b.set_message(group.name.clone());
            b.inc(1);
        }
    });
    if let Some(b) = &bar {
        b.finish_and_clear();
    }

    for group in &report.groups {
        match &group.result {
            Ok(summary) => println!(
                "ok    {:<16} {:>4} tiles  {}x{}  -> {}",
                group.name,
                summary.stats.num_tiles,
                summary.stats.width,
                summary.stats.height,
                summary.image_path.display()
            ),
            Err(e) => println!("FAIL  {:<16} {}", group.name, e),
        }
    }
    if let Some(path) = &report.stylesheet {
        println!("css   {}", path.display());
    }
    if let Some(e) = &report.stylesheet_error {
        println!("FAIL  stylesheet: {e}");
    }

    let failed = report.failed().count();
    if failed > 0 || report.stylesheet_error.is_some() {
        anyhow::bail!(
            "{} of {} sprite groups failed",
            failed,
            report.groups.len()
        );
    }
    Ok(())
}

fn run_clean(args: &ConfigArgs) -> anyhow::Result<()> {
    let (cfg, root) = load_config(args)?;
    let removed = SpriteBuilder::new(cfg, root).clean()?;
    if removed.is_empty() {
        println!("nothing to clean");
    }
    for path in &removed {
        println!("removed {}", path.display());
    }
    Ok(())
}

fn run_init(args: &InitArgs) -> anyhow::Result<()> {
    let cfg = SpriteConfig {
        sprites: vec![GroupConfig::new("icons", "sprites/icons")],
        ..Default::default()
    };
    for group in &cfg.sprites {
        let dir = args.dir.join(&group.path);
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let out_dir = args.dir.join(&cfg.path);
    fs::create_dir_all(&out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    let cfg_path = args.dir.join("sprite.json");
    if cfg_path.exists() {
        warn!(path = %cfg_path.display(), "config already exists; left untouched");
        return Ok(());
    }
    fs::write(&cfg_path, serde_json::to_string_pretty(&cfg)?)
        .with_context(|| format!("write {}", cfg_path.display()))?;
    println!("created {}", cfg_path.display());
    Ok(())
}

/// Reads the config file and returns it with the directory relative paths resolve against.
fn load_config(args: &ConfigArgs) -> anyhow::Result<(SpriteConfig, PathBuf)> {
    let text = fs::read_to_string(&args.config)
        .with_context(|| format!("read config {}", args.config.display()))?;
    let cfg = parse_config(&args.config, &text)
        .with_context(|| format!("parse config {}", args.config.display()))?;
    let root = match &args.root {
        Some(root) => root.clone(),
        None => args
            .config
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    Ok((cfg, root))
}

fn parse_config(path: &Path, text: &str) -> anyhow::Result<SpriteConfig> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase());
    Ok(match ext.as_deref() {
        Some("yaml" | "yml") => serde_yaml::from_str(text)?,
        _ => serde_json::from_str(text)?,
    })
}

fn apply_overrides(cfg: &mut SpriteConfig, args: &BuildArgs) {
    let settings = &mut cfg.settings;
    if let Some(v) = args.max_width {
        settings.max_width = v;
    }
    if let Some(v) = args.min_size {
        settings.min_size = v;
    }
    if let Some(v) = args.max_size {
        settings.max_size = v;
    }
    if let Some(v) = args.quality {
        settings.quality = v;
    }
    if let Some(v) = args.sort {
        settings.sort = v;
    }
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
