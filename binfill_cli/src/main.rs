mod cli;
mod error_fmt;
mod monitor;

use clap::Parser;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use eyre::WrapErr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

fn main() {
    let args = Cli::parse();
    let _ = JSON_MODE.set(args.json);

    if let Err(e) = run(&args) {
        eprintln!("{}", error_fmt::humanize(&e));
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> eyre::Result<()> {
    color_eyre::install().ok();

    let cfg = load_config(args)?;
    init_logging(args, &cfg)?;

    match &args.cmd {
        Commands::Run {
            ticks,
            bin_id,
            inject_reset_at,
        } => monitor::run(&cfg, *ticks, bin_id.clone(), *inject_reset_at, args.json),
        Commands::Show => monitor::show(&cfg, args.json),
        Commands::SelfCheck => monitor::self_check(&cfg),
    }
}

fn load_config(args: &Cli) -> eyre::Result<binfill_config::Config> {
    let cfg = if args.config.exists() {
        let text = std::fs::read_to_string(&args.config)
            .wrap_err_with(|| format!("reading config {}", args.config.display()))?;
        binfill_config::load_toml(&text)
            .map_err(|e| eyre::eyre!("parsing config {}: {e}", args.config.display()))?
    } else {
        binfill_config::Config::default()
    };
    cfg.validate()
        .wrap_err_with(|| format!("validating config {}", args.config.display()))?;
    Ok(cfg)
}

fn init_logging(args: &Cli, cfg: &binfill_config::Config) -> eyre::Result<()> {
    let level = cfg
        .logging
        .level
        .clone()
        .unwrap_or_else(|| args.log_level.clone());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .wrap_err("invalid log level")?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    // Console logs go to stderr so stdout stays parseable in --json mode.
    if args.json {
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed(),
        );
    } else {
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .boxed(),
        );
    }

    if let Some(path) = cfg.logging.file.as_ref() {
        let p = std::path::Path::new(path);
        let dir = match p.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => std::path::Path::new("."),
        };
        let name = p
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "binfill.log".into());
        let appender = tracing_appender::rolling::never(dir, name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).with(filter).init();
    Ok(())
}
