use anyhow::Result;
use clap::Parser;
use diskfree::collectors::mounts;
use diskfree::config::{Config, Severity};
use diskfree::util::human::{fmt_header, fmt_pct, fmt_row};
use diskfree::{ByteScale, FilesystemSnapshot};
use serde_json::{json, Value};
use std::io::Write;

#[derive(Parser, Debug)]
#[command(name = "dfree", about = "Report filesystem capacity for mount points", version)]
struct Cli {
    /// Mount points or paths to query (default: configured mounts, else all real mounts)
    paths: Vec<String>,

    /// Unit for sizes: byte, kilobyte, megabyte, gigabyte, terabyte, petabyte
    #[arg(short, long, value_enum)]
    scale: Option<ByteScale>,

    /// Print a JSON snapshot and exit
    #[arg(long)]
    json: bool,

    /// One-shot usage check: exit 0=OK, 1=WARNING, 2=CRITICAL, 3=UNKNOWN (nagios/cron compatible)
    #[arg(long)]
    check: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,
}

/// Result of querying one path, in the order the paths were given.
type Outcome = (String, diskfree::Result<FilesystemSnapshot>);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diskfree=warn,dfree=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let cfg = Config::load();

    if cli.config {
        return run_print_config(&cfg);
    }

    let scale = cli.scale.unwrap_or(cfg.general.scale);
    let paths = resolve_paths(cli.paths, &cfg, mounts::read_mount_points)?;
    let outcomes: Vec<Outcome> = paths
        .into_iter()
        .map(|p| {
            let res = diskfree::query(&p);
            if let Err(e) = &res {
                tracing::debug!(errno = e.raw_os_error(), "{}", e);
            }
            (p, res)
        })
        .collect();

    let mut stdout = std::io::stdout().lock();
    let code = if cli.check {
        run_check(&mut stdout, &outcomes, &cfg)?
    } else if cli.json {
        run_json(&mut stdout, &outcomes, scale)?
    } else {
        run_table(&mut stdout, &outcomes, scale)?
    };
    stdout.flush()?;
    std::process::exit(code);
}

/// CLI paths win, then configured mounts, then whatever `discover` finds.
fn resolve_paths<F>(cli_paths: Vec<String>, cfg: &Config, discover: F) -> Result<Vec<String>>
where
    F: FnOnce() -> Result<Vec<String>>,
{
    if !cli_paths.is_empty() {
        return Ok(cli_paths);
    }
    if !cfg.general.mounts.is_empty() {
        return Ok(cfg.general.mounts.clone());
    }
    discover()
}

fn run_table<W: Write>(out: &mut W, outcomes: &[Outcome], scale: ByteScale) -> Result<i32> {
    let mut failed = false;
    writeln!(out, "{}", fmt_header())?;
    for (mount, res) in outcomes {
        match res {
            Ok(snap) => writeln!(out, "{}", fmt_row(mount, snap, scale))?,
            Err(e) => {
                eprintln!("dfree: {}", e);
                failed = true;
            }
        }
    }
    Ok(if failed { 1 } else { 0 })
}

fn json_report(outcomes: &[Outcome], scale: ByteScale) -> (Value, bool) {
    let mut filesystems: Vec<Value> = Vec::new();
    let mut errors: Vec<Value> = Vec::new();

    for (mount, res) in outcomes {
        match res {
            Ok(snap) => filesystems.push(json!({
                "mount":        mount,
                "total":        snap.total(scale),
                "used":         snap.used(scale),
                "avail":        snap.avail(scale),
                "percent_used": snap.percent_used(),
            })),
            Err(e) => errors.push(json!({
                "mount": mount,
                "error": e.to_string(),
                "errno": e.raw_os_error(),
            })),
        }
    }

    let failed = !errors.is_empty();
    let report = json!({
        "version":     env!("CARGO_PKG_VERSION"),
        "timestamp":   chrono::Local::now().to_rfc3339(),
        "scale":       scale.name(),
        "filesystems": filesystems,
        "errors":      errors,
    });
    (report, failed)
}

fn run_json<W: Write>(out: &mut W, outcomes: &[Outcome], scale: ByteScale) -> Result<i32> {
    let (report, failed) = json_report(outcomes, scale);
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(if failed { 1 } else { 0 })
}

/// Nagios exit code. CRITICAL outranks UNKNOWN, which outranks WARNING.
fn check_code(worst: Severity, unknown: bool) -> i32 {
    match (worst, unknown) {
        (Severity::Critical, _) => 2,
        (_, true)               => 3,
        (Severity::Warning, _)  => 1,
        (Severity::Ok, _)       => 0,
    }
}

fn run_check<W: Write>(out: &mut W, outcomes: &[Outcome], cfg: &Config) -> Result<i32> {
    let t = &cfg.thresholds;
    let mut worst = Severity::Ok;
    let mut unknown = false;

    for (mount, res) in outcomes {
        match res {
            Ok(snap) => {
                let sev = t.classify(snap.percent_used());
                if sev != Severity::Ok {
                    writeln!(out, "[{}] {} {} used", sev.label(), mount, fmt_pct(snap.percent_used()))?;
                }
                worst = worst.max(sev);
            }
            Err(e) => {
                writeln!(out, "[UNKNOWN] {}", e)?;
                unknown = true;
            }
        }
    }

    let code = check_code(worst, unknown);
    if code == 0 {
        writeln!(out, "OK: {} filesystem(s) below {}%", outcomes.len(), t.warn_pct)?;
    }
    Ok(code)
}

fn run_print_config(cfg: &Config) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  scale  = {}", cfg.general.scale.name());
    if cfg.general.mounts.is_empty() {
        println!("  mounts = (all real mounts)");
    } else {
        println!("  mounts = {:?}", cfg.general.mounts);
    }
    println!();
    println!("[thresholds]");
    println!("  warn_pct = {}%", cfg.thresholds.warn_pct);
    println!("  crit_pct = {}%", cfg.thresholds.crit_pct);
    Ok(())
}
