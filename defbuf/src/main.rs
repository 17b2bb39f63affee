//! CLI driver: parses flags, loads LEF/DEF, runs the buffer-removal
//! pipeline, and writes the rewritten DEF into a timestamped output
//! directory alongside a run log.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use compact_str::CompactString;
use simplelog::{CombinedLogger, ConfigBuilder, LevelFilter, TerminalMode, ColorChoice, TermLogger, WriteLogger};

use defbuf::cli::Cli;
use defbuf::config::{load_defaults, ResolvedSettings};
use defbuf::def::{parse_def, rewrite::rewrite_def};
use defbuf::error::{DefBufError, Result};
use defbuf::{classify, lef, tracer};

const DEFAULT_CONFIG_PATH: &str = "defbuf.toml";

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("defbuf: error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let file_defaults = load_defaults(&config_path)?;

    let settings = ResolvedSettings::resolve(
        cli.buff.clone(),
        cli.def.clone(),
        cli.lef.clone(),
        cli.verilog.clone(),
        file_defaults,
    );

    let def_path = settings.def_path.as_deref().ok_or(DefBufError::MissingDefFile)?;
    let def_path = Path::new(def_path);

    check_input_file("DEF", def_path)?;
    if let Some(lef_path) = settings.lef_path.as_deref() {
        check_input_file("LEF", Path::new(lef_path))?;
    }

    let design = def_path.file_stem().map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "design".to_string());
    let out_dir = create_output_dir(&design)?;

    attach_file_log_sink(&out_dir.join("run.log"));
    clilog::enable_timer("");

    clilog::info!(I_RUN_START, "defbuf starting on '{}' (buffer prefix '{}')", def_path.display(), settings.buffer_prefix);

    let lef_timer = clilog::stimer!("lef_ingest");
    let macros = match settings.lef_path.as_deref() {
        Some(lef_path) => lef::parse_lef(lef_path)?,
        None => HashMap::new(),
    };
    clilog::finish!(lef_timer, "{} macros loaded", macros.len());

    let def_timer = clilog::stimer!("def_ingest");
    let mut netlist = parse_def(def_path)?;
    netlist.set_macros(macros);
    clilog::finish!(def_timer, "{} instances, {} nets", netlist.instances.len(), netlist.nets.len());

    netlist.validate_celltypes()?;

    let classify_timer = clilog::stimer!("classify");
    let classification = classify::classify(&netlist, &settings.buffer_prefix);
    clilog::finish!(classify_timer, "{} chain heads found", classification.chain_heads.len());

    let trace_timer = clilog::stimer!("trace");
    let mut chains: HashMap<CompactString, Vec<CompactString>> = HashMap::new();
    for head in &classification.chain_heads {
        let absorbed = tracer::trace_chain(&netlist, head, &settings.buffer_prefix);
        if !absorbed.is_empty() {
            chains.insert(head.clone(), absorbed);
        }
    }
    clilog::finish!(trace_timer, "{} chains traced", chains.len());

    let rewrite_timer = clilog::stimer!("rewrite");
    let (rewritten, summary) = rewrite_def(def_path, &netlist, &settings.buffer_prefix, &chains, "defbuf")?;
    clilog::finish!(
        rewrite_timer,
        "{} buffers, {} nets, {} chains collapsed",
        summary.deleted_buffers, summary.deleted_nets, summary.chains_collapsed
    );

    let out_def_path = out_dir.join(format!("{design}_noBuffers.def"));
    std::fs::write(&out_def_path, rewritten).map_err(|source| DefBufError::OutputWrite {
        path: out_def_path.display().to_string(),
        source,
    })?;

    println!(
        "defbuf: collapsed {} buffer chain(s), removed {} buffer(s) and {} net(s) -> {}",
        summary.chains_collapsed, summary.deleted_buffers, summary.deleted_nets, out_def_path.display()
    );

    Ok(())
}

/// Checks `path` exists and is readable before any output is written.
/// A missing or unreadable input file is always fatal.
fn check_input_file(what: &'static str, path: &Path) -> Result<()> {
    fs::metadata(path).map(|_| ()).map_err(|source| DefBufError::InputFile {
        what,
        path: path.display().to_string(),
        source,
    })
}

/// Creates `<YYYY-MM-DD_HH-MM-SS>_<design>` under the current directory.
///
/// A directory that already exists under that name is reused, not an
/// error; only something else occupying that name (a file, say) or a
/// genuine creation failure (permissions, etc.) is fatal.
fn create_output_dir(design: &str) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    let dir = PathBuf::from(format!("{stamp}_{design}"));
    if dir.exists() {
        if dir.is_dir() {
            return Ok(dir);
        }
        return Err(DefBufError::OutputDirCollision(dir.display().to_string()));
    }
    std::fs::create_dir_all(&dir).map_err(|source| DefBufError::OutputDirCreate {
        path: dir.display().to_string(),
        source,
    })?;
    Ok(dir)
}

/// Attaches a file-backed log sink alongside the colorized stderr
/// sink, so a run's full log is preserved in its output directory.
fn attach_file_log_sink(log_path: &Path) {
    let file = match std::fs::File::create(log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("defbuf: warning: could not open run log {}: {e}", log_path.display());
            clilog::init_stderr_color_debug();
            return;
        }
    };
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Debug)
        .set_thread_level(LevelFilter::Trace)
        .add_filter_ignore_str("rustyline")
        .build();
    let _ = CombinedLogger::init(vec![
        TermLogger::new(LevelFilter::Debug, config.clone(), TerminalMode::Stderr, ColorChoice::Auto),
        WriteLogger::new(LevelFilter::Trace, config, file),
    ]);
}
