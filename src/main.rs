use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use humanizer::menu::{self, MenuCommand};
use humanizer::output::{self, generate_output_path};
use humanizer::reader::{self, InputError, ReaderConfig, TextReader};
use humanizer::report;
use humanizer::{Converter, HumanizerConfig, VariantPolicy};

#[derive(Parser, Debug)]
#[command(name = "humanizer")]
#[command(about = "Rewrite formal Indonesian text into a casual register and score its humanness")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// TOML file with pipeline settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible rewriting
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// How lexicon entries with several replacements are resolved
    #[arg(long, value_enum, global = true)]
    variant_policy: Option<VariantPolicy>,

    /// Per-sentence chance of injecting a filler word
    #[arg(long, global = true)]
    filler_probability: Option<f64>,

    /// Also inject transition words, not just fillers
    #[arg(long, global = true)]
    include_transitions: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite files (`-` for stdin) and report scores before and after
    Convert {
        /// Input text files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Save each result next to its input as <name>_human.txt
        #[arg(long)]
        save: bool,

        /// Save the result to this path (single input only)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Emit reports as JSON
        #[arg(long)]
        json: bool,

        /// Suppress the progress bar
        #[arg(long)]
        no_progress: bool,

        /// Abort on the first unreadable file
        #[arg(long)]
        fail_fast: bool,
    },
    /// Score files (`-` for stdin) without rewriting them
    Analyze {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit metrics as JSON
        #[arg(long)]
        json: bool,

        /// Abort on the first unreadable file
        #[arg(long)]
        fail_fast: bool,
    },
    /// Menu-driven session (default)
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logs go to stderr; stdout carries reports only
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let config = build_config(&args).await?;
    let converter = Converter::new(config)?;

    match args.command.unwrap_or(Command::Interactive) {
        Command::Convert { files, save, output, json, no_progress, fail_fast } => {
            let options = ConvertOptions { save, output, json, no_progress, fail_fast };
            run_convert(&converter, &files, &options).await
        }
        Command::Analyze { files, json, fail_fast } => {
            run_analyze(&converter, &files, json, fail_fast).await
        }
        Command::Interactive => run_interactive(&converter).await,
    }
}

/// Config file first, then CLI overrides
async fn build_config(args: &Args) -> Result<HumanizerConfig> {
    let mut config = match &args.config {
        Some(path) => HumanizerConfig::load(path).await?,
        None => HumanizerConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(policy) = args.variant_policy {
        config.variant_policy = policy;
    }
    if let Some(probability) = args.filler_probability {
        config.filler_probability = probability;
    }
    if args.include_transitions {
        config.include_transitions = true;
    }
    config.validate()?;
    Ok(config)
}

async fn load_input(reader: &TextReader, path: &Path) -> Result<String, InputError> {
    if path == Path::new("-") {
        reader::read_stdin().await
    } else {
        reader.read_text(path).await.map(|(content, _stats)| content)
    }
}

struct ConvertOptions {
    save: bool,
    output: Option<PathBuf>,
    json: bool,
    no_progress: bool,
    fail_fast: bool,
}

async fn run_convert(converter: &Converter, files: &[PathBuf], options: &ConvertOptions) -> Result<()> {
    if options.output.is_some() && files.len() != 1 {
        bail!("--output requires exactly one input file");
    }

    let reader = TextReader::new(ReaderConfig {
        fail_fast: options.fail_fast,
        ..Default::default()
    });
    let progress = progress_bar(files.len(), options.no_progress || options.json)?;

    let mut reports = Vec::with_capacity(files.len());
    let mut failures = 0usize;

    for path in files {
        progress.set_message(path.display().to_string());
        let text = match load_input(&reader, path).await {
            Ok(text) => text,
            Err(e) => {
                if reader.config().fail_fast {
                    progress.abandon();
                    return Err(e.into());
                }
                warn!("Skipping {}: {}", path.display(), e);
                progress.suspend(|| eprintln!("✗ {e}"));
                failures += 1;
                progress.inc(1);
                continue;
            }
        };

        let report = converter.convert(&path.display().to_string(), &text);

        let target = match (&options.output, options.save) {
            (Some(output), _) => Some(output.clone()),
            (None, true) if path != Path::new("-") => Some(generate_output_path(path)),
            (None, true) => {
                warn!("--save ignored for stdin input; use --output");
                None
            }
            (None, false) => None,
        };
        if let Some(target) = target {
            match output::write_converted_text(&target, &report.converted_text).await {
                Ok(written) if !options.json => {
                    progress.suspend(|| println!("✓ Tersimpan ke {}", written.display()));
                }
                Ok(_) => {}
                Err(e) if options.fail_fast => {
                    progress.abandon();
                    return Err(e);
                }
                Err(e) => {
                    warn!("Could not save {}: {:#}", target.display(), e);
                    progress.suspend(|| eprintln!("✗ Error: {e:#}"));
                    failures += 1;
                }
            }
        }

        if options.json {
            reports.push(report);
        } else {
            progress.suspend(|| println!("{}\n", report.render()));
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    info!("Converted {} of {} inputs", files.len() - failures, files.len());
    if failures > 0 {
        bail!("{failures} of {} inputs failed", files.len());
    }
    Ok(())
}

async fn run_analyze(converter: &Converter, files: &[PathBuf], json: bool, fail_fast: bool) -> Result<()> {
    let reader = TextReader::new(ReaderConfig {
        fail_fast,
        ..Default::default()
    });
    let mut results = Vec::with_capacity(files.len());
    let mut failures = 0usize;

    for path in files {
        let text = match load_input(&reader, path).await {
            Ok(text) => text,
            Err(e) if reader.config().fail_fast => return Err(e.into()),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                eprintln!("✗ {e}");
                failures += 1;
                continue;
            }
        };
        let metrics = converter.score(&text);
        if json {
            results.push(serde_json::json!({
                "source": path.display().to_string(),
                "metrics": metrics,
            }));
        } else {
            println!("{}\n", report::render_metrics(&metrics, &path.display().to_string()));
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    if failures > 0 {
        bail!("{failures} of {} inputs could not be read", files.len());
    }
    Ok(())
}

fn progress_bar(len: usize, hidden: bool) -> Result<ProgressBar> {
    if hidden || len < 2 {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );
    Ok(bar)
}

type StdinLines = Lines<BufReader<Stdin>>;

/// Print a prompt and read one line; `None` at end of input
async fn prompt(lines: &mut StdinLines, message: &str) -> Result<Option<String>> {
    print!("{message}");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

async fn run_interactive(converter: &Converter) -> Result<()> {
    let rule = report::rule();
    println!("\n{rule}\nAI TEXT TO HUMAN TEXT CONVERTER\n{rule}");
    println!("\n{}", menu::render_menu());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(choice) = prompt(&mut lines, "\nPilih opsi (1/2/3): ").await? else {
            break;
        };

        match MenuCommand::parse(&choice) {
            Some(MenuCommand::ManualInput) => manual_input(converter, &mut lines).await?,
            Some(MenuCommand::ReadFile) => read_file(converter, &mut lines).await?,
            Some(MenuCommand::Exit) => {
                println!("Terima kasih telah menggunakan program ini!");
                break;
            }
            None => println!("Opsi tidak valid. Coba lagi."),
        }
    }
    Ok(())
}

async fn manual_input(converter: &Converter, lines: &mut StdinLines) -> Result<()> {
    println!("\n[Masukkan teks AI (ketik '{}' di baris baru untuk selesai)]", menu::INPUT_SENTINEL);
    let mut collected = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if menu::is_sentinel(&line) {
            break;
        }
        collected.push(line);
    }
    let text = collected.join("\n");
    if text.trim().is_empty() {
        return Ok(());
    }

    let report = converter.convert("manual", &text);
    println!("\n{}", report.render_session(Some(&text)));

    let answer = prompt(lines, "\nSimpan hasil ke file? (y/n): ").await?.unwrap_or_default();
    if menu::is_yes(&answer) {
        let name = prompt(lines, "Nama file (tanpa .txt): ").await?.unwrap_or_default();
        match output::write_comparison(Path::new("."), &name, &text, &report.converted_text).await {
            Ok(path) => println!("✓ Tersimpan ke {}", path.display()),
            Err(e) => println!("✗ Error: {e}"),
        }
    }
    Ok(())
}

async fn read_file(converter: &Converter, lines: &mut StdinLines) -> Result<()> {
    let path = prompt(lines, "Masukkan path file: ").await?.unwrap_or_default();
    let path = PathBuf::from(path.trim());

    let text = match reader::read_text_file(&path).await {
        Ok(text) => text,
        Err(InputError::NotFound { path }) => {
            println!("✗ File tidak ditemukan: {}", path.display());
            return Ok(());
        }
        Err(e) => {
            println!("✗ Error: {e}");
            return Ok(());
        }
    };

    let report = converter.convert(&path.display().to_string(), &text);
    println!("\n{}", report.render_session(None));

    let answer = prompt(lines, "\nSimpan hasil ke file? (y/n): ").await?.unwrap_or_default();
    if menu::is_yes(&answer) {
        let target = generate_output_path(&path);
        match output::write_converted_text(&target, &report.converted_text).await {
            Ok(path) => println!("✓ Tersimpan ke {}", path.display()),
            Err(e) => println!("✗ Error: {e}"),
        }
    }
    Ok(())
}
