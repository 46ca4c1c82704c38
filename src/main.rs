use anyhow::{bail, Context, Result};
use ingredient_structurer::analyzer::CorpusAnalyzer;
use ingredient_structurer::config::{AppConfig, LogFormat};
use ingredient_structurer::pipeline::{analyze_jsonl, structure_jsonl};
use ingredient_structurer::report::{render_summary, write_report, CorpusReport};
use ingredient_structurer::structurer::Structurer;
use log::info;
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage:
  ingredient-structurer structure <recipes.jsonl> <structured.jsonl>
  ingredient-structurer analyze <structured.jsonl> [report.json]";

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_logging(config.log_format);

    let args: Vec<String> = env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["structure", input, output] => run_structure(&config, Path::new(input), Path::new(output)),
        ["analyze", input] => run_analyze(&config, Path::new(input), None),
        ["analyze", input, report] => run_analyze(&config, Path::new(input), Some(Path::new(report))),
        _ => {
            eprintln!("{USAGE}");
            bail!("Invalid arguments");
        }
    }
}

fn run_structure(config: &AppConfig, input: &Path, output: &Path) -> Result<()> {
    info!("Structuring recipes from {}", input.display());

    let reader = BufReader::new(
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?,
    );
    let writer = BufWriter::new(
        File::create(output).with_context(|| format!("Failed to create {}", output.display()))?,
    );

    let structurer = Structurer::with_config(config.structure.clone());
    let summary = structure_jsonl(reader, writer, &structurer)?;

    println!(
        "Structured {} recipes ({} skipped) into {}",
        summary.processed,
        summary.skipped,
        output.display()
    );
    Ok(())
}

fn run_analyze(config: &AppConfig, input: &Path, report_path: Option<&Path>) -> Result<()> {
    info!("Analyzing structured recipes from {}", input.display());

    let reader = BufReader::new(
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?,
    );
    let analyzer = CorpusAnalyzer::new(config.analysis.clone());
    let stats = analyze_jsonl(reader, &analyzer)?;

    print!("{}", render_summary(&stats, 5));

    if let Some(path) = report_path {
        let report = CorpusReport::new(&stats, config.report_locale);
        write_report(path, &report)?;
        println!("\nReport saved: {}", path.display());
    }

    Ok(())
}
