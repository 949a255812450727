use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use serde::Serialize;
use tracing::{error, info};

use prepdocs_lib::{AppConfig, IngestedDocument, IngestionUseCase, Page, Result};

#[derive(Serialize)]
struct PageRecord<'a> {
    file: &'a str,
    #[serde(flatten)]
    page: &'a Page,
}

fn open_output(config: &AppConfig) -> Result<Box<dyn Write>> {
    Ok(match &config.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn write_document(
    out: &mut dyn Write,
    document: &IngestedDocument,
    pretty: bool,
) -> Result<()> {
    for page in &document.pages {
        let record = PageRecord {
            file: &document.file_name,
            page,
        };
        if pretty {
            serde_json::to_writer_pretty(&mut *out, &record)?;
        } else {
            serde_json::to_writer(&mut *out, &record)?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Returns whether every input was ingested
async fn run(config: &AppConfig, paths: &[PathBuf]) -> Result<bool> {
    let use_case = IngestionUseCase::default();
    let mut out = open_output(config)?;

    let mut failures = 0usize;
    for (_path, result) in use_case.ingest_files(paths).await {
        match result {
            Ok(document) => write_document(out.as_mut(), &document, config.pretty)?,
            Err(_) => failures += 1,
        }
    }
    out.flush()?;

    info!(inputs = paths.len(), failures, "Ingestion finished");
    Ok(failures == 0)
}

#[tokio::main]
async fn main() -> ExitCode {
    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        eprintln!("usage: prepdocs <file>...");
        return ExitCode::from(2);
    }

    dotenvy::dotenv().ok();
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .with_writer(io::stderr)
        .try_init();

    match run(&config, &paths).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = %err, "Failed to write pages");
            ExitCode::FAILURE
        }
    }
}
