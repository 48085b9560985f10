//! CLI entrypoint for invoice-tools
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use invoice_tools_application::use_cases::invoice_tool::{
    ARG_ANALYZER_ID, ARG_CONTENT_TYPE, ARG_FILE_NAME, ARG_INVOICE_ID,
};
use invoice_tools_application::{
    AnalysisContext, AnalyzeInvoiceToolUseCase, AnalyzeInvoiceUseCase, ConfigResolver,
    ConfigSource, InvoiceStore, ToolExecutorPort,
};
use invoice_tools_domain::ToolCall;
use invoice_tools_domain::config::KEY_DATA_DIR;
use invoice_tools_domain::core::string::non_empty_trimmed;
use invoice_tools_infrastructure::tools::ANALYZE_INVOICE;
use invoice_tools_infrastructure::{
    ConfigLoader, ContentUnderstandingClientFactory, InvoiceToolExecutor, LayeredConfigSource,
    LocalInvoiceStore,
};
use invoice_tools_presentation::{
    Cli, Command, ConfigReport, EnvelopeFormatter, OutputFormat, OutputFormatter,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_DIR: &str = "data";

/// A tool call as given on the command line.
enum Invocation {
    Typed(ToolCall),
    Raw { tool: String, context: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // stdout carries only the envelope
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting invoice-tools");

    // === Configuration ===
    let source = if cli.no_config {
        ConfigLoader::load_env_only()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    let data_dir = cli.data_dir.clone().unwrap_or_else(|| {
        non_empty_trimmed(source.get(KEY_DATA_DIR).as_deref())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    });

    let invocation = match cli.command {
        Command::Config => {
            let config = ConfigResolver::resolve_from(&source)?;
            let report = ConfigReport::new(&config, &data_dir, source.origins());
            match cli.output {
                OutputFormat::Pretty => print!("{}", report.to_text()),
                OutputFormat::Compact => println!("{}", report.to_json()),
            }
            return Ok(ExitCode::SUCCESS);
        }
        Command::Analyze {
            file_name,
            invoice_id,
            analyzer_id,
            content_type,
        } => {
            let mut call = ToolCall::new(ANALYZE_INVOICE).with_arg(ARG_FILE_NAME, file_name);
            for (key, value) in [
                (ARG_INVOICE_ID, invoice_id),
                (ARG_ANALYZER_ID, analyzer_id),
                (ARG_CONTENT_TYPE, content_type),
            ] {
                if let Some(value) = value {
                    call = call.with_arg(key, value);
                }
            }
            Invocation::Typed(call)
        }
        Command::Call { tool, context } => Invocation::Raw { tool, context },
    };

    // === Dependency Injection ===
    let executor = build_executor(source, &data_dir)?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling analysis");
                cancel.cancel();
            }
        });
    }

    let response = match invocation {
        Invocation::Typed(call) => executor.execute(&call, &cancel).await,
        Invocation::Raw { tool, context } => {
            executor.execute_context(&tool, &context, &cancel).await
        }
    };

    println!("{}", EnvelopeFormatter::new(cli.output).format(&response));

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn build_executor(source: LayeredConfigSource, data_dir: &Path) -> Result<InvoiceToolExecutor> {
    let store: Arc<dyn InvoiceStore> = Arc::new(
        LocalInvoiceStore::new(data_dir)
            .with_context(|| format!("Data directory not found: {}", data_dir.display()))?,
    );
    info!("Data directory: {}", store.root().display());

    let factory = Arc::new(ContentUnderstandingClientFactory::new()?);
    let context = Arc::new(AnalysisContext::new(Arc::new(source), factory));
    let analyze = AnalyzeInvoiceUseCase::new(context, store.clone());

    Ok(InvoiceToolExecutor::new(AnalyzeInvoiceToolUseCase::new(
        store, analyze,
    )))
}
