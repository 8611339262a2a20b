use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use clausecheck::config::{
    ReviewConfig, DEFAULT_EMBED_MODEL, DEFAULT_LLM_MODEL, DEFAULT_OLLAMA_URL,
};
use clausecheck::pipeline::checks::RuleBook;
use clausecheck::pipeline::jurisdiction::{JurisdictionDetector, OllamaClient};
use clausecheck::pipeline::processor::ReviewPipeline;
use clausecheck::pipeline::template_index::{OllamaEmbedder, TemplateIndex};

/// Review ADGM corporate documents against a template library.
#[derive(Debug, Parser)]
#[command(name = "clausecheck", version, about)]
struct Cli {
    /// Documents to review (.docx)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory holding the reference template documents
    #[arg(long, short = 't')]
    templates: PathBuf,

    /// Directory for the annotated reviewed_<name>.docx copies
    #[arg(long, short = 'o', default_value = "reviewed")]
    output: PathBuf,

    /// Path for the JSON summary report
    #[arg(long, default_value = "compliance_report.json")]
    report: PathBuf,

    /// Base URL of the Ollama server
    #[arg(long, default_value = DEFAULT_OLLAMA_URL)]
    ollama_url: String,

    /// Model used for the jurisdiction check
    #[arg(long, default_value = DEFAULT_LLM_MODEL)]
    llm_model: String,

    /// Model used for template-similarity embeddings
    #[arg(long, default_value = DEFAULT_EMBED_MODEL)]
    embed_model: String,

    /// Skip the model-based jurisdiction check entirely
    #[arg(long)]
    no_llm: bool,

    /// Leave a document unclassified when its best match scores below this
    #[arg(long)]
    min_similarity: Option<f32>,

    /// Governing jurisdiction every document is expected to name
    #[arg(long)]
    expected_jurisdiction: Option<String>,
}

fn main() -> ExitCode {
    clausecheck::init_tracing();
    let cli = Cli::parse();

    let mut config = ReviewConfig {
        min_similarity: cli.min_similarity,
        ..ReviewConfig::default()
    };
    if let Some(expected) = cli.expected_jurisdiction {
        config.expected_jurisdiction = expected;
    }

    let embedder = match OllamaEmbedder::new(&cli.ollama_url, &cli.embed_model, 120) {
        Ok(embedder) => embedder,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build embedding client");
            return ExitCode::FAILURE;
        }
    };

    let index = match TemplateIndex::build_from_dir(&cli.templates, &embedder) {
        Ok(index) => index,
        Err(e) => {
            tracing::error!(
                templates = %cli.templates.display(),
                error = %e,
                "Failed to build template index"
            );
            return ExitCode::FAILURE;
        }
    };

    let detector = if cli.no_llm {
        None
    } else {
        match OllamaClient::new(&cli.ollama_url, 300) {
            Ok(client) => Some(JurisdictionDetector::new(
                Box::new(client),
                &cli.llm_model,
                &config.expected_jurisdiction,
                config.common_wrong_jurisdictions.clone(),
            )),
            Err(e) => {
                tracing::error!(error = %e, "Failed to build Ollama client");
                return ExitCode::FAILURE;
            }
        }
    };

    let pipeline = ReviewPipeline::new(
        &index,
        &embedder,
        RuleBook::adgm_defaults(),
        detector.as_ref(),
        &config,
    );

    let report = pipeline.review_batch(&cli.files, &cli.output);

    let json = match report.to_pretty_json() {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize summary report");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = std::fs::write(&cli.report, &json) {
        tracing::error!(report = %cli.report.display(), error = %e, "Failed to write report");
        return ExitCode::FAILURE;
    }

    println!("{json}");
    tracing::info!(
        report = %cli.report.display(),
        reviewed = %cli.output.display(),
        issues = report.issues_found.len(),
        "Done"
    );
    ExitCode::SUCCESS
}
