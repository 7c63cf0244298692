mod display;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rfpdesk_client::{HttpRfpService, RfpService};
use rfpdesk_core::{
    API_URL_ENV, ClientConfig, DEFAULT_API_URL, DEFAULT_COMPANY_URL, Document, ReferenceUrl,
};
use rfpdesk_workflow::{Applied, Controls, Session, WorkflowController};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rfpdesk", version, about = "Assess an RFP document and draft a response")]
struct Cli {
    /// Base address of the assessment/drafting service
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a document and print the recommendation
    Assess(AssessArgs),
    /// Assess a document, then draft a response if the assessment succeeds
    Run(RunArgs),
    /// Generate clarifying questions for a document
    Questions(KnowledgeArgs),
    /// Check that the service is reachable
    Health,
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// Document to submit (PDF, DOCX, or TXT)
    file: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

/// Commands that consult the company knowledge base.
#[derive(Args, Debug)]
struct KnowledgeArgs {
    #[command(flatten)]
    target: AssessArgs,

    /// Company knowledge base URL
    #[arg(long, default_value = DEFAULT_COMPANY_URL)]
    company_url: String,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    knowledge: KnowledgeArgs,

    /// Stop after the assessment
    #[arg(long)]
    no_draft: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("rfpdesk v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = ClientConfig::new(&cli.api_url);
    let service = HttpRfpService::from_config(&config);

    match cli.command {
        Command::Assess(args) => run(service, config, &args, false).await,
        Command::Run(args) => {
            let config = config.with_company_url(args.knowledge.company_url);
            run(service, config, &args.knowledge.target, !args.no_draft).await
        }
        Command::Questions(args) => questions(&service, &args).await,
        Command::Health => {
            let banner = service
                .health()
                .await
                .with_context(|| format!("service at {} is unreachable", service.base_url()))?;
            println!("{banner}");
            Ok(())
        }
    }
}

async fn load(path: &Path) -> anyhow::Result<Document> {
    Document::from_path(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

/// Drive the workflow: assess, then draft when the assessment gate allows it.
async fn run(
    service: HttpRfpService,
    config: ClientConfig,
    args: &AssessArgs,
    draft: bool,
) -> anyhow::Result<()> {
    let document = load(&args.file).await?;

    let controller = WorkflowController::with_reference_url(config.company_url);
    let mut session = Session::with_controller(Arc::new(service), controller);
    session.select_document(document);

    if let Some(doc) = session.state().document() {
        eprint!("{}", display::render_document(doc));
    }

    let assessed = session.assess().await;
    report_failures(&mut session);
    if assessed != Some(Applied::Succeeded) {
        anyhow::bail!("assessment did not complete");
    }
    if let Some(result) = session.state().assessment() {
        if args.json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            print!("{}", display::render_assessment(result));
        }
    }

    if !draft || !Controls::from_state(session.state()).draft_enabled {
        return Ok(());
    }

    eprintln!("Generating draft...");
    let drafted = session.draft().await;
    report_failures(&mut session);
    if drafted != Some(Applied::Succeeded) {
        anyhow::bail!("drafting did not complete");
    }
    if let Some(outcome) = session.state().draft() {
        if args.json {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        } else {
            print!("{}", display::render_draft(outcome));
        }
    }
    Ok(())
}

async fn questions(service: &HttpRfpService, args: &KnowledgeArgs) -> anyhow::Result<()> {
    let document = load(&args.target.file).await?;
    let company_url = ReferenceUrl::new(args.company_url.clone());
    let questions = service
        .questions(&document, &company_url)
        .await
        .context("generating clarifying questions")?;
    if args.target.json {
        println!("{}", serde_json::to_string_pretty(&questions)?);
    } else {
        print!("{}", display::render_questions(&questions));
    }
    Ok(())
}

fn report_failures<S: RfpService + 'static>(session: &mut Session<S>) {
    for notification in session.take_notifications() {
        eprintln!("{}", display::render_notification(&notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assess_takes_no_company_url() {
        let err = Cli::try_parse_from(["rfpdesk", "assess", "rfp.pdf", "--company-url", "x"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);

        let cli = Cli::try_parse_from(["rfpdesk", "assess", "rfp.pdf", "--json"]).unwrap();
        let Command::Assess(args) = cli.command else {
            panic!("expected assess");
        };
        assert_eq!(args.file, PathBuf::from("rfp.pdf"));
        assert!(args.json);
    }

    #[test]
    fn run_and_questions_take_company_url() {
        let cli = Cli::try_parse_from([
            "rfpdesk",
            "run",
            "rfp.pdf",
            "--company-url",
            "https://acme.com",
            "--no-draft",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.knowledge.company_url, "https://acme.com");
        assert!(args.no_draft);

        let cli = Cli::try_parse_from(["rfpdesk", "questions", "rfp.pdf"]).unwrap();
        let Command::Questions(args) = cli.command else {
            panic!("expected questions");
        };
        assert_eq!(args.company_url, DEFAULT_COMPANY_URL);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
