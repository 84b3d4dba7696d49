use std::io;
use std::process::ExitCode;

use clap::Parser;
use prompt_runner::{run, Config, ContextDocument, Error, GeminiProvider, Prompt};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "prompt-runner", version)]
#[command(about = "Ask Gemini for a camera recommendation", long_about = None)]
struct Args {
    #[arg(
        allow_hyphen_values = true,
        help = "Prompt to send instead of the built-in request"
    )]
    prompt: Option<String>,

    /// Extra arguments are accepted and ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<String>,
}

fn main() -> ExitCode {
    // Usage errors exit with 1; 2 means a missing API key.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Variables already set in the environment take precedence over .env
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("prompt_runner=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match try_main(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                Error::MissingCredential { .. } => eprintln!("ERROR: {e}"),
                _ => error!("Run failed: {e:?}"),
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn try_main(args: Args) -> Result<(), Error> {
    if !args.rest.is_empty() {
        debug!("Ignoring extra arguments: {:?}", args.rest);
    }

    let config = Config::from_env()?;
    let provider = GeminiProvider::from_config(&config)?;
    info!("Starting prompt-runner v{} with model {}", env!("CARGO_PKG_VERSION"), provider.model());

    config.ensure_work_dirs()?;

    let context = ContextDocument::load(config.context_path());
    let prompt = Prompt::from_arg(args.prompt).with_context(&context);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let mut stdout = io::stdout().lock();
        run(&provider, &prompt, &mut stdout).await
    })
}
