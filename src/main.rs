use clap::{Parser, Subcommand};
use pill_scanner::services::normalize::normalize;
use pill_scanner::services::FrameSource;
use pill_scanner::{
    AnalysisSession, CaptureController, CaptureFlow, ConfigManager, PillDetail, RecognitionClient,
    RecognitionState, ScreenSource, TextHintExtractor,
};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Photograph a pill and look up identifying information
#[derive(Parser, Debug)]
#[command(name = "pill-scanner")]
#[command(about = "Capture a pill photo and query the recognition service")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture a still from the bound frame source and analyze it
    Capture {
        /// Monitor index to bind (0 = primary)
        #[arg(short, long, default_value = "0")]
        monitor: usize,
        /// Keep the photo on disk even when analysis fails
        #[arg(long)]
        keep: bool,
    },
    /// Analyze an existing image file
    Analyze { path: PathBuf },
    /// Show the canned detail for a free-text query
    Query { text: String },
    /// Print the config file location
    ConfigPath,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    match args.command {
        Command::Capture { monitor, keep } => run_capture(monitor, keep).await,
        Command::Analyze { path } => run_analyze(&path).await,
        Command::Query { text } => {
            print_detail(&PillDetail::from_query(&text));
            Ok(())
        }
        Command::ConfigPath => {
            let manager = ConfigManager::new()?;
            println!("{}", manager.config_file_path().display());
            Ok(())
        }
    }
}

async fn run_capture(monitor: usize, keep: bool) -> Result<(), Box<dyn Error>> {
    let config = ConfigManager::new()?.load()?;

    let source: Arc<dyn FrameSource> = if monitor == 0 {
        Arc::new(ScreenSource::primary()?)
    } else {
        Arc::new(ScreenSource::with_monitor(monitor)?)
    };
    let controller = CaptureController::bind(source, config.storage.resolve_pictures_dir())?;

    let client = RecognitionClient::new(&config.server.base_url, config.server.timeout())?;
    let session = Arc::new(AnalysisSession::new(Arc::new(client)));
    let hints = TextHintExtractor::from_config(&config.hint);

    let mut flow = CaptureFlow::new(controller, session, hints);
    flow.take_photo().await?;
    if let Some(photo) = flow.photo() {
        tracing::info!(path = %photo.path.display(), taken_at = %photo.taken_at, "captured photo");
    }
    flow.analyze().await?;

    if flow.route().is_result() {
        if let Some(detail) = flow.exit() {
            print_detail(&detail);
        }
        Ok(())
    } else {
        let message = flow
            .error_message()
            .unwrap_or_else(|| "analysis did not complete".to_string());
        if keep {
            flow.mark_saved()?;
        }
        flow.retake().await?;
        Err(message.into())
    }
}

async fn run_analyze(path: &PathBuf) -> Result<(), Box<dyn Error>> {
    let config = ConfigManager::new()?.load()?;

    let image = normalize(path).ok_or("image could not be decoded")?;

    let client = RecognitionClient::new(&config.server.base_url, config.server.timeout())?;
    let session = AnalysisSession::new(Arc::new(client));
    let hints = TextHintExtractor::from_config(&config.hint);

    let (hint, state) = tokio::join!(hints.extract_hint(&image), session.analyze(path));

    match state {
        RecognitionState::Success { result } => {
            let hint = (!hint.trim().is_empty()).then_some(hint.as_str());
            print_detail(&result.to_detail(hint));
            Ok(())
        }
        RecognitionState::Error { message } => Err(message.into()),
        other => Err(format!("unexpected final state: {:?}", other).into()),
    }
}

fn print_detail(detail: &PillDetail) {
    println!("{}", detail.name);
    print_section("Efficacy", &detail.efficacy);
    print_section("Dosage", &detail.dosage);
    print_section("Ingredients", &detail.ingredients);
    print_section("Side effects", &detail.side_effects);
    print_section("Contraindications", &detail.contraindications);
    print_section("Interactions", &detail.interactions);
}

fn print_section(title: &str, content: &str) {
    println!("\n{}", title);
    for line in content.lines() {
        println!("  {}", line);
    }
}
