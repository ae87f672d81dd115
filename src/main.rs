use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use scan_bundle::bundle::command::USER_FAILURE_MESSAGE;
use scan_bundle::bundle::scan;
use scan_bundle::{
    send_data, BridgeConfig, BundleError, FlatBundle, MemoryTransport, RecordMarshaller,
    SendDataRequest,
};

#[derive(Parser, Debug)]
#[clap(
    name = "scan-bundle",
    version,
    about = "Marshal scanned document records into host bundles and back."
)]
struct Cli {
    /// Bridge configuration file (JSON).
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a send-data request, encode it and print the delivered bundle.
    Send {
        request: PathBuf,
        /// Launch action received from the host. Sending is refused without it.
        #[clap(long)]
        action: Option<String>,
    },
    /// Decode a bundle (JSON object) back into a record.
    Decode { bundle: PathBuf },
    /// Derive a send-data request from a recognizer result.
    Extract { scan: PathBuf },
}

fn main() {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let config = match &cli.config {
        Some(path) => match BridgeConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ERROR: Failed to load configuration");
                eprintln!("  {}", e);
                process::exit(2);
            }
        },
        None => BridgeConfig::default(),
    };

    let outcome = match cli.command {
        Commands::Send { request, action } => run_send(&config, &request, action.as_deref()),
        Commands::Decode { bundle } => run_decode(&config, &bundle),
        Commands::Extract { scan } => run_extract(&scan),
    };

    if let Err(e) = outcome {
        match &e {
            BundleError::MissingRequiredParameters(_) => eprintln!("ERROR: {}", e),
            _ => {
                eprintln!("{}", USER_FAILURE_MESSAGE);
                eprintln!("  {}", e);
            }
        }
        process::exit(1);
    }
}

fn run_send(config: &BridgeConfig, path: &Path, action: Option<&str>) -> scan_bundle::Result<()> {
    if let Err(e) = config.launch_guard().require(action) {
        eprintln!("Please launch this application from the data-collection app.");
        eprintln!("  {}", e);
        process::exit(3);
    }

    let request: SendDataRequest = serde_json::from_str(&fs::read_to_string(path)?)?;
    let marshaller = RecordMarshaller::new(config.marshal_options()?);
    let store = config.blob_store();
    let mut transport = MemoryTransport::new();

    let ack = send_data(request, &store, &marshaller, &mut transport)?;

    if let Some(envelope) = transport.last() {
        println!("{}", serde_json::to_string_pretty(&envelope.bundle)?);
        for attachment in &envelope.attachments {
            println!("attachment: {}", attachment);
        }
    }
    println!("{}", ack);
    Ok(())
}

fn run_decode(config: &BridgeConfig, path: &Path) -> scan_bundle::Result<()> {
    let bundle: FlatBundle = serde_json::from_str(&fs::read_to_string(path)?)?;
    let marshaller = RecordMarshaller::new(config.marshal_options()?);
    let record = marshaller.decode_with_dependents(&bundle);
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn run_extract(path: &Path) -> scan_bundle::Result<()> {
    let result: serde_json::Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    match scan::extract(&result) {
        Some(request) => println!("{}", serde_json::to_string_pretty(&request)?),
        None => eprintln!("Card not supported or scanning was canceled"),
    }
    Ok(())
}
