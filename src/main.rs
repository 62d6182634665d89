use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use skyplan::api::InstanceQuery;
use skyplan::canvas::render_canvas;
use skyplan::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use skyplan::document::{read_document, write_document, Document};
use skyplan::models::{AppState, InstancePatch};
use skyplan::routes::build_router;
use skyplan::services::{run_instance_query, INSTANCE_QUERY_CB};

fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);
    let client = match reqwest::Client::builder()
        .user_agent(format!("skyplan/{}", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", yansi::Paint::red("Failed to create HTTP client"), e);
            process::exit(1);
        }
    };
    AppState::new(config::get_api_base_url(), client)
}

async fn load_or_exit(path: &Path) -> Document {
    match read_document(path).await {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{} {}: {}", yansi::Paint::red("Failed to read document"), path.display(), e);
            process::exit(1);
        }
    }
}

async fn save_or_exit(path: &Path, document: &Document) {
    if let Err(e) = write_document(path, document).await {
        eprintln!("{} {}: {}", yansi::Paint::red("Failed to write document"), path.display(), e);
        process::exit(1);
    }
}

async fn start_server(state: AppState, host: &str, port: u16) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let app = build_router(state);
    tracing::info!(%addr, "Starting skyplan server");
    println!("{} {}", yansi::Paint::new("Diagram server running on").green(), yansi::Paint::new(format!("http://{}", addr)).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!("{}: {}\n{}", yansi::Paint::new(format!("Failed to bind to {}", addr)).red(), e, yansi::Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow());
            process::exit(1);
        }
    }
}

fn print_instances(document: &Document) {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table.set_header(vec!["ID", "Name", "Shape", "Subnet", "Volumes", "VNICs"]);
    for instance in &document.instances {
        let subnet = document
            .get_subnet(&instance.subnet_id)
            .map(|s| s.display_name.clone())
            .unwrap_or_else(|| instance.subnet_id.clone());
        table.add_row(vec![
            instance.id.clone(),
            instance.display_name.clone(),
            instance.shape.clone(),
            subnet,
            instance.block_storage_volume_ids.len().to_string(),
            instance.subnet_ids.len().to_string(),
        ]);
    }
    println!("\n{table}\n");
}

#[derive(Parser)]
#[command(
    name = "skyplan",
    author,
    version,
    about = "Cloud architecture diagram editor backend",
    long_about = r#"skyplan — design cloud architecture diagrams and keep them in step with what is deployed.

The server exposes the diagram document, canvas rendering, property sheets and backend queries over HTTP. The other commands work directly on a document file.

Examples:
  1) Serve a document:
      skyplan serve --document diagram.json
  2) Render a document to SVG:
      skyplan render diagram.json --output diagram.svg
  3) Import instances from the backend:
      skyplan query diagram.json --compartment-id ocid1.compartment.oc1..xyz
"#,
    after_help = "Use `skyplan <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Document loaded into the default region at startup
        #[arg(long)]
        document: Option<PathBuf>,
    },
    /// Validate configuration (env vars / backend URL)
    #[command(about = "Validate configuration", long_about = "Print the resolved configuration and check that the document file, if present, parses.")]
    CheckConfig { env_file: Option<String> },
    /// Render a document to SVG
    Render {
        document: PathBuf,
        /// Output file; stdout when omitted
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// List the instances in a document
    List { document: PathBuf },
    /// Query the backend for instances and merge them into a document
    #[command(about = "Import instances from the backend", long_about = "Issue one instance listing request filtered by compartment (and optionally subnet), merge the results into the document and save it. Records with an id already in the document are updated in place.")]
    Query {
        document: PathBuf,
        #[arg(long)]
        compartment_id: String,
        #[arg(long)]
        subnet_id: Option<String>,
        /// Region key; defaults to SKYPLAN_REGION
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Add an instance to a subnet
    AddInstance {
        document: PathBuf,
        /// Subnet to drop the instance onto
        #[arg(long)]
        subnet_id: String,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        shape: Option<String>,
    },
    /// Delete an instance, removing it from any load balancer
    DeleteInstance { document: PathBuf, instance_id: String },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        skyplan::api::set_silent(true);
    }

    let Some(command) = cli.command else {
        let state = build_state_from_env(None);
        start_server(state, DEFAULT_HOST, DEFAULT_PORT).await;
        return;
    };

    match command {
        Commands::Serve { host, port, env_file, document } => {
            let state = build_state_from_env(env_file.as_deref());
            let path = document.unwrap_or_else(config::get_document_path);
            let doc = load_or_exit(&path).await;
            let region = config::get_default_region();
            tracing::info!(path = %path.display(), %region, instances = doc.instances.len(), "Loaded document");
            state.regions.insert(&region, doc);
            start_server(state, &host, port).await;
        }
        Commands::CheckConfig { env_file } => {
            config::load_env_file(env_file.as_deref());
            let path = config::get_document_path();
            println!("{} {}", yansi::Paint::new("Backend:").bold(), config::get_api_base_url());
            println!("{} {}", yansi::Paint::new("Document:").bold(), path.display());
            println!("{} {}", yansi::Paint::new("Region:").bold(), config::get_default_region());
            match read_document(&path).await {
                Ok(doc) => {
                    println!("{} ({} instances)", yansi::Paint::new("Configuration looks valid").green(), doc.instances.len());
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Document could not be read").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Render { document, output } => {
            let doc = load_or_exit(&document).await;
            let canvas = render_canvas(&doc, &config::LayoutConfig::default());
            let svg = match canvas.to_svg() {
                Ok(svg) => svg,
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::red("Failed to render canvas"), e);
                    process::exit(1);
                }
            };
            match output {
                Some(path) => {
                    if let Err(e) = tokio::fs::write(&path, svg).await {
                        eprintln!("{} {}: {}", yansi::Paint::red("Failed to write"), path.display(), e);
                        process::exit(1);
                    }
                    println!("{} {}", yansi::Paint::new("Canvas written to").green(), path.display());
                }
                None => println!("{}", svg),
            }
        }
        Commands::List { document } => {
            let doc = load_or_exit(&document).await;
            print_instances(&doc);
        }
        Commands::Query { document, compartment_id, subnet_id, region, env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            let region = region.unwrap_or_else(config::get_default_region);
            state.regions.insert(&region, load_or_exit(&document).await);

            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
                spinner.set_style(style);
            }
            spinner.set_message("Querying instances");
            spinner.enable_steady_tick(Duration::from_millis(120));

            let query = InstanceQuery { compartment_id, subnet_id };
            let store = state.document(&region);
            let before = store.read(|doc| doc.instances.len());
            let revision = store.revision();
            run_instance_query(&state, &region, query).await;
            spinner.finish_and_clear();

            // A failed query leaves the document untouched.
            if store.revision() == revision {
                eprintln!("{}", yansi::Paint::new("Instance query failed; document unchanged").red());
                process::exit(1);
            }
            let doc = store.snapshot();
            save_or_exit(&document, &doc).await;
            println!(
                "{} {} ({} new, query {})",
                yansi::Paint::new("Instances in document:").green(),
                doc.instances.len(),
                doc.instances.len().saturating_sub(before),
                if state.progress.is_checked(INSTANCE_QUERY_CB) { "complete" } else { "pending" }
            );
            print_instances(&doc);
        }
        Commands::AddInstance { document, subnet_id, display_name, shape } => {
            let mut doc = load_or_exit(&document).await;
            let patch = InstancePatch {
                display_name,
                shape,
                ..InstancePatch::default()
            };
            match doc.drop_instance(&subnet_id, patch) {
                Ok(id) => {
                    save_or_exit(&document, &doc).await;
                    println!("{} {}", yansi::Paint::new("Instance added:").green(), id);
                }
                Err(e) => {
                    eprintln!("{}", yansi::Paint::new(e.to_string()).red());
                    process::exit(1);
                }
            }
        }
        Commands::DeleteInstance { document, instance_id } => {
            let mut doc = load_or_exit(&document).await;
            match doc.delete_instance(&instance_id) {
                Ok(record) => {
                    save_or_exit(&document, &doc).await;
                    println!("{} '{}'", yansi::Paint::new("Deleted instance").green(), record.display_name);
                }
                Err(e) => {
                    eprintln!("{}", yansi::Paint::new(e.to_string()).red());
                    process::exit(1);
                }
            }
        }
    }
}
