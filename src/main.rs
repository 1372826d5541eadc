use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use labeldeck::api;
use labeldeck::assets::{AssetCategory, AssetLoader};
use labeldeck::models::{AppConfig, TemplateSummary};
use labeldeck::server;
use labeldeck::services::{CatalogBuilder, ExportTarget, SaveTemplate, TemplateStore, UsbExporter};

#[derive(Parser)]
#[command(name = "labeldeck")]
#[command(about = "Label template manager for thermal label printers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert an image to a 320x300 1-bit printer BMP
    Encode {
        /// Source image (PNG, JPEG, GIF, BMP, WebP)
        input: PathBuf,

        /// Output BMP file path
        #[arg(short, long)]
        output: PathBuf,

        /// Rows to remove from the top of the source
        #[arg(long, default_value_t = 0)]
        crop_top: u32,

        /// Luminance below this value prints black
        #[arg(long, default_value_t = 128)]
        threshold: u8,
    },
    /// Create or update a template in the working directory
    Save {
        /// Template code (letters and digits)
        code: String,

        /// Source image; omit to keep the current bitmap
        #[arg(short, long)]
        image: Option<PathBuf>,

        #[arg(short = 'x', long)]
        position_x: Option<u32>,

        #[arg(short = 'y', long)]
        position_y: Option<u32>,

        #[arg(long)]
        crop_top: Option<u32>,
    },
    /// Delete a template and its ledger entries
    Delete {
        code: String,
    },
    /// List templates in the working directory
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Regenerate the template catalog document
    Catalog,
    /// Copy templates and ledgers to a USB drive or directory
    Export {
        /// Destination directory
        #[arg(long, conflicts_with = "drive", required_unless_present = "drive")]
        dest: Option<PathBuf>,

        /// Drive letter (e.g. E)
        #[arg(long)]
        drive: Option<String>,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract Tera templates
        #[arg(long)]
        templates: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Labeldeck API",
        description = "Label template manager for thermal label printers",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_save_template,
        api::handle_delete_template,
        api::handle_list_templates,
        api::handle_generate_manual,
        api::handle_prepare_usb,
    ),
    components(schemas(
        api::SaveTemplateRequest,
        api::DeleteTemplateRequest,
        api::ActionResponse,
        api::GenerateManualResponse,
        api::PrepareUsbRequest,
        api::PrepareUsbResponse,
        TemplateSummary,
    )),
    tags(
        (name = "Templates", description = "Template bitmaps and printer ledgers"),
        (name = "Catalog", description = "Printable template catalog"),
        (name = "Export", description = "USB drive preparation")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Encode {
            input,
            output,
            crop_top,
            threshold,
        }) => run_encode_command(&input, &output, crop_top, threshold),
        Some(Commands::Save {
            code,
            image,
            position_x,
            position_y,
            crop_top,
        }) => run_save_command(code, image, position_x, position_y, crop_top),
        Some(Commands::Delete { code }) => run_delete_command(&code),
        Some(Commands::List { json }) => run_list_command(json),
        Some(Commands::Catalog) => run_catalog_command(),
        Some(Commands::Export { dest, drive }) => run_export_command(dest, drive),
        Some(Commands::Init {
            config,
            templates,
            all,
            force,
            list,
        }) => run_init_command(config, templates, all, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labeldeck=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Asset loader and config for commands working on the working directory
fn load_cli_config() -> (Arc<AssetLoader>, Arc<AppConfig>) {
    init_cli_tracing();
    let loader = Arc::new(AssetLoader::from_env());
    let config = Arc::new(AppConfig::load(&loader));
    (loader, config)
}

/// Convert an image file directly (no working directory involved)
fn run_encode_command(
    input: &Path,
    output: &Path,
    crop_top: u32,
    threshold: u8,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let source = image::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let bytes = mono_bmp::MonoEncoder::new()
        .threshold(threshold)
        .encode(&source, crop_top)?;

    std::fs::write(output, &bytes)?;
    println!("Encoded {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

fn run_save_command(
    code: String,
    image: Option<PathBuf>,
    position_x: Option<u32>,
    position_y: Option<u32>,
    crop_top: Option<u32>,
) -> anyhow::Result<()> {
    let (_, config) = load_cli_config();
    let store = TemplateStore::new(config);

    let image = match image {
        Some(path) => Some(
            std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };

    let report = store.save(SaveTemplate {
        code,
        image,
        position_x,
        position_y,
        crop_top,
    })?;

    println!(
        "Template {} saved at {}, {} (crop {})",
        report.code,
        report.placement.position_x,
        report.placement.position_y,
        report.placement.crop_top
    );
    if !report.program_ledger_updated || !report.autorun_ledger_updated {
        println!("  note: a ledger was missing or already up to date");
    }
    Ok(())
}

fn run_delete_command(code: &str) -> anyhow::Result<()> {
    let (_, config) = load_cli_config();
    let report = TemplateStore::new(config).delete(code)?;

    println!("Template {} deleted", report.code);
    if !report.bitmap_removed {
        println!("  note: no bitmap was present");
    }
    Ok(())
}

fn run_list_command(json: bool) -> anyhow::Result<()> {
    let (_, config) = load_cli_config();
    let templates = TemplateStore::new(config).list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&templates)?);
        return Ok(());
    }

    println!("{:<12} {:<20} {:>5} {:>5} {:>5}", "CODE", "CATEGORY", "X", "Y", "CROP");
    for t in &templates {
        println!(
            "{:<12} {:<20} {:>5} {:>5} {:>5}",
            t.code, t.category, t.position_x, t.position_y, t.crop_top
        );
    }
    println!("\n{} templates", templates.len());
    Ok(())
}

fn run_catalog_command() -> anyhow::Result<()> {
    let (loader, config) = load_cli_config();
    let report = CatalogBuilder::new(config.clone(), loader).generate()?;

    println!(
        "Catalog written to {} ({} templates in {} categories)",
        config.path(&report.file_path).display(),
        report.total_templates,
        report.categories
    );
    Ok(())
}

fn run_export_command(dest: Option<PathBuf>, drive: Option<String>) -> anyhow::Result<()> {
    let (_, config) = load_cli_config();

    let target = match dest {
        Some(dir) => ExportTarget::Directory(dir),
        None => ExportTarget::drive(drive.as_deref().unwrap_or_default())?,
    };
    let report = UsbExporter::new(config).export(&target)?;

    println!(
        "Exported to {}: {} copied, {} skipped",
        target.path().display(),
        report.copied,
        report.skipped
    );
    for error in &report.errors {
        eprintln!("  ! {error}");
    }
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    config: bool,
    templates: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Config:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        println!("\nTemplates:");
        for f in AssetLoader::list_embedded(AssetCategory::Templates) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || config {
        categories.push(AssetCategory::Config);
    }
    if all || templates {
        categories.push(AssetCategory::Templates);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --config or --templates");
        eprintln!("\nRun 'labeldeck init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let templates_dir = std::env::var("TEMPLATES_DIR").ok();
    let work_dir = std::env::var("WORK_DIR").ok();

    println!("Labeldeck v{VERSION}");
    println!("Label template manager for thermal label printers\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR     = {}",
        bind_addr.as_deref().unwrap_or("127.0.0.1:3000 (default)")
    );
    println!(
        "  WORK_DIR      = {}",
        work_dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  CONFIG_FILE   = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  TEMPLATES_DIR = {}",
        templates_dir.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("\nConfig:  {config_source}");

    let loader = AssetLoader::from_env();
    let config = AppConfig::load(&loader);
    let work = config.work_dir();
    println!("Workdir: {}", work.display());
    for ledger in [&config.program_ledger, &config.autorun_ledger] {
        let state = if config.path(ledger).exists() {
            "present"
        } else {
            "missing"
        };
        println!("  {ledger:<18} {state}");
    }
    match TemplateStore::new(Arc::new(config)).list() {
        Ok(templates) => println!("  {} templates", templates.len()),
        Err(e) => println!("  cannot scan: {e}"),
    }

    println!("\nCommands:");
    println!("  labeldeck serve     Start the HTTP server");
    println!("  labeldeck encode    Convert an image to a printer BMP");
    println!("  labeldeck save      Create or update a template");
    println!("  labeldeck delete    Delete a template");
    println!("  labeldeck list      List templates");
    println!("  labeldeck catalog   Regenerate the catalog document");
    println!("  labeldeck export    Copy templates to a USB drive");
    println!("  labeldeck init      Extract embedded assets");
    println!("\nRun 'labeldeck --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labeldeck=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    match asset_loader.seed_if_configured() {
        Ok(report) if !report.is_empty() => {
            tracing::info!(
                templates = report.templates_seeded.len(),
                config = report.config_seeded,
                "Seeded missing assets with embedded defaults"
            );
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to seed assets");
        }
        _ => {}
    }

    let config = AppConfig::load(&asset_loader);
    tracing::info!(work_dir = %config.work_dir().display(), "Working directory");

    let state = server::create_app_state(asset_loader, config);
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            println!("\nAddress {bind_addr} is already in use.");
            println!("The server is probably already running in the background.");
            println!("Open http://{bind_addr}/ to use it.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(addr = %bind_addr, "Labeldeck server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
