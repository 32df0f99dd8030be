//! VastraVaani — fashion AI platform server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use vastra_server::{build_router, AppState};

fn resolve_data_dir() -> PathBuf {
    std::env::var("VASTRA_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()));
            if let Some(dir) = exe_dir {
                let parent_data = dir.join("../data");
                if parent_data.exists() {
                    return parent_data;
                }
            }
            PathBuf::from("data")
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" | "help" => {
                println!("VastraVaani — fashion AI platform server");
                println!();
                println!("Usage: vastra [command]");
                println!();
                println!("Commands:");
                println!("  (none)    Start the server");
                println!("  help      Show this help message");
                println!();
                println!("Environment:");
                println!("  VASTRA_DATA_DIR, HOST, PORT, SECRET_KEY, CORS_ORIGINS, ADMIN_EMAILS,");
                println!("  GROQ_API_KEY, OPENAI_API_KEY, SERPAPI_API_KEY, APIFY_API_KEY,");
                println!("  HUGGINGFACE_API_KEY");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'vastra help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = vastra_core::VastraConfig::from_env(&data_dir)?;
    let addr = format!("{}:{}", config.host, config.port);

    let users = vastra_store::UserStore::open(&config.data_paths.users_db)
        .map_err(|e| anyhow::anyhow!("Failed to open user store: {}", e))?;
    info!(users = users.count().unwrap_or(0), "User store ready");

    let state = Arc::new(AppState::new(config, users)?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("VastraVaani server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
