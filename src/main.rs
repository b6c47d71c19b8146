use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, error, warn};

use courseware_state::config::AppConfig;
use courseware_state::runtime::lifetime;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv().ok();

    let start_datetime = chrono::Utc::now();

    // 初始化配置
    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        return std::process::ExitCode::FAILURE;
    }
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    warn!(
        "Starting courseware state provisioning...
        Project: {}
        Version: {}
        Environment: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    match lifetime::startup::prepare_startup().await {
        Ok(_context) => {
            debug!(
                "Provisioning completed in {} ms",
                chrono::Utc::now()
                    .signed_duration_since(start_datetime)
                    .num_milliseconds()
            );
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e.format_simple());
            #[cfg(debug_assertions)]
            eprintln!("{}", e.format_colored());
            std::process::ExitCode::FAILURE
        }
    }
}
