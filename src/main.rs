use card_sweep::adapters::export::ExportFormat;
use card_sweep::app::{self, report};
use card_sweep::utils::error::{ErrorSeverity, SweepError};
use card_sweep::utils::monitor::RunMonitor;
use card_sweep::utils::{logger, validation::Validate};
use card_sweep::CliConfig;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting card-sweep");

    let config = match args.resolve().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };
    tracing::debug!("CLI config: {:?}", config);

    let monitor = RunMonitor::new(config.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 Run monitoring enabled");
    }

    if config.list_sets {
        let catalog = app::load_sets(&config).await.unwrap_or_else(|e| exit_with(e));
        monitor.log_stats("Catalog loaded");
        print!("{}", report::render_sets(&catalog));
        return Ok(());
    }

    let state = app::run_sweep(&config, &monitor)
        .await
        .unwrap_or_else(|e| exit_with(e));
    print!("{}", report::render_state(&state));

    if let Some(path) = &config.output {
        let format = ExportFormat::parse(config.format.as_deref().unwrap_or("csv"))
            .unwrap_or_else(|e| exit_with(e));
        app::export_cards(&state, path, format).unwrap_or_else(|e| exit_with(e));
        println!("📁 Output saved to: {}", path);
    }

    if !state.failures().is_empty() {
        tracing::warn!("⚠️ {} set(s) failed; results are partial", state.failures().len());
        std::process::exit(2);
    }

    Ok(())
}

fn exit_with(e: SweepError) -> ! {
    tracing::error!(
        "❌ card-sweep failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
