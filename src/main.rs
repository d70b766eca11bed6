use clap::Parser;
use speed_governor::utils::{logger, validation::Validate};
use speed_governor::{AppError, CliConfig, ScenarioReport, ScenarioRunner};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting speed-governor");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config) {
        Ok(report) if report.all_succeeded() => {
            tracing::info!("✅ All steps applied");
        }
        Ok(report) => {
            // 規則錯誤已逐步輸出
            let exit_code = report
                .first_error()
                .map(|e| AppError::Vehicle(e.clone()).exit_code())
                .unwrap_or(0);
            std::process::exit(exit_code);
        }
        Err(e) => {
            tracing::error!("❌ {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            report_error(&e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run(config: &CliConfig) -> Result<ScenarioReport, AppError> {
    config.validate()?;

    let scenario = config.load_scenario()?;
    let report = ScenarioRunner::new()
        .keep_going(config.keep_going)
        .run(&scenario)?;

    println!("Created vehicle {}", scenario.vehicle.plate);
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => println!("{}: ok", outcome.step),
            Err(e) => report_error(&AppError::Vehicle(e.clone())),
        }
    }
    println!("Number plate: {}", report.vehicle.number_plate());
    println!("Maximum speed: {}", report.vehicle.max_speed());
    println!("Current speed: {}", report.vehicle.current_speed());
    if report.vehicle.is_stopped() {
        println!("Vehicle is stopped");
    }
    match report.vehicle.speed_headroom() {
        headroom if headroom < 0 => println!(
            "Current speed is {} above the maximum speed",
            -headroom
        ),
        headroom => println!("Headroom: {}", headroom),
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report.vehicle)?);
    }

    Ok(report)
}

fn report_error(error: &AppError) {
    match error {
        AppError::Vehicle(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Value: {}", e.value());
        }
        other => {
            eprintln!("Unknown error: {}", other.user_friendly_message());
            eprintln!("💡 {}", other.recovery_suggestion());
        }
    }
}
