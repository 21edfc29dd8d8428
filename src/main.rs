use matrix_sum::utils::error::ErrorSeverity;
use matrix_sum::utils::logger;
use matrix_sum::{MatrixSummer, SumError, SummerConfig, TokioScheduler};

const CONFIG_ENV: &str = "MATRIX_SUM_CONFIG";

fn load_config() -> Result<SummerConfig, SumError> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => SummerConfig::from_file(path),
        Err(_) => Ok(SummerConfig::default()),
    }
}

async fn run_demo() -> anyhow::Result<()> {
    let summer = MatrixSummer::new(TokioScheduler::current()?);

    let matrix = vec![
        vec![1.0, 2.0, 3.0],
        vec![4.0, 5.0, 6.0],
        vec![7.0, 8.0, 9.0],
    ];

    // 兩個計算同時進行，空矩陣會直接失敗
    let sum_1 = summer.sum_matrix(matrix);
    let sum_2 = summer.sum_matrix(vec![]);

    match sum_1.await {
        Ok(total) => println!("Result of sum 1: {}", total),
        Err(e) => eprintln!("Error in sum 1: {}", e),
    }

    match sum_2.await {
        Ok(total) => println!("Result of sum 2: {}", total),
        Err(e) => {
            tracing::warn!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("Caught error for sum 2: {}", e.user_friendly_message());
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            let exit_code = match e.severity() {
                ErrorSeverity::Critical => 3,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    };

    // 初始化日誌
    logger::init_logger(&config.logging);
    tracing::debug!("Config: {:?}", config);

    let runtime = config.runtime.build_runtime()?;
    runtime.block_on(run_demo())
}
