use cff_model::utils::{logger, validation::Validate};
use cff_model::{app, CffError, CliConfig};
use clap::Parser;

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match app::commands::run(&config) {
        Ok(output) => {
            println!("{}", output.trim_end());
        }
        Err(e) => {
            tracing::error!("❌ Command failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());

            // 依錯誤類型決定退出碼
            let exit_code = match e {
                CffError::UnsupportedField { .. } | CffError::DateParse { .. } => 2,
                CffError::IoError(_) => 3,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}
