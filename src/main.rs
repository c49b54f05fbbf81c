use ccb_api::config::{CliConfig, Command};
use ccb_api::utils::{logger, validation::Validate};
use ccb_api::{CcbClient, CcbError, ClientConfig, ErrorCategory, IndividualProfilesRequest};
use clap::Parser;
use serde::Serialize;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!("❌ {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤類別決定退出碼
        let exit_code = match e.category() {
            ErrorCategory::Configuration => 3,
            ErrorCategory::Io => 2,
            ErrorCategory::MalformedResponse => 4,
            ErrorCategory::Service => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: &CliConfig) -> Result<(), CcbError> {
    // 載入並驗證配置
    let config = ClientConfig::from_file(&cli.config)?;
    config.validate()?;

    let client = CcbClient::from_config(&config)?;
    tracing::info!("Using CCB API at {}", client.api_host());

    match &cli.command {
        Command::Profiles(args) => {
            let request = IndividualProfilesRequest::from(args);
            print_json(&client.get_individual_profiles(&request).await?.payload)
        }
        Command::CustomFields => print_json(&client.get_custom_field_labels().await?.payload),
        Command::Lookup { table } => print_json(&client.get_lookup_table(*table).await?.payload),
        Command::Campuses => print_json(&client.get_campus_list().await?.payload),
    }
}

fn print_json<T: Serialize>(payload: &T) -> Result<(), CcbError> {
    let json = serde_json::to_string_pretty(payload).map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}
