use anyhow::Result;

use aivisor::config;
use aivisor::runtime::run_server;
use aivisor::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    config::init_config();
    let app_config = config::get_config();

    // Guard must stay alive so buffered log writes are flushed on exit
    let _log_guard = init_logging(&app_config.logging);

    run_server().await
}
