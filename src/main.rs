//! daily-report - applies migrations and reports store status

use tracing::info;

use daily_report::adapters::PostgresDatabase;
use daily_report::application::ReportService;
use daily_report::config::AppConfig;
use daily_report::ports::ReportSession;
use daily_report::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init_tracing(&config.logging)?;

    info!("Starting daily-report...");

    let database = PostgresDatabase::connect(&config.database).await?;
    database.ping().await?;

    let service = ReportService::from_config(&config.reports);
    let mut session = database.open_session().await?;

    let total = service.count_all(&mut session).await;
    session.close().await?;
    let total = total?;

    info!(
        reports = total,
        rows_per_page = service.rows_per_page(),
        "Report store ready"
    );

    Ok(())
}
