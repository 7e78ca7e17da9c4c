use schoolhub_cache::FetchPolicy;
use schoolhub_client::ApiClient;
use schoolhub_client::api::ReportsApi;

use super::require_session;

pub async fn show(client: &ApiClient, policy: FetchPolicy) -> anyhow::Result<()> {
    require_session(client)?;
    let stats = ReportsApi::dashboard(client, policy).await?;

    let rows = stats.rows();
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    println!("📊 Dashboard\n");
    for (label, value) in rows {
        println!("   {label:<width$}  {value}");
    }
    Ok(())
}
