pub mod account;
pub mod dashboard;
pub mod records;

use anyhow::bail;
use schoolhub_auth::SessionManager;
use schoolhub_cache::{CacheConfig, FetchPolicy, QueryCache};
use schoolhub_client::ApiClient;
use schoolhub_config::{ApiConfig, SessionConfig};
use schoolhub_store::{Effect, EffectReceiver, ToastKind};
use tracing::debug;

/// Builds the client from the environment and restores any saved session.
pub fn connect() -> anyhow::Result<ApiClient> {
    let sessions = SessionManager::from_config(&SessionConfig::from_env());
    if sessions.restore().is_some() {
        debug!("Restored saved session");
    }
    let cache = QueryCache::new(CacheConfig::from_env().stale_time());
    Ok(ApiClient::new(ApiConfig::from_env(), sessions, cache)?)
}

pub fn require_session(client: &ApiClient) -> anyhow::Result<()> {
    if !client.sessions().is_authenticated() {
        bail!("Not logged in. Run `schoolhub login` first.");
    }
    Ok(())
}

/// Prints queued toasts. Error toasts repeat the error the command returns,
/// which `main` reports, so they are skipped here.
pub fn print_effects(effects: &mut EffectReceiver) {
    for effect in effects.drain() {
        if let Effect::ShowToast(toast) = effect {
            match toast.kind {
                ToastKind::Success => println!("✅ {}", toast.message),
                ToastKind::Info => println!("ℹ️  {}", toast.message),
                ToastKind::Error => {}
            }
        }
    }
}

pub fn policy(refresh: bool) -> FetchPolicy {
    if refresh {
        FetchPolicy::NetworkOnly
    } else {
        FetchPolicy::CacheFirst
    }
}
