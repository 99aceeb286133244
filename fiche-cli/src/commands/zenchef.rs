use anyhow::bail;
use uuid::Uuid;

use shared::models::{ZenchefSettings, ZenchefSyncRequest, ZenchefSyncResult};
use shared::util::today;

use super::{Context, Explain};
use crate::cli::ZenchefCommand;

pub async fn run(command: ZenchefCommand, ctx: &Context) -> anyhow::Result<()> {
    match command {
        ZenchefCommand::Settings => {
            let settings = ctx.api.zenchef_settings().await.explain()?;
            println!("token:      {}", mask(settings.api_token.as_deref()));
            println!("restaurant: {}", settings.restaurant_id.as_deref().unwrap_or("-"));
        }
        ZenchefCommand::Configure { token, restaurant } => {
            let current = ctx.api.zenchef_settings().await.explain()?;
            let settings = ZenchefSettings {
                api_token: token.or(current.api_token),
                restaurant_id: restaurant.or(current.restaurant_id),
            };
            ctx.api.update_zenchef_settings(&settings).await.explain()?;
            println!("saved");
        }
        ZenchefCommand::Sync { from, to, key } => {
            let settings = ctx.api.zenchef_settings().await.explain()?;
            if !settings.is_complete() {
                bail!("Zenchef settings missing: configure a token and a restaurant id first");
            }
            let from_date = from.unwrap_or_else(today);
            let window = ZenchefSyncRequest {
                from_date,
                to_date: to.unwrap_or(from_date),
            };
            if window.to_date < window.from_date {
                bail!("--to is before --from");
            }
            let key = key.unwrap_or_else(|| Uuid::new_v4().to_string());
            let result = ctx.api.sync_zenchef_with_key(&window, &key).await.explain()?;
            print!("{}", render_result(&result, &key));
        }
    }
    Ok(())
}

/// Keep the last 4 characters of a secret
fn mask(secret: Option<&str>) -> String {
    match secret.map(str::trim).filter(|s| !s.is_empty()) {
        None => "-".to_string(),
        Some(s) => {
            let chars: Vec<char> = s.chars().collect();
            let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
            format!("****{tail}")
        }
    }
}

fn render_result(result: &ZenchefSyncResult, key: &str) -> String {
    let mut out = if result.idempotent {
        format!("already synced with key {key}\n")
    } else {
        format!("{} reservation(s) imported (key {key})\n", result.count)
    };
    for row in &result.created {
        out.push_str(&format!(
            "  {}  {} {}  {} ({} pax)\n",
            row.id,
            row.service_date,
            row.arrival_time.get(..5).unwrap_or(&row.arrival_time),
            row.client_name,
            row.pax
        ));
    }
    out
}
