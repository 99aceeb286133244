use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use fiche_client::{DishSearchWorker, SearchInput, SearchResults};
use shared::models::CourseType;

use super::Context;

/// Feed stdin lines to the debounced search and print what comes back
pub async fn run(course: CourseType, ctx: &Context) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();
    let (worker, handle, mut results) = DishSearchWorker::new(
        Arc::new(ctx.api.clone()),
        ctx.config.search_debounce(),
        shutdown.clone(),
    );
    let task = tokio::spawn(worker.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_sent: Option<String> = None;
    let mut last_shown: Option<String> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(text) = line? else {
                    break;
                };
                last_sent = Some(text.clone());
                if !handle.input(SearchInput::new(0, course, text)).await {
                    break;
                }
            }
            Some(found) = results.recv() => {
                last_shown = Some(found.input.text.clone());
                print_results(&found);
            }
        }
    }

    // answer for the final text may still be pending
    if last_sent.is_some() && last_sent != last_shown {
        let wait = ctx.config.search_debounce() + Duration::from_secs(ctx.config.timeout);
        if let Ok(Some(found)) = tokio::time::timeout(wait, results.recv()).await {
            print_results(&found);
        }
    }

    shutdown.cancel();
    task.await?;
    Ok(())
}

fn print_results(found: &SearchResults) {
    let query = found.input.text.trim();
    let label = if query.is_empty() { "(défaut)" } else { query };
    println!("{label}:");
    if found.suggestions.is_empty() {
        println!("  aucun plat");
    }
    for suggestion in &found.suggestions {
        println!("  {} [{}]", suggestion.name, suggestion.course);
    }
}
