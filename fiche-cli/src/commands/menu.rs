use shared::menu::{self, CourseCounts, MenuFilter, MenuSort, SortDirection};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use super::{Context, Explain};
use crate::cli::MenuCommand;

pub async fn run(command: MenuCommand, ctx: &Context) -> anyhow::Result<()> {
    match command {
        MenuCommand::List {
            query,
            course,
            active,
            sort,
            desc,
        } => {
            let items = ctx.api.list_menu_items().await.explain()?;
            let filter = MenuFilter {
                query,
                course,
                active,
            };
            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
            let sort = sort
                .map(|key| MenuSort::by(key.into(), direction))
                .unwrap_or_default();

            for item in menu::apply(&items, &filter, &sort) {
                println!("{}", render_item(&item));
            }
            println!("{}", render_counts(&CourseCounts::of(&items)));
        }
        MenuCommand::Add {
            name,
            course,
            inactive,
        } => {
            let created = ctx
                .api
                .create_menu_item(&MenuItemCreate {
                    name: name.trim().to_string(),
                    course,
                    active: !inactive,
                })
                .await
                .explain()?;
            println!("{}", render_item(&created));
        }
        MenuCommand::Toggle { id } => {
            let item = ctx.api.get_menu_item(id).await.explain()?;
            let updated = ctx
                .api
                .update_menu_item(id, &MenuItemUpdate::toggle_active(&item))
                .await
                .explain()?;
            println!("{}", render_item(&updated));
        }
        MenuCommand::Delete { id } => {
            ctx.api.delete_menu_item(id).await.explain()?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

fn render_item(item: &MenuItem) -> String {
    let state = if item.active { "actif" } else { "inactif" };
    format!("{}  {:<8} {:<8} {}", item.id, item.course.as_str(), state, item.name)
}

fn render_counts(counts: &CourseCounts) -> String {
    format!(
        "{} plats au total: {} entrée(s), {} plat(s), {} dessert(s)",
        counts.total, counts.entree, counts.plat, counts.dessert
    )
}
