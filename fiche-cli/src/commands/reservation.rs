use anyhow::{Context as _, bail};
use uuid::Uuid;

use fiche_client::session::{SessionHost, SubmitAttempt};
use fiche_client::{Navigation, ReservationQuery};
use shared::draft::{ItemPatch, ReservationDraft};
use shared::ids::EditTarget;
use shared::models::{CourseType, DrinkFormula, Reservation};
use shared::util::today;

use super::{Context, Explain};
use crate::cli::{DishLine, DraftArgs, ReservationCommand};

pub async fn run(command: ReservationCommand, ctx: &Context) -> anyhow::Result<()> {
    match command {
        ReservationCommand::List { q, date } => {
            let rows = ctx
                .api
                .list_reservations(&ReservationQuery::new(q.as_deref(), date))
                .await
                .explain()?;
            print_rows(&rows);
        }
        ReservationCommand::Upcoming => {
            print_rows(&ctx.api.upcoming_reservations().await.explain()?);
        }
        ReservationCommand::Past { q } => {
            print_rows(&ctx.api.past_reservations(q.as_deref()).await.explain()?);
        }
        ReservationCommand::Show { id } => {
            let reservation = ctx.api.get_reservation(id).await.explain()?;
            print!("{}", render_sheet(&reservation));
        }
        ReservationCommand::Edit { id, date, draft } => {
            edit(ctx, &id, date.as_deref(), &draft).await?;
        }
        ReservationCommand::Duplicate { id } => {
            let copy = ctx.api.duplicate_reservation(id).await.explain()?;
            println!("{}", render_row(&copy));
        }
        ReservationCommand::Delete { id } => {
            ctx.api.delete_reservation(id).await.explain()?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

/// Drive one edit session: open, load, apply overrides, submit
async fn edit(ctx: &Context, raw_id: &str, date: Option<&str>, args: &DraftArgs) -> anyhow::Result<()> {
    let mut host = SessionHost::new();
    if let Some(load) = host.open(EditTarget::resolve(Some(raw_id), date)) {
        let response = load.send(&ctx.api).await;
        host.accept_loaded(response);
    }

    let session = host.active_mut().context("no open session")?;
    if let Some(message) = session.error() {
        bail!("{message}");
    }
    apply_draft_args(session.draft_mut(), args)?;

    let request = match host.submit(today()) {
        Some(SubmitAttempt::Ready(request)) => request,
        Some(SubmitAttempt::Invalid(report)) => {
            for message in report.messages() {
                eprintln!("  - {message}");
            }
            bail!("{} validation error(s)", report.error_count());
        }
        Some(SubmitAttempt::Ignored(phase)) => bail!("submit ignored while {phase:?}"),
        None => bail!("no open session"),
    };

    let response = request.send(&ctx.api).await;
    match host.accept_submitted(response) {
        Some(Navigation::OpenReservation(id)) => println!("created {id}"),
        Some(Navigation::BackToList) => println!("saved"),
        None => {
            let message = host
                .active()
                .and_then(|session| session.error())
                .unwrap_or(fiche_client::GENERIC_ERROR_MESSAGE);
            bail!("{message}");
        }
    }
    Ok(())
}

/// Apply command-line overrides to a draft
pub(crate) fn apply_draft_args(draft: &mut ReservationDraft, args: &DraftArgs) -> anyhow::Result<()> {
    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        *draft = serde_json::from_str(&text)
            .with_context(|| format!("invalid draft in {}", path.display()))?;
        draft.ensure_placeholders();
    }
    if let Some(client) = &args.client {
        draft.client_name = client.clone();
    }
    if let Some(date) = args.service_date {
        draft.service_date = Some(date);
    }
    if let Some(time) = &args.time {
        draft.arrival_time = time.clone();
    }
    if let Some(pax) = args.pax {
        draft.pax = pax;
    }
    if let Some(drink) = &args.drink {
        draft.drink_formula = DrinkFormula::from(drink.as_str());
    }
    if let Some(notes) = &args.notes {
        draft.notes = notes.clone();
    }
    if let Some(status) = args.status {
        draft.status = status.into();
    }
    if args.clear_items {
        draft.items.clear();
    }
    for line in &args.items {
        place_item(draft, line);
    }
    Ok(())
}

/// Fill the first blank row of the course, or append a row
fn place_item(draft: &mut ReservationDraft, line: &DishLine) {
    let blank = draft
        .items
        .iter()
        .position(|item| item.course == line.course && item.name.trim().is_empty());
    let index = blank.unwrap_or_else(|| draft.add_item());
    draft.update_item(
        index,
        ItemPatch {
            course: Some(line.course),
            name: Some(line.name.clone()),
            quantity: Some(line.quantity),
        },
    );
}

fn print_rows(rows: &[Reservation]) {
    if rows.is_empty() {
        println!("Aucune réservation");
        return;
    }
    for row in rows {
        println!("{}", render_row(row));
    }
}

/// `HH:MM` part of a stored time
fn short_time(time: &str) -> &str {
    time.get(..5).unwrap_or(time)
}

fn render_row(r: &Reservation) -> String {
    format!(
        "{}  {} {}  {:<24} {:>3} pax  {:<9} {}",
        r.id,
        r.service_date,
        short_time(&r.arrival_time),
        r.client_name,
        r.pax,
        r.status.as_str(),
        r.drink_formula
    )
}

fn render_sheet(r: &Reservation) -> String {
    let mut out = format!(
        "{}\n{} à {}, {} couverts\nBoissons: {}\nStatut: {}\n",
        r.client_name,
        r.service_date.format("%d/%m/%Y"),
        short_time(&r.arrival_time),
        r.pax,
        r.drink_formula,
        r.status
    );
    for course in CourseType::ALL {
        let dishes: Vec<_> = r.items.iter().filter(|item| item.course == course).collect();
        if dishes.is_empty() {
            continue;
        }
        out.push_str(&format!("{} ({}):\n", course, r.course_total(course)));
        for item in dishes {
            out.push_str(&format!("  {} x {}\n", item.quantity, item.name));
        }
    }
    if let Some(notes) = r.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        out.push_str(&format!("Notes: {notes}\n"));
    }
    out.push_str(&format!("Réf: {}\n", short_id(r.id)));
    out
}

fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}
