use super::{Context, Explain};
use crate::cli::PdfCommand;

pub async fn run(command: PdfCommand, ctx: &Context) -> anyhow::Result<()> {
    let (document, out) = match command {
        PdfCommand::Day { date, out } => (ctx.api.day_pdf(date).await.explain()?, out),
        PdfCommand::Sheet { id, out } => (ctx.api.reservation_pdf(id).await.explain()?, out),
    };
    let path = document.save_to(&out).await.explain()?;
    println!("{}", path.display());
    Ok(())
}
