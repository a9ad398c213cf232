//! Plain-text export.

use super::{export_timestamp, period_label, ExportSnapshot, FOOTER};

const RULE_WIDTH: usize = 80;

/// Renders the snapshot as a numbered plain-text listing.
#[must_use]
pub fn render(snapshot: &ExportSnapshot, now: chrono::NaiveDateTime) -> String {
    let query = &snapshot.query;
    let title = format!("Resultados da busca: {}", query.keywords);
    let mut text = String::new();

    text.push_str(&format!("{title}\n"));
    text.push_str(&format!("{}\n\n", "=".repeat(title.chars().count())));
    text.push_str(&format!("Data da exportação: {}\n", export_timestamp(now)));
    text.push_str(&format!("Termos de busca: {}\n", query.keywords));
    text.push_str(&format!("Período: {}\n", period_label(query)));
    text.push_str(&format!("Total de resultados: {}\n\n", snapshot.records.len()));
    text.push_str(&format!("{}\n\n", "=".repeat(RULE_WIDTH)));

    for (n, r) in snapshot.records.iter().enumerate() {
        text.push_str(&format!(
            "[{}] {}\nAutores: {}\nRevista: {}\nData: {}\nDOI: {}\nURL: {}\nFonte: {}\n",
            n + 1,
            r.title,
            r.authors,
            r.journal_name,
            r.display_date(),
            r.doi,
            r.url,
            r.source
        ));
        text.push_str(&format!("\n{}\n\n", "-".repeat(RULE_WIDTH)));
    }

    text.push_str(&format!("\n{FOOTER}\n"));
    text
}
