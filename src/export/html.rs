//! HTML export: a single self-contained document with inline styles.

use super::{export_timestamp, period_label, ExportSnapshot, FOOTER};
use crate::app::results::SortColumn;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 1200px; margin: 0 auto; padding: 20px; }
h1 { color: #3a6ea8; border-bottom: 2px solid #3a6ea8; padding-bottom: 10px; }
.info { background: #f5f5f5; padding: 15px; border-radius: 5px; margin-bottom: 20px; }
table { width: 100%; border-collapse: collapse; margin-top: 20px; }
th, td { padding: 12px 15px; border: 1px solid #ddd; text-align: left; }
th { background-color: #3a6ea8; color: white; font-weight: bold; }
tr:nth-child(even) { background-color: #f2f2f2; }
tr:hover { background-color: #e9f0f7; }
a { color: #3a6ea8; text-decoration: none; }
a:hover { text-decoration: underline; }
.footer { margin-top: 30px; text-align: center; font-size: 0.9em; color: #666; }
";

/// Escapes text for use in element content and quoted attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Renders the snapshot as an HTML document.
#[must_use]
pub fn render(snapshot: &ExportSnapshot, now: chrono::NaiveDateTime) -> String {
    let query = &snapshot.query;
    let title = escape(&format!("Resultados da busca: {}", query.keywords));
    let mut html = String::new();

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
    ));

    html.push_str(&format!(
        "<div class=\"info\">\n\
         <p><strong>Data da exportação:</strong> {}</p>\n\
         <p><strong>Termos de busca:</strong> {}</p>\n\
         <p><strong>Período:</strong> {}</p>\n\
         <p><strong>Total de resultados:</strong> {}</p>\n\
         </div>\n",
        export_timestamp(now),
        escape(&query.keywords),
        period_label(query),
        snapshot.records.len()
    ));

    html.push_str("<table>\n<thead>\n<tr>");
    for column in SortColumn::ALL {
        html.push_str(&format!("<th>{}</th>", column.label()));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for r in &snapshot.records {
        html.push_str(&format!(
            "<tr><td><a href=\"{}\" target=\"_blank\">{}</a></td><td>{}</td><td>{}</td><td>{}</td>\
             <td><a href=\"{}\" target=\"_blank\">{}</a></td><td>{}</td></tr>\n",
            escape(&r.url),
            escape(&r.title),
            escape(&r.authors),
            escape(&r.journal_name),
            r.display_date(),
            escape(&r.doi_url()),
            escape(&r.doi),
            escape(r.source.as_str()),
        ));
    }

    html.push_str(&format!(
        "</tbody>\n</table>\n<div class=\"footer\">\n<p>{FOOTER}</p>\n</div>\n</body>\n</html>\n"
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResultRecord, SearchQuery, Source};
    use chrono::NaiveDate;

    fn snapshot(title: &str) -> ExportSnapshot {
        let query = SearchQuery {
            keywords: "joelho <b>".to_string(),
            author: None,
            period_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            journal_ids: vec![],
            limit: 1,
        };
        let record = ResultRecord {
            id: "result-0".to_string(),
            title: title.to_string(),
            authors: "Silva, A.J.".to_string(),
            journal_name: "AJR".to_string(),
            publication_date: NaiveDate::from_ymd_opt(2023, 2, 3).unwrap(),
            doi: "10.1/ajr.2023.1".to_string(),
            url: "https://doi.org/10.1/ajr.2023.1".to_string(),
            source: Source::Crossref,
        };
        ExportSnapshot::new(query, vec![record])
    }

    #[test]
    fn content_is_escaped() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(9, 7, 0)
            .unwrap();
        let html = render(&snapshot("<script>alert('x')</script> & co"), now);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
        assert!(html.contains("<title>Resultados da busca: joelho &lt;b&gt;</title>"));
        assert!(html.contains("<strong>Data da exportação:</strong> 05/01/2024 09:07"));
        assert!(html.contains("<strong>Período:</strong> 01/01/2023 a 31/12/2023"));
        assert!(html.contains("<strong>Total de resultados:</strong> 1"));
        assert!(html.contains("<td>03/02/2023</td>"));
        assert!(html.contains(FOOTER));
    }
}
