//! Interactive command language.
//!
//! Each line typed at the interactive prompt is interpreted against the
//! current [`FormInputs`]: form commands edit the inputs in place, the rest
//! become application [`Event`]s.
//!
//! | Command                          | Effect                                   |
//! |----------------------------------|------------------------------------------|
//! | `buscar [termos]`                | Set keywords (if given) and search       |
//! | `autor [nome]`                   | Set or clear the author filter           |
//! | `periodo <1m\|3m\|6m\|1y\|2y>`   | Apply a period preset                    |
//! | `periodo <inicio> <fim>`         | Custom period, `YYYY-MM-DD`              |
//! | `limite <n>`                     | Result limit                             |
//! | `revistas [ids…\|todas]`         | List journals, or select them            |
//! | `ordenar <coluna>`               | Sort by column (key, label or 1-6)       |
//! | `filtrar [texto]`                | Filter the table; no text clears it      |
//! | `exportar <formato>`             | html, csv, txt, pdf, excel               |
//! | `tema [claro\|escuro]`           | Toggle or set the color scheme           |
//! | `limpar`                         | Clear the results                        |
//! | `ajuda`                          | Show this list                           |
//! | `sair`                           | Quit                                     |

use super::form::{FormInputs, LimitChoice, PeriodPreset};
use super::results::SortColumn;
use super::Event;
use crate::domain::{ALL_JOURNALS, ALL_JOURNALS_LABEL};
use crate::export::ExportFormat;
use crate::ui::theme::ThemeMode;
use chrono::NaiveDate;

/// Help text listing the commands.
pub const HELP: &str = "\
buscar [termos]            realiza a busca (define as palavras-chave se informadas)
autor [nome]               filtra por autor; sem nome remove o filtro
periodo <1m|3m|6m|1y|2y>   período relativo a hoje
periodo <inicio> <fim>     período personalizado (AAAA-MM-DD)
limite <n>                 número máximo de resultados
revistas [ids...|todas]    lista as revistas ou seleciona
ordenar <coluna>           ordena por coluna (nome ou 1-6); repita para inverter
filtrar [texto]            filtra a tabela; sem texto limpa o filtro
exportar <formato>         html, csv, txt, pdf ou excel
tema [claro|escuro]        alterna ou define o tema
limpar                     limpa os resultados
sair                       encerra";

/// What a prompt line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Feed this event to the session.
    Dispatch(Event),
    /// The form was edited; nothing to dispatch.
    FormChanged,
    ShowJournals,
    Help,
    Quit,
    /// The line could not be understood; the message says why.
    Invalid(String),
}

/// Interprets one prompt line, editing `form` for form commands.
///
/// Returns `None` for a blank line.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use journal_scout::app::commands::{interpret, Command};
/// use journal_scout::app::form::FormInputs;
/// use journal_scout::Event;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let mut form = FormInputs::new(today);
///
/// let command = interpret("buscar fratura de fêmur", &mut form, today);
/// assert!(matches!(command, Some(Command::Dispatch(Event::SubmitSearch(_)))));
/// assert_eq!(form.keywords, "fratura de fêmur");
/// ```
pub fn interpret(line: &str, form: &mut FormInputs, today: NaiveDate) -> Option<Command> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    if verb.is_empty() {
        return None;
    }

    let command = match verb.to_lowercase().as_str() {
        "buscar" | "search" | "b" => {
            if !rest.is_empty() {
                form.keywords = rest.to_string();
            }
            Command::Dispatch(Event::SubmitSearch(form.clone()))
        }

        "autor" | "author" => {
            form.author = rest.to_string();
            Command::FormChanged
        }

        "periodo" | "período" | "period" => period(rest, form, today),

        "limite" | "limit" => {
            if rest.is_empty() {
                Command::Invalid("informe o limite de resultados".to_string())
            } else {
                form.limit = LimitChoice::Custom(rest.to_string());
                Command::FormChanged
            }
        }

        "revistas" | "journals" => {
            if rest.is_empty() {
                Command::ShowJournals
            } else {
                form.journals = rest.split_whitespace().map(String::from).collect();
                Command::FormChanged
            }
        }

        "ordenar" | "sort" | "o" => match rest.parse::<SortColumn>() {
            Ok(column) => Command::Dispatch(Event::SortBy(column)),
            Err(e) => Command::Invalid(e),
        },

        "filtrar" | "filter" | "f" => Command::Dispatch(Event::Filter(rest.to_string())),

        "exportar" | "export" | "e" => match rest.parse::<ExportFormat>() {
            Ok(format) => Command::Dispatch(Event::ExportRequested(format)),
            Err(e) => Command::Invalid(e.to_string()),
        },

        "tema" | "theme" => {
            if rest.is_empty() {
                Command::Dispatch(Event::ToggleTheme)
            } else {
                match rest.parse::<ThemeMode>() {
                    Ok(mode) => Command::Dispatch(Event::SetTheme(mode)),
                    Err(e) => Command::Invalid(e.to_string()),
                }
            }
        }

        "limpar" | "clear" => Command::Dispatch(Event::ClearResults),
        "ajuda" | "help" | "?" => Command::Help,
        "sair" | "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("comando desconhecido: {other} (digite 'ajuda')")),
    };

    Some(command)
}

fn period(rest: &str, form: &mut FormInputs, today: NaiveDate) -> Command {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    match parts.as_slice() {
        [preset] => match preset.parse::<PeriodPreset>() {
            Ok(preset) => {
                form.apply_preset(preset, today);
                Command::FormChanged
            }
            Err(e) => Command::Invalid(e),
        },
        [start, end] => {
            // Validated on submit, like typed date fields.
            form.period_start = (*start).to_string();
            form.period_end = (*end).to_string();
            Command::FormChanged
        }
        _ => Command::Invalid("uso: periodo <1m|3m|6m|1y|2y> ou periodo <inicio> <fim>".to_string()),
    }
}

/// One-line summary of the form for the prompt.
#[must_use]
pub fn form_summary(form: &FormInputs) -> String {
    let journals = if form.journals.is_empty() || form.journals.iter().any(|j| j == ALL_JOURNALS) {
        ALL_JOURNALS_LABEL.to_string()
    } else {
        form.journals.join(", ")
    };
    let author = if form.author.trim().is_empty() {
        "-"
    } else {
        form.author.trim()
    };

    format!(
        "Palavras: {} | Autor: {author} | Período: {} a {} | Limite: {} | Revistas: {journals}",
        if form.keywords.trim().is_empty() { "-" } else { form.keywords.trim() },
        form.period_start,
        form.period_end,
        form.limit.resolve(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn blank_line_is_ignored() {
        let mut form = FormInputs::new(today());
        assert_eq!(interpret("   ", &mut form, today()), None);
    }

    #[test]
    fn form_commands_edit_inputs() {
        let mut form = FormInputs::new(today());

        assert_eq!(interpret("autor Silva", &mut form, today()), Some(Command::FormChanged));
        assert_eq!(form.author, "Silva");

        interpret("periodo 3m", &mut form, today());
        assert_eq!(form.period_start, "2024-03-15");
        assert_eq!(form.period_end, "2024-06-15");

        interpret("periodo 2023-01-01 2023-12-31", &mut form, today());
        assert_eq!(form.period_start, "2023-01-01");

        interpret("limite 5", &mut form, today());
        assert_eq!(form.limit.resolve(), 5);

        interpret("revistas ajr jbjs", &mut form, today());
        assert_eq!(form.journals, vec!["ajr", "jbjs"]);
    }

    #[test]
    fn search_without_terms_keeps_keywords() {
        let mut form = FormInputs::new(today());
        form.keywords = "ombro".to_string();

        match interpret("buscar", &mut form, today()) {
            Some(Command::Dispatch(Event::SubmitSearch(submitted))) => {
                assert_eq!(submitted.keywords, "ombro");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn table_commands_become_events() {
        let mut form = FormInputs::new(today());
        assert_eq!(
            interpret("ordenar 4", &mut form, today()),
            Some(Command::Dispatch(Event::SortBy(SortColumn::PublicationDate)))
        );
        assert_eq!(
            interpret("exportar xlsx", &mut form, today()),
            Some(Command::Dispatch(Event::ExportRequested(ExportFormat::Excel)))
        );
        assert_eq!(
            interpret("filtrar", &mut form, today()),
            Some(Command::Dispatch(Event::Filter(String::new())))
        );
        assert_eq!(
            interpret("tema claro", &mut form, today()),
            Some(Command::Dispatch(Event::SetTheme(ThemeMode::Light)))
        );
    }

    #[test]
    fn bad_arguments_are_reported() {
        let mut form = FormInputs::new(today());
        assert!(matches!(interpret("exportar docx", &mut form, today()), Some(Command::Invalid(_))));
        assert!(matches!(interpret("ordenar 9", &mut form, today()), Some(Command::Invalid(_))));
        assert!(matches!(interpret("voar", &mut form, today()), Some(Command::Invalid(_))));
        assert_eq!(interpret("sair", &mut form, today()), Some(Command::Quit));
    }

    #[test]
    fn summary_shows_all_journals_label() {
        let form = FormInputs::new(today());
        let summary = form_summary(&form);
        assert!(summary.contains(ALL_JOURNALS_LABEL));
        assert!(summary.contains("Limite: 30"));
    }
}
