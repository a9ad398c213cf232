//! Deterministic-when-seeded generator of plausible search results.
//!
//! Used when no backend is configured and as the fallback when the backend
//! cannot be reached.

use crate::catalog::JournalDirectory;
use crate::domain::{Journal, ResultRecord, SearchError, SearchQuery, Source};
use chrono::Duration;

/// Upper bound on simulated records regardless of the query limit.
pub const MAX_SIMULATED: u32 = 50;

const TITLE_TEMPLATES: [&str; 8] = [
    "Avaliação de técnicas de imagem para diagnóstico de",
    "Estudo comparativo de métodos de tratamento para",
    "Análise retrospectiva de casos clínicos de",
    "Revisão sistemática sobre abordagens terapêuticas em",
    "Correlação entre achados radiológicos e desfechos clínicos em pacientes com",
    "Novas perspectivas no manejo de pacientes com",
    "Impacto da ressonância magnética no diagnóstico precoce de",
    "Eficácia da tomografia computadorizada na avaliação de",
];

const TITLE_TOPICS: [&str; 10] = [
    "lesões do joelho",
    "fraturas vertebrais",
    "osteoartrite",
    "lesões ligamentares",
    "tumores ósseos",
    "doenças degenerativas da coluna",
    "patologias do quadril",
    "lesões musculoesqueléticas",
    "artrite reumatoide",
    "doenças inflamatórias articulares",
];

const AUTHOR_POOL: [&str; 10] = [
    "Silva, A.J.",
    "Santos, M.R.",
    "Oliveira, C.T.",
    "Pereira, L.M.",
    "Costa, R.S.",
    "Almeida, F.G.",
    "Rodrigues, P.H.",
    "Ferreira, D.L.",
    "Martins, G.B.",
    "Souza, V.C.",
];

/// Generator of synthetic records.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    rng: fastrand::Rng,
}

impl SimulatedSource {
    /// Creates a generator; a seed makes the output reproducible.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self { rng }
    }

    /// Produces exactly `min(query.limit, 50)` records for `query`.
    ///
    /// Records are attributed to the selected journals (an unknown id falls
    /// back to the directory's first journal) or to any journal when the query
    /// has no journal filter. Each title embeds one of the query's keyword
    /// tokens; each date lies within the query period.
    ///
    /// # Errors
    ///
    /// [`SearchError::EmptyDirectory`] when the directory has no journals.
    pub fn generate(
        &mut self,
        query: &SearchQuery,
        directory: &JournalDirectory,
    ) -> Result<Vec<ResultRecord>, SearchError> {
        let _span = tracing::debug_span!("simulated_generate", limit = query.limit).entered();

        let all: Vec<&Journal> = directory.journals().collect();
        let fallback = *all.first().ok_or(SearchError::EmptyDirectory)?;

        let tokens = query.keyword_tokens();
        let span_days = (query.period_end - query.period_start).num_days().max(0);
        let count = query.limit.min(MAX_SIMULATED);

        let records = (0..count)
            .map(|i| {
                let journal = if query.has_journal_filter() {
                    let id = &query.journal_ids[self.rng.usize(..query.journal_ids.len())];
                    directory.find(id).unwrap_or(fallback)
                } else {
                    all[self.rng.usize(..all.len())]
                };
                self.record(i, query, journal, &tokens, span_days)
            })
            .collect();

        Ok(records)
    }

    fn record(
        &mut self,
        index: u32,
        query: &SearchQuery,
        journal: &Journal,
        tokens: &[String],
        span_days: i64,
    ) -> ResultRecord {
        let publication_date = query.period_start + Duration::days(self.rng.i64(0..=span_days));

        let keyword = if tokens.is_empty() {
            query.keywords.as_str()
        } else {
            tokens[self.rng.usize(..tokens.len())].as_str()
        };
        let title = format!(
            "{} {} em {}",
            self.pick(&TITLE_TEMPLATES),
            keyword,
            self.pick(&TITLE_TOPICS)
        );

        let doi = format!(
            "10.{}/{}.{}.{}",
            self.rng.u32(1000..10000),
            journal.id,
            self.rng.u32(2020..2026),
            self.rng.u32(10000..100000)
        );

        ResultRecord {
            id: format!("result-{index}"),
            title,
            authors: self.authors(query.author.as_deref()),
            journal_name: journal.name.clone(),
            publication_date,
            url: format!("https://doi.org/{doi}"),
            doi,
            source: Source::KNOWN[self.rng.usize(..Source::KNOWN.len())].clone(),
        }
    }

    fn authors(&mut self, requested: Option<&str>) -> String {
        let mut authors: Vec<&str> = Vec::with_capacity(5);
        let extra = match requested {
            Some(author) => {
                authors.push(author);
                self.rng.usize(1..=3)
            }
            None => self.rng.usize(2..=4),
        };

        for _ in 0..extra {
            let candidate = self.pick(&AUTHOR_POOL);
            if !authors.contains(&candidate) {
                authors.push(candidate);
            }
        }
        authors.join("; ")
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items[self.rng.usize(..items.len())]
    }
}
