//! Remote search, journal loading and backend exports against an in-test HTTP responder.

use journal_scout::api::ApiClient;
use journal_scout::app::form::FormInputs;
use journal_scout::catalog::JournalDirectory;
use journal_scout::domain::{NoticeLevel, SearchQuery};
use journal_scout::export::{ExportEngine, ExportFormat, ExportOutcome, ExportSnapshot};
use journal_scout::search::{SearchExecutor, SearchPolicy};
use journal_scout::{initialize, Config, Event, SearchPolicyKind};

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Clone)]
struct Reply {
    status: &'static str,
    content_type: &'static str,
    extra_headers: Vec<String>,
    body: Vec<u8>,
}

impl Reply {
    fn json(body: &str) -> Self {
        Self {
            status: "200 OK",
            content_type: "application/json",
            extra_headers: vec![],
            body: body.as_bytes().to_vec(),
        }
    }

    fn file(content_type: &'static str, disposition: &str, body: &[u8]) -> Self {
        Self {
            status: "200 OK",
            content_type,
            extra_headers: vec![format!("Content-Disposition: {disposition}")],
            body: body.to_vec(),
        }
    }

    fn status(status: &'static str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            extra_headers: vec![],
            body: b"boom".to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
struct Recorded {
    route: String,
    content_type: String,
    body: String,
}

/// Minimal HTTP/1.1 responder: one request per connection, canned replies by route.
struct MockBackend {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    async fn start(routes: Vec<(&str, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/api", listener.local_addr().unwrap());
        let routes: Arc<HashMap<String, Reply>> = Arc::new(
            routes
                .into_iter()
                .map(|(route, reply)| (route.to_string(), reply))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    serve(stream, &routes, &recorded).await;
                });
            }
        });

        Self { base_url, requests }
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: &HashMap<String, Reply>,
    recorded: &Mutex<Vec<Recorded>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let header = |name: &str| {
        head.lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim().to_string())
    };
    let content_length: usize = header("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next().unwrap_or("").split_whitespace();
    let method = request_line.next().unwrap_or("");
    let path = request_line.next().unwrap_or("");
    let route = format!("{method} {path}");

    recorded.lock().unwrap().push(Recorded {
        route: route.clone(),
        content_type: header("content-type").unwrap_or_default(),
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    });

    let reply = routes
        .get(&route)
        .cloned()
        .unwrap_or_else(|| Reply::status("404 Not Found"));

    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        reply.status,
        reply.content_type,
        reply.body.len()
    );
    for extra in &reply.extra_headers {
        response.push_str(extra);
        response.push_str("\r\n");
    }
    response.push_str("\r\n");

    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.write_all(&reply.body).await;
    let _ = stream.shutdown().await;
}

fn record_json(id: &str, title: &str) -> String {
    format!(
        r#"{{"id":"{id}","titulo":"{title}","autores":"Silva, A.J.","revista":"Radiology",
            "data_publicacao":"2023-04-12","doi":"10.1148/{id}","url":"https://doi.org/10.1148/{id}",
            "fonte":"PubMed"}}"#
    )
}

fn query(limit: u32) -> SearchQuery {
    SearchQuery {
        keywords: "joelho".to_string(),
        author: None,
        period_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        period_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        journal_ids: vec![],
        limit,
    }
}

fn client(backend: &MockBackend) -> ApiClient {
    ApiClient::new(backend.base_url.clone(), Duration::from_secs(5)).unwrap()
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 2)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap()
}

async fn snapshot() -> ExportSnapshot {
    let executor = SearchExecutor::new(SearchPolicy::Simulated, Duration::ZERO, Some(3));
    let directory = JournalDirectory::fallback().unwrap();
    let outcome = executor.execute(&query(4), &directory).await.unwrap();
    ExportSnapshot::new(query(4), outcome.records)
}

#[tokio::test]
async fn remote_search_truncates_and_drops_duplicate_ids() {
    let body = format!(
        r#"{{"status":"ok","msg":"3 artigos encontrados","resultados":[{},{},{}]}}"#,
        record_json("a", "Joelho A"),
        record_json("a", "Joelho A repetido"),
        record_json("b", "Joelho B"),
    );
    let backend = MockBackend::start(vec![("POST /api/buscar", Reply::json(&body))]).await;
    let executor = SearchExecutor::new(SearchPolicy::Remote(client(&backend)), Duration::ZERO, None);

    let outcome = executor
        .execute(&query(5), &JournalDirectory::fallback().unwrap())
        .await
        .unwrap();

    assert!(!outcome.simulated);
    let ids: Vec<_> = outcome.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(outcome.records[0].title, "Joelho A");
    let notice = outcome.notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "3 artigos encontrados");

    let sent = &backend.requests()[0];
    assert!(sent.content_type.starts_with("application/json"));
    let body: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
    assert_eq!(body["palavras"], "joelho");
    assert_eq!(body["limite"], 5);
}

#[tokio::test]
async fn remote_search_respects_limit() {
    let body = format!(
        r#"{{"status":"ok","resultados":[{},{},{}]}}"#,
        record_json("a", "A"),
        record_json("b", "B"),
        record_json("c", "C"),
    );
    let backend = MockBackend::start(vec![("POST /api/buscar", Reply::json(&body))]).await;
    let executor = SearchExecutor::new(SearchPolicy::Remote(client(&backend)), Duration::ZERO, None);

    let outcome = executor
        .execute(&query(2), &JournalDirectory::fallback().unwrap())
        .await
        .unwrap();
    assert_eq!(outcome.records.len(), 2);
    assert!(outcome.notice.is_none());
}

#[tokio::test]
async fn backend_error_envelope_yields_empty_results() {
    let backend = MockBackend::start(vec![(
        "POST /api/buscar",
        Reply::json(r#"{"status":"erro","msg":"Fonte indisponível"}"#),
    )])
    .await;
    let executor = SearchExecutor::new(SearchPolicy::Remote(client(&backend)), Duration::ZERO, None);

    let outcome = executor
        .execute(&query(5), &JournalDirectory::fallback().unwrap())
        .await
        .unwrap();

    assert!(outcome.records.is_empty());
    assert!(!outcome.simulated);
    let notice = outcome.notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Fonte indisponível");
}

#[tokio::test]
async fn server_error_status_falls_back_to_simulated_results() {
    let backend =
        MockBackend::start(vec![("POST /api/buscar", Reply::status("500 Internal Server Error"))])
            .await;
    let executor = SearchExecutor::new(SearchPolicy::Remote(client(&backend)), Duration::ZERO, Some(1));

    let outcome = executor
        .execute(&query(7), &JournalDirectory::fallback().unwrap())
        .await
        .unwrap();

    assert!(outcome.simulated);
    assert_eq!(outcome.records.len(), 7);
    let notice = outcome.notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert!(notice.message.ends_with("Exibindo resultados simulados."));
}

#[tokio::test]
async fn journal_directory_comes_from_backend() {
    let journals = r#"[
        {"id":"rb","nome":"Radiologia Brasileira","issn":"0100-3984","especialidade":"Radiologia"},
        {"id":"ajr","nome":"AJR","issn":"0361-803X","especialidade":"Radiologia"},
        {"id":"rbo","nome":"Revista Brasileira de Ortopedia","especialidade":"Ortopedia"}
    ]"#;
    let backend = MockBackend::start(vec![("GET /api/revistas", Reply::json(journals))]).await;

    let (directory, warning) = JournalDirectory::load(&client(&backend)).await.unwrap();

    assert!(warning.is_none());
    assert!(!directory.is_fallback());
    let specialties: Vec<_> = directory.groups().iter().map(|g| g.specialty.as_str()).collect();
    assert_eq!(specialties, ["Ortopedia", "Radiologia"]);
    let radiology: Vec<_> = directory.groups()[1].journals.iter().map(|j| j.id.as_str()).collect();
    assert_eq!(radiology, ["ajr", "rb"]);
}

#[tokio::test]
async fn journal_directory_falls_back_on_server_error() {
    let backend =
        MockBackend::start(vec![("GET /api/revistas", Reply::status("503 Service Unavailable"))])
            .await;

    let (directory, warning) = JournalDirectory::load(&client(&backend)).await.unwrap();

    assert!(directory.is_fallback());
    assert_eq!(directory.len(), 5);
    assert!(warning.is_some());
}

#[tokio::test]
async fn pdf_export_uses_content_disposition_name() {
    let backend = MockBackend::start(vec![(
        "POST /api/exportar",
        Reply::file(
            "application/pdf",
            r#"attachment; filename="joelho_2024.pdf""#,
            b"%PDF-1.4 fake",
        ),
    )])
    .await;
    let engine = ExportEngine::new(client(&backend), false);

    let report = engine
        .export(ExportFormat::Pdf, &snapshot().await, now())
        .await
        .unwrap();

    let ExportOutcome::File(artifact) = report.outcome else {
        panic!("expected a file");
    };
    assert_eq!(artifact.filename, "joelho_2024.pdf");
    assert_eq!(artifact.bytes, b"%PDF-1.4 fake");
    assert_eq!(report.notice.message, "Exportação em PDF realizada com sucesso!");

    let sent: serde_json::Value = serde_json::from_str(&backend.requests()[0].body).unwrap();
    assert_eq!(sent["formato"], "pdf");
    assert_eq!(sent["busca"]["palavras"], "joelho");
    assert_eq!(sent["resultados"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn pdf_export_without_filename_gets_default_name() {
    let backend = MockBackend::start(vec![(
        "POST /api/exportar",
        Reply::file("application/pdf", "inline", b"%PDF"),
    )])
    .await;
    let engine = ExportEngine::new(client(&backend), false);

    let report = engine
        .export(ExportFormat::Pdf, &snapshot().await, now())
        .await
        .unwrap();
    match report.outcome {
        ExportOutcome::File(artifact) => assert_eq!(artifact.filename, "resultados.pdf"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn excel_export_decodes_extended_filename() {
    let backend = MockBackend::start(vec![(
        "POST /api/exportar",
        Reply::file(
            ExportFormat::Excel.mime(),
            "attachment; filename=\"resultados.xlsx\"; filename*=UTF-8''busca%20joelho%20%C3%BAnico.xlsx",
            b"PK fake",
        ),
    )])
    .await;
    let engine = ExportEngine::new(client(&backend), false);

    let report = engine
        .export(ExportFormat::Excel, &snapshot().await, now())
        .await
        .unwrap();
    match report.outcome {
        ExportOutcome::File(artifact) => assert_eq!(artifact.filename, "busca joelho único.xlsx"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn pdf_export_url_response_opens_url() {
    let backend = MockBackend::start(vec![(
        "POST /api/exportar",
        Reply::json(r#"{"status":"ok","url":"http://localhost:5000/arquivos/r.pdf"}"#),
    )])
    .await;
    let engine = ExportEngine::new(client(&backend), false);

    let report = engine
        .export(ExportFormat::Pdf, &snapshot().await, now())
        .await
        .unwrap();
    assert_eq!(
        report.outcome,
        ExportOutcome::OpenUrl("http://localhost:5000/arquivos/r.pdf".to_string())
    );
}

#[tokio::test]
async fn pdf_export_error_envelope_is_an_error() {
    let backend = MockBackend::start(vec![(
        "POST /api/exportar",
        Reply::json(r#"{"status":"erro","msg":"Gerador de PDF indisponível"}"#),
    )])
    .await;
    let engine = ExportEngine::new(client(&backend), false);

    let err = engine
        .export(ExportFormat::Pdf, &snapshot().await, now())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Gerador de PDF indisponível"));
}

#[tokio::test]
async fn legacy_pdf_endpoint_sends_form_fields() {
    let backend = MockBackend::start(vec![(
        "POST /api/exportar/pdf",
        Reply::file("application/pdf", "attachment; filename=legado.pdf", b"%PDF"),
    )])
    .await;
    let engine = ExportEngine::new(client(&backend), true);

    let report = engine
        .export(ExportFormat::Pdf, &snapshot().await, now())
        .await
        .unwrap();
    assert!(matches!(report.outcome, ExportOutcome::File(ref a) if a.filename == "legado.pdf"));

    let sent = &backend.requests()[0];
    assert_eq!(sent.route, "POST /api/exportar/pdf");
    assert!(sent.content_type.starts_with("application/x-www-form-urlencoded"));
    assert!(sent.body.contains("palavras=joelho"));
    assert!(sent.body.contains("periodo_inicio=2023-01-01"));
    assert!(sent.body.contains("resultados="));
}

#[tokio::test]
async fn excel_failure_degrades_to_csv() {
    let backend =
        MockBackend::start(vec![("POST /api/exportar", Reply::status("500 Internal Server Error"))])
            .await;
    let engine = ExportEngine::new(client(&backend), false);

    let report = engine
        .export(ExportFormat::Excel, &snapshot().await, now())
        .await
        .unwrap();

    assert_eq!(report.notice.level, NoticeLevel::Warning);
    match report.outcome {
        ExportOutcome::File(artifact) => {
            assert_eq!(artifact.filename, "resultados_joelho_2024-05-02.csv");
            assert!(String::from_utf8(artifact.bytes).unwrap().starts_with("Título,Autores"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn remote_session_end_to_end() {
    let journals = r#"[{"id":"ajr","nome":"AJR","especialidade":"Radiologia"}]"#;
    let results = format!(
        r#"{{"status":"ok","resultados":[{},{}]}}"#,
        record_json("r1", "Menisco"),
        record_json("r2", "Ligamento"),
    );
    let backend = MockBackend::start(vec![
        ("GET /api/revistas", Reply::json(journals)),
        ("POST /api/buscar", Reply::json(&results)),
    ])
    .await;

    let data_dir = tempfile::tempdir().unwrap();
    let config = Config {
        api_url: backend.base_url.clone(),
        search_policy: SearchPolicyKind::Remote,
        data_dir: Some(data_dir.path().display().to_string()),
        ..Config::default()
    };

    let mut session = initialize(&config).await.unwrap();
    assert_eq!(session.state.directory.len(), 1);

    let mut form = FormInputs::new(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    form.keywords = "joelho".to_string();
    session.dispatch(Event::SubmitSearch(form)).await.unwrap();
    session.settle().await.unwrap();

    let titles: Vec<_> = session.state.store.view().iter().map(|r| r.title.clone()).collect();
    assert_eq!(titles, ["Menisco", "Ligamento"]);
}
