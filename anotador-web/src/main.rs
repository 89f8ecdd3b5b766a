//! Servidor web Axum para anotação sentença a sentença e exportação do JSON final

use anotador_core::{corpus::demo_texts, AnnotationSession, DisplayState, Tag, TokenRecord};
use askama::Template;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Estado compartilhado da aplicação: uma única sessão de anotação.
///
/// A trava de escrita garante que cada ação da UI (carregar, salvar,
/// exportar) rode até o fim antes da próxima — o mesmo modelo de um ator
/// lógico só que o núcleo assume.
struct AppState {
    session: RwLock<AnnotationSession>,
}

/// Uma tag da paleta, já com a cor para a UI
struct TagView {
    label: String,
    color: &'static str,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    tags: Vec<TagView>,
}

#[derive(Deserialize)]
struct DocumentRequest {
    #[serde(default)]
    file_name: Option<String>,
    text: String,
}

#[derive(Serialize)]
struct DocumentResponse {
    sentences: usize,
    export_file_name: String,
}

/// Corpo do salvar: o índice da sentença e os registros no formato de
/// exportação `[start, end, text, index, tag]`
#[derive(Deserialize)]
struct SaveRequest {
    index: usize,
    entities: Vec<TokenRecord>,
}

#[derive(Serialize)]
struct SentenceResponse {
    #[serde(flatten)]
    state: DisplayState,
    total: usize,
    saved_total: usize,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let state = Arc::new(AppState {
        session: RwLock::new(AnnotationSession::new()),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/documento", post(document_handler))
        .route("/sentenca/:index", get(sentence_handler))
        .route("/salvar", post(save_handler))
        .route("/exportar", get(export_handler))
        .route("/textos-demo", get(demo_texts_handler))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("porta 3000 indisponível");
    info!("📘 Anotador iniciado em http://localhost:3000");
    axum::serve(listener, app)
        .await
        .expect("servidor encerrou com erro");
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    let template = IndexTemplate {
        tags: Tag::all()
            .iter()
            .map(|tag| TagView {
                label: tag.label(),
                color: tag.category().map(|cat| cat.color()).unwrap_or("#6b7280"),
            })
            .collect(),
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("erro de template: {}", err),
        )
            .into_response(),
    }
}

/// Carrega um documento novo: segmenta o texto e zera as anotações antigas
async fn document_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DocumentRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Texto vazio"})),
        )
            .into_response();
    }

    let mut session = state.session.write().await;
    let total = session.new_document(req.file_name.as_deref(), &req.text);
    info!(
        "Documento carregado: {} ({} sentenças)",
        req.file_name.as_deref().unwrap_or("<sem nome>"),
        total
    );

    Json(DocumentResponse {
        sentences: total,
        export_file_name: session.export_file_name(),
    })
    .into_response()
}

/// Estado de exibição de uma sentença (texto, tokens e tags correntes)
async fn sentence_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> impl IntoResponse {
    let session = state.session.read().await;
    match session.display_state(index) {
        Some(display) => Json(SentenceResponse {
            state: display,
            total: session.sentence_count(),
            saved_total: session.saved_count(),
        })
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Sentença fora do intervalo"})),
        )
            .into_response(),
    }
}

/// Salva as tags de uma sentença (substituição integral)
async fn save_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveRequest>,
) -> impl IntoResponse {
    let mut session = state.session.write().await;
    if !session.save(req.index, req.entities) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Índice de sentença inválido"})),
        )
            .into_response();
    }

    info!(
        "Sentença {} salva ({} no total)",
        req.index,
        session.saved_count()
    );
    Json(serde_json::json!({
        "saved": req.index,
        "saved_total": session.saved_count(),
    }))
    .into_response()
}

/// Exporta todas as anotações como arquivo JSON para download
async fn export_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.read().await;
    let body = session.export().to_pretty_json();
    let file_name = session.export_file_name();
    info!(
        "Exportando {} sentenças para {}",
        session.saved_count(),
        file_name
    );

    (
        [
            (
                header::CONTENT_TYPE,
                "application/json; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<serde_json::Value> = demo_texts()
        .iter()
        .map(|(domain, text)| {
            serde_json::json!({
                "domain": domain,
                "text": text
            })
        })
        .collect();
    Json(texts)
}
