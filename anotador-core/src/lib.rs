//! # anotador-core — Anotação Manual de Entidades Nomeadas (BIO)
//!
//! Este crate implementa o núcleo de uma ferramenta de anotação manual de
//! corpus NER: o usuário envia um texto, navega sentença a sentença, atribui
//! uma tag BIO a cada token e exporta tudo em um JSON compatível com
//! pipelines de treinamento.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui em linha reta, sem estado global:
//!
//! 1.  **Entrada**: Texto bruto (String) enviado pela camada web.
//! 2.  **Segmentação/Tokenização** ([`tokenizer`]): O texto vira sentenças e
//!     cada sentença vira tokens com offsets de byte preservados.
//! 3.  **Sessão** ([`session`]): Dona do documento corrente; prepara cada
//!     sentença para edição e aplica a reconciliação de tags padrão.
//! 4.  **Armazém** ([`store`]): Mapa de índice de sentença → tokens anotados,
//!     mutado apenas pela ação explícita de salvar.
//! 5.  **Saída** ([`export`]): Documento JSON ordenado por índice de
//!     sentença, pronto para download.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use anotador_core::{AnnotationSession, Tag, TokenRecord};
//! use anotador_core::tag::EntityCategory;
//!
//! let mut session = AnnotationSession::new();
//! session.new_document(Some("lendas.txt"), "O Saci apareceu.");
//!
//! // A UI exibe a sentença 0 com todos os tokens em "O"
//! let state = session.display_state(0).unwrap();
//! assert!(state.tokens.iter().all(|t| t.tag == Tag::Outside));
//!
//! // O anotador marca "Saci" como B-MYTH e salva
//! let records: Vec<TokenRecord> = state
//!     .tokens
//!     .iter()
//!     .map(|dt| {
//!         let tag = if dt.token.text == "Saci" {
//!             Tag::Begin(EntityCategory::Myth)
//!         } else {
//!             Tag::Outside
//!         };
//!         TokenRecord::new(dt.token.start, dt.token.end, dt.token.text.clone(), dt.token.index, tag)
//!     })
//!     .collect();
//! session.save(0, records);
//!
//! // Exportação final
//! let doc = session.export();
//! assert_eq!(doc.annotations.len(), 1);
//! ```
//!
//! ## Módulos Principais
//!
//! - [`session`]: Fachada usada pela camada web (ciclo de vida do documento).
//! - [`store`]: O armazém de anotações e o registro por token.
//! - [`export`]: Montagem do JSON de exportação.
//! - [`tokenizer`]: Segmentação de sentenças e tokenização com offsets.
//! - [`tag`]: O conjunto fechado de tags BIO da paleta.

pub mod corpus;
pub mod export;
pub mod session;
pub mod store;
pub mod tag;
pub mod tokenizer;

pub use export::{assemble, EntityBlock, ExportDocument, ExportEntry};
pub use session::{AnnotationSession, DisplayState, DisplayToken};
pub use store::{AnnotationStore, TokenRecord};
pub use tag::{EntityCategory, Tag};
pub use tokenizer::{segment, tokenize, SegmenterMode, Token};
