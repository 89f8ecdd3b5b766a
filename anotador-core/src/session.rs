//! # Sessão de Anotação
//!
//! Amarra o ciclo de vida completo de um documento em edição: a sequência de
//! sentenças segmentadas, o nome-base do arquivo enviado e o
//! [`AnnotationStore`] com as tags salvas. É a única fachada que a camada
//! web usa; o estado nunca é global — quem cria a sessão é dono dela.
//!
//! ## Ciclo de vida
//!
//! 1. [`AnnotationSession::new`] — sessão vazia, armazém vazio.
//! 2. [`AnnotationSession::new_document`] — segmenta o texto, substitui a
//!    lista de sentenças e **limpa o armazém** (anotações de um documento
//!    não valem contra outro).
//! 3. [`AnnotationSession::display_state`] / [`AnnotationSession::save`] —
//!    navegação e edição sentença a sentença.
//! 4. [`AnnotationSession::export`] — monta o JSON final a qualquer momento.

use std::path::Path;

use serde::Serialize;

use crate::export::{assemble, ExportDocument};
use crate::store::{AnnotationStore, TokenRecord};
use crate::tag::Tag;
use crate::tokenizer::{segment_with_mode, tokenize_with_mode, SegmenterMode, Token};

/// Nome de arquivo usado quando nenhum documento nomeado foi carregado.
const DEFAULT_EXPORT_NAME: &str = "anotacoes";

/// Um token pronto para exibição, emparelhado com a tag corrente.
///
/// A tag vem do armazém quando a sentença já foi salva (e a contagem de
/// tokens confere), ou é `O` por padrão.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayToken {
    #[serde(flatten)]
    pub token: Token,
    pub tag: Tag,
}

/// Estado de exibição de uma sentença: o texto e seus tokens com tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub sentence_index: usize,
    pub text: String,
    pub tokens: Vec<DisplayToken>,
    /// Se a sentença já tem entrada salva no armazém.
    pub saved: bool,
}

/// Sessão de anotação de um único documento, de um único anotador.
///
/// Não há travas: o modelo de execução é um ator lógico só (cada ação da UI
/// roda até o fim antes da próxima). Quem quiser multiusuário deve criar uma
/// sessão inteira por usuário, nunca compartilhar o armazém.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSession {
    sentences: Vec<String>,
    base_name: Option<String>,
    mode: SegmenterMode,
    store: AnnotationStore,
}

impl AnnotationSession {
    /// Cria uma sessão vazia com o segmentador padrão.
    pub fn new() -> Self {
        Self::with_mode(SegmenterMode::Standard)
    }

    /// Cria uma sessão vazia com o modo de segmentação escolhido.
    ///
    /// O modo fica fixo pela vida da sessão: trocar de tokenizador no meio
    /// invalidaria os offsets já salvos.
    pub fn with_mode(mode: SegmenterMode) -> Self {
        Self {
            sentences: Vec::new(),
            base_name: None,
            mode,
            store: AnnotationStore::new(),
        }
    }

    /// Carrega um documento novo: segmenta o texto, substitui as sentenças
    /// e limpa o armazém. Retorna o total de sentenças encontradas.
    ///
    /// O nome-base para a exportação é derivado de `file_name` sem a
    /// extensão (ex: "lendas.txt" → "lendas").
    pub fn new_document(&mut self, file_name: Option<&str>, raw_text: &str) -> usize {
        self.sentences = segment_with_mode(raw_text, self.mode);
        self.base_name = file_name.and_then(|name| {
            Path::new(name)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        });
        self.store.clear();
        self.sentences.len()
    }

    /// Total de sentenças do documento corrente.
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Quantas sentenças já foram salvas.
    pub fn saved_count(&self) -> usize {
        self.store.len()
    }

    /// Texto de uma sentença, se o índice existir.
    pub fn sentence(&self, sentence_index: usize) -> Option<&str> {
        self.sentences.get(sentence_index).map(|s| s.as_str())
    }

    /// Prepara uma sentença para exibição/edição.
    ///
    /// Tokeniza a sentença de novo (a tokenização é determinística para um
    /// mesmo modo, então nada é cacheado) e emparelha cada token com a tag
    /// salva de mesma posição. **Reconciliação tudo-ou-nada**: se a
    /// quantidade de tokens recém-calculada não bater com a quantidade de
    /// registros salvos, as tags antigas são descartadas por inteiro e todo
    /// token volta para `O`. Alinhar parcialmente colocaria tags nos tokens
    /// errados sem ninguém perceber; recomeçar é o comportamento seguro.
    pub fn display_state(&self, sentence_index: usize) -> Option<DisplayState> {
        let text = self.sentences.get(sentence_index)?;
        let tokens = tokenize_with_mode(text, self.mode);

        let stored = self.store.get(sentence_index);
        let tags: Vec<Tag> = match stored {
            Some(records) if records.len() == tokens.len() => {
                records.iter().map(|r| r.tag).collect()
            }
            _ => vec![Tag::Outside; tokens.len()],
        };

        let tokens = tokens
            .into_iter()
            .zip(tags)
            .map(|(token, tag)| DisplayToken { token, tag })
            .collect();

        Some(DisplayState {
            sentence_index,
            text: text.clone(),
            tokens,
            saved: stored.is_some(),
        })
    }

    /// Salva as tags de uma sentença, substituindo o que havia por inteiro.
    ///
    /// Retorna `false` (sem tocar no armazém) quando o índice não existe no
    /// documento corrente.
    pub fn save(&mut self, sentence_index: usize, records: Vec<TokenRecord>) -> bool {
        if sentence_index >= self.sentences.len() {
            return false;
        }
        self.store.put(sentence_index, records);
        true
    }

    /// Monta o documento de exportação com o estado corrente.
    pub fn export(&self) -> ExportDocument {
        assemble(&self.sentences, &self.store)
    }

    /// Nome do arquivo JSON oferecido para download.
    ///
    /// Deriva do nome do documento enviado, ou usa o nome fixo padrão
    /// quando a sessão não tem documento nomeado.
    pub fn export_file_name(&self) -> String {
        let base = self.base_name.as_deref().unwrap_or(DEFAULT_EXPORT_NAME);
        format!("{}.json", base)
    }

    /// Acesso de leitura ao armazém (para inspeção e testes).
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::EntityCategory;

    fn session_with(text: &str) -> AnnotationSession {
        let mut session = AnnotationSession::new();
        session.new_document(Some("lendas.txt"), text);
        session
    }

    /// Recria os registros exatamente como a UI faria: tokeniza e aplica tags.
    fn records_for(session: &AnnotationSession, index: usize, tags: &[Tag]) -> Vec<TokenRecord> {
        let state = session.display_state(index).unwrap();
        assert_eq!(state.tokens.len(), tags.len());
        state
            .tokens
            .iter()
            .zip(tags)
            .map(|(dt, tag)| {
                TokenRecord::new(
                    dt.token.start,
                    dt.token.end,
                    dt.token.text.clone(),
                    dt.token.index,
                    *tag,
                )
            })
            .collect()
    }

    #[test]
    fn test_new_document_segments_and_names() {
        let session = session_with("Paris is nice. Berlin too.");
        assert_eq!(session.sentence_count(), 2);
        assert_eq!(session.sentence(0), Some("Paris is nice."));
        assert_eq!(session.export_file_name(), "lendas.json");
    }

    #[test]
    fn test_default_export_name() {
        let session = AnnotationSession::new();
        assert_eq!(session.export_file_name(), "anotacoes.json");
    }

    #[test]
    fn test_new_document_clears_store() {
        let mut session = session_with("Paris is nice.");
        let records = records_for(&session, 0, &[Tag::Outside; 4]);
        assert!(session.save(0, records));
        assert_eq!(session.saved_count(), 1);

        session.new_document(Some("outro.txt"), "Texto novo aqui.");
        assert_eq!(session.saved_count(), 0);
        assert_eq!(session.export().annotations.len(), 0);
        assert_eq!(session.export_file_name(), "outro.json");
    }

    #[test]
    fn test_display_state_defaults_to_outside() {
        let session = session_with("Paris is nice.");
        let state = session.display_state(0).unwrap();
        assert!(!state.saved);
        assert_eq!(state.tokens.len(), 4);
        assert!(state.tokens.iter().all(|t| t.tag == Tag::Outside));
    }

    #[test]
    fn test_display_state_deterministic() {
        let session = session_with("O Curupira protege a floresta.");
        let a = session.display_state(0).unwrap();
        let b = session.display_state(0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_state_out_of_range() {
        let session = session_with("Uma sentença só.");
        assert!(session.display_state(5).is_none());
    }

    #[test]
    fn test_saved_tags_come_back_in_position_order() {
        let mut session = session_with("Paris is nice.");
        let tags = [
            Tag::Begin(EntityCategory::Loc),
            Tag::Outside,
            Tag::Outside,
            Tag::Outside,
        ];
        let records = records_for(&session, 0, &tags);
        assert!(session.save(0, records));

        let state = session.display_state(0).unwrap();
        assert!(state.saved);
        assert_eq!(state.tokens[0].tag, Tag::Begin(EntityCategory::Loc));
        assert_eq!(state.tokens[1].tag, Tag::Outside);
    }

    #[test]
    fn test_reconciliation_all_or_nothing() {
        let mut session = session_with("Paris is nice.");
        // Salva uma contagem de registros diferente da tokenização real
        // (simula um tokenizador que mudou entre as visitas)
        let stale = vec![
            TokenRecord::new(0, 5, "Paris", 0, Tag::Begin(EntityCategory::Loc)),
            TokenRecord::new(6, 8, "is", 1, Tag::Outside),
        ];
        assert!(session.save(0, stale));

        let state = session.display_state(0).unwrap();
        // 4 tokens reais ≠ 2 registros salvos → tudo volta para "O",
        // inclusive o token que "parecia" alinhado
        assert_eq!(state.tokens.len(), 4);
        assert!(state.tokens.iter().all(|t| t.tag == Tag::Outside));
    }

    #[test]
    fn test_save_out_of_range_rejected() {
        let mut session = session_with("Uma sentença só.");
        assert!(!session.save(9, vec![]));
        assert_eq!(session.saved_count(), 0);
    }

    #[test]
    fn test_save_idempotent() {
        let mut session = session_with("Paris is nice.");
        let records = records_for(&session, 0, &[Tag::Outside; 4]);
        assert!(session.save(0, records.clone()));
        let first = session.display_state(0).unwrap();
        assert!(session.save(0, records));
        assert_eq!(session.display_state(0).unwrap(), first);
        assert_eq!(session.saved_count(), 1);
    }

    #[test]
    fn test_roundtrip_export_fixture() {
        let mut session = session_with("Paris is nice. Berlin too.");
        let records = vec![
            TokenRecord::new(0, 5, "Paris", 0, Tag::Begin(EntityCategory::Loc)),
            TokenRecord::new(6, 8, "is", 1, Tag::Outside),
            TokenRecord::new(9, 13, "nice", 2, Tag::Outside),
            TokenRecord::new(13, 14, ".", 3, Tag::Outside),
        ];
        assert!(session.save(0, records));

        let json = serde_json::to_string(&session.export()).unwrap();
        assert_eq!(
            json,
            "{\"annotations\":[[\"Paris is nice.\",{\"entities\":[\
             [0,5,\"Paris\",0,\"B-LOC\"],\
             [6,8,\"is\",1,\"O\"],\
             [9,13,\"nice\",2,\"O\"],\
             [13,14,\".\",3,\"O\"]]}]]}"
        );
    }

    #[test]
    fn test_export_orders_numerically() {
        let text = (0..11)
            .map(|i| format!("Sentença número {}.", i))
            .collect::<Vec<_>>()
            .join(" ");
        let mut session = session_with(&text);
        assert_eq!(session.sentence_count(), 11);

        for i in [5usize, 10, 2] {
            let state = session.display_state(i).unwrap();
            let tags = vec![Tag::Outside; state.tokens.len()];
            let records = records_for(&session, i, &tags);
            assert!(session.save(i, records));
        }

        let doc = session.export();
        let order: Vec<&str> = doc
            .annotations
            .iter()
            .map(|entry| entry.0.as_str())
            .collect();
        assert_eq!(
            order,
            vec![
                "Sentença número 2.",
                "Sentença número 5.",
                "Sentença número 10."
            ]
        );
    }
}
