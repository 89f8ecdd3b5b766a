//! # Montagem do Documento de Exportação
//!
//! Constrói, a partir da lista de sentenças e do armazém de anotações, a
//! estrutura JSON final oferecida para download:
//!
//! ```json
//! {
//!   "annotations": [
//!     ["O Saci apareceu.", { "entities": [[2, 6, "Saci", 1, "B-MYTH"], ...] }]
//!   ]
//! }
//! ```
//!
//! Cada entrada de `annotations` é um array de 2 posições (texto da sentença
//! e objeto com a lista de entidades), na ordem crescente do índice da
//! sentença. O layout segue a convenção de corpora de treinamento usada por
//! ferramentas de fine-tuning de NER.

use serde::{Deserialize, Serialize};

use crate::store::{AnnotationStore, TokenRecord};

/// Objeto `{"entities": [...]}` que acompanha cada sentença exportada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityBlock {
    pub entities: Vec<TokenRecord>,
}

/// Uma entrada da exportação: `[texto_da_sentenca, {"entities": [...]}]`.
///
/// Tuple struct de propósito: o serde emite exatamente o array de 2 posições
/// que o formato pede.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEntry(pub String, pub EntityBlock);

/// O documento completo de exportação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub annotations: Vec<ExportEntry>,
}

impl ExportDocument {
    /// Serializa com indentação de 2 espaços (formato do arquivo baixado).
    pub fn to_pretty_json(&self) -> String {
        // a estrutura não contém mapas com chaves não-string nem floats,
        // então a serialização não tem como falhar
        serde_json::to_string_pretty(self).unwrap_or_else(|_| String::from("{\"annotations\":[]}"))
    }
}

/// Monta o documento de exportação.
///
/// Percorre o armazém em ordem crescente de índice de sentença e emparelha
/// cada entrada com o texto correspondente em `sentences`. Entradas cujo
/// índice não existe mais na lista atual de sentenças são **puladas em
/// silêncio** — pode acontecer se um armazém de documento anterior não foi
/// limpo; exportar o resto vale mais do que falhar tudo.
///
/// Um armazém vazio produz `{"annotations": []}`, que é saída válida.
pub fn assemble(sentences: &[String], store: &AnnotationStore) -> ExportDocument {
    let mut annotations = Vec::with_capacity(store.len());

    for (sentence_index, records) in store.iter() {
        let Some(sentence) = sentences.get(sentence_index) else {
            continue;
        };
        annotations.push(ExportEntry(
            sentence.clone(),
            EntityBlock {
                entities: records.to_vec(),
            },
        ));
    }

    ExportDocument { annotations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{EntityCategory, Tag};

    fn sentences(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_store_exports_empty_array() {
        let doc = assemble(&sentences(&["Uma sentença."]), &AnnotationStore::new());
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            "{\"annotations\":[]}"
        );
    }

    #[test]
    fn test_export_numeric_order() {
        let texts: Vec<String> = (0..11).map(|i| format!("Sentença {}.", i)).collect();
        let mut store = AnnotationStore::new();
        for i in [5usize, 10, 2] {
            store.put(i, vec![TokenRecord::new(0, 1, "S", 0, Tag::Outside)]);
        }

        let doc = assemble(&texts, &store);
        let exported: Vec<&str> = doc.annotations.iter().map(|e| e.0.as_str()).collect();
        assert_eq!(exported, vec!["Sentença 2.", "Sentença 5.", "Sentença 10."]);
    }

    #[test]
    fn test_stale_index_skipped_silently() {
        let texts = sentences(&["a", "b", "c", "d", "e"]);
        let mut store = AnnotationStore::new();
        store.put(1, vec![TokenRecord::new(0, 1, "b", 0, Tag::Outside)]);
        store.put(7, vec![TokenRecord::new(0, 1, "x", 0, Tag::Outside)]);

        let doc = assemble(&texts, &store);
        assert_eq!(doc.annotations.len(), 1);
        assert_eq!(doc.annotations[0].0, "b");
    }

    #[test]
    fn test_export_matches_training_layout() {
        let texts = sentences(&["Paris is nice.", "Berlin too."]);
        let mut store = AnnotationStore::new();
        store.put(
            0,
            vec![
                TokenRecord::new(0, 5, "Paris", 0, Tag::Begin(EntityCategory::Loc)),
                TokenRecord::new(6, 8, "is", 1, Tag::Outside),
                TokenRecord::new(9, 13, "nice", 2, Tag::Outside),
                TokenRecord::new(13, 14, ".", 3, Tag::Outside),
            ],
        );

        let doc = assemble(&texts, &store);
        let json = serde_json::to_string(&doc).unwrap();
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
    fn test_pretty_json_is_parseable() {
        let texts = sentences(&["Oi."]);
        let mut store = AnnotationStore::new();
        store.put(0, vec![TokenRecord::new(0, 2, "Oi", 0, Tag::Outside)]);

        let pretty = assemble(&texts, &store).to_pretty_json();
        assert!(pretty.contains('\n'));
        let reparsed: ExportDocument = serde_json::from_str(&pretty).unwrap();
        assert_eq!(reparsed.annotations.len(), 1);
    }
}
