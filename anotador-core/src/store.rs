//! # Armazém de Anotações
//!
//! Guarda, em memória, as tags salvas para cada sentença do documento em
//! edição. A chave é o índice da sentença na sequência segmentada; o valor é
//! a lista ordenada de [`TokenRecord`] daquela sentença.
//!
//! Duas situações são distintas de propósito:
//! - índice **ausente** do mapa: a sentença nunca foi salva;
//! - índice presente: a sentença foi salva exatamente como está no valor.
//!
//! O armazém pertence a uma única sessão de anotação e é esvaziado por
//! completo quando um documento novo substitui o anterior — anotações não
//! fazem sentido contra outra sequência de sentenças.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};

use crate::tag::Tag;

/// Um token anotado dentro de uma sentença.
///
/// Invariantes: `end == start + text.len()` (offsets de byte na sentença,
/// `end` exclusivo) e `index` estritamente crescente a partir de 0 dentro da
/// lista de uma sentença.
///
/// No JSON o registro vira um array de 5 posições
/// `[start, end, text, index, tag]` — o layout convencional de corpora de
/// treinamento NER, e não um objeto com campos nomeados.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRecord {
    /// Offset de byte inicial na sentença (inclusive).
    pub start: usize,
    /// Offset de byte final na sentença (exclusivo).
    pub end: usize,
    /// Texto do token.
    pub text: String,
    /// Posição do token entre os tokens da sentença (base 0).
    pub index: usize,
    /// Tag BIO escolhida pelo anotador.
    pub tag: Tag,
}

impl TokenRecord {
    pub fn new(start: usize, end: usize, text: impl Into<String>, index: usize, tag: Tag) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            index,
            tag,
        }
    }
}

impl Serialize for TokenRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tup = serializer.serialize_tuple(5)?;
        tup.serialize_element(&self.start)?;
        tup.serialize_element(&self.end)?;
        tup.serialize_element(&self.text)?;
        tup.serialize_element(&self.index)?;
        tup.serialize_element(&self.tag)?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for TokenRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (start, end, text, index, tag) =
            <(usize, usize, String, usize, Tag)>::deserialize(deserializer)?;
        Ok(TokenRecord {
            start,
            end,
            text,
            index,
            tag,
        })
    }
}

/// Mapeamento de índice de sentença para os tokens anotados daquela sentença.
///
/// O `BTreeMap` mantém as chaves em ordem numérica crescente, que é
/// exatamente a ordem exigida pela exportação (ordenar a chave como string
/// colocaria "10" antes de "2").
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    entries: BTreeMap<usize, Vec<TokenRecord>>,
}

impl AnnotationStore {
    /// Cria um armazém vazio (início de sessão).
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Consulta os registros salvos para uma sentença. Não cria entrada.
    pub fn get(&self, sentence_index: usize) -> Option<&[TokenRecord]> {
        self.entries.get(&sentence_index).map(|v| v.as_slice())
    }

    /// Substitui por inteiro a entrada da sentença — único mutador.
    ///
    /// Nunca faz merge parcial: o que estava salvo para aquele índice é
    /// descartado e a lista recebida passa a ser a verdade.
    pub fn put(&mut self, sentence_index: usize, records: Vec<TokenRecord>) {
        self.entries.insert(sentence_index, records);
    }

    /// Esvazia o armazém inteiro.
    ///
    /// Deve ser chamado sempre que um documento novo substitui o anterior;
    /// caso contrário a exportação misturaria sentenças novas com anotações
    /// de um documento que não existe mais.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Quantidade de sentenças com anotação salva.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Itera as entradas em ordem crescente de índice de sentença.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[TokenRecord])> + '_ {
        self.entries.iter().map(|(i, v)| (*i, v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{EntityCategory, Tag};

    fn record(index: usize, text: &str, tag: Tag) -> TokenRecord {
        TokenRecord::new(0, text.len(), text, index, tag)
    }

    #[test]
    fn test_get_absent_is_none() {
        let store = AnnotationStore::new();
        assert!(store.get(0).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_replaces_wholesale() {
        let mut store = AnnotationStore::new();
        store.put(
            3,
            vec![
                record(0, "Saci", Tag::Begin(EntityCategory::Myth)),
                record(1, "pula", Tag::Outside),
            ],
        );
        store.put(3, vec![record(0, "Saci", Tag::Outside)]);

        let saved = store.get(3).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].tag, Tag::Outside);
    }

    #[test]
    fn test_put_is_idempotent() {
        let records = vec![record(0, "Iara", Tag::Begin(EntityCategory::Myth))];
        let mut store = AnnotationStore::new();
        store.put(1, records.clone());
        let first = store.get(1).unwrap().to_vec();
        store.put(1, records);
        assert_eq!(store.get(1).unwrap(), first.as_slice());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut store = AnnotationStore::new();
        store.put(0, vec![record(0, "a", Tag::Outside)]);
        store.put(7, vec![record(0, "b", Tag::Outside)]);
        store.clear();
        assert!(store.is_empty());
        assert!(store.get(0).is_none());
        assert!(store.get(7).is_none());
    }

    #[test]
    fn test_iter_numeric_order() {
        let mut store = AnnotationStore::new();
        for i in [5usize, 10, 2] {
            store.put(i, vec![record(0, "x", Tag::Outside)]);
        }
        let order: Vec<usize> = store.iter().map(|(i, _)| i).collect();
        assert_eq!(order, vec![2, 5, 10]);
    }

    #[test]
    fn test_record_serializes_as_tuple() {
        let rec = TokenRecord::new(0, 5, "Paris", 0, Tag::Begin(EntityCategory::Loc));
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, "[0,5,\"Paris\",0,\"B-LOC\"]");
    }

    #[test]
    fn test_record_deserializes_from_tuple() {
        let rec: TokenRecord = serde_json::from_str("[6,8,\"is\",1,\"O\"]").unwrap();
        assert_eq!(rec, TokenRecord::new(6, 8, "is", 1, Tag::Outside));
    }

    #[test]
    fn test_record_rejects_unknown_tag() {
        assert!(serde_json::from_str::<TokenRecord>("[0,5,\"Paris\",0,\"B-PER\"]").is_err());
    }
}
