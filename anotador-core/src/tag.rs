//! # Esquema de Tags BIO para Anotação Manual
//!
//! Define o conjunto fechado de rótulos que o anotador pode atribuir a cada
//! token. O esquema segue a convenção **BIO** (Beginning-Inside-Outside),
//! padrão em corpora de treinamento para NER.
//!
//! ## Categorias de Entidades
//!
//! | Prefixo | Significado           | Exemplos                            |
//! |---------|-----------------------|-------------------------------------|
//! | MYTH    | Figura mitológica     | Saci-Pererê, Curupira, Iara         |
//! | LOC     | Local nomeado         | São Paulo, Serra do Mar             |
//! | GEO     | Acidente geográfico   | Rio Amazonas, Chapada Diamantina    |
//! | ORG     | Organização           | IBGE, Museu do Folclore             |
//! | O       | Fora de entidade      | (qualquer palavra não-entidade)     |
//!
//! ## Esquema BIO
//!
//! - `B-TAG`: Begin — primeiro token de uma entidade
//! - `I-TAG`: Inside — tokens subsequentes da mesma entidade
//! - `O`: Outside — não é parte de nenhuma entidade
//!
//! A legalidade da sequência BIO **não é validada**: um `I-LOC` logo após um
//! `O` é aceito como o anotador digitou. A ferramenta registra exatamente o
//! que foi escolhido na interface; consistência é responsabilidade de quem
//! revisa o corpus.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Categorias de entidade disponíveis para anotação.
///
/// Este é o "vocabulário" semântico do corpus sendo construído. Adicionar uma
/// categoria nova exige atualizar a paleta da interface e reanotar sentenças
/// antigas que a mencionem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    /// **Mitologia**: Seres e figuras do folclore. Ex: "Saci", "Boitatá", "Mula-sem-cabeça".
    Myth,
    /// **Localização**: Lugares nomeados por humanos. Ex: "Belém", "Vila de Trindade".
    Loc,
    /// **Geografia**: Acidentes e regiões naturais. Ex: "Rio Negro", "Mata Atlântica".
    Geo,
    /// **Organização**: Instituições, museus, órgãos. Ex: "IPHAN", "Funarte".
    Org,
}

impl EntityCategory {
    /// Nome da categoria como string (para serialização e UI)
    pub fn name(&self) -> &'static str {
        match self {
            EntityCategory::Myth => "MYTH",
            EntityCategory::Loc => "LOC",
            EntityCategory::Geo => "GEO",
            EntityCategory::Org => "ORG",
        }
    }

    /// Cor CSS para destacar a categoria na UI
    pub fn color(&self) -> &'static str {
        match self {
            EntityCategory::Myth => "#8b5cf6", // violeta
            EntityCategory::Loc => "#f59e0b",  // âmbar
            EntityCategory::Geo => "#10b981",  // verde esmeralda
            EntityCategory::Org => "#3b82f6",  // azul
        }
    }

    /// Ícone emoji para a categoria
    pub fn icon(&self) -> &'static str {
        match self {
            EntityCategory::Myth => "🐉",
            EntityCategory::Loc => "📍",
            EntityCategory::Geo => "🏞️",
            EntityCategory::Org => "🏢",
        }
    }

    /// Tenta parsear a partir de string (ex: "LOC" → Some(Loc))
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "MYTH" => Some(EntityCategory::Myth),
            "LOC" => Some(EntityCategory::Loc),
            "GEO" => Some(EntityCategory::Geo),
            "ORG" => Some(EntityCategory::Org),
            _ => None,
        }
    }
}

/// Tag BIO atribuída a um token pelo anotador.
///
/// O esquema BIO permite representar entidades de múltiplos tokens.
/// No JSON exportado a tag aparece como seu rótulo textual ("B-LOC", "O"),
/// e não como estrutura de enum — esse é o contrato do formato de exportação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// **Begin**: Marca o INÍCIO de uma entidade. Ex: **Rio** (B-GEO) Amazonas.
    Begin(EntityCategory),
    /// **Inside**: Marca a CONTINUAÇÃO de uma entidade. Ex: Rio **Amazonas** (I-GEO).
    Inside(EntityCategory),
    /// **Outside**: O token não faz parte de nenhuma entidade.
    Outside,
}

impl Tag {
    /// Representação textual da tag (ex: "B-MYTH", "I-ORG", "O")
    pub fn label(&self) -> String {
        match self {
            Tag::Begin(cat) => format!("B-{}", cat.name()),
            Tag::Inside(cat) => format!("I-{}", cat.name()),
            Tag::Outside => "O".to_string(),
        }
    }

    /// Número total de tags possíveis
    pub const COUNT: usize = 9;

    /// Todas as tags na ordem em que aparecem na paleta da UI
    pub fn all() -> [Tag; 9] {
        [
            Tag::Outside,
            Tag::Begin(EntityCategory::Myth),
            Tag::Inside(EntityCategory::Myth),
            Tag::Begin(EntityCategory::Loc),
            Tag::Inside(EntityCategory::Loc),
            Tag::Begin(EntityCategory::Geo),
            Tag::Inside(EntityCategory::Geo),
            Tag::Begin(EntityCategory::Org),
            Tag::Inside(EntityCategory::Org),
        ]
    }

    /// Retorna a categoria desta tag (se for B- ou I-)
    pub fn category(&self) -> Option<EntityCategory> {
        match self {
            Tag::Begin(c) | Tag::Inside(c) => Some(*c),
            Tag::Outside => None,
        }
    }

    /// Parseia uma tag a partir do rótulo textual (ex: "B-GEO" → Begin(Geo))
    pub fn from_label(s: &str) -> Option<Self> {
        if s == "O" {
            return Some(Tag::Outside);
        }
        let parts: Vec<&str> = s.splitn(2, '-').collect();
        if parts.len() != 2 {
            return None;
        }
        let cat = EntityCategory::from_str(parts[1])?;
        match parts[0] {
            "B" => Some(Tag::Begin(cat)),
            "I" => Some(Tag::Inside(cat)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Serializa como rótulo textual, que é o formato do arquivo exportado
impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tag::from_label(&s)
            .ok_or_else(|| de::Error::custom(format!("tag BIO desconhecida: {:?}", s)))
    }
}
