//! # Segmentação e Tokenização
//!
//! Divide o texto enviado em sentenças e cada sentença em tokens, preservando
//! os offsets de byte originais. Os offsets permitem que a anotação feita na
//! interface aponte de volta para o trecho exato da sentença.
//!
//! ## Modos de Segmentação
//!
//! - **Standard**: Usa as regras de fronteira do Unicode (UAX #29) para
//!   sentenças e palavras. Mantém pontuação como tokens próprios.
//! - **Pattern**: Fallback por expressão regular — sentenças quebradas em
//!   `[.!?]+` e palavras casadas por `\w+`. Mais grosseiro (descarta a
//!   pontuação), mas não depende das tabelas Unicode.
//!
//! O restante do sistema nunca pergunta qual modo produziu um [`Token`]:
//! ambos os modos emitem o mesmo tipo, com a mesma garantia de offsets.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use anotador_core::tokenizer::{segment_with_mode, tokenize_with_mode, SegmenterMode};
//!
//! let sentences = segment_with_mode("O Saci mora aqui. A Iara também!", SegmenterMode::Standard);
//! assert_eq!(sentences.len(), 2);
//!
//! let tokens = tokenize_with_mode(&sentences[0], SegmenterMode::Standard);
//! assert_eq!(tokens[1].text, "Saci");
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Um token extraído de uma sentença.
///
/// Unidade atômica da anotação: cada token recebe exatamente uma tag BIO.
/// Os campos `start` e `end` referem-se a bytes **dentro da sentença**
/// (não do documento inteiro), com `end` exclusivo, de modo que
/// `sentenca[start..end] == text` sempre vale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "Curupira", ",", "floresta").
    pub text: String,
    /// Índice de byte inicial na sentença (inclusive).
    pub start: usize,
    /// Índice de byte final na sentença (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na sentença (0, 1, 2...).
    pub index: usize,
}

/// Estratégias de segmentação/tokenização disponíveis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmenterMode {
    /// **Padrão**: Fronteiras de sentença e palavra do Unicode (UAX #29).
    /// Preserva pontuação e abreviações razoavelmente bem.
    Standard,
    /// **Fallback textual**: Sentenças separadas por `[.!?]+` e tokens
    /// casados por `\w+`. Útil quando se quer reproduzir exatamente a
    /// tokenização simplificada de corpora antigos.
    Pattern,
}

impl Default for SegmenterMode {
    fn default() -> Self {
        SegmenterMode::Standard
    }
}

fn pattern_sentence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("regex de sentença inválida"))
}

fn pattern_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("regex de palavra inválida"))
}

/// Divide o texto bruto em sentenças usando o modo padrão.
pub fn segment(text: &str) -> Vec<String> {
    segment_with_mode(text, SegmenterMode::Standard)
}

/// Divide o texto bruto em sentenças com o modo especificado.
///
/// Cada sentença retornada vem com espaços nas bordas removidos; trechos
/// vazios são descartados. A sequência resultante é estável para um mesmo
/// par (texto, modo) — propriedade da qual a sessão de anotação depende.
pub fn segment_with_mode(text: &str, mode: SegmenterMode) -> Vec<String> {
    match mode {
        SegmenterMode::Standard => text
            .unicode_sentences()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect(),
        SegmenterMode::Pattern => pattern_sentence_re()
            .split(text)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Tokeniza uma sentença usando o modo padrão.
pub fn tokenize(sentence: &str) -> Vec<Token> {
    tokenize_with_mode(sentence, SegmenterMode::Standard)
}

/// Tokeniza uma sentença com o modo especificado.
pub fn tokenize_with_mode(sentence: &str, mode: SegmenterMode) -> Vec<Token> {
    let mut tokens = match mode {
        SegmenterMode::Standard => tokenize_standard(sentence),
        SegmenterMode::Pattern => tokenize_pattern(sentence),
    };

    // Re-indexa os tokens
    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
    }
    tokens
}

fn tokenize_standard(sentence: &str) -> Vec<Token> {
    sentence
        .split_word_bound_indices()
        .filter(|(_, piece)| !piece.trim().is_empty())
        .map(|(start, piece)| Token {
            text: piece.to_string(),
            start,
            end: start + piece.len(),
            index: 0, // será atribuído depois
        })
        .collect()
}

fn tokenize_pattern(sentence: &str) -> Vec<Token> {
    pattern_word_re()
        .find_iter(sentence)
        .map(|m| Token {
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
            index: 0,
        })
        .collect()
}
