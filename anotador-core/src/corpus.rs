//! # Textos de Demonstração
//!
//! Passagens curtas sobre folclore brasileiro para experimentar a ferramenta
//! sem precisar enviar um arquivo. Cada texto é rico nas quatro categorias
//! da paleta (MYTH, LOC, GEO, ORG), o que facilita demonstrar o esquema BIO
//! com entidades de um e de vários tokens.

/// Retorna pares (domínio, texto) prontos para carregar como documento.
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Lendas da floresta",
            "O Curupira, guardião das matas, confunde caçadores na Floresta Amazônica com suas pegadas invertidas. Dizem os ribeirinhos do Rio Negro que o Boto cor-de-rosa aparece nas festas de Manaus. O Museu do Folclore Edison Carneiro reúne registros dessas narrativas desde 1968.",
        ),
        (
            "Águas e encantados",
            "A Iara canta nas margens do Rio Amazonas para atrair pescadores distraídos. No litoral de Santa Catarina, contam histórias do Boitatá serpenteando sobre a Lagoa da Conceição. Pesquisadores da Universidade Federal de Santa Catarina documentaram dezenas de variantes da lenda.",
        ),
        (
            "Sertão",
            "No sertão da Bahia, a Mula-sem-cabeça atravessa a Chapada Diamantina em noites de lua cheia. O Saci-Pererê, de uma perna só, esconde-se nos redemoinhos perto do Rio São Francisco. A Fundação Cultural Palmares mantém um acervo de relatos colhidos em Juazeiro.",
        ),
        (
            "Cidades",
            "Em São Luís do Maranhão, o bumba meu boi mistura o Boi encantado com a história de Pai Francisco. O IPHAN reconheceu o complexo do bumba meu boi como patrimônio cultural do Brasil em 2011, após levantamento feito na Baixada Maranhense.",
        ),
    ]
}
