//! Context assembly: capped article sequence → grounding text block.
//!
//! The rendered block is prepended to the model invocation as its system
//! instructions. Article content is never truncated here; the model gets
//! the full text of every retained article.

use crate::models::Article;

/// Fixed instructional preamble. Covers the ungrounded case too: when no
/// article section follows, the assistant is instructed to say that the
/// supporting texts are unavailable.
const PREAMBLE: &str = "\
Tu es un assistant expert en gestion des ressources humaines et en droit du travail.
Tu dois répondre EXCLUSIVEMENT à partir des articles du Code du travail fournis ci-dessous.
Si la question posée ne trouve pas de réponse dans les articles fournis, indique explicitement
que tu ne disposes pas des textes nécessaires pour y répondre.
Réponds toujours en français de manière claire et professionnelle.";

const ARTICLES_HEADER: &str = "=== ARTICLES DU CODE DU TRAVAIL ===";
const ARTICLES_FOOTER: &str = "=== FIN DES ARTICLES ===";

const CITATION_REMINDER: &str = "\
Lorsque ta réponse s'appuie sur un article, cite son numéro (par exemple « Art.L.30 »).";

/// Static topic description used when no subject was resolved.
pub const GENERIC_AMBIENT_DESCRIPTION: &str = "\
Domaines d'expertise :
- Gestion des primes et avantages
- Droit du travail
- Conformité légale
- Relations de travail
- Gestion des performances
- Formation et développement";

/// Render the final grounding block.
///
/// The article section is emitted only when `articles` is non-empty; the
/// ambient description, when present, is appended last in either case.
pub fn render_context(articles: &[Article], ambient: Option<&str>) -> String {
    let mut out = String::from(PREAMBLE);

    if !articles.is_empty() {
        out.push_str("\n\n");
        out.push_str(ARTICLES_HEADER);
        out.push('\n');
        for (i, article) in articles.iter().enumerate() {
            out.push_str(&format!(
                "\nArticle {} : {} (source : {})\n{}\n",
                i + 1,
                article.label,
                article.source,
                article.content
            ));
        }
        out.push('\n');
        out.push_str(ARTICLES_FOOTER);
        out.push('\n');
        out.push_str(CITATION_REMINDER);
    }

    if let Some(ambient) = ambient {
        out.push_str("\n\n");
        out.push_str(ambient);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: i64, label: &str, content: &str) -> Article {
        Article {
            id,
            subject_id: 1,
            label: label.to_string(),
            source: "Code du travail".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_empty_sequence_renders_preamble_only() {
        let block = render_context(&[], None);
        assert!(block.contains("EXCLUSIVEMENT"));
        assert!(!block.contains(ARTICLES_HEADER));
        assert!(!block.contains(CITATION_REMINDER));
    }

    #[test]
    fn test_articles_enumerated_with_ordinals_and_full_content() {
        let articles = vec![
            article(1, "Art.L.148", "Le travailleur acquiert des congés payés."),
            article(2, "Art.L.149", "La durée du congé est fixée par décret."),
        ];
        let block = render_context(&articles, None);

        assert!(block.contains(ARTICLES_HEADER));
        assert!(block.contains("Article 1 : Art.L.148"));
        assert!(block.contains("Article 2 : Art.L.149"));
        assert!(block.contains("Le travailleur acquiert des congés payés."));
        assert!(block.contains(ARTICLES_FOOTER));
        assert!(block.contains(CITATION_REMINDER));
    }

    #[test]
    fn test_content_is_not_truncated() {
        let long_content = "clause ".repeat(500);
        let articles = vec![article(1, "Art.L.1", &long_content)];
        let block = render_context(&articles, None);
        assert!(block.contains(long_content.trim_end()));
    }

    #[test]
    fn test_ambient_description_appended_last() {
        let block = render_context(&[], Some(GENERIC_AMBIENT_DESCRIPTION));
        assert!(block.ends_with(GENERIC_AMBIENT_DESCRIPTION));

        let articles = vec![article(1, "Art.L.1", "contenu")];
        let block = render_context(&articles, Some("Sujet : Congés"));
        assert!(block.ends_with("Sujet : Congés"));
    }
}
