//! Keyword extraction: raw message → candidate topic tokens.
//!
//! Three stages are tried in order, each a named function:
//!
//! 1. [`keyword_table_tokens`]: a fixed keyword/subject-title table,
//!    tested against the lowercased message and its accent-folded copy.
//!    The first matching entry wins and extraction stops.
//! 2. [`subject_scan_tokens`]: scan every subject in the store; all
//!    matching subjects contribute, in store order.
//! 3. [`generic_category_tokens`]: a fixed generic-category table by
//!    substring containment; every matching category is appended.
//!
//! An empty output means "no scoping available"; callers proceed with
//! unscoped retrieval. A store failure in stage 2 is treated as "no
//! match" and falls through to stage 3.

use crate::store::TaxonomyStore;

/// One row of the keyword→subject-title table.
#[derive(Debug, Clone)]
pub struct KeywordEntry {
    /// Lowercased token searched for in the message.
    pub token: String,
    /// Title of the subject this token maps to.
    pub subject_title: String,
}

/// Immutable keyword→subject-title table, loaded once at startup.
///
/// Entry order is significant: the first matching entry wins.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    entries: Vec<KeywordEntry>,
}

impl KeywordTable {
    pub fn new(entries: Vec<KeywordEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose token occurs in the lowercased message, either
    /// verbatim or after accent folding of both sides.
    pub fn first_match(&self, message_lower: &str) -> Option<&KeywordEntry> {
        let folded = fold_accents(message_lower);
        self.entries
            .iter()
            .find(|e| message_lower.contains(&e.token) || folded.contains(&fold_accents(&e.token)))
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        let entries = [
            ("congés", "Congés"),
            ("congé", "Congés"),
            // common misspelling, kept as a lookup entry in its own right
            ("congès", "Congés"),
            ("vacances", "Congés"),
            ("salaire", "Rémunération"),
            ("rémunération", "Rémunération"),
            ("prime", "Primes et avantages"),
            ("gratification", "Primes et avantages"),
            ("transport", "Transport"),
            ("licenciement", "Rupture du contrat"),
            ("démission", "Rupture du contrat"),
            ("contrat", "Contrat de travail"),
            ("embauche", "Contrat de travail"),
            ("formation", "Formation"),
            ("performance", "Performance"),
            ("évaluation", "Performance"),
        ];
        Self::new(
            entries
                .iter()
                .map(|(token, title)| KeywordEntry {
                    token: (*token).to_string(),
                    subject_title: (*title).to_string(),
                })
                .collect(),
        )
    }
}

/// Generic fallback categories and the words that trigger them.
const GENERIC_CATEGORIES: &[(&str, &[&str])] = &[
    ("prime", &["prime", "primes", "bonus", "gratification"]),
    ("droit", &["droit", "loi", "code", "légal", "conformité"]),
    ("performance", &["performance", "évaluation", "objectif", "résultat"]),
    ("formation", &["formation", "apprentissage", "compétence", "développement"]),
    ("contrat", &["contrat", "embauche", "recrutement", "candidat"]),
];

/// Fold French diacritics to their bare letters (é→e, ç→c, …).
///
/// Input is expected to be lowercased already.
pub fn fold_accents(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Split a lowercased message into bare words, punctuation stripped.
pub(crate) fn message_words(message_lower: &str) -> Vec<String> {
    message_lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Extract candidate topic tokens from a raw message.
///
/// Tokens are either subject titles, subject ids rendered as strings, or
/// generic category names. The returned list is empty only when none of
/// the three stages matched.
pub async fn extract_candidates<S: TaxonomyStore>(
    table: &KeywordTable,
    store: &S,
    message: &str,
) -> Vec<String> {
    let lowered = message.to_lowercase();

    let tokens = keyword_table_tokens(table, store, &lowered).await;
    if !tokens.is_empty() {
        return tokens;
    }

    let tokens = subject_scan_tokens(store, &lowered).await;
    if !tokens.is_empty() {
        return tokens;
    }

    generic_category_tokens(&lowered)
}

/// Stage 1: fixed keyword table. Stops at the first matching entry; the
/// subject id is appended when the store can map the title to one.
async fn keyword_table_tokens<S: TaxonomyStore>(
    table: &KeywordTable,
    store: &S,
    message_lower: &str,
) -> Vec<String> {
    let entry = match table.first_match(message_lower) {
        Some(entry) => entry,
        None => return Vec::new(),
    };

    let mut tokens = vec![entry.subject_title.clone()];
    if let Ok(subjects) = store.list_subjects().await {
        let wanted = entry.subject_title.to_lowercase();
        if let Some(subject) = subjects.iter().find(|s| s.title.to_lowercase() == wanted) {
            tokens.push(subject.id.to_string());
        }
    }
    tokens
}

/// Stage 2: scan all subjects in the store. A subject matches when its
/// full title appears in the message, when any title word longer than 3
/// characters appears in the message, or when any message word longer
/// than 3 characters appears in the title. All matches contribute
/// `{title, id}` pairs in store order.
async fn subject_scan_tokens<S: TaxonomyStore>(store: &S, message_lower: &str) -> Vec<String> {
    let subjects = match store.list_subjects().await {
        Ok(subjects) => subjects,
        Err(_) => return Vec::new(),
    };

    let words = message_words(message_lower);
    let mut tokens = Vec::new();

    for subject in &subjects {
        let title_lower = subject.title.to_lowercase();

        let title_in_message = message_lower.contains(&title_lower);
        let title_word_in_message = title_lower
            .split_whitespace()
            .any(|w| w.chars().count() > 3 && message_lower.contains(w));
        let message_word_in_title = words
            .iter()
            .any(|w| w.chars().count() > 3 && title_lower.contains(w.as_str()));

        if title_in_message || title_word_in_message || message_word_in_title {
            tokens.push(subject.title.clone());
            tokens.push(subject.id.to_string());
        }
    }

    tokens
}

/// Stage 3: fixed generic-category table by substring containment.
/// Every matching category is appended.
fn generic_category_tokens(message_lower: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for (category, words) in GENERIC_CATEGORIES {
        if words.iter().any(|w| message_lower.contains(w)) {
            tokens.push((*category).to_string());
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subject;
    use crate::store::memory::InMemoryStore;

    fn store_with_conges() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert_subject(Subject {
            id: 1,
            title: "Congés".to_string(),
            description: "Congés payés et absences".to_string(),
        });
        store.insert_subject(Subject {
            id: 2,
            title: "Rémunération".to_string(),
            description: "Salaires et accessoires".to_string(),
        });
        store
    }

    #[test]
    fn test_fold_accents() {
        assert_eq!(fold_accents("congés"), "conges");
        assert_eq!(fold_accents("évaluation"), "evaluation");
        assert_eq!(fold_accents("leçon"), "lecon");
        assert_eq!(fold_accents("plain"), "plain");
    }

    #[tokio::test]
    async fn test_table_hit_emits_title_and_id() {
        let store = store_with_conges();
        let table = KeywordTable::default();
        let tokens = extract_candidates(&table, &store, "Quels sont mes congés ?").await;
        assert_eq!(tokens, vec!["Congés".to_string(), "1".to_string()]);
    }

    #[tokio::test]
    async fn test_accented_folded_and_misspelled_forms_match_same_entry() {
        let store = store_with_conges();
        let table = KeywordTable::default();

        for message in ["mes congés annuels", "mes conges annuels", "mes congès annuels"] {
            let tokens = extract_candidates(&table, &store, message).await;
            assert_eq!(tokens[0], "Congés", "message: {message}");
        }
    }

    #[tokio::test]
    async fn test_table_hit_without_store_mapping_emits_title_only() {
        let store = InMemoryStore::new();
        let table = KeywordTable::default();
        let tokens = extract_candidates(&table, &store, "question de transport").await;
        assert_eq!(tokens, vec!["Transport".to_string()]);
    }

    #[tokio::test]
    async fn test_subject_scan_matches_title_word() {
        let store = store_with_conges();
        let table = KeywordTable::new(Vec::new());
        let tokens = extract_candidates(&table, &store, "parlez-moi de la rémunération").await;
        assert_eq!(tokens, vec!["Rémunération".to_string(), "2".to_string()]);
    }

    #[tokio::test]
    async fn test_subject_scan_collects_all_matches() {
        let store = store_with_conges();
        let table = KeywordTable::new(Vec::new());
        let tokens = extract_candidates(&table, &store, "congés et rémunération").await;
        assert_eq!(
            tokens,
            vec![
                "Congés".to_string(),
                "1".to_string(),
                "Rémunération".to_string(),
                "2".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_generic_category_fallback() {
        let store = InMemoryStore::new();
        let table = KeywordTable::new(Vec::new());
        let tokens = extract_candidates(&table, &store, "objectif du recrutement").await;
        assert_eq!(tokens, vec!["performance".to_string(), "contrat".to_string()]);
    }

    #[tokio::test]
    async fn test_no_match_yields_empty() {
        let store = InMemoryStore::new();
        let table = KeywordTable::new(Vec::new());
        let tokens = extract_candidates(&table, &store, "rien d'utile ici").await;
        assert!(tokens.is_empty());
    }
}
