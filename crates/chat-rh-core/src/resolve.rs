//! Subject resolution: candidate tokens → at most one subject.
//!
//! Two named strategies are tried per token, in a fixed priority order:
//! direct id lookup first, then case-insensitive title containment.
//! Resolution stops at the first subject confirmed by either strategy,
//! over the first token that yields one. Malformed tokens (non-numeric
//! where an id was expected) and store failures simply fall through to
//! the next strategy or token.

use crate::models::Subject;
use crate::store::TaxonomyStore;

/// Resolve the candidate token list to at most one subject.
pub async fn resolve_subject<S: TaxonomyStore>(store: &S, tokens: &[String]) -> Option<Subject> {
    for token in tokens {
        if let Some(subject) = lookup_by_id(store, token).await {
            return Some(subject);
        }
        if let Some(subject) = lookup_by_title(store, token).await {
            return Some(subject);
        }
    }
    None
}

/// Strategy 1: parse the token as a numeric subject id and look it up.
async fn lookup_by_id<S: TaxonomyStore>(store: &S, token: &str) -> Option<Subject> {
    let id: i64 = token.trim().parse().ok()?;
    store.get_subject_by_id(id).await.ok().flatten()
}

/// Strategy 2: first subject whose title contains the token,
/// case-insensitively, in store order.
async fn lookup_by_title<S: TaxonomyStore>(store: &S, token: &str) -> Option<Subject> {
    let needle = token.to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let subjects = store.list_subjects().await.ok()?;
    subjects
        .into_iter()
        .find(|s| s.title.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert_subject(Subject {
            id: 1,
            title: "Congés".to_string(),
            description: String::new(),
        });
        store.insert_subject(Subject {
            id: 2,
            title: "Contrat de travail".to_string(),
            description: String::new(),
        });
        store
    }

    #[tokio::test]
    async fn test_resolves_by_id_first() {
        let store = store();
        let resolved = resolve_subject(&store, &["2".to_string()]).await.unwrap();
        assert_eq!(resolved.id, 2);
    }

    #[tokio::test]
    async fn test_resolves_by_title_substring() {
        let store = store();
        let resolved = resolve_subject(&store, &["contrat".to_string()])
            .await
            .unwrap();
        assert_eq!(resolved.id, 2);
    }

    #[tokio::test]
    async fn test_unknown_id_falls_through_to_next_token() {
        let store = store();
        let tokens = vec!["99".to_string(), "Congés".to_string()];
        let resolved = resolve_subject(&store, &tokens).await.unwrap();
        assert_eq!(resolved.id, 1);
    }

    #[tokio::test]
    async fn test_no_tokens_resolves_nothing() {
        let store = store();
        assert!(resolve_subject(&store, &[]).await.is_none());
    }

    #[tokio::test]
    async fn test_first_confirmed_token_wins() {
        let store = store();
        let tokens = vec!["inconnu".to_string(), "1".to_string(), "2".to_string()];
        let resolved = resolve_subject(&store, &tokens).await.unwrap();
        assert_eq!(resolved.id, 1);
    }
}
