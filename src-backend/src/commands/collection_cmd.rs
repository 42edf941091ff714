//! Commands for collection entries
//!
//! Exposes entry CRUD and ordering of every collection to the console.

use crate::domain::{CollectionPayload, Entry, OrderEntry};
use crate::repository::{PositioningOperations, Repository};
use crate::AppState;

/// List entries in display order
pub async fn list_entries<P: CollectionPayload>(state: &AppState) -> Result<Vec<Entry<P>>, String> {
    let repo = state.repository::<P>();
    repo.list().await.map_err(|e| e.to_string())
}

/// Get entry by ID
pub async fn get_entry<P: CollectionPayload>(state: &AppState, id: u32) -> Result<Option<Entry<P>>, String> {
    let repo = state.repository::<P>();
    repo.find_by_id(id).await.map_err(|e| e.to_string())
}

/// Create a new entry at the end of its collection
pub async fn create_entry<P: CollectionPayload>(state: &AppState, payload: P) -> Result<Entry<P>, String> {
    let repo = state.repository::<P>();
    let created = repo.create(&Entry::draft(payload)).await.map_err(|e| e.to_string())?;
    log::info!("Created {} entry {}", P::KIND, created.id);
    Ok(created)
}

/// Replace the payload of an entry
pub async fn update_entry<P: CollectionPayload>(
    state: &AppState,
    id: u32,
    payload: P,
) -> Result<Entry<P>, String> {
    let repo = state.repository::<P>();
    repo.update(&Entry::new(id, 0, payload)).await.map_err(|e| e.to_string())
}

/// Delete entry; the remaining entries are renumbered
pub async fn delete_entry<P: CollectionPayload>(state: &AppState, id: u32) -> Result<(), String> {
    let repo = state.repository::<P>();
    repo.delete(id).await.map_err(|e| e.to_string())?;
    log::info!("Deleted {} entry {}", P::KIND, id);
    Ok(())
}

/// Move an entry to a new position
pub async fn move_entry<P: CollectionPayload>(
    state: &AppState,
    id: u32,
    position: u32,
) -> Result<(), String> {
    let repo = state.repository::<P>();
    repo.move_entry(id, position).await.map_err(|e| e.to_string())
}

/// Store a complete new order for a collection
pub async fn reorder_entries<P: CollectionPayload>(
    state: &AppState,
    order: Vec<OrderEntry>,
) -> Result<Vec<OrderEntry>, String> {
    let repo = state.repository::<P>();
    repo.apply_order(&order).await.map_err(|e| {
        log::warn!("Rejected {} reorder: {}", P::KIND, e);
        e.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeaturedProgram, LocalizedText, StudentStory};

    async fn state() -> AppState {
        AppState::open(":memory:".into()).await.expect("Failed to open state")
    }

    #[tokio::test]
    async fn test_create_list_reorder() {
        let state = state().await;
        for slug in ["mba", "llm", "msc"] {
            create_entry(&state, FeaturedProgram::new(LocalizedText::en_only(slug), slug))
                .await
                .unwrap();
        }

        let listed = list_entries::<FeaturedProgram>(&state).await.unwrap();
        let order: Vec<OrderEntry> = listed
            .iter()
            .rev()
            .enumerate()
            .map(|(pos, e)| OrderEntry::new(e.id, pos as u32))
            .collect();
        reorder_entries::<FeaturedProgram>(&state, order).await.unwrap();

        let slugs: Vec<String> = list_entries::<FeaturedProgram>(&state)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.payload.slug)
            .collect();
        assert_eq!(slugs, vec!["msc", "llm", "mba"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let state = state().await;
        let story = create_entry(&state, StudentStory::new("Li Wei", LocalizedText::en_only("Great")))
            .await
            .unwrap();

        let mut payload = story.payload.clone();
        payload.program = Some("MSc Finance, 2023".to_string());
        let updated = update_entry(&state, story.id, payload).await.unwrap();
        assert_eq!(updated.payload.program.as_deref(), Some("MSc Finance, 2023"));

        delete_entry::<StudentStory>(&state, story.id).await.unwrap();
        assert!(get_entry::<StudentStory>(&state, story.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_errors_are_strings() {
        let state = state().await;
        let err = reorder_entries::<StudentStory>(&state, vec![OrderEntry::new(5, 0)])
            .await
            .unwrap_err();
        assert!(err.starts_with("Invalid input"), "{}", err);
    }
}
