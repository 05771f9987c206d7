//! ContentProvider behaviour over the in-memory provider.

use std::sync::Arc;

use bookings::MemorySlots;
use chrono::{Duration, TimeZone, Utc};
use issue_cms::{CmsError, ContentProvider, MemoryProvider, Post, Reaction, VoteLedger};

fn post(id: u64, days_ago: i64) -> Post {
    let created = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap() - Duration::days(days_ago);
    Post {
        id,
        title: format!("Post {}", id),
        body: "Body".to_string(),
        author: "Repair Team".to_string(),
        media: Vec::new(),
        labels: vec!["blog".to_string()],
        created_at: created,
        updated_at: created,
        comment_count: 0,
        likes: 0,
        dislikes: 0,
        url: format!("https://example.com/posts/{}", id),
    }
}

#[tokio::test]
async fn test_posts_newest_first() {
    let provider = MemoryProvider::new(vec![post(1, 10), post(2, 1), post(3, 5)]);
    let ids: Vec<u64> = provider.list_posts().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[tokio::test]
async fn test_comments() {
    let provider = MemoryProvider::new(vec![post(1, 0)]);

    let comment = provider.add_comment(1, "  Very helpful, thanks!  ").await.unwrap();
    assert_eq!(comment.body, "Very helpful, thanks!");

    let comments = provider.get_comments(1).await.unwrap();
    assert_eq!(comments, vec![comment]);
    assert_eq!(provider.list_posts().await.unwrap()[0].comment_count, 1);

    assert!(matches!(
        provider.add_comment(1, "   ").await,
        Err(CmsError::InvalidInput(_))
    ));
    assert!(matches!(
        provider.get_comments(99).await,
        Err(CmsError::NotFound(99))
    ));
}

#[tokio::test]
async fn test_reactions_and_vote_ledger() {
    let provider: Arc<dyn ContentProvider> = Arc::new(MemoryProvider::new(vec![post(5, 0)]));
    let ledger = VoteLedger::new(Arc::new(MemorySlots::new()));

    if let Some(reaction) = ledger.toggle(5, Reaction::Like).await.unwrap() {
        provider.add_reaction(5, reaction).await.unwrap();
    }
    provider.add_reaction(5, Reaction::Dislike).await.unwrap();

    let posts = provider.list_posts().await.unwrap();
    assert_eq!((posts[0].likes, posts[0].dislikes), (1, 1));
    assert_eq!(ledger.get(5).await.unwrap(), Some(Reaction::Like));
    assert!(matches!(
        provider.add_reaction(6, Reaction::Like).await,
        Err(CmsError::NotFound(6))
    ));
}
