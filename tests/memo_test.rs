mod helpers;

use helpers::{draft, test_store};
use packrat::archive::index::memos_newest_first;

#[test]
fn memo_add_then_delete_leaves_the_article_clean() {
    let (_tmp, mut store) = test_store();
    let a1 = store.create_article(draft("A1", "Tech", &[])).unwrap();
    let a2 = store.create_article(draft("A2", "Tech", &[])).unwrap();

    let memo = store.add_memo(&a2.id, "scratch note", false).unwrap();
    assert_eq!(store.get(&a2.id).unwrap().memos.len(), 1);

    assert!(store.delete_memo(&a2.id, &memo.id));
    assert!(store.get(&a2.id).unwrap().memos.is_empty());

    // The other article was never touched.
    assert!(store.get(&a1.id).unwrap().memos.is_empty());
}

#[test]
fn memo_edit_changes_content_only() {
    let (_tmp, mut store) = test_store();
    let article = store.create_article(draft("Host", "Tech", &[])).unwrap();
    let memo = store.add_memo(&article.id, "draft wording", true).unwrap();

    assert!(store.update_memo(&article.id, &memo.id, "final wording"));

    let stored = &store.get(&article.id).unwrap().memos[0];
    assert_eq!(stored.content, "final wording");
    assert_eq!(stored.id, memo.id);
    assert_eq!(stored.created_at, memo.created_at);
    assert!(stored.is_summary);
}

#[test]
fn storage_appends_while_display_reverses() {
    let (_tmp, mut store) = test_store();
    let article = store.create_article(draft("Host", "Tech", &[])).unwrap();

    let first = store.add_memo(&article.id, "first", false).unwrap();
    let second = store.add_memo(&article.id, "second", false).unwrap();

    let stored = store.get(&article.id).unwrap();
    assert_eq!(stored.memos[0].id, first.id);
    assert_eq!(stored.memos[1].id, second.id);

    // UUID v7 timestamps can collide at second granularity, but creation
    // order ties resolve by the stable sort keeping later memos earlier only
    // when strictly newer; with equal timestamps the stored order holds.
    let display = memos_newest_first(stored);
    if first.created_at == second.created_at {
        assert_eq!(display[0].id, first.id);
    } else {
        assert_eq!(display[0].id, second.id);
        assert_eq!(display[1].id, first.id);
    }
}

#[test]
fn memo_ids_are_unique_within_their_article() {
    let (_tmp, mut store) = test_store();
    let article = store.create_article(draft("Host", "Tech", &[])).unwrap();
    for i in 0..10 {
        store.add_memo(&article.id, format!("memo {i}"), false).unwrap();
    }

    let mut ids: Vec<String> = store
        .get(&article.id)
        .unwrap()
        .memos
        .iter()
        .map(|m| m.id.clone())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}
