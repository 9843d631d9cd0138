use super::*;

fn category(id: &str, name: &str) -> Category {
    Category { id: id.to_owned(), name: name.to_owned(), description: None, active: true }
}

fn names(c: &Collection<Category>) -> Vec<&str> {
    c.items().iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn default_collection_is_idle_and_empty() {
    let c = Collection::<Category>::default();
    assert_eq!(c.load, LoadState::Idle);
    assert!(c.is_empty());
    assert_eq!(c.error(), None);
}

#[test]
fn receive_keeps_order_and_marks_ready() {
    let mut c = Collection::default();
    c.begin();
    assert!(c.is_loading());
    c.receive(vec![category("b", "Beta"), category("a", "Alpha")]);
    assert_eq!(c.load, LoadState::Ready);
    assert_eq!(names(&c), vec!["Beta", "Alpha"]);
    assert_eq!(c.get("a").map(|c| c.name.as_str()), Some("Alpha"));
}

#[test]
fn receive_collapses_duplicate_ids() {
    let mut c = Collection::default();
    c.receive(vec![category("a", "Old"), category("b", "Beta"), category("a", "New")]);
    assert_eq!(names(&c), vec!["New", "Beta"]);
}

#[test]
fn upsert_replaces_in_place_or_appends() {
    let mut c = Collection::default();
    c.receive(vec![category("a", "Alpha"), category("b", "Beta")]);
    c.upsert(category("a", "Alpha 2"));
    c.upsert(category("c", "Gamma"));
    assert_eq!(names(&c), vec!["Alpha 2", "Beta", "Gamma"]);
}

#[test]
fn remove_reindexes_following_items() {
    let mut c = Collection::default();
    c.receive(vec![category("a", "Alpha"), category("b", "Beta"), category("c", "Gamma")]);
    assert_eq!(c.remove("a").map(|c| c.name), Some("Alpha".to_owned()));
    assert_eq!(c.remove("a"), None);
    assert_eq!(c.get("c").map(|c| c.name.as_str()), Some("Gamma"));
    c.upsert(category("c", "Gamma 2"));
    assert_eq!(names(&c), vec!["Beta", "Gamma 2"]);
}

#[test]
fn failure_keeps_previous_items() {
    let mut c = Collection::default();
    c.receive(vec![category("a", "Alpha")]);
    c.begin();
    c.fail("offline");
    assert_eq!(c.error(), Some("offline"));
    assert_eq!(c.len(), 1);
}

#[test]
fn update_touches_only_known_ids() {
    let mut c = Collection::default();
    c.receive(vec![category("a", "Alpha")]);
    assert!(c.update("a", |c| c.active = false));
    assert!(!c.update("zzz", |c| c.active = false));
    assert!(!c.get("a").unwrap().active);
}

#[test]
fn settle_maps_errors_to_display_message() {
    let mut c = Collection::default();
    c.settle(Ok(vec![category("a", "Alpha")]));
    assert_eq!(c.load, LoadState::Ready);
    c.settle(Err(ApiError::Rejected { message: "Not allowed".to_owned() }));
    assert_eq!(c.error(), Some("Not allowed"));
    c.settle(Err(ApiError::Network("reset".to_owned())));
    assert_eq!(c.error(), Some(crate::error::GENERIC_FAILURE));
    assert_eq!(c.len(), 1);
}
