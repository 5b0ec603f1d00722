use salesdesk::collection::CollectionStore;
use salesdesk::model::{Customer, Product};
use salesdesk::pagination::{PageSize, Pager};
use salesdesk::remote::memory::InMemoryRemote;
use salesdesk::remote::Remote;

#[test]
fn test_create_then_delete_customer() {
    let mut remote = InMemoryRemote::new();
    let mut store = CollectionStore::<Customer>::default();

    let created = store
        .create(&mut remote, Customer::new("Alice", "1 Main St"))
        .unwrap();

    assert_eq!(store.records().len(), 1);
    let first = &store.records()[0];
    assert!(first.id > 0);
    assert_eq!(first.id, created.id);
    assert_eq!(first.name, "Alice");
    assert_eq!(first.address, "1 Main St");

    store.delete(&mut remote, created.id).unwrap();
    assert!(store.records().is_empty());
    assert!(remote.list::<Customer>().unwrap().is_empty());
}

#[test]
fn test_twelve_products_make_three_pages() {
    let mut remote = InMemoryRemote::new();
    for i in 1..=12 {
        remote
            .create(&Product::new(format!("Product {}", i), i as f64))
            .unwrap();
    }

    let mut store = CollectionStore::<Product>::new(Pager::new(PageSize::new(5).unwrap()));
    store.refresh(&remote).unwrap();
    let total = store.records().len();
    store.pager_mut().go_to(3, total);

    let view = store.page_view();
    assert_eq!(view.page_count, 3);
    assert_eq!(store.page().len(), 2);
    assert!(view.next_disabled);
    assert!(!view.previous_disabled);

    // Most recent first, so the last page holds the oldest two.
    let names: Vec<_> = store.page().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Product 2", "Product 1"]);
}
