//! Listing pipeline behaviour: filter, sort, paginate and the view state.
//!
//! Run with: `cargo test --test listing_test`
use workhub_backend::listing::{
    FilterSpec, ListingState, apply_filters, derive_page, display_price, list_services,
    sort_and_page,
};
use workhub_backend::models::workers::WorkerRecord;

fn worker(id: Option<i64>, name: &str, service: &str, price: f64) -> WorkerRecord {
    WorkerRecord {
        id,
        name: name.to_string(),
        service: service.to_string(),
        price_per_day: price,
        image: format!("/images/{name}.jpg"),
        rating: None,
        available: Some(true),
    }
}

fn mixed_records() -> Vec<WorkerRecord> {
    vec![
        worker(Some(1), "Ravi", "Plumber", 500.0),
        worker(Some(2), "Anita", "Electrician", 650.0),
        worker(None, "Ghost", "Plumber", 400.0),
        worker(Some(4), "Deepak", "Plumber", 480.0),
        worker(Some(5), "Zero", "Electrician", 0.0),
        worker(Some(6), "Pooja", "Electrician", 720.0),
        worker(Some(7), "Negative", "Mason", -50.0),
        worker(Some(8), "Arjun", "Mason", 550.0),
    ]
}

#[test]
fn test_scenario_sorts_filtered_masons_by_name() {
    let records = vec![
        worker(Some(1), "Bob", "Mason", 500.0),
        worker(Some(2), "Amy", "Mason", 200.0),
        worker(Some(3), "Cid", "Welder", 0.0),
    ];
    let spec = FilterSpec::for_service("Mason").with_price_range(0, 1000);

    let page = derive_page(&records, &spec, 1, 12);

    let shown: Vec<(&str, u64)> = page
        .items
        .iter()
        .map(|r| (r.name.as_str(), r.display_price()))
        .collect();
    assert_eq!(shown, vec![("Amy", 236), ("Bob", 590)]);
    assert_eq!(page.total_count, 2);
}

#[test]
fn test_price_display_law() {
    assert_eq!(display_price(500.0), 590);
    assert_eq!(display_price(1000.0), 1180);
}

#[test]
fn test_apply_filters_is_idempotent() {
    let records = mixed_records();
    let specs = vec![
        FilterSpec::default(),
        FilterSpec::for_service("Plumber"),
        FilterSpec::default().with_price_range(500, 800),
        FilterSpec::default().with_search("an"),
        FilterSpec::for_service("Electrician")
            .with_price_range(0, 800)
            .with_search("POO"),
    ];

    for spec in specs {
        let once = apply_filters(&records, &spec);
        let twice = apply_filters(&once, &spec);
        assert_eq!(once, twice, "filtering twice changed the result for {spec:?}");
    }
}

#[test]
fn test_placeholder_records_never_reach_a_page() {
    let records = mixed_records();
    let specs = vec![
        FilterSpec::default(),
        FilterSpec::for_service("Plumber"),
        FilterSpec::for_service("Electrician"),
        FilterSpec::for_service("Mason"),
        FilterSpec::default().with_search("o"),
    ];

    for spec in specs {
        for page in 1..=3 {
            let derived = derive_page(&records, &spec, page, 2);
            for item in &derived.items {
                assert!(item.id.is_some(), "null id listed for {spec:?}");
                assert!(item.price_per_day > 0.0, "{} listed for {spec:?}", item.name);
            }
        }
    }
}

#[test]
fn test_pagination_bounds() {
    let records: Vec<_> = (1..=25)
        .map(|i| worker(Some(i), &format!("Worker {i:02}"), "Cleaner", 300.0))
        .collect();

    assert_eq!(sort_and_page(records.clone(), 1, 12).total_pages, 3);

    let five_pages: Vec<_> = records.iter().take(25).cloned().collect();
    let low = sort_and_page(five_pages.clone(), 0, 5);
    assert_eq!((low.page, low.total_pages), (1, 5));

    let high = sort_and_page(five_pages, 6, 5);
    assert_eq!(high.page, 5);
    assert_eq!(high.items.first().map(|r| r.name.as_str()), Some("Worker 21"));
}

#[test]
fn test_service_change_resets_page() {
    let mut state = ListingState::new(12);
    state.set_service("Plumber");
    state.set_page(3);
    assert_eq!(state.page(), 3);

    state.set_service("Electrician");
    assert_eq!(state.page(), 1);
}

#[test]
fn test_every_filter_change_resets_page() {
    let mut state = ListingState::new(9);

    state.set_page(4);
    state.set_search_query("ravi");
    assert_eq!(state.page(), 1);

    state.set_page(4);
    state.set_min_price(100);
    assert_eq!(state.page(), 1);

    state.set_page(4);
    state.set_max_price_input("900");
    assert_eq!(state.page(), 1);

    state.set_page(4);
    state.clear_filters();
    assert_eq!(state.page(), 1);
}

#[test]
fn test_min_max_normalization() {
    let mut state = ListingState::new(12);
    state.set_max_price(300);
    state.set_min_price(100);

    state.set_min_price(400);
    assert_eq!(state.filters().min_price, 400);
    assert_eq!(state.filters().max_price, 400);

    let mut state = ListingState::new(12);
    state.set_max_price(300);
    state.set_min_price(100);

    state.set_max_price(50);
    assert_eq!(state.filters().min_price, 50);
    assert_eq!(state.filters().max_price, 50);
}

#[test]
fn test_service_list_ignores_current_filters() {
    let records = mixed_records();
    let filtered = apply_filters(&records, &FilterSpec::for_service("Plumber"));

    assert_eq!(list_services(&filtered), vec!["Plumber"]);
    assert_eq!(
        list_services(&records),
        vec!["Electrician", "Mason", "Plumber"]
    );
}
