use invest_core::{
    load_decision_board, AssetColumn, AssetPatch, AssetService, CategoryService, ConnectionPool,
    DecisionFilter, EventLog, IndicatorPatch, IndicatorService, Lookup, NewAsset, NewCategory,
    NewIndicator, RepoError, SqliteAssetRepository, SqliteCategoryRepository,
    SqliteIndicatorRepository,
};

struct Services<'pool> {
    assets: AssetService<'pool>,
    categories: CategoryService<'pool>,
    indicators: IndicatorService<'pool>,
}

fn services(pool: &ConnectionPool) -> Services<'_> {
    let log = EventLog::new();
    Services {
        assets: AssetService::new(SqliteAssetRepository::try_new(pool, &log).unwrap(), &log),
        categories: CategoryService::new(
            SqliteCategoryRepository::try_new(pool, &log).unwrap(),
            &log,
        ),
        indicators: IndicatorService::new(
            SqliteIndicatorRepository::try_new(pool, &log).unwrap(),
            &log,
        ),
    }
}

fn drop_table(pool: &ConnectionPool, table: &str) {
    pool.acquire()
        .unwrap()
        .execute_batch(&format!("DROP TABLE {table};"))
        .unwrap();
}

#[test]
fn category_asset_indicator_scenario() {
    let pool = ConnectionPool::open_in_memory().unwrap();
    let s = services(&pool);

    s.categories.create(&NewCategory::new(
        "Tech",
        Some("Technology sector".to_string()),
    ));
    s.assets.create(&NewAsset::new("Acme", "stock", 1));
    s.indicators.create(&NewIndicator::new("P/E", 15.2, 1));

    assert_eq!(s.categories.get(1).unwrap().name, "Tech");
    assert_eq!(s.assets.get(1).unwrap().category_id, 1);

    let for_acme = s.indicators.list_by_asset(1);
    assert_eq!(for_acme.len(), 1);
    assert_eq!(for_acme[0].id, 1);
    assert_eq!(for_acme[0].value, 15.2);

    s.indicators.update(
        1,
        &IndicatorPatch {
            value: Some(0.0),
            ..IndicatorPatch::default()
        },
    );
    assert_eq!(s.indicators.get(1).unwrap().value, 0.0);

    let board = load_decision_board(
        &s.assets,
        &s.categories,
        &s.indicators,
        &DecisionFilter {
            asset_ids: vec![1],
            category_ids: vec![1],
        },
    );
    assert_eq!(board.indicators.len(), 1);
    assert_eq!(board.indicators[0].asset_name.as_deref(), Some("Acme"));
    assert_eq!(board.indicators[0].category_name.as_deref(), Some("Tech"));
}

#[test]
fn get_after_delete_is_not_found() {
    let pool = ConnectionPool::open_in_memory().unwrap();
    let s = services(&pool);
    s.assets.create(&NewAsset::new("Acme", "stock", 1));
    let id = s.assets.list()[0].id;

    s.assets.delete(id);

    assert!(s.assets.get(id).is_none());
    assert!(matches!(s.assets.lookup(id), Lookup::NotFound));
    s.assets.delete(id);
    assert!(s.assets.list().is_empty());
}

#[test]
fn update_without_fields_and_update_of_missing_id_change_nothing() {
    let pool = ConnectionPool::open_in_memory().unwrap();
    let s = services(&pool);
    s.assets.create(&NewAsset::new("Acme", "stock", 1));
    let before = s.assets.list();

    s.assets.update(before[0].id, &AssetPatch::default());
    s.assets.update(
        before[0].id + 1,
        &AssetPatch {
            name: Some("Ghost".to_string()),
            ..AssetPatch::default()
        },
    );

    assert_eq!(s.assets.list(), before);
}

#[test]
fn store_failures_degrade_to_empty_results() {
    let pool = ConnectionPool::open_in_memory().unwrap();
    let s = services(&pool);
    s.assets.create(&NewAsset::new("Acme", "stock", 1));
    drop_table(&pool, "assets");

    assert!(s.assets.list().is_empty());
    assert!(s.assets.get(1).is_none());
    assert!(s.assets.list_by_category(1).is_empty());
    assert!(s.assets.list_by_type("stock").is_empty());
    assert!(s.assets.search_by_name("Acme").is_empty());

    // Mutations swallow the failure.
    s.assets.create(&NewAsset::new("Globex", "stock", 1));
    s.assets.update(
        1,
        &AssetPatch {
            name: Some("Renamed".to_string()),
            ..AssetPatch::default()
        },
    );
    s.assets.delete(1);
}

#[test]
fn lookup_distinguishes_store_errors_from_not_found() {
    let pool = ConnectionPool::open_in_memory().unwrap();
    let s = services(&pool);

    assert!(matches!(s.indicators.lookup(5), Lookup::NotFound));

    drop_table(&pool, "indicators");
    match s.indicators.lookup(5) {
        Lookup::StoreError(RepoError::Db(_)) => {}
        other => panic!("expected store error, got {other:?}"),
    }
    assert!(s.indicators.list_by_value_range(0.0, 100.0).is_empty());
}

#[test]
fn unsupported_substring_filter_degrades_to_empty() {
    let pool = ConnectionPool::open_in_memory().unwrap();
    let s = services(&pool);
    s.assets.create(&NewAsset::new("Acme", "stock", 1));

    assert!(s
        .assets
        .list_by_substring(AssetColumn::CategoryId, "1")
        .is_empty());
    assert_eq!(s.assets.list_by_equality(AssetColumn::CategoryId, 1).len(), 1);
}

#[test]
fn inserted_records_get_fresh_ids() {
    let pool = ConnectionPool::open_in_memory().unwrap();
    let s = services(&pool);

    s.categories.create(&NewCategory::new("Tech", None));
    s.categories.create(&NewCategory::new("Tech", None));

    let ids: Vec<_> = s.categories.list().into_iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}
