use invest_core::{
    CategoryColumn, CategoryPatch, CategoryService, ConnectionPool, EventLog, NewCategory,
    Repository, SqliteCategoryRepository,
};

fn setup() -> ConnectionPool {
    ConnectionPool::open_in_memory().unwrap()
}

fn service(pool: &ConnectionPool) -> CategoryService<'_> {
    let log = EventLog::new();
    let repo = SqliteCategoryRepository::try_new(pool, &log).unwrap();
    CategoryService::new(repo, &log)
}

#[test]
fn description_is_optional() {
    let pool = setup();
    let categories = service(&pool);

    categories.create(&NewCategory::new("Tech", Some("Technology sector".to_string())));
    categories.create(&NewCategory::new("Energy", None));

    let listed = categories.list();
    assert_eq!(listed.len(), 2);
    let tech = listed.iter().find(|c| c.name == "Tech").unwrap();
    let energy = listed.iter().find(|c| c.name == "Energy").unwrap();
    assert_eq!(tech.description.as_deref(), Some("Technology sector"));
    assert_eq!(energy.description, None);
}

#[test]
fn update_description_only_keeps_name() {
    let pool = setup();
    let categories = service(&pool);
    categories.create(&NewCategory::new("Tech", None));
    let id = categories.list()[0].id;

    categories.update(
        id,
        &CategoryPatch {
            description: Some("Software and hardware".to_string()),
            ..CategoryPatch::default()
        },
    );

    let loaded = categories.get(id).unwrap();
    assert_eq!(loaded.name, "Tech");
    assert_eq!(loaded.description.as_deref(), Some("Software and hardware"));
}

#[test]
fn find_by_name_is_exact_while_search_is_substring() {
    let pool = setup();
    let categories = service(&pool);
    categories.create(&NewCategory::new("Tech", None));
    categories.create(&NewCategory::new("Fintech", None));

    let exact = categories.find_by_name("Tech");
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].name, "Tech");

    let mut found: Vec<_> = categories
        .search_by_name("ech")
        .into_iter()
        .map(|category| category.name)
        .collect();
    found.sort();
    assert_eq!(found, vec!["Fintech".to_string(), "Tech".to_string()]);

    assert!(categories.search_by_name("tech").iter().all(|c| c.name == "Fintech"));
}

#[test]
fn deleting_a_category_leaves_assets_referencing_it() {
    let pool = setup();
    let categories = service(&pool);
    categories.create(&NewCategory::new("Tech", None));
    let id = categories.list()[0].id;

    pool.acquire()
        .unwrap()
        .execute(
            "INSERT INTO assets (name, type, category_id) VALUES ('Acme', 'stock', ?1);",
            [id],
        )
        .unwrap();

    categories.delete(id);
    assert!(categories.get(id).is_none());

    let remaining: i64 = pool
        .acquire()
        .unwrap()
        .query_row(
            "SELECT COUNT(*) FROM assets WHERE category_id = ?1;",
            [id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(remaining, 1);
}

#[test]
fn repository_description_column_accepts_substring_filters() {
    let pool = setup();
    let repo = SqliteCategoryRepository::try_new(&pool, &EventLog::new()).unwrap();
    repo.insert(&NewCategory::new("Tech", Some("Large caps".to_string())))
        .unwrap();
    repo.insert(&NewCategory::new("Misc", None)).unwrap();

    let found = repo
        .list_by_substring(CategoryColumn::Description, "caps")
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Tech");
}
