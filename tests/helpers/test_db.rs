use rolegate::database::Database;

pub async fn setup_test_db() -> Database {
    // Unique file-based SQLite database per test for parallel execution
    use uuid::Uuid;
    let temp_file = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", temp_file);

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    setup_schema(&db).await;

    db
}

async fn setup_schema(db: &Database) {
    let pool = db.pool();

    sqlx::query(
        "CREATE TABLE roles (
            role_uuid TEXT PRIMARY KEY,
            role_name TEXT NOT NULL,
            organization_uuid TEXT,
            role_management_type TEXT NOT NULL CHECK(role_management_type IN ('system_managed', 'customer_managed')),
            description TEXT,
            policy TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            created_by TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create roles table");

    sqlx::query("CREATE INDEX idx_roles_organization_uuid ON roles(organization_uuid)")
        .execute(pool)
        .await
        .ok();

    sqlx::query("CREATE INDEX idx_roles_management_type ON roles(role_management_type)")
        .execute(pool)
        .await
        .ok();

    sqlx::query(
        "CREATE TABLE user_roles (
            user_role_uuid TEXT PRIMARY KEY,
            user_uuid TEXT NOT NULL,
            role_uuid TEXT NOT NULL,
            organization_uuid TEXT NOT NULL,
            created_at TEXT NOT NULL,
            created_by TEXT NOT NULL,
            UNIQUE(user_uuid, role_uuid, organization_uuid)
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create user_roles table");

    sqlx::query("CREATE INDEX idx_user_roles_user_uuid ON user_roles(user_uuid)")
        .execute(pool)
        .await
        .ok();

    sqlx::query("CREATE INDEX idx_user_roles_organization_uuid ON user_roles(organization_uuid)")
        .execute(pool)
        .await
        .ok();
}
