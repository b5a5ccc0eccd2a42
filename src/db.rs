use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new().connect(database_url).await
}

/// Idempotent schema bootstrap. `employees` and `users` are shared tables
/// owned by the employee/auth modules; this service only reads them.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id          TEXT PRIMARY KEY,
            full_name   TEXT NOT NULL,
            email       TEXT,
            active      INTEGER NOT NULL DEFAULT 1
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            username    TEXT NOT NULL UNIQUE,
            role_id     INTEGER NOT NULL,
            employee_id TEXT REFERENCES employees(id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS leave_types (
            id                    INTEGER PRIMARY KEY AUTOINCREMENT,
            name                  TEXT NOT NULL UNIQUE,
            default_days_entitled INTEGER
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS leave_balances (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id   TEXT NOT NULL REFERENCES employees(id),
            leave_type_id INTEGER NOT NULL REFERENCES leave_types(id),
            year          INTEGER NOT NULL,
            entitled_days REAL NOT NULL,
            used_days     REAL NOT NULL DEFAULT 0,
            UNIQUE (employee_id, leave_type_id, year)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS leave_requests (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id    TEXT NOT NULL REFERENCES employees(id),
            leave_type_id  INTEGER NOT NULL REFERENCES leave_types(id),
            status         TEXT NOT NULL DEFAULT 'pending',
            start_date     TEXT NOT NULL,
            end_date       TEXT NOT NULL,
            num_days       REAL NOT NULL,
            reason         TEXT,
            request_date   TEXT NOT NULL,
            approved_by_id TEXT REFERENCES users(id),
            processed_date TEXT,
            comments       TEXT
        )
        "#,
    ];

    for stmt in statements {
        sqlx::query(stmt).execute(pool).await?;
    }

    Ok(())
}
