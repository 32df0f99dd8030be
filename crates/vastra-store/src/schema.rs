//! Database schema SQL.

/// User accounts. Email is the login name and must be unique.
pub const USERS_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    hashed_password TEXT NOT NULL,
    phone TEXT,
    location TEXT,
    bio TEXT,
    company TEXT,
    plan TEXT NOT NULL DEFAULT 'Free',
    photo TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
"#;

/// Column list shared by every user SELECT, in [`crate::users`] row order.
pub const USER_COLUMNS: &str = "id, name, email, hashed_password, phone, location, bio, \
     company, plan, photo, is_active, created_at, updated_at";
