//! SQLite-backed user accounts.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::schema::{USERS_SCHEMA_SQL, USER_COLUMNS};
use crate::types::{NewUser, ProfileUpdate, User};
use vastra_core::{Error, Result};

/// User account store. Email uniqueness is enforced by the schema.
pub struct UserStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl UserStore {
    /// Open or create the users database at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::Storage(e.to_string()))?;
        }

        let conn = Connection::open(&db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        let store = Self::with_connection(conn, db_path)?;
        info!(
            "UserStore initialized: {} users, path={}",
            store.count()?,
            store.db_path.display()
        );
        Ok(store)
    }

    /// In-memory store, for tests and throwaway runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::Database(e.to_string()))?;
        Self::with_connection(conn, PathBuf::from(":memory:"))
    }

    fn with_connection(conn: Connection, db_path: PathBuf) -> Result<Self> {
        conn.execute_batch(USERS_SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    // ---------------------------------------------------------------
    // Accounts
    // ---------------------------------------------------------------

    /// Insert a new account with the default plan. Fails with
    /// [`Error::Conflict`] when the email is already registered.
    pub fn create_user(&self, new_user: NewUser) -> Result<User> {
        let now = timestamp();
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO users (name, email, hashed_password, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                new_user.name,
                new_user.email,
                new_user.hashed_password,
                now
            ])
            .map_err(|e| {
                if e.to_string().contains("UNIQUE constraint") {
                    Error::Conflict("Email already registered".into())
                } else {
                    Error::Database(e.to_string())
                }
            })?;
        drop(conn);

        self.find_by_id(id)?
            .ok_or_else(|| Error::Internal(format!("user {} vanished after insert", id)))
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock();
        let user = conn
            .prepare_cached(&format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS))
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id], row_to_user)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(user)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn.lock();
        let user = conn
            .prepare_cached(&format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS))
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![email], row_to_user)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(user)
    }

    /// Apply the provided profile fields and bump `updated_at`.
    pub fn update_profile(&self, email: &str, update: &ProfileUpdate) -> Result<User> {
        if !update.is_empty() {
            let conn = self.conn.lock();
            // COALESCE keeps the stored value for every field left out
            let changed = conn
                .prepare_cached(
                    "UPDATE users SET
                        name = COALESCE(?1, name),
                        phone = COALESCE(?2, phone),
                        location = COALESCE(?3, location),
                        bio = COALESCE(?4, bio),
                        company = COALESCE(?5, company),
                        updated_at = ?6
                     WHERE email = ?7",
                )
                .map_err(|e| Error::Database(e.to_string()))?
                .execute(params![
                    update.name,
                    update.phone,
                    update.location,
                    update.bio,
                    update.company,
                    timestamp(),
                    email
                ])
                .map_err(|e| Error::Database(e.to_string()))?;
            if changed == 0 {
                return Err(Error::NotFound("User not found".into()));
            }
        }

        self.find_by_email(email)?
            .ok_or_else(|| Error::NotFound("User not found".into()))
    }

    /// Enable or disable login for an account.
    pub fn set_active(&self, email: &str, active: bool) -> Result<()> {
        let conn = self.conn.lock();
        let changed = conn
            .execute(
                "UPDATE users SET is_active = ?1, updated_at = ?2 WHERE email = ?3",
                params![active, timestamp(), email],
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        if changed == 0 {
            return Err(Error::NotFound("User not found".into()));
        }
        Ok(())
    }

    pub fn count(&self) -> Result<i64> {
        let conn = self.conn.lock();
        let count = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count)
    }
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        hashed_password: row.get(3)?,
        phone: row.get(4)?,
        location: row.get(5)?,
        bio: row.get(6)?,
        company: row.get(7)?,
        plan: row.get(8)?,
        photo: row.get(9)?,
        is_active: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Asha".into(),
            email: email.into(),
            hashed_password: "$argon2id$fake".into(),
        }
    }

    #[test]
    fn test_create_and_find() {
        let store = UserStore::open_in_memory().unwrap();
        let user = store.create_user(new_user("asha@example.com")).unwrap();

        assert_eq!(user.plan, "Free");
        assert!(user.is_active);
        assert!(user.phone.is_none());

        let found = store.find_by_email("asha@example.com").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.hashed_password, "$argon2id$fake");
        assert!(store.find_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let store = UserStore::open_in_memory().unwrap();
        store.create_user(new_user("dup@example.com")).unwrap();

        match store.create_user(new_user("dup@example.com")) {
            Err(Error::Conflict(msg)) => assert_eq!(msg, "Email already registered"),
            other => panic!("expected conflict, got {:?}", other.map(|u| u.email)),
        }
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_update_only_given_fields() {
        let store = UserStore::open_in_memory().unwrap();
        store.create_user(new_user("p@example.com")).unwrap();
        store
            .update_profile(
                "p@example.com",
                &ProfileUpdate {
                    company: Some("Handloom Co".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let user = store
            .update_profile(
                "p@example.com",
                &ProfileUpdate {
                    location: Some("Jaipur".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(user.name, "Asha");
        assert_eq!(user.company.as_deref(), Some("Handloom Co"));
        assert_eq!(user.location.as_deref(), Some("Jaipur"));
        assert!(user.updated_at >= user.created_at);
    }

    #[test]
    fn test_update_unknown_user() {
        let store = UserStore::open_in_memory().unwrap();
        let result = store.update_profile(
            "ghost@example.com",
            &ProfileUpdate {
                bio: Some("hi".into()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_persists_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.db");
        {
            let store = UserStore::open(&path).unwrap();
            store.create_user(new_user("disk@example.com")).unwrap();
        }
        let store = UserStore::open(&path).unwrap();
        assert!(store.find_by_email("disk@example.com").unwrap().is_some());
    }

    #[test]
    fn test_deactivate() {
        let store = UserStore::open_in_memory().unwrap();
        store.create_user(new_user("off@example.com")).unwrap();
        store.set_active("off@example.com", false).unwrap();
        assert!(!store.find_by_email("off@example.com").unwrap().unwrap().is_active);
    }
}
