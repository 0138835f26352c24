//! Database module - SQLite storage for the operator session

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::models::SessionUser;

/// Stored login: bearer token plus cached profile
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub usuario: SessionUser,
    pub saved_at: DateTime<Utc>,
}

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> ApiResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Throwaway store, nothing survives the process
    pub fn open_in_memory() -> ApiResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> ApiResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS session (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                token TEXT NOT NULL,
                usuario TEXT NOT NULL
            )",
            [],
        )?;

        // Migration: add saved_at column if missing
        let has_saved_at: bool = self
            .conn
            .prepare("SELECT saved_at FROM session LIMIT 1")
            .is_ok();
        if !has_saved_at {
            let _ = self
                .conn
                .execute("ALTER TABLE session ADD COLUMN saved_at TEXT", []);
        }

        Ok(())
    }

    /// Store a new login, replacing any previous one
    pub fn save_session(&self, usuario: &SessionUser, token: &str) -> ApiResult<()> {
        if !usuario.is_complete() {
            return Err(ApiError::validation("invalid user data"));
        }
        if token.trim().is_empty() {
            return Err(ApiError::validation("invalid token"));
        }

        let usuario_json = serde_json::to_string(usuario)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO session (id, token, usuario, saved_at) VALUES (1, ?1, ?2, ?3)",
            params![token, usuario_json, Utc::now().to_rfc3339()],
        )?;
        debug!(user = %usuario.email, "session saved");
        Ok(())
    }

    /// Swap the token, keeping the cached profile
    pub fn update_token(&self, token: &str) -> ApiResult<bool> {
        if token.trim().is_empty() {
            return Err(ApiError::validation("invalid token"));
        }
        let changed = self.conn.execute(
            "UPDATE session SET token = ?1, saved_at = ?2 WHERE id = 1",
            params![token, Utc::now().to_rfc3339()],
        )?;
        Ok(changed > 0)
    }

    /// Current session. A corrupt row is wiped and reported as no session.
    pub fn load_session(&self) -> ApiResult<Option<Session>> {
        let row: Option<(String, String, Option<String>)> = self
            .conn
            .query_row(
                "SELECT token, usuario, saved_at FROM session WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let Some((token, usuario_json, saved_at)) = row else {
            return Ok(None);
        };

        let usuario = match serde_json::from_str::<SessionUser>(&usuario_json) {
            Ok(u) if u.is_complete() && !token.trim().is_empty() => u,
            _ => {
                warn!("stored session is corrupt, clearing it");
                self.clear_session()?;
                return Ok(None);
            }
        };

        let saved_at = saved_at
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        Ok(Some(Session {
            token,
            usuario,
            saved_at,
        }))
    }

    pub fn token(&self) -> ApiResult<Option<String>> {
        Ok(self.load_session()?.map(|s| s.token))
    }

    pub fn clear_session(&self) -> ApiResult<()> {
        self.conn.execute("DELETE FROM session", [])?;
        debug!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TipoUsuario;

    fn usuario() -> SessionUser {
        SessionUser {
            id: "u1".to_string(),
            nome: "Ana".to_string(),
            email: "ana@gym.com".to_string(),
            tipo: TipoUsuario::Administrador,
            codigo_aluno: None,
        }
    }

    #[test]
    fn test_no_session_initially() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.load_session().unwrap().is_none());
        assert!(db.token().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let db = Database::open_in_memory().unwrap();
        db.save_session(&usuario(), "tok-1").unwrap();
        let s = db.load_session().unwrap().unwrap();
        assert_eq!(s.token, "tok-1");
        assert_eq!(s.usuario, usuario());
    }

    #[test]
    fn test_save_replaces_previous() {
        let db = Database::open_in_memory().unwrap();
        db.save_session(&usuario(), "tok-1").unwrap();
        db.save_session(&usuario(), "tok-2").unwrap();
        assert_eq!(db.token().unwrap().as_deref(), Some("tok-2"));
    }

    #[test]
    fn test_rejects_invalid_input() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.save_session(&usuario(), "  ").is_err());

        let mut incompleto = usuario();
        incompleto.email = String::new();
        assert!(db.save_session(&incompleto, "tok").is_err());
        assert!(db.load_session().unwrap().is_none());
    }

    #[test]
    fn test_update_token() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.update_token("tok-x").unwrap());

        db.save_session(&usuario(), "tok-1").unwrap();
        assert!(db.update_token("tok-2").unwrap());
        let s = db.load_session().unwrap().unwrap();
        assert_eq!(s.token, "tok-2");
        assert_eq!(s.usuario.nome, "Ana");
    }

    #[test]
    fn test_corrupt_session_is_cleared() {
        let db = Database::open_in_memory().unwrap();
        db.conn
            .execute(
                "INSERT INTO session (id, token, usuario) VALUES (1, 'tok', 'undefined')",
                [],
            )
            .unwrap();
        assert!(db.load_session().unwrap().is_none());
        let rows: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM session", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[test]
    fn test_clear() {
        let db = Database::open_in_memory().unwrap();
        db.save_session(&usuario(), "tok").unwrap();
        db.clear_session().unwrap();
        assert!(db.load_session().unwrap().is_none());
    }
}
