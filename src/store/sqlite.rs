use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

/// Relational backend: groups live in `permissions`, member sets in the
/// `permission_membership` join table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn group_from_row(row: &Row<'_>) -> rusqlite::Result<Group> {
    Ok(Group {
        namespace: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: parse_datetime(&row.get::<_, String>(3)?),
    })
}

fn group_id(conn: &Connection, namespace: &str, name: &str) -> Result<Option<GroupId>> {
    conn.query_row(
        "SELECT id FROM permissions WHERE namespace = ?1 AND name = ?2",
        params![namespace, name],
        |row| row.get(0),
    )
    .optional()
    .map_err(Error::from)
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn group_exists(&self, namespace: &str, name: &str) -> Result<bool> {
        Ok(group_id(&self.conn(), namespace, name)?.is_some())
    }

    fn get_group(&self, namespace: &str, name: &str) -> Result<Option<Group>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT namespace, name, description, created_at
             FROM permissions WHERE namespace = ?1 AND name = ?2",
            params![namespace, name],
            group_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn create_group(&self, group: &Group) -> Result<GroupId> {
        let conn = self.conn();
        let result = conn.execute(
            "INSERT INTO permissions (namespace, name, description, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                group.namespace,
                group.name,
                group.description,
                format_datetime(&group.created_at),
            ],
        );

        match result {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::DuplicateGroup(group.name.clone()))
            }
            Err(e) => Err(Error::from(e)),
        }
    }

    fn delete_group(&self, namespace: &str, name: &str) -> Result<Group> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let (id, group) = tx
            .query_row(
                "SELECT id, namespace, name, description, created_at
                 FROM permissions WHERE namespace = ?1 AND name = ?2",
                params![namespace, name],
                |row| {
                    let id: GroupId = row.get(0)?;
                    Ok((
                        id,
                        Group {
                            namespace: row.get(1)?,
                            name: row.get(2)?,
                            description: row.get(3)?,
                            created_at: parse_datetime(&row.get::<_, String>(4)?),
                        },
                    ))
                },
            )
            .optional()?
            .ok_or_else(|| Error::GroupNotFound(name.to_string()))?;

        let members: i64 = tx.query_row(
            "SELECT COUNT(*) FROM permission_membership WHERE permission = ?1",
            params![id],
            |row| row.get(0),
        )?;
        if members > 0 {
            return Err(Error::GroupNotEmpty(name.to_string()));
        }

        tx.execute("DELETE FROM permissions WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(group)
    }

    fn list_groups(&self, namespace: &str) -> Result<Vec<Group>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT namespace, name, description, created_at
             FROM permissions WHERE namespace = ?1 ORDER BY name",
        )?;

        let rows = stmt.query_map(params![namespace], group_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn add_member(&self, namespace: &str, group: &str, principal: &Principal) -> Result<()> {
        let conn = self.conn();
        let id = group_id(&conn, namespace, group)?
            .ok_or_else(|| Error::GroupNotFound(group.to_string()))?;

        conn.execute(
            "INSERT OR IGNORE INTO permission_membership (namespace, permission, user_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                namespace,
                id,
                principal.as_str(),
                format_datetime(&Utc::now())
            ],
        )?;
        Ok(())
    }

    fn remove_member(&self, namespace: &str, group: &str, principal: &Principal) -> Result<()> {
        let conn = self.conn();
        let id = group_id(&conn, namespace, group)?
            .ok_or_else(|| Error::GroupNotFound(group.to_string()))?;

        let rows = conn.execute(
            "DELETE FROM permission_membership WHERE namespace = ?1 AND permission = ?2 AND user_id = ?3",
            params![namespace, id, principal.as_str()],
        )?;

        if rows == 0 {
            return Err(Error::NotAMember {
                group: group.to_string(),
                principal: principal.to_string(),
            });
        }
        Ok(())
    }

    fn is_member(&self, namespace: &str, group: &str, principal: &Principal) -> Result<bool> {
        let conn = self.conn();
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM permissions p
                 JOIN permission_membership m ON p.id = m.permission
                 WHERE p.namespace = ?1 AND p.name = ?2 AND m.user_id = ?3",
                params![namespace, group, principal.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn list_members(&self, namespace: &str, group: &str) -> Result<Vec<Principal>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT m.user_id FROM permission_membership m
             JOIN permissions p ON m.permission = p.id
             WHERE p.namespace = ?1 AND p.name = ?2
             ORDER BY m.user_id",
        )?;

        let ids = stmt
            .query_map(params![namespace, group], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        ids.iter().map(|id| Principal::parse(id)).collect()
    }

    fn count_members(&self, namespace: &str, group: &str) -> Result<usize> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM permission_membership m
             JOIN permissions p ON m.permission = p.id
             WHERE p.namespace = ?1 AND p.name = ?2",
            params![namespace, group],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn list_groups_for_principal(
        &self,
        namespace: &str,
        principal: &Principal,
    ) -> Result<Vec<Group>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT p.namespace, p.name, p.description, p.created_at
             FROM permissions p
             JOIN permission_membership m ON m.permission = p.id
             WHERE p.namespace = ?1 AND m.user_id = ?2
             ORDER BY p.name",
        )?;

        let rows = stmt.query_map(params![namespace, principal.as_str()], group_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }
}
