pub const SCHEMA: &str = r#"
-- Permission groups, unique by name within a namespace
CREATE TABLE IF NOT EXISTS permissions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    namespace TEXT NOT NULL,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at TEXT DEFAULT (datetime('now')),

    UNIQUE(namespace, name)
);

-- Group membership; a principal appears at most once per group
CREATE TABLE IF NOT EXISTS permission_membership (
    namespace TEXT NOT NULL,
    permission INTEGER NOT NULL REFERENCES permissions(id),
    user_id TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    PRIMARY KEY (permission, user_id)
);

CREATE INDEX IF NOT EXISTS idx_permissions_namespace ON permissions(namespace);
CREATE INDEX IF NOT EXISTS idx_membership_user ON permission_membership(namespace, user_id);
"#;
