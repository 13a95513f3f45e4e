//! SQLite store for the path index.
//!
//! Two normalized tables: one row per visited folder, one row per retained
//! file, plus a name index for substring queries. The store holds exactly one
//! generation of data; a rebuild wipes and repopulates it.

use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use std::collections::HashSet;
use std::path::Path;

/// Maximum number of rows returned by the top-folders report
pub const TOP_FOLDERS_LIMIT: u32 = 1000;

const CREATE_TABLES_SQL: &str = "
    CREATE TABLE folders (
        id   INTEGER PRIMARY KEY,
        path TEXT
    );

    CREATE TABLE files (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        folder_id INTEGER,
        name      TEXT
    );

    CREATE INDEX files_name ON files (name);
";

/// A file row matched by the name-substring query
#[derive(Debug, Clone)]
pub struct FileHit {
    pub folder_id: i64,
    pub name: String,
}

/// A folder row resolved by id
#[derive(Debug, Clone)]
pub struct FolderRow {
    pub id: i64,
    pub path: String,
}

/// Handle to the on-disk index database.
///
/// Exclusively owns the persisted representation: the walker writes through
/// [`IndexStore::persist_directory`], the query engine reads through the
/// query methods, and nothing else touches the file.
pub struct IndexStore {
    conn: Connection,
}

impl IndexStore {
    /// Open (or create) the index database at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open index database: {}", db_path.display()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    /// Wipe any existing generation and recreate the empty schema.
    ///
    /// Idempotent; a rebuild always starts from an empty store.
    pub fn begin_rebuild(&mut self) -> Result<()> {
        self.conn
            .execute_batch(
                "DROP TABLE IF EXISTS files;
                 DROP TABLE IF EXISTS folders;",
            )
            .context("Failed to clear previous index generation")?;
        self.conn
            .execute_batch(CREATE_TABLES_SQL)
            .context("Failed to create index schema")?;
        Ok(())
    }

    /// Atomically insert one folder row and its file rows.
    ///
    /// One transaction per directory: a crash mid-rebuild loses at most the
    /// in-flight directory. The caller supplies a fresh `folder_id` per call
    /// within one rebuild generation.
    pub fn persist_directory(
        &mut self,
        folder_id: i64,
        dir_path: &str,
        file_names: &[String],
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            tx.prepare_cached("INSERT INTO folders (id, path) VALUES (?1, ?2)")?
                .execute(params![folder_id, dir_path])?;

            let mut stmt = tx.prepare_cached("INSERT INTO files (folder_id, name) VALUES (?1, ?2)")?;
            for name in file_names {
                stmt.execute(params![folder_id, name])?;
            }
        }
        tx.commit()
            .with_context(|| format!("Failed to persist directory: {dir_path}"))?;
        Ok(())
    }

    /// Substring match against file names (LIKE semantics, no anchoring)
    pub fn files_by_name_substring(&self, needle: &str) -> Result<Vec<FileHit>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT folder_id, name FROM files WHERE name LIKE ?1")?;
        let rows = stmt.query_map(params![format!("%{needle}%")], |row| {
            Ok(FileHit {
                folder_id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Substring match against folder paths (LIKE semantics, no anchoring)
    pub fn folders_by_path_substring(&self, needle: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT path FROM folders WHERE path LIKE ?1")?;
        let rows = stmt.query_map(params![format!("%{needle}%")], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Match a LIKE pattern against the reconstructed full path.
    ///
    /// The full path is computed at query time by joining the two tables;
    /// it is never stored.
    pub fn full_path_glob(&self, like_pattern: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT folders.path || '/' || files.name AS full_path
             FROM files
             JOIN folders ON files.folder_id = folders.id
             WHERE full_path LIKE ?1",
        )?;
        let rows = stmt.query_map(params![like_pattern], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Batch lookup of folder rows by id.
    ///
    /// An empty id set returns an empty result without issuing a query.
    pub fn folders_by_ids(&self, ids: &HashSet<i64>) -> Result<Vec<FolderRow>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders: String = (0..ids.len())
            .map(|i| format!("?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("SELECT id, path FROM folders WHERE id IN ({placeholders})");
        let mut stmt = self.conn.prepare(&sql)?;

        let id_list: Vec<i64> = ids.iter().copied().collect();
        let param_values: Vec<&dyn rusqlite::types::ToSql> =
            id_list.iter().map(|id| id as &dyn rusqlite::types::ToSql).collect();

        let rows = stmt.query_map(&*param_values, |row| {
            Ok(FolderRow {
                id: row.get(0)?,
                path: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// File count per folder, descending, capped at [`TOP_FOLDERS_LIMIT`].
    ///
    /// Folders with no files report a zero count.
    pub fn top_folders(&self) -> Result<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT folders.path, COUNT(files.id) AS total
             FROM folders
             LEFT JOIN files ON files.folder_id = folders.id
             GROUP BY folders.id
             ORDER BY total DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![TOP_FOLDERS_LIMIT], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create an empty-generation IndexStore backed by a temporary file.
    fn open_temp_store() -> (IndexStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = dir.path().join("test-index.sqlite");
        let mut store = IndexStore::open(&db_path).expect("failed to open store");
        store.begin_rebuild().expect("failed to init schema");
        (store, dir)
    }

    #[test]
    fn persist_and_query_file_names() {
        let (mut store, _dir) = open_temp_store();
        store
            .persist_directory(1, "/a/b", &["report.pdf".into(), "notes.txt".into()])
            .unwrap();

        let hits = store.files_by_name_substring("report").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].folder_id, 1);
        assert_eq!(hits[0].name, "report.pdf");
    }

    #[test]
    fn file_name_substring_folds_ascii_case() {
        let (mut store, _dir) = open_temp_store();
        store
            .persist_directory(1, "/x", &["Apple.txt".into(), "banana.txt".into()])
            .unwrap();

        let hits = store.files_by_name_substring("a").unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn folder_path_substring() {
        let (mut store, _dir) = open_temp_store();
        store.persist_directory(1, "/a", &[]).unwrap();
        store.persist_directory(2, "/a/b", &[]).unwrap();
        store.persist_directory(3, "/c", &[]).unwrap();

        let paths = store.folders_by_path_substring("/a").unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&"/a".to_string()));
        assert!(paths.contains(&"/a/b".to_string()));
    }

    #[test]
    fn full_path_glob_joins_tables() {
        let (mut store, _dir) = open_temp_store();
        store
            .persist_directory(1, "/root/docs", &["notes.txt".into()])
            .unwrap();

        let paths = store.full_path_glob("%root%docs%notes%").unwrap();
        assert_eq!(paths, vec!["/root/docs/notes.txt"]);

        let none = store.full_path_glob("%nothing%").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn folders_by_ids_batch() {
        let (mut store, _dir) = open_temp_store();
        store.persist_directory(1, "/a", &[]).unwrap();
        store.persist_directory(2, "/b", &[]).unwrap();
        store.persist_directory(3, "/c", &[]).unwrap();

        let ids: HashSet<i64> = [1, 3].into_iter().collect();
        let rows = store.folders_by_ids(&ids).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| r.id == 1 && r.path == "/a"));
        assert!(rows.iter().any(|r| r.id == 3 && r.path == "/c"));
    }

    #[test]
    fn folders_by_ids_empty_set() {
        let (store, _dir) = open_temp_store();
        let rows = store.folders_by_ids(&HashSet::new()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn begin_rebuild_wipes_previous_generation() {
        let (mut store, _dir) = open_temp_store();
        store
            .persist_directory(1, "/old", &["stale.txt".into()])
            .unwrap();

        store.begin_rebuild().unwrap();
        store
            .persist_directory(1, "/new", &["fresh.txt".into()])
            .unwrap();

        assert!(store.files_by_name_substring("stale").unwrap().is_empty());
        assert!(store.folders_by_path_substring("/old").unwrap().is_empty());
        assert_eq!(store.files_by_name_substring("fresh").unwrap().len(), 1);
    }

    #[test]
    fn empty_directory_persists_folder_row() {
        let (mut store, _dir) = open_temp_store();
        store.persist_directory(1, "/empty", &[]).unwrap();

        let paths = store.folders_by_path_substring("empty").unwrap();
        assert_eq!(paths, vec!["/empty"]);
    }

    #[test]
    fn top_folders_counts_and_zero_rows() {
        let (mut store, _dir) = open_temp_store();
        store
            .persist_directory(1, "/full", &["a".into(), "b".into(), "c".into()])
            .unwrap();
        store.persist_directory(2, "/some", &["a".into()]).unwrap();
        store.persist_directory(3, "/empty", &[]).unwrap();

        let rows = store.top_folders().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], ("/full".to_string(), 3));
        assert_eq!(rows[1], ("/some".to_string(), 1));
        assert_eq!(rows[2], ("/empty".to_string(), 0));
    }

    #[test]
    fn top_folders_caps_row_count() {
        let (mut store, _dir) = open_temp_store();
        for i in 1..=(TOP_FOLDERS_LIMIT as i64 + 10) {
            store.persist_directory(i, &format!("/d{i}"), &[]).unwrap();
        }

        let rows = store.top_folders().unwrap();
        assert_eq!(rows.len(), TOP_FOLDERS_LIMIT as usize);
    }
}
