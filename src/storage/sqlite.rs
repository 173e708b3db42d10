use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::project::{NewProject, Project, ProjectId};
use crate::storage::{check_new_project, ProjectStore, CATEGORY_ALL};
use crate::{FolioError, Result};

const LABEL: &str = "sqlite";

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS projects (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    url         TEXT,
    github_url  TEXT,
    category    TEXT NOT NULL DEFAULT 'General',
    language    TEXT,
    stars       INTEGER DEFAULT 0,
    is_featured INTEGER DEFAULT 0
);";

const SELECT_PROJECT: &str = "SELECT id, name, description, url, github_url, \
                              category, language, stars, is_featured \
                              FROM projects";

/// Projects kept in a relational table, ordered by primary key.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Open (or create) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let storage = Self {
            conn: Mutex::new(Connection::open(path)?),
            path: Some(path.to_path_buf()),
        };
        storage.initialize()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self> {
        let storage = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
            path: None,
        };
        storage.initialize()?;
        Ok(storage)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Insert `projects` with their ids if the table is empty.
    ///
    /// Returns how many rows were inserted.
    pub fn seed(&self, projects: &[Project]) -> Result<usize> {
        let mut conn = self.lock()?;
        let existing: i64 =
            conn.query_row("SELECT COUNT(*) FROM projects", [], |row| {
                row.get(0)
            })?;
        if existing > 0 {
            log::debug!("[{}] already holds {} projects", LABEL, existing);
            return Ok(0);
        }

        let tx = conn.transaction()?;
        for project in projects {
            tx.execute(
                "INSERT INTO projects (id, name, description, url, \
                 github_url, category, language, stars, is_featured) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    project.id,
                    project.name,
                    project.description,
                    project.url,
                    project.github_url,
                    project.category,
                    project.language,
                    project.stars,
                    project.is_featured,
                ],
            )?;
        }
        tx.commit()?;

        log::info!("[{}] seeded {} projects", LABEL, projects.len());
        Ok(projects.len())
    }

    fn initialize(&self) -> Result<()> {
        self.lock()?.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            FolioError::Storage(LABEL.to_owned(), "Lock poisoned".to_owned())
        })
    }

    fn query(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Project>> {
        let mut statement = conn.prepare(sql)?;
        let rows = statement.query_map(params, project_from_row)?;
        let projects = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        url: row.get(3)?,
        github_url: row.get(4)?,
        category: row.get(5)?,
        language: row.get(6)?,
        stars: row.get::<_, Option<u32>>(7)?.unwrap_or(0),
        is_featured: row.get::<_, Option<bool>>(8)?.unwrap_or(false),
    })
}

impl ProjectStore for SqliteStorage {
    fn label(&self) -> &str {
        LABEL
    }

    fn projects(&self) -> Result<Vec<Project>> {
        let conn = self.lock()?;
        Self::query(&conn, &format!("{} ORDER BY id", SELECT_PROJECT), [])
    }

    fn count(&self) -> Result<usize> {
        let count: i64 =
            self.lock()?
                .query_row("SELECT COUNT(*) FROM projects", [], |row| {
                    row.get(0)
                })?;
        Ok(count as usize)
    }

    fn list(&self, category: Option<&str>) -> Result<Vec<Project>> {
        match category {
            Some(category) if category != CATEGORY_ALL => {
                let conn = self.lock()?;
                Self::query(
                    &conn,
                    &format!(
                        "{} WHERE category = ?1 ORDER BY id",
                        SELECT_PROJECT
                    ),
                    params![category],
                )
            }
            _ => self.projects(),
        }
    }

    fn get(&self, id: ProjectId) -> Result<Option<Project>> {
        let conn = self.lock()?;
        let project = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_PROJECT),
                params![id],
                project_from_row,
            )
            .optional()?;
        Ok(project)
    }

    fn create(&self, new: NewProject) -> Result<Project> {
        let mut conn = self.lock()?;
        let existing =
            Self::query(&conn, &format!("{} ORDER BY id", SELECT_PROJECT), [])?;
        check_new_project(&existing, &new)?;

        // Inserted with a placeholder id, the table assigns the real one.
        let draft = new.into_project(0);
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO projects (name, description, url, github_url, \
             category, language, stars, is_featured) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                draft.name,
                draft.description,
                draft.url,
                draft.github_url,
                draft.category,
                draft.language,
                draft.stars,
                draft.is_featured,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        log::info!("[{}] created project {} ({})", LABEL, id, draft.name);
        Ok(Project { id, ..draft })
    }
}
