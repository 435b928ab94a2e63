use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::oneshot;

mod migrations;

use crate::models::DailyLog;
use migrations::run_migrations;

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

struct DatabaseInner {
    sender: mpsc::Sender<DbCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                error!("Failed to send shutdown to DB thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join DB thread: {join_err:?}");
            }
        }
    }
}

/// Durable store for time-slot overrides and daily logs. All SQLite access
/// happens on a dedicated worker thread owning the single connection;
/// callers ship closures to it and await the reply.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
    db_path: Arc<PathBuf>,
}

impl Database {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path_for_thread = db_path.clone();

        let worker = thread::Builder::new()
            .name("brolife-db".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path_for_thread) {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(Err(anyhow::Error::new(err)
                            .context("failed to open SQLite database")));
                        return;
                    }
                };

                if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                    error!("Failed to enable WAL mode: {err}");
                }
                if let Err(err) = conn.pragma_update(None, "foreign_keys", "ON") {
                    error!("Failed to enable foreign keys: {err}");
                }

                let init_result =
                    run_migrations(&mut conn).context("failed to run database migrations");
                if ready_tx.send(init_result).is_err() {
                    error!("DB initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        DbCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        DbCommand::Shutdown => break,
                    }
                }

                info!("Database thread shutting down");
            })
            .with_context(|| "failed to spawn database worker thread")?;

        ready_rx
            .recv()
            .context("database worker exited before signaling readiness")??;

        info!("Database initialized at {}", db_path.as_path().display());

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            db_path: Arc::new(db_path),
        })
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = DbCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("DB caller dropped before receiving result");
            }
        }));

        sender
            .send(command)
            .map_err(|err| anyhow!("failed to send command to DB thread: {err}"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("database thread terminated unexpectedly"))?
    }

    /// Upsert a time-slot override. Last write wins; there is no delete.
    pub async fn set_slot_override(
        &self,
        slot_key: &str,
        text: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let slot_key = slot_key.to_string();
        let text = text.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO slot_overrides (slot_key, text, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(slot_key) DO UPDATE SET
                     text = excluded.text,
                     updated_at = excluded.updated_at",
                params![slot_key, text, updated_at.to_rfc3339()],
            )
            .with_context(|| "failed to upsert slot override")?;
            Ok(())
        })
        .await
    }

    pub async fn get_slot_override(&self, slot_key: &str) -> Result<Option<String>> {
        let slot_key = slot_key.to_string();
        self.execute(move |conn| {
            conn.query_row(
                "SELECT text FROM slot_overrides WHERE slot_key = ?1",
                params![slot_key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| "failed to read slot override")
        })
        .await
    }

    pub async fn all_slot_overrides(&self) -> Result<BTreeMap<String, String>> {
        self.execute(|conn| {
            let mut stmt =
                conn.prepare("SELECT slot_key, text FROM slot_overrides ORDER BY slot_key")?;

            let mut rows = stmt.query([])?;
            let mut overrides = BTreeMap::new();
            while let Some(row) = rows.next()? {
                overrides.insert(row.get::<_, String>(0)?, row.get::<_, String>(1)?);
            }

            Ok(overrides)
        })
        .await
    }

    /// Store a daily log, replacing any earlier blob for the same date.
    pub async fn save_daily_log(&self, log: &DailyLog) -> Result<()> {
        let log_date = log.date.clone();
        let payload = serde_json::to_string(log).context("failed to serialize daily log")?;
        let saved_at = Utc::now().to_rfc3339();
        self.execute(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO daily_logs (log_date, payload, saved_at)
                 VALUES (?1, ?2, ?3)",
                params![log_date, payload, saved_at],
            )
            .with_context(|| "failed to save daily log")?;
            Ok(())
        })
        .await
    }

    pub async fn get_daily_log(&self, date: &str) -> Result<Option<DailyLog>> {
        let date = date.to_string();
        self.execute(move |conn| {
            let payload = conn
                .query_row(
                    "SELECT payload FROM daily_logs WHERE log_date = ?1",
                    params![date],
                    |row| row.get::<_, String>(0),
                )
                .optional()
                .with_context(|| "failed to read daily log")?;

            payload
                .map(|raw| serde_json::from_str(&raw).context("failed to deserialize daily log"))
                .transpose()
        })
        .await
    }

    pub async fn latest_daily_log(&self) -> Result<Option<DailyLog>> {
        self.execute(|conn| {
            let payload = conn
                .query_row(
                    "SELECT payload FROM daily_logs ORDER BY log_date DESC LIMIT 1",
                    [],
                    |row| row.get::<_, String>(0),
                )
                .optional()
                .with_context(|| "failed to read latest daily log")?;

            payload
                .map(|raw| serde_json::from_str(&raw).context("failed to deserialize daily log"))
                .transpose()
        })
        .await
    }
}
