use crate::errors::AppError;
use crate::scraper::{ScrapeOutcome, Termination};
use rusqlite::{params, Connection};

#[derive(Debug)]
pub struct ScrapeRun {
    pub id: i64,
    pub category: String,
    pub started_at: i64,
    pub finished_at: Option<i64>,
    pub pages_fetched: Option<i64>,
    pub rows_saved: Option<i64>,
    pub containers_skipped: Option<i64>,
    pub termination: Option<String>,
    pub error_message: Option<String>,
}

pub fn start_scrape_run(conn: &Connection, category: &str, now: i64) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO scrape_runs (category, started_at) VALUES (?, ?)",
        params![category, now],
    )
    .map_err(|e| AppError::DbError(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

pub fn end_scrape_run(
    conn: &Connection,
    run_id: i64,
    now: i64,
    outcome: &ScrapeOutcome,
) -> Result<(), AppError> {
    let error = match &outcome.termination {
        Termination::FetchFailed(msg) => Some(msg.as_str()),
        _ => None,
    };

    conn.execute(
        "UPDATE scrape_runs
         SET finished_at = ?, pages_fetched = ?, rows_saved = ?,
             containers_skipped = ?, termination = ?, error_message = ?
         WHERE id = ?",
        params![
            now,
            outcome.pages_fetched as i64,
            outcome.rows as i64,
            outcome.skipped as i64,
            outcome.termination.label(),
            error,
            run_id,
        ],
    )
    .map_err(|e| AppError::DbError(e.to_string()))?;
    Ok(())
}

/// Close a run that died before producing an outcome, e.g. when
/// persisting a batch failed mid-scrape. Counters stay NULL; the error
/// is what matters.
pub fn fail_scrape_run(
    conn: &Connection,
    run_id: i64,
    now: i64,
    error: &str,
) -> Result<(), AppError> {
    conn.execute(
        "UPDATE scrape_runs
         SET finished_at = ?, termination = 'aborted', error_message = ?
         WHERE id = ?",
        params![now, error, run_id],
    )
    .map_err(|e| AppError::DbError(e.to_string()))?;
    Ok(())
}

pub fn get_recent_runs(conn: &mut Connection) -> Result<Vec<ScrapeRun>, AppError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, category, started_at, finished_at, pages_fetched,
                    rows_saved, containers_skipped, termination, error_message
             FROM scrape_runs ORDER BY started_at DESC LIMIT 50",
        )
        .map_err(|e| AppError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(ScrapeRun {
                id: row.get(0)?,
                category: row.get(1)?,
                started_at: row.get(2)?,
                finished_at: row.get(3)?,
                pages_fetched: row.get(4)?,
                rows_saved: row.get(5)?,
                containers_skipped: row.get(6)?,
                termination: row.get(7)?,
                error_message: row.get(8)?,
            })
        })
        .map_err(|e| AppError::DbError(e.to_string()))?;

    let mut runs = Vec::new();
    for r in rows {
        runs.push(r.map_err(|e| AppError::DbError(e.to_string()))?);
    }
    Ok(runs)
}
