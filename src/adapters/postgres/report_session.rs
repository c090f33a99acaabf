//! PostgreSQL implementation of ReportSession.
//!
//! Holds one pooled connection. Reads run directly on it; each write runs
//! in its own `BEGIN … COMMIT` on the same connection.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::pool::PoolConnection;
use sqlx::{Connection, PgConnection, Postgres, Transaction};
use tracing::{debug, warn};

use crate::domain::foundation::{
    DomainError, EmployeeId, ErrorCode, LikeId, ReportId, Timestamp,
};
use crate::domain::like::Like;
use crate::domain::report::{NewReport, Report};
use crate::ports::{PageRequest, ReportQuery, ReportSession};

const REPORT_COLUMNS: &str =
    "SELECT id, employee_id, report_date, title, content, created_at, updated_at FROM reports";

/// PostgreSQL implementation of ReportSession.
pub struct PostgresReportSession {
    conn: Option<PoolConnection<Postgres>>,
}

impl PostgresReportSession {
    pub(crate) fn new(conn: PoolConnection<Postgres>) -> Self {
        Self { conn: Some(conn) }
    }

    fn conn(&mut self) -> Result<&mut PgConnection, DomainError> {
        self.conn
            .as_deref_mut()
            .ok_or_else(DomainError::session_closed)
    }

    async fn begin(&mut self) -> Result<Transaction<'_, Postgres>, DomainError> {
        self.conn()?
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))
    }
}

#[async_trait]
impl ReportSession for PostgresReportSession {
    async fn fetch_reports(
        &mut self,
        query: ReportQuery,
        page: Option<PageRequest>,
    ) -> Result<Vec<Report>, DomainError> {
        let named = NamedQuery::of(query);
        let sql = named.select_sql(page.is_some());

        let mut statement = sqlx::query_as::<_, ReportRow>(&sql);
        if let Some(employee_id) = named.employee_id {
            statement = statement.bind(employee_id);
        }
        if let Some(page) = page {
            statement = statement
                .bind(i64::from(page.limit))
                .bind(i64::from(page.offset));
        }

        let rows = statement
            .fetch_all(self.conn()?)
            .await
            .map_err(|e| DomainError::database(&format!("Failed to run {}", query), e))?;

        Ok(rows.into_iter().map(ReportRow::into_report).collect())
    }

    async fn count_reports(&mut self, query: ReportQuery) -> Result<u64, DomainError> {
        let named = NamedQuery::of(query);

        let mut statement = sqlx::query_scalar::<_, i64>(named.count);
        if let Some(employee_id) = named.employee_id {
            statement = statement.bind(employee_id);
        }

        let count = statement
            .fetch_one(self.conn()?)
            .await
            .map_err(|e| DomainError::database(&format!("Failed to count {}", query), e))?;

        Ok(count as u64)
    }

    async fn find_report(&mut self, id: ReportId) -> Result<Option<Report>, DomainError> {
        let sql = format!("{} WHERE id = $1", REPORT_COLUMNS);
        let row = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(id.value())
            .fetch_optional(self.conn()?)
            .await
            .map_err(|e| DomainError::database("Failed to fetch report", e))?;

        Ok(row.map(ReportRow::into_report))
    }

    async fn insert_report(&mut self, report: &NewReport) -> Result<Report, DomainError> {
        let mut tx = self.begin().await?;
        let result = insert_report_conn(&mut tx, report).await;
        let id = finish(tx, result, "insert_report").await?;
        Ok(report.clone().into_report(id))
    }

    async fn update_report(&mut self, report: &Report) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        let result = update_report_conn(&mut tx, report).await;
        finish(tx, result, "update_report").await
    }

    async fn insert_like(&mut self, like: &Like) -> Result<Like, DomainError> {
        let mut tx = self.begin().await?;
        let result = insert_like_conn(&mut tx, like).await;
        let id = finish(tx, result, "insert_like").await?;
        Ok(Like::reconstitute(id, like.report_id(), like.employee_id()))
    }

    async fn find_like(
        &mut self,
        report_id: ReportId,
        employee_id: EmployeeId,
    ) -> Result<Option<Like>, DomainError> {
        let row = sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT id, report_id, employee_id
            FROM likes
            WHERE report_id = $1 AND employee_id = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(report_id.value())
        .bind(employee_id.value())
        .fetch_optional(self.conn()?)
        .await
        .map_err(|e| DomainError::database("Failed to fetch like", e))?;

        Ok(row.map(LikeRow::into_like))
    }

    async fn delete_like(&mut self, id: LikeId) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        let result = delete_like_conn(&mut tx, id).await;
        finish(tx, result, "delete_like").await
    }

    async fn count_likes(&mut self, report_id: ReportId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE report_id = $1")
            .bind(report_id.value())
            .fetch_one(self.conn()?)
            .await
            .map_err(|e| DomainError::database("Failed to count likes", e))?;

        Ok(count as u64)
    }

    async fn close(&mut self) -> Result<(), DomainError> {
        if self.conn.take().is_some() {
            debug!("Report session closed");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Write statements
// ════════════════════════════════════════════════════════════════════════════

async fn insert_report_conn(
    conn: &mut PgConnection,
    report: &NewReport,
) -> Result<ReportId, DomainError> {
    let id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO reports (
            employee_id, report_date, title, content, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(report.employee_id.value())
    .bind(report.report_date)
    .bind(&report.title)
    .bind(&report.content)
    .bind(report.created_at.as_datetime())
    .bind(report.updated_at.as_datetime())
    .fetch_one(conn)
    .await
    .map_err(|e| DomainError::database("Failed to insert report", e))?;

    Ok(ReportId::new(id))
}

async fn update_report_conn(conn: &mut PgConnection, report: &Report) -> Result<(), DomainError> {
    let result = sqlx::query(
        r#"
        UPDATE reports SET
            report_date = $2,
            title = $3,
            content = $4,
            updated_at = $5
        WHERE id = $1
        "#,
    )
    .bind(report.id().value())
    .bind(report.report_date())
    .bind(report.title())
    .bind(report.content())
    .bind(report.updated_at().as_datetime())
    .execute(conn)
    .await
    .map_err(|e| DomainError::database("Failed to update report", e))?;

    if result.rows_affected() == 0 {
        return Err(DomainError::new(
            ErrorCode::ReportNotFound,
            format!("Report not found: {}", report.id()),
        ));
    }

    Ok(())
}

async fn insert_like_conn(conn: &mut PgConnection, like: &Like) -> Result<LikeId, DomainError> {
    let id: i32 = sqlx::query_scalar(
        "INSERT INTO likes (report_id, employee_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(like.report_id().value())
    .bind(like.employee_id().value())
    .fetch_one(conn)
    .await
    .map_err(|e| {
        let missing_report = e
            .as_database_error()
            .map_or(false, |db| db.is_foreign_key_violation());
        if missing_report {
            DomainError::new(
                ErrorCode::ReportNotFound,
                format!("Report not found: {}", like.report_id()),
            )
        } else {
            DomainError::database("Failed to insert like", e)
        }
    })?;

    Ok(LikeId::new(id))
}

async fn delete_like_conn(conn: &mut PgConnection, id: LikeId) -> Result<(), DomainError> {
    let result = sqlx::query("DELETE FROM likes WHERE id = $1")
        .bind(id.value())
        .execute(conn)
        .await
        .map_err(|e| DomainError::database("Failed to delete like", e))?;

    if result.rows_affected() == 0 {
        return Err(DomainError::new(
            ErrorCode::LikeNotFound,
            format!("Like not found: {}", id),
        ));
    }

    Ok(())
}

/// Commit on success, roll back on failure.
async fn finish<T>(
    tx: Transaction<'_, Postgres>,
    result: Result<T, DomainError>,
    operation: &'static str,
) -> Result<T, DomainError> {
    match result {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| DomainError::database("Failed to commit transaction", e))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(operation, error = %rollback_err, "Rollback failed");
            }
            warn!(operation, error = %err, "Transaction rolled back");
            Err(err)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Named queries and row mapping
// ════════════════════════════════════════════════════════════════════════════

/// SQL behind a [`ReportQuery`]. All list queries order by id descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NamedQuery {
    filter: &'static str,
    count: &'static str,
    employee_id: Option<i32>,
}

impl NamedQuery {
    fn of(query: ReportQuery) -> Self {
        match query {
            ReportQuery::All => Self {
                filter: "",
                count: "SELECT COUNT(*) FROM reports",
                employee_id: None,
            },
            ReportQuery::OwnedBy(employee_id) => Self {
                filter: " WHERE employee_id = $1",
                count: "SELECT COUNT(*) FROM reports WHERE employee_id = $1",
                employee_id: Some(employee_id.value()),
            },
            ReportQuery::LikedBy(employee_id) => Self {
                filter: " WHERE id IN (SELECT report_id FROM likes WHERE employee_id = $1)",
                count: "SELECT COUNT(*) FROM reports \
                        WHERE id IN (SELECT report_id FROM likes WHERE employee_id = $1)",
                employee_id: Some(employee_id.value()),
            },
        }
    }

    fn select_sql(&self, paged: bool) -> String {
        let mut sql = format!("{}{} ORDER BY id DESC", REPORT_COLUMNS, self.filter);
        if paged {
            let next = if self.employee_id.is_some() { 2 } else { 1 };
            sql.push_str(&format!(" LIMIT ${} OFFSET ${}", next, next + 1));
        }
        sql
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: i32,
    employee_id: i32,
    report_date: NaiveDate,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ReportRow {
    fn into_report(self) -> Report {
        Report::reconstitute(
            ReportId::new(self.id),
            EmployeeId::new(self.employee_id),
            self.report_date,
            self.title,
            self.content,
            Timestamp::from_datetime(self.created_at),
            Timestamp::from_datetime(self.updated_at),
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LikeRow {
    id: i32,
    report_id: i32,
    employee_id: i32,
}

impl LikeRow {
    fn into_like(self) -> Like {
        Like::reconstitute(
            LikeId::new(self.id),
            ReportId::new(self.report_id),
            EmployeeId::new(self.employee_id),
        )
    }
}
