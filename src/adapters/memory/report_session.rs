//! In-Memory Report Store Adapter
//!
//! Keeps reports and likes in memory with serial ids. Useful for testing
//! and development; query order and paging match the PostgreSQL adapter.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EmployeeId, ErrorCode, LikeId, ReportId};
use crate::domain::like::Like;
use crate::domain::report::{NewReport, Report};
use crate::ports::{PageRequest, ReportQuery, ReportSession};

#[derive(Debug, Default)]
struct StoreState {
    reports: BTreeMap<ReportId, Report>,
    likes: BTreeMap<LikeId, Like>,
    last_report_id: i32,
    last_like_id: i32,
}

impl StoreState {
    /// Reports matching the query, newest first.
    fn select(&self, query: ReportQuery) -> Vec<Report> {
        let liked: BTreeSet<ReportId> = match query {
            ReportQuery::LikedBy(employee_id) => self
                .likes
                .values()
                .filter(|like| like.employee_id() == employee_id)
                .map(Like::report_id)
                .collect(),
            _ => BTreeSet::new(),
        };

        self.reports
            .values()
            .rev()
            .filter(|report| match query {
                ReportQuery::All => true,
                ReportQuery::OwnedBy(employee_id) => report.employee_id() == employee_id,
                ReportQuery::LikedBy(_) => liked.contains(&report.id()),
            })
            .cloned()
            .collect()
    }
}

/// In-memory report store; sessions opened from it share its state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryReportStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session on this store.
    pub fn open_session(&self) -> InMemoryReportSession {
        InMemoryReportSession {
            state: Some(self.state.clone()),
        }
    }

    /// Get the number of stored reports
    pub async fn report_count(&self) -> usize {
        self.state.read().await.reports.len()
    }

    /// Get the number of stored likes
    pub async fn like_count(&self) -> usize {
        self.state.read().await.likes.len()
    }
}

/// Session on an [`InMemoryReportStore`].
#[derive(Debug)]
pub struct InMemoryReportSession {
    state: Option<Arc<RwLock<StoreState>>>,
}

impl InMemoryReportSession {
    fn state(&self) -> Result<&RwLock<StoreState>, DomainError> {
        self.state.as_deref().ok_or_else(DomainError::session_closed)
    }
}

#[async_trait]
impl ReportSession for InMemoryReportSession {
    async fn fetch_reports(
        &mut self,
        query: ReportQuery,
        page: Option<PageRequest>,
    ) -> Result<Vec<Report>, DomainError> {
        let state = self.state()?.read().await;
        let reports = state.select(query);
        Ok(match page {
            Some(page) => page.slice(&reports),
            None => reports,
        })
    }

    async fn count_reports(&mut self, query: ReportQuery) -> Result<u64, DomainError> {
        let state = self.state()?.read().await;
        Ok(state.select(query).len() as u64)
    }

    async fn find_report(&mut self, id: ReportId) -> Result<Option<Report>, DomainError> {
        let state = self.state()?.read().await;
        Ok(state.reports.get(&id).cloned())
    }

    async fn insert_report(&mut self, report: &NewReport) -> Result<Report, DomainError> {
        let mut state = self.state()?.write().await;
        state.last_report_id += 1;
        let stored = report
            .clone()
            .into_report(ReportId::new(state.last_report_id));
        state.reports.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update_report(&mut self, report: &Report) -> Result<(), DomainError> {
        let mut state = self.state()?.write().await;
        match state.reports.get_mut(&report.id()) {
            Some(stored) => {
                *stored = report.clone();
                Ok(())
            }
            None => Err(report_not_found(report.id())),
        }
    }

    async fn insert_like(&mut self, like: &Like) -> Result<Like, DomainError> {
        let mut state = self.state()?.write().await;
        if !state.reports.contains_key(&like.report_id()) {
            return Err(report_not_found(like.report_id()));
        }

        state.last_like_id += 1;
        let id = LikeId::new(state.last_like_id);
        let stored = Like::reconstitute(id, like.report_id(), like.employee_id());
        state.likes.insert(id, stored);
        Ok(stored)
    }

    async fn find_like(
        &mut self,
        report_id: ReportId,
        employee_id: EmployeeId,
    ) -> Result<Option<Like>, DomainError> {
        let state = self.state()?.read().await;
        Ok(state
            .likes
            .values()
            .find(|like| like.report_id() == report_id && like.employee_id() == employee_id)
            .copied())
    }

    async fn delete_like(&mut self, id: LikeId) -> Result<(), DomainError> {
        let mut state = self.state()?.write().await;
        match state.likes.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::LikeNotFound,
                format!("Like not found: {}", id),
            )),
        }
    }

    async fn count_likes(&mut self, report_id: ReportId) -> Result<u64, DomainError> {
        let state = self.state()?.read().await;
        Ok(state
            .likes
            .values()
            .filter(|like| like.report_id() == report_id)
            .count() as u64)
    }

    async fn close(&mut self) -> Result<(), DomainError> {
        self.state = None;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state.is_some()
    }
}

fn report_not_found(id: ReportId) -> DomainError {
    DomainError::new(ErrorCode::ReportNotFound, format!("Report not found: {}", id))
}
