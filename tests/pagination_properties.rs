//! Property tests for report paging.
//!
//! For any store size, page size and author mix, walking the pages in order
//! must reproduce the full newest-first listing with the count agreeing.

use chrono::NaiveDate;
use proptest::prelude::*;

use daily_report::adapters::InMemoryReportStore;
use daily_report::application::{EmployeeView, ReportService, ReportView};
use daily_report::domain::foundation::{EmployeeId, ReportId};
use daily_report::ports::PageRequest;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

fn employee(id: i32) -> EmployeeView {
    EmployeeView::new(EmployeeId::new(id), format!("E{}", id), "Employee")
}

fn ids(views: &[ReportView]) -> Vec<ReportId> {
    views.iter().map(|v| v.id.unwrap()).collect()
}

/// Create one report per entry, authored by the given employee, returning
/// the ids newest first.
async fn seed(service: &ReportService, store: &InMemoryReportStore, authors: &[i32]) -> Vec<ReportId> {
    let mut session = store.open_session();
    let mut created = Vec::new();
    for (n, author) in authors.iter().enumerate() {
        let view = ReportView::draft(
            EmployeeId::new(*author),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            format!("Report {}", n),
            "Content",
        );
        let saved = service.create(&mut session, view).await.unwrap().saved().unwrap();
        created.push(saved.id.unwrap());
    }
    created.reverse();
    created
}

proptest! {
    #[test]
    fn concatenated_pages_equal_full_listing(
        authors in prop::collection::vec(1..4i32, 0..40),
        per_page in 1..12u32,
    ) {
        let (pages, count, expected) = runtime().block_on(async {
            let store = InMemoryReportStore::new();
            let service = ReportService::new(per_page);
            let expected = seed(&service, &store, &authors).await;

            let mut session = store.open_session();
            let count = service.count_all(&mut session).await.unwrap();
            let mut pages = Vec::new();
            let mut page = 1;
            loop {
                let views = service.get_all_per_page(&mut session, page).await.unwrap();
                if views.is_empty() {
                    break;
                }
                prop_assert!(views.len() as u32 <= per_page);
                pages.extend(ids(&views));
                page += 1;
            }
            Ok::<_, TestCaseError>((pages, count, expected))
        })?;

        prop_assert_eq!(pages.len() as u64, count);
        prop_assert_eq!(pages, expected);
    }

    #[test]
    fn mine_count_matches_author_filter(
        authors in prop::collection::vec(1..4i32, 0..30),
        me in 1..4i32,
    ) {
        let (listed, count) = runtime().block_on(async {
            let store = InMemoryReportStore::new();
            let service = ReportService::new(100);
            seed(&service, &store, &authors).await;

            let mut session = store.open_session();
            let me = employee(me);
            let listed = service.get_mine_per_page(&mut session, &me, 1).await.unwrap();
            let count = service.count_all_mine(&mut session, &me).await.unwrap();
            (listed, count)
        });

        let expected = authors.iter().filter(|a| **a == me).count();
        prop_assert_eq!(listed.len(), expected);
        prop_assert_eq!(count, expected as u64);
        prop_assert!(listed.iter().all(|v| v.employee_id == EmployeeId::new(me)));
    }

    #[test]
    fn page_window_never_exceeds_limit(
        len in 0..200usize,
        page in 0..30u32,
        per_page in 1..50u32,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let window = PageRequest::page(page, per_page);
        let slice = window.slice(&items);

        prop_assert!(slice.len() <= per_page as usize);
        if let Some(first) = slice.first() {
            prop_assert_eq!(*first, window.offset as usize);
        }
    }
}
