//! Resilient fan-out over the upstream summary sources.
//!
//! Every upstream call is *safe-called*: a failure is logged and replaced by the
//! domain's zero value, so building an overview never fails. Failures are
//! isolated per source; the three calls run concurrently and are joined (no
//! fail-fast), so a slow or failing upstream never affects its siblings.

use std::sync::Arc;

use erpreport_core::{
    process_clock, Clock, FinanceSummary, HealthReport, HrSummary, InventorySummary, Overview,
    SourceHealth, Upstream, ZeroValue,
};
use erpreport_upstream::{SummarySource, UpstreamClients};

/// Builds overviews from three independent summary sources.
///
/// Holds no per-request state: each call is a fresh fan-out.
#[derive(Clone)]
pub struct ResilientAggregator {
    finance: Arc<dyn SummarySource<FinanceSummary>>,
    hr: Arc<dyn SummarySource<HrSummary>>,
    inventory: Arc<dyn SummarySource<InventorySummary>>,
    clock: Arc<dyn Clock>,
}

impl ResilientAggregator {
    /// Aggregator stamping overviews with the process-wide monotonic clock.
    pub fn new(
        finance: Arc<dyn SummarySource<FinanceSummary>>,
        hr: Arc<dyn SummarySource<HrSummary>>,
        inventory: Arc<dyn SummarySource<InventorySummary>>,
    ) -> Self {
        Self {
            finance,
            hr,
            inventory,
            clock: process_clock(),
        }
    }

    pub fn from_clients(clients: UpstreamClients) -> Self {
        Self::new(
            Arc::new(clients.finance),
            Arc::new(clients.hr),
            Arc::new(clients.inventory),
        )
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Fully populated overview; degraded domains carry zero values.
    pub async fn build_overview(&self) -> Overview {
        self.build_overview_with_health().await.0
    }

    /// Same as [`build_overview`](Self::build_overview), plus which sources
    /// were substituted. The report never leaves the process.
    pub async fn build_overview_with_health(&self) -> (Overview, HealthReport) {
        let (finance, hr, inventory) = tokio::join!(
            safe_call(self.finance.as_ref()),
            safe_call(self.hr.as_ref()),
            safe_call(self.inventory.as_ref()),
        );

        let report = HealthReport::new([
            (Upstream::Finance, finance.status()),
            (Upstream::Hr, hr.status()),
            (Upstream::Inventory, inventory.status()),
        ]);

        let overview = Overview::new(
            finance.into_summary(),
            hr.into_summary(),
            inventory.into_summary(),
            self.clock.now(),
        );

        if report.is_fully_healthy() {
            tracing::info!(generated_at = %overview.generated_at_utc(), "overview built from all upstreams");
        } else {
            let degraded: Vec<&str> = report.degraded().iter().map(|u| u.as_str()).collect();
            tracing::warn!(
                generated_at = %overview.generated_at_utc(),
                degraded = ?degraded,
                "overview built with zero-value substitutes"
            );
        }

        (overview, report)
    }

    pub async fn finance_summary(&self) -> FinanceSummary {
        safe_call(self.finance.as_ref()).await.into_summary()
    }

    pub async fn hr_summary(&self) -> HrSummary {
        safe_call(self.hr.as_ref()).await.into_summary()
    }

    pub async fn inventory_summary(&self) -> InventorySummary {
        safe_call(self.inventory.as_ref()).await.into_summary()
    }
}

impl core::fmt::Debug for ResilientAggregator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResilientAggregator")
            .field("finance", &self.finance.upstream())
            .field("hr", &self.hr.upstream())
            .field("inventory", &self.inventory.upstream())
            .finish_non_exhaustive()
    }
}

async fn safe_call<S>(source: &dyn SummarySource<S>) -> SourceHealth<S>
where
    S: ZeroValue + Send,
{
    match source.fetch().await {
        Ok(summary) => SourceHealth::Healthy(summary),
        Err(err) => {
            tracing::warn!(
                upstream = %source.upstream(),
                error = %err,
                "upstream summary unavailable; substituting zero values"
            );
            SourceHealth::degraded(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::{DateTime, Utc};
    use erpreport_core::{FixedClock, SourceStatus};
    use erpreport_upstream::RemoteUnavailable;
    use rust_decimal_macros::dec;
    use tokio::sync::Barrier;

    /// In-process source returning a scripted outcome.
    struct StubSource<S> {
        upstream: Upstream,
        outcome: Result<S, RemoteUnavailable>,
        calls: AtomicUsize,
        barrier: Option<Arc<Barrier>>,
    }

    impl<S> StubSource<S> {
        fn ok(upstream: Upstream, summary: S) -> Arc<Self> {
            Arc::new(Self {
                upstream,
                outcome: Ok(summary),
                calls: AtomicUsize::new(0),
                barrier: None,
            })
        }

        fn failing(upstream: Upstream) -> Arc<Self> {
            Arc::new(Self {
                upstream,
                outcome: Err(RemoteUnavailable::Transport {
                    upstream,
                    message: "connection refused".into(),
                }),
                calls: AtomicUsize::new(0),
                barrier: None,
            })
        }

        /// Succeeds only once every other barrier party is in flight too.
        fn rendezvous(upstream: Upstream, summary: S, barrier: Arc<Barrier>) -> Arc<Self> {
            Arc::new(Self {
                upstream,
                outcome: Ok(summary),
                calls: AtomicUsize::new(0),
                barrier: Some(barrier),
            })
        }
    }

    #[async_trait::async_trait]
    impl<S: Clone + Send + Sync + 'static> SummarySource<S> for StubSource<S> {
        fn upstream(&self) -> Upstream {
            self.upstream
        }

        async fn fetch(&self) -> Result<S, RemoteUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
            self.outcome.clone()
        }
    }

    fn finance() -> FinanceSummary {
        FinanceSummary {
            outstanding_receivables: dec!(1000.50),
            overdue_receivables: dec!(200.00),
            current_month_expense_total: dec!(500.00),
            budget_utilization: dec!(0.75),
            upcoming_payroll_commitment: dec!(3000.00),
        }
    }

    fn hr() -> HrSummary {
        HrSummary {
            total_employees: 42,
            active_employees: 40,
            departments: 6,
            pending_resignations: 2,
        }
    }

    fn inventory() -> InventorySummary {
        InventorySummary {
            total_active_items: 120,
            total_warehouses: 3,
            total_quantity_on_hand: dec!(4500.0),
            total_quantity_reserved: dec!(300.0),
            items_below_safety_stock: 5,
        }
    }

    fn fixed_instant() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-05-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn aggregator(finance_ok: bool, hr_ok: bool, inventory_ok: bool) -> ResilientAggregator {
        let f: Arc<dyn SummarySource<FinanceSummary>> = if finance_ok {
            StubSource::ok(Upstream::Finance, finance())
        } else {
            StubSource::failing(Upstream::Finance)
        };
        let h: Arc<dyn SummarySource<HrSummary>> = if hr_ok {
            StubSource::ok(Upstream::Hr, hr())
        } else {
            StubSource::failing(Upstream::Hr)
        };
        let i: Arc<dyn SummarySource<InventorySummary>> = if inventory_ok {
            StubSource::ok(Upstream::Inventory, inventory())
        } else {
            StubSource::failing(Upstream::Inventory)
        };
        ResilientAggregator::new(f, h, i).with_clock(Arc::new(FixedClock(fixed_instant())))
    }

    #[tokio::test]
    async fn every_outcome_combination_yields_a_complete_overview() {
        for mask in 0u8..8 {
            let (f_ok, h_ok, i_ok) = (mask & 1 != 0, mask & 2 != 0, mask & 4 != 0);
            let (overview, report) = aggregator(f_ok, h_ok, i_ok).build_overview_with_health().await;

            let expected_finance = if f_ok { finance() } else { FinanceSummary::zero() };
            let expected_hr = if h_ok { hr() } else { HrSummary::zero() };
            let expected_inventory = if i_ok { inventory() } else { InventorySummary::zero() };

            assert_eq!(overview.finance(), &expected_finance, "mask {mask:03b}");
            assert_eq!(overview.hr(), &expected_hr, "mask {mask:03b}");
            assert_eq!(overview.inventory(), &expected_inventory, "mask {mask:03b}");
            assert_eq!(overview.generated_at_utc(), fixed_instant());

            assert_eq!(report.is_fully_healthy(), mask == 0b111);
            assert_eq!(
                report.status(Upstream::Hr) == Some(&SourceStatus::Healthy),
                h_ok,
                "mask {mask:03b}"
            );
        }
    }

    #[tokio::test]
    async fn hr_outage_zeroes_only_hr() {
        let overview = aggregator(true, false, true).build_overview().await;

        assert_eq!(overview.finance().outstanding_receivables, dec!(1000.50));
        assert_eq!(overview.finance().overdue_receivables, dec!(200.00));
        assert_eq!(overview.finance().current_month_expense_total, dec!(500.00));
        assert_eq!(overview.finance().budget_utilization, dec!(0.75));
        assert_eq!(overview.finance().upcoming_payroll_commitment, dec!(3000.00));

        assert_eq!(
            *overview.hr(),
            HrSummary {
                total_employees: 0,
                active_employees: 0,
                departments: 0,
                pending_resignations: 0,
            }
        );

        assert_eq!(*overview.inventory(), inventory());
    }

    #[tokio::test]
    async fn total_outage_is_a_zeroed_overview_not_an_error() {
        let (overview, report) = aggregator(false, false, false).build_overview_with_health().await;

        assert!(overview.finance().is_zero());
        assert!(overview.hr().is_zero());
        assert!(overview.inventory().is_zero());
        assert_eq!(report.degraded(), Upstream::ALL.to_vec());
        assert!(matches!(
            report.status(Upstream::Finance),
            Some(SourceStatus::Degraded(reason)) if reason.contains("connection refused")
        ));
    }

    #[tokio::test]
    async fn generation_stamp_is_non_decreasing_with_default_clock() {
        let agg = ResilientAggregator::new(
            StubSource::ok(Upstream::Finance, finance()),
            StubSource::failing(Upstream::Hr),
            StubSource::ok(Upstream::Inventory, inventory()),
        );

        let mut last = agg.build_overview().await.generated_at_utc();
        for _ in 0..50 {
            let next = agg.build_overview().await.generated_at_utc();
            assert!(next >= last);
            last = next;
        }
    }

    #[tokio::test]
    async fn single_domain_getters_are_idempotent_and_uncached() {
        let finance_source = StubSource::ok(Upstream::Finance, finance());
        let agg = ResilientAggregator::new(
            finance_source.clone(),
            StubSource::failing(Upstream::Hr),
            StubSource::ok(Upstream::Inventory, inventory()),
        );

        let first = agg.finance_summary().await;
        let second = agg.finance_summary().await;
        assert_eq!(first, second);
        assert_eq!(first.outstanding_receivables.to_string(), second.outstanding_receivables.to_string());
        assert_eq!(finance_source.calls.load(Ordering::SeqCst), 2);

        assert_eq!(agg.hr_summary().await, HrSummary::zero());
        assert_eq!(agg.hr_summary().await, HrSummary::zero());
        assert_eq!(agg.inventory_summary().await, inventory());
    }

    #[tokio::test]
    async fn upstream_calls_run_concurrently_and_failures_do_not_cancel_siblings() {
        // HR and inventory each wait for the other to be in flight; finance fails
        // straight away. Sequential calls would deadlock here.
        let barrier = Arc::new(Barrier::new(2));
        let agg = ResilientAggregator::new(
            StubSource::failing(Upstream::Finance),
            StubSource::rendezvous(Upstream::Hr, hr(), barrier.clone()),
            StubSource::rendezvous(Upstream::Inventory, inventory(), barrier),
        );

        let overview = tokio::time::timeout(Duration::from_secs(5), agg.build_overview())
            .await
            .expect("upstream calls were not issued concurrently");

        assert!(overview.finance().is_zero());
        assert_eq!(*overview.hr(), hr());
        assert_eq!(*overview.inventory(), inventory());
    }

    #[tokio::test]
    async fn aggregators_in_one_process_share_the_generation_clock() {
        let a = aggregator_with_default_clock();
        let b = aggregator_with_default_clock();

        let mut last = a.build_overview().await.generated_at_utc();
        for i in 0..20 {
            let agg = if i % 2 == 0 { &b } else { &a };
            let next = agg.build_overview().await.generated_at_utc();
            assert!(next >= last);
            last = next;
        }
    }

    fn aggregator_with_default_clock() -> ResilientAggregator {
        ResilientAggregator::new(
            StubSource::ok(Upstream::Finance, finance()),
            StubSource::ok(Upstream::Hr, hr()),
            StubSource::ok(Upstream::Inventory, inventory()),
        )
    }

    mod logging {
        use super::*;
        use std::io;
        use std::sync::Mutex;

        use tracing_subscriber::fmt::MakeWriter;

        /// Collects formatted log output in memory.
        #[derive(Clone, Default)]
        struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

        impl CapturedLogs {
            fn text(&self) -> String {
                String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
            }
        }

        impl io::Write for CapturedLogs {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        impl<'a> MakeWriter<'a> for CapturedLogs {
            type Writer = CapturedLogs;

            fn make_writer(&'a self) -> Self::Writer {
                self.clone()
            }
        }

        /// Builds one overview with a capturing subscriber installed on this thread.
        async fn logs_of(agg: ResilientAggregator) -> String {
            let logs = CapturedLogs::default();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(logs.clone())
                .with_ansi(false)
                .with_max_level(tracing::Level::INFO)
                .finish();

            let _guard = tracing::subscriber::set_default(subscriber);
            agg.build_overview().await;
            logs.text()
        }

        #[tokio::test]
        async fn failing_source_is_logged_as_warning_with_upstream_and_reason() {
            let logs = logs_of(aggregator(true, false, true)).await;

            let reason = RemoteUnavailable::Transport {
                upstream: Upstream::Hr,
                message: "connection refused".into(),
            }
            .to_string();

            let substituted = logs
                .lines()
                .find(|l| l.contains("substituting zero values"))
                .unwrap_or_else(|| panic!("no substitution warning in:\n{logs}"));
            assert!(substituted.contains("WARN"), "{substituted}");
            assert!(substituted.contains("upstream=hr"), "{substituted}");
            assert!(substituted.contains(&reason), "{substituted}");

            let summary = logs
                .lines()
                .find(|l| l.contains("overview built with zero-value substitutes"))
                .unwrap_or_else(|| panic!("no health summary in:\n{logs}"));
            assert!(summary.contains("WARN"), "{summary}");
            assert!(summary.contains("\"hr\""), "{summary}");
            assert!(!summary.contains("\"finance\""), "{summary}");
        }

        #[tokio::test]
        async fn healthy_build_logs_no_warning() {
            let logs = logs_of(aggregator(true, true, true)).await;

            assert!(!logs.contains("WARN"), "{logs}");
            let summary = logs
                .lines()
                .find(|l| l.contains("overview built from all upstreams"))
                .unwrap_or_else(|| panic!("no health summary in:\n{logs}"));
            assert!(summary.contains("INFO"), "{summary}");
        }
    }
}
