//! Section/label layout shared by every export format.
//!
//! Labels double as lookup keys when a spreadsheet is parsed back, so they
//! must stay unique across sections.

use chrono::{DateTime, SecondsFormat, Utc};
use erpreport_core::Overview;
use rust_decimal::Decimal;

pub(crate) const REPORT_TITLE: &str = "ERP System Overview Report";

pub(crate) const FINANCE_TITLE: &str = "Finance Summary";
pub(crate) const HR_TITLE: &str = "HR Summary";
pub(crate) const INVENTORY_TITLE: &str = "Inventory Summary";

pub(crate) const OUTSTANDING_RECEIVABLES: &str = "Outstanding Receivables";
pub(crate) const OVERDUE_RECEIVABLES: &str = "Overdue Receivables";
pub(crate) const CURRENT_MONTH_EXPENSE_TOTAL: &str = "Current Month Expense Total";
pub(crate) const BUDGET_UTILIZATION: &str = "Budget Utilization";
pub(crate) const UPCOMING_PAYROLL_COMMITMENT: &str = "Upcoming Payroll Commitment";

pub(crate) const TOTAL_EMPLOYEES: &str = "Total Employees";
pub(crate) const ACTIVE_EMPLOYEES: &str = "Active Employees";
pub(crate) const DEPARTMENTS: &str = "Departments";
pub(crate) const PENDING_RESIGNATIONS: &str = "Pending Resignations";

pub(crate) const TOTAL_ACTIVE_ITEMS: &str = "Total Active Items";
pub(crate) const TOTAL_WAREHOUSES: &str = "Total Warehouses";
pub(crate) const TOTAL_QUANTITY_ON_HAND: &str = "Total Quantity On Hand";
pub(crate) const TOTAL_QUANTITY_RESERVED: &str = "Total Quantity Reserved";
pub(crate) const ITEMS_BELOW_SAFETY_STOCK: &str = "Items Below Safety Stock";

pub(crate) const GENERATED_AT: &str = "Generated At (UTC)";

/// A single figure, kept typed so formats that have numeric cells can use them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum Value {
    Amount(Decimal),
    Count(u32),
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Amount(d) => write!(f, "{d}"),
            Value::Count(n) => write!(f, "{n}"),
        }
    }
}

pub(crate) struct Section {
    pub title: &'static str,
    pub rows: Vec<(&'static str, Value)>,
}

/// Finance, HR, Inventory, in that order.
pub(crate) fn sections(overview: &Overview) -> [Section; 3] {
    let finance = overview.finance();
    let hr = overview.hr();
    let inventory = overview.inventory();

    [
        Section {
            title: FINANCE_TITLE,
            rows: vec![
                (OUTSTANDING_RECEIVABLES, Value::Amount(finance.outstanding_receivables)),
                (OVERDUE_RECEIVABLES, Value::Amount(finance.overdue_receivables)),
                (CURRENT_MONTH_EXPENSE_TOTAL, Value::Amount(finance.current_month_expense_total)),
                (BUDGET_UTILIZATION, Value::Amount(finance.budget_utilization)),
                (UPCOMING_PAYROLL_COMMITMENT, Value::Amount(finance.upcoming_payroll_commitment)),
            ],
        },
        Section {
            title: HR_TITLE,
            rows: vec![
                (TOTAL_EMPLOYEES, Value::Count(hr.total_employees)),
                (ACTIVE_EMPLOYEES, Value::Count(hr.active_employees)),
                (DEPARTMENTS, Value::Count(hr.departments)),
                (PENDING_RESIGNATIONS, Value::Count(hr.pending_resignations)),
            ],
        },
        Section {
            title: INVENTORY_TITLE,
            rows: vec![
                (TOTAL_ACTIVE_ITEMS, Value::Count(inventory.total_active_items)),
                (TOTAL_WAREHOUSES, Value::Count(inventory.total_warehouses)),
                (TOTAL_QUANTITY_ON_HAND, Value::Amount(inventory.total_quantity_on_hand)),
                (TOTAL_QUANTITY_RESERVED, Value::Amount(inventory.total_quantity_reserved)),
                (ITEMS_BELOW_SAFETY_STOCK, Value::Count(inventory.items_below_safety_stock)),
            ],
        },
    ]
}

/// RFC 3339 with only as many fractional digits as the instant needs.
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
