//! Domain summaries and the composite overview.
//!
//! Field names are camelCase on the wire, matching the upstream services.
//! Decimal quantities travel as JSON numbers carrying their exact digits
//! (`1000.50` stays `1000.50`); they never pass through `f64`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_object::{ValueObject, ZeroValue};

/// Receivables, spend and payroll figures from the finance service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub outstanding_receivables: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub overdue_receivables: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub current_month_expense_total: Decimal,
    /// Ratio, typically in `[0, 1]` (not enforced; upstream owns the figure).
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub budget_utilization: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub upcoming_payroll_commitment: Decimal,
}

impl ValueObject for FinanceSummary {}

impl ZeroValue for FinanceSummary {
    fn zero() -> Self {
        Self {
            outstanding_receivables: Decimal::ZERO,
            overdue_receivables: Decimal::ZERO,
            current_month_expense_total: Decimal::ZERO,
            budget_utilization: Decimal::ZERO,
            upcoming_payroll_commitment: Decimal::ZERO,
        }
    }
}

/// Headcount figures from the HR service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrSummary {
    pub total_employees: u32,
    pub active_employees: u32,
    pub departments: u32,
    pub pending_resignations: u32,
}

impl ValueObject for HrSummary {}

impl ZeroValue for HrSummary {
    fn zero() -> Self {
        Self {
            total_employees: 0,
            active_employees: 0,
            departments: 0,
            pending_resignations: 0,
        }
    }
}

/// Stock figures from the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_active_items: u32,
    pub total_warehouses: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_quantity_on_hand: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_quantity_reserved: Decimal,
    pub items_below_safety_stock: u32,
}

impl ValueObject for InventorySummary {}

impl ZeroValue for InventorySummary {
    fn zero() -> Self {
        Self {
            total_active_items: 0,
            total_warehouses: 0,
            total_quantity_on_hand: Decimal::ZERO,
            total_quantity_reserved: Decimal::ZERO,
            items_below_safety_stock: 0,
        }
    }
}

/// Composite read model: one summary per domain plus the generation instant.
///
/// Built fresh for every request and never mutated afterwards; consumers get
/// read-only accessors. Every field is always populated (degraded domains carry
/// their zero value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    finance: FinanceSummary,
    hr: HrSummary,
    inventory: InventorySummary,
    #[serde(alias = "lastUpdatedUtc")]
    generated_at_utc: DateTime<Utc>,
}

impl Overview {
    pub fn new(
        finance: FinanceSummary,
        hr: HrSummary,
        inventory: InventorySummary,
        generated_at_utc: DateTime<Utc>,
    ) -> Self {
        Self {
            finance,
            hr,
            inventory,
            generated_at_utc,
        }
    }

    pub fn finance(&self) -> &FinanceSummary {
        &self.finance
    }

    pub fn hr(&self) -> &HrSummary {
        &self.hr
    }

    pub fn inventory(&self) -> &InventorySummary {
        &self.inventory
    }

    pub fn generated_at_utc(&self) -> DateTime<Utc> {
        self.generated_at_utc
    }
}

impl ValueObject for Overview {}
