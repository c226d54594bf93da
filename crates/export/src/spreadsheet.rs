//! XLSX spreadsheet report, and the reader that turns one back into an overview.
//!
//! One sheet, "ERP Overview":
//!
//! ```text
//! Finance Summary                                   (bold)
//! Outstanding Receivables | 1000.50 | Overdue Receivables | 200.00 | ...
//!
//! HR Summary                                        (bold)
//! Total Employees | 42 | ...
//!
//! Inventory Summary                                 (bold)
//! Total Active Items | 120 | ...
//!
//! Generated At (UTC) | 2026-05-01T12:30:00Z
//! ```
//!
//! Figures are numeric cells whose number format keeps the decimal's scale.
//! An amount an `f64` cannot hold exactly is written as text instead, so the
//! round trip never loses value.

use std::collections::HashMap;
use std::io::Cursor;
use std::str::FromStr;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::{DateTime, Utc};
use erpreport_core::{FinanceSummary, HrSummary, InventorySummary, Overview};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::{RenderError, SpreadsheetParseError};
use crate::layout::{self, *};
use crate::renderer::{ExportFormat, ReportRenderer};

pub const SHEET_NAME: &str = "ERP Overview";

#[derive(Debug, Default, Copy, Clone)]
pub struct SpreadsheetRenderer;

impl SpreadsheetRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for SpreadsheetRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Spreadsheet
    }

    fn render(&self, overview: &Overview) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME).map_err(xlsx_error)?;

        let mut row: u32 = 0;
        for section in layout::sections(overview) {
            sheet
                .write_string_with_format(row, 0, section.title, &bold)
                .map_err(xlsx_error)?;
            row += 1;

            let mut col: u16 = 0;
            for (label, value) in section.rows {
                sheet.write_string(row, col, label).map_err(xlsx_error)?;
                write_value(sheet, row, col + 1, value)?;
                col += 2;
            }
            // Data row plus one blank separator.
            row += 2;
        }

        sheet.write_string(row, 0, GENERATED_AT).map_err(xlsx_error)?;
        sheet
            .write_string(row, 1, layout::timestamp(overview.generated_at_utc()))
            .map_err(xlsx_error)?;
        sheet.autofit();

        let bytes = workbook.save_to_buffer().map_err(xlsx_error)?;
        tracing::debug!(bytes = bytes.len(), "rendered spreadsheet report");
        Ok(bytes)
    }
}

fn write_value(sheet: &mut Worksheet, row: u32, col: u16, value: Value) -> Result<(), RenderError> {
    match value {
        Value::Count(n) => sheet.write_number(row, col, n),
        Value::Amount(amount) => match exact_float(amount) {
            Some(number) if amount.scale() > 0 => {
                let format = Format::new().set_num_format(format!("0.{}", "0".repeat(amount.scale() as usize)));
                sheet.write_number_with_format(row, col, number, &format)
            }
            Some(number) => sheet.write_number(row, col, number),
            None => sheet.write_string(row, col, amount.to_string()),
        },
    }
    .map_err(xlsx_error)?;
    Ok(())
}

/// `Some` only when the float reads back as the same decimal value.
fn exact_float(amount: Decimal) -> Option<f64> {
    let number = amount.to_f64()?;
    let back = Decimal::from_str(&number.to_string()).ok()?;
    (back == amount).then_some(number)
}

fn xlsx_error(err: XlsxError) -> RenderError {
    RenderError::encoding(ExportFormat::Spreadsheet, err.to_string())
}

/// Reads a workbook produced by [`SpreadsheetRenderer`] back into an overview.
///
/// Cells are matched by label, not position: every label must sit in an even
/// column with its value directly to the right.
pub fn parse_spreadsheet(bytes: &[u8]) -> Result<Overview, SpreadsheetParseError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook.worksheet_range(SHEET_NAME)?;

    let mut cells: HashMap<String, String> = HashMap::new();
    for row in range.rows() {
        for pair in row.chunks_exact(2) {
            if let (Data::String(label), Some(value)) = (&pair[0], cell_text(&pair[1])) {
                cells.insert(label.trim().to_string(), value);
            }
        }
    }

    let finance = FinanceSummary {
        outstanding_receivables: decimal(&cells, OUTSTANDING_RECEIVABLES)?,
        overdue_receivables: decimal(&cells, OVERDUE_RECEIVABLES)?,
        current_month_expense_total: decimal(&cells, CURRENT_MONTH_EXPENSE_TOTAL)?,
        budget_utilization: decimal(&cells, BUDGET_UTILIZATION)?,
        upcoming_payroll_commitment: decimal(&cells, UPCOMING_PAYROLL_COMMITMENT)?,
    };

    let hr = HrSummary {
        total_employees: count(&cells, TOTAL_EMPLOYEES)?,
        active_employees: count(&cells, ACTIVE_EMPLOYEES)?,
        departments: count(&cells, DEPARTMENTS)?,
        pending_resignations: count(&cells, PENDING_RESIGNATIONS)?,
    };

    let inventory = InventorySummary {
        total_active_items: count(&cells, TOTAL_ACTIVE_ITEMS)?,
        total_warehouses: count(&cells, TOTAL_WAREHOUSES)?,
        total_quantity_on_hand: decimal(&cells, TOTAL_QUANTITY_ON_HAND)?,
        total_quantity_reserved: decimal(&cells, TOTAL_QUANTITY_RESERVED)?,
        items_below_safety_stock: count(&cells, ITEMS_BELOW_SAFETY_STOCK)?,
    };

    let generated_at = parse_cell(&cells, GENERATED_AT, |v| {
        DateTime::parse_from_rfc3339(v)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    })?;

    Ok(Overview::new(finance, hr, inventory, generated_at))
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        other => Some(other.to_string().trim().to_string()),
    }
}

fn decimal(cells: &HashMap<String, String>, label: &'static str) -> Result<Decimal, SpreadsheetParseError> {
    parse_cell(cells, label, |v| Decimal::from_str(v).ok())
}

fn count(cells: &HashMap<String, String>, label: &'static str) -> Result<u32, SpreadsheetParseError> {
    parse_cell(cells, label, |v| v.parse().ok())
}

fn parse_cell<T>(
    cells: &HashMap<String, String>,
    label: &'static str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, SpreadsheetParseError> {
    let raw = cells.get(label).ok_or(SpreadsheetParseError::Missing(label))?;
    parse(raw).ok_or_else(|| SpreadsheetParseError::InvalidValue {
        label,
        value: raw.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use erpreport_core::ZeroValue;
    use rust_decimal_macros::dec;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn sample() -> Overview {
        Overview::new(
            FinanceSummary {
                outstanding_receivables: dec!(1000.50),
                overdue_receivables: dec!(200.00),
                current_month_expense_total: dec!(500.00),
                budget_utilization: dec!(0.75),
                upcoming_payroll_commitment: dec!(3000.00),
            },
            HrSummary::zero(),
            InventorySummary {
                total_active_items: 120,
                total_warehouses: 3,
                total_quantity_on_hand: dec!(4500.0),
                total_quantity_reserved: dec!(300.0),
                items_below_safety_stock: 5,
            },
            at("2026-05-01T12:30:00.123456Z"),
        )
    }

    fn sheet(bytes: Vec<u8>) -> calamine::Range<Data> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        workbook.worksheet_range(SHEET_NAME).unwrap()
    }

    /// Workbook with the given label/value rows, for malformed-input cases.
    fn workbook_with(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME).unwrap();
        for (r, cells) in rows.iter().enumerate() {
            for (c, text) in cells.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, *text).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn layout_has_bold_titles_numeric_cells_and_trailing_timestamp() {
        let range = sheet(SpreadsheetRenderer::new().render(&sample()).unwrap());

        let text = |r: u32, c: u32| range.get_value((r, c)).cloned().unwrap_or(Data::Empty);

        assert_eq!(text(0, 0), Data::String("Finance Summary".into()));
        assert_eq!(text(1, 0), Data::String("Outstanding Receivables".into()));
        assert_eq!(text(1, 1), Data::Float(1000.5));
        assert_eq!(text(1, 7), Data::Float(0.75));
        assert_eq!(text(2, 0), Data::Empty);
        assert_eq!(text(3, 0), Data::String("HR Summary".into()));
        assert_eq!(text(4, 1), Data::Float(0.0));
        assert_eq!(text(6, 0), Data::String("Inventory Summary".into()));
        assert_eq!(text(7, 3), Data::Float(3.0));
        assert_eq!(text(9, 0), Data::String("Generated At (UTC)".into()));
        assert_eq!(text(9, 1), Data::String("2026-05-01T12:30:00.123456Z".into()));
    }

    #[test]
    fn round_trip_recovers_every_field() {
        let overview = sample();
        let bytes = SpreadsheetRenderer::new().render(&overview).unwrap();
        let back = parse_spreadsheet(&bytes).unwrap();

        assert_eq!(back, overview);
        assert_eq!(back.finance().outstanding_receivables, dec!(1000.50));
        assert_eq!(back.inventory().total_quantity_on_hand, dec!(4500));
        assert_eq!(back.generated_at_utc(), overview.generated_at_utc());
    }

    #[test]
    fn amounts_beyond_float_precision_are_kept_as_text() {
        let precise = dec!(12345678901234567.89);
        let overview = Overview::new(
            FinanceSummary {
                outstanding_receivables: precise,
                ..FinanceSummary::zero()
            },
            HrSummary::zero(),
            InventorySummary::zero(),
            at("2026-05-01T12:30:00Z"),
        );
        let bytes = SpreadsheetRenderer::new().render(&overview).unwrap();

        let range = sheet(bytes.clone());
        assert_eq!(
            range.get_value((1, 1)),
            Some(&Data::String("12345678901234567.89".into()))
        );

        let back = parse_spreadsheet(&bytes).unwrap();
        assert_eq!(back.finance().outstanding_receivables.to_string(), "12345678901234567.89");
    }

    #[test]
    fn parse_reports_missing_label() {
        let bytes = workbook_with(&[&["Finance Summary"], &["Outstanding Receivables", "1"]]);
        let err = parse_spreadsheet(&bytes).unwrap_err();
        assert!(matches!(err, SpreadsheetParseError::Missing(OVERDUE_RECEIVABLES)), "{err:?}");
    }

    #[test]
    fn parse_reports_invalid_value() {
        let bytes = workbook_with(&[
            &[
                OUTSTANDING_RECEIVABLES, "1", OVERDUE_RECEIVABLES, "1",
                CURRENT_MONTH_EXPENSE_TOTAL, "1", BUDGET_UTILIZATION, "1",
                UPCOMING_PAYROLL_COMMITMENT, "1",
            ],
            &[TOTAL_EMPLOYEES, "1", ACTIVE_EMPLOYEES, "1", DEPARTMENTS, "1", PENDING_RESIGNATIONS, "1"],
            &[TOTAL_ACTIVE_ITEMS, "1", TOTAL_WAREHOUSES, "three"],
        ]);

        let err = parse_spreadsheet(&bytes).unwrap_err();
        match err {
            SpreadsheetParseError::InvalidValue { label, value } => {
                assert_eq!(label, TOTAL_WAREHOUSES);
                assert_eq!(value, "three");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_bytes_that_are_not_a_workbook() {
        let err = parse_spreadsheet(b"Finance Summary\nOutstanding Receivables,1\n").unwrap_err();
        assert!(matches!(err, SpreadsheetParseError::Workbook(_)), "{err:?}");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn decimal_strategy() -> impl Strategy<Value = Decimal> {
            (-10_000_000_000i64..10_000_000_000i64, 0u32..6).prop_map(|(m, s)| Decimal::new(m, s))
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            /// Property: render → parse is the identity on every overview.
            #[test]
            fn spreadsheet_round_trip(
                receivables in decimal_strategy(),
                utilization in decimal_strategy(),
                on_hand in decimal_strategy(),
                employees in any::<u32>(),
                below_safety in any::<u32>(),
                micros in 0i64..4_102_444_800_000_000i64,
            ) {
                let overview = Overview::new(
                    FinanceSummary {
                        outstanding_receivables: receivables,
                        budget_utilization: utilization,
                        ..FinanceSummary::zero()
                    },
                    HrSummary { total_employees: employees, ..HrSummary::zero() },
                    InventorySummary {
                        total_quantity_on_hand: on_hand,
                        items_below_safety_stock: below_safety,
                        ..InventorySummary::zero()
                    },
                    DateTime::<Utc>::from_timestamp_micros(micros).unwrap(),
                );

                let bytes = SpreadsheetRenderer::new().render(&overview).unwrap();
                let back = parse_spreadsheet(&bytes).unwrap();
                prop_assert_eq!(back, overview);
            }
        }
    }
}
