// src/services/timeline.rs
//
// Cumulative financial timeline for a single member: deposits and loan
// disbursements merged into one date-ordered stream, then walked once to
// produce running totals for the frontend chart.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Axis label for an event point, en-US short style ("Jan 1, 02:30 AM").
const POINT_DATE_FORMAT: &str = "%b %-d, %I:%M %p";
/// The sentinel point carries no time of day.
const SENTINEL_DATE_FORMAT: &str = "%b %-d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Deposit,
    Loan,
}

/// The financial snapshot of one member as the store hands it over:
/// their deposit history and disbursed loans. Both collections default to
/// empty so a record with either field absent deserializes cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberRecord {
    pub deposits: Vec<DepositEntry>,
    pub loans: Vec<LoanEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositEntry {
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanEntry {
    pub principal: f64,
    pub start_date: DateTime<Utc>,
}

/// One normalized entry in the merged stream. Exactly one of
/// `deposit_amount` / `loan_amount` is non-zero, the other is zero;
/// that is an invariant of [`merge_events`], not of the source data.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialEvent {
    pub date: DateTime<Utc>,
    pub kind: EventKind,
    pub deposit_amount: f64,
    pub loan_amount: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub display_date: String,
    pub deposit_amount: f64,
    pub loan_amount: f64,
    pub cumulative_deposit: f64,
    pub cumulative_loan: f64,
    /// Always `cumulative_deposit - cumulative_loan`, derived per point
    /// rather than accumulated, so it cannot drift. May be negative.
    pub balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// The real timestamp behind `display_date`, which is lossy and
    /// non-unique as an axis label.
    pub sort_date: DateTime<Utc>,
}

/// Amounts must be non-negative and finite. Anything else is coerced to
/// zero here so a single malformed entry cannot poison the running totals.
fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount >= 0.0 {
        amount
    } else {
        0.0
    }
}

/// Normalize a member's deposits and loans into one event stream ordered
/// ascending by date.
///
/// Tie-break for equal timestamps: deposits before loans, then input
/// order. Deposits are enqueued first and the sort is stable, so both
/// rules fall out of the enqueue order.
pub fn merge_events(record: &MemberRecord) -> Vec<FinancialEvent> {
    let mut events = Vec::with_capacity(record.deposits.len() + record.loans.len());

    for d in &record.deposits {
        let amount = sanitize_amount(d.amount);
        events.push(FinancialEvent {
            date: d.created_at,
            kind: EventKind::Deposit,
            deposit_amount: amount,
            loan_amount: 0.0,
            label: format!("Deposit: NPR {}", amount),
        });
    }

    for l in &record.loans {
        let principal = sanitize_amount(l.principal);
        events.push(FinancialEvent {
            date: l.start_date,
            kind: EventKind::Loan,
            deposit_amount: 0.0,
            loan_amount: principal,
            label: format!("Loan: NPR {}", principal),
        });
    }

    events.sort_by_key(|e| e.date);
    events
}

/// Build the cumulative series for a member record, stamping the sentinel
/// point (if any) with `now`. Single pass over the merged events; both
/// running totals only ever add non-negative amounts, so they are
/// monotonically non-decreasing across the output.
///
/// The output is never empty: a record with no events yields exactly one
/// all-zero sentinel point dated `now`, so the chart always has at least
/// one point to plot axes against.
pub fn build_series_at(record: &MemberRecord, now: DateTime<Utc>) -> Vec<TimelinePoint> {
    let events = merge_events(record);

    if events.is_empty() {
        return vec![TimelinePoint {
            display_date: now.format(SENTINEL_DATE_FORMAT).to_string(),
            deposit_amount: 0.0,
            loan_amount: 0.0,
            cumulative_deposit: 0.0,
            cumulative_loan: 0.0,
            balance: 0.0,
            kind: None,
            label: None,
            sort_date: now,
        }];
    }

    let mut cumulative_deposit = 0.0;
    let mut cumulative_loan = 0.0;

    events
        .into_iter()
        .map(|e| {
            cumulative_deposit += e.deposit_amount;
            cumulative_loan += e.loan_amount;

            TimelinePoint {
                display_date: e.date.format(POINT_DATE_FORMAT).to_string(),
                deposit_amount: e.deposit_amount,
                loan_amount: e.loan_amount,
                cumulative_deposit,
                cumulative_loan,
                balance: cumulative_deposit - cumulative_loan,
                kind: Some(e.kind),
                label: Some(e.label),
                sort_date: e.date,
            }
        })
        .collect()
}

/// [`build_series_at`] stamped with the current time.
pub fn build_series(record: &MemberRecord) -> Vec<TimelinePoint> {
    build_series_at(record, Utc::now())
}
