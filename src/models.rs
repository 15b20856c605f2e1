// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub join_date: DateTime<Utc>,
    pub status: MemberStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: u64,
    pub member_id: u64,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle of a loan. A request enters as `Pending`; an admin decision
/// moves it to `Active` or `Rejected`, and full repayment moves an
/// `Active` loan to `Paid`. No other transitions are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Active,
    Paid,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: u64,
    pub member_id: u64,
    pub principal: f64,
    pub purpose: String,
    pub interest_rate: f64,
    pub duration_months: u32,
    pub requested_at: DateTime<Utc>,
    /// Disbursement date. Set on approval, `None` while pending or rejected.
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub paid_amount: f64,
    pub status: LoanStatus,
}

impl Loan {
    /// The date a dashboard activity feed should show for this loan:
    /// the decision date when one exists, the request date otherwise.
    pub fn activity_date(&self) -> DateTime<Utc> {
        self.start_date.unwrap_or(self.requested_at)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub role: String,
}

/// Aggregate counts for the admin dashboard, computed server-side so the
/// frontend renders them straight into summary cards and the status pie.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub active_loans: usize,
    pub pending_requests: usize,
    pub notice_count: usize,
    pub loan_status: LoanStatusCounts,
    pub recent_activity: Vec<ActivityRow>,
}

/// Disjoint per-status loan counts. Every loan contributes to exactly one
/// bucket, so the counts always sum to the total number of loans.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanStatusCounts {
    pub pending: usize,
    pub active: usize,
    pub paid: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRow {
    pub member_name: String,
    pub amount: f64,
    pub status: LoanStatus,
    pub date: DateTime<Utc>,
}
