// src/services/store.rs
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Months, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::models::{
    Contact, DashboardSummary, Deposit, Loan, LoanStatus, Member, Notice,
};
use crate::services::summary::summarize;
use crate::services::timeline::{DepositEntry, LoanEntry, MemberRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    NotFound { entity: &'static str, id: u64 },
    InvalidTransition { action: &'static str, from: LoanStatus },
    InvalidAmount(f64),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::NotFound { entity, id } => write!(f, "{} {} not found", entity, id),
            StoreError::InvalidTransition { action, from } => {
                write!(f, "cannot {} a loan in status {:?}", action, from)
            }
            StoreError::InvalidAmount(amount) => {
                write!(f, "amount must be a non-negative finite number, got {}", amount)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Everything the service holds. Doubles as the on-disk seed format, so a
/// seed file is just this struct as JSON with any subset of the fields.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreData {
    pub members: Vec<Member>,
    pub deposits: Vec<Deposit>,
    pub loans: Vec<Loan>,
    pub notices: Vec<Notice>,
    pub contacts: Vec<Contact>,
}

/// In-memory store shared across handlers as `Arc<Store>`. State lives for
/// the lifetime of the process and is rebuilt from the seed file on restart.
#[derive(Debug)]
pub struct Store {
    data: RwLock<StoreData>,
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

fn validate_amount(amount: f64) -> Result<f64, StoreError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(StoreError::InvalidAmount(amount))
    }
}

impl Store {
    pub fn empty() -> Self {
        Store {
            data: RwLock::new(StoreData::default()),
        }
    }

    pub fn with_data(data: StoreData) -> Self {
        Store {
            data: RwLock::new(data),
        }
    }

    pub fn from_seed_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let data: StoreData = serde_json::from_str(&raw)
            .with_context(|| format!("invalid seed data in {}", path.display()))?;
        info!(
            "Seed loaded: {} members, {} deposits, {} loans, {} notices, {} contacts",
            data.members.len(),
            data.deposits.len(),
            data.loans.len(),
            data.notices.len(),
            data.contacts.len()
        );
        Ok(Store::with_data(data))
    }

    pub async fn list_members(&self) -> Vec<Member> {
        self.data.read().await.members.clone()
    }

    pub async fn get_member(&self, id: u64) -> Result<Member, StoreError> {
        self.data
            .read()
            .await
            .members
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(StoreError::NotFound { entity: "member", id })
    }

    /// Assemble the financial snapshot the timeline core consumes: the
    /// member's deposit history plus disbursed loans. Pending and rejected
    /// loans never reached the member's hands, so they carry no event.
    pub async fn member_record(&self, member_id: u64) -> Result<MemberRecord, StoreError> {
        let data = self.data.read().await;
        if !data.members.iter().any(|m| m.id == member_id) {
            return Err(StoreError::NotFound { entity: "member", id: member_id });
        }

        let deposits = data
            .deposits
            .iter()
            .filter(|d| d.member_id == member_id)
            .map(|d| DepositEntry {
                amount: d.amount,
                created_at: d.created_at,
            })
            .collect();

        let loans = data
            .loans
            .iter()
            .filter(|l| {
                l.member_id == member_id
                    && matches!(l.status, LoanStatus::Active | LoanStatus::Paid)
            })
            .filter_map(|l| {
                l.start_date.map(|start_date| LoanEntry {
                    principal: l.principal,
                    start_date,
                })
            })
            .collect();

        Ok(MemberRecord { deposits, loans })
    }

    pub async fn list_deposits(&self, member_id: u64) -> Result<Vec<Deposit>, StoreError> {
        let data = self.data.read().await;
        if !data.members.iter().any(|m| m.id == member_id) {
            return Err(StoreError::NotFound { entity: "member", id: member_id });
        }
        Ok(data
            .deposits
            .iter()
            .filter(|d| d.member_id == member_id)
            .cloned()
            .collect())
    }

    pub async fn add_deposit(
        &self,
        member_id: u64,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<Deposit, StoreError> {
        let amount = validate_amount(amount)?;
        let mut data = self.data.write().await;
        if !data.members.iter().any(|m| m.id == member_id) {
            return Err(StoreError::NotFound { entity: "member", id: member_id });
        }

        let deposit = Deposit {
            id: next_id(data.deposits.iter().map(|d| d.id)),
            member_id,
            amount,
            created_at: now,
        };
        data.deposits.push(deposit.clone());
        Ok(deposit)
    }

    pub async fn loans_by_status(&self, status: LoanStatus) -> Vec<Loan> {
        self.data
            .read()
            .await
            .loans
            .iter()
            .filter(|l| l.status == status)
            .cloned()
            .collect()
    }

    pub async fn all_loans(&self) -> Vec<Loan> {
        self.data.read().await.loans.clone()
    }

    pub async fn loan_history(&self, member_id: u64) -> Result<Vec<Loan>, StoreError> {
        let data = self.data.read().await;
        if !data.members.iter().any(|m| m.id == member_id) {
            return Err(StoreError::NotFound { entity: "member", id: member_id });
        }
        Ok(data
            .loans
            .iter()
            .filter(|l| l.member_id == member_id)
            .cloned()
            .collect())
    }

    pub async fn create_loan_request(
        &self,
        member_id: u64,
        principal: f64,
        purpose: String,
        interest_rate: f64,
        duration_months: u32,
        now: DateTime<Utc>,
    ) -> Result<Loan, StoreError> {
        let principal = validate_amount(principal)?;
        let mut data = self.data.write().await;
        if !data.members.iter().any(|m| m.id == member_id) {
            return Err(StoreError::NotFound { entity: "member", id: member_id });
        }

        let loan = Loan {
            id: next_id(data.loans.iter().map(|l| l.id)),
            member_id,
            principal,
            purpose,
            interest_rate,
            duration_months,
            requested_at: now,
            start_date: None,
            due_date: None,
            paid_amount: 0.0,
            status: LoanStatus::Pending,
        };
        data.loans.push(loan.clone());
        Ok(loan)
    }

    /// Pending → Active. Disbursement and due dates are stamped here.
    pub async fn approve_loan(&self, id: u64, now: DateTime<Utc>) -> Result<Loan, StoreError> {
        let mut data = self.data.write().await;
        let loan = data
            .loans
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::NotFound { entity: "loan", id })?;

        if loan.status != LoanStatus::Pending {
            return Err(StoreError::InvalidTransition {
                action: "approve",
                from: loan.status,
            });
        }

        loan.status = LoanStatus::Active;
        loan.start_date = Some(now);
        loan.due_date = now.checked_add_months(Months::new(loan.duration_months));
        Ok(loan.clone())
    }

    /// Pending → Rejected.
    pub async fn reject_loan(&self, id: u64) -> Result<Loan, StoreError> {
        let mut data = self.data.write().await;
        let loan = data
            .loans
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::NotFound { entity: "loan", id })?;

        if loan.status != LoanStatus::Pending {
            return Err(StoreError::InvalidTransition {
                action: "reject",
                from: loan.status,
            });
        }

        loan.status = LoanStatus::Rejected;
        Ok(loan.clone())
    }

    /// Active → Paid.
    pub async fn mark_paid(&self, id: u64) -> Result<Loan, StoreError> {
        let mut data = self.data.write().await;
        let loan = data
            .loans
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::NotFound { entity: "loan", id })?;

        if loan.status != LoanStatus::Active {
            return Err(StoreError::InvalidTransition {
                action: "mark paid",
                from: loan.status,
            });
        }

        loan.status = LoanStatus::Paid;
        loan.paid_amount = loan.principal;
        Ok(loan.clone())
    }

    /// Notices newest first.
    pub async fn list_notices(&self) -> Vec<Notice> {
        let mut notices = self.data.read().await.notices.clone();
        notices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notices
    }

    pub async fn create_notice(
        &self,
        title: String,
        body: String,
        now: DateTime<Utc>,
    ) -> Notice {
        let mut data = self.data.write().await;
        let notice = Notice {
            id: next_id(data.notices.iter().map(|n| n.id)),
            title,
            body,
            created_at: now,
        };
        data.notices.push(notice.clone());
        notice
    }

    pub async fn delete_notice(&self, id: u64) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        let before = data.notices.len();
        data.notices.retain(|n| n.id != id);
        if data.notices.len() == before {
            return Err(StoreError::NotFound { entity: "notice", id });
        }
        Ok(())
    }

    pub async fn list_contacts(&self) -> Vec<Contact> {
        self.data.read().await.contacts.clone()
    }

    pub async fn dashboard_summary(&self) -> DashboardSummary {
        let data = self.data.read().await;
        summarize(&data.members, &data.loans, data.notices.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberStatus;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn member(id: u64, name: &str) -> Member {
        Member {
            id,
            name: name.to_string(),
            phone: "9841000000".to_string(),
            join_date: ts("2024-01-01T00:00:00Z"),
            status: MemberStatus::Active,
        }
    }

    fn seeded_store() -> Store {
        Store::with_data(StoreData {
            members: vec![member(1, "Sarita Devi"), member(2, "Gita Shrestha")],
            ..StoreData::default()
        })
    }

    #[tokio::test]
    async fn loan_request_lifecycle_approve_then_mark_paid() {
        let store = seeded_store();
        let now = ts("2025-01-10T00:00:00Z");

        let loan = store
            .create_loan_request(1, 40000.0, "Tailoring shop".into(), 10.0, 12, now)
            .await
            .unwrap();
        assert_eq!(loan.status, LoanStatus::Pending);
        assert_eq!(loan.start_date, None);

        let approved_at = ts("2025-01-12T00:00:00Z");
        let loan = store.approve_loan(loan.id, approved_at).await.unwrap();
        assert_eq!(loan.status, LoanStatus::Active);
        assert_eq!(loan.start_date, Some(approved_at));
        assert_eq!(loan.due_date, Some(ts("2026-01-12T00:00:00Z")));

        let loan = store.mark_paid(loan.id).await.unwrap();
        assert_eq!(loan.status, LoanStatus::Paid);
        assert_eq!(loan.paid_amount, 40000.0);
    }

    #[tokio::test]
    async fn approving_a_decided_loan_is_an_invalid_transition() {
        let store = seeded_store();
        let now = ts("2025-01-10T00:00:00Z");

        let loan = store
            .create_loan_request(1, 5000.0, "School fees".into(), 8.0, 6, now)
            .await
            .unwrap();
        store.reject_loan(loan.id).await.unwrap();

        let err = store.approve_loan(loan.id, now).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidTransition {
                action: "approve",
                from: LoanStatus::Rejected,
            }
        );
    }

    #[tokio::test]
    async fn mark_paid_requires_an_active_loan() {
        let store = seeded_store();
        let loan = store
            .create_loan_request(2, 3000.0, "Medical".into(), 12.0, 6, ts("2025-02-01T00:00:00Z"))
            .await
            .unwrap();

        let err = store.mark_paid(loan.id).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn member_record_includes_only_disbursed_loans() {
        let store = seeded_store();
        let now = ts("2025-01-01T00:00:00Z");

        store.add_deposit(1, 1000.0, now).await.unwrap();

        let pending = store
            .create_loan_request(1, 2000.0, "Pending".into(), 10.0, 6, now)
            .await
            .unwrap();
        let rejected = store
            .create_loan_request(1, 3000.0, "Rejected".into(), 10.0, 6, now)
            .await
            .unwrap();
        store.reject_loan(rejected.id).await.unwrap();
        let approved = store
            .create_loan_request(1, 4000.0, "Approved".into(), 10.0, 6, now)
            .await
            .unwrap();
        store
            .approve_loan(approved.id, ts("2025-01-02T00:00:00Z"))
            .await
            .unwrap();

        let record = store.member_record(1).await.unwrap();
        assert_eq!(record.deposits.len(), 1);
        assert_eq!(record.loans.len(), 1);
        assert_eq!(record.loans[0].principal, 4000.0);

        // The pending request stays out until it is approved.
        store
            .approve_loan(pending.id, ts("2025-01-03T00:00:00Z"))
            .await
            .unwrap();
        let record = store.member_record(1).await.unwrap();
        assert_eq!(record.loans.len(), 2);
    }

    #[tokio::test]
    async fn deposit_for_unknown_member_is_not_found() {
        let store = seeded_store();
        let err = store
            .add_deposit(99, 500.0, ts("2025-01-01T00:00:00Z"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound { entity: "member", id: 99 });
    }

    #[tokio::test]
    async fn non_finite_deposit_amount_is_rejected() {
        let store = seeded_store();
        let err = store
            .add_deposit(1, f64::NAN, ts("2025-01-01T00:00:00Z"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidAmount(_)));
    }

    #[test]
    fn seed_loading_names_the_file_on_failure() {
        let err = Store::from_seed_path("/nonexistent/seed.json").unwrap_err();
        assert!(err.to_string().contains("failed to read seed file"));

        let path = std::env::temp_dir().join("samuha_store_bad_seed.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Store::from_seed_path(&path).unwrap_err();
        assert!(err.to_string().contains("invalid seed data"));
        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn seed_roundtrips_through_the_store() {
        let path = std::env::temp_dir().join("samuha_store_seed.json");
        let data = StoreData {
            members: vec![member(1, "Sarita Devi")],
            ..StoreData::default()
        };
        fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();

        let store = Store::from_seed_path(&path).unwrap();
        assert_eq!(store.list_members().await.len(), 1);
        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn notices_list_newest_first() {
        let store = seeded_store();
        store
            .create_notice("Old".into(), "first".into(), ts("2025-01-01T00:00:00Z"))
            .await;
        store
            .create_notice("New".into(), "second".into(), ts("2025-02-01T00:00:00Z"))
            .await;

        let notices = store.list_notices().await;
        assert_eq!(notices[0].title, "New");
        assert_eq!(notices[1].title, "Old");

        store.delete_notice(notices[0].id).await.unwrap();
        assert_eq!(store.list_notices().await.len(), 1);

        let err = store.delete_notice(999).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound { entity: "notice", id: 999 });
    }
}
