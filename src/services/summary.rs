// src/services/summary.rs
use log::warn;

use crate::models::{ActivityRow, DashboardSummary, Loan, LoanStatus, LoanStatusCounts, Member};

/// How many loan events the dashboard activity feed shows.
const RECENT_ACTIVITY_LIMIT: usize = 5;

fn count_status(loans: &[Loan], status: LoanStatus) -> usize {
    loans.iter().filter(|l| l.status == status).count()
}

/// Aggregate the loan book into the admin dashboard view: per-status
/// counts (disjoint, so the pie chart buckets sum to the loan total) and
/// the five most recent loan events, newest first.
pub fn summarize(members: &[Member], loans: &[Loan], notice_count: usize) -> DashboardSummary {
    let loan_status = LoanStatusCounts {
        pending: count_status(loans, LoanStatus::Pending),
        active: count_status(loans, LoanStatus::Active),
        paid: count_status(loans, LoanStatus::Paid),
        rejected: count_status(loans, LoanStatus::Rejected),
    };

    let mut recent: Vec<&Loan> = loans.iter().collect();
    recent.sort_by(|a, b| b.activity_date().cmp(&a.activity_date()));

    let recent_activity = recent
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|loan| {
            let member_name = members
                .iter()
                .find(|m| m.id == loan.member_id)
                .map(|m| m.name.clone())
                .unwrap_or_else(|| {
                    warn!("Loan {} references unknown member {}", loan.id, loan.member_id);
                    "Unknown".to_string()
                });

            ActivityRow {
                member_name,
                amount: loan.principal,
                status: loan.status,
                date: loan.activity_date(),
            }
        })
        .collect();

    DashboardSummary {
        active_loans: loan_status.active,
        pending_requests: loan_status.pending,
        notice_count,
        loan_status,
        recent_activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberStatus;
    use chrono::{DateTime, Utc};

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

    fn loan(id: u64, member_id: u64, status: LoanStatus, requested_at: &str) -> Loan {
        Loan {
            id,
            member_id,
            principal: 1000.0 * id as f64,
            purpose: "test".to_string(),
            interest_rate: 10.0,
            duration_months: 12,
            requested_at: ts(requested_at),
            start_date: None,
            due_date: None,
            paid_amount: 0.0,
            status,
        }
    }

    #[test]
    fn status_counts_are_disjoint_and_sum_to_total() {
        let members = vec![member(1, "Sarita Devi")];
        let loans = vec![
            loan(1, 1, LoanStatus::Pending, "2025-01-01T00:00:00Z"),
            loan(2, 1, LoanStatus::Active, "2025-01-02T00:00:00Z"),
            loan(3, 1, LoanStatus::Paid, "2025-01-03T00:00:00Z"),
            loan(4, 1, LoanStatus::Rejected, "2025-01-04T00:00:00Z"),
            loan(5, 1, LoanStatus::Active, "2025-01-05T00:00:00Z"),
        ];

        let summary = summarize(&members, &loans, 3);
        assert_eq!(summary.active_loans, 2);
        assert_eq!(summary.pending_requests, 1);
        assert_eq!(summary.notice_count, 3);

        let counts = &summary.loan_status;
        assert_eq!(
            counts.pending + counts.active + counts.paid + counts.rejected,
            loans.len()
        );
    }

    #[test]
    fn recent_activity_is_capped_and_newest_first() {
        let members = vec![member(1, "Sarita Devi")];
        let loans: Vec<Loan> = (1..=7)
            .map(|i| {
                loan(
                    i,
                    1,
                    LoanStatus::Pending,
                    &format!("2025-01-{:02}T00:00:00Z", i),
                )
            })
            .collect();

        let summary = summarize(&members, &loans, 0);
        assert_eq!(summary.recent_activity.len(), 5);
        assert_eq!(summary.recent_activity[0].date, ts("2025-01-07T00:00:00Z"));
        for pair in summary.recent_activity.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn unknown_member_falls_back_to_placeholder_name() {
        let summary = summarize(
            &[],
            &[loan(1, 42, LoanStatus::Pending, "2025-01-01T00:00:00Z")],
            0,
        );
        assert_eq!(summary.recent_activity[0].member_name, "Unknown");
    }
}
