// src/bin/seed_store.rs
//
// Writes a sample seed file the server can load via $SEED_PATH.
use chrono::{DateTime, Utc};
use std::env;
use std::fs;

use samuha_backend::models::{
    Contact, Deposit, Loan, LoanStatus, Member, MemberStatus, Notice,
};
use samuha_backend::services::store::StoreData;
use samuha_backend::BoxError;

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid timestamp")
}

fn member(id: u64, name: &str, phone: &str, join_date: &str) -> Member {
    Member {
        id,
        name: name.to_string(),
        phone: phone.to_string(),
        join_date: ts(join_date),
        status: MemberStatus::Active,
    }
}

fn sample_data() -> StoreData {
    StoreData {
        members: vec![
            member(1, "Sarita Devi", "9841234567", "2024-01-01T00:00:00Z"),
            member(2, "Gita Shrestha", "9841234568", "2024-01-01T00:00:00Z"),
            member(3, "Laxmi Tamang", "9841234569", "2024-03-01T00:00:00Z"),
        ],
        deposits: vec![
            Deposit {
                id: 1,
                member_id: 1,
                amount: 1000.0,
                created_at: ts("2025-01-01T10:00:00Z"),
            },
            Deposit {
                id: 2,
                member_id: 2,
                amount: 1000.0,
                created_at: ts("2025-01-01T10:05:00Z"),
            },
            Deposit {
                id: 3,
                member_id: 1,
                amount: 1500.0,
                created_at: ts("2025-02-01T10:00:00Z"),
            },
        ],
        loans: vec![
            Loan {
                id: 1,
                member_id: 1,
                principal: 40000.0,
                purpose: "Small Business - Tailoring Shop".to_string(),
                interest_rate: 10.0,
                duration_months: 12,
                requested_at: ts("2024-10-20T00:00:00Z"),
                start_date: Some(ts("2024-11-01T00:00:00Z")),
                due_date: Some(ts("2025-11-01T00:00:00Z")),
                paid_amount: 5000.0,
                status: LoanStatus::Active,
            },
            Loan {
                id: 2,
                member_id: 2,
                principal: 30000.0,
                purpose: "Medical Emergency - Family Treatment".to_string(),
                interest_rate: 12.0,
                duration_months: 12,
                requested_at: ts("2025-01-01T00:00:00Z"),
                start_date: None,
                due_date: None,
                paid_amount: 0.0,
                status: LoanStatus::Pending,
            },
        ],
        notices: vec![Notice {
            id: 1,
            title: "Monthly meeting".to_string(),
            body: "The January collection meeting is on the 15th.".to_string(),
            created_at: ts("2025-01-05T00:00:00Z"),
        }],
        contacts: vec![Contact {
            id: 1,
            name: "Sarita Devi".to_string(),
            phone: "9841234567".to_string(),
            email: "sarita.devi@example.com".to_string(),
            role: "Member".to_string(),
        }],
    }
}

fn main() -> Result<(), BoxError> {
    let path = env::args().nth(1).unwrap_or_else(|| "seed.json".to_string());
    let data = sample_data();
    fs::write(&path, serde_json::to_string_pretty(&data)?)?;
    println!(
        "Wrote {} members, {} deposits, {} loans to {}",
        data.members.len(),
        data.deposits.len(),
        data.loans.len(),
        path
    );
    Ok(())
}
