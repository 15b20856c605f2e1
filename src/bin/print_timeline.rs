// src/bin/print_timeline.rs
//
// Prints the cumulative timeline for one member from a seed file.
// Usage: print_timeline [seed.json] [member_id]
use std::env;

use samuha_backend::services::store::Store;
use samuha_backend::services::timeline;
use samuha_backend::BoxError;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let path = env::args().nth(1).unwrap_or_else(|| "seed.json".to_string());
    let member_id: u64 = match env::args().nth(2) {
        Some(raw) => raw.parse()?,
        None => 1,
    };

    let store = Store::from_seed_path(&path)?;
    let record = store.member_record(member_id).await?;

    for point in timeline::build_series(&record) {
        println!(
            "{:<20} deposits {:>12}  loans {:>12}  balance {:>12}",
            point.display_date, point.cumulative_deposit, point.cumulative_loan, point.balance
        );
    }
    Ok(())
}
