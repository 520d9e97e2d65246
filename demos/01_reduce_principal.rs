/// reduce principal - originate a loan, pin a smaller principal on one
/// payment and print the recalculated loan as json
use loan_schedule_rs::chrono::{TimeZone, Utc};
use loan_schedule_rs::{Loan, LoanTerms, Money, SafeTimeProvider, TimeSource};
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(log::LevelFilter::Info).init()?;

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap(),
    ));

    let terms = LoanTerms::from_json(
        r#"{
            "principal": "1000.00",
            "annual_rate": "0.12",
            "start_date": "2027-01-01",
            "payment_count": 4,
            "periodicity": "1m"
        }"#,
    )?;

    let mut loan = Loan::originate(terms, &time)?;
    println!("=== generated schedule ===\n{}\n", loan.json());

    let updated = loan.reduce_principal(2, Money::from_major(50), &time)?;
    println!("=== recalculated payments ===");
    for line in &updated {
        println!(
            "#{} {} principal {} interest {}{}",
            line.sequence,
            line.date,
            line.principal_portion,
            line.interest_portion,
            if line.pinned { " (pinned)" } else { "" }
        );
    }

    // reducing by the whole principal is refused and changes nothing
    let full = loan.payment(3).map(|p| p.principal_portion).unwrap_or(Money::ZERO);
    if let Err(e) = loan.reduce_principal(3, full, &time) {
        println!("\nrejected: {e}");
    }

    println!("\n=== final loan ===\n{}", loan.json());

    Ok(())
}
