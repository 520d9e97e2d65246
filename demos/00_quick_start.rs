/// quick start - generate a schedule and print it
use loan_schedule_rs::chrono::NaiveDate;
use loan_schedule_rs::{generate_schedule, LoanTerms, Money, Rate, ScheduleSummary};
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(log::LevelFilter::Debug).init()?;

    // $1,000 at 12% a year, four monthly payments
    let terms = LoanTerms::builder()
        .principal(Money::from_major(1_000))
        .annual_rate(Rate::from_percentage(12))
        .start_date(NaiveDate::from_ymd_opt(2027, 1, 1).ok_or("bad date")?)
        .payment_count(4)
        .periodicity("1m")
        .build()?;

    let schedule = generate_schedule(&terms)?;

    println!("{:>3}  {:<10}  {:>10}  {:>10}", "#", "date", "principal", "interest");
    for line in &schedule {
        println!(
            "{:>3}  {:<10}  {:>10}  {:>10}",
            line.sequence, line.date, line.principal_portion, line.interest_portion
        );
    }

    let summary = ScheduleSummary::from_lines(&schedule);
    println!("\ntotal interest {}, total paid {}", summary.total_interest, summary.total_paid);

    Ok(())
}
