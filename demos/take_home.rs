//! Prints the take-home breakdown for the seeded December salary under both regimes.
//!
//! Run with `RUST_LOG=salary_core=debug` to see the engine's trace events.

use salary_core::{
    utils::{format_inr, MemoryStorage},
    PayrollBook, RecordResult, TaxResult,
};
use tracing_subscriber::EnvFilter;

fn print_result(label: &str, result: &TaxResult) {
    println!("{} ({})", label, result.tax_slab_description);
    println!("  Gross salary      {}", format_inr(&result.gross_salary));
    println!("  HRA exemption     {}", format_inr(&result.hra_exemption));
    println!("  Taxable income    {}", format_inr(&result.taxable_income));
    println!("  Income tax + cess {}", format_inr(&result.total_income_tax()));
    println!("  EPF               {}", format_inr(&result.epf));
    println!("  ESI               {}", format_inr(&result.esi));
    println!("  Professional tax  {}", format_inr(&result.professional_tax));
    println!("  Net salary        {}", format_inr(&result.net_salary));
    println!("  Monthly take-home {}", format_inr(&result.monthly_net));
}

#[tokio::main]
async fn main() -> RecordResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let book = PayrollBook::new(MemoryStorage::with_seed_data()?);
    let comparison = book.compare_regimes_for_salary("1").await?;

    print_result("New regime", &comparison.new_regime);
    print_result("Old regime", &comparison.old_regime);
    println!(
        "Recommended: {} regime, saving {} a year",
        comparison.recommended,
        format_inr(&comparison.annual_savings)
    );

    Ok(())
}
