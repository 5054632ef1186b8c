//! Integration tests for salary-core

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use salary_core::{
    calculate_tax,
    utils::{format_inr, EnhancedGoalValidator, EnhancedSalaryEntryValidator, MemoryStorage},
    CompanyInfo, EmployeeInfo, GoalStatus, PayPeriod, PayrollBook, RecordError, SalaryEntry,
    TaxError, TaxRegime, TaxRequest,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn january_entry() -> SalaryEntry {
    let mut entry = SalaryEntry::new(
        "2025-01".to_string(),
        date(2025, 1, 1),
        BigDecimal::from(60_000),
        BigDecimal::from(20_000),
    );
    entry.allowances = BigDecimal::from(20_000);
    entry
}

#[test]
fn test_json_request_to_take_home() {
    let body = r#"{
        "grossPay": 1200000,
        "age": 30,
        "hasHRA": true,
        "hraAmount": 20000,
        "cityType": "metro",
        "taxRegime": "new"
    }"#;

    let result = calculate_tax(TaxRequest::from_json(body).unwrap()).unwrap();

    assert_eq!(result.hra_exemption, BigDecimal::from(228_000));
    assert_eq!(result.taxable_income, BigDecimal::from(922_000));
    assert_eq!(result.income_tax, BigDecimal::from(48_300));
    assert_eq!(result.cess, BigDecimal::from(1_932));
    assert_eq!(result.total_deductions, BigDecimal::from(74_232));
    assert_eq!(result.net_salary, BigDecimal::from(1_125_768));
    assert_eq!(result.monthly_net, BigDecimal::from(93_814));
    assert_eq!(result.tax_slab_description, "15% (₹9L – ₹12L)");
    assert_eq!(format_inr(&result.net_salary), "₹11.3L");
}

#[test]
fn test_rejected_requests() {
    let unknown_regime = TaxRequest::from_json(r#"{"grossPay": 500000, "taxRegime": "flat"}"#)
        .unwrap();
    assert!(matches!(
        calculate_tax(unknown_regime),
        Err(TaxError::InvalidInput(_))
    ));

    let missing_gross = TaxRequest::from_json(r#"{"age": 30}"#).unwrap();
    assert!(matches!(
        calculate_tax(missing_gross),
        Err(TaxError::InvalidInput(_))
    ));

    assert!(TaxRequest::from_json("not json").is_err());
}

#[tokio::test]
async fn test_complete_payroll_workflow() {
    let mut book = PayrollBook::new(MemoryStorage::with_seed_data().unwrap());

    book.record_salary(january_entry()).await.unwrap();

    // Latest entry drives the tax figures
    let tax = book.tax_for_salary("2025-01").await.unwrap();
    assert_eq!(tax.gross_salary, BigDecimal::from(1_200_000));
    assert_eq!(tax.net_salary, BigDecimal::from(1_125_768));

    let comparison = book.compare_regimes_for_salary("2025-01").await.unwrap();
    assert_eq!(comparison.recommended, TaxRegime::New);
    assert_eq!(comparison.old_regime.income_tax, BigDecimal::from(96_900));
    assert_eq!(comparison.annual_savings, BigDecimal::from(50_544));

    // Emergency fund reaches its target
    let goal = book
        .contribute_to_goal("2", &BigDecimal::from(150_000))
        .await
        .unwrap();
    assert_eq!(goal.status, GoalStatus::Completed);

    let dashboard = book.dashboard(date(2025, 7, 1)).await.unwrap();
    assert_eq!(dashboard.current_salary, BigDecimal::from(1_200_000));
    assert_eq!(dashboard.monthly_take_home, BigDecimal::from(93_814));
    assert_eq!(dashboard.annual_take_home, BigDecimal::from(1_125_768));
    assert_eq!(dashboard.tax_saved, BigDecimal::from(50_544));
    // No employer benefits on the January entry
    assert_eq!(dashboard.benefits.len(), 2);
    assert_eq!(dashboard.recent_entries.len(), 3);
    assert_eq!(dashboard.recent_entries[0].id, "2025-01");
    assert_eq!(dashboard.completed_goals, 1);
    assert_eq!(dashboard.active_goals, 1);
    // The salary goal was due on 2025-06-01
    assert_eq!(dashboard.overdue_goals, 1);

    let december = book
        .salary_summary(Some(date(2024, 12, 1)), Some(date(2024, 12, 31)))
        .await
        .unwrap();
    assert_eq!(december.entry_count, 1);
    assert_eq!(december.total_gross, BigDecimal::from(95_000));
}

#[tokio::test]
async fn test_payslip_matches_monthly_take_home() {
    let mut book = PayrollBook::new(MemoryStorage::new());
    book.record_salary(january_entry()).await.unwrap();

    let employee = EmployeeInfo {
        name: "Ishan".to_string(),
        employee_id: "EMP001".to_string(),
        designation: "Senior Software Engineer".to_string(),
        department: "Technology".to_string(),
        pan_number: "ABCDE1234F".to_string(),
        uan_number: "123456789012".to_string(),
    };
    let company = CompanyInfo {
        name: "TechCorp Solutions Pvt Ltd".to_string(),
        address: "Sector 62, Noida, UP - 201301".to_string(),
    };

    let payslip = book
        .generate_payslip(
            "2025-01",
            employee,
            company,
            PayPeriod::full_month("January 2025".to_string(), 23),
        )
        .await
        .unwrap();

    assert_eq!(payslip.gross_earnings, BigDecimal::from(100_000));
    // (48300 + 1932) / 12
    assert_eq!(payslip.deductions[0].amount, BigDecimal::from(4_186));
    assert_eq!(payslip.total_deductions, BigDecimal::from(6_186));
    assert_eq!(payslip.net_pay, BigDecimal::from(93_814));

    assert!(matches!(
        book.generate_payslip(
            "missing",
            payslip.employee.clone(),
            payslip.company.clone(),
            payslip.period.clone(),
        )
        .await,
        Err(RecordError::SalaryEntryNotFound(_))
    ));
}

#[tokio::test]
async fn test_enhanced_validation() {
    let mut book = PayrollBook::with_validators(
        MemoryStorage::new(),
        Box::new(EnhancedSalaryEntryValidator),
        Box::new(EnhancedGoalValidator),
    );

    let mut inflated_hra = january_entry();
    inflated_hra.hra = BigDecimal::from(70_000);
    assert!(matches!(
        book.record_salary(inflated_hra).await,
        Err(RecordError::Validation(_))
    ));

    let goal = book
        .create_goal(
            "Home Down Payment".to_string(),
            BigDecimal::from(2_000_000),
            BigDecimal::from(250_000),
            date(2027, 3, 31),
        )
        .await
        .unwrap();
    assert_eq!(goal.status, GoalStatus::InProgress);

    book.delete_goal(&goal.id).await.unwrap();
    assert!(book.list_goals().await.unwrap().is_empty());
}
