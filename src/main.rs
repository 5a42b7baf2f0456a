//! Loan Engine CLI
//!
//! Evaluates one loan application and prints the underwriting report.
//! Reads a request from a JSON file when given, otherwise runs a built-in
//! sample application.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use loan_engine::profile::{
    EducationLevel, EmploymentStatus, Gender, HomeOwnership, Impact, LoanPurpose, MaritalStatus,
};
use loan_engine::{ApplicationRequest, LoanAdvisor};

#[derive(Parser, Debug)]
#[command(
    name = "loan-engine",
    about = "Risk and pricing decision engine for unsecured personal loans",
    version
)]
struct Cli {
    /// Application request JSON file (a built-in sample runs when omitted)
    #[arg(long)]
    application: Option<PathBuf>,
    /// Directory holding the exported model artifacts
    #[arg(long, default_value = "data/model")]
    model_dir: PathBuf,
    /// Print the raw report as JSON instead of the formatted summary
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let request = match &cli.application {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("cannot read application file {}", path.display()))?;
            serde_json::from_str::<ApplicationRequest>(&raw)
                .with_context(|| format!("cannot parse application file {}", path.display()))?
        }
        None => sample_request(),
    };

    let advisor = LoanAdvisor::from_artifact_dir(&cli.model_dir);
    let result = advisor.analyze(&request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Loan Engine v0.1.0");
    println!("==================\n");

    println!("Applicant:");
    println!("  Age: {}", request.age);
    println!(
        "  Employment: {:?} ({} years at current job)",
        request.employment_status, request.job_tenure
    );
    println!("  Monthly Income: Rs. {:.2}", request.monthly_income);
    println!(
        "  Loan Requested: Rs. {:.2} over {} months",
        request.loan_amount, request.loan_duration_months
    );
    println!(
        "  Scoring Path: {}",
        if advisor.is_model_backed() {
            "trained model"
        } else {
            "rule-based scorecard"
        }
    );
    println!();

    println!("Credit Assessment:");
    println!(
        "  Estimated Score Band: {} ({})",
        result.credit_score.display,
        result.credit_score.rating.as_str()
    );
    println!("  Approval Score: {:.1}%", result.approval_probability);
    println!("  Model Probability: {:.1}%", result.ml_probability);
    println!();

    println!("Pricing:");
    println!("  Annual Interest Rate: {:.2}%", result.interest_rate.annual);
    println!("  Monthly Rate: {:.3}%", result.interest_rate.monthly);
    println!("  Monthly EMI: Rs. {:.0}", result.emi.monthly);
    println!("  Total Interest: Rs. {:.0}", result.emi.total_interest);
    println!("  Total Repayment: Rs. {:.0}", result.emi.total_repayment);
    println!();

    println!("Income Analysis:");
    println!(
        "  Debt-to-Income: {:.1}%",
        result.income_analysis.debt_to_income_ratio
    );
    println!(
        "  EMI-to-Income: {:.1}%",
        result.income_analysis.emi_to_income_ratio
    );
    println!();

    println!("Decision: {}", result.decision.as_str());
    println!("  {}", result.decision_reason);
    println!(
        "  KYC Required: {}",
        if result.kyc_required { "yes" } else { "no" }
    );
    println!();

    if !result.explanations.is_empty() {
        println!("Key Factors:");
        for factor in &result.explanations {
            let marker = match factor.impact {
                Impact::Positive => "[+]",
                Impact::Negative => "[-]",
                Impact::Neutral => "[~]",
            };
            println!(
                "  {marker} {} ({:.4}): {}",
                factor.factor, factor.weight, factor.description
            );
        }
        println!();
    }

    println!("Co-applicant:");
    if result.coapplicant.provided {
        println!("  Income provided and blended into the assessment");
    } else if result.coapplicant.suggested {
        println!("  Suggested: {}", result.coapplicant.reason);
    } else {
        println!("  Not needed");
    }
    println!();

    println!("Next Steps:");
    for (index, step) in result.next_steps.iter().enumerate() {
        println!("  {}. {step}", index + 1);
    }

    Ok(())
}

/// Demo application used when no file is supplied
fn sample_request() -> ApplicationRequest {
    ApplicationRequest {
        age: 32,
        employment_status: EmploymentStatus::Employed,
        monthly_income: 85_000.0,
        loan_amount: 400_000.0,
        loan_duration_months: 48,
        monthly_debt: 15_000.0,
        coapplicant_income: 0.0,
        credit_score: Some(750),
        gender: Gender::Male,
        education_level: EducationLevel::Bachelor,
        experience: 8,
        job_tenure: 4,
        loan_purpose: LoanPurpose::Personal,
        marital_status: MaritalStatus::Married,
        dependents: 1,
        home_ownership: HomeOwnership::Own,
        previous_defaults: false,
    }
}
