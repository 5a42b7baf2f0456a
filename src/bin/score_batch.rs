//! Score every application in data/applications_sample.csv
//!
//! Outputs one decision row per application for portfolio review

use loan_engine::profile::{load_sample_applications, Decision};
use loan_engine::LoanAdvisor;
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

/// Portfolio totals across the batch
#[derive(Debug, Clone, Default)]
struct BatchSummary {
    approved: usize,
    pending: usize,
    rejected: usize,
    failed: usize,
    approved_principal: f64,
    rate_sum: f64,
    rate_count: usize,
}

fn main() {
    env_logger::init();

    let start = Instant::now();
    println!("Loading applications from data/applications_sample.csv...");

    let applications = load_sample_applications().expect("Failed to load applications");
    println!(
        "Loaded {} applications in {:?}",
        applications.len(),
        start.elapsed()
    );

    let advisor = LoanAdvisor::from_default_artifacts();
    println!(
        "Scoring path: {}",
        if advisor.is_model_backed() {
            "trained model"
        } else {
            "rule-based scorecard"
        }
    );

    println!("Scoring applications...");
    let score_start = Instant::now();

    // Score in parallel, the advisor is shared read-only
    let results: Vec<_> = applications
        .par_iter()
        .map(|request| advisor.analyze(request))
        .collect();

    println!("Scoring complete in {:?}", score_start.elapsed());

    // Write output
    let output_path = "batch_decisions.csv";
    let mut file = File::create(output_path).expect("Failed to create output file");

    writeln!(
        file,
        "Index,Age,MonthlyIncome,LoanAmount,DurationMonths,Decision,ApprovalScore,ModelProbability,ScoreBand,AnnualRate,MonthlyEMI"
    )
    .unwrap();

    let mut summary = BatchSummary::default();

    for (index, (request, result)) in applications.iter().zip(results.iter()).enumerate() {
        let result = match result {
            Ok(result) => result,
            Err(err) => {
                eprintln!("application {index} failed: {err}");
                summary.failed += 1;
                continue;
            }
        };

        match result.decision {
            Decision::Approved => {
                summary.approved += 1;
                summary.approved_principal += result.loan_details.amount;
            }
            Decision::PendingReview => summary.pending += 1,
            Decision::Rejected => summary.rejected += 1,
        }
        summary.rate_sum += result.interest_rate.annual;
        summary.rate_count += 1;

        writeln!(
            file,
            "{},{},{:.0},{:.0},{},{},{:.1},{:.1},{},{:.2},{:.0}",
            index,
            request.age,
            request.monthly_income,
            request.loan_amount,
            request.loan_duration_months,
            result.decision.as_str(),
            result.approval_probability,
            result.ml_probability,
            result.credit_score.display,
            result.interest_rate.annual,
            result.emi.monthly,
        )
        .unwrap();
    }

    println!("Output written to {}", output_path);

    // Print summary stats
    let scored = summary.approved + summary.pending + summary.rejected;
    println!("\nBatch Summary:");
    println!("  Scored: {} ({} failed)", scored, summary.failed);
    println!(
        "  Approved: {} (Rs. {:.0} principal)",
        summary.approved, summary.approved_principal
    );
    println!("  Pending Review: {}", summary.pending);
    println!("  Rejected: {}", summary.rejected);
    if summary.rate_count > 0 {
        println!(
            "  Average Annual Rate: {:.2}%",
            summary.rate_sum / summary.rate_count as f64
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
}
