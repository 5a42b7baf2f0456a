//! Credit score band estimation
//!
//! Produces a bureau-style score band on the 300-900 scale. A self-reported
//! score is banded directly; otherwise the band is synthesized from five
//! weighted factor families mirroring bureau methodology (payment history,
//! utilization, history length, credit mix, employment stability).

use serde::{Deserialize, Serialize};

use crate::profile::{
    ApplicantProfile, CreditRating, EducationLevel, EmploymentStatus, HomeOwnership,
};
use crate::scoring::jitter;

/// An estimated score range with its bureau rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditScoreBand {
    /// Lower edge of the band
    pub min: u16,
    /// Upper edge of the band
    pub max: u16,
    /// Bureau rating for the band
    pub rating: CreditRating,
}

impl CreditScoreBand {
    /// Band midpoint, the pricing anchor
    pub fn midpoint(&self) -> f64 {
        f64::from(self.min + self.max) / 2.0
    }

    /// "min-max" label for reports
    pub fn display(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

/// Estimates a credit score band from an applicant profile
pub struct CreditScoreEstimator;

impl CreditScoreEstimator {
    /// Bureau scale lower bound
    pub const MIN_SCORE: u16 = 300;

    /// Bureau scale upper bound
    pub const MAX_SCORE: u16 = 900;

    /// Estimate the applicant's score band
    ///
    /// A self-reported score short-circuits the synthesis: the applicant's
    /// own number is banded as-is.
    pub fn estimate(profile: &ApplicantProfile) -> CreditScoreBand {
        if let Some(manual) = profile.manual_credit_score {
            return Self::band_for_score(manual);
        }

        let points = Self::point_total(profile);
        let offset = jitter::score_jitter(
            profile.monthly_income,
            profile.debt_to_income(),
            profile.age,
            profile.job_tenure_years,
        );

        let score = (i32::from(Self::MIN_SCORE) + points as i32 + offset)
            .clamp(i32::from(Self::MIN_SCORE), i32::from(Self::MAX_SCORE)) as u16;
        Self::band_for_score(score)
    }

    /// Factor point total before the presentation offset
    ///
    /// Maximum 600 points: 210 payment history, 180 utilization, 90 history
    /// length, 60 credit mix, 60 employment stability. Monotone in job
    /// tenure and experience, anti-monotone in debt-to-income.
    pub fn point_total(profile: &ApplicantProfile) -> u32 {
        Self::payment_history_points(profile.job_tenure_years, profile.experience_years)
            + Self::utilization_points(profile.debt_to_income())
            + Self::history_length_points(profile.age, profile.experience_years)
            + Self::credit_mix_points(profile.home_ownership, profile.education)
            + Self::employment_points(profile.employment, profile.monthly_income)
    }

    /// Band and rating for a point score
    pub fn band_for_score(score: u16) -> CreditScoreBand {
        if score >= 800 {
            CreditScoreBand {
                min: (score - 20).max(800),
                max: (score + 20).min(900),
                rating: CreditRating::Excellent,
            }
        } else if score >= 750 {
            CreditScoreBand {
                min: score - 20,
                max: (score + 20).min(799),
                rating: CreditRating::VeryGood,
            }
        } else if score >= 700 {
            CreditScoreBand {
                min: score - 20,
                max: (score + 20).min(749),
                rating: CreditRating::Good,
            }
        } else if score >= 650 {
            CreditScoreBand {
                min: score - 20,
                max: (score + 20).min(699),
                rating: CreditRating::Fair,
            }
        } else if score >= 550 {
            CreditScoreBand {
                min: score - 25,
                max: (score + 25).min(649),
                rating: CreditRating::Poor,
            }
        } else {
            CreditScoreBand {
                min: score.saturating_sub(25).max(300),
                max: (score + 25).min(549),
                rating: CreditRating::VeryPoor,
            }
        }
    }

    /// Payment history proxy from employment longevity (max 210)
    fn payment_history_points(job_tenure_years: u8, experience_years: u8) -> u32 {
        let tenure_points = if job_tenure_years >= 5 {
            150
        } else if job_tenure_years >= 3 {
            120
        } else if job_tenure_years >= 2 {
            90
        } else if job_tenure_years >= 1 {
            60
        } else {
            20
        };

        let experience_points = if experience_years >= 10 {
            60
        } else if experience_years >= 5 {
            45
        } else if experience_years >= 2 {
            25
        } else {
            5
        };

        (tenure_points + experience_points).min(210)
    }

    /// Utilization proxy from debt-to-income, lower is better (max 180)
    fn utilization_points(debt_to_income: f64) -> u32 {
        if debt_to_income <= 0.10 {
            180
        } else if debt_to_income <= 0.20 {
            160
        } else if debt_to_income <= 0.30 {
            130
        } else if debt_to_income <= 0.40 {
            90
        } else if debt_to_income <= 0.50 {
            50
        } else {
            15
        }
    }

    /// History length proxy from age and experience (max 90)
    fn history_length_points(age: u8, experience_years: u8) -> u32 {
        if age >= 45 && experience_years >= 15 {
            90
        } else if age >= 40 && experience_years >= 10 {
            75
        } else if age >= 35 && experience_years >= 7 {
            60
        } else if age >= 30 && experience_years >= 4 {
            45
        } else if age >= 25 {
            30
        } else {
            15
        }
    }

    /// Credit mix proxy from housing and education (max 60)
    fn credit_mix_points(home_ownership: HomeOwnership, education: EducationLevel) -> u32 {
        let home_points = match home_ownership {
            HomeOwnership::Own => 35,
            HomeOwnership::Mortgage => 30,
            HomeOwnership::Rent => 10,
            HomeOwnership::Other => 0,
        };

        let education_points = match education {
            EducationLevel::PhD => 25,
            EducationLevel::Master => 20,
            EducationLevel::Bachelor => 15,
            EducationLevel::Associate => 10,
            EducationLevel::HighSchool => 5,
        };

        (home_points + education_points).min(60)
    }

    /// Employment stability from status and income level (max 60)
    fn employment_points(employment: EmploymentStatus, monthly_income: f64) -> u32 {
        let status_points = match employment {
            EmploymentStatus::Employed => 35,
            EmploymentStatus::SelfEmployed => 20,
            EmploymentStatus::Unemployed => 0,
        };

        let income_points = if monthly_income >= 100_000.0 {
            25
        } else if monthly_income >= 75_000.0 {
            20
        } else if monthly_income >= 50_000.0 {
            15
        } else if monthly_income >= 30_000.0 {
            10
        } else if monthly_income >= 20_000.0 {
            5
        } else {
            0
        };

        (status_points + income_points).min(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ApplicationRequest, Gender, LoanPurpose, MaritalStatus};

    fn profile_with(
        job_tenure: u8,
        experience: u8,
        monthly_debt: f64,
        credit_score: Option<u16>,
    ) -> ApplicantProfile {
        ApplicationRequest {
            age: 38,
            employment_status: EmploymentStatus::Employed,
            monthly_income: 80_000.0,
            loan_amount: 400_000.0,
            loan_duration_months: 48,
            monthly_debt,
            coapplicant_income: 0.0,
            credit_score,
            gender: Gender::Male,
            education_level: EducationLevel::Master,
            experience,
            job_tenure,
            loan_purpose: LoanPurpose::Personal,
            marital_status: MaritalStatus::Married,
            dependents: 0,
            home_ownership: HomeOwnership::Mortgage,
            previous_defaults: false,
        }
        .to_profile()
        .unwrap()
    }

    #[test]
    fn test_manual_score_bands() {
        let excellent = CreditScoreEstimator::estimate(&profile_with(4, 6, 0.0, Some(820)));
        assert_eq!(excellent.rating, CreditRating::Excellent);
        assert_eq!(excellent.min, 800);
        assert_eq!(excellent.max, 840);

        let very_good = CreditScoreEstimator::estimate(&profile_with(4, 6, 0.0, Some(760)));
        assert_eq!(very_good.rating, CreditRating::VeryGood);
        assert_eq!(very_good.min, 740);
        assert_eq!(very_good.max, 780);

        let good = CreditScoreEstimator::estimate(&profile_with(4, 6, 0.0, Some(705)));
        assert_eq!(good.rating, CreditRating::Good);
        assert_eq!(good.min, 685);
        assert_eq!(good.max, 725);

        let fair = CreditScoreEstimator::estimate(&profile_with(4, 6, 0.0, Some(650)));
        assert_eq!(fair.rating, CreditRating::Fair);
        assert_eq!(fair.min, 630);
        assert_eq!(fair.max, 670);

        let poor = CreditScoreEstimator::estimate(&profile_with(4, 6, 0.0, Some(600)));
        assert_eq!(poor.rating, CreditRating::Poor);
        assert_eq!(poor.min, 575);
        assert_eq!(poor.max, 625);

        let very_poor = CreditScoreEstimator::estimate(&profile_with(4, 6, 0.0, Some(310)));
        assert_eq!(very_poor.rating, CreditRating::VeryPoor);
        assert_eq!(very_poor.min, 300);
        assert_eq!(very_poor.max, 335);
    }

    #[test]
    fn test_band_edges_respect_rating_ranges() {
        let band = CreditScoreEstimator::band_for_score(798);
        assert_eq!(band.rating, CreditRating::VeryGood);
        assert_eq!(band.max, 799);

        let band = CreditScoreEstimator::band_for_score(900);
        assert_eq!(band.max, 900);
        assert_eq!(band.min, 880);

        let band = CreditScoreEstimator::band_for_score(300);
        assert_eq!(band.min, 300);
        assert_eq!(band.max, 325);
    }

    #[test]
    fn test_point_total_components() {
        // tenure 4 -> 120, experience 6 -> 45 => 165 payment history
        // dti 20000/80000 = 0.25 -> 130 utilization
        // age 38, experience 6 -> 45 history length
        // Mortgage 30 + Master 20 -> 50 mix
        // Employed 35 + income 80k 20 -> 55 employment
        let profile = profile_with(4, 6, 20_000.0, None);
        assert_eq!(CreditScoreEstimator::point_total(&profile), 445);
    }

    #[test]
    fn test_point_total_monotone_in_tenure() {
        let short = profile_with(1, 6, 8_000.0, None);
        let long = profile_with(6, 6, 8_000.0, None);
        assert!(
            CreditScoreEstimator::point_total(&long) > CreditScoreEstimator::point_total(&short)
        );
    }

    #[test]
    fn test_point_total_anti_monotone_in_dti() {
        let light = profile_with(4, 6, 8_000.0, None); // dti 0.10
        let heavy = profile_with(4, 6, 40_000.0, None); // dti 0.50
        assert!(
            CreditScoreEstimator::point_total(&light) > CreditScoreEstimator::point_total(&heavy)
        );
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let profile = profile_with(3, 5, 12_000.0, None);
        let a = CreditScoreEstimator::estimate(&profile);
        let b = CreditScoreEstimator::estimate(&profile);
        assert_eq!(a, b);
    }

    #[test]
    fn test_estimate_stays_on_bureau_scale() {
        // Max factor total is 600; even with +10 offset the clamp holds
        let mut strong = profile_with(6, 12, 4_000.0, None);
        strong.age = 50;
        strong.experience_years = 16;
        strong.home_ownership = HomeOwnership::Own;
        strong.education = EducationLevel::PhD;
        strong.monthly_income = 120_000.0;
        strong.monthly_debt = 6_000.0; // dti 0.05
        let band = CreditScoreEstimator::estimate(&strong);
        assert_eq!(band.rating, CreditRating::Excellent);
        assert!(band.max <= 900);

        let mut weak = profile_with(0, 0, 70_000.0, None);
        weak.age = 22;
        weak.employment = EmploymentStatus::Unemployed;
        weak.home_ownership = HomeOwnership::Other;
        weak.education = EducationLevel::HighSchool;
        weak.monthly_income = 10_000.0;
        weak.monthly_debt = 9_000.0; // dti 0.9
        let band = CreditScoreEstimator::estimate(&weak);
        assert_eq!(band.rating, CreditRating::VeryPoor);
        assert!(band.min >= 300);
    }
}
