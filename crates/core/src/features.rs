//! Derived attributes computed from validated measurements.
//!
//! Everything here is pure arithmetic and branching over values that have already passed
//! validation, so none of these functions can fail.

use crate::constants::PATIENT_BMI_DECIMALS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "Child")]
    Child,
    #[serde(rename = "Young Adult")]
    YoungAdult,
    #[serde(rename = "Middle Aged Adult")]
    MiddleAgedAdult,
    #[serde(rename = "Senior Citizen")]
    SeniorCitizen,
}

impl AgeGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            AgeGroup::Child => "Child",
            AgeGroup::YoungAdult => "Young Adult",
            AgeGroup::MiddleAgedAdult => "Middle Aged Adult",
            AgeGroup::SeniorCitizen => "Senior Citizen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifestyleRisk {
    High,
    Medium,
    Low,
}

impl LifestyleRisk {
    pub fn as_str(self) -> &'static str {
        match self {
            LifestyleRisk::High => "High",
            LifestyleRisk::Medium => "Medium",
            LifestyleRisk::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Underweight,
    Normal,
    Obese,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Underweight => "Underweight",
            Verdict::Normal => "Normal",
            Verdict::Obese => "Obese",
        }
    }
}

/// Body-mass index, `weight / height²`, unrounded.
pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / height_m.powi(2)
}

/// BMI as stored on patient records: rounded half away from zero to two decimals.
pub fn patient_bmi(weight_kg: f64, height_m: f64) -> f64 {
    round_to(bmi(weight_kg, height_m), PATIENT_BMI_DECIMALS)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn age_group(age: u32) -> AgeGroup {
    match age {
        0..=18 => AgeGroup::Child,
        19..=40 => AgeGroup::YoungAdult,
        41..=60 => AgeGroup::MiddleAgedAdult,
        _ => AgeGroup::SeniorCitizen,
    }
}

/// Non-smokers are always `Low`, whatever their BMI.
pub fn lifestyle_risk(smoker: bool, bmi: f64) -> LifestyleRisk {
    if smoker && bmi > 30.0 {
        LifestyleRisk::High
    } else if smoker && bmi > 25.0 {
        LifestyleRisk::Medium
    } else {
        LifestyleRisk::Low
    }
}

/// Verdict for a patient BMI. Expects the already-rounded value from [`patient_bmi`].
pub fn verdict(bmi: f64) -> Verdict {
    if bmi < 18.5 {
        Verdict::Underweight
    } else if bmi < 25.0 {
        Verdict::Normal
    } else {
        Verdict::Obese
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_insurance_flow_is_unrounded() {
        let value = bmi(70.0, 1.75);
        assert!((value - 22.857142857142858).abs() < 1e-12);
    }

    #[test]
    fn test_bmi_patient_flow_rounds_to_two_places() {
        assert_eq!(patient_bmi(70.0, 1.75), 22.86);
        assert_eq!(patient_bmi(50.0, 1.8), 15.43);
    }

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(age_group(1), AgeGroup::Child);
        assert_eq!(age_group(18), AgeGroup::Child);
        assert_eq!(age_group(19), AgeGroup::YoungAdult);
        assert_eq!(age_group(40), AgeGroup::YoungAdult);
        assert_eq!(age_group(41), AgeGroup::MiddleAgedAdult);
        assert_eq!(age_group(60), AgeGroup::MiddleAgedAdult);
        assert_eq!(age_group(61), AgeGroup::SeniorCitizen);
        assert_eq!(age_group(74), AgeGroup::SeniorCitizen);
    }

    #[test]
    fn test_lifestyle_risk() {
        assert_eq!(lifestyle_risk(true, 31.0), LifestyleRisk::High);
        assert_eq!(lifestyle_risk(true, 26.0), LifestyleRisk::Medium);
        assert_eq!(lifestyle_risk(true, 30.0), LifestyleRisk::Medium);
        assert_eq!(lifestyle_risk(true, 25.0), LifestyleRisk::Low);
        assert_eq!(lifestyle_risk(false, 40.0), LifestyleRisk::Low);
    }

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(verdict(18.49), Verdict::Underweight);
        assert_eq!(verdict(18.5), Verdict::Normal);
        assert_eq!(verdict(24.99), Verdict::Normal);
        assert_eq!(verdict(25.0), Verdict::Obese);
    }

    #[test]
    fn test_verdict_uses_rounded_bmi() {
        // 24.996 rounds up to 25.0 before the verdict is taken.
        let rounded = round_to(24.996, 2);
        assert_eq!(rounded, 25.0);
        assert_eq!(verdict(rounded), Verdict::Obese);
    }

    #[test]
    fn test_labels_serialize_with_display_names() {
        assert_eq!(
            serde_json::to_string(&AgeGroup::MiddleAgedAdult).unwrap(),
            "\"Middle Aged Adult\""
        );
        assert_eq!(serde_json::to_string(&Verdict::Obese).unwrap(), "\"Obese\"");
        assert_eq!(LifestyleRisk::Medium.as_str(), "Medium");
    }
}
