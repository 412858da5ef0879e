use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The full record mapping, keyed by patient id.
///
/// A B-tree map keeps iteration in id order, so listings and the stable
/// sort's tie order are deterministic across load/save cycles.
pub type PatientMap = BTreeMap<String, PatientRecord>;

/// Gender of a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

/// Weight category derived from BMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Underweight,
    #[serde(rename = "Normal Weight")]
    NormalWeight,
    Overweight,
    Obesity,
}

impl Verdict {
    /// Threshold table: <18.5 underweight, <25 normal, <30 overweight.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Verdict::Underweight
        } else if bmi < 25.0 {
            Verdict::NormalWeight
        } else if bmi < 30.0 {
            Verdict::Overweight
        } else {
            Verdict::Obesity
        }
    }
}

/// A stored patient record. The patient id is the map key and is not
/// duplicated here.
///
/// `bmi` and `verdict` are derived from height/weight on every validated
/// write; they are persisted for read convenience but never accepted from
/// the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub verdict: Verdict,
}

impl PatientRecord {
    /// Single validation and derivation entry point.
    ///
    /// Both create and the merged partial update go through here, so the
    /// field constraints live in exactly one place.
    pub fn new(
        name: String,
        city: String,
        age: u32,
        gender: Gender,
        height: f64,
        weight: f64,
    ) -> Result<Self, String> {
        if name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }
        if city.trim().is_empty() {
            return Err("City cannot be empty".to_string());
        }
        if age == 0 || age >= 120 {
            return Err("Age must be between 1 and 119".to_string());
        }
        if height <= 0.0 {
            return Err("Height must be greater than zero".to_string());
        }
        if weight <= 0.0 {
            return Err("Weight must be greater than zero".to_string());
        }

        let bmi = round2(weight / (height * height));
        let verdict = Verdict::from_bmi(bmi);

        Ok(Self {
            name,
            city,
            age,
            gender,
            height,
            weight,
            bmi,
            verdict,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(height: f64, weight: f64) -> PatientRecord {
        PatientRecord::new(
            "Asha".to_string(),
            "Pune".to_string(),
            30,
            Gender::Female,
            height,
            weight,
        )
        .unwrap()
    }

    #[test]
    fn bmi_is_rounded_to_two_decimals() {
        // 70 / 1.75^2 = 22.857...
        assert_eq!(record(1.75, 70.0).bmi, 22.86);
        assert_eq!(record(1.6, 51.2).bmi, 20.0);
    }

    #[test]
    fn verdict_thresholds_are_exact_at_boundaries() {
        assert_eq!(Verdict::from_bmi(18.49), Verdict::Underweight);
        assert_eq!(Verdict::from_bmi(18.5), Verdict::NormalWeight);
        assert_eq!(Verdict::from_bmi(24.99), Verdict::NormalWeight);
        assert_eq!(Verdict::from_bmi(25.0), Verdict::Overweight);
        assert_eq!(Verdict::from_bmi(29.99), Verdict::Overweight);
        assert_eq!(Verdict::from_bmi(30.0), Verdict::Obesity);
    }

    #[test]
    fn verdict_follows_derived_bmi() {
        assert_eq!(record(1.6, 51.2).verdict, Verdict::NormalWeight);
        assert_eq!(record(1.6, 45.0).verdict, Verdict::Underweight);
        assert_eq!(record(1.6, 70.0).verdict, Verdict::Overweight);
        assert_eq!(record(1.6, 90.0).verdict, Verdict::Obesity);
    }

    #[test]
    fn age_bounds_are_exclusive() {
        let build = |age| {
            PatientRecord::new(
                "Asha".to_string(),
                "Pune".to_string(),
                age,
                Gender::Female,
                1.6,
                51.2,
            )
        };

        assert!(build(0).is_err());
        assert!(build(120).is_err());
        assert!(build(1).is_ok());
        assert!(build(119).is_ok());
    }

    #[test]
    fn nonpositive_dimensions_are_rejected() {
        assert!(
            PatientRecord::new(
                "Asha".to_string(),
                "Pune".to_string(),
                30,
                Gender::Female,
                0.0,
                51.2,
            )
            .is_err()
        );
        assert!(
            PatientRecord::new(
                "Asha".to_string(),
                "Pune".to_string(),
                30,
                Gender::Female,
                1.6,
                -2.0,
            )
            .is_err()
        );
    }

    #[test]
    fn empty_name_or_city_is_rejected() {
        assert!(
            PatientRecord::new(
                "  ".to_string(),
                "Pune".to_string(),
                30,
                Gender::Female,
                1.6,
                51.2,
            )
            .is_err()
        );
        assert!(
            PatientRecord::new(
                "Asha".to_string(),
                String::new(),
                30,
                Gender::Female,
                1.6,
                51.2,
            )
            .is_err()
        );
    }

    #[test]
    fn serde_names_match_the_wire_format() {
        let json = serde_json::to_value(record(1.6, 51.2)).unwrap();
        assert_eq!(json["gender"], "female");
        assert_eq!(json["verdict"], "Normal Weight");
        assert_eq!(json["bmi"], 20.0);
    }
}
