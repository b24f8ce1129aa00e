//! Moyers Prediction Tables
//!
//! Published 75% probability level values for the combined canine and
//! premolar widths, indexed by the sum of the four mandibular incisors.
//! These are shown to the clinician for reference; the analysis itself uses
//! the linear equations in [`crate::profile`], which reproduce every row.

use serde::{Deserialize, Serialize};

use crate::profile::ArchType;

/// One row of a prediction table (all values in mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTableRow {
    pub sum_of_incisors_mm: f64,
    pub canine_mm: f64,
    pub premolars_mm: f64,
}

const fn row(sum_of_incisors_mm: f64, canine_mm: f64, premolars_mm: f64) -> ReferenceTableRow {
    ReferenceTableRow {
        sum_of_incisors_mm,
        canine_mm,
        premolars_mm,
    }
}

/// Mandibular teeth
pub static LOWER_TABLE: [ReferenceTableRow; 11] = [
    row(20.0, 6.5, 10.5),
    row(21.0, 6.6, 10.7),
    row(22.0, 6.7, 10.9),
    row(23.0, 6.8, 11.1),
    row(24.0, 6.9, 11.3),
    row(25.0, 7.0, 11.5),
    row(26.0, 7.1, 11.7),
    row(27.0, 7.2, 11.9),
    row(28.0, 7.3, 12.1),
    row(29.0, 7.4, 12.3),
    row(30.0, 7.5, 12.5),
];

/// Maxillary teeth
pub static UPPER_TABLE: [ReferenceTableRow; 11] = [
    row(20.0, 7.0, 11.0),
    row(21.0, 7.2, 11.2),
    row(22.0, 7.4, 11.4),
    row(23.0, 7.6, 11.6),
    row(24.0, 7.8, 11.8),
    row(25.0, 8.0, 12.0),
    row(26.0, 8.2, 12.2),
    row(27.0, 8.4, 12.4),
    row(28.0, 8.6, 12.6),
    row(29.0, 8.8, 12.8),
    row(30.0, 9.0, 13.0),
];

/// Find the row for an incisor sum, rounded to the nearest whole mm.
///
/// Returns `None` when the rounded sum is outside the table.
pub fn row_for(arch: ArchType, incisor_sum_mm: f64) -> Option<&'static ReferenceTableRow> {
    let rounded = incisor_sum_mm.round();
    arch.reference_table()
        .iter()
        .find(|row| row.sum_of_incisors_mm == rounded)
}

impl ReferenceTableRow {
    /// Combined canine and premolar width
    pub fn total_mm(&self) -> f64 {
        self.canine_mm + self.premolars_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_accepted_range() {
        for arch in ArchType::ALL {
            let table = arch.reference_table();
            assert_eq!(table.len(), 11);
            assert_eq!(table[0].sum_of_incisors_mm, 20.0);
            assert_eq!(table[10].sum_of_incisors_mm, 30.0);
            for pair in table.windows(2) {
                assert!(pair[1].sum_of_incisors_mm > pair[0].sum_of_incisors_mm);
            }
        }
    }

    #[test]
    fn test_equations_reproduce_tables() {
        // The table is display-only, but it must not contradict the analysis.
        for arch in ArchType::ALL {
            let profile = arch.profile();
            for row in arch.reference_table() {
                let sum = row.sum_of_incisors_mm;
                assert!((profile.predict_canine(sum) - row.canine_mm).abs() < 1e-9, "{arch} canine at {sum}");
                assert!((profile.predict_premolars(sum) - row.premolars_mm).abs() < 1e-9, "{arch} premolars at {sum}");
            }
        }
    }

    #[test]
    fn test_row_for() {
        let row = row_for(ArchType::Lower, 22.4).unwrap();
        assert_eq!(row.sum_of_incisors_mm, 22.0);
        assert!((row.total_mm() - 17.6).abs() < 1e-9);

        assert_eq!(row_for(ArchType::Upper, 29.6).unwrap().canine_mm, 9.0);
        assert!(row_for(ArchType::Upper, 19.0).is_none());
        assert!(row_for(ArchType::Lower, 31.0).is_none());
    }
}
