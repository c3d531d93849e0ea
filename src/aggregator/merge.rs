//! Field-level merge of economic indicators
//!
//! Quotes, rate tables and articles are replaced whole; only the indicator
//! set is assembled field by field.

use crate::normalize::world_bank::Observation;
use crate::types::{EconomicIndicatorSet, Indicator};

/// Overlay live observations on a fallback set.
///
/// A series without an observation keeps its fallback value. The set counts
/// as real only when GDP and GDP growth are both live; the data year follows
/// the GDP observation when there is one.
pub fn merge_indicators(
    fallback: EconomicIndicatorSet,
    observations: &[(Indicator, Option<Observation>)],
) -> EconomicIndicatorSet {
    let mut merged = EconomicIndicatorSet {
        is_real_data: false,
        real_fields: Vec::new(),
        ..fallback
    };

    for (indicator, observation) in observations {
        let Some(observation) = observation else {
            continue;
        };
        *merged.value_mut(*indicator) = observation.value;
        if !merged.real_fields.contains(indicator) {
            merged.real_fields.push(*indicator);
        }
        if *indicator == Indicator::Gdp {
            merged.data_year = observation.year;
        }
    }

    merged.real_fields.sort();
    merged.is_real_data = merged.is_real(Indicator::Gdp) && merged.is_real(Indicator::GdpGrowth);
    merged
}
