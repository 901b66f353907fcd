//! Band classification.

use broadside_core::config::BandTable;
use broadside_core::enums::ShotKind;

/// The band a charge value falls in, evaluated High → Mid → Low with
/// inclusive bounds. First match wins when ranges overlap.
pub fn classify(bands: &BandTable, charge: f64) -> Option<ShotKind> {
    bands
        .by_priority()
        .find(|(_, band)| band.contains(charge))
        .map(|(kind, _)| kind)
}

/// Required hold time for a band.
pub fn hold_required(bands: &BandTable, kind: ShotKind) -> f64 {
    bands.band(kind).hold_secs
}
