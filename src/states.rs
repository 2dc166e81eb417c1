// Two-letter state abbreviations and the FIPS codes the census API expects.

use tracing::warn;

/// Returned by [`fips_code`] for abbreviations outside the table. The census
/// API rejects it, so an unknown state fails at fetch time.
pub const UNKNOWN_STATE: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCode {
    pub abbreviation: &'static str,
    pub fips: &'static str,
}

const fn state(abbreviation: &'static str, fips: &'static str) -> StateCode {
    StateCode { abbreviation, fips }
}

#[rustfmt::skip]
pub static STATE_CODES: &[StateCode] = &[
    state("AL", "01"), state("AK", "02"), state("AZ", "04"), state("AR", "05"),
    state("CA", "06"), state("CO", "08"), state("CT", "09"), state("DE", "10"),
    state("DC", "11"), state("FL", "12"), state("GA", "13"), state("HI", "15"),
    state("ID", "16"), state("IL", "17"), state("IN", "18"), state("IA", "19"),
    state("KS", "20"), state("KY", "21"), state("LA", "22"), state("ME", "23"),
    state("MD", "24"), state("MA", "25"), state("MI", "26"), state("MN", "27"),
    state("MS", "28"), state("MO", "29"), state("MT", "30"), state("NE", "31"),
    state("NV", "32"), state("NH", "33"), state("NJ", "34"), state("NM", "35"),
    state("NY", "36"), state("NC", "37"), state("ND", "38"), state("OH", "39"),
    state("OK", "40"), state("OR", "41"), state("PA", "42"), state("RI", "44"),
    state("SC", "45"), state("SD", "46"), state("TN", "47"), state("TX", "48"),
    state("UT", "49"), state("VT", "50"), state("VA", "51"), state("WA", "53"),
    state("WV", "54"), state("WI", "55"), state("WY", "56"), state("PR", "72"),
];

/// Look up the FIPS code for a state abbreviation, ignoring ASCII case.
///
/// Unknown abbreviations yield [`UNKNOWN_STATE`] instead of an error.
pub fn fips_code(abbreviation: &str) -> &'static str {
    match STATE_CODES
        .iter()
        .find(|s| s.abbreviation.eq_ignore_ascii_case(abbreviation))
    {
        Some(s) => s.fips,
        None => {
            warn!(abbreviation, "unknown state code, sending {UNKNOWN_STATE}");
            UNKNOWN_STATE
        }
    }
}
