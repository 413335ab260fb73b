/// Number of lit bars (0-4) for a signal strength in dBm
///
/// Each threshold of the non-decreasing ladder that the metric reaches
/// lights one more bar; anything below the first threshold shows none.
pub fn signal_bucket(dbm: i16, ladder: &[i16]) -> u8 {
    ladder.iter().take_while(|&&threshold| dbm >= threshold).count() as u8
}
