//! Quadrature decoder for the rotary encoder
//!
//! Only transitions of channel A are significant. A rising edge of A
//! counts one detent, with the direction taken from channel B; falling
//! edges are ignored. There is no debounce: the poll rate and the
//! detent mechanics keep contact bounce below the sampling interval.

use super::Level;

/// Direction of a single decoded detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// B was low on the rising edge of A
    Clockwise,
    /// B was high on the rising edge of A
    CounterClockwise,
}

impl Rotation {
    /// Signed position change for this detent
    pub const fn delta(self) -> i32 {
        match self {
            Rotation::Clockwise => 1,
            Rotation::CounterClockwise => -1,
        }
    }
}

/// Stateful A-edge quadrature decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    position: i32,
    last_a: Level,
}

impl QuadratureDecoder {
    /// Create a decoder at position 0, seeded with the current level of A
    pub const fn new(initial_a: Level) -> Self {
        Self {
            position: 0,
            last_a: initial_a,
        }
    }

    /// Feed one sample of both channels
    ///
    /// Returns the decoded detent, if any, and updates the running
    /// position. The last seen level of A is always updated.
    pub fn decode(&mut self, a: Level, b: Level) -> Option<Rotation> {
        if a == self.last_a {
            return None;
        }
        self.last_a = a;

        if !a.is_high() {
            return None;
        }

        let rotation = if b.is_high() {
            Rotation::CounterClockwise
        } else {
            Rotation::Clockwise
        };
        self.position = self.position.wrapping_add(rotation.delta());
        Some(rotation)
    }

    /// Running position (sum of all decoded deltas)
    pub const fn position(&self) -> i32 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use Level::{High, Low};

    #[test]
    fn test_rising_edge_direction() {
        let mut dec = QuadratureDecoder::new(Low);
        assert_eq!(dec.decode(High, Low), Some(Rotation::Clockwise));
        assert_eq!(dec.position(), 1);

        dec.decode(Low, Low);
        assert_eq!(dec.decode(High, High), Some(Rotation::CounterClockwise));
        assert_eq!(dec.position(), 0);
    }

    #[test]
    fn test_falling_edge_ignored() {
        let mut dec = QuadratureDecoder::new(High);
        assert_eq!(dec.decode(Low, Low), None);
        assert_eq!(dec.decode(Low, High), None);
        assert_eq!(dec.position(), 0);
    }

    #[test]
    fn test_b_changes_alone_ignored() {
        let mut dec = QuadratureDecoder::new(High);
        for _ in 0..4 {
            assert_eq!(dec.decode(High, Low), None);
            assert_eq!(dec.decode(High, High), None);
        }
        assert_eq!(dec.position(), 0);
    }

    #[test]
    fn test_full_cycles_count_one_detent_each() {
        // Clockwise gray sequence starting from A=H, B=H: (L,H) (L,L) (H,L) (H,H)
        let mut dec = QuadratureDecoder::new(High);
        for _ in 0..3 {
            dec.decode(Low, High);
            dec.decode(Low, Low);
            dec.decode(High, Low);
            dec.decode(High, High);
        }
        assert_eq!(dec.position(), 3);
    }

    fn level(high: bool) -> Level {
        Level::from_high(high)
    }

    proptest! {
        #[test]
        fn test_position_is_sum_of_deltas(
            initial in any::<bool>(),
            trace in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..256),
        ) {
            let mut dec = QuadratureDecoder::new(level(initial));
            let mut sum = 0i32;
            for (a, b) in trace {
                if let Some(rotation) = dec.decode(level(a), level(b)) {
                    sum += rotation.delta();
                }
            }
            prop_assert_eq!(dec.position(), sum);
        }

        #[test]
        fn test_emits_only_on_rising_a(
            trace in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..128),
        ) {
            let mut dec = QuadratureDecoder::new(Low);
            let mut prev_a = false;
            for (a, b) in trace {
                let out = dec.decode(level(a), level(b));
                if a && !prev_a {
                    let expected = if b { Rotation::CounterClockwise } else { Rotation::Clockwise };
                    prop_assert_eq!(out, Some(expected));
                } else {
                    prop_assert_eq!(out, None);
                }
                prev_a = a;
            }
        }
    }
}
