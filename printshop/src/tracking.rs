//! Tracking code generation.

use rand::Rng;

use crate::types::{Timestamp, TrackingCode};

/// Generates shopper-facing tracking codes.
///
/// Codes have the form `3DK-<unix millis mod 100000>-<random 0..=999>`:
/// short enough to read over the phone, random enough that collisions are
/// rare. They are not guaranteed unique by construction - the persistence
/// adapter rejects duplicates at order insertion and the order service
/// retries with a fresh code.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingCodeGenerator;

impl TrackingCodeGenerator {
    /// Creates a generator.
    pub const fn new() -> Self {
        Self
    }

    /// Produces a fresh candidate code.
    pub fn generate(&self) -> TrackingCode {
        let millis = Timestamp::now().as_datetime().timestamp_millis();
        let time_part = millis.rem_euclid(100_000);
        let random_part = rand::rng().random_range(0..1000);
        TrackingCode::try_new(format!("3DK-{time_part}-{random_part}"))
            .expect("generated tracking code matches the validated format")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_codes_match_the_expected_shape() {
        let generator = TrackingCodeGenerator::new();
        for _ in 0..100 {
            let code = generator.generate();
            let parts: Vec<&str> = code.as_ref().split('-').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0], "3DK");
            let time_part: u64 = parts[1].parse().unwrap();
            let random_part: u64 = parts[2].parse().unwrap();
            assert!(time_part < 100_000);
            assert!(random_part < 1000);
        }
    }

    #[test]
    fn codes_vary_across_calls() {
        let generator = TrackingCodeGenerator::new();
        let codes: HashSet<String> = (0..50)
            .map(|_| generator.generate().into_inner())
            .collect();
        // The random suffix alone gives 1000 possibilities; 50 draws
        // producing a single value would mean the generator is broken.
        assert!(codes.len() > 1);
    }
}
