use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::{
    common::SeedError,
    flight::{truncate_chars, FLIGHT_CODE_MAX_LEN},
};

const CODE_DIGITS: usize = 4;
const CODE_LETTERS: usize = 2;

/// Hands out flight codes that are not in `used`, recording each one it returns.
///
/// Codes look like `<prefix><4 digits><2 uppercase letters>`, cut to
/// [`FLIGHT_CODE_MAX_LEN`] characters. With the default `AP` prefix there are
/// 6.76 million codes, so `max_attempts` is only reached when the caller asks
/// for nearly the whole space.
pub struct FlightCodeGenerator {
    used: HashSet<String>,
    prefix: String,
    max_attempts: usize,
}

impl FlightCodeGenerator {
    #[must_use]
    pub fn new(used: HashSet<String>, prefix: &str, max_attempts: usize) -> Self {
        Self {
            used,
            prefix: prefix.to_string(),
            max_attempts,
        }
    }

    #[must_use]
    pub const fn used(&self) -> &HashSet<String> {
        &self.used
    }

    /// # Errors
    ///
    /// [`SeedError::CodeSpaceExhausted`] when `max_attempts` draws in a row collide.
    pub fn next_code<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String, SeedError> {
        for attempt in 1..=self.max_attempts {
            let code = self.candidate(rng);

            if self.used.insert(code.clone()) {
                if attempt > 1 {
                    debug!("Flight code {code} found after {attempt} attempts");
                }
                return Ok(code);
            }
        }

        Err(SeedError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    fn candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut code = self.prefix.clone();
        for _ in 0..CODE_DIGITS {
            code.push(char::from(b'0' + rng.random_range(0..10u8)));
        }
        for _ in 0..CODE_LETTERS {
            code.push(char::from(b'A' + rng.random_range(0..26u8)));
        }

        truncate_chars(&code, FLIGHT_CODE_MAX_LEN)
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_code_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut generator = FlightCodeGenerator::new(HashSet::new(), "AP", 10);

        let code = generator.next_code(&mut rng).unwrap();

        assert_eq!(8, code.len());
        assert!(code.starts_with("AP"));
        assert!(code[2..6].bytes().all(|b| b.is_ascii_digit()));
        assert!(code[6..].bytes().all(|b| b.is_ascii_uppercase()));
        assert!(generator.used().contains(&code));
    }

    #[test]
    fn test_long_prefix_is_truncated() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut generator = FlightCodeGenerator::new(HashSet::new(), "LONGPFX", 10);

        let code = generator.next_code(&mut rng).unwrap();

        assert_eq!(FLIGHT_CODE_MAX_LEN, code.len());
        assert!(code.starts_with("LONGPFX"));
    }

    #[test]
    fn test_codes_are_unique_and_avoid_preexisting() {
        // Same seed for both runs, so the second one starts out colliding.
        let mut warmup_rng = StdRng::seed_from_u64(42);
        let mut warmup = FlightCodeGenerator::new(HashSet::new(), "AP", 10);
        for _ in 0..50 {
            warmup.next_code(&mut warmup_rng).unwrap();
        }
        let preexisting = warmup.used().clone();
        assert_eq!(50, preexisting.len());

        let mut rng = StdRng::seed_from_u64(42);
        let mut generator = FlightCodeGenerator::new(preexisting.clone(), "AP", 100);
        let codes: Vec<String> = (0..500)
            .map(|_| generator.next_code(&mut rng).unwrap())
            .collect();

        let distinct: HashSet<&String> = codes.iter().collect();
        assert_eq!(codes.len(), distinct.len());
        assert!(codes.iter().all(|code| !preexisting.contains(code)));
    }

    #[test]
    fn test_exhausted_code_space() {
        // An over-long prefix leaves only the first 2 digits after truncation: 100 codes.
        let mut rng = StdRng::seed_from_u64(1);
        let mut generator = FlightCodeGenerator::new(HashSet::new(), "ABCDEFGH", 20);

        let result: Result<Vec<String>, SeedError> =
            (0..101).map(|_| generator.next_code(&mut rng)).collect();

        assert!(matches!(
            result,
            Err(SeedError::CodeSpaceExhausted { attempts: 20 })
        ));
    }
}
