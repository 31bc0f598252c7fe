//! Id generation
//!
//! Ids only need to be unique within one store's lifetime.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 7;

pub trait IdGenerator {
    fn next_id(&mut self, prefix: &str) -> String;
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// `{prefix}_{7 random base36 chars}_{unix millis in base36}`
pub struct RandomIdGenerator {
    rng: StdRng,
}

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self, prefix: &str) -> String {
        let random: String = (0..RANDOM_LEN)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect();
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        format!("{}_{}_{}", prefix, random, to_base36(millis))
    }
}

/// `{prefix}_{n}` with n counting up from 1
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{}_{}", prefix, self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn test_random_id_shape() {
        let mut ids = RandomIdGenerator::seeded(7);
        let id = ids.next_id("idea");
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "idea");
        assert_eq!(parts[1].len(), RANDOM_LEN);
        assert!(parts[1].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_random_ids_do_not_repeat() {
        let mut ids = RandomIdGenerator::new();
        let seen: HashSet<String> = (0..1000).map(|_| ids.next_id("folder")).collect();
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_sequential() {
        let mut ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_id("idea"), "idea_1");
        assert_eq!(ids.next_id("folder"), "folder_2");
    }
}
