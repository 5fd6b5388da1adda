use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use sha2::{Digest, Sha256};

use crate::matcher::normalize;

/// One of the five cosmetic compatibility tiers.
pub struct CompatibilityTier {
    pub level: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub messages: [&'static str; 3],
}

pub const TIERS: [CompatibilityTier; 5] = [
    CompatibilityTier {
        level: "Different Worlds",
        emoji: "\u{1F30D}",
        color: "#9CA3AF",
        messages: [
            "The stars haven't aligned... yet!",
            "Opposites attract? Maybe in another universe!",
            "Your paths are quite different, but who knows?",
        ],
    },
    CompatibilityTier {
        level: "Curious Spark",
        emoji: "\u{2728}",
        color: "#60A5FA",
        messages: [
            "There's a faint spark between you two!",
            "Curiosity is the first step to love!",
            "Something mysterious connects you...",
        ],
    },
    CompatibilityTier {
        level: "Growing Connection",
        emoji: "\u{1F331}",
        color: "#34D399",
        messages: [
            "A beautiful connection is blooming!",
            "Your energies are starting to sync!",
            "The universe sees potential here!",
        ],
    },
    CompatibilityTier {
        level: "Strong Chemistry",
        emoji: "\u{1F49C}",
        color: "#A78BFA",
        messages: [
            "Wow! The chemistry is undeniable!",
            "Your wallets were meant to meet!",
            "This could be something special!",
        ],
    },
    CompatibilityTier {
        level: "Soulmates",
        emoji: "\u{1F495}",
        color: "#F472B6",
        messages: [
            "SOULMATES DETECTED! This is destiny!",
            "The blockchain has blessed this match!",
            "Written in the stars AND the blockchain!",
        ],
    },
];

/// Deterministic 0-100 compatibility score for an ordered address pair.
///
/// Four heuristics over the hex bodies of the two addresses: positional
/// character overlap (40), character frequency similarity (20), closeness of
/// the hex digit sums (20), and an XOR-derived "destiny" residue (20).
/// Individual factors truncate toward zero; the total is clamped to 0..=100.
pub fn compatibility_score(address1: &str, address2: &str) -> u8 {
    let a = hex_body(address1);
    let b = hex_body(address2);

    let digits_a = hex_digits(&a);
    let digits_b = hex_digits(&b);
    let sum_a: i64 = digits_a.iter().map(|&d| d as i64).sum();
    let sum_b: i64 = digits_b.iter().map(|&d| d as i64).sum();

    let mut score: i64 = 0;

    // Matching characters at the same positions, out of a nominal 40-char body.
    let matching = a.chars().zip(b.chars()).filter(|(x, y)| x == y).count();
    score += ((matching as f64 / 40.0) * 40.0) as i64;

    // Shared character frequency mass across both alphabets.
    let freq_a = char_frequencies(&a);
    let freq_b = char_frequencies(&b);
    let shared: usize = freq_a
        .keys()
        .chain(freq_b.keys())
        .collect::<std::collections::HashSet<_>>()
        .into_iter()
        .map(|c| {
            freq_a
                .get(c)
                .copied()
                .unwrap_or(0)
                .min(freq_b.get(c).copied().unwrap_or(0))
        })
        .sum();
    score += ((shared as f64 / 40.0) * 20.0) as i64;

    // Numeric harmony: how close the digit sums are. 600 is the widest
    // possible gap for a 40-char hex body; longer inputs can push this
    // factor negative, which the final clamp absorbs.
    let harmony = 1.0 - ((sum_a - sum_b).abs() as f64 / 600.0);
    score += (harmony * 20.0) as i64;

    // Destiny residue from the positional XOR pattern.
    let xor_sum: i64 = digits_a
        .iter()
        .zip(&digits_b)
        .map(|(&x, &y)| (x ^ y) as i64)
        .sum();
    let destiny = ((xor_sum % 100) + (sum_a + sum_b) % 100) % 100;
    score += ((destiny as f64 / 100.0) * 20.0) as i64;

    score.clamp(0, 100) as u8
}

/// Tier index for a score: 0-20, 21-40, 41-60, 61-80, 81-100.
pub fn tier_index(score: u8) -> usize {
    match score {
        0..=20 => 0,
        21..=40 => 1,
        41..=60 => 2,
        61..=80 => 3,
        _ => 4,
    }
}

/// Pick a flavor message for the pair. Seeded from a hash of the normalized
/// ordered pair, so the pick is deterministic per ordered pair.
pub fn pick_message(address1: &str, address2: &str, tier: &CompatibilityTier) -> &'static str {
    let seed_input = format!("{}{}", normalize(address1), normalize(address2));
    let digest = Sha256::digest(seed_input.as_bytes());
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);

    let mut rng = StdRng::seed_from_u64(u64::from_le_bytes(seed_bytes));
    tier.messages
        .choose(&mut rng)
        .copied()
        .unwrap_or(tier.messages[0])
}

/// Normalized address with any leading `0x` removed.
fn hex_body(address: &str) -> String {
    let normalized = normalize(address);
    normalized
        .strip_prefix("0x")
        .unwrap_or(&normalized)
        .to_string()
}

/// Hex digit values, one per character; non-hex characters count as 0.
fn hex_digits(body: &str) -> Vec<u32> {
    body.chars().map(|c| c.to_digit(16).unwrap_or(0)).collect()
}

fn char_frequencies(body: &str) -> HashMap<char, usize> {
    let mut freq = HashMap::new();
    for c in body.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }
    freq
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR_A: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";
    const ADDR_B: &str = "0x8ba1f109551bD432803012645Ac136ddd64DBA72";

    #[test]
    fn score_is_deterministic_per_ordered_pair() {
        let first = compatibility_score(ADDR_A, ADDR_B);
        for _ in 0..10 {
            assert_eq!(compatibility_score(ADDR_A, ADDR_B), first);
        }
    }

    #[test]
    fn score_ignores_case_and_prefix() {
        assert_eq!(
            compatibility_score(ADDR_A, ADDR_B),
            compatibility_score(&ADDR_A.to_uppercase().replace("0X", "0x"), ADDR_B)
        );
    }

    #[test]
    fn score_is_bounded() {
        let addresses = [
            ADDR_A,
            ADDR_B,
            "0x0000000000000000000000000000000000000000",
            "0xffffffffffffffffffffffffffffffffffffffff",
            "0x1",
            "not-hex-at-all",
            "",
        ];
        for a in &addresses {
            for b in &addresses {
                let score = compatibility_score(a, b);
                assert!(score <= 100, "{a} x {b} scored {score}");
            }
        }
    }

    #[test]
    fn identical_addresses_score_high() {
        // Full positional + frequency overlap and zero XOR distance.
        let score = compatibility_score(ADDR_A, ADDR_A);
        assert!(score >= 60, "got {score}");
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(tier_index(0), 0);
        assert_eq!(tier_index(20), 0);
        assert_eq!(tier_index(21), 1);
        assert_eq!(tier_index(40), 1);
        assert_eq!(tier_index(41), 2);
        assert_eq!(tier_index(60), 2);
        assert_eq!(tier_index(61), 3);
        assert_eq!(tier_index(80), 3);
        assert_eq!(tier_index(81), 4);
        assert_eq!(tier_index(100), 4);
    }

    #[test]
    fn message_pick_is_deterministic_and_from_the_tier() {
        let tier = &TIERS[2];
        let first = pick_message(ADDR_A, ADDR_B, tier);
        for _ in 0..10 {
            assert_eq!(pick_message(ADDR_A, ADDR_B, tier), first);
        }
        assert!(tier.messages.contains(&first));
    }
}
