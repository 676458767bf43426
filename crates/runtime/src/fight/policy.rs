use rand::Rng;

use game_core::GameConfig;

/// How many rounds a fight lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPolicy {
    /// 1, 2 or 3 rounds with probability 0.6, 0.3 and 0.1.
    Weighted,
    /// Exactly this many rounds (at least one).
    Fixed(u32),
}

impl RoundPolicy {
    /// Cumulative thresholds of [`RoundPolicy::Weighted`].
    const WEIGHTS: [(f64, u32); 2] = [(0.6, 1), (0.9, 2)];

    pub fn draw<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        match self {
            RoundPolicy::Fixed(rounds) => rounds.max(1),
            RoundPolicy::Weighted => {
                let roll: f64 = rng.r#gen();
                Self::WEIGHTS
                    .iter()
                    .find(|(threshold, _)| roll < *threshold)
                    .map(|&(_, rounds)| rounds)
                    .unwrap_or(GameConfig::MAX_ORDINARY_ROUNDS)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn weighted_draws_follow_distribution() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts = [0u32; 3];
        let draws = 10_000;
        for _ in 0..draws {
            let rounds = RoundPolicy::Weighted.draw(&mut rng);
            assert!((1..=3).contains(&rounds));
            counts[rounds as usize - 1] += 1;
        }

        for (count, expected) in counts.iter().zip([0.6, 0.3, 0.1]) {
            let share = f64::from(*count) / f64::from(draws);
            assert!(
                (share - expected).abs() < 0.03,
                "share {share} too far from {expected}"
            );
        }
    }

    #[test]
    fn fixed_draw_is_constant() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(RoundPolicy::Fixed(5).draw(&mut rng), 5);
        assert_eq!(RoundPolicy::Fixed(0).draw(&mut rng), 1);
    }
}
