// crates/vidcore-core/src/placeholder.rs
//
// Decoration for the detail page. None of these numbers mean anything;
// they are drawn once when a video is opened so they stay put while the
// page repaints.

use rand::Rng;

pub const RECOMMENDATION_COUNT: usize = 6;
pub const SUBSCRIBER_LABEL: &str = "1.2M subscribers";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recommendation {
    pub title:      String,
    /// Thousands of views, 0–99.
    pub views_k:    u32,
    /// 0–11.
    pub months_ago: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailDecoration {
    /// 0–9999.
    pub views:           u32,
    pub recommendations: Vec<Recommendation>,
}

impl DetailDecoration {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let recommendations = (1..=RECOMMENDATION_COUNT)
            .map(|n| Recommendation {
                title:      format!("Recommended Video {n}"),
                views_k:    rng.gen_range(0..100),
                months_ago: rng.gen_range(0..12),
            })
            .collect();
        Self { views: rng.gen_range(0..10_000), recommendations }
    }
}

/// `1234567` → `1,234,567`.
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn generated_numbers_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let d = DetailDecoration::generate(&mut rng);
            assert!(d.views < 10_000);
            assert_eq!(d.recommendations.len(), RECOMMENDATION_COUNT);
            for r in &d.recommendations {
                assert!(r.views_k < 100);
                assert!(r.months_ago < 12);
            }
        }
    }

    #[test]
    fn same_seed_same_decoration() {
        let a = DetailDecoration::generate(&mut StdRng::seed_from_u64(1));
        let b = DetailDecoration::generate(&mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(9999), "9,999");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
