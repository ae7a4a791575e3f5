use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splits<T> {
    pub train: Vec<T>,
    pub validation: Vec<T>,
    pub test: Vec<T>,
}

impl<T> Splits<T> {
    pub fn len(&self) -> usize {
        self.train.len() + self.validation.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Two-step shuffle split driven by one generator seeded from `seed`.
///
/// `ceil(test_size * n)` records are held out of train; of those,
/// `ceil(val_fraction_of_temp * held_out)` go to test and the rest to
/// validation.
pub fn split_records<T>(
    mut records: Vec<T>,
    test_size: f64,
    val_fraction_of_temp: f64,
    seed: u64,
) -> Splits<T> {
    let mut rng = StdRng::seed_from_u64(seed);

    records.shuffle(&mut rng);
    let held_out = tail_len(records.len(), test_size);
    let mut pool = records.split_off(records.len() - held_out);

    pool.shuffle(&mut rng);
    let test_len = tail_len(pool.len(), val_fraction_of_temp);
    let test = pool.split_off(pool.len() - test_len);

    Splits {
        train: records,
        validation: pool,
        test,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn tail_len(n: usize, fraction: f64) -> usize {
    ((n as f64) * fraction.clamp(0.0, 1.0)).ceil().min(n as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sizes_follow_ceiling_rule() {
        let splits = split_records((0..10).collect(), 0.2, 0.5, 42);
        assert_eq!(
            (splits.train.len(), splits.validation.len(), splits.test.len()),
            (8, 1, 1)
        );

        let splits = split_records((0..7).collect(), 0.2, 0.5, 42);
        // held out ceil(1.4) = 2, test ceil(1.0) = 1
        assert_eq!(
            (splits.train.len(), splits.validation.len(), splits.test.len()),
            (5, 1, 1)
        );

        let splits = split_records((0..3).collect(), 0.2, 0.5, 42);
        assert_eq!(
            (splits.train.len(), splits.validation.len(), splits.test.len()),
            (2, 0, 1)
        );
    }

    #[test]
    fn partitions_are_complete_and_disjoint() {
        let splits = split_records((0..97).collect::<Vec<u32>>(), 0.2, 0.5, 7);
        assert_eq!(splits.len(), 97);

        let all: HashSet<u32> = splits
            .train
            .iter()
            .chain(&splits.validation)
            .chain(&splits.test)
            .copied()
            .collect();
        assert_eq!(all.len(), 97);
    }

    #[test]
    fn same_seed_same_partition() {
        let a = split_records((0..50).collect::<Vec<u32>>(), 0.2, 0.5, 42);
        let b = split_records((0..50).collect::<Vec<u32>>(), 0.2, 0.5, 42);
        let c = split_records((0..50).collect::<Vec<u32>>(), 0.2, 0.5, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn empty_input() {
        let splits = split_records(Vec::<u32>::new(), 0.2, 0.5, 42);
        assert!(splits.is_empty());
    }
}
