#[cfg(test)]
mod tests {
    use bitcount::{count_set_bits, utils::count_ones_naive};
    use rand::{Rng, SeedableRng};
    use rayon::prelude::*;

    #[test]
    fn test_shared_buffer_from_many_threads() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let data: Vec<u8> = (0..1024 * 1024).map(|_| rng.gen()).collect();
        let expected = count_ones_naive(&data);

        let results: Vec<_> = (0..64)
            .into_par_iter()
            .map(|_| count_set_bits(&data))
            .collect();
        assert!(results.iter().all(|r| *r == Ok(expected)));
    }

    #[test]
    fn test_overlapping_windows() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let data: Vec<u8> = (0..64 * 1024).map(|_| rng.gen()).collect();

        (0..data.len() / 8).into_par_iter().step_by(97).for_each(|start| {
            let window = &data[8 * start..];
            assert_eq!(count_set_bits(window), Ok(count_ones_naive(window)));
        });
    }
}
