use rand::Rng;

/// Removes one uniformly-random element from the pool and returns it.
pub fn pick_one<T>(rng: &mut impl Rng, pool: &mut Vec<T>) -> Option<T> {
    if pool.is_empty() {
        return None;
    }
    let i = rng.gen_range(0..pool.len());
    Some(pool.remove(i))
}

/// Removes up to `n` random elements from the pool and returns them.
pub fn pick_many<T>(rng: &mut impl Rng, pool: &mut Vec<T>, n: usize) -> Vec<T> {
    let mut picked = Vec::with_capacity(n);
    for _ in 0..n {
        match pick_one(rng, pool) {
            Some(v) => picked.push(v),
            None => break,
        }
    }
    picked
}
