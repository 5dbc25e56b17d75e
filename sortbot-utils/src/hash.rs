pub fn u8s_from_str(input: &str) -> [u8; 32] {
    blake3::hash(input.as_bytes()).into()
}

/// Seed for one round of a trial series. Every `(rand_hash, nonce)` pair maps
/// to an independent, reproducible seed.
pub fn calc_seed(rand_hash: &str, nonce: u64) -> [u8; 32] {
    u8s_from_str(format!("{}_{}", rand_hash, nonce).as_str())
}
