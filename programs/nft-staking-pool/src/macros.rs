#[macro_export]
macro_rules! pool_signer_seeds {
    ($pool:expr) => {
        &[$pool.rand.as_ref(), &[$pool.bump]]
    };
}
