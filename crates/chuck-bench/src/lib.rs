//! Benchmark inputs and utilities for chuck.
//!
//! - [`scrambled`]: deterministic pseudo-random values for sort and merge
//!   workloads
//! - [`build_list`]: fill a list from any storage strategy

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use chuck_list::List;
use chuck_pool::ElementAllocator;

/// `count` deterministic pseudo-random values in `0..modulus`.
///
/// Same seed, same sequence, so runs are comparable.
pub fn scrambled(count: usize, modulus: u64, seed: u64) -> Vec<u64> {
    (0..count as u64)
        .map(|i| {
            (i.wrapping_add(seed).wrapping_mul(6364136223846793007) >> 17) % modulus.max(1)
        })
        .collect()
}

/// A list holding `values` in order, with nodes drawn from `alloc`.
pub fn build_list<A>(values: &[u64], alloc: A) -> List<u64, A>
where
    A: ElementAllocator<Value = u64>,
{
    let mut list = List::new_in(alloc);
    list.extend(values.iter().copied());
    list
}
