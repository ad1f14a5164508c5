//! Walk through pool behaviour with chunk creation traced to stderr.
//!
//! ```sh
//! cargo run -p chuck-bench --example pool_walkthrough
//! ```

use chuck_pool::{ChuckAllocator, ElementAllocator};

fn print_chunks(label: &str, pool: &ChuckAllocator<i32>) {
    println!("{label}: {pool:?}");
    for (i, chunk) in pool.chunks().iter().enumerate() {
        println!(
            "  chunk {i}: capacity={} used={} free={}",
            chunk.capacity,
            chunk.used(),
            chunk.space_available
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(std::io::stderr)
        .init();

    let pool = ChuckAllocator::<i32>::new();

    // 10 fits the first default chunk; 20 does not fit anywhere and gets a
    // chunk sized exactly for it.
    let first = pool.allocate(10)?;
    let second = pool.allocate(20)?;
    for i in 0..20 {
        // SAFETY: `second` spans 20 elements reserved for this caller.
        unsafe { pool.construct_at(second.add(i), i as i32) };
    }
    print_chunks("after 10 + 20", &pool);

    // The clone is another handle on the same chunks; its allocation lands
    // in the 6 slots left after `first`.
    let alias = pool.clone();
    let third = alias.allocate(5)?;
    print_chunks("after clone + 5", &alias);

    // SAFETY: `first` starts the first chunk and `third` is carved from it
    // right after the 10 reserved elements.
    let offset = unsafe { third.offset_from(first) };
    println!("third allocation starts {offset} elements after the first");

    let sum: i32 = (0..20)
        // SAFETY: all 20 elements were written above and the pool is alive.
        .map(|i| unsafe { *second.add(i).as_ptr() })
        .sum();
    println!("sum of second allocation = {sum}");

    drop(pool);
    println!("handles left after dropping the original: {}", alias.handle_count());
    Ok(())
}
