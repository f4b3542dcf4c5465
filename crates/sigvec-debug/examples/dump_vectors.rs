//! Run a few kernels on random data and dump the results
//!
//! ```text
//! RUST_LOG=debug cargo run -p sigvec-debug --example dump_vectors
//! ```

use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sigvec_core::{kernels, Cf32};
use sigvec_debug::{save_slice, write_c32, write_f32, write_hex, write_packed_bits};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let k = kernels();

    let x: Vec<Cf32> = (0..8)
        .map(|_| Cf32::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect();
    let channel = vec![Cf32::new(0.8, -0.6); x.len()];

    let mut equalized = k.allocate::<Cf32>(x.len())?;
    k.mul_conj_c32(&x, &channel, &mut equalized)?;

    let mut power = vec![0.0f32; x.len()];
    k.magnitude_sqr_c32(&equalized, &mut power)?;

    let mut soft = vec![0u8; x.len()];
    k.quantize_u8(&power, 127.0, 0.0, 255.0, &mut soft)?;

    let bits: Vec<u8> = (0..20).map(|_| rng.gen_range(0..2)).collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_c32(&mut out, &equalized)?;
    write_f32(&mut out, &power)?;
    write_hex(&mut out, &soft)?;
    write_packed_bits(&mut out, &bits)?;

    let path = std::env::temp_dir().join("sigvec_equalized.bin");
    save_slice(&path, &equalized)?;
    println!(
        "{} backend, mean power {:.3}, dump at {}",
        k.backend_name(),
        k.avg_power_c32(&equalized)?,
        path.display()
    );

    Ok(())
}
