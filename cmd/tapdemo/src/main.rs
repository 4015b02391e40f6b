//! tapdemo - Walkthrough of the multi-reader ring buffer.
//!
//! Streams a ramp signal through a scalar buffer and a frame buffer,
//! exercising partial reads, a second reader, overwrite protection, and a
//! rebase. Not part of the reusable component.

use anyhow::Result;
use clap::Parser;
use ringtap_buffer::{DEFAULT_READER, RingBuffer};
use tracing::debug;

/// Walkthrough of the multi-reader ring buffer.
#[derive(Parser, Debug)]
#[command(name = "tapdemo")]
#[command(about = "Demonstration walkthrough for the ringtap buffer")]
struct Args {
    /// Capacity of the scalar buffer
    #[arg(long, default_value_t = 20)]
    capacity: usize,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .init();
    }

    scalar_session(args.capacity)?;
    println!();
    frame_session()?;

    Ok(())
}

/// Ramp of `n` samples starting at `from`, scaled to look like a signal.
fn ramp(from: usize, n: usize) -> Vec<f32> {
    (from..from + n).map(|i| i as f32 * 0.05).collect()
}

fn scalar_session(capacity: usize) -> Result<()> {
    println!("One dimensional ring buffer (capacity {})", capacity);
    let mut ring = RingBuffer::<f32>::new(&[capacity])?;

    // Fill the buffer in two batches.
    let small = capacity / 5;
    println!("writing {} samples, then {} more ...", small, capacity - small);
    ring.write(&ramp(0, small))?;
    ring.write(&ramp(small, capacity - small))?;
    debug!(
        frames = ring.frames_written(),
        writable = ring.writable(),
        "buffer full"
    );

    // The buffer is exactly full: one more sample would clobber unread data.
    println!("headroom probe for 1 more: {}", ring.is_overwriting(1));

    println!("\nreading ...");
    println!("first {:>2} samples: {:?}", small, ring.read(Some(small))?);
    println!("remaining      : {:?}", ring.read(None)?);

    // A reader registered at position 0 replays the whole window.
    println!("\nsecond reader");
    ring.set_read_index("no2", 0);
    println!("first {:>2} samples: {:?}", small, ring.read_from("no2", Some(small))?);
    println!("remaining      : {:?}", ring.read_from("no2", None)?);

    let before = ring.read_index(DEFAULT_READER)?;
    println!(
        "new minimum index after rebase: {} (was {})",
        ring.rebase(),
        before
    );
    debug!(
        index = ring.read_index(DEFAULT_READER)?,
        "default reader after rebase"
    );

    Ok(())
}

fn frame_session() -> Result<()> {
    println!("3 dimensional ring buffer (6 frames of 2x2)");
    let mut ring = RingBuffer::<f32>::new(&[6, 2, 2])?;

    println!("writing 1 frame, then 5 more ...");
    ring.write(&ramp(0, ring.frame_len()))?;
    ring.write(&ramp(4, 5 * ring.frame_len()))?;
    debug!(frames = ring.frames_written(), "frame buffer full");

    println!("\nreading ...");
    println!("first frame    : {:?}", ring.read(Some(1))?);
    let rest = ring.read(None)?;
    println!(
        "remaining      : {} frames, {:?} elements each: {:?}",
        rest.len() / ring.frame_len(),
        ring.frame_shape(),
        rest
    );

    Ok(())
}
