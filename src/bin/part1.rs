use anyhow::{Context, Result};
use clap::Parser;
use seating::{CLIArgs, NeighborRule, SeatMap};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = CLIArgs::parse();
    let layout = seating::read_layout(&args.input_path).with_context(|| {
        format!(
            "Failed to read map of seats layout from given input file({}).",
            args.input_path.display()
        )
    })?;

    let rule = NeighborRule::Adjacent;
    let mut seat_map = SeatMap::new(layout);
    let step_count = seat_map
        .stabilize_within(rule.counter(), &rule.seat_rule(), args.max_steps)
        .context("Failed to stabilize seats by adjacent seats.")?;

    println!(
        "After {} step(s), given seats layout stabilizes, and there are {} seats have been occupied.",
        step_count,
        seat_map.occupied_n()
    );

    Ok(())
}
