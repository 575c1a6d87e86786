use super::config::GenEffective;
use super::domain::{Rng, Shape, random_dataset};
use super::error::SerbenchError;

pub fn run(args: &GenEffective) -> Result<(), SerbenchError> {
    let shape = Shape {
        records: args.records,
        name_len: args.name_len,
        maps: args.maps,
        max_value: args.max_value,
    };
    let mut rng = Rng::new(args.seed);

    let start = std::time::Instant::now();
    let dataset = random_dataset(shape, &mut rng);
    tracing::info!(
        records = dataset.len(),
        map_entries = dataset.map_entries(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "generated dataset"
    );

    dataset.save(&args.output)?;
    tracing::info!(output = %args.output, "dataset written");
    Ok(())
}
