use crate::cli::StatsArgs;
use crate::config::defaults::DefaultsConfig;
use crate::error::Result;
use crate::table;
use optiscope::core::models::column::Column;
use optiscope::core::models::point::Point;
use optiscope::core::models::stats::MinMaxMean;
use std::fmt::Write;
use tracing::info;

pub fn run(args: StatsArgs) -> Result<()> {
    let delimiter = args
        .input
        .delimiter
        .unwrap_or(DefaultsConfig::default().delimiter);
    let table = table::read_table(&args.input.input, delimiter)?;
    info!(rows = table.list.len(), "Computing column statistics.");

    let stats = table.list.min_max_mean();
    print!("{}", render(&table.columns, &stats));
    Ok(())
}

fn render(columns: &[Column], stats: &MinMaxMean) -> String {
    let width = columns
        .iter()
        .map(|column| column.label().chars().count())
        .max()
        .unwrap_or(0)
        .max("column".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:>14}  {:>14}  {:>14}",
        "column", "min", "max", "mean"
    );
    for column in columns {
        let value = |point: &Point| point.value_of(column).unwrap_or(f64::NAN);
        let _ = writeln!(
            out,
            "{:<width$}  {:>14.6}  {:>14.6}  {:>14.6}",
            column.label(),
            value(&stats.min),
            value(&stats.max),
            value(&stats.mean)
        );
    }
    out
}
