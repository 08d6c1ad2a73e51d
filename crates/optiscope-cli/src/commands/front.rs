use crate::cli::FrontArgs;
use crate::config::PartialFrontConfig;
use crate::config::defaults::DefaultsConfig;
use crate::error::Result;
use crate::table;
use crate::utils::progress::CliProgressHandler;
use optiscope::core::io::table::ImportedTable;
use optiscope::core::models::column::Column;
use optiscope::core::models::point_set::PointSet;
use optiscope::core::models::selection::Selection;
use optiscope::engine::progress::ProgressReporter;
use optiscope::workflows;
use std::io::Write;
use tracing::{info, warn};

pub fn run(args: FrontArgs, show_progress: bool) -> Result<()> {
    let defaults = DefaultsConfig::default();
    let partial_config = match &args.config {
        Some(path) => PartialFrontConfig::from_file(path)?,
        None => PartialFrontConfig::default(),
    };

    info!("Loading input table from {:?}", &args.input.input);
    let delimiter = args.input.delimiter.unwrap_or(defaults.delimiter);
    let ImportedTable { columns, list, .. } = table::read_table(&args.input.input, delimiter)?;
    let set_name = args
        .input
        .input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    let set = PointSet::from_list(&set_name, list);

    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args, &set)?;

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let result = workflows::front::run(&set, &config, &reporter)?;

    if result.selection.is_empty() {
        warn!("Front extraction finished but no point had defined objective values.");
    }

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            write_front(file, &columns, &set, &result.selection)?;
            eprintln!(
                "✓ {} of {} points written to: {}",
                result.selection.len(),
                result.total_points,
                path.display()
            );
        }
        None => write_front(std::io::stdout().lock(), &columns, &set, &result.selection)?,
    }
    Ok(())
}

/// Writes the selected points as CSV, original row index first and then every
/// column in the input order.
fn write_front<W: Write>(
    writer: W,
    columns: &[Column],
    set: &PointSet,
    selection: &Selection,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["row".to_string()];
    header.extend(columns.iter().map(Column::label));
    csv_writer.write_record(&header)?;

    for (_, point) in selection.points(set) {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(
            point
                .tag()
                .map(|tag| tag.index.to_string())
                .unwrap_or_default(),
        );
        record.extend(columns.iter().map(|column| {
            point
                .value_of(column)
                .map(|value| value.to_string())
                .unwrap_or_default()
        }));
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
