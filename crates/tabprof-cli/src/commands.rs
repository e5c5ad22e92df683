use std::io::{self, Write};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, info_span, warn};

use tabprof_ingest::{CsvOptions, read_csv_table};
use tabprof_model::Table;
use tabprof_report::{ColumnProfile, ProfileOptions, Report, TableFormat, TableProfile};
use tabprof_times::{category_gaps, find_gaps, find_gaps_by_label, time_diffs, time_diffs_by_label};

use crate::cli::{CategoryGapsArgs, ColumnArgs, GapsArgs, InputArgs, OutputArgs, ProfileArgs};
use crate::summary::{category_gaps_table, diffs_table, gaps_table};

fn load(input: &InputArgs) -> Result<Table> {
    let mut options = CsvOptions::default().with_try_parse_dates(!input.no_parse_dates);
    if let Some(index) = &input.index_column {
        options = options.with_index_column(index.clone());
    }
    let path = &input.path;
    read_csv_table(path, &options).with_context(|| format!("load {}", path.display()))
}

fn emit<R: Report>(report: &R, output: &OutputArgs) -> Result<()> {
    let format = TableFormat::from(output.format);
    match &output.output {
        Some(path) => {
            report
                .save_as(path, format)
                .with_context(|| format!("save profile to {}", path.display()))?;
            info!(path = %path.display(), "profile written");
        }
        None => {
            let rendered = report.render(format).context("render profile")?;
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("write profile")?;
            if !rendered.ends_with('\n') {
                writeln!(stdout).context("write profile")?;
            }
        }
    }
    Ok(())
}

pub fn run_profile(args: &ProfileArgs) -> Result<()> {
    let span = info_span!("profile", path = %args.input.path.display());
    let _guard = span.enter();
    let table = load(&args.input)?;
    let profile = TableProfile::new(&table, args.name.as_deref()).context("profile table")?;
    emit(&profile, &args.output)
}

pub fn run_column(args: &ColumnArgs) -> Result<()> {
    let span = info_span!("column", column = %args.column);
    let _guard = span.enter();
    let table = load(&args.input)?;
    let column = table
        .column(&args.column)
        .ok_or_else(|| anyhow!("column '{}' not found", args.column))?;
    let options = ProfileOptions::default()
        .with_freq_most(args.most)
        .with_freq_least(args.least);
    let profile = ColumnProfile::new(column, options)
        .with_context(|| format!("profile column '{}'", args.column))?;
    emit(&profile, &args.output)
}

pub fn run_gaps(args: &GapsArgs) -> Result<()> {
    let span = info_span!("gaps", threshold = %args.threshold);
    let _guard = span.enter();
    let table = load(&args.input)?;
    let rendered = match (&args.column, &args.input.index_column) {
        (Some(name), _) => {
            let column = table
                .column(name)
                .ok_or_else(|| anyhow!("column '{name}' not found"))?;
            if args.all {
                let diffs = time_diffs(column).context("difference timestamps")?;
                diffs_table(&diffs)
            } else {
                let gaps = find_gaps(column, args.threshold).context("find gaps")?;
                gaps_table(&gaps)
            }
        }
        (None, Some(_)) => {
            if args.all {
                let diffs = time_diffs_by_label(&table).context("difference row labels")?;
                diffs_table(&diffs)
            } else {
                let gaps = find_gaps_by_label(&table, args.threshold).context("find gaps")?;
                gaps_table(&gaps)
            }
        }
        (None, None) => bail!("pass --column or --index-col to choose the timestamps"),
    };
    println!("{rendered}");
    Ok(())
}

pub fn run_category_gaps(args: &CategoryGapsArgs) -> Result<()> {
    let span = info_span!("category_gaps", column = %args.column);
    let _guard = span.enter();
    if args.input.index_column.is_none() {
        bail!("--index-col is required to order '{}' by time", args.column);
    }
    let table = load(&args.input)?;
    let column = table
        .column(&args.column)
        .ok_or_else(|| anyhow!("column '{}' not found", args.column))?;
    let gaps = category_gaps(column, args.threshold, args.max_categories)
        .context("compute category gaps")?;
    match gaps {
        Some(gaps) => println!("{}", category_gaps_table(&gaps)),
        None => warn!(
            max_categories = args.max_categories,
            "no category gaps computed; raise --max-categories"
        ),
    }
    Ok(())
}
