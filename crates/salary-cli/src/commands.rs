use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use salary_ingest::{render_plain_text, try_parse};
use salary_model::{CellKey, EditOptions, EducationVocabulary, ParseOptions, ResolveOptions};
use salary_transform::{SalaryGrid, build_edit_records, compare, resolve};

use salary_cli::pipeline::{
    input_grid_from_json, load_schedule_file, load_vocabulary, parse_column, parse_district,
    read_text, select_schedule,
};
use salary_cli::report::{
    comparison_table, diff_table, grid_table, parse_csv, parse_table, resolved_table, to_json,
};
use salary_cli::types::{ComparisonReport, DiffReport, ResolvedCell};

use crate::cli::{CompareArgs, DiffArgs, ParseArgs, ParseFormatArg, ReportFormatArg, ResolveArgs};

pub fn run_parse(args: &ParseArgs) -> Result<()> {
    let span = info_span!("parse");
    let _guard = span.enter();

    let mut options = ParseOptions::new();
    if let Some(path) = &args.vocabulary {
        options = options.with_vocabulary(load_vocabulary(path)?);
    }
    if let Some(probe_lines) = args.probe_lines {
        options = options.with_probe_lines(probe_lines);
    }
    let text = read_text(args.input.as_deref())?;
    let result = try_parse(&text, &options).context("parse failed")?;
    info!(
        columns = result.columns.len(),
        steps = result.steps.len(),
        cells = result.cell_count(),
        "table parsed"
    );
    let placeholders = result
        .columns
        .iter()
        .filter(|column| column.is_placeholder())
        .count();
    if placeholders > 0 {
        warn!(placeholders, "some columns were not recognized");
    }

    match args.format {
        ParseFormatArg::Table => println!("{}", parse_table(&result)),
        ParseFormatArg::Json => println!("{}", to_json(&result)?),
        ParseFormatArg::Csv => print!("{}", parse_csv(&result)?),
        ParseFormatArg::Text => print!("{}", render_plain_text(&result)),
    }
    Ok(())
}

pub fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let schedules = load_schedule_file(&args.schedules)?;
    let schedule = select_schedule(
        &schedules,
        args.selector.school_year.as_deref(),
        args.selector.period.as_deref(),
    )?;
    let span = info_span!("resolve", schedule = %schedule.id());
    let _guard = span.enter();

    let grid = SalaryGrid::from_schedule(schedule);
    let options = ResolveOptions::new(args.strategy.into());
    let (Some(column), Some(step)) = (&args.column, args.step) else {
        match args.format {
            ReportFormatArg::Table => println!("{}", grid_table(&grid, &options)),
            ReportFormatArg::Json => {
                let cells: Vec<ResolvedCell> = grid
                    .steps()
                    .into_iter()
                    .flat_map(|step| {
                        grid.visible_columns().iter().map(move |column| {
                            CellKey::new(column.education.clone(), column.credits, step)
                        })
                    })
                    .map(|target| {
                        ResolvedCell::new(grid.id(), &target, &resolve(&grid, &target, &options))
                    })
                    .collect();
                println!("{}", to_json(&cells)?);
            }
        }
        return Ok(());
    };

    let column = parse_column(column, &EducationVocabulary::default())?;
    let target = CellKey::new(column.education, column.credits, step);
    let resolution = resolve(&grid, &target, &options);
    let cell = ResolvedCell::new(grid.id(), &target, &resolution);
    info!(cell = %target, provenance = %cell.provenance, "cell resolved");
    match args.format {
        ReportFormatArg::Table => println!("{}", resolved_table(&cell)),
        ReportFormatArg::Json => println!("{}", to_json(&cell)?),
    }
    Ok(())
}

pub fn run_diff(args: &DiffArgs) -> Result<DiffReport> {
    let span = info_span!("diff");
    let _guard = span.enter();

    let schedules = load_schedule_file(&args.schedules)?;
    let input_json = read_text(Some(args.input.as_path()))?;
    let input = input_grid_from_json(&input_json)
        .with_context(|| format!("load {}", args.input.display()))?;
    let options = EditOptions {
        fail_fast: args.fail_fast,
    };
    let report = DiffReport::from(build_edit_records(&schedules, &input, &options));
    info!(
        records = report.records.len(),
        errors = report.errors.len(),
        "diff complete"
    );
    Ok(report)
}

pub fn print_diff(report: &DiffReport, format: ReportFormatArg) -> Result<()> {
    match format {
        ReportFormatArg::Json => println!("{}", to_json(report)?),
        ReportFormatArg::Table => {
            if report.records.is_empty() {
                println!("No changes.");
            } else {
                println!("{}", diff_table(report));
            }
            if report.has_errors() {
                eprintln!("Errors:");
                for error in &report.errors {
                    eprintln!("- {error}");
                }
            }
        }
    }
    Ok(())
}

pub fn run_compare(args: &CompareArgs) -> Result<()> {
    let column = parse_column(&args.target.column, &EducationVocabulary::default())?;
    let target = CellKey::new(column.education, column.credits, args.target.step);
    let span = info_span!("compare", cell = %target);
    let _guard = span.enter();

    let mut districts = Vec::with_capacity(args.districts.len());
    for arg in &args.districts {
        let (name, path) = parse_district(arg)?;
        let schedules = load_schedule_file(&path)?;
        let schedule = select_schedule(
            &schedules,
            args.selector.school_year.as_deref(),
            args.selector.period.as_deref(),
        )
        .with_context(|| format!("district {name}"))?;
        districts.push((name, SalaryGrid::from_schedule(schedule)));
    }
    if districts.is_empty() {
        bail!("no districts given");
    }

    let options = ResolveOptions::new(args.strategy.into());
    let report = ComparisonReport {
        column: target.column_key(),
        step: target.step,
        rows: compare(&districts, &target, &options),
    };
    match args.format {
        ReportFormatArg::Table => println!("{}", comparison_table(&report)),
        ReportFormatArg::Json => println!("{}", to_json(&report)?),
    }
    Ok(())
}
