use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use dashboard::{
    CapacityRange, FilterSelection, MapView, RenderSettings, ViewModel, controls, render,
};
use formats::{FacilityTable, load_facilities};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Steel plant dataset dashboard, offline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print filter options and the default selection as JSON
    Controls {
        /// Plant CSV
        input: PathBuf,

        #[command(flatten)]
        render: RenderArgs,

        #[command(flatten)]
        output: JsonArgs,
    },

    /// Print the four KPIs for a selection
    Summary {
        input: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the full view model for a selection as JSON
    Render {
        input: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        render: RenderArgs,

        #[command(flatten)]
        output: JsonArgs,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Keep plants of this owner (repeatable; none means all owners)
    #[arg(long = "owner")]
    owners: Vec<String>,

    /// Keep plants in this country (repeatable; none means all countries)
    #[arg(long = "country")]
    countries: Vec<String>,

    /// Lower capacity bound in Mtpa
    #[arg(long)]
    min: Option<f64>,

    /// Upper capacity bound in Mtpa
    #[arg(long)]
    max: Option<f64>,

    /// Start from the dashboard's initial selection instead of "everything"
    #[arg(long)]
    defaults: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Owners pre-selected by the default selection
    #[arg(long, default_value_t = 10)]
    default_owners: usize,

    /// Basemap style URL passed through to the map layer
    #[arg(long)]
    map_style: Option<String>,
}

#[derive(Args, Debug)]
struct JsonArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

impl RenderArgs {
    fn settings(&self) -> RenderSettings {
        let defaults = RenderSettings::default();
        RenderSettings {
            default_owner_count: self.default_owners,
            map_style: self.map_style.clone().unwrap_or(defaults.map_style),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &mut out)
}

fn run(command: Command, out: &mut impl Write) -> Result<(), String> {
    match command {
        Command::Controls {
            input,
            render,
            output,
        } => {
            let table = load(&input)?;
            let c = controls(&table, &render.settings());
            write_json(out, &c, output.pretty)
        }
        Command::Summary {
            input,
            filters,
            render: render_args,
        } => {
            let table = load(&input)?;
            let settings = render_args.settings();
            let selection = build_selection(&filters, &table, &settings)?;
            write_summary(out, &render(&table, &selection, &settings))
        }
        Command::Render {
            input,
            filters,
            render: render_args,
            output,
        } => {
            let table = load(&input)?;
            let settings = render_args.settings();
            let selection = build_selection(&filters, &table, &settings)?;
            write_json(out, &render(&table, &selection, &settings), output.pretty)
        }
    }
}

fn load(path: &Path) -> Result<FacilityTable, String> {
    let table = load_facilities(path).map_err(|e| e.to_string())?;
    let report = table.report();
    debug!(
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        "input loaded"
    );
    Ok(table)
}

fn build_selection(
    args: &FilterArgs,
    table: &FacilityTable,
    settings: &RenderSettings,
) -> Result<FilterSelection, String> {
    let mut selection = if args.defaults {
        controls(table, settings).defaults
    } else {
        FilterSelection::default()
    };

    if !args.owners.is_empty() {
        selection.owners = args.owners.iter().cloned().collect();
    }
    if !args.countries.is_empty() {
        selection.countries = args.countries.iter().cloned().collect();
    }

    if args.min.is_some() || args.max.is_some() {
        let bounds = controls(table, settings).options.capacity_bounds;
        let range = CapacityRange::new(
            args.min.unwrap_or(bounds.min),
            args.max.unwrap_or(bounds.max),
        );
        if !range.min.is_finite() || !range.max.is_finite() {
            return Err("capacity bounds must be finite".to_string());
        }
        if range.min > range.max {
            return Err(format!(
                "--min ({}) must not exceed --max ({})",
                range.min, range.max
            ));
        }
        selection.capacity_range = Some(range);
    }

    Ok(selection)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> Result<(), String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| format!("json: {e}"))?;
    writeln!(out, "{text}").map_err(|e| format!("write: {e}"))
}

fn write_summary(out: &mut impl Write, model: &ViewModel) -> Result<(), String> {
    let io_err = |e: io::Error| format!("write: {e}");
    let view = match model {
        ViewModel::NoMatches { notice } => {
            return writeln!(out, "{notice}").map_err(io_err);
        }
        ViewModel::Dashboard(view) => view,
    };

    let m = &view.metrics;
    writeln!(out, "Total Plants (Filtered): {}", m.total_count).map_err(io_err)?;
    writeln!(out, "Total Capacity (Mtpa):   {:.2}", m.total_capacity).map_err(io_err)?;
    writeln!(out, "Avg. Plant Capacity:     {:.2}", m.average_capacity).map_err(io_err)?;
    writeln!(out, "Countries:               {}", m.distinct_country_count).map_err(io_err)?;
    match &view.map {
        MapView::Ready { layer } => {
            writeln!(out, "Mapped plants:           {}", layer.points.len()).map_err(io_err)?
        }
        MapView::Unavailable { notice } => writeln!(out, "{notice}").map_err(io_err)?,
    }
    for warning in &view.warnings {
        writeln!(out, "warning: {warning}").map_err(io_err)?;
    }
    Ok(())
}
