use log::{debug, info, warn};

use instant_runoff::*;
use snafu::{prelude::*, Snafu};

use std::cmp::Reverse;
use std::fs;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::rcv::config_reader::*;
use crate::rcv::io_common::records_to_ballots;
use crate::rcv::io_csv::read_csv_records;
use crate::rcv::io_xlsx::read_xlsx_records;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum RcvError {
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("The worksheet {worksheet} was not found in {path}"))]
    MissingWorksheet { path: String, worksheet: String },
    #[snafu(display(
        "The Excel file {path} has {count} worksheets, the worksheet name must be provided"
    ))]
    AmbiguousWorksheet { path: String, count: usize },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error formatting the summary"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Expected an integer in the configuration"))]
    ParsingJsonNumber {},

    // Malformed input
    #[snafu(display("The input does not have a header line"))]
    MissingHeader {},
    #[snafu(display("The header of the input does not start with a {marker:?} field"))]
    MissingHeaderMarker { marker: String },
    #[snafu(display("No rank labels were provided"))]
    MissingRankLabels {},
    #[snafu(display("No input file: use --input or provide a ballot source in the configuration"))]
    MissingInput {},

    #[snafu(display("The tabulation failed"))]
    Tabulation { source: TabulationError },
    #[snafu(display("Difference detected between calculated summary and reference summary {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RcvResult<T> = Result<T, RcvError>;

fn result_stats_to_json(rs: &ElectionResult) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for round_stat in rs.round_stats.iter() {
        let mut tally: JSMap<String, JSValue> = JSMap::new();
        for (name, count) in round_stat.tally.iter() {
            tally.insert(name.clone(), json!(count.to_string()));
        }

        let mut tally_results: Vec<JSValue> = Vec::new();
        if let Some(elim_stats) = &round_stat.tally_result_eliminated {
            let mut transfers: JSMap<String, JSValue> = JSMap::new();
            for (name, count) in elim_stats.transfers.iter() {
                transfers.insert(name.clone(), json!(count.to_string()));
            }
            if elim_stats.exhausted > 0 {
                transfers.insert(
                    "exhausted".to_string(),
                    json!(elim_stats.exhausted.to_string()),
                );
            }
            tally_results.push(json!({
                "eliminated": elim_stats.name,
                "transfers": transfers
            }));
        }
        for winner_name in round_stat.tally_results_elected.iter() {
            tally_results.push(json!({
                "elected": winner_name,
                "transfers": {}
            }));
        }

        let js = json!({"round": round_stat.round, "tally": tally, "tallyResults": tally_results});
        l.push(js);
    }
    l
}

fn build_summary_js(settings: &ElectionSettings, rv: &ElectionResult) -> JSValue {
    let c = OutputConfig {
        contest: settings.contest_name.clone(),
        date: settings.contest_date.clone(),
        jurisdiction: settings.contest_jurisdiction.clone(),
        office: settings.contest_office.clone(),
        threshold: Some(rv.threshold.to_string()),
    };
    json!({
        "config": c,
        "results": result_stats_to_json(rv) })
}

// Highest count first, then by name.
fn report_order(tally: &[(String, u64)]) -> Vec<(&String, u64)> {
    let mut l: Vec<(&String, u64)> = tally.iter().map(|(name, count)| (name, *count)).collect();
    l.sort_by(|a, b| a.0.cmp(b.0));
    l.sort_by_key(|(_, count)| Reverse(*count));
    l
}

/// Prints the rounds and the winners in a human-readable form.
fn print_report(rv: &ElectionResult) {
    for round in rv.round_stats.iter() {
        println!(
            "Round {} (winning threshold: {})",
            round.round, rv.threshold
        );
        let eliminated = round.tally_result_eliminated.as_ref().map(|e| e.name.as_str());
        for (name, count) in report_order(&round.tally) {
            let status = if round.tally_results_elected.contains(name) {
                " -> elected"
            } else if eliminated == Some(name.as_str()) {
                " -> eliminated"
            } else {
                ""
            };
            println!("{:>8} {}{}", count, name, status);
        }
        if round.exhausted > 0 {
            println!("{:>8} (exhausted ballots)", round.exhausted);
        }
    }
    println!("Winner(s):");
    for w in rv.winners.iter() {
        println!("\t{}", w);
    }
}

/// Reads the ballots described by the settings.
pub fn read_ballots(settings: &ElectionSettings) -> RcvResult<Vec<Ballot>> {
    info!(
        "Attempting to read {:?} file {:?}",
        settings.provider, settings.input_path
    );
    let records = match settings.provider {
        InputProvider::Csv => read_csv_records(&settings.input_path)?,
        InputProvider::Xlsx => read_xlsx_records(
            &settings.input_path,
            settings.excel_worksheet_name.as_deref(),
        )?,
    };
    debug!("read_ballots: {} records", records.len());
    records_to_ballots(&records, &settings.header_marker, &settings.rank_labels)
}

/// Reads the ballots and runs the election.
pub fn tabulate(settings: &ElectionSettings) -> RcvResult<ElectionResult> {
    let ballots = read_ballots(settings)?;
    info!("Read {} ballots", ballots.len());
    let result = run_election(ballots, &settings.rules).context(TabulationSnafu {})?;
    info!("winners: {:?}", result.winners);
    Ok(result)
}

fn write_summary(out: &str, summary: &JSValue) -> RcvResult<()> {
    let pretty_js = serde_json::to_string_pretty(summary).context(WritingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty_js);
    } else {
        info!("Writing summary to {:?}", out);
        fs::write(out, pretty_js).context(WritingSummarySnafu { path: out })?;
    }
    Ok(())
}

fn check_reference(reference_path: &str, summary: &JSValue) -> RcvResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    if summary_ref != *summary {
        warn!("Found differences with the reference summary");
        let pretty_js_ref = serde_json::to_string_pretty(&summary_ref).context(WritingJsonSnafu {})?;
        let pretty_js = serde_json::to_string_pretty(summary).context(WritingJsonSnafu {})?;
        print_diff(pretty_js_ref.as_str(), pretty_js.as_str(), "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    Ok(())
}

pub fn run_cli(args: &Args) -> RcvResult<()> {
    let settings = resolve_settings(args)?;
    info!("settings: {:?}", settings);

    let result = tabulate(&settings)?;
    let summary = build_summary_js(&settings, &result);

    let summary_to_stdout = settings.out.as_deref() == Some("stdout");
    if !summary_to_stdout {
        print_report(&result);
    }
    if let Some(out) = settings.out.as_deref() {
        write_summary(out, &summary)?;
    }
    if let Some(reference_path) = settings.reference.as_deref() {
        check_reference(reference_path, &summary)?;
    }
    Ok(())
}
