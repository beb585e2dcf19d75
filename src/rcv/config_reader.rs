use crate::rcv::io_common::{DEFAULT_HEADER_MARKER, DEFAULT_RANK_LABELS};
use crate::rcv::*;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: Option<String>,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
    #[serde(rename = "contestOffice")]
    pub contest_office: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

/// The `config` block of the JSON summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    pub threshold: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BallotSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "headerMarker")]
    pub header_marker: Option<String>,
    #[serde(rename = "rankLabels")]
    pub rank_labels: Option<Vec<String>>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RcvRules {
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: Option<String>,
    /// A number or a string containing a number.
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<JSValue>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RcvConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "ballotSource")]
    pub ballot_source: Option<BallotSource>,
    pub rules: Option<RcvRules>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputProvider {
    Csv,
    Xlsx,
}

/// Everything needed to run an election, once the configuration file and the
/// command line have been merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionSettings {
    pub contest_name: String,
    pub contest_date: Option<String>,
    pub contest_jurisdiction: Option<String>,
    pub contest_office: Option<String>,
    pub input_path: String,
    pub provider: InputProvider,
    pub header_marker: String,
    pub rank_labels: Vec<String>,
    pub excel_worksheet_name: Option<String>,
    pub rules: VoteRules,
    pub out: Option<String>,
    pub reference: Option<String>,
}

pub fn read_config(path: &str) -> RcvResult<RcvConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: RcvConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> RcvResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

pub fn parse_provider(name: &str) -> RcvResult<InputProvider> {
    match name {
        "csv" => Ok(InputProvider::Csv),
        "xlsx" | "excel" => Ok(InputProvider::Xlsx),
        x => whatever!("Input type {:?} is not supported (supported: csv, xlsx)", x),
    }
}

/// Excel workbooks are recognized by their extension, anything else is read as CSV.
pub fn infer_provider(path: &str) -> InputProvider {
    let ext = Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());
    match ext.as_deref() {
        Some("xlsx") | Some("xlsm") => InputProvider::Xlsx,
        _ => InputProvider::Csv,
    }
}

pub fn validate_rules(tiebreak_mode: Option<&str>, seed: Option<u64>) -> RcvResult<VoteRules> {
    let mode = match tiebreak_mode.unwrap_or("random") {
        "random" => match seed {
            Some(s) => TieBreakMode::Seeded(s),
            None => TieBreakMode::Random,
        },
        "useCandidateOrder" => TieBreakMode::UseCandidateOrder,
        x => {
            whatever!(
                "Cannot use tiebreak mode {:?} (supported: random, useCandidateOrder)",
                x
            )
        }
    };
    Ok(VoteRules {
        tiebreak_mode: mode,
    })
}

fn read_js_u64(x: &JSValue) -> RcvResult<u64> {
    match x {
        JSValue::Number(n) => n.as_u64().context(ParsingJsonNumberSnafu {}),
        JSValue::String(s) => s.trim().parse::<u64>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}

// Paths in the configuration file are relative to the directory of that file.
fn resolve_path(root: Option<&Path>, path: &str) -> String {
    match root {
        Some(r) if Path::new(path).is_relative() => {
            let p: PathBuf = r.join(path);
            p.display().to_string()
        }
        _ => path.to_string(),
    }
}

/// Merges the configuration file (if any) with the command line arguments.
/// The command line takes precedence.
pub fn resolve_settings(args: &Args) -> RcvResult<ElectionSettings> {
    let config: Option<RcvConfig> = match args.config.as_deref() {
        Some(p) => Some(read_config(p)?),
        None => None,
    };
    let root: Option<&Path> = args.config.as_deref().and_then(|p| Path::new(p).parent());

    let source: Option<BallotSource> = config.as_ref().and_then(|c| c.ballot_source.clone());
    let output: Option<OutputSettings> = config.as_ref().and_then(|c| c.output_settings.clone());
    let rules: Option<RcvRules> = config.as_ref().and_then(|c| c.rules.clone());

    let input_path: String = match (args.input.clone(), source.as_ref()) {
        (Some(p), _) => p,
        (None, Some(s)) => resolve_path(root, &s.file_path),
        (None, None) => return MissingInputSnafu {}.fail(),
    };

    let provider_name: Option<String> = args
        .input_type
        .clone()
        .or_else(|| source.as_ref().and_then(|s| s.provider.clone()));
    let provider = match provider_name {
        Some(name) => parse_provider(&name)?,
        None => infer_provider(&input_path),
    };

    let header_marker = args
        .header_marker
        .clone()
        .or_else(|| source.as_ref().and_then(|s| s.header_marker.clone()))
        .unwrap_or_else(|| DEFAULT_HEADER_MARKER.to_string());

    let rank_labels: Vec<String> = args
        .ranks
        .clone()
        .or_else(|| source.as_ref().and_then(|s| s.rank_labels.clone()))
        .unwrap_or_else(|| DEFAULT_RANK_LABELS.iter().map(|s| s.to_string()).collect());

    let excel_worksheet_name = args
        .excel_worksheet_name
        .clone()
        .or_else(|| source.as_ref().and_then(|s| s.excel_worksheet_name.clone()));

    let config_seed: Option<u64> = match rules.as_ref().and_then(|r| r.random_seed.as_ref()) {
        Some(js) => Some(read_js_u64(js)?),
        None => None,
    };
    let tiebreak_mode: Option<String> = args
        .tiebreak
        .clone()
        .or_else(|| rules.as_ref().and_then(|r| r.tiebreak_mode.clone()));
    let vote_rules = validate_rules(tiebreak_mode.as_deref(), args.seed.or(config_seed))?;

    let out: Option<String> = match (args.out.clone(), output.as_ref()) {
        (Some(o), _) => Some(o),
        (None, Some(os)) => os.output_path.as_deref().map(|o| {
            if o == "stdout" {
                o.to_string()
            } else {
                resolve_path(root, o)
            }
        }),
        (None, None) => None,
    };

    let contest_name = output
        .as_ref()
        .and_then(|os| os.contest_name.clone())
        .unwrap_or_else(|| {
            Path::new(&input_path)
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default()
        });

    Ok(ElectionSettings {
        contest_name,
        contest_date: output.as_ref().and_then(|os| os.contest_date.clone()),
        contest_jurisdiction: output.as_ref().and_then(|os| os.contest_jurisdiction.clone()),
        contest_office: output.as_ref().and_then(|os| os.contest_office.clone()),
        input_path,
        provider,
        header_marker,
        rank_labels,
        excel_worksheet_name,
        rules: vote_rules,
        out,
        reference: args.reference.clone(),
    })
}
