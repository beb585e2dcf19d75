use crate::rcv::*;

pub const DEFAULT_HEADER_MARKER: &str = "Timestamp";
pub const DEFAULT_RANK_LABELS: [&str; 3] = ["1", "2", "3"];

/// Returns the position of the best rank label found in a cell.
///
/// A cell may contain several labels separated by `;` (some forms allow
/// checking more than one box). Only the best one is kept.
pub fn best_rank(cell: &str, rank_labels: &[String]) -> Option<usize> {
    cell.split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| rank_labels.iter().position(|l| l == s))
        .min()
}

fn make_default_id_lineno(lineno: usize) -> String {
    format!("line-{:08}", lineno)
}

// Exports from some spreadsheets start with a byte order mark.
fn clean_header_cell(cell: &str) -> &str {
    cell.trim_start_matches('\u{feff}').trim()
}

fn check_header(header: &[String], marker: &str) -> RcvResult<Vec<String>> {
    let first = header.first().map(|s| clean_header_cell(s));
    ensure!(
        first == Some(marker),
        MissingHeaderMarkerSnafu { marker }
    );
    let candidates: Vec<String> = header
        .iter()
        .skip(1)
        .map(|s| s.trim().to_string())
        .collect();
    debug!("check_header: candidates: {:?}", candidates);
    Ok(candidates)
}

fn record_to_ranking(
    lineno: usize,
    candidates: &[String],
    cells: &[String],
    rank_labels: &[String],
) -> Vec<String> {
    // For each candidate column, the best rank it received (if any).
    let ranks: Vec<Option<usize>> = candidates
        .iter()
        .enumerate()
        .map(|(idx, _)| {
            cells
                .get(idx)
                .and_then(|cell| best_rank(cell, rank_labels))
        })
        .collect();

    let mut ranking: Vec<String> = Vec::new();
    for (rank_idx, label) in rank_labels.iter().enumerate() {
        let mut columns = candidates
            .iter()
            .zip(ranks.iter())
            .filter(|(_, r)| **r == Some(rank_idx))
            .map(|(c, _)| c);
        if let Some(cand) = columns.next() {
            ranking.push(cand.clone());
        }
        for dropped in columns {
            warn!(
                "line {}: rank {:?} given to several candidates, ignoring it for {:?}",
                lineno, label, dropped
            );
        }
    }
    ranking
}

/// Converts the records of a form export into ballots.
///
/// The first record is the header: a marker field followed by the names of
/// the candidates. Each other record is an id field followed by one cell per
/// candidate.
pub fn records_to_ballots(
    records: &[Vec<String>],
    header_marker: &str,
    rank_labels: &[String],
) -> RcvResult<Vec<Ballot>> {
    ensure!(!rank_labels.is_empty(), MissingRankLabelsSnafu {});
    let (header, rows) = records.split_first().context(MissingHeaderSnafu {})?;
    let candidates = check_header(header, header_marker)?;

    let mut res: Vec<Ballot> = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let id = match row.first().map(|s| s.trim()) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => make_default_id_lineno(lineno),
        };
        let cells: &[String] = row.get(1..).unwrap_or(&[]);
        let ranking = record_to_ranking(lineno, &candidates, cells, rank_labels);
        debug!("records_to_ballots: {}: {:?}", id, ranking);
        res.push(Ballot::new(id, &ranking));
    }
    Ok(res)
}
