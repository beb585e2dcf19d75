/*!

This is the long-form manual for `instant_runoff` and `irvtally`.

## Counting rules

Every round, each ballot counts for its most preferred candidate that has not
been eliminated yet. A candidate is elected when it holds more than half of
**all** the ballots, including the ballots that no longer rank anybody
(exhausted ballots). If several candidates share that maximum, they are all
elected.

Otherwise the candidate with the fewest first choices is eliminated and removed
from every ballot. When several candidates share the lowest count, one of them
is selected with the tie-break mode:
 - `random` (default): uniform choice. Pass `--seed` (or `randomSeed` in the
   configuration) to make the choice reproducible.
 - `useCandidateOrder`: the first of the tied candidates in name order.

Because exhausted ballots stay in the denominator, an election may end without
a winner: once every ballot is exhausted, `irvtally` reports that no candidate
remains and exits with an error.

## Input format

The input is the response export of a form in which the candidates are the
columns and the voters pick a rank for each candidate. This is what Google
Forms produces for a **Multiple Choice Grid** question whose rows are the
candidates and whose columns are the ranks, once the responses are exported
to a spreadsheet.

```text
Timestamp,Alice,Bob,Charlie
2022/10/21 9:55:01,1,2,
2022/10/21 9:55:40,2,1,3
2022/10/21 9:56:12,,1;2,1
```

 - The first cell of the header must be `Timestamp` (see `--header-marker`).
   The other cells of the header name the candidates.
 - The first cell of every other row identifies the ballot.
 - A cell is empty, a rank label, or several rank labels separated with `;`.
   Only the best label of a cell counts.
 - The rank labels are given best first with `--ranks` (default `1,2,3`).
   For each label, the leftmost candidate marked with it takes that rank.

Both CSV files (`--input-type csv`) and Excel workbooks
(`--input-type xlsx`) are accepted. The type defaults to the extension of the
input file.

## Configuration

All the options can also be provided in a JSON file with `--config`. The
options passed on the command line take precedence.

```json
{
  "outputSettings": {
    "contestName": "Board election",
    "contestDate": "2022-10-21",
    "outputPath": "board_summary.json"
  },
  "ballotSource": {
    "provider": "csv",
    "filePath": "responses.csv",
    "headerMarker": "Timestamp",
    "rankLabels": ["1", "2", "3"]
  },
  "rules": {
    "tiebreakMode": "random",
    "randomSeed": "42"
  }
}
```

Paths are relative to the directory of the configuration file.
`excelWorksheetName` selects the worksheet of an Excel input. It is required
when the workbook has more than one worksheet.

## Output

`irvtally` prints the first-choice votes of every round, the eliminated
candidates and the winners. With `--out`, it also writes a JSON summary
(`stdout` prints it). The summary can be uploaded to visualization tools that
accept the RCVis format. With `--reference`, the summary is compared to a
previously generated summary and any difference is reported as an error.

 */
