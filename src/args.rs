use clap::Parser;

/// This is an instant-runoff tabulation program for form exports.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the election description in JSON format.
    /// The options passed on the command line override the options of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the outcome of an election in JSON format. If provided, irvtally will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The file containing the responses. Setting this option overrides the file that may be specified
    /// with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. By default, it is deduced from the extension of the input file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (list of comma-separated values, default 1,2,3) The labels of the ranks, from the most preferred to the least
    /// preferred. A cell of the input is matched against these labels.
    #[clap(long, value_parser, value_delimiter = ',')]
    pub ranks: Option<Vec<String>>,

    /// (default Timestamp) The expected content of the first cell of the header.
    #[clap(long, value_parser)]
    pub header_marker: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (random or useCandidateOrder, default random) How to select the candidate to eliminate when several
    /// candidates have the fewest votes.
    #[clap(long, value_parser)]
    pub tiebreak: Option<String>,

    /// (integer) Seed for the random tie-break. Runs with the same seed and the same input give the same outcome.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
