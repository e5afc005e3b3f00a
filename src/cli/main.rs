use std::io::{self, Write};
use std::path::{Path, PathBuf};
use structopt::StructOpt;
use anyhow::Context;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use scw::fit::{Scw, Hyperparameters, Update};
use scw::linalg::format_vector;
use scw::table::Table;
use scw::table::csv::load_content_from_file;

/// Train a soft confidence-weighted classifier over a labelled dataset and report its error rate.
///
/// Positional arguments are <datafile> <C> <eta> [testfile]. When --config is informed,
/// C and eta are read from it and the positional arguments are <datafile> [testfile].
/// The training data is re-used for evaluation when no testfile is informed.
///
/// Data files hold one comma-separated line of labels (-1 or 1), followed by one
/// comma-separated line per feature dimension, with one entry per example.
#[derive(StructOpt, Debug)]
#[structopt(name = "scw")]
pub struct Args {

    /// JSON file with the hyperparameters, e.g. {"c" : 1.0, "eta" : 0.9}.
    #[structopt(long, parse(from_os_str))]
    config : Option<PathBuf>,

    /// <datafile> <C> <eta> [testfile]; arguments past the testfile are ignored.
    #[structopt(name = "ARGS")]
    args : Vec<String>

}

// Training file, hyperparameters and optional evaluation file.
type Invocation = (PathBuf, Hyperparameters, Option<PathBuf>);

impl Args {

    /// Resolves the positional arguments, returning None when there are too few of them.
    fn invocation(&self) -> Result<Option<Invocation>, anyhow::Error> {
        let (hyper, rest) = match &self.config {
            Some(path) => {
                if self.args.is_empty() {
                    return Ok(None);
                }
                let content = load_content_from_file(path)
                    .with_context(|| format!("Error reading configuration {}", path.display()) )?;
                (Hyperparameters::from_json(&content)?, &self.args[1..])
            },
            None => {
                if self.args.len() < 3 {
                    return Ok(None);
                }
                let c : f64 = self.args[1].parse()
                    .with_context(|| format!("Invalid C: {}", self.args[1]) )?;
                let eta : f64 = self.args[2].parse()
                    .with_context(|| format!("Invalid eta: {}", self.args[2]) )?;
                (Hyperparameters::new(c, eta), &self.args[3..])
            }
        };
        if rest.len() > 1 {
            warn!(ignored = ?&rest[1..], "ignoring trailing arguments");
        }
        Ok(Some((PathBuf::from(&self.args[0]), hyper, rest.first().map(PathBuf::from))))
    }

}

fn open_table(path : &Path) -> Result<Table, anyhow::Error> {
    Table::open(path).with_context(|| format!("Error opening table {}", path.display()) )
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn") );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Trains over the datafile, writing one "mu = ..." line per update and the
/// final error rate to out. Writes the usage message when arguments are missing.
fn run<W>(args : &Args, out : &mut W) -> Result<(), anyhow::Error>
    where W : Write
{
    let (datafile, hyper, testfile) = match args.invocation()? {
        Some(inv) => inv,
        None => {
            Args::clap().write_help(out)?;
            writeln!(out)?;
            return Ok(());
        }
    };

    let train = open_table(&datafile)?;
    let mut scw = Scw::from_config(&hyper).context("Invalid classifier configuration")?;
    let mut written : io::Result<()> = Ok(());
    scw.train_with(&train.examples()[..], &mut |u : &Update<'_>| {
        if written.is_ok() {
            written = writeln!(out, "mu = {}", format_vector(u.mu));
        }
    }).context("Training failed")?;
    written?;

    let eval = match &testfile {
        Some(testfile) => scw.test(&open_table(testfile)?.examples()[..]),
        None => scw.test(&train.examples()[..])
    }.context("Evaluation failed")?;
    writeln!(out, "{}", eval)?;
    Ok(())
}

fn main() -> Result<(), anyhow::Error> {
    init_logging();
    let args = Args::from_args();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out)
}
