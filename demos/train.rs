use std::{fs::File, path::PathBuf, process::ExitCode};

use clap::Parser;
use hmmtag::{Dataset, Trainer};

/// Estimate an HMM tagger from labeled data sets (one `TAG<TAB>word` pair per
/// line, blank line between sequences) and store it as JSON
#[derive(Debug, Parser)]
#[command(version)]
#[command(propagate_version = true)]
struct Argv {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// store the model to a file (MODEL)
    #[arg(short, long, value_name = "MODEL")]
    model: PathBuf,
    /// set a training parameter (NAME=VALUE), e.g. smoothing=0
    #[arg(short)]
    parameters: Vec<String>,
    #[arg(required = true)]
    datasets: Vec<PathBuf>,
}

fn run(argv: &Argv) -> hmmtag::Result<()> {
    let mut trainer = Trainer::default();
    for s in &argv.parameters {
        match s.split_once('=') {
            Some((name, value)) => trainer.set(name, value)?,
            None => log::warn!("ignoring parameter without value: {s}"),
        }
    }
    let mut seqs = Vec::new();
    for fpath in &argv.datasets {
        log::info!("reading dataset from: {:?}", fpath);
        let ds = Dataset::try_from(File::open(fpath)?)?;
        seqs.extend(ds.seqs);
    }
    let model = trainer.train(&seqs);
    if argv.verbose > 0 {
        model.dump(std::io::stderr().lock())?;
    }
    model.save(&argv.model)?;
    log::info!("write model to {:?}", argv.model);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let argv = Argv::parse();
    log::info!("argv: {:?}", argv);
    match run(&argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
