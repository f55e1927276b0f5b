use std::{fs::File, path::PathBuf, process::ExitCode};

use clap::Parser;
use hmmtag::{Dataset, Evaluation, Model, Tagger};

/// Assign suitable tags to the sequences in the data sets given by files (FILE)
/// Evaluate the performance of the model on labeled sequences (with -t option)
#[derive(Debug, Parser)]
struct Argv {
    /// read a model from a file (MODEL)
    #[arg(short, long, required = true, value_name = "MODEL")]
    model: PathBuf,
    /// report the performance of the model on the data
    #[arg(short = 't', long = "test")]
    evaluate: bool,
    /// output the reference tags in the input data
    #[arg(short, long)]
    reference: bool,
    /// output the log probability of the tag sequences
    #[arg(short, long)]
    probability: bool,
    /// suppress tagging results (useful for test mode)
    #[arg(short, long)]
    quiet: bool,
    /// probability used for unseen words and transitions
    #[arg(short, long)]
    epsilon: Option<f64>,
    /// tag a single whitespace-separated sentence instead of data sets
    #[arg(short, long, value_name = "SENTENCE")]
    sentence: Option<String>,
    /// assign suitable tags to the sequences in the data sets given by files
    #[arg(value_name = "FILE")]
    datasets: Vec<PathBuf>,
}

fn output(argv: &Argv, items: &[String], reference: &[String], prediction: &[String], log_prob: f64) {
    if argv.quiet {
        return;
    }
    if argv.probability {
        println!("@probability\t{log_prob:.6}");
    }
    for (t, (item, pred)) in items.iter().zip(prediction).enumerate() {
        match reference.get(t) {
            Some(label) if argv.reference => println!("{item}\t{label}\t{pred}"),
            _ => println!("{item}\t{pred}"),
        }
    }
    println!();
}

fn run(argv: &Argv) -> hmmtag::Result<()> {
    let model = Model::from_file(&argv.model)?;
    let mut tagger: Tagger = model.tagger();
    if let Some(epsilon) = argv.epsilon {
        tagger = tagger.with_epsilon(epsilon)?;
    }

    if let Some(sentence) = &argv.sentence {
        let items: Vec<String> = sentence.split_whitespace().map(str::to_string).collect();
        let (prediction, log_prob) = tagger.viterbi(&items)?;
        output(argv, &items, &[], &prediction, log_prob);
        return Ok(());
    }

    let mut evaluation = Evaluation::default();
    for fpath in &argv.datasets {
        let ds = Dataset::try_from(File::open(fpath)?)?;
        for seq in &ds.seqs {
            let (prediction, log_prob) = tagger.viterbi(seq.items())?;
            if argv.evaluate {
                evaluation.accumulate(seq.labels(), &prediction);
            }
            output(argv, seq.items(), seq.labels(), &prediction, log_prob);
        }
    }
    if argv.evaluate {
        evaluation.evaluate();
        println!("{}", evaluation);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let argv = Argv::parse();
    log::info!("{:?}", argv);
    match run(&argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
