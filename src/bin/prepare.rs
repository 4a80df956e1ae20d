//! Command line tool to prepare the SST-2 dataset

use std::path::PathBuf;

use burn_classifiers::datasets::sst2;
use pico_args::Arguments;

const HELP: &str = "\
Usage: prepare [OPTIONS]

Downloads the raw SST-2 corpora if they are missing, then writes cleaned
sentence and label files for each split plus the training vocabulary.

Options:
  -h, --help           Print help
  --data-path          The data directory (defaults to './data')
";

#[derive(Debug)]
struct Args {
    data_path: PathBuf,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        Self::parse_from(Arguments::from_env())
    }

    fn parse_from(mut pargs: Arguments) -> anyhow::Result<Option<Self>> {
        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            data_path: pargs
                .opt_value_from_str("--data-path")?
                .unwrap_or_else(|| PathBuf::from("./data")),
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(anyhow::anyhow!("Unexpected arguments: {:?}", remaining));
        }

        Ok(Some(args))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    sst2::prepare(&args.data_path).await?;

    println!("Preprocessing done: {}", args.data_path.display());

    Ok(())
}
