//! Command line tool to build a classifier head and run it over random hidden states

use anyhow::anyhow;
use burn::{
    backend::{ndarray::NdArrayDevice, NdArray},
    tensor::backend::Backend,
};
use burn_nlp_heads::{
    cli::{self, Head, HeadConfig, RunOptions, Sizes},
    utils::{files::read_labels, Labels},
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: infer HEAD [OPTIONS]

Arguments:
  HEAD                 The head to use ('token-classification', 'sequence-classification',
                       or 'joint-intent-slot')

Options:
  -h, --help           Print help
  -c, --config         A JSON config file for the head (defaults are built from the sizes below)
  --hidden-size        Size of the hidden states (defaults to 768)
  --num-classes        Number of classes for the token and sequence heads (defaults to 2)
  --num-intents        Number of intents for the joint head (defaults to 7)
  --num-slots          Number of slot labels for the joint head (defaults to 72)
  -b, --batch-size     Number of random sequences (defaults to 2)
  -t, --seq-len        Number of positions per sequence (defaults to 8)
  -i, --index          Time step read by the sequence head (defaults to 0, or the config's value)
  -s, --seed           Seed for the random hidden states and weights
  --labels             A file with one class label per line
  --intent-labels      A file with one intent label per line
  --slot-labels        A file with one slot label per line
  --save-config        Write the resolved config to the given path
  --ports              Only print the port schemas
";

#[derive(Debug)]
struct Args {
    head: String,
    config: Option<String>,
    hidden_size: Option<usize>,
    num_classes: Option<usize>,
    num_intents: Option<usize>,
    num_slots: Option<usize>,
    batch_size: Option<usize>,
    seq_len: Option<usize>,
    index: Option<usize>,
    seed: Option<u64>,
    labels: Option<String>,
    intent_labels: Option<String>,
    slot_labels: Option<String>,
    save_config: Option<String>,
    ports_only: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            hidden_size: pargs.opt_value_from_str("--hidden-size")?,
            num_classes: pargs.opt_value_from_str("--num-classes")?,
            num_intents: pargs.opt_value_from_str("--num-intents")?,
            num_slots: pargs.opt_value_from_str("--num-slots")?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            seq_len: pargs.opt_value_from_str(["-t", "--seq-len"])?,
            index: pargs.opt_value_from_str(["-i", "--index"])?,
            seed: pargs.opt_value_from_str(["-s", "--seed"])?,
            labels: pargs.opt_value_from_str("--labels")?,
            intent_labels: pargs.opt_value_from_str("--intent-labels")?,
            slot_labels: pargs.opt_value_from_str("--slot-labels")?,
            save_config: pargs.opt_value_from_str("--save-config")?,
            ports_only: pargs.contains("--ports"),
            head: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: HEAD"),
                _ => anyhow!("{}", e),
            })?,
        };

        Ok(Some(args))
    }

    fn sizes(&self) -> Sizes {
        let defaults = Sizes::default();

        Sizes {
            hidden_size: self.hidden_size.unwrap_or(defaults.hidden_size),
            num_classes: self.num_classes.unwrap_or(defaults.num_classes),
            num_intents: self.num_intents.unwrap_or(defaults.num_intents),
            num_slots: self.num_slots.unwrap_or(defaults.num_slots),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let head = Head::try_from(args.head.as_str())?;

    let mut config = match &args.config {
        Some(path) => HeadConfig::load(head, path)?,
        None => HeadConfig::new(head, args.sizes()),
    };
    config.validate()?;

    if let (Some(index), HeadConfig::SequenceClassification(sequence)) = (args.index, &mut config) {
        sequence.idx_conditioned_on = index;
    }

    log::info!("Using the {} head", config.head());

    if let Some(path) = &args.save_config {
        config.save(path)?;
        log::info!("Saved config to {}", path);
    }

    if let Some(seed) = args.seed {
        NdArray::<f32>::seed(seed);
    }

    let device = NdArrayDevice::Cpu;

    if args.ports_only {
        let (input_ports, output_ports) = cli::ports::<NdArray>(&config, &device)?;
        println!("=== Input Ports ===\n{input_ports}\n=== Output Ports ===\n{output_ports}");

        return Ok(());
    }

    let defaults = RunOptions::default();
    let options = RunOptions {
        batch_size: args.batch_size.unwrap_or(defaults.batch_size),
        seq_len: args.seq_len.unwrap_or(defaults.seq_len),
        idx_conditioned_on: config
            .idx_conditioned_on()
            .unwrap_or(defaults.idx_conditioned_on),
        labels: load_labels(&args.labels).await?,
        intent_labels: load_labels(&args.intent_labels).await?,
        slot_labels: load_labels(&args.slot_labels).await?,
    };

    let report = cli::run::<NdArray>(&config, &options, &device)?;

    print!("{}", report);

    Ok(())
}

async fn load_labels(path: &Option<String>) -> anyhow::Result<Labels> {
    match path {
        Some(path) => read_labels(path)
            .await
            .map_err(|e| anyhow!("Unable to read label file {}: {}", path, e)),
        None => Ok(Labels::default()),
    }
}
