#![forbid(unsafe_code)]
use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use log::LevelFilter;
use wordlzw::{decoder::Decoder, encoder::Encoder, Codeword, Config, WhenFull, MIN_MAX_CODE};

fn main() -> Result<()> {
    let flags = Flags::from_matches(&command().get_matches());
    init_logger(flags.verbosity);
    run_coding(flags)
}

fn run_coding(flags: Flags) -> Result<()> {
    let data = match &flags.input {
        Input::File(path) => lzw_host::file::read_source(path, flags.max_input)?,
        Input::Stdin => {
            let mut data = vec![];
            io::stdin()
                .lock()
                .read_to_end(&mut data)
                .context("Couldn't read stdin")?;
            if let Some(max_input) = flags.max_input {
                anyhow::ensure!(
                    data.len() as u64 <= max_input,
                    "Input is {} bytes long, the limit is {max_input} bytes",
                    data.len()
                );
            }
            data
        }
    };

    let output = match flags.operation {
        Operation::Compress => {
            let (stream, summary) = Encoder::new(flags.config)
                .encode_with_summary(&data)
                .context("Compression failed")?;
            log::info!(
                "{} bytes in, {} bytes out, {} dictionary entries{}",
                data.len(),
                stream.byte_len(),
                summary.entries,
                if summary.frozen { ", dictionary frozen" } else { "" }
            );
            stream
                .to_bytes()
                .context("Couldn't serialize the compressed stream")?
        }
        Operation::Decompress => {
            let decoded = Decoder::new(flags.config)
                .decode_bytes(&data)
                .context("Decompression failed")?;
            log::info!("{} bytes in, {} bytes out", data.len(), decoded.len());
            decoded
        }
    };

    match &flags.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Couldn't write {}", path.display()))
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(&output).context("Couldn't write stdout")?;
            out.flush().context("Couldn't write stdout")
        }
    }
}

fn init_logger(verbosity: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbosity {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

struct Flags {
    input: Input,
    output: Option<PathBuf>,
    operation: Operation,
    config: Config,
    max_input: Option<u64>,
    verbosity: u8,
}

#[derive(Debug)]
enum Input {
    File(PathBuf),
    Stdin,
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Compress,
    Decompress,
}

fn command() -> Command {
    Command::new("lzw")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compress and decompress data into 16 bit LZW codewords")
        .arg(
            Arg::new("compress")
                .short('c')
                .long("compress")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("decompress")
                .short('d')
                .long("decompress")
                .action(ArgAction::SetTrue),
        )
        .group(
            ArgGroup::new("operation")
                .args(["compress", "decompress"])
                .multiple(false)
                .required(true),
        )
        .arg(
            Arg::new("max_code")
                .long("max-code")
                .help("Highest codeword of the dictionary, same value for both directions")
                .value_parser(value_parser!(u16).range(MIN_MAX_CODE as i64..)),
        )
        .arg(
            Arg::new("fail_when_full")
                .long("fail-when-full")
                .help("Fail instead of freezing the dictionary once it is full")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max_input")
                .long("max-input")
                .help("Refuse inputs longer than this many bytes")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file, stdout by default")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("file")
                .help("Input file, or '-' for stdin")
                .default_value("-")
                .value_parser(value_parser!(PathBuf)),
        )
}

impl Flags {
    fn from_matches(matches: &ArgMatches) -> Self {
        let operation = if matches.get_flag("decompress") {
            Operation::Decompress
        } else {
            Operation::Compress
        };

        let mut config = Config::default();
        if let Some(&max_code) = matches.get_one::<Codeword>("max_code") {
            config = config.max_code(max_code);
        }
        if matches.get_flag("fail_when_full") {
            config = config.when_full(WhenFull::Fail);
        }

        let input = match matches.get_one::<PathBuf>("file") {
            Some(p) if *p != PathBuf::from("-") => Input::File(p.clone()),
            _ => Input::Stdin,
        };

        Flags {
            input,
            output: matches.get_one::<PathBuf>("output").cloned(),
            operation,
            config,
            max_input: matches.get_one::<u64>("max_input").copied(),
            verbosity: matches.get_count("verbose"),
        }
    }
}
