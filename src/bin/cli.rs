use fenlens::config::DecoderConfig;
use fenlens::logger::init_logging;
use fenlens::synth::{capture_order, seeded_reading};
use fenlens::{ClassProbs, Corner, DecodeStatus, Decoder, Placement};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use tracing::{info, warn};

const USAGE: &str = "\
usage:
  fenlens decode <frames.json> [--a1 BL|BR|TL|TR] [--previous <fen>]
                 [--config <config.json>] [--log <path>] [--filter <directives>]
  fenlens synth <fen> [--noise <0..1>] [--seed <u64>] [--a1 BL|BR|TL|TR]";

type CliResult<T> = Result<T, Box<dyn Error>>;

/// A sequence of classifier outputs from one camera.
#[derive(Debug, Serialize, Deserialize)]
struct FramesFile {
    #[serde(default)]
    a1_pos: Corner,
    #[serde(default)]
    previous_fen: Option<String>,
    /// Each frame: 64 vectors in capture order.
    frames: Vec<Vec<ClassProbs>>,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("decode") => handle_decode(&args[1..]),
        Some("synth") => handle_synth(&args[1..]),
        Some("-h" | "--help" | "help") => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Splits `args` into positionals and `--flag value` pairs.
fn parse_args<'a>(args: &'a [String], flags: &[&str]) -> CliResult<(Vec<&'a str>, Vec<(&'a str, &'a str)>)> {
    let mut positional = Vec::new();
    let mut options = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg.starts_with("--") {
            if !flags.contains(&arg) {
                return Err(format!("unknown option `{}`\n{}", arg, USAGE).into());
            }
            let value = args
                .get(i + 1)
                .ok_or_else(|| format!("option `{}` needs a value", arg))?;
            options.push((arg, value.as_str()));
            i += 2;
        } else {
            positional.push(arg);
            i += 1;
        }
    }
    Ok((positional, options))
}

fn handle_decode(args: &[String]) -> CliResult<()> {
    let (positional, options) =
        parse_args(args, &["--a1", "--previous", "--config", "--log", "--filter"])?;
    let [path] = positional[..] else {
        return Err(format!("decode takes exactly one frames file\n{}", USAGE).into());
    };

    let mut a1 = None;
    let mut previous = None;
    let mut config = DecoderConfig::default();
    let mut log = None;
    let mut filter = "fenlens=info";
    for (flag, value) in options {
        match flag {
            "--a1" => a1 = Some(value.parse::<Corner>()?),
            "--previous" => previous = Some(value.to_string()),
            "--config" => config = serde_json::from_reader(BufReader::new(File::open(value)?))?,
            "--log" => log = Some(value),
            "--filter" => filter = value,
            _ => {}
        }
    }
    if let Some(log) = log {
        init_logging(log, filter)?;
    }

    let file: FramesFile = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    let a1 = a1.unwrap_or(file.a1_pos);
    let mut previous = previous.or(file.previous_fen);
    let decoder = Decoder::new(config);
    info!(frames = file.frames.len(), %a1, "decoding");

    let pb = ProgressBar::new(file.frames.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames {msg}")?
            .progress_chars("##-"),
    );

    for (i, frame) in file.frames.iter().enumerate() {
        let decoded = decoder.decode(frame, a1, previous.as_deref())?;
        let fen = decoded.fen();
        let marker = match decoded.status {
            DecodeStatus::Complete => "",
            DecodeStatus::FallbackUsed => {
                warn!(frame = i, "fallback used");
                " !"
            }
        };
        match decoded.detected_move() {
            Some(mv) => info!(frame = i, %fen, %mv, "decoded"),
            None => info!(frame = i, %fen, "decoded"),
        }
        pb.suspend(|| println!("{}{}", fen, marker));
        previous = Some(fen);
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(())
}

fn handle_synth(args: &[String]) -> CliResult<()> {
    let (positional, options) = parse_args(args, &["--noise", "--seed", "--a1"])?;
    if positional.is_empty() {
        return Err(format!("synth takes a FEN\n{}", USAGE).into());
    }
    // Let unquoted full FENs through; only the board field matters.
    let fen = positional.join(" ");
    let placement: Placement = fen.parse()?;

    let mut noise = 0.2f32;
    let mut seed = None;
    let mut a1 = Corner::default();
    for (flag, value) in options {
        match flag {
            "--noise" => noise = value.parse()?,
            "--seed" => seed = Some(value.parse::<u64>()?),
            "--a1" => a1 = value.parse()?,
            _ => {}
        }
    }
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("seed {}", seed);

    let reading = seeded_reading(&placement, noise, seed);
    let file = FramesFile {
        a1_pos: a1,
        previous_fen: None,
        frames: vec![capture_order(&reading, a1).to_vec()],
    };
    println!("{}", serde_json::to_string(&file)?);
    Ok(())
}
