//! Command-line argument parsing for the beatleap host.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};

use crate::constants::DEFAULT_METRONOME_SECONDS;

/// Where beats come from.
#[derive(Clone, Debug, PartialEq)]
pub enum BeatInput {
    /// Analysed beat file (`{ "beats": [[t, strength], ...], "duration": s }`)
    File(PathBuf),
    /// Synthetic evenly spaced pulse of the given length in seconds
    Metronome { seconds: f64 },
}

/// Parsed command-line arguments.
#[derive(Debug, PartialEq)]
pub struct CliArgs {
    pub beats: BeatInput,
    /// Optional TOML engine config
    pub config_path: Option<PathBuf>,
    /// Overrides applied on top of the config file
    pub seed: Option<u64>,
    pub sensitivity: Option<f32>,
    /// JSONL frame export path
    pub out: Option<PathBuf>,
    /// Follow the wall clock and read commands from stdin
    pub realtime: bool,
    pub show_help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            beats: BeatInput::Metronome {
                seconds: DEFAULT_METRONOME_SECONDS,
            },
            config_path: None,
            seed: None,
            sensitivity: None,
            out: None,
            realtime: false,
            show_help: false,
        }
    }
}

impl CliArgs {
    /// Parse arguments from the process command line.
    pub fn parse() -> anyhow::Result<Self> {
        Self::parse_from(env::args().skip(1))
    }

    pub fn parse_from<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => parsed.show_help = true,
                "--realtime" => parsed.realtime = true,
                "--config" => parsed.config_path = Some(PathBuf::from(value(&mut iter, &arg)?)),
                "--out" => parsed.out = Some(PathBuf::from(value(&mut iter, &arg)?)),
                "--seed" => {
                    let v = value(&mut iter, &arg)?;
                    parsed.seed = Some(v.parse().with_context(|| format!("invalid seed {v:?}"))?);
                }
                "--sensitivity" => {
                    let v = value(&mut iter, &arg)?;
                    parsed.sensitivity = Some(
                        v.parse()
                            .with_context(|| format!("invalid sensitivity {v:?}"))?,
                    );
                }
                "--metronome" => {
                    let v = value(&mut iter, &arg)?;
                    let seconds: f64 = v
                        .parse()
                        .with_context(|| format!("invalid metronome length {v:?}"))?;
                    if !(seconds > 0.0 && seconds.is_finite()) {
                        bail!("metronome length must be positive, got {seconds}");
                    }
                    parsed.beats = BeatInput::Metronome { seconds };
                }
                other if other.starts_with('-') => bail!("unknown option {other}"),
                path => parsed.beats = BeatInput::File(PathBuf::from(path)),
            }
        }
        Ok(parsed)
    }
}

fn value(iter: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<String> {
    iter.next().ok_or_else(|| anyhow!("{flag} needs a value"))
}

pub fn help_text() -> &'static str {
    "beatleap - beat-synchronised leaping ball animation

USAGE:
    beatleap [OPTIONS] [BEATS.json]

Without a beat file a synthetic pulse is used.

OPTIONS:
    --metronome <SECONDS>    Synthetic pulse of the given length
    --config <PATH>          Engine config (TOML)
    --seed <N>               Track layout seed
    --sensitivity <X>        Jump speed multiplier
    --out <PATH>             Write one JSON snapshot per tick (JSONL)
    --realtime               Follow the wall clock; read commands from stdin
    -h, --help               Show this help

REALTIME COMMANDS (stdin, one per line):
    <Enter> | p              Toggle play/pause
    + | -                    Seek forward/back
    seek <SEC>               Seek to position
    sens <X>                 Change sensitivity live
    q                        Quit"
}
