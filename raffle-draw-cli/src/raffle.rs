// Copyright (c) 2022, Mangekyou Network, Inc.
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, ValueEnum};
use raffle_draw::{
    draw_receipt, verify, DrawRequest, ExclusionSet, HashScheme, PoolRange, Preset, RaffleConfig,
    RaffleError, Seed, WinnerList, PRESETS,
};
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "raffle-cli")]
#[command(about = "Deterministic raffle draws from a publicly verifiable seed.", long_about = None)]
enum Command {
    /// Draw the winners of a raffle.
    Draw(DrawArguments),

    /// Check announced winners against a replay of the draw.
    Verify(VerifyArguments),

    /// Show the digest and the generator seed derived from a seed string.
    Seed(SeedArguments),

    /// List the compiled-in raffles.
    Presets,
}

/// Where the raffle comes from: a preset, a config file, or explicit flags.
#[derive(Parser, Clone, Debug, Default)]
struct RaffleArguments {
    /// Name of a compiled-in raffle, see `presets`.
    #[clap(short, long, conflicts_with_all = ["config", "min", "max", "count", "exclude"])]
    preset: Option<String>,

    /// Path to a JSON raffle description.
    #[clap(short, long, conflicts_with_all = ["min", "max", "count", "exclude"])]
    config: Option<PathBuf>,

    /// The seed string read from the seed generator. Overrides the preset or config seed.
    #[clap(short, long)]
    seed: Option<String>,

    /// Lowest id in the pool.
    #[clap(long)]
    min: Option<u32>,

    /// Highest id in the pool.
    #[clap(long)]
    max: Option<u32>,

    /// Number of winners to draw.
    #[clap(short = 'n', long)]
    count: Option<usize>,

    /// Ids that may never win, e.g. "0,678-679,742".
    #[clap(short = 'x', long)]
    exclude: Option<ExclusionSet>,

    /// Hash applied to the seed: md5, sha256, sha3-256 or blake2b-256.
    #[clap(long)]
    hash: Option<HashScheme>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    /// Comma separated winners.
    #[default]
    Csv,
    /// The winners along with the seed they were drawn from.
    Json,
}

#[derive(Parser, Clone, Debug)]
struct DrawArguments {
    #[clap(flatten)]
    raffle: RaffleArguments,

    /// Output format.
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

#[derive(Parser, Clone, Debug)]
struct VerifyArguments {
    #[clap(flatten)]
    raffle: RaffleArguments,

    /// The announced winners in draw order, comma separated.
    #[clap(short, long)]
    winners: WinnerList,
}

#[derive(Parser, Clone, Debug)]
struct SeedArguments {
    /// The seed string.
    #[clap(short, long)]
    seed: String,

    /// Hash applied to the seed.
    #[clap(long, default_value_t = HashScheme::Md5)]
    hash: HashScheme,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match execute(Command::parse()) {
        Ok(res) => {
            println!("{}", res);
            std::process::exit(exitcode::OK);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exitcode::DATAERR);
        }
    }
}

fn invalid_input(e: RaffleError) -> Error {
    Error::new(ErrorKind::InvalidInput, e)
}

fn missing(flag: &str) -> Error {
    Error::new(
        ErrorKind::InvalidInput,
        format!("--{} is required without --preset or --config.", flag),
    )
}

impl RaffleArguments {
    fn into_request(self) -> Result<DrawRequest, Error> {
        let mut request = if let Some(name) = &self.preset {
            Preset::find(name)
                .and_then(|preset| preset.request())
                .map_err(invalid_input)?
        } else if let Some(path) = &self.config {
            let json = fs::read_to_string(path).map_err(|e| {
                Error::new(e.kind(), format!("Cannot read {}: {}", path.display(), e))
            })?;
            RaffleConfig::from_json(&json)
                .map_err(invalid_input)?
                .into_request()
        } else {
            let seed = self.seed.clone().ok_or_else(|| missing("seed"))?;
            let max = self.max.ok_or_else(|| missing("max"))?;
            let count = self.count.ok_or_else(|| missing("count"))?;
            let pool = PoolRange::new(self.min.unwrap_or(0), max).map_err(invalid_input)?;
            DrawRequest::new(seed, pool, count).with_exclusions(self.exclude.unwrap_or_default())
        };

        if let Some(seed) = self.seed {
            request.seed = Seed::new(seed);
        }
        if let Some(hash) = self.hash {
            request.hash = hash;
        }
        debug!(
            seed = %request.seed,
            pool = %request.pool,
            winners = request.target_count,
            excluded = request.exclusions.len(),
            hash = %request.hash,
            "resolved raffle"
        );
        Ok(request)
    }
}

fn execute(cmd: Command) -> Result<String, Error> {
    match cmd {
        Command::Draw(arguments) => {
            let request = arguments.raffle.into_request()?;
            let receipt = draw_receipt(&request).map_err(invalid_input)?;
            match arguments.format {
                OutputFormat::Csv => Ok(receipt.winners.to_string()),
                OutputFormat::Json => serde_json::to_string(&receipt)
                    .map_err(|e| Error::new(ErrorKind::Other, e)),
            }
        }

        Command::Verify(arguments) => {
            let request = arguments.raffle.into_request()?;
            verify(&request, &arguments.winners).map_err(invalid_input)?;
            Ok("Winners verified correctly!".to_string())
        }

        Command::Seed(arguments) => {
            let seed = Seed::new(arguments.seed);
            let digest = arguments.hash.digest(seed.as_bytes());
            let derived = seed.derive(arguments.hash).map_err(invalid_input)?;

            let mut result = "Digest: ".to_string();
            result.push_str(&hex::encode(digest));
            result.push_str("\nDerived seed: ");
            result.push_str(&derived.to_string());
            Ok(result)
        }

        Command::Presets => Ok(PRESETS
            .iter()
            .map(|preset| format!("{:<14}{}", preset.name, preset.description))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

#[cfg(test)]
mod tests {

    use crate::{
        execute, Command, DrawArguments, OutputFormat, RaffleArguments, SeedArguments,
        VerifyArguments,
    };
    use raffle_draw::HashScheme;
    use raffle_draw_cli::raffle_cli_test_vectors::TEST_VECTORS;
    use regex::Regex;
    use std::io::ErrorKind;

    fn explicit(seed: &str, min: u32, max: u32, count: usize) -> RaffleArguments {
        RaffleArguments {
            seed: Some(seed.to_string()),
            min: Some(min),
            max: Some(max),
            count: Some(count),
            ..Default::default()
        }
    }

    fn csv(raffle: RaffleArguments) -> Result<String, std::io::Error> {
        execute(Command::Draw(DrawArguments {
            raffle,
            format: OutputFormat::Csv,
        }))
    }

    #[test]
    fn test_draw_vectors() {
        for vector in TEST_VECTORS {
            let mut raffle = explicit(vector.seed, vector.min, vector.max, vector.count);
            raffle.hash = Some(vector.hash.parse().unwrap());
            raffle.exclude = Some(vector.exclude.parse().unwrap());
            assert_eq!(csv(raffle).unwrap(), vector.winners, "{}", vector.name);
        }
    }

    #[test]
    fn test_draw_preset() {
        let result = csv(RaffleArguments {
            preset: Some("cbox-shuffle".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(result, "1,6,7,9,0,4,5,3,12,8,10,13,11,2");
    }

    #[test]
    fn test_seed_overrides_preset() {
        let result = csv(RaffleArguments {
            preset: Some("cbox".to_string()),
            seed: Some("1234".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(result, "2663,1415,1772");
    }

    #[test]
    fn test_draw_json() {
        let result = execute(Command::Draw(DrawArguments {
            raffle: explicit("1234", 1, 100, 5),
            format: OutputFormat::Json,
        }))
        .unwrap();
        let expected = Regex::new(
            r#"^\{"seed":"1234","hash":"md5","derived_seed":9357525492058574274,"pool":\{"min":1,"max":100\},"winners":\[34,24,36,87,55\]\}$"#,
        )
        .unwrap();
        assert!(expected.is_match(&result), "{}", result);
    }

    #[test]
    fn test_infeasible_draw() {
        let mut raffle = explicit("seed", 0, 4, 5);
        raffle.exclude = Some("2".parse().unwrap());
        let error = csv(raffle).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert!(error.to_string().contains("Infeasible draw"));
    }

    #[test]
    fn test_missing_flags() {
        let mut raffle = explicit("seed", 0, 4, 1);
        raffle.max = None;
        let error = csv(raffle).unwrap_err();
        assert_eq!(error.to_string(), "--max is required without --preset or --config.");
        assert!(csv(RaffleArguments::default()).is_err());
    }

    #[test]
    fn test_unknown_preset() {
        let result = csv(RaffleArguments {
            preset: Some("lottery".to_string()),
            ..Default::default()
        });
        assert_eq!(result.unwrap_err().to_string(), "Unknown preset 'lottery'");
    }

    #[test]
    fn test_missing_config_file_keeps_io_kind() {
        let result = csv(RaffleArguments {
            config: Some("/nonexistent/raffle.json".into()),
            ..Default::default()
        });
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_verify() {
        let verify_result = execute(Command::Verify(VerifyArguments {
            raffle: explicit("1234", 1, 100, 5),
            winners: "34,24,36,87,55".parse().unwrap(),
        }));
        assert_eq!("Winners verified correctly!", verify_result.unwrap());

        let result = execute(Command::Verify(VerifyArguments {
            raffle: explicit("1234", 1, 100, 5),
            winners: "34,24,36,87".parse().unwrap(),
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_seed() {
        let result = execute(Command::Seed(SeedArguments {
            seed: "1234".to_string(),
            hash: HashScheme::Md5,
        }))
        .unwrap();
        assert_eq!(
            result,
            "Digest: 81dc9bdb52d04dc20036dbd8313ed055\nDerived seed: 9357525492058574274"
        );
    }

    #[test]
    fn test_presets() {
        let result = execute(Command::Presets).unwrap();
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("cbox "));
        assert!(lines[1].starts_with("cbox-shuffle "));
    }
}
