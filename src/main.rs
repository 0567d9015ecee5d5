use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use name_forge::{
    BlendProfile, BlendResolver, BlendTable, ForgeConfig, LexicalRepository, NameForge, Result,
};

#[derive(Parser, Debug)]
#[command(name = "name_forge")]
#[command(about = "Forge fantasy names from multilingual lemma pools")]
struct Args {
    /// Directory of lexical JSON data files
    data_dir: PathBuf,

    /// Seed words to forge names for (e.g. "forest river")
    seed_words: Vec<String>,

    /// Explicit blend, e.g. "ang=0.5,cy=0.5" (overrides --stage)
    #[arg(short, long)]
    blend: Option<BlendProfile>,

    /// JSON file with stage profiles and regional modifiers
    #[arg(long)]
    blends: Option<PathBuf>,

    /// Narrative stage whose blend profile to use
    #[arg(long, default_value = "default")]
    stage: String,

    /// Region key, used for the regional modifier and the name seed
    #[arg(short, long)]
    region: Option<String>,

    /// Explicit generator seed (overrides seed-word hashing)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Transliterate output to ASCII
    #[arg(long)]
    latinize: bool,

    /// Hyphenate long compounds
    #[arg(long)]
    hyphenate: bool,

    /// Use a fresh random seed for every name
    #[arg(long)]
    random: bool,

    /// Print the data integrity report as JSON and exit
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let repo = LexicalRepository::load(&args.data_dir);

    if args.check {
        let report = repo.validate_integrity();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(if report.valid { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let region = args.region.as_deref();
    let blend = match args.blend {
        Some(blend) => blend,
        None => {
            let table = match &args.blends {
                Some(path) => BlendTable::load(path)?,
                None => BlendTable::default(),
            };
            BlendResolver::new(table).resolve_blend(&args.stage, region)
        }
    };

    let config = ForgeConfig {
        deterministic: !args.random,
        latinize_output: args.latinize,
        hyphenate_long: args.hyphenate,
        ..ForgeConfig::default()
    };
    let mut forge = NameForge::with_config(config);

    for word in &args.seed_words {
        let name = forge.forge(&repo, word, &blend, region.unwrap_or(""), args.seed);
        println!("{}\t{}", word, name);
    }

    Ok(ExitCode::SUCCESS)
}
