use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;

use scrom::{wav_writer, Config, ControlRom, SynthModel};

/// Decode Sound Canvas control ROM images
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(ClapArgs, Debug)]
struct RomArgs {
    /// Path to the control ROM image
    #[arg(required_unless_present = "config")]
    rom: Option<PathBuf>,

    /// TOML configuration file naming the ROM files
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip identification and decode as this model (vsc, sc55, sc55mk2, sc88)
    #[arg(long)]
    model: Option<SynthModel>,

    /// Wave ROM dump holding the sample data (repeat in bank order)
    #[arg(long = "wave-rom")]
    wave_roms: Vec<PathBuf>,
}

impl RomArgs {
    fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(rom) = &self.rom {
            config.control_rom = rom.clone();
        }
        if let Some(model) = self.model {
            config.model = Some(model);
        }
        config.wave_roms.extend(self.wave_roms.iter().cloned());
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the detected model
    Identify {
        #[command(flatten)]
        rom: RomArgs,
    },
    /// List all instruments
    Instruments {
        #[command(flatten)]
        rom: RomArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all partials
    Partials {
        #[command(flatten)]
        rom: RomArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all samples
    Samples {
        #[command(flatten)]
        rom: RomArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all drum sets
    Drums {
        #[command(flatten)]
        rom: RomArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the variation table as JSON
    Variations {
        #[command(flatten)]
        rom: RomArgs,
    },
    /// Write every sample as a WAV file
    ExportSamples {
        #[command(flatten)]
        rom: RomArgs,
        /// Output directory
        output_dir: PathBuf,
    },
    /// Write the embedded demo songs
    DumpDemoSongs {
        #[command(flatten)]
        rom: RomArgs,
        /// Output directory
        output_dir: PathBuf,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open(args: &RomArgs) -> Result<Config> {
    let config = args.to_config()?;
    if config.control_rom.as_os_str().is_empty() {
        bail!("no control ROM given");
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match args.command {
        Commands::Identify { rom } => {
            let config = open(&rom)?;
            let rom = ControlRom::new(&config)?;
            println!("{}", rom.model());
        }
        Commands::Instruments { rom, json } => {
            let config = open(&rom)?;
            let rom = ControlRom::new(&config)?;
            let mut instruments = Vec::new();
            rom.get_instruments(&mut instruments)
                .context("decoding instruments")?;
            if json {
                return print_json(&instruments);
            }
            for (i, inst) in instruments.iter().enumerate() {
                let partials: Vec<String> = inst
                    .used_partials()
                    .map(|p| p.partial_index.to_string())
                    .collect();
                println!("{:3}: {:12} partials [{}]", i, inst.name, partials.join(", "));
            }
        }
        Commands::Partials { rom, json } => {
            let config = open(&rom)?;
            let rom = ControlRom::new(&config)?;
            let mut partials = Vec::new();
            rom.get_partials(&mut partials).context("decoding partials")?;
            if json {
                return print_json(&partials);
            }
            for (i, partial) in partials.iter().enumerate() {
                let zones: Vec<String> = partial
                    .zones()
                    .map(|(key, sample)| format!("{}:{}", key, sample))
                    .collect();
                println!("{:3}: {:12} {}", i, partial.name, zones.join(" "));
            }
        }
        Commands::Samples { rom, json } => {
            let config = open(&rom)?;
            let rom = ControlRom::new(&config)?;
            let mut samples = Vec::new();
            rom.get_samples(&mut samples).context("decoding samples")?;
            if json {
                return print_json(&samples);
            }
            let map = rom.address_map();
            for (i, s) in samples.iter().enumerate() {
                println!(
                    "{:3}: addr 0x{:06X} -> 0x{:06X} len {:5} loop {:5} {:?} key {:3}",
                    i,
                    s.address,
                    map.resolve(s.address),
                    s.sample_len,
                    s.loop_len,
                    s.loop_mode,
                    s.root_key
                );
            }
        }
        Commands::Drums { rom, json } => {
            let config = open(&rom)?;
            let rom = ControlRom::new(&config)?;
            let mut drums = Vec::new();
            rom.get_drum_sets(&mut drums).context("decoding drum sets")?;
            if json {
                return print_json(&drums);
            }
            for (i, set) in drums.iter().enumerate() {
                let keys = (0..128u8).filter(|&k| set.note_on(k)).count();
                println!("{:2}: {:12} {} keys", i, set.name, keys);
            }
        }
        Commands::Variations { rom } => {
            let config = open(&rom)?;
            let rom = ControlRom::new(&config)?;
            let mut variations = Vec::new();
            rom.get_variations(&mut variations)
                .context("decoding variation table")?;
            print_json(&variations)?;
        }
        Commands::ExportSamples { rom, output_dir } => {
            let config = open(&rom)?;
            let rom = ControlRom::new(&config)?;
            let mut samples = Vec::new();
            rom.get_samples(&mut samples).context("decoding samples")?;
            let written = wav_writer::write_samples(&output_dir, &samples)?;
            println!("wrote {} WAV files to {}", written.len(), output_dir.display());
        }
        Commands::DumpDemoSongs { rom, output_dir } => {
            let config = open(&rom)?;
            let rom = ControlRom::new(&config)?;
            let exports = rom.dump_demo_songs(&output_dir)?;
            let mut failed = 0;
            for export in &exports {
                match &export.result {
                    Ok(len) => println!("{}: {} bytes", export.path.display(), len),
                    Err(e) => {
                        failed += 1;
                        eprintln!("{}: {}", export.path.display(), e);
                    }
                }
            }
            if failed > 0 {
                bail!("{} of {} demo songs could not be written", failed, exports.len());
            }
        }
    }

    Ok(())
}
