//! Print the contents of a PARAM.SFO file.
//!
//! Run with: `cargo run --example sfo_info -- path/to/PARAM.SFO --platform ps3`
//!
//! Set `RUST_LOG=sfokit=trace` to see every index record as it is decoded.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sfokit::overlay::ParamSfo;
use sfokit::overlay::ps3::Ps3ParamSfo;
use sfokit::overlay::ps4::Ps4ParamSfo;
use sfokit::{Result, Sfo};

const VALUE_WIDTH: usize = 55;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Platform {
    Ps3,
    Ps4,
}

#[derive(Debug, Parser)]
#[command(about = "Print the contents of a PARAM.SFO file")]
struct Args {
    /// Path to the PARAM.SFO file.
    path: PathBuf,

    /// Also decode the platform-specific fields.
    #[arg(long, value_enum)]
    platform: Option<Platform>,

    /// Print the entries as a JSON object (needs the `serde` feature).
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();

    let sfo = match args.platform {
        Some(Platform::Ps3) => {
            let param = Ps3ParamSfo::open(&args.path)?;
            print_ps3(&param);
            param.into_sfo()
        }
        Some(Platform::Ps4) => {
            let param = Ps4ParamSfo::open(&args.path)?;
            print_ps4(&param);
            param.into_sfo()
        }
        None => {
            let mut file = std::io::BufReader::new(std::fs::File::open(&args.path)?);
            Sfo::parse(&mut file)?
        }
    };

    if args.json {
        print_json(&sfo);
    } else {
        print_table(&sfo);
    }
    Ok(())
}

fn print_table(sfo: &Sfo) {
    println!("{:>20}\t{:<w$}", "KEY", "VALUE", w = VALUE_WIDTH);
    for entry in sfo {
        let value: String = entry.value.to_string().chars().take(VALUE_WIDTH).collect();
        println!("{:>20}\t{value}", entry.key);
    }
}

#[cfg(feature = "serde")]
fn print_json(sfo: &Sfo) {
    match serde_json::to_string_pretty(sfo) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("[!] could not serialize entries: {e}"),
    }
}

#[cfg(not(feature = "serde"))]
fn print_json(_sfo: &Sfo) {
    eprintln!("[!] --json needs the `serde` feature");
}

fn print_ps3(param: &Ps3ParamSfo) {
    if let Some(title) = param.title() {
        println!("{title}");
    }
    if let Some(sub_title) = param.sub_title() {
        println!("{sub_title}");
    }
    if let Some(detail) = param.detail() {
        println!("{detail}");
    }
    if let Some(category) = param.category() {
        println!("{}", category.description());
    }
    if let Some(attribute) = param.attribute() {
        println!("SFO attributes:\n\t{attribute}");
    }
    if let Some(resolution) = param.resolution() {
        println!("Supported resolutions:\n\t{resolution}");
    }
    if let Some(sound) = param.sound_format() {
        println!("Supported sound formats:\n\t{sound}");
    }
    println!();
}

fn print_ps4(param: &Ps4ParamSfo) {
    if let Some(title) = param.title() {
        println!("{title}");
    }
    let or_blank = |v: Option<String>| v.unwrap_or_default();
    println!("{:>12}\t{}", "APP TYPE", or_blank(param.app_type().map(|t| t.to_string())));
    println!("{:>12}\t{}", "ATTRIBUTE", or_blank(param.attribute().map(|a| a.to_string())));
    println!("{:>12}\t{}", "ATTRIBUTE2", or_blank(param.attribute2().map(|a| a.to_string())));
    println!("{:>12}\t{}", "CATEGORY", or_blank(param.category().map(|c| format!("{c:?}"))));
    println!("{:>12}\t{}", "CONTENT_ID", or_blank(param.content_id().map(|c| c.to_string())));
    println!();
}
