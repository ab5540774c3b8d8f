use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use gufont::{mesh::MeshOptions, read::TrueTypeFont, ConvertOptions, Error, Font};

#[derive(clap::Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Log more; repeat for even more. RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Convert a TrueType font into a gufont file
    Convert {
        /// The .ttf file to convert
        input: PathBuf,
        /// Where to write the result; defaults to `<family name>.guf`
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Passes spent splitting overlapping curves
        #[arg(long, default_value_t = MeshOptions::default().max_split_passes)]
        split_passes: usize,
        /// Mesh glyphs on a single thread
        #[arg(long)]
        single_threaded: bool,
    },
    /// Print an overview of a gufont file
    Inspect {
        /// The .guf file to inspect
        file: PathBuf,
        /// Print the overview as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    use clap::Parser as _;
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match args.command {
        Command::Convert {
            input,
            output,
            split_passes,
            single_threaded,
        } => {
            let options = ConvertOptions {
                mesh: MeshOptions {
                    max_split_passes: split_passes,
                    ..Default::default()
                },
                parallel: !single_threaded,
            };
            run_convert(&input, output, &options)
        }
        Command::Inspect { file, json } => run_inspect(&file, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_convert(
    input: &Path,
    output: Option<PathBuf>,
    options: &ConvertOptions,
) -> Result<(), Error> {
    let data = std::fs::read(input)?;
    let ttf = TrueTypeFont::read(&data)?;
    let font = gufont::convert(&ttf, options);
    let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.guf", font.name)));
    font.save(&output)?;
    log::info!(
        "wrote {} glyphs of '{}' to {}",
        font.glyphs.len(),
        font.name,
        output.display()
    );
    Ok(())
}

fn run_inspect(file: &Path, json: bool) -> Result<(), Error> {
    let summary = Font::open(file)?.summary();
    if json {
        let text = serde_json::to_string_pretty(&summary)
            .map_err(|e| Error::Io(std::io::Error::other(e)))?;
        println!("{text}");
        return Ok(());
    }
    println!("name:         {}", summary.name);
    println!("style:        {:?}", summary.style);
    println!("units per em: {}", summary.units_per_em);
    println!(
        "ascender:     {}  descender: {}  line gap: {}",
        summary.ascender, summary.descender, summary.line_gap
    );
    println!("characters:   {}", summary.mapped_chars);
    println!(
        "glyphs:       {} ({} empty)",
        summary.glyphs, summary.empty_glyphs
    );
    println!("vertices:     {}", summary.vertices);
    println!("indices:      {}", summary.indices);
    Ok(())
}
