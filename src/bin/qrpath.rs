use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use image::{GrayImage, Luma};
use rounded_qr::{Builder, ECLevel, Size, SvgPathSink};

#[derive(Parser)]
#[command(name = "qrpath", version, about = "Rounded QR outline generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the rounded outline as an SVG document
    Svg {
        /// Text to encode
        text: String,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
        /// Edge length of the square output box
        #[arg(long, default_value_t = 256.0)]
        size: f64,
        /// Error correction level
        #[arg(long, value_enum, default_value_t = Level::Medium)]
        ecl: Level,
    },
    /// Render the raw module grid to a PNG image
    Png {
        /// Text to encode
        text: String,
        /// Output file
        #[arg(long)]
        out: PathBuf,
        /// Pixels per module
        #[arg(long, default_value_t = 8)]
        scale: u32,
        /// Error correction level
        #[arg(long, value_enum, default_value_t = Level::Medium)]
        ecl: Level,
    },
    /// Print the module grid to the terminal
    Print {
        /// Text to encode
        text: String,
        /// Error correction level
        #[arg(long, value_enum, default_value_t = Level::Medium)]
        ecl: Level,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    Low,
    Medium,
    Quartile,
    High,
}

impl From<Level> for ECLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => ECLevel::L,
            Level::Medium => ECLevel::M,
            Level::Quartile => ECLevel::Q,
            Level::High => ECLevel::H,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Svg {
            text,
            out,
            size,
            ecl,
        } => run_svg(&text, out.as_deref(), size, ecl.into()),
        Command::Png {
            text,
            out,
            scale,
            ecl,
        } => run_png(&text, &out, scale, ecl.into()),
        Command::Print { text, ecl } => run_print(&text, ecl.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run_svg(
    text: &str,
    out: Option<&std::path::Path>,
    size: f64,
    ec_level: ECLevel,
) -> Result<(), String> {
    let mut builder = Builder::text(text)
        .error_correction_level(ec_level)
        .size(Size::new(size, size));
    let mut sink = SvgPathSink::new();
    builder
        .build_with_sink(&mut sink)
        .map_err(|e| e.to_string())?;

    let document = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {size} {size}\">\
         <path d=\"{}\" fill=\"black\"/></svg>\n",
        sink.path_data()
    );
    match out {
        Some(path) => fs::write(path, document).map_err(|e| e.to_string()),
        None => {
            print!("{document}");
            Ok(())
        }
    }
}

fn run_png(
    text: &str,
    out: &std::path::Path,
    scale: u32,
    ec_level: ECLevel,
) -> Result<(), String> {
    let mut builder = Builder::text(text).error_correction_level(ec_level);
    let symbol = builder.symbol().map_err(|e| e.to_string())?;
    let matrix = symbol.matrix();

    let n = matrix.width() as u32;
    let scale = scale.max(1);
    let mut img = GrayImage::from_pixel(n * scale, n * scale, Luma([255u8]));
    for y in 0..n {
        for x in 0..n {
            if matrix.get(x as usize, y as usize) {
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(x * scale + dx, y * scale + dy, Luma([0u8]));
                    }
                }
            }
        }
    }
    img.save(out).map_err(|e| e.to_string())
}

fn run_print(text: &str, ec_level: ECLevel) -> Result<(), String> {
    let mut builder = Builder::text(text).error_correction_level(ec_level);
    let symbol = builder.symbol().map_err(|e| e.to_string())?;
    let matrix = symbol.matrix();

    println!(
        "version {} | level {:?} | mask {}",
        symbol.version().number(),
        symbol.ec_level(),
        symbol.mask().index()
    );
    for y in 0..matrix.height() {
        let mut line = String::with_capacity(matrix.width() * 2);
        for x in 0..matrix.width() {
            line.push_str(if matrix.get(x, y) { "██" } else { "  " });
        }
        println!("{line}");
    }
    Ok(())
}
