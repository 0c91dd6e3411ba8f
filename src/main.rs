extern crate clap;
extern crate crossbeam;
extern crate env_logger;
extern crate failure;
extern crate image;
extern crate mandelscan;

use clap::{App, Arg, ArgMatches};
use failure::err_msg;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use mandelscan::framebuffer::Canvas;
use mandelscan::worker::{ScanlineRenderer, WorkerState};
use mandelscan::{Command, Mandelbrot};
use std::fs::File;
use std::str::FromStr;

/// Given a string and a separator, returns the two values separated
/// by the separator.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const COMMAND: &str = "command";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelscan")
        .version("0.1.0")
        .about("Incremental Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("30")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 100000",
                    )
                })
                .help("Escape-time iteration budget per point"),
        )
        .arg(
            Arg::with_name(COMMAND)
                .required(false)
                .long(COMMAND)
                .short("c")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(|s| Command::from_str(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help(
                    "Navigation command applied before rendering: move-left, move-right, \
                     move-up, move-down, zoom-in, zoom-out, reset.  May be repeated.",
                ),
        )
        .get_matches()
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), std::io::Error> {
    let output = File::create(outfile)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::RGB(8))?;
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let bounds: (usize, usize) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let iterations =
        u32::from_str(matches.value_of(ITERATIONS).unwrap()).expect("Error parsing iterations");

    let engine = Mandelbrot::new(bounds.0, bounds.1)?;
    if let Some(commands) = matches.values_of(COMMAND) {
        for command in commands {
            engine.apply(Command::from_str(command)?);
        }
    }

    // Tick the renderer to completion on a background thread, the
    // same way a host UI loop would, just without a cadence.
    let engine = &engine;
    crossbeam::scope(|spawner| {
        spawner.spawn(move |_| {
            let mut renderer = ScanlineRenderer::new(engine.height(), iterations);
            while renderer.tick(engine) == WorkerState::Rendering {}
        });
    })
    .map_err(|_| err_msg("render thread panicked"))?;

    let canvas = Canvas::new(bounds.0, bounds.1)?;
    engine.draw(&canvas, (0, 0));
    let pixels = canvas.lock().to_rgb_bytes();
    write_image(matches.value_of(OUTPUT).unwrap(), &pixels, bounds)?;
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
