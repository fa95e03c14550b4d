use seamshrink::dump::{draw_seam, energy_to_image};
use seamshrink::{energymap, logger, EnergyUpdate, Progress, Raster, SeamCarver};
use std::convert::TryFrom;
use std::path::Path;
use std::process;

extern crate clap;
extern crate image;

use clap::{value_t, App, Arg};
use failure::{format_err, Error};
use image::Rgba;
use tracing::{error, info};

const SEAM_COLOUR: Rgba<u8> = Rgba([255, 0, 0, 255]);

fn main() {
    logger::init();

    if let Err(e) = run() {
        eprintln!("seamshrink: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let matches = App::new("seamshrink")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Narrow an image by carving out its least interesting seams")
        .arg(
            Arg::with_name("INPUT")
                .help("The image to narrow")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Where to write the narrowed image; the format follows the extension")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("width")
                .short("w")
                .long("width")
                .value_name("PIXELS")
                .help("Target width")
                .takes_value(true)
                .conflicts_with("percent"),
        )
        .arg(
            Arg::with_name("percent")
                .short("p")
                .long("percent")
                .value_name("PERCENT")
                .help("Target width as a percentage of the input width [default: 80]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("strategy")
                .short("s")
                .long("strategy")
                .help("How the energy map is updated after each seam")
                .possible_values(&["rebuild", "trim"])
                .default_value("rebuild"),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .value_name("FILE")
                .help("Also write the input's energy map as a greyscale image")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("frames")
                .long("frames")
                .value_name("DIR")
                .help("Write every intermediate image, with its seam in red, to this directory")
                .takes_value(true),
        )
        .get_matches();

    let input = matches
        .value_of("INPUT")
        .ok_or_else(|| format_err!("no input image given"))?;
    let output = matches
        .value_of("output")
        .ok_or_else(|| format_err!("no output file given"))?;

    let raster = Raster::try_from(image::open(input)?.to_rgba8())?;
    let (width, height) = raster.dimensions();
    info!("Read {} ({}x{})", input, width, height);

    let target = if matches.is_present("width") {
        value_t!(matches, "width", u32).unwrap_or_else(|e| e.exit())
    } else {
        let percent = if matches.is_present("percent") {
            value_t!(matches, "percent", u32).unwrap_or_else(|e| e.exit())
        } else {
            80
        };
        (u64::from(width) * u64::from(percent) / 100) as u32
    };

    let update = match matches.value_of("strategy") {
        Some("trim") => EnergyUpdate::Trim,
        _ => EnergyUpdate::Rebuild,
    };

    if let Some(path) = matches.value_of("energy") {
        energy_to_image(&energymap::build(&raster)?).save(path)?;
        info!("Wrote energy map to {}", path);
    }

    let frames = matches.value_of("frames").map(Path::new);
    if let Some(dir) = frames {
        std::fs::create_dir_all(dir)?;
    }

    let mut frame = 0;
    let mut frame_error: Option<Error> = None;
    let carver = SeamCarver::new().with_update(update);
    let carved = carver.carve_to_width_with(raster, target, |seam, raster| {
        frame += 1;
        let dir = match frames {
            Some(dir) => dir,
            None => return Progress::Continue,
        };
        let path = dir.join(format!("frame-{:04}.png", frame));
        let written = draw_seam(raster, seam, SEAM_COLOUR)
            .map_err(Error::from)
            .and_then(|painted| painted.into_image().save(&path).map_err(Error::from));
        match written {
            Ok(()) => Progress::Continue,
            Err(e) => {
                frame_error = Some(e);
                Progress::Cancel
            }
        }
    });

    let carved = match (carved, frame_error) {
        (Ok(carved), _) => carved,
        (Err(_), Some(e)) => return Err(e),
        (Err(failure), None) => {
            error!(
                "Stopped at {}x{}",
                failure.raster.width(),
                failure.raster.height()
            );
            return Err(failure.into());
        }
    };

    info!(
        "Removed {} seams, {}x{} -> {}x{}",
        frame,
        width,
        height,
        carved.width(),
        carved.height()
    );
    carved.into_image().save(output)?;
    Ok(())
}
