//! Command-line interface definition

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Build the argument parser for the `tilewarp` binary
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("tilewarp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect raster tiles and reproject them into a UTM zone")
        .arg(
            Arg::new("inspect")
                .long("inspect")
                .help("Print metadata of every tile in the input directory (default)")
                .action(ArgAction::SetTrue)
                .conflicts_with("reproject"),
        )
        .arg(
            Arg::new("reproject")
                .short('r')
                .long("reproject")
                .help("Prepare and reproject every tile in the input directory")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("Directory holding the original tiles")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("intermediate")
                .long("intermediate")
                .help("Directory receiving prepared copies")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Directory receiving reprojected tiles")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("utm-zone")
                .long("utm-zone")
                .help("Target UTM zone (1-60)")
                .value_name("ZONE")
                .required(false),
        )
        .arg(
            Arg::new("hemisphere")
                .long("hemisphere")
                .help("Target UTM hemisphere (north or south)")
                .value_name("HEMISPHERE")
                .required(false),
        )
        .arg(
            Arg::new("stamp")
                .long("stamp")
                .help("Projection stamped onto prepared copies (WGS84, EPSG:xxxx or none)")
                .value_name("CRS")
                .required(false),
        )
        .arg(
            Arg::new("driver")
                .long("driver")
                .help("Output driver short name")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("resampling")
                .long("resampling")
                .help(
                    "Resampling method \
                     (nearest, bilinear, cubic, cubicspline, lanczos, average, mode)",
                )
                .value_name("METHOD")
                .required(false),
        )
        .arg(
            Arg::new("all-bands")
                .long("all-bands")
                .help("Warp every band instead of band 1 only")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}
