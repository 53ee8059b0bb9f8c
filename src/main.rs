use std::process;

use gdal::DriverManager;
use log::{error, LevelFilter};

use tilewarp::cli::build_cli;
use tilewarp::commands::{CommandFactory, TilewarpCommandFactory};
use tilewarp::utils::logger::Logger;

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file = "tilewarp.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("tilewarp-global.log", level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    DriverManager::register_all();
    Logger::route_gdal_messages();

    let factory = TilewarpCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
