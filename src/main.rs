use clap::{crate_version, value_parser, Arg, ArgAction, Command as ClapCommand};
use std::path::Path;
use std::process;
use log::{error, info};

use segregs::commands::{CommandFactory, SegregsCommandFactory};
use segregs::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("segregs")
        .version(crate_version!())
        .about("Cut annotated regions out of a page image using its PAGE XML")
        .arg(
            Arg::new("xml")
                .help("PAGE XML annotation file")
                .value_name("XML")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("image")
                .help("Page image the annotation refers to")
                .value_name("IMG")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("out-base")
                .help("Output prefix (regions) or output directory (with --lines)")
                .value_name("OUT-BASE")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::new("padding")
                .long("padding")
                .help("Pixels added around every region's bounding box")
                .value_name("N")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("workers")
                .long("workers")
                .help("Number of concurrent workers (default: available parallelism)")
                .value_name("N")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("lines")
                .long("lines")
                .help("Extract TextLine elements instead of TextRegion elements")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("two-point-rectangles")
                .long("two-point-rectangles")
                .help("Read two-point coordinate strings as axis-aligned rectangles")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-going")
                .long("keep-going")
                .help("Continue after a region fails and report failures at the end")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write a log line for every extracted region to this file")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase console verbosity (repeatable)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .help("Do not draw a progress bar")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbosity = matches.get_count("verbose");
    Logger::init_global_logger(Logger::level_for(verbosity, matches.get_flag("quiet")));

    let logger = match matches.get_one::<String>("log-file") {
        Some(log_file) => match Logger::new(Path::new(log_file)) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error initializing log file: {}", e);
                process::exit(1);
            }
        },
        None => Logger::disabled(),
    };

    let factory = SegregsCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            info!("Running {} command", command.name());
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
