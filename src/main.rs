/* 3rd party libraries */
use clap::{Arg, Command};
use log::{error, info, warn};
use std::io::{self, BufRead};

/* Custom libraries */
use lift::config::{self, Config};
use lift::unwrap_or_exit;
use lift::{Car, Passenger};

enum Input {
    Internal(i32),
    Up(i32),
    Down(i32),
    Add(u32),
    Remove(u32),
    Status,
    Stop,
}

fn parse_input(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let command = words.next()?;
    let argument = words.next();

    let input = match command {
        "in" => Input::Internal(argument?.parse().ok()?),
        "up" => Input::Up(argument?.parse().ok()?),
        "down" => Input::Down(argument?.parse().ok()?),
        "add" => Input::Add(argument?.parse().ok()?),
        "remove" => Input::Remove(argument?.parse().ok()?),
        "status" => Input::Status,
        "stop" | "quit" => Input::Stop,
        _ => return None,
    };
    Some(input)
}

fn init_logging(config: &Config, level: Option<&str>) {
    let level = level.unwrap_or(config.logging.level.as_str());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_status(car: &Car) {
    let snapshot = serde_json::json!({
        "status": car.status(),
        "pending": car.pending(),
        "occupants": car.occupants(),
    });
    match serde_json::to_string(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize status: {}", e),
    }
}

/* Main */
fn main() {
    let matches = Command::new("lift")
        .about("Drives a single elevator car from stdin")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml"),
        )
        .arg(Arg::new("log-level").long("log-level").takes_value(true))
        .get_matches();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let config = match config::load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config, matches.value_of("log-level"));

    // Start the car
    let car = unwrap_or_exit!(Car::new(config.car.clone()));
    unwrap_or_exit!(car.run());
    info!(
        "Car running at floor {} (floors {}-{}, capacity {})",
        car.current_floor(),
        config.car.bottom_floor,
        config.car.top_floor,
        car.capacity()
    );

    for line in io::stdin().lock().lines() {
        let line = unwrap_or_exit!(line);
        if line.trim().is_empty() {
            continue;
        }
        match parse_input(&line) {
            Some(Input::Internal(floor)) => car.press_internal(floor),
            Some(Input::Up(floor)) => car.press_up_hail(floor),
            Some(Input::Down(floor)) => car.press_down_hail(floor),
            Some(Input::Add(id)) => {
                if let Err(e) = car.add_person(Passenger::new(id)) {
                    println!("{}", e);
                }
            }
            Some(Input::Remove(id)) => {
                if let Err(e) = car.remove_person_by_id(id) {
                    println!("{}", e);
                }
            }
            Some(Input::Status) => print_status(&car),
            Some(Input::Stop) => break,
            None => warn!("Unknown command: {}", line.trim()),
        }
    }

    unwrap_or_exit!(car.stop());
    print_status(&car);
}
