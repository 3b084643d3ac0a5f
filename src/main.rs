//! Trap Race CLI - Run a race from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::PathBuf;

use trap_race::{
    compute::{Game, display_for, player_for},
    schema::GameConfig,
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    let config = match args.get(1) {
        Some(path) => {
            let config_path = PathBuf::from(path);
            GameConfig::from_json_file(&config_path).unwrap_or_else(|e| {
                eprintln!("Error loading config {}: {}", config_path.display(), e);
                std::process::exit(1);
            })
        }
        None => {
            eprintln!("Usage: {} [config.json | --example]", args[0]);
            eprintln!();
            eprintln!("Run a Trap Race with the given configuration.");
            eprintln!("Without a config file the default configuration is used.");
            eprintln!();
            GameConfig::default()
        }
    };

    println!("Trap Race");
    println!("=========");
    println!(
        "Board: {}x{} (safe zone {}, finish column {})",
        config.board.width,
        config.board.height,
        config.board.safe_zone_width,
        config.board.finish_column
    );
    println!(
        "Colors: {} ({} trapped)",
        config.number_of_colors(),
        config.board.traps.total()
    );
    println!("Boards: {}  Turns: {}", config.boards, config.turns);
    println!(
        "Population: {} initial, lifespan {}, {} births/turn",
        config.population.initial, config.population.lifespan, config.population.reproduction_rate
    );
    println!();

    let player = player_for(config.player, config.genome.length);
    let display_kind = config.display;
    let (width, height) = (config.board.width, config.board.height);

    let mut game = Game::new(config, player).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let result = match display_kind {
        trap_race::schema::DisplayKind::None => game.run(),
        kind => {
            let mut display = display_for(kind, width, height);
            game.run_with_display(display.as_mut(), |_| {})
        }
    };

    let summary = result.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    for board in &summary.boards {
        println!(
            "  Board #{}: {} points in {} turns ({:?}, final population {})",
            board.board_number + 1,
            board.points,
            board.turns_played,
            board.stop_reason,
            board.final_population
        );
    }
    println!();
    println!("Time: {:.2}s", summary.elapsed_seconds);
    println!(
        "Your bot ({}) got {} points",
        summary.player, summary.total_points
    );
}

fn print_example_config() {
    let config = GameConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
