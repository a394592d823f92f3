//! bhandar-map - inspect a warehouse layout from the command line
//!
//! Usage:
//!   bhandar-map layout --floor 1 --occupancy snapshot.json
//!   bhandar-map plan --category paper --quantity 120
//!   bhandar-map route --slot B01
//!   bhandar-map route --from 0,0 --to 9,11 --via 0,4 --via 9,4
//!   bhandar-map occupancy --floor 2 --occupancy snapshot.json

use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

use bhandar_map::render::{render_floor, render_records};
use bhandar_map::{
    BhandarConfig, Floor, GridCoord, MapError, Result, Route, SizeClass, Warehouse,
    occupancy::parse_snapshot_json,
};

/// Warehouse grid inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "configs/warehouse.yaml")]
    config: PathBuf,

    /// Occupancy snapshot (JSON array of stored items)
    #[arg(short, long, global = true)]
    occupancy: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one floor of the layout
    Layout {
        #[arg(short, long, default_value_t = 1)]
        floor: u8,
    },

    /// Suggest slots for incoming stock
    Plan {
        /// Size class (small, medium, large)
        #[arg(short, long, conflicts_with = "category")]
        size: Option<SizeClass>,

        /// Item category, mapped through the config
        #[arg(long)]
        category: Option<String>,

        #[arg(short, long)]
        quantity: i64,

        #[arg(short, long, default_value_t = 1)]
        floor: u8,
    },

    /// Compute a route between cells
    Route {
        /// Start cell as `x,y` (default: receiving)
        #[arg(long, conflicts_with = "collect")]
        from: Option<GridCoord>,

        /// Goal cell as `x,y`
        #[arg(long, conflicts_with_all = ["slot", "collect"])]
        to: Option<GridCoord>,

        /// Route from receiving to this slot
        #[arg(long, conflicts_with = "collect")]
        slot: Option<String>,

        /// Route from this slot to packing
        #[arg(long)]
        collect: Option<String>,

        /// Intermediate stops, in order
        #[arg(long)]
        via: Vec<GridCoord>,

        /// Floor to draw the route on
        #[arg(short, long, default_value_t = 1)]
        floor: u8,
    },

    /// Occupancy summary for one floor
    Occupancy {
        #[arg(short, long, default_value_t = 1)]
        floor: u8,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if args.config.exists() {
        info!("Loading configuration from {:?}", args.config);
        BhandarConfig::load(&args.config)?
    } else {
        info!("{:?} not found, using the standard layout", args.config);
        BhandarConfig::default()
    };
    let warehouse = Warehouse::from_config(&config)?;

    if let Some(path) = &args.occupancy {
        load_occupancy(&warehouse, path)?;
    }

    match args.command {
        Command::Layout { floor } => {
            let floor = warehouse.topology().floor(floor)?;
            print_floor(&warehouse, floor, None)?;
        }
        Command::Plan {
            size,
            category,
            quantity,
            floor,
        } => {
            let floor = warehouse.topology().floor(floor)?;
            plan(&warehouse, size, category.as_deref(), quantity, floor)?;
        }
        Command::Route {
            from,
            to,
            slot,
            collect,
            via,
            floor,
        } => {
            let floor = warehouse.topology().floor(floor)?;
            let route = route(&warehouse, from, to, slot, collect, &via)?;
            print_floor(&warehouse, floor, Some(&route))?;
        }
        Command::Occupancy { floor } => {
            let floor = warehouse.topology().floor(floor)?;
            occupancy(&warehouse, floor)?;
        }
    }

    Ok(())
}

fn load_occupancy(warehouse: &Warehouse, path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| MapError::Snapshot(format!("{}: {}", path.display(), e)))?;
    let items = parse_snapshot_json(&json)
        .map_err(|e| MapError::Snapshot(format!("{}: {}", path.display(), e)))?;
    let summary = warehouse.occupancy().refresh(items)?;
    info!(
        "Loaded {} occupancy records from {:?}",
        summary.records, path
    );
    Ok(())
}

fn print_floor(warehouse: &Warehouse, floor: Floor, route: Option<&Route>) -> Result<()> {
    let snapshot = warehouse.occupancy().snapshot();
    let cells = route.map(|r| r.cells());
    println!("Floor {}:", floor);
    print!("{}", render_floor(warehouse.topology(), &snapshot, floor, cells)?);
    Ok(())
}

fn plan(
    warehouse: &Warehouse,
    size: Option<SizeClass>,
    category: Option<&str>,
    quantity: i64,
    floor: Floor,
) -> Result<()> {
    let plan = match (size, category) {
        (Some(size), _) => {
            let snapshot = warehouse.occupancy().snapshot();
            warehouse
                .capacity_planner()
                .plan_storage(size, quantity, floor, &snapshot)?
        }
        (None, Some(category)) => warehouse.plan_for_category(category, quantity, floor)?,
        (None, None) => {
            let default = warehouse.classifier().default_class();
            let snapshot = warehouse.occupancy().snapshot();
            warehouse
                .capacity_planner()
                .plan_storage(default, quantity, floor, &snapshot)?
        }
    };

    println!("{} items need {} squares", quantity, plan.required);
    for slot in &plan.slots {
        println!(
            "  {:<8} {} ({})",
            warehouse.topology().location_code(slot, floor),
            slot.coord,
            slot.size_class
        );
    }
    if !plan.is_complete() {
        println!("  short by {} squares on floor {}", plan.shortfall(), floor);
    }
    Ok(())
}

fn route(
    warehouse: &Warehouse,
    from: Option<GridCoord>,
    to: Option<GridCoord>,
    slot: Option<String>,
    collect: Option<String>,
    via: &[GridCoord],
) -> Result<Route> {
    let topology = warehouse.topology();
    let finder = warehouse.path_finder();
    let slot_coord = |code: &str| {
        topology
            .slot_by_code(code)
            .map(|slot| slot.coord)
            .ok_or_else(|| MapError::UnknownSlot(code.to_string()))
    };

    let (start, goal) = match (slot, collect) {
        (Some(code), _) => (from.unwrap_or(topology.receiving()), slot_coord(&code)?),
        (None, Some(code)) => (slot_coord(&code)?, to.unwrap_or(topology.packing())),
        (None, None) => (
            from.unwrap_or(topology.receiving()),
            to.unwrap_or(topology.packing()),
        ),
    };

    let mut stops = via.to_vec();
    stops.push(goal);
    let route = finder.route_via(start, &stops)?;

    println!(
        "{} -> {}: {} steps, {} nodes expanded{}",
        route.start(),
        route.goal(),
        route.steps(),
        route.nodes_expanded,
        if route.is_direct() {
            " (no walkable path, direct line)"
        } else {
            ""
        }
    );
    Ok(route)
}

fn occupancy(warehouse: &Warehouse, floor: Floor) -> Result<()> {
    let snapshot = warehouse.occupancy().snapshot();
    let utilisation = warehouse.occupancy().floor_utilisation(floor)?;
    println!(
        "Floor {}: {}/{} slots occupied ({:.1}%), generation {}",
        floor,
        snapshot.occupied_count(floor),
        warehouse.topology().slots().len(),
        utilisation,
        snapshot.generation()
    );
    print!("{}", render_records(&snapshot, floor));
    Ok(())
}
