// Grid A* path planning demo
//
// Plans across an occupancy grid twice, once with the plain cost model
// and once with a direction-change penalty, prints both paths as move
// glyphs, and saves a plot comparing them.

use gnuplot::{AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};
use rand::Rng;

use na::DMatrix;
extern crate nalgebra as na;

use grid_planner::path_planning::Action;
use grid_planner::{AStarConfig, AStarPlanner, GridNode, GridPath, OccupancyGrid, PlanOutcome};

// Demo parameters
const DIRECTION_CHANGE_PENALTY: f64 = 20.0;
const P_RANDOM_OBSTACLE: f64 = 0.05;

fn moves_string(path: &GridPath) -> String {
    path.nodes
        .windows(2)
        .filter_map(|w| Action::from_delta(w[1].x - w[0].x, w[1].y - w[0].y))
        .map(|a| a.to_string())
        .collect()
}

fn report(label: &str, outcome: &PlanOutcome) {
    match outcome {
        PlanOutcome::Found { path, cost } => {
            println!(
                "{}: {} nodes, cost {:.1}, moves {}",
                label,
                path.len(),
                cost,
                moves_string(path)
            );
        }
        PlanOutcome::Unreachable => {
            println!("{}: failed to find a path!", label);
        }
    }
}

fn main() {
    println!("Grid A* path planning start!!");

    #[rustfmt::skip]
    let mut cells = DMatrix::from_row_slice(10, 14, &[
        0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0,
    ]);

    let start = GridNode::new(0, 0);
    let goal = GridNode::new(9, 13);

    // Sprinkle a few random obstacles, keeping the endpoints free
    let mut rng = rand::thread_rng();
    for x in 0..cells.nrows() {
        for y in 0..cells.ncols() {
            let node = GridNode::new(x as i32, y as i32);
            if node != start && node != goal && rng.gen::<f64>() < P_RANDOM_OBSTACLE {
                cells[(x, y)] = 1;
            }
        }
    }

    let grid = match OccupancyGrid::new(cells.clone()) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("bad grid: {}", e);
            return;
        }
    };
    let obstacles = grid.occupied_cells();
    let plain = AStarPlanner::with_default_config(grid);

    let grid = match OccupancyGrid::new(cells) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("bad grid: {}", e);
            return;
        }
    };
    let penalized = AStarPlanner::new(
        grid,
        AStarConfig {
            direction_change_penalty: Some(DIRECTION_CHANGE_PENALTY),
            ..Default::default()
        },
    );

    let plain_outcome = match plain.plan(start, goal) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("planning error: {}", e);
            return;
        }
    };
    let penalized_outcome = match penalized.plan(start, goal) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("planning error: {}", e);
            return;
        }
    };

    report("plain     ", &plain_outcome);
    report("penalized ", &penalized_outcome);

    // Plot as (column, -row) so the grid reads the same way the matrix
    // literal above does
    let mut fg = Figure::new();
    {
        let axes = fg
            .axes2d()
            .set_title("Grid A* Path Planning", &[])
            .set_x_label("y [cells]", &[])
            .set_y_label("x [cells]", &[])
            .points(
                obstacles.iter().map(|n| n.y),
                obstacles.iter().map(|n| -n.x),
                &[Caption("Obstacles"), PointSymbol('S'), Color("black"), PointSize(2.0)],
            )
            .points(
                Some(start.y),
                Some(-start.x),
                &[Caption("Start"), PointSymbol('O'), Color("green"), PointSize(2.0)],
            )
            .points(
                Some(goal.y),
                Some(-goal.x),
                &[Caption("Goal"), PointSymbol('O'), Color("blue"), PointSize(2.0)],
            );
        if let PlanOutcome::Found { path, .. } = &plain_outcome {
            axes.lines(
                path.nodes.iter().map(|n| n.y),
                path.nodes.iter().map(|n| -n.x),
                &[Caption("Plain"), Color("red"), LineWidth(2.0)],
            );
        }
        if let PlanOutcome::Found { path, .. } = &penalized_outcome {
            axes.lines(
                path.nodes.iter().map(|n| n.y),
                path.nodes.iter().map(|n| -n.x),
                &[Caption("Penalized"), Color("orange"), LineWidth(2.0)],
            );
        }
    }

    let crate_dir = option_env!("CARGO_MANIFEST_DIR").unwrap_or(".");
    let output = format!("{}/img/grid_a_star.svg", crate_dir);
    match fg.save_to_svg(&output, 800, 600) {
        Ok(_) => println!("Plot saved to: {}", output),
        Err(e) => eprintln!("could not save plot: {:?}", e),
    }

    println!("Grid A* path planning finish!!");
}
