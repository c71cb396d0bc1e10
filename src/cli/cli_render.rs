//! Terminal output for the interactive menu: parameter and summary tables built
//! with prettytable, and a character-cell line chart of one time slice.

use crate::equation_config::{BorderCondition, EquationConfig, InitialConditionType, Side};
use crate::solution_grid::{AxisRange, ChartPoint, GridSummary, x_axis_range};
use prettytable::{Table, row};

pub const CHART_WIDTH: usize = 60;
pub const CHART_HEIGHT: usize = 16;
const LABEL_WIDTH: usize = 11;

/// Allowed values of a selector field, empty for numeric fields.
pub fn selector_options(field: &str) -> &'static [&'static str] {
    match field {
        "equationType" => &["parabolic", "hyperbolic"],
        "leftBorderConditionType" | "rightBorderConditionType" => {
            &["dirichlet", "neumann", "robin"]
        }
        "initialConditionType" => &["constant", "linear", "sinusoidal", "gaussian"],
        _ => &[],
    }
}

/// Human readable name of a wire field. The two initial condition parameters are
/// named after what they mean for the selected profile.
pub fn field_description(config: &EquationConfig, field: &str) -> String {
    let kind = config
        .initial_condition_kind()
        .unwrap_or(InitialConditionType::Gaussian);
    let text = match field {
        "equationType" => "Equation type",
        "x1" => "Left boundary x1, m",
        "x2" => "Right boundary x2, m",
        "t2" => "Final time t2, s",
        "h" => "Space step h, m",
        "tau" => "Time step tau, s",
        "leftBorderConditionType" => "Left boundary condition",
        "leftDirichletValue" => "Left value U(x1)",
        "leftNeumannValue" => "Left flux dU/dx(x1)",
        "leftRobinH" => "Left Robin coefficient h",
        "leftRobinTheta" => "Left Robin ambient theta",
        "rightBorderConditionType" => "Right boundary condition",
        "rightDirichletValue" => "Right value U(x2)",
        "rightNeumannValue" => "Right flux dU/dx(x2)",
        "rightRobinH" => "Right Robin coefficient h",
        "rightRobinTheta" => "Right Robin ambient theta",
        "coefficientK" => "Diffusivity K, m2/s",
        "coefficientV" => "Velocity V, m/s",
        "coefficientF" => "Source F",
        "coefficientL" => "Coefficient L",
        "coefficientM" => "Inertia M",
        "initialConditionType" => "Initial condition",
        "initialConditionParam1" => return format!("Initial {}", kind.param1_label()),
        "initialConditionParam2" => return format!("Initial {}", kind.param2_label()),
        "initialDerivative" => "Initial dU/dt",
        other => other,
    };
    text.to_string()
}

/// One boundary with only the values its kind uses.
pub fn border_condition_text(config: &EquationConfig, side: Side) -> String {
    match config.border_condition(side) {
        Some(BorderCondition::Dirichlet { value }) => format!("Dirichlet U = {}", value),
        Some(BorderCondition::Neumann { flux }) => format!("Neumann dU/dx = {}", flux),
        Some(BorderCondition::Robin { h, theta }) => {
            format!("Robin h = {}, theta = {}", h, theta)
        }
        None => {
            let kind = match side {
                Side::Left => &config.left_border_condition_type,
                Side::Right => &config.right_border_condition_type,
            };
            format!("unknown '{}'", kind)
        }
    }
}

/// Numbered table of the fields that matter for the current selectors.
pub fn parameters_table(config: &EquationConfig) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["#", "Field", "Description", "Value"]);
    for (i, field) in config.active_fields().iter().enumerate() {
        let value = config
            .field(field)
            .map(|v| v.to_string())
            .unwrap_or_default();
        table.add_row(row![
            i + 1,
            field,
            field_description(config, field),
            value
        ]);
    }
    table
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4e}", v))
}

fn fmt_range(range: Option<AxisRange>) -> String {
    range.map_or_else(
        || "-".to_string(),
        |r| format!("{:.4e} .. {:.4e}", r.min, r.max),
    )
}

/// Info panel of the current slice.
pub fn summary_table(
    summary: &GridSummary,
    time_index: Option<usize>,
    time: Option<f64>,
    auto_scale: bool,
    y_range: Option<AxisRange>,
) -> Table {
    let count = |n: Option<usize>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
    let mut table = Table::new();
    table.set_titles(row!["Quantity", "Value"]);
    table.add_row(row!["Space points", count(summary.space_points)]);
    table.add_row(row!["Time steps", count(summary.time_steps)]);
    table.add_row(row![
        "x domain",
        format!("{} .. {}", fmt_opt(summary.x_first), fmt_opt(summary.x_last))
    ]);
    table.add_row(row![
        "t domain",
        format!("{} .. {}", fmt_opt(summary.t_first), fmt_opt(summary.t_last))
    ]);
    table.add_row(row![
        "Global U range",
        format!("{} .. {}", fmt_opt(summary.min_value), fmt_opt(summary.max_value))
    ]);
    table.add_row(row!["Time layer", count(time_index)]);
    table.add_row(row!["t of layer", fmt_opt(time)]);
    table.add_row(row!["Chart points", summary.chart_points]);
    table.add_row(row!["Slice x range", fmt_range(summary.slice_x_range)]);
    table.add_row(row!["Slice U range", fmt_range(summary.slice_u_range)]);
    table.add_row(row![
        "Y axis",
        format!(
            "{} ({})",
            fmt_range(y_range),
            if auto_scale { "auto" } else { "fixed" }
        )
    ]);
    table
}

/// First `rows` points of the series.
pub fn points_table(series: &[ChartPoint], rows: usize) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["i", "x", "U"]);
    for (i, p) in series.iter().take(rows).enumerate() {
        table.add_row(row![i, format!("{:.6e}", p.x), format!("{:.6e}", p.u)]);
    }
    table
}

/// Scatter of the series on a `width` x `height` character grid, y labels on the
/// left and the x extent underneath. Points outside `y_range` are drawn on the
/// nearest edge.
pub fn ascii_chart(series: &[ChartPoint], y_range: AxisRange, width: usize, height: usize) -> String {
    let Some(x_range) = x_axis_range(series) else {
        return "No data to display chart\n".to_string();
    };
    let width = width.max(2);
    let height = height.max(2);

    let mut grid = vec![vec![' '; width]; height];
    let x_span = x_range.max - x_range.min;
    let y_span = y_range.max - y_range.min;
    for p in series {
        let col = if x_span > 0.0 {
            ((p.x - x_range.min) / x_span * (width - 1) as f64).round() as usize
        } else {
            0
        };
        let frac = if y_span > 0.0 {
            ((p.u - y_range.min) / y_span).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let row = height - 1 - (frac * (height - 1) as f64).round() as usize;
        grid[row][col.min(width - 1)] = '*';
    }

    let middle = (height - 1) / 2;
    let mut out = String::new();
    for (r, cells) in grid.iter().enumerate() {
        let label = if r == 0 {
            format!("{:>width$.3e}", y_range.max, width = LABEL_WIDTH)
        } else if r == height - 1 {
            format!("{:>width$.3e}", y_range.min, width = LABEL_WIDTH)
        } else if r == middle {
            format!("{:>width$.3e}", (y_range.min + y_range.max) / 2.0, width = LABEL_WIDTH)
        } else {
            " ".repeat(LABEL_WIDTH)
        };
        let line: String = cells.iter().collect();
        out.push_str(&format!("{} |{}\n", label, line.trim_end()));
    }
    out.push_str(&format!("{} +{}\n", " ".repeat(LABEL_WIDTH), "-".repeat(width)));
    let left = format!("{:.3e}", x_range.min);
    let right = format!("{:.3e}", x_range.max);
    let gap = (width + 1).saturating_sub(left.len() + right.len()).max(1);
    out.push_str(&format!(
        "{}  {}{}{}\n",
        " ".repeat(LABEL_WIDTH),
        left,
        " ".repeat(gap),
        right
    ));
    out
}

/// Chart of the initial profile U(x, 0) with its own auto range.
pub fn initial_profile_chart(config: &EquationConfig, samples: usize) -> String {
    let series: Vec<ChartPoint> = config
        .initial_profile(samples)
        .into_iter()
        .map(|(x, u)| ChartPoint { x, u })
        .collect();
    match crate::solution_grid::slice_u_range(&series) {
        Some(range) => ascii_chart(&series, range, CHART_WIDTH, CHART_HEIGHT),
        None => format!(
            "Unknown initial condition type '{}'\n",
            config.initial_condition_type
        ),
    }
}
