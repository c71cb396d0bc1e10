use super::cli_render::{
    CHART_HEIGHT, CHART_WIDTH, ascii_chart, border_condition_text, field_description,
    initial_profile_chart, parameters_table, points_table, selector_options, summary_table,
};
use crate::equation_config::{EquationConfig, Side, is_selector_field};
use crate::settings::ClientSettings;
use crate::solver_api::SolverApi;
use crate::view_controller::{RequestStatus, ViewController};
use log::info;
use std::io::{self, Write};

/// Everything the menu works on between two choices.
pub struct Session {
    pub config: EquationConfig,
    pub controller: ViewController,
    pub settings: ClientSettings,
    pub settings_file: String,
}

impl Session {
    pub fn new(settings: ClientSettings, settings_file: &str) -> Self {
        Self {
            config: EquationConfig::default(),
            controller: ViewController::new(),
            settings,
            settings_file: settings_file.to_string(),
        }
    }
}

pub fn run_interactive_menu(settings: ClientSettings, settings_file: &str) {
    let mut session = Session::new(settings, settings_file);
    loop {
        show_main_menu(&session);
        let choice = get_user_input();
        if choice.is_empty() {
            // stdin closed
            break;
        }

        let outcome = match choice.trim() {
            "1" => parameters_menu(&mut session),
            "2" => solve(&mut session),
            "3" => time_menu(&mut session),
            "4" => toggle_auto_scale(&mut session),
            "5" => show_solution(&session),
            "6" => show_initial_profile(&session),
            "7" => health_check(&session),
            "8" => settings_menu(&mut session),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => Err("Invalid choice. Please try again.".to_string()),
        };
        if let Err(e) = outcome {
            println!("\x1b[31mError: {}\x1b[0m", e);
        }
    }
}
/* colors
Blue (\x1b[34m) - header
Yellow (\x1b[33m) - menu options
Cyan (\x1b[36m) - prompts and progress
Green (\x1b[32m) - success
Red (\x1b[31m) - errors
*/
fn show_main_menu(session: &Session) {
    let status = match session.controller.status() {
        RequestStatus::Idle => "no solution yet",
        RequestStatus::Solving => "solving",
        RequestStatus::Solved => "solved",
        RequestStatus::Failed => "last solve failed",
    };
    println!(
        "\x1b[34m\n PDE solver client\n server: {}  |  equation: {}  |  {}\n\x1b[0m",
        session.settings.base_url, session.config.equation_type, status
    );
    println!("\x1b[33m1. Edit equation parameters\x1b[0m");
    println!("\x1b[33m2. Solve\x1b[0m");
    println!("\x1b[33m3. Select time layer\x1b[0m");
    println!(
        "\x1b[33m4. Toggle Y auto-scale (now {})\x1b[0m",
        if session.controller.state().auto_scale_y { "on" } else { "off" }
    );
    println!("\x1b[33m5. Show solution\x1b[0m");
    println!("\x1b[33m6. Preview initial condition\x1b[0m");
    println!("\x1b[33m7. Check server health\x1b[0m");
    println!("\x1b[33m8. Settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    let _ = io::stdout().flush();
}

/// One line from stdin including the newline; empty when stdin is closed or unreadable.
fn get_user_input() -> String {
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        input.clear();
    }
    input
}

fn parameters_menu(session: &mut Session) -> Result<(), String> {
    loop {
        println!("\n=== Equation parameters ===");
        parameters_table(&session.config).printstd();
        println!(
            "Left boundary: {}   Right boundary: {}",
            border_condition_text(&session.config, Side::Left),
            border_condition_text(&session.config, Side::Right)
        );
        println!("Enter a field number or name, or `name=value`.");
        println!("d. Restore defaults");
        println!("0. Back");
        prompt("Choice: ");
        let input = get_user_input();
        let input = input.trim();

        match input {
            "0" | "" => return Ok(()),
            "d" => {
                session.config = EquationConfig::default();
                println!("\x1b[32mDefaults restored\x1b[0m");
            }
            _ => {
                if let Err(e) = edit_field(&mut session.config, input) {
                    println!("\x1b[31mError: {}\x1b[0m", e);
                }
            }
        }
    }
}

fn edit_field(config: &mut EquationConfig, input: &str) -> Result<(), String> {
    let (field, value) = match input.split_once('=') {
        Some((field, value)) => (resolve_field(config, field.trim())?, value.trim().to_string()),
        None => {
            let field = resolve_field(config, input)?;
            (field.clone(), ask_value(config, &field))
        }
    };
    let value = resolve_option(&field, &value);
    config
        .update(&field, &value)
        .map_err(|e| e.to_string())?;
    info!("{} set to {}", field, value);
    println!(
        "\x1b[32m{} = {}\x1b[0m",
        field,
        config.field(&field).map(|v| v.to_string()).unwrap_or_default()
    );
    Ok(())
}

/// Field name from a row number of the parameters table or a name as typed.
fn resolve_field(config: &EquationConfig, input: &str) -> Result<String, String> {
    let active = config.active_fields();
    match input.parse::<usize>() {
        Ok(n) => active
            .get(n.wrapping_sub(1))
            .map(|f| f.to_string())
            .ok_or_else(|| format!("No field number {}", n)),
        Err(_) => Ok(input.to_string()),
    }
}

fn ask_value(config: &EquationConfig, field: &str) -> String {
    let current = config.field(field).map(|v| v.to_string()).unwrap_or_default();
    println!("{} (current: {})", field_description(config, field), current);
    for (i, option) in selector_options(field).iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    prompt("New value: ");
    get_user_input().trim().to_string()
}

/// A selector accepts the number of an option as well as its name.
fn resolve_option(field: &str, value: &str) -> String {
    if !is_selector_field(field) {
        return value.to_string();
    }
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => selector_options(field)
            .get(n - 1)
            .map(|o| o.to_string())
            .unwrap_or_else(|| value.to_string()),
        _ => value.to_string(),
    }
}

fn solve(session: &mut Session) -> Result<(), String> {
    let api = SolverApi::new(&session.settings.base_url).map_err(|e| e.to_string())?;
    println!(
        "\x1b[36mSolving equation at {}... Please wait.\x1b[0m",
        api.base_url()
    );
    if !session.controller.submit(&session.config, &api) {
        return Err("A solve is already in progress".to_string());
    }
    match session.controller.status() {
        RequestStatus::Solved => {
            println!("\x1b[32mSolution received\x1b[0m");
            show_solution(session)
        }
        _ => Err(session
            .controller
            .last_error()
            .unwrap_or("Error solving the equation")
            .to_string()),
    }
}

fn time_menu(session: &mut Session) -> Result<(), String> {
    let Some(count) = session.controller.time_layer_count() else {
        return Err("No solution yet. Solve the equation first.".to_string());
    };
    println!(
        "\nTime layers: {} (0..{}), selected {}",
        count,
        count.saturating_sub(1),
        session.controller.state().selected_time_index
    );
    println!("s. Start   m. Middle   e. End   or a layer number");
    prompt("Choice: ");
    let input = get_user_input();
    match input.trim() {
        "s" => session.controller.select_start(),
        "m" => session.controller.select_middle(),
        "e" => session.controller.select_end(),
        other => {
            let index = other
                .parse::<usize>()
                .map_err(|_| format!("Not a layer number: '{}'", other))?;
            session.controller.select_time(index);
        }
    }
    show_solution(session)
}

fn toggle_auto_scale(session: &mut Session) -> Result<(), String> {
    let enabled = !session.controller.state().auto_scale_y;
    session.controller.toggle_auto_scale(enabled);
    println!(
        "Y axis {}",
        if enabled {
            "follows the selected slice"
        } else {
            "fixed to the global solution range"
        }
    );
    Ok(())
}

fn show_solution(session: &Session) -> Result<(), String> {
    let controller = &session.controller;
    if controller.solution().is_none() {
        return Err(controller
            .last_error()
            .unwrap_or("No solution yet. Solve the equation first.")
            .to_string());
    }
    let projection = controller.current_projection();
    let auto_scale = controller.state().auto_scale_y;
    let summary = controller.current_summary();
    let y_range = controller.current_axis_range();

    println!("\n=== Solution ===");
    summary_table(
        &summary,
        projection.time_index,
        controller.current_time(),
        auto_scale,
        y_range,
    )
    .printstd();
    if session.settings.preview_rows > 0 && !projection.is_empty() {
        println!("First {} points:", session.settings.preview_rows);
        points_table(&projection.points, session.settings.preview_rows).printstd();
    }
    match y_range {
        Some(range) => print!(
            "{}",
            ascii_chart(&projection.points, range, CHART_WIDTH, CHART_HEIGHT)
        ),
        None => println!("No data to display chart"),
    }
    if !projection.anomalies.is_empty() {
        println!("\x1b[33mData issues:\x1b[0m");
        for anomaly in &projection.anomalies {
            // red when the anomaly cost the whole series
            let colour = if anomaly.is_fatal() { 31 } else { 33 };
            println!("\x1b[{}m  - {}\x1b[0m", colour, anomaly);
        }
    }
    Ok(())
}

fn show_initial_profile(session: &Session) -> Result<(), String> {
    let config = &session.config;
    println!(
        "\nU(x, 0), {} on [{}, {}]",
        config.initial_condition_type, config.x1, config.x2
    );
    print!("{}", initial_profile_chart(config, CHART_WIDTH));
    Ok(())
}

fn health_check(session: &Session) -> Result<(), String> {
    let api = SolverApi::new(&session.settings.base_url).map_err(|e| e.to_string())?;
    let health = api.check_health().map_err(|e| e.to_string())?;
    println!(
        "\x1b[32mServer status: {}\x1b[0m",
        health.status.as_deref().unwrap_or("unknown")
    );
    if let Some(message) = health.message {
        println!("{}", message);
    }
    Ok(())
}

fn settings_menu(session: &mut Session) -> Result<(), String> {
    loop {
        println!("\n=== Settings ({}) ===", session.settings_file);
        for (i, key) in ClientSettings::KEYS.iter().enumerate() {
            println!(
                "{}. {} = {}",
                i + 1,
                key,
                session.settings.get(key).unwrap_or_default()
            );
        }
        println!("s. Save");
        println!("0. Back");
        prompt("Choice: ");
        let input = get_user_input();

        match input.trim() {
            "0" | "" => return Ok(()),
            "s" => {
                session
                    .settings
                    .save(&session.settings_file)
                    .map_err(|e| e.to_string())?;
                println!("\x1b[32mSettings saved\x1b[0m");
            }
            choice => {
                let keys = ClientSettings::KEYS;
                let key = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| keys.get(n.wrapping_sub(1)))
                    .ok_or_else(|| format!("Unknown setting '{}'", choice))?;
                prompt(&format!("New value for {}: ", key));
                let value = get_user_input();
                match session.settings.set(key, &value) {
                    Ok(()) => println!("\x1b[32m{} updated\x1b[0m", key),
                    Err(e) => println!("\x1b[31mError: {}\x1b[0m", e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_field_by_row_number() {
        let config = EquationConfig::default();
        assert_eq!(resolve_field(&config, "1").unwrap(), "equationType");
        assert_eq!(resolve_field(&config, "8").unwrap(), "leftDirichletValue");
        assert_eq!(resolve_field(&config, "coefficientK").unwrap(), "coefficientK");
        assert!(resolve_field(&config, "0").is_err());
        assert!(resolve_field(&config, "99").is_err());
    }

    #[test]
    fn test_resolve_option_numbers_for_selectors_only() {
        assert_eq!(resolve_option("equationType", "2"), "hyperbolic");
        assert_eq!(resolve_option("leftBorderConditionType", "robin"), "robin");
        assert_eq!(resolve_option("initialConditionType", "9"), "9");
        assert_eq!(resolve_option("coefficientK", "2"), "2");
    }

    #[test]
    fn test_edit_field_inline_assignment() {
        let mut config = EquationConfig::default();
        edit_field(&mut config, "t2 = 60").unwrap();
        assert_eq!(config.t2, 60.0);
        edit_field(&mut config, "rightBorderConditionType=3").unwrap();
        assert_eq!(config.right_border_condition_type, "robin");
        assert!(edit_field(&mut config, "bogus=1").is_err());
    }
}
