pub mod cli;
pub mod equation_config;
pub mod logging;
pub mod settings;
pub mod solution_grid;
pub mod solve_request;
pub mod solver_api;
pub mod view_controller;
