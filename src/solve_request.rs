//! Flat JSON body of `POST /api/solve`.
//!
//! Every config field is carried 1:1 under its wire name, including the ones the
//! current equation or boundary kinds make irrelevant; the server ignores those.

use crate::equation_config::EquationConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub equation_type: String,
    pub x1: f64,
    pub x2: f64,
    pub t2: f64,
    pub h: f64,
    pub tau: f64,
    pub left_border_condition_type: String,
    pub right_border_condition_type: String,
    pub left_dirichlet_value: f64,
    pub right_dirichlet_value: f64,
    pub left_neumann_value: f64,
    pub right_neumann_value: f64,
    pub left_robin_h: f64,
    pub left_robin_theta: f64,
    pub right_robin_h: f64,
    pub right_robin_theta: f64,
    pub coefficient_k: f64,
    pub coefficient_v: f64,
    pub coefficient_f: f64,
    pub coefficient_l: f64,
    pub coefficient_m: f64,
    pub initial_condition_type: String,
    pub initial_condition_param1: f64,
    pub initial_condition_param2: f64,
    pub initial_derivative: f64,
}

impl SolveRequest {
    pub fn build(config: &EquationConfig) -> Self {
        Self {
            equation_type: config.equation_type.clone(),
            x1: config.x1,
            x2: config.x2,
            t2: config.t2,
            h: config.h,
            tau: config.tau,
            left_border_condition_type: config.left_border_condition_type.clone(),
            right_border_condition_type: config.right_border_condition_type.clone(),
            left_dirichlet_value: config.left_dirichlet_value,
            right_dirichlet_value: config.right_dirichlet_value,
            left_neumann_value: config.left_neumann_value,
            right_neumann_value: config.right_neumann_value,
            left_robin_h: config.left_robin_h,
            left_robin_theta: config.left_robin_theta,
            right_robin_h: config.right_robin_h,
            right_robin_theta: config.right_robin_theta,
            coefficient_k: config.coefficient_k,
            coefficient_v: config.coefficient_v,
            coefficient_f: config.coefficient_f,
            coefficient_l: config.coefficient_l,
            coefficient_m: config.coefficient_m,
            initial_condition_type: config.initial_condition_type.clone(),
            initial_condition_param1: config.initial_condition_param1,
            initial_condition_param2: config.initial_condition_param2,
            initial_derivative: config.initial_derivative,
        }
    }
}

impl From<&EquationConfig> for SolveRequest {
    fn from(config: &EquationConfig) -> Self {
        SolveRequest::build(config)
    }
}
