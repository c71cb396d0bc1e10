//! Request lifecycle and view selection for one solution chart.
//!
//! `idle -> solving -> solved | failed`, and back to `solving` on the next
//! submission. A submission made while one is in flight is rejected, so at most
//! one solve is outstanding and outcomes arrive in submission order.

use crate::equation_config::EquationConfig;
use crate::solution_grid::{
    self, AxisRange, ChartPoint, GridSummary, Projection, SolutionPayload,
};
use crate::solve_request::SolveRequest;
use crate::solver_api::{ApiError, HttpClient, SolverApi};
use log::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Idle,
    Solving,
    Solved,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub selected_time_index: usize,
    pub auto_scale_y: bool,
    pub request_status: RequestStatus,
    pub last_error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_time_index: 0,
            auto_scale_y: true,
            request_status: RequestStatus::Idle,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewController {
    state: ViewState,
    solution: Option<SolutionPayload>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn status(&self) -> RequestStatus {
        self.state.request_status
    }

    pub fn solution(&self) -> Option<&SolutionPayload> {
        self.solution.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    /// Builds the request and submits it through `api`, blocking until the solver
    /// answers. Returns `false` when a solve is already in flight.
    pub fn submit<C: HttpClient>(&mut self, config: &EquationConfig, api: &SolverApi<C>) -> bool {
        let Some(request) = self.begin_submit(config) else {
            return false;
        };
        let outcome = api.solve(&request);
        self.complete_submit(outcome);
        true
    }

    /// First half of `submit`: moves to `Solving` and clears the previous result.
    /// `None` while another solve is outstanding.
    pub fn begin_submit(&mut self, config: &EquationConfig) -> Option<SolveRequest> {
        if self.state.request_status == RequestStatus::Solving {
            warn!("A solve is already in progress, submission ignored");
            return None;
        }
        self.state = ViewState {
            request_status: RequestStatus::Solving,
            ..ViewState::default()
        };
        self.solution = None;
        info!("Submitting {} equation", config.equation_type);
        Some(SolveRequest::build(config))
    }

    /// Second half of `submit`: records the outcome of the outstanding solve.
    pub fn complete_submit(&mut self, outcome: Result<SolutionPayload, ApiError>) {
        if self.state.request_status != RequestStatus::Solving {
            warn!("No solve in flight, outcome dropped");
            return;
        }
        match outcome {
            Ok(payload) => {
                info!(
                    "Solved: {:?} time layers",
                    payload.selectable_time_steps()
                );
                self.solution = Some(payload);
                self.state.selected_time_index = 0;
                self.state.request_status = RequestStatus::Solved;
            }
            Err(e) => {
                error!("Solve failed: {}", e);
                self.solution = None;
                self.state.last_error = Some(e.to_string());
                self.state.request_status = RequestStatus::Failed;
            }
        }
    }

    /// Number of time layers the slider can reach.
    pub fn time_layer_count(&self) -> Option<usize> {
        self.solution.as_ref()?.selectable_time_steps()
    }

    /// Selects a time layer, clamped to the available ones. Ignored before a
    /// solution exists.
    pub fn select_time(&mut self, index: usize) {
        let Some(count) = self.time_layer_count() else {
            debug!("No solution yet, time selection ignored");
            return;
        };
        self.state.selected_time_index = index.min(count.saturating_sub(1));
    }

    pub fn select_start(&mut self) {
        self.select_time(0);
    }

    pub fn select_middle(&mut self) {
        if let Some(count) = self.time_layer_count() {
            self.select_time(count / 2);
        }
    }

    pub fn select_end(&mut self) {
        if let Some(count) = self.time_layer_count() {
            self.select_time(count.saturating_sub(1));
        }
    }

    pub fn toggle_auto_scale(&mut self, enabled: bool) {
        self.state.auto_scale_y = enabled;
    }

    /// Time coordinate of the selected layer.
    pub fn current_time(&self) -> Option<f64> {
        self.solution
            .as_ref()?
            .time_coordinate(self.state.selected_time_index)
    }

    pub fn current_projection(&self) -> Projection {
        solution_grid::project_with_diagnostics(
            self.solution.as_ref(),
            self.state.selected_time_index,
        )
    }

    pub fn current_series(&self) -> Vec<ChartPoint> {
        solution_grid::project(self.solution.as_ref(), self.state.selected_time_index)
    }

    pub fn current_summary(&self) -> GridSummary {
        solution_grid::summary(self.solution.as_ref(), &self.current_series())
    }

    pub fn current_axis_range(&self) -> Option<AxisRange> {
        solution_grid::y_axis_range(
            self.solution.as_ref(),
            &self.current_series(),
            self.state.auto_scale_y,
        )
    }
}
