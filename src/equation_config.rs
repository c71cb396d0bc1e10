//! # Equation Configuration Module
//!
//! ## Aim
//! Holds the full parameter set of one solve request for a 1-D parabolic or hyperbolic
//! equation and applies user edits to it the way a forgiving input form does.
//!
//! ## Main Data Structures and Logic
//! - `EquationConfig`: flat parameter set, one field per wire field of the solve request
//! - `EquationType`, `BorderConditionType`, `InitialConditionType`: typed views of the
//!   selector fields (the config itself keeps the selector text verbatim)
//! - `BorderCondition`: tagged view of one side, only the values meaningful for its kind
//! - `active_fields()`: capability table mapping the selectors to the fields a form shows
//!
//! ## Usage
//! ```rust
//! use pde_client::equation_config::EquationConfig;
//!
//! let mut config = EquationConfig::default();
//! config.update("equationType", "hyperbolic").unwrap();
//! config.update("coefficientK", "abc").unwrap(); // unparsable -> 0
//! assert_eq!(config.coefficient_k, 0.0);
//! assert!(config.active_fields().contains(&"coefficientM"));
//! ```

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Wire names of every field, in the order the solve request lists them.
pub const ALL_FIELDS: [&str; 25] = [
    "equationType",
    "x1",
    "x2",
    "t2",
    "h",
    "tau",
    "leftBorderConditionType",
    "rightBorderConditionType",
    "leftDirichletValue",
    "rightDirichletValue",
    "leftNeumannValue",
    "rightNeumannValue",
    "leftRobinH",
    "leftRobinTheta",
    "rightRobinH",
    "rightRobinTheta",
    "coefficientK",
    "coefficientV",
    "coefficientF",
    "coefficientL",
    "coefficientM",
    "initialConditionType",
    "initialConditionParam1",
    "initialConditionParam2",
    "initialDerivative",
];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Unknown {kind}: {value}")]
    UnknownSelector { kind: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationType {
    Parabolic,
    Hyperbolic,
}

impl EquationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquationType::Parabolic => "parabolic",
            EquationType::Hyperbolic => "hyperbolic",
        }
    }
}

impl FromStr for EquationType {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parabolic" => Ok(EquationType::Parabolic),
            "hyperbolic" => Ok(EquationType::Hyperbolic),
            _ => Err(ConfigError::UnknownSelector {
                kind: "equation type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderConditionType {
    Dirichlet,
    Neumann,
    Robin,
}

impl BorderConditionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderConditionType::Dirichlet => "dirichlet",
            BorderConditionType::Neumann => "neumann",
            BorderConditionType::Robin => "robin",
        }
    }
}

impl FromStr for BorderConditionType {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dirichlet" => Ok(BorderConditionType::Dirichlet),
            "neumann" => Ok(BorderConditionType::Neumann),
            "robin" => Ok(BorderConditionType::Robin),
            _ => Err(ConfigError::UnknownSelector {
                kind: "border condition type",
                value: s.to_string(),
            }),
        }
    }
}

/// Shape of U(x, 0). The two generic parameters change meaning with the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialConditionType {
    Constant,
    Linear,
    Sinusoidal,
    Gaussian,
}

impl InitialConditionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitialConditionType::Constant => "constant",
            InitialConditionType::Linear => "linear",
            InitialConditionType::Sinusoidal => "sinusoidal",
            InitialConditionType::Gaussian => "gaussian",
        }
    }

    pub fn param1_label(&self) -> &'static str {
        match self {
            InitialConditionType::Gaussian => "amplitude A",
            InitialConditionType::Constant => "constant",
            InitialConditionType::Linear => "intercept",
            InitialConditionType::Sinusoidal => "amplitude",
        }
    }

    pub fn param2_label(&self) -> &'static str {
        match self {
            InitialConditionType::Gaussian => "width σ",
            InitialConditionType::Linear => "slope",
            InitialConditionType::Sinusoidal => "frequency",
            InitialConditionType::Constant => "parameter",
        }
    }

    /// Value of the initial profile at `x` on the domain `[x1, x2]`.
    ///
    /// The profile is defined on the normalized coordinate `s = (x - x1) / (x2 - x1)`:
    /// - constant: `p1`
    /// - linear: `p1 + p2 * s`
    /// - sinusoidal: `p1 * sin(p2 * PI * s)`
    /// - gaussian: `p1 * exp(-((s - 0.5) / sigma)^2)`, `sigma = p2` or `0.1` when `p2 <= 0`
    pub fn evaluate(&self, x: f64, x1: f64, x2: f64, p1: f64, p2: f64) -> f64 {
        let s = (x - x1) / (x2 - x1);
        match self {
            InitialConditionType::Constant => p1,
            InitialConditionType::Linear => p1 + p2 * s,
            InitialConditionType::Sinusoidal => p1 * (p2 * std::f64::consts::PI * s).sin(),
            InitialConditionType::Gaussian => {
                let sigma = if p2 > 0.0 { p2 } else { 0.1 };
                p1 * (-((s - 0.5) / sigma).powi(2)).exp()
            }
        }
    }
}

impl FromStr for InitialConditionType {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "constant" => Ok(InitialConditionType::Constant),
            "linear" => Ok(InitialConditionType::Linear),
            "sinusoidal" => Ok(InitialConditionType::Sinusoidal),
            "gaussian" => Ok(InitialConditionType::Gaussian),
            _ => Err(ConfigError::UnknownSelector {
                kind: "initial condition type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One side of the domain, carrying only the values its kind uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderCondition {
    Dirichlet { value: f64 },
    Neumann { flux: f64 },
    Robin { h: f64, theta: f64 },
}

/// A field read back from the config: selectors are text, the rest are numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(v) => write!(f, "{}", v),
        }
    }
}

/// Parameters of one equation-solving request.
///
/// Selector fields keep whatever text the user chose; the typed accessors
/// (`equation_kind()`, `border_condition()`, ...) parse them on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationConfig {
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
    /// diffusivity, m²/s
    pub coefficient_k: f64,
    pub coefficient_v: f64,
    pub coefficient_f: f64,
    pub coefficient_l: f64,
    /// hyperbolic only
    pub coefficient_m: f64,
    pub initial_condition_type: String,
    pub initial_condition_param1: f64,
    pub initial_condition_param2: f64,
    /// hyperbolic only
    pub initial_derivative: f64,
}

impl Default for EquationConfig {
    /// Diffusion through a 1 mm slab over 30 s: zero concentration held on both
    /// faces, D = 1e-9 m²/s, Gaussian initial concentration centred in the slab.
    fn default() -> Self {
        Self {
            equation_type: EquationType::Parabolic.as_str().to_string(),
            x1: 0.0,
            x2: 0.001,
            t2: 30.0,
            h: 0.00001,
            tau: 0.01,
            left_border_condition_type: BorderConditionType::Dirichlet.as_str().to_string(),
            right_border_condition_type: BorderConditionType::Dirichlet.as_str().to_string(),
            left_dirichlet_value: 0.0,
            right_dirichlet_value: 0.0,
            left_neumann_value: 0.0,
            right_neumann_value: 0.0,
            left_robin_h: 1.0,
            left_robin_theta: 0.0,
            right_robin_h: 1.0,
            right_robin_theta: 0.0,
            coefficient_k: 1e-9,
            coefficient_v: 0.0,
            coefficient_f: 0.0,
            coefficient_l: 1.0,
            coefficient_m: 1.0,
            initial_condition_type: InitialConditionType::Gaussian.as_str().to_string(),
            initial_condition_param1: 100.0,
            initial_condition_param2: 0.15,
            initial_derivative: 0.0,
        }
    }
}

impl EquationConfig {
    /// Applies one edit. Selector fields are stored verbatim, every other field
    /// goes through `parse_number_lenient`, so a typo silently becomes 0.
    /// No cross-field checks are made here; the solver owns those.
    pub fn update(&mut self, field: &str, raw_value: &str) -> Result<(), ConfigError> {
        if is_selector_field(field) {
            let slot = self
                .selector_mut(field)
                .ok_or_else(|| ConfigError::UnknownField(field.to_string()))?;
            *slot = raw_value.to_string();
        } else {
            let slot = self
                .number_mut(field)
                .ok_or_else(|| ConfigError::UnknownField(field.to_string()))?;
            *slot = parse_number_lenient(raw_value);
        }
        Ok(())
    }

    pub fn field(&self, field: &str) -> Option<FieldValue> {
        if let Some(text) = self.selector(field) {
            return Some(FieldValue::Text(text.to_string()));
        }
        self.number(field).map(FieldValue::Number)
    }

    pub fn equation_kind(&self) -> Option<EquationType> {
        self.equation_type.parse().ok()
    }

    pub fn is_hyperbolic(&self) -> bool {
        self.equation_kind() == Some(EquationType::Hyperbolic)
    }

    pub fn initial_condition_kind(&self) -> Option<InitialConditionType> {
        self.initial_condition_type.parse().ok()
    }

    pub fn border_condition_kind(&self, side: Side) -> Option<BorderConditionType> {
        match side {
            Side::Left => self.left_border_condition_type.parse().ok(),
            Side::Right => self.right_border_condition_type.parse().ok(),
        }
    }

    pub fn border_condition(&self, side: Side) -> Option<BorderCondition> {
        let kind = self.border_condition_kind(side)?;
        let condition = match (side, kind) {
            (Side::Left, BorderConditionType::Dirichlet) => BorderCondition::Dirichlet {
                value: self.left_dirichlet_value,
            },
            (Side::Right, BorderConditionType::Dirichlet) => BorderCondition::Dirichlet {
                value: self.right_dirichlet_value,
            },
            (Side::Left, BorderConditionType::Neumann) => BorderCondition::Neumann {
                flux: self.left_neumann_value,
            },
            (Side::Right, BorderConditionType::Neumann) => BorderCondition::Neumann {
                flux: self.right_neumann_value,
            },
            (Side::Left, BorderConditionType::Robin) => BorderCondition::Robin {
                h: self.left_robin_h,
                theta: self.left_robin_theta,
            },
            (Side::Right, BorderConditionType::Robin) => BorderCondition::Robin {
                h: self.right_robin_h,
                theta: self.right_robin_theta,
            },
        };
        Some(condition)
    }

    /// Fields a form should show for the current selectors, in form order.
    /// Unrecognised selector text activates none of its dependent fields.
    pub fn active_fields(&self) -> Vec<&'static str> {
        let mut fields = vec!["equationType", "x1", "x2", "t2", "h", "tau"];

        fields.push("leftBorderConditionType");
        fields.extend(border_value_fields(
            Side::Left,
            self.border_condition_kind(Side::Left),
        ));
        fields.push("rightBorderConditionType");
        fields.extend(border_value_fields(
            Side::Right,
            self.border_condition_kind(Side::Right),
        ));

        fields.extend(["coefficientK", "coefficientV", "coefficientF", "coefficientL"]);
        let hyperbolic = self.is_hyperbolic();
        if hyperbolic {
            fields.push("coefficientM");
        }

        fields.extend([
            "initialConditionType",
            "initialConditionParam1",
            "initialConditionParam2",
        ]);
        if hyperbolic {
            fields.push("initialDerivative");
        }
        fields
    }

    /// U(x, 0) sampled at `n` evenly spaced points of `[x1, x2]`.
    /// Empty when the initial condition type is not recognised or `n == 0`.
    pub fn initial_profile(&self, n: usize) -> Vec<(f64, f64)> {
        let Some(kind) = self.initial_condition_kind() else {
            return Vec::new();
        };
        if n == 0 {
            return Vec::new();
        }
        let step = if n > 1 {
            (self.x2 - self.x1) / (n - 1) as f64
        } else {
            0.0
        };
        (0..n)
            .map(|i| {
                let x = self.x1 + step * i as f64;
                let u = kind.evaluate(
                    x,
                    self.x1,
                    self.x2,
                    self.initial_condition_param1,
                    self.initial_condition_param2,
                );
                (x, u)
            })
            .collect()
    }

    fn selector(&self, field: &str) -> Option<&str> {
        match field {
            "equationType" => Some(&self.equation_type),
            "leftBorderConditionType" => Some(&self.left_border_condition_type),
            "rightBorderConditionType" => Some(&self.right_border_condition_type),
            "initialConditionType" => Some(&self.initial_condition_type),
            _ => None,
        }
    }

    fn selector_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "equationType" => Some(&mut self.equation_type),
            "leftBorderConditionType" => Some(&mut self.left_border_condition_type),
            "rightBorderConditionType" => Some(&mut self.right_border_condition_type),
            "initialConditionType" => Some(&mut self.initial_condition_type),
            _ => None,
        }
    }

    fn number(&self, field: &str) -> Option<f64> {
        let value = match field {
            "x1" => self.x1,
            "x2" => self.x2,
            "t2" => self.t2,
            "h" => self.h,
            "tau" => self.tau,
            "leftDirichletValue" => self.left_dirichlet_value,
            "rightDirichletValue" => self.right_dirichlet_value,
            "leftNeumannValue" => self.left_neumann_value,
            "rightNeumannValue" => self.right_neumann_value,
            "leftRobinH" => self.left_robin_h,
            "leftRobinTheta" => self.left_robin_theta,
            "rightRobinH" => self.right_robin_h,
            "rightRobinTheta" => self.right_robin_theta,
            "coefficientK" => self.coefficient_k,
            "coefficientV" => self.coefficient_v,
            "coefficientF" => self.coefficient_f,
            "coefficientL" => self.coefficient_l,
            "coefficientM" => self.coefficient_m,
            "initialConditionParam1" => self.initial_condition_param1,
            "initialConditionParam2" => self.initial_condition_param2,
            "initialDerivative" => self.initial_derivative,
            _ => return None,
        };
        Some(value)
    }

    fn number_mut(&mut self, field: &str) -> Option<&mut f64> {
        let slot = match field {
            "x1" => &mut self.x1,
            "x2" => &mut self.x2,
            "t2" => &mut self.t2,
            "h" => &mut self.h,
            "tau" => &mut self.tau,
            "leftDirichletValue" => &mut self.left_dirichlet_value,
            "rightDirichletValue" => &mut self.right_dirichlet_value,
            "leftNeumannValue" => &mut self.left_neumann_value,
            "rightNeumannValue" => &mut self.right_neumann_value,
            "leftRobinH" => &mut self.left_robin_h,
            "leftRobinTheta" => &mut self.left_robin_theta,
            "rightRobinH" => &mut self.right_robin_h,
            "rightRobinTheta" => &mut self.right_robin_theta,
            "coefficientK" => &mut self.coefficient_k,
            "coefficientV" => &mut self.coefficient_v,
            "coefficientF" => &mut self.coefficient_f,
            "coefficientL" => &mut self.coefficient_l,
            "coefficientM" => &mut self.coefficient_m,
            "initialConditionParam1" => &mut self.initial_condition_param1,
            "initialConditionParam2" => &mut self.initial_condition_param2,
            "initialDerivative" => &mut self.initial_derivative,
            _ => return None,
        };
        Some(slot)
    }
}

/// Selector fields are the equation type and every `*Type` field.
pub fn is_selector_field(field: &str) -> bool {
    field == "equationType" || field.contains("Type")
}

fn border_value_fields(side: Side, kind: Option<BorderConditionType>) -> Vec<&'static str> {
    match (side, kind) {
        (Side::Left, Some(BorderConditionType::Dirichlet)) => vec!["leftDirichletValue"],
        (Side::Left, Some(BorderConditionType::Neumann)) => vec!["leftNeumannValue"],
        (Side::Left, Some(BorderConditionType::Robin)) => vec!["leftRobinH", "leftRobinTheta"],
        (Side::Right, Some(BorderConditionType::Dirichlet)) => vec!["rightDirichletValue"],
        (Side::Right, Some(BorderConditionType::Neumann)) => vec!["rightNeumannValue"],
        (Side::Right, Some(BorderConditionType::Robin)) => vec!["rightRobinH", "rightRobinTheta"],
        (_, None) => vec![],
    }
}

fn numeric_prefix() -> &'static Regex {
    static NUMERIC_PREFIX: OnceLock<Regex> = OnceLock::new();
    NUMERIC_PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
    })
}

/// Parses the longest numeric prefix of `raw` (after leading whitespace).
/// Anything that yields no number, NaN or negative zero comes back as `0.0`.
pub fn parse_number_lenient(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let parsed = numeric_prefix()
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok());
    match parsed {
        Some(v) if !v.is_nan() && v != 0.0 => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config_is_physically_valid() {
        let config = EquationConfig::default();
        assert!(config.x1 < config.x2);
        assert!(config.t2 > 0.0);
        assert!(config.h > 0.0);
        assert!(config.tau > 0.0);
        assert!(config.coefficient_k >= 0.0);
        assert_eq!(config.equation_kind(), Some(EquationType::Parabolic));
        assert_eq!(
            config.initial_condition_kind(),
            Some(InitialConditionType::Gaussian)
        );
    }

    #[test]
    fn test_update_coerces_numbers() {
        let mut config = EquationConfig::default();
        config.update("coefficientK", "abc").unwrap();
        assert_eq!(config.coefficient_k, 0.0);

        config.update("x2", "0.002").unwrap();
        assert_relative_eq!(config.x2, 0.002);

        config.update("t2", "  12.5s").unwrap();
        assert_relative_eq!(config.t2, 12.5);

        config.update("h", "1e-5").unwrap();
        assert_relative_eq!(config.h, 1e-5);

        config.update("tau", "").unwrap();
        assert_eq!(config.tau, 0.0);

        config.update("coefficientV", "-Infinity").unwrap();
        assert_eq!(config.coefficient_v, f64::NEG_INFINITY);
    }

    #[test]
    fn test_update_keeps_selectors_verbatim() {
        let mut config = EquationConfig::default();
        config.update("equationType", "hyperbolic").unwrap();
        assert_eq!(config.equation_type, "hyperbolic");
        assert!(config.is_hyperbolic());

        config.update("leftBorderConditionType", "123").unwrap();
        assert_eq!(config.left_border_condition_type, "123");
        assert_eq!(config.border_condition_kind(Side::Left), None);
    }

    #[test]
    fn test_update_unknown_field() {
        let mut config = EquationConfig::default();
        let before = config.clone();
        let result = config.update("coefficientZ", "1");
        assert_eq!(
            result,
            Err(ConfigError::UnknownField("coefficientZ".to_string()))
        );
        assert_eq!(config, before);
    }

    #[test]
    fn test_every_field_readable() {
        let config = EquationConfig::default();
        for name in ALL_FIELDS {
            assert!(config.field(name).is_some(), "field {} not readable", name);
        }
        assert_eq!(
            config.field("equationType"),
            Some(FieldValue::Text("parabolic".to_string()))
        );
        assert_eq!(config.field("leftRobinH"), Some(FieldValue::Number(1.0)));
    }

    #[test]
    fn test_parse_number_lenient() {
        assert_eq!(parse_number_lenient("42"), 42.0);
        assert_eq!(parse_number_lenient("3.5abc"), 3.5);
        assert_eq!(parse_number_lenient(".5"), 0.5);
        assert_eq!(parse_number_lenient("1e"), 1.0);
        assert_eq!(parse_number_lenient("-0"), 0.0);
        assert!(parse_number_lenient("-0").is_sign_positive());
        assert_eq!(parse_number_lenient("NaN"), 0.0);
        assert_eq!(parse_number_lenient("abc12"), 0.0);
        assert_eq!(parse_number_lenient("Infinity"), f64::INFINITY);
    }

    #[test]
    fn test_active_fields_default() {
        let config = EquationConfig::default();
        let fields = config.active_fields();
        assert!(fields.contains(&"leftDirichletValue"));
        assert!(fields.contains(&"rightDirichletValue"));
        assert!(!fields.contains(&"leftNeumannValue"));
        assert!(!fields.contains(&"leftRobinH"));
        assert!(!fields.contains(&"coefficientM"));
        assert!(!fields.contains(&"initialDerivative"));
        assert!(fields.contains(&"initialConditionParam2"));
    }

    #[test]
    fn test_active_fields_hyperbolic_robin_neumann() {
        let mut config = EquationConfig::default();
        config.update("equationType", "hyperbolic").unwrap();
        config.update("leftBorderConditionType", "robin").unwrap();
        config.update("rightBorderConditionType", "neumann").unwrap();
        let fields = config.active_fields();
        assert!(fields.contains(&"coefficientM"));
        assert!(fields.contains(&"initialDerivative"));
        assert!(fields.contains(&"leftRobinH"));
        assert!(fields.contains(&"leftRobinTheta"));
        assert!(!fields.contains(&"leftDirichletValue"));
        assert!(fields.contains(&"rightNeumannValue"));
        assert!(!fields.contains(&"rightRobinH"));
        // every active field is a real wire field
        for f in &fields {
            assert!(ALL_FIELDS.contains(f));
        }
    }

    #[test]
    fn test_border_condition_view() {
        let mut config = EquationConfig::default();
        config.update("rightBorderConditionType", "robin").unwrap();
        config.update("rightRobinH", "2.5").unwrap();
        config.update("rightRobinTheta", "300").unwrap();
        assert_eq!(
            config.border_condition(Side::Right),
            Some(BorderCondition::Robin {
                h: 2.5,
                theta: 300.0
            })
        );
        assert_eq!(
            config.border_condition(Side::Left),
            Some(BorderCondition::Dirichlet { value: 0.0 })
        );
    }

    #[test]
    fn test_initial_condition_formulas() {
        let gaussian = InitialConditionType::Gaussian;
        assert_relative_eq!(gaussian.evaluate(0.5, 0.0, 1.0, 100.0, 0.15), 100.0);
        let edge = gaussian.evaluate(0.0, 0.0, 1.0, 100.0, 0.15);
        assert_relative_eq!(edge, 100.0 * (-(0.5f64 / 0.15).powi(2)).exp());
        // non-positive width falls back to 0.1
        assert_relative_eq!(
            gaussian.evaluate(0.6, 0.0, 1.0, 1.0, 0.0),
            (-1.0f64).exp(),
            epsilon = 1e-12
        );

        let linear = InitialConditionType::Linear;
        assert_relative_eq!(linear.evaluate(5.0, 0.0, 10.0, 1.0, 4.0), 3.0);

        let sinusoidal = InitialConditionType::Sinusoidal;
        assert_relative_eq!(sinusoidal.evaluate(0.5, 0.0, 1.0, 2.0, 1.0), 2.0);

        assert_eq!(InitialConditionType::Constant.evaluate(0.3, 0.0, 1.0, 7.0, 9.0), 7.0);
    }

    #[test]
    fn test_initial_profile_peaks_in_centre() {
        let config = EquationConfig::default();
        let profile = config.initial_profile(11);
        assert_eq!(profile.len(), 11);
        assert_relative_eq!(profile[0].0, 0.0);
        assert_relative_eq!(profile[10].0, 0.001, epsilon = 1e-12);
        assert_relative_eq!(profile[5].1, 100.0, epsilon = 1e-9);
        assert!(profile[0].1 < profile[5].1);

        let mut unknown = config.clone();
        unknown.update("initialConditionType", "custom").unwrap();
        assert!(unknown.initial_profile(11).is_empty());
    }

    #[test]
    fn test_selector_parsing_is_case_insensitive() {
        assert_eq!("Hyperbolic".parse::<EquationType>(), Ok(EquationType::Hyperbolic));
        assert_eq!(
            "ROBIN".parse::<BorderConditionType>(),
            Ok(BorderConditionType::Robin)
        );
        assert!("elliptic".parse::<EquationType>().is_err());
        assert_eq!(InitialConditionType::Linear.param2_label(), "slope");
    }
}
