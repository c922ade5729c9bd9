use thiserror::Error;

/// Processing stage that rejected its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SignalSource,
    SpectrumAnalyzer,
    FilterDesigner,
    FirFilter,
    Pipeline,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::SignalSource => "signal source",
            Stage::SpectrumAnalyzer => "spectrum analyzer",
            Stage::FilterDesigner => "filter designer",
            Stage::FirFilter => "FIR filter",
            Stage::Pipeline => "pipeline",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error("Invalid parameter `{parameter}` in {stage}: {reason}")]
    InvalidParameter {
        stage: Stage,
        parameter: &'static str,
        reason: String,
    },

    #[error("Invalid input to {stage}: {reason}")]
    InvalidInput { stage: Stage, reason: String },

    #[error("Numerical instability in {stage}: {reason}")]
    NumericalInstability { stage: Stage, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DspError {
    pub(crate) fn parameter(
        stage: Stage,
        parameter: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        DspError::InvalidParameter {
            stage,
            parameter,
            reason: reason.into(),
        }
    }

    pub(crate) fn input(stage: Stage, reason: impl Into<String>) -> Self {
        DspError::InvalidInput {
            stage,
            reason: reason.into(),
        }
    }

    /// Stage that produced the error, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            DspError::InvalidParameter { stage, .. }
            | DspError::InvalidInput { stage, .. }
            | DspError::NumericalInstability { stage, .. } => Some(*stage),
            DspError::Config(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DspError>;
