use serde::Serialize;

/// Outcome of the most recent `modifyPosition` submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Processing,
    Errored(String)
}

impl SubmitStatus {
    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing)
    }
}

/// Render hints for the primary submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitView {
    pub label:    &'static str,
    pub disabled: bool,
    pub errored:  bool
}

impl From<&SubmitStatus> for SubmitView {
    fn from(status: &SubmitStatus) -> Self {
        match status {
            SubmitStatus::Idle => Self { label: "Add Liquidity", disabled: false, errored: false },
            SubmitStatus::Processing => Self { label: "Processing...", disabled: true, errored: false },
            SubmitStatus::Errored(_) => Self { label: "Add Liquidity", disabled: false, errored: true }
        }
    }
}
