//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    Mount,
    Submit { text: String },
    RefreshHistory,
    RefreshLeaders,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Submit { .. } => "submit",
            Self::RefreshHistory => "refresh_history",
            Self::RefreshLeaders => "refresh_leaders",
        }
    }
}
