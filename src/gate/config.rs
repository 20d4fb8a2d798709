// Gate configuration

/// Permission gate configuration
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Approve every action without prompting (trusted/headless hosts)
    pub notifications_disabled: bool,
    /// Title shown on every approval prompt
    pub title: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            notifications_disabled: false,
            title: "Shell Command Permission Request".to_string(),
        }
    }
}
