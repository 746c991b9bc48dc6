use anyhow::anyhow;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Local,
    Development,
    Production,
}

impl Stage {
    pub fn try_from(stage: &str) -> anyhow::Result<Self> {
        match stage {
            "local" => Ok(Stage::Local),
            "development" => Ok(Stage::Development),
            "production" => Ok(Stage::Production),
            _ => Err(anyhow!("Invalid stage: {}", stage)),
        }
    }
}
