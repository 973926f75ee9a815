pub struct DefaultsConfig {
    pub analysis: String,
    pub method: String,
    pub explorer: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            analysis: "range".to_string(),
            method: "tresca".to_string(),
            explorer: "triangular".to_string(),
        }
    }
}
