use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackdropResponse {
    pub url: Option<String>,
    pub last_refresh_at: Option<String>,
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GreetRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct InsightQuery {
    pub top: Option<usize>,
    pub home: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GreetResponse {
    pub message: String,
}
