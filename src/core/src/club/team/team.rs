use crate::club::team::builder::TeamBuilder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

impl Team {
    pub fn new(id: u32, name: String) -> Self {
        Team {
            id,
            name,
            logo: None,
        }
    }

    pub fn builder() -> TeamBuilder {
        TeamBuilder::new()
    }
}
