use crate::Team;

#[derive(Default)]
pub struct TeamBuilder {
    id: Option<u32>,
    name: Option<String>,
    logo: Option<String>,
}

impl TeamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn logo(mut self, logo: String) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn build(self) -> Result<Team, String> {
        let name = self.name.ok_or("name is required")?;
        if name.trim().is_empty() {
            return Err(String::from("name must not be empty"));
        }

        Ok(Team {
            id: self.id.ok_or("id is required")?,
            name,
            logo: self.logo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_team() {
        let team = TeamBuilder::new()
            .id(7)
            .name(String::from("Harbour Rovers"))
            .logo(String::from("logos/rovers.png"))
            .build()
            .unwrap();

        assert_eq!(team.id, 7);
        assert_eq!(team.name, "Harbour Rovers");
        assert_eq!(team.logo.as_deref(), Some("logos/rovers.png"));
    }

    #[test]
    fn test_build_team_requires_id() {
        let result = TeamBuilder::new().name(String::from("No Id")).build();
        assert_eq!(result, Err(String::from("id is required")));
    }

    #[test]
    fn test_build_team_rejects_blank_name() {
        let result = TeamBuilder::new().id(1).name(String::from("  ")).build();
        assert!(result.is_err());
    }
}
