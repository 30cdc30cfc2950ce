use crate::Team;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct TeamCollection {
    pub teams: Vec<Team>,
    index: HashMap<u32, usize>,
}

impl TeamCollection {
    pub fn new(teams: Vec<Team>) -> Self {
        let index = teams
            .iter()
            .enumerate()
            .map(|(idx, team)| (team.id, idx))
            .collect();

        TeamCollection { teams, index }
    }

    pub fn by_id(&self, id: u32) -> Option<&Team> {
        self.index.get(&id).map(|&idx| &self.teams[idx])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    /// Teams in the order of `ids`; unknown ids are left out.
    pub fn ordered(&self, ids: &[u32]) -> Vec<Team> {
        ids.iter()
            .filter_map(|id| self.by_id(*id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> TeamCollection {
        TeamCollection::new(vec![
            Team::new(1, String::from("North")),
            Team::new(2, String::from("South")),
            Team::new(3, String::from("East")),
        ])
    }

    #[test]
    fn test_by_id() {
        let teams = collection();
        assert_eq!(teams.by_id(2).map(|t| t.name.as_str()), Some("South"));
        assert!(teams.by_id(9).is_none());
    }

    #[test]
    fn test_ordered_follows_ids_and_skips_unknown() {
        let teams = collection();
        let ordered: Vec<u32> = teams.ordered(&[3, 9, 1]).iter().map(|t| t.id).collect();
        assert_eq!(ordered, vec![3, 1]);
    }
}
